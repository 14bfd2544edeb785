//! Pagetrace CLI
//!
//! Aggregates kernel page_owner dumps by allocation call stack and ranks
//! the paths holding the most memory, optionally diffing two snapshots.

use anyhow::Result;
use clap::{Parser, Subcommand};
use env_logger::Env;
use std::path::PathBuf;

use pagetrace::commands::{execute_diff, execute_parse, DiffArgs, ParseArgs, ReportOptions};

/// Pagetrace - rank page_owner allocations by call stack
#[derive(Parser, Debug)]
#[command(name = "pagetrace")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Rank by page space instead of raw allocation count
    #[arg(long, global = true)]
    space: bool,

    /// Merge same-stack allocations into one entry regardless of order
    #[arg(long = "merge-stack", global = true)]
    merge_stack: bool,

    /// Keep only the heaviest N entries
    #[arg(long, global = true)]
    top: Option<usize>,

    /// Also write a JSON report to this path
    #[arg(long, global = true)]
    json: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Aggregate and rank a single page_owner dump
    Parse {
        /// Path to the page_owner dump file
        file: PathBuf,
    },

    /// Diff two page_owner dumps (new minus old) and rank the result
    Diff {
        /// Older dump (the baseline)
        old_file: PathBuf,

        /// Newer dump
        new_file: PathBuf,
    },
}

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    let options = ReportOptions {
        merge_by_stack: cli.merge_stack,
        rank_by_space: cli.space,
        top: cli.top,
        json: cli.json,
    };

    // Execute command
    match cli.command {
        Commands::Parse { file } => execute_parse(ParseArgs { file, options }),
        Commands::Diff { old_file, new_file } => execute_diff(DiffArgs {
            old_file,
            new_file,
            options,
        }),
    }
}
