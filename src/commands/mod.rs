//! CLI command implementations.
//!
//! Each command is implemented in its own module. Commands orchestrate
//! the library components (reader, trie, differencer, ranker, writers)
//! to perform user tasks; no aggregation logic lives here.

use std::fs::File;
use std::io::{self, BufReader};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::{info, warn};

use crate::aggregator::{rank, StackTrie, WeightMode};
use crate::output::{build_report, write_entries, write_report};
use crate::parser::PageOwnerReader;

pub mod diff;
pub mod parse;

// Re-export main command functions
pub use diff::{execute_diff, DiffArgs};
pub use parse::{execute_parse, ParseArgs};

/// Output options shared by both subcommands
#[derive(Debug, Clone)]
pub struct ReportOptions {
    /// Collapse all orders of one stack into a single entry
    pub merge_by_stack: bool,

    /// Rank by page space instead of raw allocation count
    pub rank_by_space: bool,

    /// Keep only the heaviest N entries
    pub top: Option<usize>,

    /// Also write a JSON report to this path
    pub json: Option<PathBuf>,
}

/// Stream a dump file into a fresh trie.
///
/// The file is consumed record by record; only the trie stays resident.
/// The first malformed record aborts the run.
pub(crate) fn load_dump(path: &Path) -> Result<StackTrie> {
    let file =
        File::open(path).with_context(|| format!("cannot open dump {}", path.display()))?;
    let reader = PageOwnerReader::new(BufReader::new(file));

    let mut trie = StackTrie::new();
    let mut records = 0u64;
    for record in reader {
        let record =
            record.with_context(|| format!("malformed record in {}", path.display()))?;
        trie.add(&record);
        records += 1;
    }

    if trie.is_empty() {
        warn!("no records found in {}", path.display());
    } else {
        info!("aggregated {} records from {}", records, path.display());
    }

    Ok(trie)
}

/// Rank a trie and emit text (and optionally a JSON report).
pub(crate) fn emit(trie: &StackTrie, options: &ReportOptions) -> Result<()> {
    let mode = if options.rank_by_space {
        WeightMode::Space
    } else {
        WeightMode::Count
    };

    let mut entries = rank(trie, options.merge_by_stack, mode);
    if let Some(top) = options.top {
        entries.truncate(top);
    }

    let stdout = io::stdout();
    write_entries(&mut stdout.lock(), &entries).context("failed to write ranked output")?;

    if let Some(path) = &options.json {
        let report = build_report(entries, options.merge_by_stack, options.rank_by_space);
        write_report(&report, path)
            .with_context(|| format!("failed to write JSON report {}", path.display()))?;
    }

    Ok(())
}
