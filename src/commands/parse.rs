//! The `parse` command: aggregate and rank a single dump.

use std::path::PathBuf;

use anyhow::Result;
use log::debug;

use super::{emit, load_dump, ReportOptions};

/// Arguments for the parse command
///
/// **Public** - constructed by main.rs from CLI flags
#[derive(Debug, Clone)]
pub struct ParseArgs {
    /// Path to the page_owner dump
    pub file: PathBuf,

    /// Shared output options
    pub options: ReportOptions,
}

/// Execute the parse command
///
/// **Public** - main entry point for `pagetrace parse`
pub fn execute_parse(args: ParseArgs) -> Result<()> {
    debug!("parse {:?}", args.file);

    let trie = load_dump(&args.file)?;
    emit(&trie, &args.options)
}
