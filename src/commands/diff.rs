//! The `diff` command: compare two dumps taken at different times.

use std::path::PathBuf;

use anyhow::Result;
use log::debug;

use crate::diff::subtract;

use super::{emit, load_dump, ReportOptions};

/// Arguments for the diff command
///
/// **Public** - constructed by main.rs from CLI flags
#[derive(Debug, Clone)]
pub struct DiffArgs {
    /// Path to the older dump (the baseline)
    pub old_file: PathBuf,

    /// Path to the newer dump
    pub new_file: PathBuf,

    /// Shared output options
    pub options: ReportOptions,
}

/// Execute the diff command
///
/// **Public** - main entry point for `pagetrace diff`
///
/// Both dumps are aggregated independently, then the old trie is
/// subtracted from the new one and the result is ranked. Growth shows up
/// with positive counts, freed paths with negative ones.
pub fn execute_diff(args: DiffArgs) -> Result<()> {
    debug!("diff {:?} -> {:?}", args.old_file, args.new_file);

    let old = load_dump(&args.old_file)?;
    let mut new = load_dump(&args.new_file)?;

    subtract(&mut new, &old);

    emit(&new, &args.options)
}
