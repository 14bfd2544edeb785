//! Plain-text rendering of ranked entries.
//!
//! Keeps the layout of the classic page_owner report: per-order count
//! lines, then the stack frames, then a blank line between entries.

use std::io::{self, Write};

use crate::aggregator::RankedEntry;

/// Write ranked entries as human-readable text
///
/// **Public** - main entry point for stdout output
///
/// ```text
/// PageOrder: 2, PageCount: 3
/// Stack:
/// __alloc_pages+0x1b4/0x2c8
/// vm_area_alloc_pages+0xe8/0x318
/// ```
pub fn write_entries<W: Write>(out: &mut W, entries: &[RankedEntry]) -> io::Result<()> {
    for entry in entries {
        for (order, count) in &entry.counts {
            writeln!(out, "PageOrder: {}, PageCount: {}", order, count)?;
        }
        writeln!(out, "Stack:")?;
        for frame in &entry.stack {
            writeln!(out, "{}", frame)?;
        }
        writeln!(out)?;
    }
    Ok(())
}
