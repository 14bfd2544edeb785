//! Rendering ranked entries for consumption outside the tool.
//!
//! The display layer is fully decoupled from the aggregation logic: it
//! receives the ordered entries produced by [`crate::aggregator::rank`]
//! and only formats them.

pub mod json;
pub mod text;

// Re-export main entry points
pub use json::{build_report, read_report, write_report, Report};
pub use text::write_entries;
