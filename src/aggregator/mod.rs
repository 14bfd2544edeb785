//! Aggregation of allocation records into a stack-keyed trie.
//!
//! This module transforms a stream of allocation records into:
//! - A prefix tree over call-stack frames with per-order counts
//! - A lazy flattened view of every recorded stack
//! - A ranked view by allocation count or page space

pub mod rank;
pub mod record;
pub mod trie;

// Re-export main types and functions
pub use rank::{rank, RankedEntry, WeightMode};
pub use record::Record;
pub use trie::{CountsView, FlatRecord, Flatten, StackTrie};
