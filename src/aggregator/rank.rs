//! Ranked views over a flattened trie.
//!
//! Ranked entries are the primary output of the tool: the stacks holding
//! the most allocations (or the most page space), heaviest first.

use std::collections::BTreeMap;

use log::debug;
use serde::{Deserialize, Serialize};

use super::trie::StackTrie;

/// How the weight of a flattened record is computed
///
/// **Public** - selected by the `--space` CLI flag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeightMode {
    /// Weight is the sum of raw allocation counts
    Count,

    /// Weight is the sum of `count * 2^order`, in base-page units.
    /// A display layer may further scale by the page size in bytes.
    Space,
}

/// One ranked aggregation result
///
/// **Public** - output contract towards the display layer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedEntry {
    /// Signed count per allocation order (a single entry unless the
    /// ranking was merged by stack)
    pub counts: BTreeMap<u32, i64>,

    /// Call stack of the allocation path
    pub stack: Vec<String>,

    /// Weight the entry was ranked by
    pub weight: i64,
}

/// Rank the trie's records by descending weight.
///
/// **Public** - main entry point for ranked output
///
/// # Arguments
/// * `trie` - Populated (and possibly diffed) aggregation trie
/// * `merge_by_stack` - Collapse all orders of one stack into one entry
/// * `mode` - Weigh by raw count or by page space
///
/// # Tie-break
/// The sort is stable over the post-order flatten emission (children in
/// lexicographic frame order), so entries with equal weight keep that
/// traversal order. This is the documented, deterministic tie-break;
/// no stronger ordering is implied.
pub fn rank(trie: &StackTrie, merge_by_stack: bool, mode: WeightMode) -> Vec<RankedEntry> {
    let mut entries: Vec<RankedEntry> = trie
        .flatten(merge_by_stack)
        .map(|record| {
            let weight = match mode {
                WeightMode::Count => record.counts.total_count(),
                WeightMode::Space => record.counts.total_pages(),
            };
            RankedEntry {
                counts: record.counts.to_map(),
                stack: record.stack.to_vec(),
                weight,
            }
        })
        .collect();

    entries.sort_by(|a, b| b.weight.cmp(&a.weight));

    debug!("ranked {} entries ({:?} mode)", entries.len(), mode);

    entries
}
