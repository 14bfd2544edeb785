//! Snapshot subtraction over two aggregation tries.
//!
//! Used to compare two `page_owner` dumps taken at different times: build
//! one trie per dump, subtract the old one from the new one, then rank
//! the result. Growth shows up as positive counts, freed paths as
//! negative ones.

use log::debug;

use crate::aggregator::StackTrie;

/// Subtract `source` from `target` in place.
///
/// **Public** - the differencer
///
/// Flattens `source` into its full per-`(order, stack)` record list and
/// inserts each into `target` with a negated delta. This is a full
/// outer-join subtraction keyed on `(order, stack)`: keys present only in
/// `source` are created in `target` with negative counts, keys present
/// only in `target` are untouched, and absence on either side counts as
/// zero. `source` is never mutated.
///
/// No attempt is made to validate that the two tries came from comparable
/// snapshots (same system, same page-size assumptions); mismatched inputs
/// simply produce unexpected positive or negative buckets.
pub fn subtract(target: &mut StackTrie, source: &StackTrie) {
    let mut keys = 0u64;
    for record in source.flatten(false) {
        for (order, count) in record.counts.iter() {
            target.insert(order, record.stack, -count);
            keys += 1;
        }
    }
    debug!("subtracted {} (order, stack) keys", keys);
}
