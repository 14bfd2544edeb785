//! The stack-keyed trie that accumulates allocation counts.
//!
//! Each node is addressed by the path of frame strings from the root, so
//! two records with identical stacks always land on the same node and a
//! single differing frame splits them into separate branches. Memory is
//! proportional to the number of distinct stack paths, not to the number
//! of raw records, which is the reason a trie is used instead of a flat
//! map keyed by concatenated stacks.

use std::collections::btree_map;
use std::collections::BTreeMap;

use super::record::Record;

/// Prefix tree over call-stack frames with signed per-order counts.
///
/// **Public** - the aggregation engine
///
/// Counts are signed because a diff ([`crate::diff::subtract`]) may drive
/// them negative or to zero; nodes are never removed once created, so the
/// presence of a node after a diff still signals "this stack exists in at
/// least one of the compared snapshots".
#[derive(Debug, Clone, Default)]
pub struct StackTrie {
    root: Node,
}

/// One trie node. Children are exclusively owned; terminal data exists
/// only if some recorded stack ends exactly here.
#[derive(Debug, Clone, Default)]
struct Node {
    /// Child per distinct next frame, in lexicographic frame order.
    /// The ordered map keeps traversal (and therefore ranking tie-break)
    /// deterministic.
    children: BTreeMap<String, Node>,

    /// Set on the first insertion that terminates at this node.
    terminal: Option<Terminal>,
}

/// Count data carried by a terminal node.
#[derive(Debug, Clone)]
struct Terminal {
    /// Representative stack, stored once on first terminal insertion.
    /// Used only for display; aggregation keys on the trie path itself.
    stack: Vec<String>,

    /// Signed count per allocation order.
    counts: BTreeMap<u32, i64>,
}

impl StackTrie {
    /// Create an empty trie
    ///
    /// **Public** - constructor
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one allocation (`delta = +1`)
    ///
    /// **Public** - entry point for the streaming reader
    pub fn add(&mut self, record: &Record) {
        self.insert(record.order, &record.stack, 1);
    }

    /// Add `delta` to the count for `(order, stack)`.
    ///
    /// **Public** - also used by the differencer with negative deltas
    ///
    /// Walks from the root consuming one frame per level, creating child
    /// nodes lazily. At the node where the stack is exhausted the node is
    /// marked terminal (storing `stack` as the representative, exactly
    /// once) and `delta` is added to `counts[order]`, creating the entry
    /// at zero first if absent. An empty stack terminates at the root.
    /// Never fails for well-formed input.
    pub fn insert(&mut self, order: u32, stack: &[String], delta: i64) {
        let mut node = &mut self.root;
        for frame in stack {
            node = node.children.entry(frame.clone()).or_default();
        }

        let terminal = node.terminal.get_or_insert_with(|| Terminal {
            stack: stack.to_vec(),
            counts: BTreeMap::new(),
        });
        *terminal.counts.entry(order).or_insert(0) += delta;
    }

    /// True if no record was ever inserted
    pub fn is_empty(&self) -> bool {
        self.root.children.is_empty() && self.root.terminal.is_none()
    }

    /// Lazily flatten the trie into `(counts_view, stack)` records.
    ///
    /// **Public** - feeds both ranking and diffing
    ///
    /// The walk is depth-first and post-order (children before self),
    /// visiting children in lexicographic frame order. With
    /// `merge_by_stack` one record per terminal stack is emitted carrying
    /// its whole counts map; without it, one record per `(order, count)`
    /// entry. The iterator borrows the trie and produces records on
    /// demand, so a caller can start consuming before the walk finishes;
    /// calling `flatten` again restarts the walk.
    pub fn flatten(&self, merge_by_stack: bool) -> Flatten<'_> {
        Flatten {
            merge: merge_by_stack,
            frames: vec![WalkFrame {
                children: self.root.children.values(),
                node: &self.root,
            }],
            pending: None,
        }
    }
}

/// Borrowed counts of one flattened record.
///
/// **Public** - part of the flatten/rank output contract
#[derive(Debug, Clone, Copy)]
pub enum CountsView<'a> {
    /// Every order recorded for the stack (merge-by-stack mode)
    Merged(&'a BTreeMap<u32, i64>),

    /// A single `(order, count)` entry (per-order mode)
    Single { order: u32, count: i64 },
}

impl<'a> CountsView<'a> {
    /// Iterate over `(order, count)` pairs
    pub fn iter(&self) -> CountsIter<'a> {
        match *self {
            CountsView::Merged(map) => CountsIter(CountsIterInner::Merged(map.iter())),
            CountsView::Single { order, count } => {
                CountsIter(CountsIterInner::Single(std::iter::once((order, count))))
            }
        }
    }

    /// Sum of raw allocation counts
    pub fn total_count(&self) -> i64 {
        self.iter().map(|(_, count)| count).sum()
    }

    /// Sum of counts weighted by allocation size, in base-page units
    /// (`count * 2^order` per entry)
    pub fn total_pages(&self) -> i64 {
        self.iter().map(|(order, count)| count * (1i64 << order)).sum()
    }

    /// Owned copy of the counts
    pub fn to_map(&self) -> BTreeMap<u32, i64> {
        self.iter().collect()
    }
}

/// Iterator over the `(order, count)` pairs of a [`CountsView`]
pub struct CountsIter<'a>(CountsIterInner<'a>);

enum CountsIterInner<'a> {
    Merged(btree_map::Iter<'a, u32, i64>),
    Single(std::iter::Once<(u32, i64)>),
}

impl<'a> Iterator for CountsIter<'a> {
    type Item = (u32, i64);

    fn next(&mut self) -> Option<Self::Item> {
        match &mut self.0 {
            CountsIterInner::Merged(iter) => iter.next().map(|(&o, &c)| (o, c)),
            CountsIterInner::Single(iter) => iter.next(),
        }
    }
}

/// One record emitted by [`StackTrie::flatten`]
#[derive(Debug, Clone, Copy)]
pub struct FlatRecord<'a> {
    /// Counts carried by the terminal node (whole map or single entry)
    pub counts: CountsView<'a>,

    /// Representative stack of the terminal node
    pub stack: &'a [String],
}

/// Lazy post-order walk over the terminal records of a [`StackTrie`].
///
/// Created by [`StackTrie::flatten`].
pub struct Flatten<'a> {
    merge: bool,

    /// Explicit walk stack; each frame holds the not-yet-visited children
    /// of a node plus the node itself, emitted after its children.
    frames: Vec<WalkFrame<'a>>,

    /// Per-order emission in progress for the current terminal node
    /// (non-merged mode only).
    pending: Option<PerOrder<'a>>,
}

struct WalkFrame<'a> {
    children: btree_map::Values<'a, String, Node>,
    node: &'a Node,
}

struct PerOrder<'a> {
    counts: btree_map::Iter<'a, u32, i64>,
    stack: &'a [String],
}

impl<'a> Iterator for Flatten<'a> {
    type Item = FlatRecord<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(per_order) = &mut self.pending {
                if let Some((&order, &count)) = per_order.counts.next() {
                    return Some(FlatRecord {
                        counts: CountsView::Single { order, count },
                        stack: per_order.stack,
                    });
                }
                self.pending = None;
            }

            let frame = self.frames.last_mut()?;
            if let Some(child) = frame.children.next() {
                self.frames.push(WalkFrame {
                    children: child.children.values(),
                    node: child,
                });
                continue;
            }

            // All children emitted; the node itself is next.
            let node = frame.node;
            self.frames.pop();

            if let Some(terminal) = &node.terminal {
                if self.merge {
                    return Some(FlatRecord {
                        counts: CountsView::Merged(&terminal.counts),
                        stack: &terminal.stack,
                    });
                }
                self.pending = Some(PerOrder {
                    counts: terminal.counts.iter(),
                    stack: &terminal.stack,
                });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stack(frames: &[&str]) -> Vec<String> {
        frames.iter().map(|f| f.to_string()).collect()
    }

    #[test]
    fn test_accumulation_same_key() {
        let mut trie = StackTrie::new();
        for _ in 0..3 {
            trie.add(&Record::new(2, stack(&["a", "b"])));
        }

        let records: Vec<_> = trie.flatten(false).collect();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].stack, stack(&["a", "b"]));
        assert_eq!(records[0].counts.to_map(), BTreeMap::from([(2, 3)]));
    }

    #[test]
    fn test_path_divergence() {
        let mut trie = StackTrie::new();
        trie.add(&Record::new(1, stack(&["a", "b", "x"])));
        trie.add(&Record::new(1, stack(&["a", "b", "y"])));

        let records: Vec<_> = trie.flatten(false).collect();
        assert_eq!(records.len(), 2);
        for record in &records {
            assert_eq!(record.counts.total_count(), 1);
        }
        let stacks: Vec<_> = records.iter().map(|r| r.stack.to_vec()).collect();
        assert!(stacks.contains(&stack(&["a", "b", "x"])));
        assert!(stacks.contains(&stack(&["a", "b", "y"])));
    }

    #[test]
    fn test_is_empty() {
        let mut trie = StackTrie::new();
        assert!(trie.is_empty());

        trie.add(&Record::new(0, stack(&["a"])));
        assert!(!trie.is_empty());

        // A record terminating at the root still counts.
        let mut root_only = StackTrie::new();
        root_only.insert(0, &[], 1);
        assert!(!root_only.is_empty());
    }

    #[test]
    fn test_empty_stack_terminates_at_root() {
        let mut trie = StackTrie::new();
        trie.insert(0, &[], 4);

        let records: Vec<_> = trie.flatten(true).collect();
        assert_eq!(records.len(), 1);
        assert!(records[0].stack.is_empty());
        assert_eq!(records[0].counts.total_count(), 4);
    }

    #[test]
    fn test_single_frame_stack() {
        let mut trie = StackTrie::new();
        trie.add(&Record::new(0, stack(&["only"])));

        let records: Vec<_> = trie.flatten(true).collect();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].stack, stack(&["only"]));
    }

    #[test]
    fn test_representative_stack_set_once() {
        let mut trie = StackTrie::new();
        trie.add(&Record::new(0, stack(&["a"])));
        trie.add(&Record::new(1, stack(&["a"])));

        let records: Vec<_> = trie.flatten(true).collect();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].counts.to_map(), BTreeMap::from([(0, 1), (1, 1)]));
    }

    #[test]
    fn test_post_order_children_before_self() {
        let mut trie = StackTrie::new();
        trie.add(&Record::new(0, stack(&["a"])));
        trie.add(&Record::new(0, stack(&["a", "b"])));

        let stacks: Vec<_> = trie.flatten(true).map(|r| r.stack.to_vec()).collect();
        assert_eq!(stacks, vec![stack(&["a", "b"]), stack(&["a"])]);
    }

    #[test]
    fn test_flatten_is_lazy_and_restartable() {
        let mut trie = StackTrie::new();
        trie.add(&Record::new(0, stack(&["a"])));
        trie.add(&Record::new(0, stack(&["b"])));

        let mut iter = trie.flatten(true);
        let first = iter.next().unwrap();
        assert_eq!(first.stack, stack(&["a"]));
        drop(iter);

        // A second call restarts the walk from the beginning.
        let again: Vec<_> = trie.flatten(true).map(|r| r.stack.to_vec()).collect();
        assert_eq!(again, vec![stack(&["a"]), stack(&["b"])]);
    }

    #[test]
    fn test_merge_consistency() {
        let mut trie = StackTrie::new();
        trie.add(&Record::new(0, stack(&["k"])));
        trie.add(&Record::new(2, stack(&["k"])));
        trie.add(&Record::new(2, stack(&["k"])));

        let merged_total: i64 = trie
            .flatten(true)
            .map(|r| r.counts.total_count())
            .sum();
        let per_order_total: i64 = trie
            .flatten(false)
            .map(|r| r.counts.total_count())
            .sum();
        assert_eq!(merged_total, per_order_total);
        assert_eq!(merged_total, 3);
    }

    #[test]
    fn test_counts_view_weights() {
        let counts = BTreeMap::from([(3, 5)]);
        let view = CountsView::Merged(&counts);
        assert_eq!(view.total_count(), 5);
        assert_eq!(view.total_pages(), 40);

        let single = CountsView::Single { order: 3, count: 5 };
        assert_eq!(single.total_count(), 5);
        assert_eq!(single.total_pages(), 40);
    }

    #[test]
    fn test_negative_counts_survive() {
        let mut trie = StackTrie::new();
        trie.insert(1, &stack(&["x"]), -4);

        let records: Vec<_> = trie.flatten(false).collect();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].counts.total_count(), -4);
        assert_eq!(records[0].counts.total_pages(), -8);
    }
}
