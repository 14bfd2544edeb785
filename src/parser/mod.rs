//! Reading allocation records out of `page_owner` dumps.
//!
//! The reader streams records one at a time so that dumps with millions
//! of allocations never have to be buffered in full; only the aggregation
//! trie (proportional to the number of *distinct* stacks) stays resident.

pub mod page_owner;

// Re-export main types
pub use page_owner::PageOwnerReader;
