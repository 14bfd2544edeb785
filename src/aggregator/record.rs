//! The allocation record handed to the aggregator.

use serde::{Deserialize, Serialize};

/// A single allocation parsed out of a `page_owner` dump.
///
/// **Public** - input contract between the reader and the aggregator
///
/// `order` means the allocation spans `2^order` base-size pages. `stack`
/// is the call path that produced the allocation, outermost frame first,
/// each frame an opaque string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// Allocation order (the allocation spans `2^order` base pages)
    pub order: u32,

    /// Call stack, outer-to-inner as captured in the dump
    pub stack: Vec<String>,
}

impl Record {
    /// Create a new record
    ///
    /// **Public** - constructor
    pub fn new(order: u32, stack: Vec<String>) -> Self {
        Self { order, stack }
    }
}
