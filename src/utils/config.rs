//! Configuration and constants for the CLI.

/// Base page size assumed when scaling space figures to bytes.
/// Order-0 pages on the systems this tool targets are 4 KiB.
pub const PAGE_SIZE_BYTES: u64 = 4096;

/// Largest allocation order the reader accepts. Real kernels stay far
/// below this; the bound keeps `count * 2^order` space weights inside
/// signed 64-bit arithmetic.
pub const MAX_ORDER: u32 = 62;

/// Current JSON report schema version
pub const SCHEMA_VERSION: &str = "1.0.0";

/// Emit a progress log line every this many parsed records
pub const PROGRESS_INTERVAL: u64 = 10_000;
