//! Error types for the entire application.
//!
//! We use `thiserror` for library-style errors with custom types,
//! and `anyhow` for application-level error propagation in main.rs and
//! the command layer.
//!
//! The aggregation core itself has no error type: `insert`, `subtract`
//! and `rank` cannot fail on well-formed records, and malformed records
//! are rejected by the reader before they reach the core. A bad record
//! is fatal to the run rather than skipped, because a silently dropped
//! record would corrupt aggregate totals without any visible signal.

use thiserror::Error;

/// Errors that can occur while reading a page_owner dump
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("record block too short ({lines} lines): {head:?}")]
    TruncatedBlock { lines: usize, head: String },

    #[error("allocation header has no order field: {0:?}")]
    MissingOrder(String),

    #[error("allocation header has a non-numeric order: {0:?}")]
    InvalidOrder(String),

    #[error("allocation order {order} exceeds the supported maximum: {head:?}")]
    OrderOutOfRange { order: u32, head: String },
}

/// Errors that can occur during report output
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("Failed to write file: {0}")]
    WriteFailed(#[from] std::io::Error),

    #[error("Failed to read file: {0}")]
    ReadFailed(std::io::Error),

    #[error("Failed to serialize JSON: {0}")]
    SerializationFailed(#[from] serde_json::Error),

    #[error("Invalid output path: {0}")]
    InvalidPath(String),
}
