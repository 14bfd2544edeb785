//! Pagetrace
//!
//! Call-stack aggregation, ranking and snapshot diffing for Linux
//! `page_owner` debug dumps.
//!
//! This crate provides the core implementation for the
//! `pagetrace` CLI tool.
//!
//! ## Getting Started
//!
//! Most users should install and use the CLI:
//!
//! ```bash
//! cargo install pagetrace
//! pagetrace --help
//! ```
//!
//! The aggregation engine itself ([`aggregator`], [`diff`]) is pure and
//! performs no I/O; the `page_owner` reader ([`parser`]), the report
//! writers ([`output`]) and the CLI glue ([`commands`]) are thin layers
//! around it.

pub mod aggregator;
pub mod commands;
pub mod diff;
pub mod output;
pub mod parser;
pub mod utils;
