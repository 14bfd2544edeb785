//! Streaming reader for `page_owner` dump files.
//!
//! A dump is a sequence of record blocks separated by blank lines:
//!
//! ```text
//! Page allocated via order 2, mask 0x1052c0(...), pid 1, ts 123 ns
//! PFN 262144 type Unmovable Block 512 Flags ...
//!  __alloc_pages+0x1b4/0x2c8
//!  alloc_pages_mpol+0x9c/0x1f0
//!  vm_area_alloc_pages+0xe8/0x318
//!
//! Page allocated via order 0, ...
//! ```
//!
//! Line 0 carries the allocation order as its fifth whitespace token
//! (trailing comma stripped), line 1 is the PFN/flags line and is
//! skipped, every remaining line is one stack frame.

use std::io::BufRead;

use log::info;

use crate::aggregator::Record;
use crate::utils::config::{MAX_ORDER, PROGRESS_INTERVAL};
use crate::utils::error::ParseError;

/// Position of the order token on the allocation header line
const ORDER_TOKEN_INDEX: usize = 4;

/// Streams [`Record`]s out of a `page_owner` dump.
///
/// **Public** - the log-reading collaborator of the aggregation core
///
/// Implements `Iterator<Item = Result<Record, ParseError>>`. A malformed
/// block yields an error; per the propagation policy the caller is
/// expected to abort the run rather than skip it.
pub struct PageOwnerReader<R> {
    lines: std::io::Lines<R>,
    block: Vec<String>,
    emitted: u64,
    done: bool,
}

impl<R: BufRead> PageOwnerReader<R> {
    /// Create a reader over any buffered source
    ///
    /// **Public** - constructor
    pub fn new(reader: R) -> Self {
        Self {
            lines: reader.lines(),
            block: Vec::new(),
            emitted: 0,
            done: false,
        }
    }

    fn finish_block(&mut self) -> Result<Record, ParseError> {
        let result = parse_block(&self.block);
        self.block.clear();
        if result.is_ok() {
            if self.emitted % PROGRESS_INTERVAL == 0 {
                info!("parsed {} records", self.emitted);
            }
            self.emitted += 1;
        }
        result
    }
}

impl<R: BufRead> Iterator for PageOwnerReader<R> {
    type Item = Result<Record, ParseError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        loop {
            match self.lines.next() {
                Some(Ok(line)) => {
                    let line = line.trim();
                    if line.is_empty() {
                        if !self.block.is_empty() {
                            return Some(self.finish_block());
                        }
                    } else {
                        self.block.push(line.to_string());
                    }
                }
                Some(Err(e)) => {
                    self.done = true;
                    return Some(Err(ParseError::Io(e)));
                }
                None => {
                    self.done = true;
                    if self.block.is_empty() {
                        return None;
                    }
                    return Some(self.finish_block());
                }
            }
        }
    }
}

/// Parse one blank-line delimited block into a [`Record`]
///
/// **Private** - internal block parser
fn parse_block(lines: &[String]) -> Result<Record, ParseError> {
    // Header, PFN line, and at least one frame.
    if lines.len() < 3 {
        return Err(ParseError::TruncatedBlock {
            lines: lines.len(),
            head: lines.first().cloned().unwrap_or_default(),
        });
    }

    let head = &lines[0];
    let token = head
        .split_whitespace()
        .nth(ORDER_TOKEN_INDEX)
        .ok_or_else(|| ParseError::MissingOrder(head.clone()))?;
    let order = token
        .trim_end_matches(',')
        .parse::<u32>()
        .map_err(|_| ParseError::InvalidOrder(head.clone()))?;
    // The aggregation core trusts the reader; an absurd order would
    // overflow the 64-bit space weights downstream.
    if order > MAX_ORDER {
        return Err(ParseError::OrderOutOfRange {
            order,
            head: head.clone(),
        });
    }

    let stack = lines[2..].iter().map(|l| l.trim().to_string()).collect();

    Ok(Record::new(order, stack))
}
