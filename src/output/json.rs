//! JSON report output writer.
//!
//! Writes ranked entries, with enough metadata to tell reports apart, to
//! JSON files with proper formatting.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use chrono::Utc;
use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::aggregator::RankedEntry;
use crate::utils::config::{PAGE_SIZE_BYTES, SCHEMA_VERSION};
use crate::utils::error::OutputError;

/// A ranked report ready for serialization
///
/// **Public** - output contract for `--json`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    /// Schema version for the report format
    pub version: String,

    /// Timestamp when the report was generated
    pub generated_at: String,

    /// Whether orders were merged per stack
    pub merge_by_stack: bool,

    /// Whether entries were ranked by page space instead of raw count
    pub rank_by_space: bool,

    /// Base page size assumed for space figures, in bytes
    pub page_size_bytes: u64,

    /// Ranked entries, heaviest first
    pub entries: Vec<RankedEntry>,
}

/// Assemble a report from ranked entries
///
/// **Public** - called by the command layer
pub fn build_report(entries: Vec<RankedEntry>, merge_by_stack: bool, rank_by_space: bool) -> Report {
    Report {
        version: SCHEMA_VERSION.to_string(),
        generated_at: Utc::now().to_rfc3339(),
        merge_by_stack,
        rank_by_space,
        page_size_bytes: PAGE_SIZE_BYTES,
        entries,
    }
}

/// Write a report to a JSON file
///
/// **Public** - main entry point for JSON output
///
/// # Errors
/// * `OutputError::WriteFailed` - I/O error during write
/// * `OutputError::SerializationFailed` - JSON serialization error
/// * `OutputError::InvalidPath` - Path cannot be created or is invalid
pub fn write_report(report: &Report, output_path: impl AsRef<Path>) -> Result<(), OutputError> {
    let output_path = output_path.as_ref();

    info!("Writing report to: {}", output_path.display());

    validate_output_path(output_path)?;

    // Create parent directories if needed
    if let Some(parent) = output_path.parent() {
        if !parent.exists() {
            debug!("Creating parent directories: {}", parent.display());
            std::fs::create_dir_all(parent).map_err(|e| {
                OutputError::InvalidPath(format!(
                    "Cannot create directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }
    }

    let file = File::create(output_path).map_err(OutputError::WriteFailed)?;
    let writer = BufWriter::new(file);

    serde_json::to_writer_pretty(writer, report).map_err(OutputError::SerializationFailed)?;

    info!("Report written ({} entries)", report.entries.len());

    Ok(())
}

/// Read a report back from a JSON file
///
/// **Public** - useful for tooling and testing
pub fn read_report(input_path: impl AsRef<Path>) -> Result<Report, OutputError> {
    let input_path = input_path.as_ref();

    debug!("Reading report from: {}", input_path.display());

    let file = File::open(input_path).map_err(OutputError::ReadFailed)?;
    let report: Report = serde_json::from_reader(file).map_err(OutputError::SerializationFailed)?;

    debug!(
        "Report loaded: version {}, {} entries",
        report.version,
        report.entries.len()
    );

    Ok(report)
}

/// Validate that output path is writable
///
/// **Private** - internal validation
fn validate_output_path(path: &Path) -> Result<(), OutputError> {
    if path.as_os_str().is_empty() {
        return Err(OutputError::InvalidPath("Path is empty".to_string()));
    }

    if path.exists() && path.is_dir() {
        return Err(OutputError::InvalidPath(format!(
            "Path is a directory: {}",
            path.display()
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;
    use tempfile::NamedTempFile;

    fn create_test_report() -> Report {
        build_report(
            vec![RankedEntry {
                counts: BTreeMap::from([(2, 3)]),
                stack: vec!["__alloc_pages".to_string(), "vfs_read".to_string()],
                weight: 3,
            }],
            false,
            false,
        )
    }

    #[test]
    fn test_write_and_read_report() {
        let report = create_test_report();
        let temp_file = NamedTempFile::new().unwrap();
        let path = temp_file.path();

        write_report(&report, path).unwrap();
        let loaded = read_report(path).unwrap();

        assert_eq!(loaded.version, report.version);
        assert_eq!(loaded.page_size_bytes, PAGE_SIZE_BYTES);
        assert_eq!(loaded.entries, report.entries);
    }

    #[test]
    fn test_read_report_missing_file() {
        let err = read_report("/nonexistent/report.json").unwrap_err();
        assert!(matches!(err, OutputError::ReadFailed(_)));
    }

    #[test]
    fn test_validate_output_path_empty() {
        let result = validate_output_path(Path::new(""));
        assert!(result.is_err());
    }

    #[test]
    fn test_validate_output_path_directory() {
        let temp_dir = tempfile::tempdir().unwrap();
        let result = validate_output_path(temp_dir.path());
        assert!(result.is_err());
    }

    #[test]
    fn test_write_creates_parent_dirs() {
        let temp_dir = tempfile::tempdir().unwrap();
        let nested_path = temp_dir.path().join("nested/dirs/report.json");

        let report = create_test_report();
        write_report(&report, &nested_path).unwrap();

        assert!(nested_path.exists());
    }
}
