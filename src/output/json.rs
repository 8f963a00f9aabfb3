//! JSON output formatter.
//!
//! Emits one document with both result sets and the scan summary. Absent
//! result sets serialize as `null`, mirroring the in-memory report.
//!
//! # Example
//!
//! ```no_run
//! use dupescan::duplicates::DuplicateFinder;
//! use dupescan::output::json::JsonOutput;
//! use std::path::Path;
//!
//! let finder = DuplicateFinder::with_defaults();
//! let (report, summary) = finder.find(Path::new(".")).unwrap();
//! JsonOutput::new(&report, &summary).write_to(std::io::stdout()).unwrap();
//! ```

use std::io;

use serde_json::json;
use thiserror::Error;

use crate::duplicates::{FindReport, ScanSummary};

/// Errors that can occur during JSON output generation.
#[derive(Debug, Error)]
pub enum JsonOutputError {
    /// I/O error during writing.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Error during JSON serialization.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// JSON output formatter.
pub struct JsonOutput<'a> {
    report: &'a FindReport,
    summary: &'a ScanSummary,
}

impl<'a> JsonOutput<'a> {
    /// Create a new JSON output formatter.
    #[must_use]
    pub fn new(report: &'a FindReport, summary: &'a ScanSummary) -> Self {
        Self { report, summary }
    }

    /// Write the JSON document to the given writer.
    ///
    /// # Errors
    ///
    /// Returns `JsonOutputError` if writing or serialization fails.
    pub fn write_to<W: io::Write>(&self, mut writer: W) -> Result<(), JsonOutputError> {
        let document = json!({
            "duplicate_files": self.report.duplicate_files,
            "duplicate_dirs": self.report.duplicate_dirs,
            "summary": {
                "total_files": self.summary.total_files,
                "total_dirs": self.summary.total_dirs,
                "bytes_hashed": self.summary.bytes_hashed,
                "duplicate_file_groups": self.summary.duplicate_file_groups,
                "duplicate_dir_groups": self.summary.duplicate_dir_groups,
                "duration_ms": self.summary.scan_duration.as_millis() as u64,
                "warnings": self.summary.warnings,
            },
        });
        serde_json::to_writer_pretty(&mut writer, &document)?;
        writeln!(writer)?;
        Ok(())
    }

    /// Generate the JSON document as a string.
    ///
    /// # Errors
    ///
    /// Returns `JsonOutputError` if serialization fails.
    pub fn to_string(&self) -> Result<String, JsonOutputError> {
        let mut buffer = Vec::new();
        self.write_to(&mut buffer)?;
        String::from_utf8(buffer)
            .map_err(|e| JsonOutputError::Io(io::Error::new(io::ErrorKind::InvalidData, e)))
    }
}
