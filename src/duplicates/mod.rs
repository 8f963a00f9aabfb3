//! Duplicate detection: file grouping, directory signatures, and the
//! pipeline orchestrator.
//!
//! # Overview
//!
//! The pipeline has three stages composing a single batch run:
//!
//! 1. **Walk & hash** ([`crate::scanner`]) - enumerate files and
//!    directories, compute a content hash per file
//! 2. **Directory aggregation** ([`dirs`]) - signature per directory
//!    (file count + sorted contained hashes), wrapper exclusion, grouping
//! 3. **File grouping** ([`files`]) - group files by content hash with a
//!    minimum-size filter
//!
//! The walker's records feed both grouping stages independently; each
//! stage is a pure function over immutable records and can be tested with
//! fixture data, no filesystem needed.

pub mod dirs;
pub mod files;
pub mod finder;

pub use dirs::{DirectorySignature, DuplicateDirectoryGroup};
pub use files::{DuplicateFileGroup, MemberFile};
pub use finder::{DuplicateFinder, FindReport, FinderConfig, FinderError, ScanSummary};

/// Bytes per megabyte, the unit the size threshold is expressed in.
pub(crate) const BYTES_PER_MB: f64 = 1_048_576.0;
