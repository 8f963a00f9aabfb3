//! dupescan - Content-Addressed Duplicate Finder
//!
//! A cross-platform Rust library and CLI for finding duplicate files and
//! duplicate directories using content hashing (BLAKE3). Files are grouped
//! by their full content hash; directories are grouped by a canonical
//! signature (file count plus the sorted list of contained hashes), with
//! single-child wrapper directories excluded so that a match is reported at
//! exactly one nesting level.

pub mod cli;
pub mod duplicates;
pub mod error;
pub mod logging;
pub mod output;
pub mod progress;
pub mod scanner;

pub use duplicates::{DuplicateFinder, FindReport, FinderConfig, FinderError, ScanSummary};
