//! Scanner module for directory traversal and file hashing.
//!
//! This module provides functionality for:
//! - Recursive enumeration of files and directories under a root
//! - Case-insensitive extension filtering
//! - Content hashing with BLAKE3 (streaming or memory-mapped)
//!
//! # Architecture
//!
//! The scanner is divided into submodules:
//! - [`walker`]: directory traversal producing typed records for files
//!   ([`FileMeta`]) and directories ([`DirRecord`])
//! - [`hasher`]: BLAKE3 file hashing
//!
//! A walk yields metadata only; hashing is a separate pass so the caller
//! controls how the hashing work is parallelized. A [`FileMeta`] plus its
//! computed hash becomes a [`HashedFile`], the immutable record the
//! grouping stages consume.

pub mod hasher;
pub mod walker;

use std::path::PathBuf;
use std::time::SystemTime;

// Re-export main types
pub use hasher::{hash_to_hex, Hash, Hasher};
pub use walker::{WalkOptions, WalkedEntry, Walker};

/// Metadata for a discovered file, before hashing.
///
/// `ancestors` holds the path components of the containing directory
/// relative to the scan root (empty for files directly in the root). It is
/// the unit the directory aggregator slices by depth, so it excludes the
/// file's own name.
#[derive(Debug, Clone)]
pub struct FileMeta {
    /// Absolute path to the file
    pub path: PathBuf,
    /// Path relative to the scan root
    pub relative_path: PathBuf,
    /// Path components of the containing directory, relative to the root
    pub ancestors: Vec<String>,
    /// Base name of the file
    pub name: String,
    /// File size in bytes
    pub size: u64,
    /// Last modification time
    pub modified: SystemTime,
}

/// A file record with its computed content hash.
///
/// Created once per file during the hashing pass and immutable afterward.
#[derive(Debug, Clone)]
pub struct HashedFile {
    /// File metadata from the walk
    pub meta: FileMeta,
    /// BLAKE3 hash of the file content
    pub hash: Hash,
}

/// A directory discovered by the walker.
///
/// Directories carry no hash; they are identified by their full relative
/// path, held here as both a `PathBuf` and its component segments.
#[derive(Debug, Clone)]
pub struct DirRecord {
    /// Absolute path to the directory
    pub path: PathBuf,
    /// Path relative to the scan root
    pub relative_path: PathBuf,
    /// All path components of the directory, relative to the root
    pub segments: Vec<String>,
}

impl DirRecord {
    /// Nesting depth below the scan root (1-based).
    #[must_use]
    pub fn depth(&self) -> usize {
        self.segments.len()
    }
}

/// Errors that can occur during directory traversal.
#[derive(thiserror::Error, Debug)]
pub enum ScanError {
    /// The specified path was not found.
    #[error("Path not found: {0}")]
    NotFound(PathBuf),

    /// The specified path is not a directory.
    #[error("Not a directory: {0}")]
    NotADirectory(PathBuf),

    /// An error occurred while walking the tree.
    #[error("Walk error for {path}: {source}")]
    Walk {
        /// Path where the error occurred
        path: PathBuf,
        /// The underlying walkdir error
        #[source]
        source: walkdir::Error,
    },
}

/// Errors that can occur during file hashing.
#[derive(thiserror::Error, Debug)]
pub enum HashError {
    /// The specified file was not found.
    #[error("File not found: {0}")]
    NotFound(PathBuf),

    /// Permission was denied when reading the file.
    #[error("Permission denied: {0}")]
    PermissionDenied(PathBuf),

    /// An I/O error occurred while reading the file.
    #[error("I/O error for {path}: {source}")]
    Io {
        /// Path where the error occurred
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },
}

impl HashError {
    /// The path the error refers to.
    ///
    /// Used to order hashing failures deterministically before propagation,
    /// independent of worker scheduling.
    #[must_use]
    pub fn path(&self) -> &std::path::Path {
        match self {
            Self::NotFound(p) | Self::PermissionDenied(p) => p,
            Self::Io { path, .. } => path,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dir_record_depth() {
        let dir = DirRecord {
            path: PathBuf::from("/root/a/b"),
            relative_path: PathBuf::from("a/b"),
            segments: vec!["a".to_string(), "b".to_string()],
        };
        assert_eq!(dir.depth(), 2);
    }

    #[test]
    fn test_scan_error_display() {
        let err = ScanError::NotFound(PathBuf::from("/missing"));
        assert_eq!(err.to_string(), "Path not found: /missing");

        let err = ScanError::NotADirectory(PathBuf::from("/file.txt"));
        assert_eq!(err.to_string(), "Not a directory: /file.txt");
    }

    #[test]
    fn test_hash_error_display_and_path() {
        let err = HashError::PermissionDenied(PathBuf::from("/secret"));
        assert_eq!(err.to_string(), "Permission denied: /secret");
        assert_eq!(err.path(), std::path::Path::new("/secret"));

        let err = HashError::Io {
            path: PathBuf::from("/dev/broken"),
            source: std::io::Error::other("boom"),
        };
        assert_eq!(err.path(), std::path::Path::new("/dev/broken"));
    }
}
