//! Directory walker producing typed file and directory records.
//!
//! # Overview
//!
//! This module provides the [`Walker`] struct for traversing a directory
//! tree and collecting the records the duplicate-detection pipeline
//! consumes. It uses [`walkdir`] with sorted children so that repeated
//! scans of an unchanged tree enumerate entries in the same order.
//!
//! # Extension filtering
//!
//! When [`WalkOptions::extensions`] is non-empty, only files whose name
//! ends with one of the listed extensions (case-insensitive, compared as a
//! `.ext` suffix) are yielded, and directory records are not yielded at
//! all: a partial view of a directory's contents cannot establish a
//! reliable signature, so directory-duplicate detection is disabled for
//! filtered scans.
//!
//! # Example
//!
//! ```no_run
//! use dupescan::scanner::{WalkOptions, WalkedEntry, Walker};
//! use std::path::Path;
//!
//! let walker = Walker::new(Path::new("/data"), WalkOptions::default());
//! for entry in walker.walk() {
//!     match entry {
//!         Ok(WalkedEntry::File(file)) => println!("file: {}", file.relative_path.display()),
//!         Ok(WalkedEntry::Dir(dir)) => println!("dir:  {}", dir.relative_path.display()),
//!         Err(e) => eprintln!("Warning: {}", e),
//!     }
//! }
//! ```

use std::path::{Path, PathBuf};
use std::time::SystemTime;

use walkdir::WalkDir;

use super::{DirRecord, FileMeta, ScanError};

/// Options controlling a walk.
#[derive(Debug, Clone, Default)]
pub struct WalkOptions {
    /// Allowed file extensions, lowercase, without a leading dot.
    /// Empty means no filtering.
    pub extensions: Vec<String>,
}

impl WalkOptions {
    /// Create options with an extension filter.
    #[must_use]
    pub fn with_extensions(extensions: Vec<String>) -> Self {
        Self { extensions }
    }

    /// Whether an extension filter is active.
    #[must_use]
    pub fn has_filter(&self) -> bool {
        !self.extensions.is_empty()
    }
}

/// One entry produced by a walk: either a file or a directory.
#[derive(Debug, Clone)]
pub enum WalkedEntry {
    /// A regular file with its metadata
    File(FileMeta),
    /// A directory strictly below the scan root
    Dir(DirRecord),
}

/// Directory walker for file and directory discovery.
#[derive(Debug)]
pub struct Walker {
    root: PathBuf,
    options: WalkOptions,
}

impl Walker {
    /// Create a new walker for the given root.
    #[must_use]
    pub fn new(root: &Path, options: WalkOptions) -> Self {
        Self {
            root: root.to_path_buf(),
            options,
        }
    }

    /// Walk the tree, yielding file and directory records.
    ///
    /// Entries are yielded in sorted order (children sorted by file name at
    /// every level), the root itself is skipped, and symlinks are neither
    /// followed nor reported. Traversal errors are yielded as
    /// [`ScanError`] values rather than stopping iteration; the caller
    /// decides whether an error aborts the scan.
    pub fn walk(&self) -> impl Iterator<Item = Result<WalkedEntry, ScanError>> + '_ {
        // Precompute ".ext" suffixes once per walk
        let suffixes: Vec<String> = self
            .options
            .extensions
            .iter()
            .map(|e| format!(".{e}"))
            .collect();

        WalkDir::new(&self.root)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter()
            .filter_map(move |entry_result| match entry_result {
                Ok(entry) => {
                    // Skip the root directory itself
                    if entry.depth() == 0 {
                        return None;
                    }

                    let file_type = entry.file_type();
                    if file_type.is_symlink() {
                        log::trace!("Skipping symlink: {}", entry.path().display());
                        return None;
                    }

                    if file_type.is_dir() {
                        // Directory records are meaningless under a partial view
                        if self.options.has_filter() {
                            return None;
                        }
                        return Some(Ok(WalkedEntry::Dir(self.dir_record(entry.path()))));
                    }

                    if !file_type.is_file() {
                        return None;
                    }

                    if !suffixes.is_empty() && !matches_suffix(entry.path(), &suffixes) {
                        log::trace!("Filtered by extension: {}", entry.path().display());
                        return None;
                    }

                    match entry.metadata() {
                        Ok(metadata) => {
                            Some(Ok(WalkedEntry::File(self.file_meta(entry.path(), &metadata))))
                        }
                        Err(e) => Some(Err(ScanError::Walk {
                            path: entry.path().to_path_buf(),
                            source: e,
                        })),
                    }
                }
                Err(e) => {
                    let path = e
                        .path()
                        .map_or_else(|| self.root.clone(), Path::to_path_buf);
                    Some(Err(ScanError::Walk { path, source: e }))
                }
            })
    }

    fn relative_segments(&self, path: &Path) -> (PathBuf, Vec<String>) {
        let relative = path.strip_prefix(&self.root).unwrap_or(path).to_path_buf();
        let segments = relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy().into_owned())
            .collect();
        (relative, segments)
    }

    fn dir_record(&self, path: &Path) -> DirRecord {
        let (relative_path, segments) = self.relative_segments(path);
        DirRecord {
            path: path.to_path_buf(),
            relative_path,
            segments,
        }
    }

    fn file_meta(&self, path: &Path, metadata: &std::fs::Metadata) -> FileMeta {
        let (relative_path, mut segments) = self.relative_segments(path);
        let name = segments.pop().unwrap_or_default();
        FileMeta {
            path: path.to_path_buf(),
            relative_path,
            ancestors: segments,
            name,
            size: metadata.len(),
            modified: metadata.modified().unwrap_or(SystemTime::UNIX_EPOCH),
        }
    }
}

/// Case-insensitive `.ext` suffix match against the file name.
fn matches_suffix(path: &Path, suffixes: &[String]) -> bool {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_lowercase())
        .unwrap_or_default();
    suffixes.iter().any(|s| name.ends_with(s.as_str()))
}
