//! Duplicate finder: the pipeline orchestrator.
//!
//! # Overview
//!
//! [`DuplicateFinder`] runs the complete batch pipeline in one call:
//!
//! 1. Validate the root path, then the remaining arguments
//! 2. Walk the tree, collecting file and directory records
//! 3. Hash every file (sequentially, or fanned out over a scoped rayon
//!    pool when `workers > 1`)
//! 4. Group files by content hash and directories by signature
//!
//! No state persists between calls; every invocation re-walks and
//! re-hashes the tree. The worker pool, when one is created, lives inside
//! the call and is dropped when the call returns, whether it succeeds or
//! fails. The global rayon pool is never touched.
//!
//! # Example
//!
//! ```no_run
//! use dupescan::duplicates::{DuplicateFinder, FinderConfig};
//! use std::path::Path;
//!
//! let config = FinderConfig::default().with_workers(4).with_verbose(false);
//! let finder = DuplicateFinder::new(config);
//! let (report, summary) = finder.find(Path::new("/data")).unwrap();
//!
//! if let Some(groups) = &report.duplicate_files {
//!     println!("{} duplicate file group(s)", groups.len());
//! }
//! println!("hashed {} bytes in {:?}", summary.bytes_hashed, summary.scan_duration);
//! ```

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use rayon::prelude::*;

use super::dirs::{group_dirs, DuplicateDirectoryGroup};
use super::files::{group_files, DuplicateFileGroup};
use crate::progress::ProgressCallback;
use crate::scanner::{
    DirRecord, FileMeta, Hash, HashError, HashedFile, Hasher, ScanError, WalkOptions, WalkedEntry,
    Walker,
};

/// Errors that can occur during duplicate finding.
#[derive(thiserror::Error, Debug)]
pub enum FinderError {
    /// The provided root path does not exist.
    #[error("Path not found: {0}")]
    PathNotFound(PathBuf),

    /// The provided root path is not a directory.
    #[error("Not a directory: {0}")]
    NotADirectory(PathBuf),

    /// An extension entry is empty or contains a path separator.
    #[error("Invalid extension: {0:?}")]
    InvalidExtension(String),

    /// The size threshold is negative or not a finite number.
    #[error("Invalid size threshold: {0} MB")]
    InvalidThreshold(f64),

    /// The worker count is zero.
    #[error("Invalid worker count: {0} (must be at least 1)")]
    InvalidWorkers(usize),

    /// The worker pool could not be created.
    #[error("Failed to build worker pool: {0}")]
    Pool(String),

    /// A traversal error occurred.
    #[error(transparent)]
    Scan(#[from] ScanError),

    /// A file could not be read during hashing.
    #[error(transparent)]
    Hash(#[from] HashError),
}

/// Configuration for the duplicate finder.
#[derive(Clone)]
pub struct FinderConfig {
    /// Minimum file size in MB for reported file groups. Default 0.
    pub size_threshold_mb: f64,
    /// Allowed extensions (case-insensitive, no leading dot). A non-empty
    /// list disables directory-duplicate detection.
    pub extensions: Vec<String>,
    /// Hashing worker count. 1 runs strictly sequentially; higher values
    /// fan the per-file hashing out over a scoped thread pool.
    pub workers: usize,
    /// Print human-readable result tables after the scan. Default true.
    /// Never affects the returned report.
    pub verbose: bool,
    /// Skip unreadable files with a recorded warning instead of failing
    /// the whole scan. Default false (first read error aborts).
    pub keep_going: bool,
    /// Optional progress callback.
    pub progress: Option<Arc<dyn ProgressCallback>>,
}

impl std::fmt::Debug for FinderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FinderConfig")
            .field("size_threshold_mb", &self.size_threshold_mb)
            .field("extensions", &self.extensions)
            .field("workers", &self.workers)
            .field("verbose", &self.verbose)
            .field("keep_going", &self.keep_going)
            .field("progress", &self.progress.as_ref().map(|_| "<callback>"))
            .finish()
    }
}

impl Default for FinderConfig {
    fn default() -> Self {
        Self {
            size_threshold_mb: 0.0,
            extensions: Vec::new(),
            workers: 1,
            verbose: true,
            keep_going: false,
            progress: None,
        }
    }
}

impl FinderConfig {
    /// Set the minimum reported file size in MB.
    #[must_use]
    pub fn with_size_threshold_mb(mut self, threshold: f64) -> Self {
        self.size_threshold_mb = threshold;
        self
    }

    /// Set the extension filter.
    #[must_use]
    pub fn with_extensions(mut self, extensions: Vec<String>) -> Self {
        self.extensions = extensions;
        self
    }

    /// Set the hashing worker count.
    #[must_use]
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    /// Enable or disable verbose table printing.
    #[must_use]
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Skip unreadable files instead of aborting.
    #[must_use]
    pub fn with_keep_going(mut self, keep_going: bool) -> Self {
        self.keep_going = keep_going;
        self
    }

    /// Set the progress callback.
    #[must_use]
    pub fn with_progress(mut self, callback: Arc<dyn ProgressCallback>) -> Self {
        self.progress = Some(callback);
        self
    }

    /// Validate and normalize the extension list: lowercase, one leading
    /// dot stripped, duplicates removed, order preserved.
    fn normalized_extensions(&self) -> Result<Vec<String>, FinderError> {
        let mut normalized = Vec::new();
        for raw in &self.extensions {
            let ext = raw.strip_prefix('.').unwrap_or(raw).to_lowercase();
            if ext.is_empty() || ext.contains('/') || ext.contains('\\') {
                return Err(FinderError::InvalidExtension(raw.clone()));
            }
            if !normalized.contains(&ext) {
                normalized.push(ext);
            }
        }
        Ok(normalized)
    }
}

/// Result record of one scan.
///
/// A field is `None` when nothing was found; `duplicate_dirs` is also
/// `None` whenever an extension filter was active.
#[derive(Debug, Clone, Default)]
pub struct FindReport {
    /// Groups of files sharing a content hash, or `None` if none qualify
    pub duplicate_files: Option<Vec<DuplicateFileGroup>>,
    /// Directory rows grouped by signature, or `None` if none qualify
    pub duplicate_dirs: Option<Vec<DuplicateDirectoryGroup>>,
}

impl FindReport {
    /// True when neither files nor directories produced a group.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.duplicate_files.is_none() && self.duplicate_dirs.is_none()
    }
}

/// Summary statistics from one scan.
#[derive(Debug, Clone, Default)]
pub struct ScanSummary {
    /// Number of files walked (after extension filtering)
    pub total_files: usize,
    /// Number of directories walked
    pub total_dirs: usize,
    /// Total bytes hashed
    pub bytes_hashed: u64,
    /// Number of duplicate file groups found
    pub duplicate_file_groups: usize,
    /// Number of duplicate directory groups found
    pub duplicate_dir_groups: usize,
    /// Wall-clock duration of the scan
    pub scan_duration: Duration,
    /// Warnings recorded in keep-going mode (one per skipped path)
    pub warnings: Vec<String>,
}

/// Duplicate finder running the full detection pipeline.
pub struct DuplicateFinder {
    config: FinderConfig,
    hasher: Hasher,
}

impl DuplicateFinder {
    /// Create a new finder with the given configuration.
    #[must_use]
    pub fn new(config: FinderConfig) -> Self {
        Self {
            config,
            hasher: Hasher::new(),
        }
    }

    /// Create a new finder with default configuration.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::new(FinderConfig::default())
    }

    /// Find duplicate files and directories under `path`.
    ///
    /// # Errors
    ///
    /// Returns [`FinderError`] if the root is missing or not a directory,
    /// if any argument is malformed, or (unless `keep_going` is set) if a
    /// file cannot be read. A scan that completes but finds nothing is not
    /// an error; it returns an empty report.
    pub fn find(&self, path: &Path) -> Result<(FindReport, ScanSummary), FinderError> {
        let start = std::time::Instant::now();

        // Root first, then the remaining arguments, before any traversal
        if !path.exists() {
            return Err(FinderError::PathNotFound(path.to_path_buf()));
        }
        if !path.is_dir() {
            return Err(FinderError::NotADirectory(path.to_path_buf()));
        }
        if self.config.workers == 0 {
            return Err(FinderError::InvalidWorkers(0));
        }
        if !self.config.size_threshold_mb.is_finite() || self.config.size_threshold_mb < 0.0 {
            return Err(FinderError::InvalidThreshold(self.config.size_threshold_mb));
        }
        let extensions = self.config.normalized_extensions()?;
        let filtered = !extensions.is_empty();

        log::info!("Scanning {} for duplicates", path.display());

        let mut summary = ScanSummary::default();

        // Stage 1: walk
        if let Some(ref callback) = self.config.progress {
            callback.on_phase_start("walk", 0);
        }
        let walker = Walker::new(path, WalkOptions::with_extensions(extensions));
        let mut metas: Vec<FileMeta> = Vec::new();
        let mut dirs: Vec<DirRecord> = Vec::new();
        for entry in walker.walk() {
            match entry {
                Ok(WalkedEntry::File(meta)) => {
                    if let Some(ref callback) = self.config.progress {
                        callback.on_progress(metas.len() + 1, &meta.relative_path.to_string_lossy());
                    }
                    metas.push(meta);
                }
                Ok(WalkedEntry::Dir(dir)) => dirs.push(dir),
                Err(e) => {
                    if self.config.keep_going {
                        log::warn!("Skipping unreadable entry: {e}");
                        summary.warnings.push(e.to_string());
                    } else {
                        return Err(FinderError::Scan(e));
                    }
                }
            }
        }
        if let Some(ref callback) = self.config.progress {
            callback.on_phase_end("walk");
        }

        summary.total_files = metas.len();
        summary.total_dirs = dirs.len();
        log::info!(
            "Walked {} files and {} directories",
            summary.total_files,
            summary.total_dirs
        );

        if metas.is_empty() {
            summary.scan_duration = start.elapsed();
            let report = FindReport::default();
            if self.config.verbose {
                crate::output::table::print(&report, &summary);
            }
            return Ok((report, summary));
        }

        // Stage 2: hash
        let hashed = self.hash_stage(metas, &mut summary)?;
        summary.bytes_hashed = hashed.iter().map(|f| f.meta.size).sum();

        // Stage 3: group files, and directories unless a filter is active
        let file_groups = group_files(&hashed, self.config.size_threshold_mb);
        summary.duplicate_file_groups = file_groups
            .last()
            .map_or(0, |g| g.group_id);

        let dir_groups = if filtered {
            Vec::new()
        } else {
            group_dirs(&hashed, &dirs)
        };
        summary.duplicate_dir_groups = dir_groups.last().map_or(0, |g| g.group_id);

        summary.scan_duration = start.elapsed();
        log::info!(
            "Scan complete: {} file group(s), {} directory group(s) in {:?}",
            summary.duplicate_file_groups,
            summary.duplicate_dir_groups,
            summary.scan_duration
        );

        let report = FindReport {
            duplicate_files: (!file_groups.is_empty()).then_some(file_groups),
            duplicate_dirs: (!dir_groups.is_empty()).then_some(dir_groups),
        };

        if self.config.verbose {
            crate::output::table::print(&report, &summary);
        }

        Ok((report, summary))
    }

    /// Hash all walked files, sequentially or over a scoped pool.
    ///
    /// Results keep the walk order either way, so downstream grouping sees
    /// identical input regardless of the worker count. With `keep_going`
    /// unset, failures are ordered by path before the first one is
    /// propagated, which makes the error deterministic too.
    fn hash_stage(
        &self,
        metas: Vec<FileMeta>,
        summary: &mut ScanSummary,
    ) -> Result<Vec<HashedFile>, FinderError> {
        let total = metas.len();
        if let Some(ref callback) = self.config.progress {
            callback.on_phase_start("hash", total);
        }
        log::info!("Hashing {} file(s) with {} worker(s)", total, self.config.workers);

        let counter = AtomicUsize::new(0);
        let hash_one = |meta: FileMeta| -> (FileMeta, Result<Hash, HashError>) {
            let result = self.hasher.full_hash(&meta.path);
            if let Some(ref callback) = self.config.progress {
                let done = counter.fetch_add(1, Ordering::Relaxed) + 1;
                callback.on_progress(done, &meta.relative_path.to_string_lossy());
            }
            (meta, result)
        };

        let results: Vec<(FileMeta, Result<Hash, HashError>)> = if self.config.workers > 1 {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(self.config.workers)
                .build()
                .map_err(|e| FinderError::Pool(e.to_string()))?;
            // The pool is dropped at the end of this block, success or not
            pool.install(|| metas.into_par_iter().map(hash_one).collect())
        } else {
            metas.into_iter().map(hash_one).collect()
        };

        if let Some(ref callback) = self.config.progress {
            callback.on_phase_end("hash");
        }

        let mut hashed = Vec::with_capacity(results.len());
        let mut failures: Vec<HashError> = Vec::new();
        for (meta, result) in results {
            match result {
                Ok(hash) => hashed.push(HashedFile { meta, hash }),
                Err(e) => failures.push(e),
            }
        }

        if !failures.is_empty() {
            if self.config.keep_going {
                for failure in failures {
                    log::warn!("Skipping unreadable file: {failure}");
                    summary.warnings.push(failure.to_string());
                }
            } else {
                failures.sort_by(|a, b| a.path().cmp(b.path()));
                return Err(FinderError::Hash(failures.remove(0)));
            }
        }

        Ok(hashed)
    }
}
