//! Directory-level duplicate detection.
//!
//! # Overview
//!
//! Every scanned directory gets a canonical signature: the number of files
//! it contains transitively plus the sorted list of their content hashes.
//! Two directories with equal signatures hold the same content regardless
//! of file naming or ordering.
//!
//! # Wrapper exclusion
//!
//! A directory that holds no files directly and whose entire file content
//! sits under exactly one immediate child is a passthrough wrapper: its
//! signature is identical to that child's, so reporting both would flag
//! the same match at two nesting levels. Wrappers are excluded before
//! grouping; the match surfaces at the deepest non-wrapper level.
//!
//! # Example
//!
//! ```
//! use dupescan::duplicates::dirs::group_dirs;
//!
//! let groups = group_dirs(&[], &[]);
//! assert!(groups.is_empty());
//! ```

use std::cmp::Reverse;
use std::collections::{BTreeMap, BTreeSet};
use std::path::PathBuf;

use serde::Serialize;

use crate::scanner::{hash_to_hex, DirRecord, Hash, HashedFile};

/// Signature of one scanned directory.
///
/// The equality key is `(file_count, sorted hashes)`; the remaining fields
/// feed wrapper detection and reporting.
#[derive(Debug, Clone)]
pub struct DirectorySignature {
    /// Absolute path to the directory
    pub path: PathBuf,
    /// Path relative to the scan root
    pub relative_path: PathBuf,
    /// Nesting depth below the scan root (1-based)
    pub depth: usize,
    /// Files located directly inside the directory
    pub direct_files: usize,
    /// Immediate child segments that contain files (transitively)
    pub child_names: BTreeSet<String>,
    /// Sorted content hashes of all files under the directory
    pub sorted_hashes: Vec<Hash>,
}

impl DirectorySignature {
    /// Number of files contained transitively.
    #[must_use]
    pub fn file_count(&self) -> usize {
        self.sorted_hashes.len()
    }

    /// True when the directory exists purely as a container around a
    /// single subdirectory: no direct files, all content under one child.
    #[must_use]
    pub fn is_passthrough_wrapper(&self) -> bool {
        self.direct_files == 0 && self.child_names.len() == 1
    }

    /// Canonical string key for signature equality.
    #[must_use]
    pub fn signature_key(&self) -> String {
        let parts: Vec<String> = self.sorted_hashes.iter().map(hash_to_hex).collect();
        parts.join("|")
    }
}

/// One directory row in a duplicate-directory group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DuplicateDirectoryGroup {
    /// Group id, 1-based, unique per duplicate signature
    pub group_id: usize,
    /// Path relative to the scan root
    pub relative_path: PathBuf,
    /// Absolute path to the directory
    pub path: PathBuf,
    /// Number of files contained transitively
    pub file_count: usize,
    /// Number of directories sharing this signature
    pub group_size: usize,
}

/// Build a signature for every directory that contains at least one file.
///
/// Each file contributes its hash to every ancestor directory: slicing the
/// file's ancestor segments at depth 1..=N names exactly the chain of
/// scanned directories above it. Directories with no files carry no
/// signature and are skipped.
#[must_use]
pub fn build_signatures(files: &[HashedFile], dirs: &[DirRecord]) -> Vec<DirectorySignature> {
    struct Accum {
        path: PathBuf,
        relative_path: PathBuf,
        direct_files: usize,
        child_names: BTreeSet<String>,
        hashes: Vec<Hash>,
    }

    let mut by_segments: BTreeMap<Vec<String>, Accum> = dirs
        .iter()
        .map(|d| {
            (
                d.segments.clone(),
                Accum {
                    path: d.path.clone(),
                    relative_path: d.relative_path.clone(),
                    direct_files: 0,
                    child_names: BTreeSet::new(),
                    hashes: Vec::new(),
                },
            )
        })
        .collect();

    for file in files {
        let ancestors = &file.meta.ancestors;
        for depth in 1..=ancestors.len() {
            if let Some(acc) = by_segments.get_mut(&ancestors[..depth]) {
                acc.hashes.push(file.hash);
                if depth == ancestors.len() {
                    acc.direct_files += 1;
                } else {
                    acc.child_names.insert(ancestors[depth].clone());
                }
            }
        }
    }

    by_segments
        .into_iter()
        .filter(|(_, acc)| !acc.hashes.is_empty())
        .map(|(segments, mut acc)| {
            acc.hashes.sort_unstable();
            DirectorySignature {
                path: acc.path,
                relative_path: acc.relative_path,
                depth: segments.len(),
                direct_files: acc.direct_files,
                child_names: acc.child_names,
                sorted_hashes: acc.hashes,
            }
        })
        .collect()
}

/// Group directories sharing an identical signature.
///
/// # Arguments
///
/// * `files` - Hashed file records from the scan
/// * `dirs` - Directory records from the scan
///
/// # Returns
///
/// Rows for every directory belonging to a group of ≥2 non-wrapper
/// directories with equal `(file_count, sorted hashes)`. Output is ordered
/// by descending file count, then group id, then relative path; group ids
/// are assigned in that same order, so repeat runs are identical.
#[must_use]
pub fn group_dirs(files: &[HashedFile], dirs: &[DirRecord]) -> Vec<DuplicateDirectoryGroup> {
    let signatures = build_signatures(files, dirs);

    let mut by_signature: BTreeMap<(Reverse<usize>, String), Vec<&DirectorySignature>> =
        BTreeMap::new();
    for sig in &signatures {
        if sig.is_passthrough_wrapper() {
            log::trace!(
                "Excluding passthrough wrapper: {}",
                sig.relative_path.display()
            );
            continue;
        }
        by_signature
            .entry((Reverse(sig.file_count()), sig.signature_key()))
            .or_default()
            .push(sig);
    }

    let mut rows = Vec::new();
    let mut group_id = 0;
    for ((Reverse(file_count), _), mut members) in by_signature {
        if members.len() < 2 {
            continue;
        }
        group_id += 1;
        members.sort_by(|a, b| a.relative_path.cmp(&b.relative_path));
        for member in &members {
            rows.push(DuplicateDirectoryGroup {
                group_id,
                relative_path: member.relative_path.clone(),
                path: member.path.clone(),
                file_count,
                group_size: members.len(),
            });
        }
    }

    if !rows.is_empty() {
        log::debug!(
            "Directory grouping: {} group(s), {} member directories",
            group_id,
            rows.len()
        );
    }

    rows
}
