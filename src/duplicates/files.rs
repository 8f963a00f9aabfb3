//! File-level duplicate grouping.
//!
//! # Overview
//!
//! Groups hashed file records by their content hash across the whole
//! scanned tree. Only groups with two or more members qualify; groups whose
//! representative size falls below the caller's threshold are dropped.
//!
//! Group ids are assigned by descending representative size (largest groups
//! first), with ties broken by the first member's relative path, so repeat
//! runs over an unchanged tree produce identical output.
//!
//! # Example
//!
//! ```
//! use dupescan::duplicates::files::group_files;
//!
//! let groups = group_files(&[], 0.0);
//! assert!(groups.is_empty());
//! ```

use std::cmp::Reverse;
use std::collections::{BTreeSet, HashMap};
use std::path::PathBuf;
use std::time::SystemTime;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;

use super::BYTES_PER_MB;
use crate::scanner::{hash_to_hex, Hash, HashedFile};

/// One member file of a duplicate group.
#[derive(Debug, Clone, Serialize)]
pub struct MemberFile {
    /// Absolute path to the file
    pub path: PathBuf,
    /// Path relative to the scan root
    pub relative_path: PathBuf,
    /// Last modification time (RFC 3339 in serialized form)
    #[serde(serialize_with = "serialize_rfc3339")]
    pub modified: SystemTime,
}

/// A group of files sharing one content hash.
#[derive(Debug, Clone, Serialize)]
pub struct DuplicateFileGroup {
    /// Group id, 1-based, assigned by descending representative size
    pub group_id: usize,
    /// The shared content hash (hex in serialized form)
    #[serde(serialize_with = "serialize_hash_hex")]
    pub hash: Hash,
    /// Size of one member in bytes
    pub size_bytes: u64,
    /// Size of one member in megabytes
    pub size_mb: f64,
    /// Distinct file extensions among members, lowercase, sorted
    pub extensions: Vec<String>,
    /// Member files, sorted by relative path
    pub files: Vec<MemberFile>,
}

impl DuplicateFileGroup {
    /// Number of member files.
    #[must_use]
    pub fn member_count(&self) -> usize {
        self.files.len()
    }

    /// Bytes reclaimable by keeping a single copy.
    #[must_use]
    pub fn wasted_bytes(&self) -> u64 {
        self.size_bytes * (self.files.len() as u64 - 1)
    }

    /// Hash as a hexadecimal string.
    #[must_use]
    pub fn hash_hex(&self) -> String {
        hash_to_hex(&self.hash)
    }
}

/// Group hashed files by content hash.
///
/// # Arguments
///
/// * `files` - Hashed file records from the scan
/// * `min_size_mb` - Minimum representative size in MB; groups below it are
///   dropped (0 keeps everything)
///
/// # Returns
///
/// Duplicate groups ordered by descending size, ids assigned in that order.
/// Empty when no hash is shared by two or more files or nothing survives
/// the size filter.
#[must_use]
pub fn group_files(files: &[HashedFile], min_size_mb: f64) -> Vec<DuplicateFileGroup> {
    let mut by_hash: HashMap<Hash, Vec<&HashedFile>> = HashMap::new();
    for file in files {
        by_hash.entry(file.hash).or_default().push(file);
    }

    let mut groups: Vec<DuplicateFileGroup> = by_hash
        .into_iter()
        .filter(|(_, members)| members.len() >= 2)
        .map(|(hash, mut members)| {
            members.sort_by(|a, b| a.meta.relative_path.cmp(&b.meta.relative_path));

            let size_bytes = members[0].meta.size;
            let size_mb = size_bytes as f64 / BYTES_PER_MB;

            let extensions: Vec<String> = members
                .iter()
                .filter_map(|m| m.meta.path.extension())
                .map(|e| e.to_string_lossy().to_lowercase())
                .collect::<BTreeSet<_>>()
                .into_iter()
                .collect();

            let files = members
                .iter()
                .map(|m| MemberFile {
                    path: m.meta.path.clone(),
                    relative_path: m.meta.relative_path.clone(),
                    modified: m.meta.modified,
                })
                .collect();

            DuplicateFileGroup {
                group_id: 0,
                hash,
                size_bytes,
                size_mb,
                extensions,
                files,
            }
        })
        .filter(|group| group.size_mb >= min_size_mb)
        .collect();

    // Largest groups first; ties broken by first member path
    groups.sort_by(|a, b| {
        (Reverse(a.size_bytes), &a.files[0].relative_path)
            .cmp(&(Reverse(b.size_bytes), &b.files[0].relative_path))
    });
    for (idx, group) in groups.iter_mut().enumerate() {
        group.group_id = idx + 1;
    }

    if !groups.is_empty() {
        log::debug!(
            "File grouping: {} duplicate group(s) from {} file(s)",
            groups.len(),
            files.len()
        );
    }

    groups
}

pub(crate) fn serialize_rfc3339<S>(time: &SystemTime, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    let stamp = DateTime::<Utc>::from(*time).to_rfc3339_opts(SecondsFormat::Secs, true);
    serializer.serialize_str(&stamp)
}

fn serialize_hash_hex<S>(hash: &Hash, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.serialize_str(&hash_to_hex(hash))
}
