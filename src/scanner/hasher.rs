//! BLAKE3 file hasher with streaming and memory-mapped modes.
//!
//! # Overview
//!
//! The [`Hasher`] reads a file's bytes exactly once and produces a 32-byte
//! BLAKE3 digest used purely for content-equality grouping. Small files are
//! hashed through a fixed read buffer; files at or above the mmap threshold
//! are memory-mapped to avoid double-buffering.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use memmap2::Mmap;

use super::HashError;

/// A 32-byte BLAKE3 content hash.
pub type Hash = [u8; 32];

/// Streaming read buffer size.
const READ_BUFFER_SIZE: usize = 64 * 1024;

/// Default file size at which hashing switches to memory-mapped reads.
const DEFAULT_MMAP_THRESHOLD: u64 = 16 * 1024 * 1024;

/// Render a hash as a lowercase hex string.
#[must_use]
pub fn hash_to_hex(hash: &Hash) -> String {
    let mut out = String::with_capacity(64);
    for byte in hash {
        out.push_str(&format!("{byte:02x}"));
    }
    out
}

/// File content hasher.
///
/// # Example
///
/// ```no_run
/// use dupescan::scanner::Hasher;
/// use std::path::Path;
///
/// let hasher = Hasher::new();
/// let hash = hasher.full_hash(Path::new("/data/report.csv")).unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct Hasher {
    use_mmap: bool,
    mmap_threshold: u64,
}

impl Default for Hasher {
    fn default() -> Self {
        Self {
            use_mmap: true,
            mmap_threshold: DEFAULT_MMAP_THRESHOLD,
        }
    }
}

impl Hasher {
    /// Create a hasher with default settings (mmap above 16 MiB).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable memory-mapped hashing.
    #[must_use]
    pub fn with_mmap(mut self, enabled: bool) -> Self {
        self.use_mmap = enabled;
        self
    }

    /// Set the file size at which memory-mapped hashing kicks in.
    #[must_use]
    pub fn with_mmap_threshold(mut self, threshold: u64) -> Self {
        self.mmap_threshold = threshold;
        self
    }

    /// Hash the full content of a file.
    ///
    /// # Errors
    ///
    /// Returns [`HashError`] if the file cannot be opened or read.
    pub fn full_hash(&self, path: &Path) -> Result<Hash, HashError> {
        let file = File::open(path).map_err(|e| classify_io(path, e))?;
        let metadata = file.metadata().map_err(|e| classify_io(path, e))?;

        let mut hasher = blake3::Hasher::new();

        if self.use_mmap && metadata.len() >= self.mmap_threshold && metadata.len() > 0 {
            // Safety: the mapping is read-only and dropped before return.
            // A concurrent truncation of the file would still be undefined
            // behavior; the scan treats the tree as quiescent.
            let mmap = unsafe { Mmap::map(&file) }.map_err(|e| classify_io(path, e))?;
            hasher.update(&mmap);
        } else {
            let mut reader = file;
            let mut buffer = vec![0u8; READ_BUFFER_SIZE];
            loop {
                let n = reader.read(&mut buffer).map_err(|e| classify_io(path, e))?;
                if n == 0 {
                    break;
                }
                hasher.update(&buffer[..n]);
            }
        }

        Ok(*hasher.finalize().as_bytes())
    }
}

/// Map an I/O error to the hashing error taxonomy.
fn classify_io(path: &Path, error: std::io::Error) -> HashError {
    use std::io::ErrorKind;

    match error.kind() {
        ErrorKind::NotFound => HashError::NotFound(path.to_path_buf()),
        ErrorKind::PermissionDenied => HashError::PermissionDenied(path.to_path_buf()),
        _ => HashError::Io {
            path: path.to_path_buf(),
            source: error,
        },
    }
}
