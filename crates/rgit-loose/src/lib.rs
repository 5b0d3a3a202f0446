//! Loose object storage: read, write, and enumerate zlib-compressed objects.
//!
//! Each loose object lives at `objects/XX/YYYY...` where `XX` is the first
//! byte of the OID in hex and `YYYY...` is the rest. The file content is
//! zlib-compressed `"<kind> <size>\0<payload>"`.

mod enumerate;
mod prefix;
mod read;
mod write;

pub use enumerate::LooseObjectIter;
pub use prefix::MINIMUM_ABBREV;

use std::path::{Path, PathBuf};

use rgit_hash::ObjectId;

/// Interface to the loose object directory (`.git/objects/`).
pub struct LooseObjectStore {
    /// Path to the objects directory.
    objects_dir: PathBuf,
    /// Zlib compression level.
    compression_level: flate2::Compression,
}

impl LooseObjectStore {
    /// Open the loose object store at the given path.
    pub fn open(objects_dir: impl AsRef<Path>) -> Self {
        Self {
            objects_dir: objects_dir.as_ref().to_path_buf(),
            compression_level: flate2::Compression::default(),
        }
    }

    /// Set the zlib compression level (0–9).
    pub fn set_compression_level(&mut self, level: u32) {
        self.compression_level = flate2::Compression::new(level);
    }

    /// Get the file path for a given OID.
    pub fn object_path(&self, oid: &ObjectId) -> PathBuf {
        self.objects_dir.join(oid.loose_path())
    }

    pub(crate) fn objects_dir(&self) -> &Path {
        &self.objects_dir
    }
}

/// Errors from loose object operations.
#[derive(Debug, thiserror::Error)]
pub enum LooseError {
    #[error("corrupt loose object {oid}: {reason}")]
    Corrupt { oid: String, reason: String },

    #[error("decompression error for {oid}: {source}")]
    Decompress {
        oid: String,
        #[source]
        source: std::io::Error,
    },

    #[error("hash mismatch for {path}: expected {expected}, got {actual}")]
    HashMismatch {
        path: PathBuf,
        expected: String,
        actual: String,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("malformed object {oid}: {source}")]
    Malformed {
        oid: String,
        #[source]
        source: rgit_object::ObjectError,
    },

    #[error("hash error: {0}")]
    Hash(#[from] rgit_hash::HashError),
}
