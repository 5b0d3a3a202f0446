//! Object model for rgit: blob, tree, and commit parsing and serialization.
//!
//! This crate provides Rust types for the three object kinds this store
//! supports, their parsing from raw framed bytes, and serialization back to
//! the canonical format. Identifiers always hash the framed form, so a
//! parse/serialize round-trip reproduces the original object id.

mod blob;
mod commit;
pub mod header;
mod tree;

pub use blob::Blob;
pub use commit::Commit;
pub use tree::{EntryMode, Tree, TreeEntry};

use bstr::BString;
use rgit_hash::{HashError, ObjectId};

/// Errors produced by object operations.
#[derive(Debug, thiserror::Error)]
pub enum ObjectError {
    #[error("invalid object type: {0}")]
    InvalidType(BString),

    #[error("invalid object header: {0}")]
    InvalidHeader(String),

    #[error("object length mismatch: header declares {declared} bytes, payload has {actual}")]
    LengthMismatch { declared: usize, actual: usize },

    #[error("invalid tree entry at offset {offset}: {reason}")]
    InvalidTreeEntry { offset: usize, reason: String },

    #[error("invalid tree listing at line {line}: {reason}")]
    InvalidTreeText { line: usize, reason: String },

    #[error("invalid commit: missing '{field}' header")]
    MissingCommitField { field: &'static str },

    #[error("invalid signature: {0}")]
    InvalidSignature(String),

    #[error(transparent)]
    Hash(#[from] HashError),
}

/// The object kinds this store supports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObjectType {
    Blob,
    Tree,
    Commit,
}

impl ObjectType {
    /// Parse from the type string in object headers.
    pub fn from_bytes(s: &[u8]) -> Result<Self, ObjectError> {
        match s {
            b"blob" => Ok(Self::Blob),
            b"tree" => Ok(Self::Tree),
            b"commit" => Ok(Self::Commit),
            _ => Err(ObjectError::InvalidType(BString::from(s))),
        }
    }

    /// The canonical byte representation.
    pub fn as_bytes(&self) -> &'static [u8] {
        match self {
            Self::Blob => b"blob",
            Self::Tree => b"tree",
            Self::Commit => b"commit",
        }
    }

    /// The canonical name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Blob => "blob",
            Self::Tree => "tree",
            Self::Commit => "commit",
        }
    }
}

impl std::fmt::Display for ObjectType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ObjectType {
    type Err = ObjectError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_bytes(s.as_bytes())
    }
}

/// A parsed object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Object {
    Blob(Blob),
    Tree(Tree),
    Commit(Commit),
}

impl Object {
    /// Parse from raw framed bytes (header + payload).
    ///
    /// The declared length must match the payload exactly.
    pub fn parse(data: &[u8]) -> Result<Self, ObjectError> {
        let (obj_type, declared_size, header_len) = header::parse_header(data)?;
        let payload = &data[header_len..];
        if payload.len() != declared_size {
            return Err(ObjectError::LengthMismatch {
                declared: declared_size,
                actual: payload.len(),
            });
        }
        Self::parse_payload(obj_type, payload)
    }

    /// Parse from payload bytes with known type (no header).
    pub fn parse_payload(obj_type: ObjectType, payload: &[u8]) -> Result<Self, ObjectError> {
        match obj_type {
            ObjectType::Blob => Ok(Self::Blob(Blob::parse(payload)?)),
            ObjectType::Tree => Ok(Self::Tree(Tree::parse(payload)?)),
            ObjectType::Commit => Ok(Self::Commit(Commit::parse(payload)?)),
        }
    }

    /// Serialize to the canonical framed form (header + payload).
    pub fn serialize(&self) -> Vec<u8> {
        let payload = self.serialize_payload();
        let hdr = header::write_header(self.object_type(), payload.len());
        let mut out = Vec::with_capacity(hdr.len() + payload.len());
        out.extend_from_slice(&hdr);
        out.extend_from_slice(&payload);
        out
    }

    /// Serialize just the payload (no header).
    pub fn serialize_payload(&self) -> Vec<u8> {
        match self {
            Self::Blob(b) => b.serialize_payload().to_vec(),
            Self::Tree(t) => t.serialize_payload(),
            Self::Commit(c) => c.serialize_payload(),
        }
    }

    /// Get the object type.
    pub fn object_type(&self) -> ObjectType {
        match self {
            Self::Blob(_) => ObjectType::Blob,
            Self::Tree(_) => ObjectType::Tree,
            Self::Commit(_) => ObjectType::Commit,
        }
    }

    /// Compute the OID by hashing the framed form.
    pub fn compute_oid(&self) -> Result<ObjectId, HashError> {
        let payload = self.serialize_payload();
        rgit_hash::hasher::Hasher::hash_object(self.object_type().as_str(), &payload)
    }

    /// Get the size of the payload (excluding header).
    pub fn payload_size(&self) -> usize {
        match self {
            Self::Blob(b) => b.data.len(),
            Self::Tree(t) => t.serialize_payload().len(),
            Self::Commit(c) => c.serialize_payload().len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn object_type_from_bytes() {
        assert_eq!(ObjectType::from_bytes(b"blob").unwrap(), ObjectType::Blob);
        assert_eq!(ObjectType::from_bytes(b"tree").unwrap(), ObjectType::Tree);
        assert_eq!(
            ObjectType::from_bytes(b"commit").unwrap(),
            ObjectType::Commit
        );
        assert!(ObjectType::from_bytes(b"tag").is_err());
        assert!(ObjectType::from_bytes(b"unknown").is_err());
    }

    #[test]
    fn object_type_display() {
        assert_eq!(ObjectType::Blob.to_string(), "blob");
        assert_eq!(ObjectType::Commit.to_string(), "commit");
    }

    #[test]
    fn object_type_from_str() {
        assert_eq!("tree".parse::<ObjectType>().unwrap(), ObjectType::Tree);
        assert!("invalid".parse::<ObjectType>().is_err());
    }

    #[test]
    fn parse_rejects_short_payload() {
        let err = Object::parse(b"blob 12\0hello").unwrap_err();
        assert!(matches!(
            err,
            ObjectError::LengthMismatch {
                declared: 12,
                actual: 5
            }
        ));
    }

    #[test]
    fn parse_rejects_long_payload() {
        let err = Object::parse(b"blob 2\0hello").unwrap_err();
        assert!(matches!(err, ObjectError::LengthMismatch { .. }));
    }

    #[test]
    fn blob_framed_roundtrip() {
        let obj = Object::Blob(Blob::new(b"Hello World\n".to_vec()));
        let framed = obj.serialize();
        assert_eq!(&framed[..8], b"blob 12\0");
        let parsed = Object::parse(&framed).unwrap();
        assert_eq!(parsed, obj);
    }

    #[test]
    fn compute_oid_matches_c_git() {
        let obj = Object::Blob(Blob::new(b"Hello World\n".to_vec()));
        assert_eq!(
            obj.compute_oid().unwrap().to_hex(),
            "557db03de997c86a4a028e1ebd3a1ceb225be238"
        );
    }
}
