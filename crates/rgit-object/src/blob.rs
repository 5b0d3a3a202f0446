use std::path::Path;

use crate::ObjectError;

/// A blob — raw file content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Blob {
    pub data: Vec<u8>,
}

impl Blob {
    pub fn new(data: Vec<u8>) -> Self {
        Self { data }
    }

    /// Read a blob from a file in the working tree.
    pub fn from_file(path: impl AsRef<Path>) -> std::io::Result<Self> {
        Ok(Self {
            data: std::fs::read(path)?,
        })
    }

    /// Parse blob payload. A blob is simply its raw bytes.
    pub fn parse(payload: &[u8]) -> Result<Self, ObjectError> {
        Ok(Self {
            data: payload.to_vec(),
        })
    }

    /// Serialize: blob payload is just the raw data.
    pub fn serialize_payload(&self) -> &[u8] {
        &self.data
    }
}
