use std::path::PathBuf;

/// Error types for reference operations.
#[derive(Debug, thiserror::Error)]
pub enum RefError {
    #[error("invalid ref name: {0}")]
    InvalidName(String),

    #[error("ref not found: {0}")]
    NotFound(String),

    #[error("symbolic ref chain too deep resolving '{0}'")]
    ChainTooDeep(String),

    #[error("cannot lock ref '{0}': lock file exists")]
    Locked(String),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("I/O error on {path}: {source}")]
    IoPath {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Hash(#[from] rgit_hash::HashError),
}
