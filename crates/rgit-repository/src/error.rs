use std::path::PathBuf;

/// Error types for repository-level operations.
#[derive(Debug, thiserror::Error)]
pub enum RepoError {
    #[error("not a git repository (or any of the parent directories): .git")]
    NotARepository,

    #[error("Work-tree {0:?} is not empty")]
    WorkTreeNotEmpty(PathBuf),

    #[error("path {0:?} is not a directory")]
    NotADirectory(PathBuf),

    #[error("expected a {expected}, found a {actual}: {oid}")]
    UnexpectedKind {
        expected: &'static str,
        actual: &'static str,
        oid: String,
    },

    #[error("missing object: {0}")]
    MissingObject(String),

    #[error("invalid path in tree entry: {0}")]
    InvalidEntryName(String),

    #[error(transparent)]
    Loose(#[from] rgit_loose::LooseError),

    #[error(transparent)]
    Object(#[from] rgit_object::ObjectError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
