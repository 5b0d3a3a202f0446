//! Revision name resolution: map a user-supplied string to exactly one
//! full object id, plus ref updates and history walking built on it.
//!
//! Candidates come from three sources, combined and required to agree on a
//! single id: a matching reference (searched through an explicit
//! precedence ladder), a verbatim full hex id, and a short-prefix scan of
//! the object directory.

mod resolve;
mod walk;

pub use resolve::{resolve, update_ref, validate_ref};
pub use walk::CommitWalk;

use rgit_hash::ObjectId;
use rgit_object::{Object, Tree};
use rgit_repository::Repository;

/// Errors from revision resolution and the operations built on it.
#[derive(Debug, thiserror::Error)]
pub enum RevisionError {
    #[error("ambiguous argument '{0}': unknown revision or path not in the working tree")]
    Unknown(String),

    #[error("short object id {name} is ambiguous; matching ids: {}", .matches.join(", "))]
    Ambiguous { name: String, matches: Vec<String> },

    #[error("'{0}' - not a valid ref")]
    NotAValidRef(String),

    #[error("'{0}' - not a valid SHA1")]
    NotASha1(String),

    #[error("object {oid} is a {actual}, not a {expected}")]
    KindMismatch {
        expected: &'static str,
        actual: &'static str,
        oid: String,
    },

    #[error("missing object: {0}")]
    MissingObject(String),

    #[error(transparent)]
    Ref(#[from] rgit_ref::RefError),

    #[error(transparent)]
    Loose(#[from] rgit_loose::LooseError),

    #[error(transparent)]
    Object(#[from] rgit_object::ObjectError),
}

/// Read the object at `oid`, requiring it to be (or point at) a tree.
///
/// A commit dereferences to its root tree; a blob is a kind mismatch.
pub fn peel_to_tree(repo: &Repository, oid: &ObjectId) -> Result<Tree, RevisionError> {
    let obj = repo
        .objects()
        .read(oid)?
        .ok_or_else(|| RevisionError::MissingObject(oid.to_hex()))?;

    match obj {
        Object::Tree(tree) => Ok(tree),
        Object::Commit(commit) => {
            let tree_oid = commit.tree_oid()?;
            let obj = repo
                .objects()
                .read(&tree_oid)?
                .ok_or_else(|| RevisionError::MissingObject(tree_oid.to_hex()))?;
            match obj {
                Object::Tree(tree) => Ok(tree),
                other => Err(RevisionError::KindMismatch {
                    expected: "tree",
                    actual: other.object_type().as_str(),
                    oid: tree_oid.to_hex(),
                }),
            }
        }
        Object::Blob(_) => Err(RevisionError::KindMismatch {
            expected: "tree",
            actual: "blob",
            oid: oid.to_hex(),
        }),
    }
}
