use rgit_hash::ObjectId;
use rgit_object::{Commit, Object};
use rgit_repository::Repository;

use crate::RevisionError;

/// Iterator over the first-parent chain of a commit, newest first.
pub struct CommitWalk<'repo> {
    repo: &'repo Repository,
    next: Option<ObjectId>,
}

impl<'repo> CommitWalk<'repo> {
    /// Start a walk at `start`, which must name a commit.
    pub fn new(repo: &'repo Repository, start: ObjectId) -> Self {
        Self {
            repo,
            next: Some(start),
        }
    }

    fn step(&mut self, oid: ObjectId) -> Result<(ObjectId, Commit), RevisionError> {
        let obj = self
            .repo
            .objects()
            .read(&oid)?
            .ok_or_else(|| RevisionError::MissingObject(oid.to_hex()))?;

        let commit = match obj {
            Object::Commit(commit) => commit,
            other => {
                return Err(RevisionError::KindMismatch {
                    expected: "commit",
                    actual: other.object_type().as_str(),
                    oid: oid.to_hex(),
                })
            }
        };

        self.next = commit.first_parent()?;
        Ok((oid, commit))
    }
}

impl Iterator for CommitWalk<'_> {
    type Item = Result<(ObjectId, Commit), RevisionError>;

    fn next(&mut self) -> Option<Self::Item> {
        let oid = self.next.take()?;
        match self.step(oid) {
            Ok(item) => Some(Ok(item)),
            Err(e) => {
                // Stop the walk after surfacing the error.
                self.next = None;
                Some(Err(e))
            }
        }
    }
}
