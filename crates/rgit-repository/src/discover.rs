use std::path::Path;

use crate::{RepoError, Repository};

/// Discover a repository by walking up from `start`.
///
/// Each ancestor is checked for a `.git` subdirectory; reaching the
/// filesystem root without finding one is an error.
pub fn discover_repository(start: &Path) -> Result<Repository, RepoError> {
    let start = std::fs::canonicalize(start).map_err(|_| RepoError::NotARepository)?;

    let mut current = start.as_path();
    loop {
        let dot_git = current.join(".git");
        if dot_git.is_dir() {
            return Ok(Repository::from_work_tree(current.to_path_buf()));
        }

        match current.parent() {
            Some(parent) => current = parent,
            None => return Err(RepoError::NotARepository),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn discover_from_repo_root() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("repo");
        Repository::init(&target).unwrap();

        let repo = Repository::discover(&target).unwrap();
        assert!(repo.git_dir().ends_with(".git"));
        assert_eq!(repo.git_dir(), repo.work_tree().join(".git"));
    }

    #[test]
    fn discover_from_nested_directory() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("repo");
        Repository::init(&target).unwrap();

        let nested = target.join("a/b/c");
        std::fs::create_dir_all(&nested).unwrap();

        let repo = Repository::discover(&nested).unwrap();
        assert_eq!(
            std::fs::canonicalize(repo.work_tree()).unwrap(),
            std::fs::canonicalize(&target).unwrap()
        );
    }

    #[test]
    fn discover_outside_any_repo_fails() {
        let dir = tempfile::tempdir().unwrap();
        let err = Repository::discover(dir.path()).unwrap_err();
        assert!(matches!(err, RepoError::NotARepository));
        assert_eq!(
            err.to_string(),
            "not a git repository (or any of the parent directories): .git"
        );
    }

    #[test]
    fn discover_missing_start_fails() {
        let dir = tempfile::tempdir().unwrap();
        assert!(Repository::discover(dir.path().join("nope")).is_err());
    }
}
