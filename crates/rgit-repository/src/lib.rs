//! Repository discovery, initialization, and worktree materialization.
//!
//! A repository is the pair of absolute paths `(work_tree, git_dir)` with
//! `git_dir = work_tree/.git`. It hands out the loose object store and the
//! reference store rooted under the git dir.

mod discover;
mod error;
mod init;
mod worktree;

pub use error::RepoError;
pub use worktree::checkout_tree;

use std::fs;
use std::path::{Path, PathBuf};

use rgit_loose::LooseObjectStore;
use rgit_ref::FilesRefStore;

pub struct Repository {
    /// Path to the working tree root.
    work_tree: PathBuf,
    /// Path to the .git directory.
    git_dir: PathBuf,
    /// Loose object store under `git_dir/objects`.
    objects: LooseObjectStore,
    /// Reference store rooted at `git_dir`.
    refs: FilesRefStore,
}

impl std::fmt::Debug for Repository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Repository")
            .field("work_tree", &self.work_tree)
            .field("git_dir", &self.git_dir)
            .finish_non_exhaustive()
    }
}

impl Repository {
    fn from_work_tree(work_tree: PathBuf) -> Self {
        let git_dir = work_tree.join(".git");
        let objects = LooseObjectStore::open(git_dir.join("objects"));
        let refs = FilesRefStore::open(&git_dir);
        Self {
            work_tree,
            git_dir,
            objects,
            refs,
        }
    }

    /// Initialize a fresh repository at `path` (see [`init`](init)).
    pub fn init(path: impl AsRef<Path>) -> Result<Self, RepoError> {
        init::init_repository(path.as_ref())
    }

    /// Discover a repository by walking up from `start` until a directory
    /// containing `.git` is found.
    pub fn discover(start: impl AsRef<Path>) -> Result<Self, RepoError> {
        discover::discover_repository(start.as_ref())
    }

    /// Path to the working tree root.
    pub fn work_tree(&self) -> &Path {
        &self.work_tree
    }

    /// Path to the .git directory.
    pub fn git_dir(&self) -> &Path {
        &self.git_dir
    }

    /// The loose object store.
    pub fn objects(&self) -> &LooseObjectStore {
        &self.objects
    }

    /// The reference store.
    pub fn refs(&self) -> &FilesRefStore {
        &self.refs
    }

    /// Join `components` onto the git dir as a directory path.
    ///
    /// With `create`, missing intermediate directories are created. A
    /// non-directory at a directory position is an error either way.
    pub fn dir_path(&self, create: bool, components: &[&str]) -> Result<PathBuf, RepoError> {
        let mut path = self.git_dir.clone();
        for component in components {
            path.push(component);
        }

        if path.exists() {
            if !path.is_dir() {
                return Err(RepoError::NotADirectory(path));
            }
        } else if create {
            fs::create_dir_all(&path)?;
        }

        Ok(path)
    }

    /// Join `components` onto the git dir as a file path; the last
    /// component is the file name. With `create`, parent directories are
    /// created.
    pub fn file_path(&self, create: bool, components: &[&str]) -> Result<PathBuf, RepoError> {
        let (file_name, dirs) = match components.split_last() {
            Some(split) => split,
            None => return Ok(self.git_dir.clone()),
        };
        let dir = self.dir_path(create, dirs)?;
        Ok(dir.join(file_name))
    }
}
