use std::fs;
use std::path::Path;

use crate::{RepoError, Repository};

const DESCRIPTION: &str =
    "Unnamed repository; edit this file 'description' to name the repository.\n";

const DEFAULT_HEAD: &str = "ref: refs/heads/master\n";

// The fixed configuration stanza; only these options are honoured.
const DEFAULT_CONFIG: &str =
    "[core]\n\trepositoryformatversion = 0\n\tbare = false\n\tfilemode = false\n";

/// Initialize a fresh repository at `path`.
///
/// The target must either not exist or be an empty directory. Creates
/// `.git/` with `objects/`, `refs/tags/`, `refs/heads/`, a placeholder
/// `description`, `HEAD` pointing at `refs/heads/master`, and the default
/// `config` stanza.
pub fn init_repository(path: &Path) -> Result<Repository, RepoError> {
    let work_tree = absolutize(path)?;

    if work_tree.exists() {
        if !work_tree.is_dir() {
            return Err(RepoError::NotADirectory(work_tree));
        }
        if fs::read_dir(&work_tree)?.next().is_some() {
            return Err(RepoError::WorkTreeNotEmpty(work_tree));
        }
    } else {
        fs::create_dir_all(&work_tree)?;
    }

    let repo = Repository::from_work_tree(work_tree);

    repo.dir_path(true, &["objects"])?;
    repo.dir_path(true, &["refs", "tags"])?;
    repo.dir_path(true, &["refs", "heads"])?;

    fs::write(repo.file_path(true, &["description"])?, DESCRIPTION)?;
    fs::write(repo.file_path(true, &["HEAD"])?, DEFAULT_HEAD)?;
    fs::write(repo.file_path(true, &["config"])?, DEFAULT_CONFIG)?;

    Ok(repo)
}

/// Make `path` absolute against the current directory without touching the
/// filesystem beyond that.
fn absolutize(path: &Path) -> Result<std::path::PathBuf, RepoError> {
    if path.is_absolute() {
        Ok(path.to_path_buf())
    } else {
        Ok(std::env::current_dir()?.join(path))
    }
}
