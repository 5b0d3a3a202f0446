use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use bstr::ByteSlice;
use rgit_hash::ObjectId;

use crate::error::RefError;
use crate::name::RefName;
use crate::Reference;

/// Maximum number of symbolic links followed when resolving a ref.
pub const MAX_SYMREF_DEPTH: usize = 10;

/// One resolved reference: its name relative to the git dir, and its OID.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefEntry {
    pub name: String,
    pub target: ObjectId,
}

/// Loose reference store over `HEAD` and `refs/**` files.
pub struct FilesRefStore {
    git_dir: PathBuf,
}

impl FilesRefStore {
    /// Open the ref store rooted at the given git directory.
    pub fn open(git_dir: impl AsRef<Path>) -> Self {
        Self {
            git_dir: git_dir.as_ref().to_path_buf(),
        }
    }

    fn ref_path(&self, name: &str) -> PathBuf {
        self.git_dir.join(name)
    }

    /// Read a single loose ref file without following symbolic targets.
    ///
    /// Returns `Ok(None)` if the file does not exist.
    pub fn read(&self, name: &str) -> Result<Option<Reference>, RefError> {
        let path = self.ref_path(name);
        if !path.is_file() {
            return Ok(None);
        }

        let contents = fs::read(&path).map_err(|e| RefError::IoPath {
            path: path.clone(),
            source: e,
        })?;
        let trimmed = contents.trim();

        let name = RefName::new(name)?;
        if let Some(target) = trimmed.strip_prefix(b"ref: ") {
            let target_str = std::str::from_utf8(target.trim())
                .map_err(|_| RefError::Parse("invalid UTF-8 in symbolic ref target".into()))?;
            Ok(Some(Reference::Symbolic {
                name,
                target: RefName::new(target_str)?,
            }))
        } else {
            let hex = std::str::from_utf8(trimmed)
                .map_err(|_| RefError::Parse("invalid UTF-8 in ref OID".into()))?;
            Ok(Some(Reference::Direct {
                name,
                target: ObjectId::from_hex(hex)?,
            }))
        }
    }

    /// Resolve a ref name to its final OID, following symbolic chains.
    ///
    /// Returns `Ok(None)` if the ref (or any link in the chain) does not
    /// exist. Chains longer than [`MAX_SYMREF_DEPTH`] fail.
    pub fn resolve(&self, name: &str) -> Result<Option<ObjectId>, RefError> {
        let mut current = name.to_string();
        for _ in 0..=MAX_SYMREF_DEPTH {
            match self.read(&current)? {
                None => return Ok(None),
                Some(Reference::Direct { target, .. }) => return Ok(Some(target)),
                Some(Reference::Symbolic { target, .. }) => current = target.to_string(),
            }
        }
        Err(RefError::ChainTooDeep(name.to_string()))
    }

    /// Enumerate refs under `refs/`, resolved to OIDs and sorted by name.
    ///
    /// If `pattern` is given, a ref is kept when the pattern matches a
    /// trailing path segment of its name: the name equals the pattern or
    /// ends with `/<pattern>`. With `include_head`, the resolution of
    /// `HEAD` is appended under the name `HEAD`.
    pub fn iter(
        &self,
        pattern: Option<&str>,
        include_head: bool,
    ) -> Result<Vec<RefEntry>, RefError> {
        let mut names = Vec::new();
        let refs_dir = self.git_dir.join("refs");
        if refs_dir.is_dir() {
            collect_ref_names(&self.git_dir, &refs_dir, &mut names)?;
        }

        let mut entries = Vec::new();
        for name in names {
            if let Some(pattern) = pattern {
                let matches =
                    name == pattern || name.ends_with(&format!("/{pattern}"));
                if !matches {
                    continue;
                }
            }
            let target = self
                .resolve(&name)?
                .ok_or_else(|| RefError::NotFound(name.clone()))?;
            entries.push(RefEntry { name, target });
        }

        if include_head {
            let target = self
                .resolve("HEAD")?
                .ok_or_else(|| RefError::NotFound("HEAD".into()))?;
            entries.push(RefEntry {
                name: "HEAD".into(),
                target,
            });
        }

        entries.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(entries)
    }

    /// Write `<oid>\n` to the ref file under git's lock protocol.
    ///
    /// The new value is staged in `<ref>.lock` (created exclusively, so a
    /// concurrent writer fails instead of tearing the ref), fsynced, and
    /// renamed over the ref file in one step. Parent directories are
    /// created on demand; the stage file is removed if any step fails.
    pub fn write_ref(&self, name: &RefName, oid: &ObjectId) -> Result<(), RefError> {
        let ref_path = self.ref_path(name.as_str());
        if let Some(parent) = ref_path.parent() {
            fs::create_dir_all(parent).map_err(|e| RefError::IoPath {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let stage_path = stage_path_for(&ref_path);
        let mut stage = fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&stage_path)
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::AlreadyExists {
                    RefError::Locked(name.to_string())
                } else {
                    RefError::IoPath {
                        path: stage_path.clone(),
                        source: e,
                    }
                }
            })?;

        let staged = stage
            .write_all(format!("{}\n", oid.to_hex()).as_bytes())
            .and_then(|_| stage.sync_all());
        drop(stage);

        if let Err(e) = staged.and_then(|_| fs::rename(&stage_path, &ref_path)) {
            let _ = fs::remove_file(&stage_path);
            return Err(RefError::IoPath {
                path: ref_path,
                source: e,
            });
        }
        Ok(())
    }
}

/// The stage path for a ref file: the same file name with `.lock` appended.
fn stage_path_for(ref_path: &Path) -> PathBuf {
    let mut file_name = ref_path.file_name().unwrap_or_default().to_os_string();
    file_name.push(".lock");
    ref_path.with_file_name(file_name)
}

/// Collect the git-dir-relative names of all regular files under `dir`.
fn collect_ref_names(
    git_dir: &Path,
    dir: &Path,
    names: &mut Vec<String>,
) -> Result<(), RefError> {
    let entries = match fs::read_dir(dir) {
        Ok(e) => e,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(()),
        Err(e) => {
            return Err(RefError::IoPath {
                path: dir.to_path_buf(),
                source: e,
            })
        }
    };

    for entry in entries {
        let entry = entry.map_err(|e| RefError::IoPath {
            path: dir.to_path_buf(),
            source: e,
        })?;
        let path = entry.path();

        if path.is_dir() {
            collect_ref_names(git_dir, &path, names)?;
        } else if path.is_file() {
            let rel = path
                .strip_prefix(git_dir)
                .map_err(|_| RefError::Parse("cannot determine ref name from path".into()))?;
            let name = rel
                .to_str()
                .ok_or_else(|| RefError::Parse("non-UTF-8 ref path".into()))?;
            if name.ends_with(".lock") {
                continue;
            }
            names.push(name.to_string());
        }
    }

    Ok(())
}
