use std::fs;
use std::path::Path;

use bstr::ByteSlice;
use rgit_object::{Object, Tree};

use crate::{RepoError, Repository};

/// Materialize `tree` into the directory at `target`, creating it first.
///
/// Subtrees become directories and blobs become files carrying the low
/// nine permission bits of their entry mode. Writes happen in walk order;
/// the first error aborts the descent and already-written files are left
/// in place.
pub fn checkout_tree(repo: &Repository, tree: &Tree, target: &Path) -> Result<(), RepoError> {
    fs::create_dir_all(target)?;

    for entry in tree.iter() {
        let name = entry
            .name
            .to_path()
            .map_err(|_| RepoError::InvalidEntryName(entry.name.to_string()))?;
        let dest = target.join(name);

        let obj = repo
            .objects()
            .read(&entry.oid)?
            .ok_or_else(|| RepoError::MissingObject(entry.oid.to_hex()))?;

        match obj {
            Object::Tree(subtree) => {
                checkout_tree(repo, &subtree, &dest)?;
            }
            Object::Blob(blob) => {
                fs::write(&dest, &blob.data)?;
                #[cfg(unix)]
                {
                    use std::os::unix::fs::PermissionsExt;
                    fs::set_permissions(
                        &dest,
                        fs::Permissions::from_mode(entry.mode.perm_bits()),
                    )?;
                }
            }
            Object::Commit(_) => {
                return Err(RepoError::UnexpectedKind {
                    expected: "blob or tree",
                    actual: "commit",
                    oid: entry.oid.to_hex(),
                })
            }
        }
    }

    Ok(())
}
