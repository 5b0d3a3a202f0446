use rgit_hash::ObjectId;
use rgit_loose::MINIMUM_ABBREV;
use rgit_ref::{FilesRefStore, RefError, RefName};
use rgit_repository::Repository;

use crate::RevisionError;

/// Resolve a user-supplied name to exactly one full object id.
///
/// Candidates are gathered from the reference namespace, a verbatim full
/// hex id, and the short-prefix scan of the object directory; the result
/// must be unique across all three.
pub fn resolve(repo: &Repository, name: &str) -> Result<ObjectId, RevisionError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(RevisionError::Unknown(name.into()));
    }

    let mut candidates: Vec<ObjectId> = Vec::new();

    if let Some(oid) = ref_candidate(repo.refs(), name)? {
        candidates.push(oid);
    }

    if name.len() == 40 && is_hex(name) {
        if let Ok(oid) = ObjectId::from_hex(name) {
            candidates.push(oid);
        }
    }

    // Prefixes below the abbreviation floor never match object files, but
    // may still have matched a reference above.
    if name.len() >= MINIMUM_ABBREV && name.len() < 40 && is_hex(name) {
        candidates.extend(repo.objects().prefix_candidates(name)?);
    }

    candidates.sort();
    candidates.dedup();

    match candidates.len() {
        0 => Err(RevisionError::Unknown(name.into())),
        1 => Ok(candidates[0]),
        _ => Err(RevisionError::Ambiguous {
            name: name.into(),
            matches: candidates.iter().map(|c| c.to_hex()).collect(),
        }),
    }
}

/// Update `ref_name` to point at whatever `new_value` resolves to.
///
/// `ref_name` must be `HEAD` or live under `refs/`; `new_value` may be any
/// resolvable name (short hash, branch shorthand, another ref).
pub fn update_ref(repo: &Repository, ref_name: &str, new_value: &str) -> Result<(), RevisionError> {
    require_ref_shaped(ref_name)?;

    let oid =
        resolve(repo, new_value).map_err(|_| RevisionError::NotASha1(new_value.to_string()))?;

    let name =
        RefName::new(ref_name).map_err(|_| RevisionError::NotAValidRef(ref_name.to_string()))?;
    repo.refs().write_ref(&name, &oid)?;
    Ok(())
}

/// Strictly validate that `name` is an exact existing reference (or HEAD)
/// and return its resolution.
pub fn validate_ref(repo: &Repository, name: &str) -> Result<ObjectId, RevisionError> {
    require_ref_shaped(name)?;
    resolve(repo, name).map_err(|_| RevisionError::NotAValidRef(name.to_string()))
}

fn require_ref_shaped(name: &str) -> Result<(), RevisionError> {
    if name != "HEAD" && !name.starts_with("refs/") {
        return Err(RevisionError::NotAValidRef(name.to_string()));
    }
    Ok(())
}

fn is_hex(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_hexdigit())
}

/// Find the single reference candidate for `name`, searching the explicit
/// precedence ladder: `HEAD`, the exact name (when already namespaced),
/// then `refs/<n>`, `refs/tags/<n>`, `refs/heads/<n>`, `refs/remotes/<n>`,
/// `refs/remotes/<n>/HEAD`.
fn ref_candidate(
    refs: &FilesRefStore,
    name: &str,
) -> Result<Option<ObjectId>, RevisionError> {
    if name == "HEAD" {
        return try_resolve(refs, "HEAD");
    }

    if name.starts_with("refs/") {
        if let Some(oid) = try_resolve(refs, name)? {
            return Ok(Some(oid));
        }
    }

    for full in [
        format!("refs/{name}"),
        format!("refs/tags/{name}"),
        format!("refs/heads/{name}"),
        format!("refs/remotes/{name}"),
        format!("refs/remotes/{name}/HEAD"),
    ] {
        if let Some(oid) = try_resolve(refs, &full)? {
            return Ok(Some(oid));
        }
    }

    Ok(None)
}

/// Resolve one ref name, treating malformed probe names and unparsable
/// ref files as "no candidate" rather than hard failures.
fn try_resolve(refs: &FilesRefStore, name: &str) -> Result<Option<ObjectId>, RevisionError> {
    match refs.resolve(name) {
        Ok(found) => Ok(found),
        Err(RefError::InvalidName(_)) | Err(RefError::Parse(_)) | Err(RefError::Hash(_)) => {
            Ok(None)
        }
        Err(e) => Err(e.into()),
    }
}
