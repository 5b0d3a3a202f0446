//! Worktree checkout over a freshly initialized repository.

use bstr::BString;
use rgit_object::{EntryMode, Object, ObjectType, Tree, TreeEntry};
use rgit_repository::{checkout_tree, Repository};

fn init_repo() -> (tempfile::TempDir, Repository) {
    let dir = tempfile::tempdir().unwrap();
    let repo = Repository::init(dir.path().join("repo")).unwrap();
    (dir, repo)
}

#[test]
fn checkout_single_file_tree() {
    let (dir, repo) = init_repo();

    let blob_oid = repo
        .objects()
        .write_raw(ObjectType::Blob, b"Hello World\n")
        .unwrap();
    let tree = Tree {
        entries: vec![TreeEntry {
            mode: EntryMode::REGULAR,
            name: BString::from("testfile"),
            oid: blob_oid,
        }],
    };
    repo.objects().write(&Object::Tree(tree.clone())).unwrap();

    let target = dir.path().join("checkout");
    checkout_tree(&repo, &tree, &target).unwrap();

    let written = std::fs::read(target.join("testfile")).unwrap();
    assert_eq!(written, b"Hello World\n");

    // Exactly one entry materialized.
    assert_eq!(std::fs::read_dir(&target).unwrap().count(), 1);
}

#[test]
fn checkout_nested_tree() {
    let (dir, repo) = init_repo();

    let blob_oid = repo
        .objects()
        .write_raw(ObjectType::Blob, b"nested contents\n")
        .unwrap();
    let subtree = Tree {
        entries: vec![TreeEntry {
            mode: EntryMode::REGULAR,
            name: BString::from("inner.txt"),
            oid: blob_oid,
        }],
    };
    let subtree_oid = repo.objects().write(&Object::Tree(subtree)).unwrap();

    let root = Tree {
        entries: vec![TreeEntry {
            mode: EntryMode::TREE,
            name: BString::from("sub"),
            oid: subtree_oid,
        }],
    };

    let target = dir.path().join("checkout");
    checkout_tree(&repo, &root, &target).unwrap();

    let written = std::fs::read(target.join("sub/inner.txt")).unwrap();
    assert_eq!(written, b"nested contents\n");
}

#[cfg(unix)]
#[test]
fn checkout_applies_permission_bits() {
    use std::os::unix::fs::PermissionsExt;

    let (dir, repo) = init_repo();

    let blob_oid = repo
        .objects()
        .write_raw(ObjectType::Blob, b"#!/bin/sh\n")
        .unwrap();
    let tree = Tree {
        entries: vec![TreeEntry {
            mode: EntryMode::EXECUTABLE,
            name: BString::from("run.sh"),
            oid: blob_oid,
        }],
    };

    let target = dir.path().join("checkout");
    checkout_tree(&repo, &tree, &target).unwrap();

    let mode = std::fs::metadata(target.join("run.sh"))
        .unwrap()
        .permissions()
        .mode();
    assert_eq!(mode & 0o777, 0o755);
}

#[test]
fn checkout_missing_object_aborts() {
    let (dir, repo) = init_repo();

    let tree = Tree {
        entries: vec![TreeEntry {
            mode: EntryMode::REGULAR,
            name: BString::from("ghost"),
            oid: rgit_hash::ObjectId::NULL,
        }],
    };

    let target = dir.path().join("checkout");
    assert!(checkout_tree(&repo, &tree, &target).is_err());
}
