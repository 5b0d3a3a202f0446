use std::io::Write;

use anyhow::Result;
use bstr::ByteSlice;
use clap::Args;
use rgit_object::Tree;
use rgit_repository::Repository;
use rgit_revision::{peel_to_tree, resolve};

use super::open_repo;

#[derive(Args)]
pub struct LsTreeArgs {
    /// Tree-ish to list (a tree id, or a commit whose tree is listed)
    revision: String,
}

pub fn run(args: &LsTreeArgs) -> Result<i32> {
    let repo = open_repo()?;
    let oid = resolve(&repo, &args.revision)?;
    let tree = peel_to_tree(&repo, &oid)?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    print_tree(&repo, &tree, &mut out)?;
    Ok(0)
}

/// Print one line per entry: zero-padded mode, the target's stored kind,
/// its hex id, a TAB, and the entry name.
pub(crate) fn print_tree(
    repo: &Repository,
    tree: &Tree,
    out: &mut impl Write,
) -> Result<()> {
    for entry in tree.iter() {
        let (kind, _size) = repo
            .objects()
            .read_header(&entry.oid)?
            .ok_or_else(|| anyhow::anyhow!("missing object: {}", entry.oid.to_hex()))?;
        writeln!(
            out,
            "{} {} {}\t{}",
            entry.mode.padded(),
            kind,
            entry.oid.to_hex(),
            entry.name.as_bstr(),
        )?;
    }
    Ok(())
}
