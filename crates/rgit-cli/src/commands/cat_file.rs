use std::io::Write;

use anyhow::Result;
use clap::Args;
use rgit_object::Object;
use rgit_revision::resolve;

use super::{ls_tree, open_repo};

#[derive(Args)]
pub struct CatFileArgs {
    /// Show object type
    #[arg(short = 't', conflicts_with_all = ["size", "pretty"])]
    type_only: bool,

    /// Show object size
    #[arg(short = 's', conflicts_with_all = ["type_only", "pretty"])]
    size: bool,

    /// Pretty-print the object content
    #[arg(short = 'p', conflicts_with_all = ["type_only", "size"])]
    pretty: bool,

    /// Object to inspect
    object: String,
}

pub fn run(args: &CatFileArgs) -> Result<i32> {
    let repo = open_repo()?;
    let oid = resolve(&repo, &args.object)?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    if args.type_only || args.size {
        let (kind, size) = repo
            .objects()
            .read_header(&oid)?
            .ok_or_else(|| anyhow::anyhow!("missing object: {}", oid.to_hex()))?;
        if args.type_only {
            writeln!(out, "{kind}")?;
        } else {
            writeln!(out, "{size}")?;
        }
        return Ok(0);
    }

    let obj = repo
        .objects()
        .read(&oid)?
        .ok_or_else(|| anyhow::anyhow!("missing object: {}", oid.to_hex()))?;

    match &obj {
        Object::Blob(blob) => out.write_all(&blob.data)?,
        Object::Tree(tree) => ls_tree::print_tree(&repo, tree, &mut out)?,
        Object::Commit(commit) => out.write_all(&commit.serialize_payload())?,
    }
    Ok(0)
}
