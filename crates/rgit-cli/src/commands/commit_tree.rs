use anyhow::Result;
use bstr::BStr;
use clap::Args;
use rgit_object::{Commit, Object, ObjectType};
use rgit_revision::resolve;
use rgit_utils::{GitDate, Identity};

use super::open_repo;

#[derive(Args)]
pub struct CommitTreeArgs {
    /// Id of a parent commit object
    #[arg(short = 'p')]
    parent: Option<String>,

    /// The commit log message
    #[arg(short = 'm')]
    message: String,

    /// The tree the commit records
    tree: String,
}

pub fn run(args: &CommitTreeArgs) -> Result<i32> {
    let repo = open_repo()?;

    let tree_oid = resolve(&repo, &args.tree)?;
    let (kind, _) = repo
        .objects()
        .read_header(&tree_oid)?
        .ok_or_else(|| anyhow::anyhow!("missing object: {}", tree_oid.to_hex()))?;
    if kind != ObjectType::Tree {
        anyhow::bail!("object {} is a {}, not a tree", tree_oid.to_hex(), kind);
    }

    let parent_oid = match &args.parent {
        Some(parent) => Some(resolve(&repo, parent)?),
        None => None,
    };

    let message = format!("{}\n", args.message);
    let commit = Commit::from_params(
        &tree_oid,
        parent_oid.as_ref(),
        BStr::new(message.as_str()),
        &Identity::default(),
        GitDate::now(),
    );

    let oid = repo.objects().write(&Object::Commit(commit))?;
    println!("{}", oid.to_hex());
    Ok(0)
}
