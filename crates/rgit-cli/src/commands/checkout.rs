use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use rgit_repository::checkout_tree;
use rgit_revision::{peel_to_tree, resolve};

use super::open_repo;

#[derive(Args)]
pub struct CheckoutArgs {
    /// Directory to materialize the tree into
    #[arg(long, default_value = ".")]
    path: PathBuf,

    /// Tree-ish to check out (a tree id, or a commit whose tree is used)
    revision: String,
}

pub fn run(args: &CheckoutArgs) -> Result<i32> {
    let repo = open_repo()?;
    let oid = resolve(&repo, &args.revision)?;
    let tree = peel_to_tree(&repo, &oid)?;
    checkout_tree(&repo, &tree, &args.path)?;
    Ok(0)
}
