use anyhow::Result;
use clap::Args;
use rgit_revision::update_ref;

use super::open_repo;

#[derive(Args)]
pub struct UpdateRefArgs {
    /// Reference to update (HEAD or a name under refs/)
    refname: String,

    /// New value; any name that resolves to a single object id
    new_value: String,
}

pub fn run(args: &UpdateRefArgs) -> Result<i32> {
    let repo = open_repo()?;
    update_ref(&repo, &args.refname, &args.new_value)?;
    Ok(0)
}
