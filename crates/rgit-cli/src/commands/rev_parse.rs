use anyhow::Result;
use clap::Args;
use rgit_revision::resolve;

use super::open_repo;

#[derive(Args)]
pub struct RevParseArgs {
    /// Identifier to resolve (ref, short hash, or full hash)
    revision: String,
}

pub fn run(args: &RevParseArgs) -> Result<i32> {
    let repo = open_repo()?;
    let oid = resolve(&repo, &args.revision)?;
    println!("{}", oid.to_hex());
    Ok(0)
}
