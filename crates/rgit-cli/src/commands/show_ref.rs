use anyhow::Result;
use clap::Args;
use rgit_revision::validate_ref;

use super::open_repo;

#[derive(Args)]
pub struct ShowRefArgs {
    /// Show the HEAD reference, even if it would normally be filtered out
    #[arg(long)]
    head: bool,

    /// Enable stricter reference checking by requiring an exact ref path
    #[arg(long, requires = "pattern")]
    verify: bool,

    /// Only show refs matching this trailing path segment
    pattern: Option<String>,
}

pub fn run(args: &ShowRefArgs) -> Result<i32> {
    let repo = open_repo()?;

    if args.verify {
        let pattern = args.pattern.as_deref().unwrap();
        let oid = validate_ref(&repo, pattern)?;
        println!("{} {}", oid.to_hex(), pattern);
        return Ok(0);
    }

    let entries = repo.refs().iter(args.pattern.as_deref(), args.head)?;
    for entry in entries {
        println!("{} {}", entry.target.to_hex(), entry.name);
    }
    Ok(0)
}
