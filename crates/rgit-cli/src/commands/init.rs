use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use rgit_repository::Repository;

#[derive(Args)]
pub struct InitArgs {
    /// Directory to create the repository in
    #[arg(default_value = ".")]
    path: PathBuf,
}

pub fn run(args: &InitArgs) -> Result<i32> {
    let repo = Repository::init(&args.path)?;
    println!(
        "Initialized empty Git repository in {}/",
        repo.git_dir().display()
    );
    Ok(0)
}
