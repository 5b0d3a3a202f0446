use std::io::Read;

use anyhow::Result;
use clap::Args;
use rgit_object::{Object, Tree};

use super::open_repo;

#[derive(Args)]
pub struct MktreeArgs {}

pub fn run(_args: &MktreeArgs) -> Result<i32> {
    let repo = open_repo()?;

    let mut input = Vec::new();
    std::io::stdin().lock().read_to_end(&mut input)?;

    let tree = Tree::from_text(&input)?;
    let oid = repo.objects().write(&Object::Tree(tree))?;

    println!("{}", oid.to_hex());
    Ok(0)
}
