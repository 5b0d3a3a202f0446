use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use rgit_loose::LooseObjectStore;
use rgit_object::{Blob, ObjectType};

use super::open_repo;

#[derive(Args)]
pub struct HashObjectArgs {
    /// Actually write the object into the object database
    #[arg(short = 'w')]
    write: bool,

    /// File to hash
    file: PathBuf,
}

pub fn run(args: &HashObjectArgs) -> Result<i32> {
    let blob = Blob::from_file(&args.file)?;

    let oid = if args.write {
        let repo = open_repo()?;
        repo.objects().write_raw(ObjectType::Blob, &blob.data)?
    } else {
        LooseObjectStore::hash_raw(ObjectType::Blob, &blob.data)?
    };

    println!("{}", oid.to_hex());
    Ok(0)
}
