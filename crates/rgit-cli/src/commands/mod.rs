pub mod cat_file;
pub mod checkout;
pub mod commit_tree;
pub mod hash_object;
pub mod init;
pub mod log;
pub mod ls_tree;
pub mod mktree;
pub mod rev_parse;
pub mod show_ref;
pub mod update_ref;

use anyhow::Result;
use clap::Subcommand;
use rgit_repository::Repository;

use crate::Cli;

#[derive(Subcommand)]
pub enum Commands {
    /// Create an empty repository
    Init(init::InitArgs),
    /// Compute object ID and optionally create a blob from a file
    HashObject(hash_object::HashObjectArgs),
    /// Provide content or type and size information for repository objects
    CatFile(cat_file::CatFileArgs),
    /// List the contents of a tree object
    LsTree(ls_tree::LsTreeArgs),
    /// Build a tree object from ls-tree formatted text
    Mktree(mktree::MktreeArgs),
    /// Create a new commit object
    CommitTree(commit_tree::CommitTreeArgs),
    /// Show commit logs
    Log(log::LogArgs),
    /// Check out a tree into a directory
    Checkout(checkout::CheckoutArgs),
    /// List references in a local repository
    ShowRef(show_ref::ShowRefArgs),
    /// Resolve a given identifier to a full object id
    RevParse(rev_parse::RevParseArgs),
    /// Update the object name stored in a ref safely
    UpdateRef(update_ref::UpdateRefArgs),
}

pub fn run(cli: &Cli) -> Result<i32> {
    match &cli.command {
        Commands::Init(args) => init::run(args),
        Commands::HashObject(args) => hash_object::run(args),
        Commands::CatFile(args) => cat_file::run(args),
        Commands::LsTree(args) => ls_tree::run(args),
        Commands::Mktree(args) => mktree::run(args),
        Commands::CommitTree(args) => commit_tree::run(args),
        Commands::Log(args) => log::run(args),
        Commands::Checkout(args) => checkout::run(args),
        Commands::ShowRef(args) => show_ref::run(args),
        Commands::RevParse(args) => rev_parse::run(args),
        Commands::UpdateRef(args) => update_ref::run(args),
    }
}

/// Discover the repository from the current directory.
pub(crate) fn open_repo() -> Result<Repository> {
    Ok(Repository::discover(".")?)
}
