use std::io::Write;

use anyhow::Result;
use bstr::{BStr, ByteSlice};
use clap::Args;
use rgit_hash::ObjectId;
use rgit_object::Commit;
use rgit_revision::{resolve, CommitWalk};

use super::open_repo;

#[derive(Args)]
pub struct LogArgs {
    /// Limit the number of commits shown
    #[arg(short = 'n')]
    max_count: Option<usize>,

    /// Revision to start from
    #[arg(default_value = "HEAD")]
    revision: String,
}

pub fn run(args: &LogArgs) -> Result<i32> {
    let repo = open_repo()?;
    let start = resolve(&repo, &args.revision)?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    let limit = args.max_count.unwrap_or(usize::MAX);
    for (printed, item) in CommitWalk::new(&repo, start).enumerate() {
        if printed >= limit {
            break;
        }
        if printed > 0 {
            writeln!(out)?;
        }
        let (oid, commit) = item?;
        print_commit(&oid, &commit, &mut out)?;
    }

    Ok(0)
}

/// Print one commit the way `git log` does: the id line, author, date, a
/// blank line, and the message indented four spaces.
fn print_commit(oid: &ObjectId, commit: &Commit, out: &mut impl Write) -> Result<()> {
    let author = commit.author()?;

    writeln!(out, "commit {}", oid.to_hex())?;
    writeln!(
        out,
        "Author: {} <{}>",
        author.name.as_bstr(),
        author.email.as_bstr()
    )?;
    writeln!(out, "Date:   {}", author.date.format_default())?;
    writeln!(out)?;

    let message: &BStr = commit.message.as_bstr();
    let mut lines: Vec<&[u8]> = message.split(|&b| b == b'\n').collect();
    // A trailing newline yields one empty trailing segment; drop it.
    if lines.last() == Some(&&b""[..]) {
        lines.pop();
    }
    for line in lines {
        if line.is_empty() {
            writeln!(out)?;
        } else {
            writeln!(out, "    {}", line.as_bstr())?;
        }
    }

    Ok(())
}
