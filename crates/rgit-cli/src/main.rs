mod commands;

use std::process;

use clap::Parser;

use commands::Commands;

#[derive(Parser)]
#[command(
    name = "rgit",
    about = "A git-compatible object store and reference system",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

fn main() {
    let cli = Cli::parse();
    match commands::run(&cli) {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("fatal: {e}");
            process::exit(1);
        }
    }
}
