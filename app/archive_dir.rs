//! Command-line interface for zipping the current directory.
//!
//! Every file not ignored by the root `.gitignore` goes into
//! `<dir>-YYYY-MM-DD-HH-MM-SS.zip` under a top-level folder named after the
//! directory.

use chrono::Local;
use clap::Parser;
use clipsel::SelectBuilder;
use clipsel::archive::create_archive;
use std::io;
use std::path::PathBuf;
use std::process::exit;
use tracing_subscriber::EnvFilter;

/// archive-dir — zip a directory snapshot, honouring .gitignore
#[derive(Parser)]
#[command(name = "archive-dir", version, about, long_about = None)]
struct Cli {
    /// Directory to archive
    #[arg(long, default_value = ".")]
    root: PathBuf,

    /// Where to write the archive (defaults to the archived directory)
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// Disable .gitignore handling
    #[arg(long)]
    no_gitignore: bool,

    /// Debug logging on stderr
    #[arg(long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();
    let default = if cli.verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();

    let options = SelectBuilder::new(cli.root)
        .respect_gitignore(!cli.no_gitignore)
        .build();

    match create_archive(&options, cli.output_dir.as_deref(), &Local::now()) {
        Ok(summary) => println!("Archive created: {}", summary.path.display()),
        Err(e) => {
            eprintln!("Error: {}", e);
            exit(1);
        }
    }
}
