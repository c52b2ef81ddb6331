//! Command-line interface for copying selected files to the clipboard.
//!
//! Walks the current directory (honouring its `.gitignore`), keeps the files
//! picked by the selector arguments and copies their concatenated contents to
//! the system clipboard.

use clap::{ArgAction, CommandFactory, Parser};
#[cfg(feature = "clipboard")]
use clipsel::output::SystemClipboard;
use clipsel::output::{self, Clipboard};
use clipsel::{ArgumentSet, ClipError, SelectBuilder, SelectOptions, Selector, candidates};
use std::io;
use std::path::PathBuf;
use std::process::exit;
use tracing_subscriber::EnvFilter;

const SELECTOR_HELP: &str = "\
Inclusion arguments:
  Glob patterns  e.g. \"*.js\", \"*.sh\". Without a wildcard the pattern is
                 rewritten to match at any depth (\"main.py\" -> \"*/main.py\").
  Tags           +frontend includes files whose first 10 lines contain
                 \"tags:\" followed by \"#frontend\".

Exclusion arguments:
  Glob exclusions  -*.test.json excludes files matching that glob.
  Tag exclusions   -+experimental excludes files tagged #experimental.

Options must come before the first selector. Help and version are only
available as --help and --version, so -h and -V are exclusion globs.";

/// clip-files — copy files picked by glob and tag to the clipboard
#[derive(Parser)]
#[command(
    name = "clip-files",
    version,
    about,
    long_about = None,
    after_help = SELECTOR_HELP,
    disable_help_flag = true,
    disable_version_flag = true
)]
struct Cli {
    /// Print help
    #[arg(long, action = ArgAction::Help)]
    help: Option<bool>,

    /// Print version
    #[arg(long, action = ArgAction::Version)]
    version: Option<bool>,

    /// Root directory
    #[arg(long, default_value = ".")]
    root: PathBuf,

    /// Disable .gitignore handling
    #[arg(long)]
    no_gitignore: bool,

    /// Do not write "===== <path> =====" before each file
    #[arg(long)]
    no_headers: bool,

    /// Skip hidden files and directories
    #[arg(long)]
    skip_hidden: bool,

    /// Print the selection as JSON instead of copying it
    #[arg(long)]
    dry_run: bool,

    /// Debug logging on stderr
    #[arg(long)]
    verbose: bool,

    /// Globs and tags: "*.py", main.py, +tag, -glob, -+tag
    #[arg(value_name = "SELECTOR", trailing_var_arg = true, allow_hyphen_values = true)]
    selectors: Vec<String>,
}

impl Cli {
    fn options(&self) -> SelectOptions {
        SelectBuilder::new(self.root.clone())
            .respect_gitignore(!self.no_gitignore)
            .headers(!self.no_headers)
            .include_hidden(!self.skip_hidden)
            .build()
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

fn main() {
    match output::run_clipboard_daemon_if_requested() {
        Ok(true) => return,
        Ok(false) => {}
        Err(e) => {
            eprintln!("{}", e);
            exit(1);
        }
    }

    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if cli.selectors.is_empty() {
        eprintln!("Error: {}", ClipError::EmptyArguments);
        // Nothing useful to do if stdout is gone.
        let _ = Cli::command().print_help();
        exit(1);
    }

    let options = cli.options();
    let args = ArgumentSet::classify(&cli.selectors);
    let selector = match Selector::new(&args) {
        Ok(s) => s.header_lines(options.header_lines),
        Err(e) => {
            eprintln!("Error: {}", e);
            exit(1);
        }
    };

    let found = match candidates(&options) {
        Ok(found) => found,
        Err(e) => {
            eprintln!("Error: {}", e);
            exit(1);
        }
    };
    if found.is_empty() {
        println!("No candidate files found in the filesystem.");
        return;
    }

    let selection = selector.select(&found);

    if cli.dry_run {
        match output::format_json(&selection, true) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("JSON serialization error: {}", e);
                exit(1);
            }
        }
        return;
    }

    if selection.files.is_empty() {
        println!("No files matched the given patterns/tags after applying exclusions.");
    } else {
        let aggregate = output::aggregate(&selection.files, options.headers, |file| {
            println!("Copying file: {}", file.display());
        });
        match open_clipboard() {
            Ok(mut clipboard) => {
                if output::deliver(&aggregate, clipboard.as_mut()).is_ok() {
                    println!(
                        "Copied {} files ({} characters) to the clipboard.",
                        aggregate.file_count, aggregate.char_count
                    );
                }
            }
            Err(e) => eprintln!("{}", e),
        }
    }

    if !selection.unmatched.is_empty() {
        eprintln!("Some arguments didn't match any files:");
        for warning in selection.unmatched.warnings() {
            eprintln!("{}", warning);
        }
    }
}

#[cfg(feature = "clipboard")]
fn open_clipboard() -> Result<Box<dyn Clipboard>, ClipError> {
    Ok(Box::new(SystemClipboard::new()?))
}

#[cfg(not(feature = "clipboard"))]
fn open_clipboard() -> Result<Box<dyn Clipboard>, ClipError> {
    Err(ClipError::Clipboard(
        "built without the `clipboard` feature".to_string(),
    ))
}
