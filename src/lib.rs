//! # Clipsel
//!
//! `clipsel` picks files out of a source tree. A root `.gitignore` prunes the
//! tree, then selector arguments decide what is kept:
//!
//! - `*.py`, `main.py`: include by glob (a name without `*` matches at any depth)
//! - `+backend`: include files whose first lines declare `tags: #backend`
//! - `-*.test.json`: exclude by glob
//! - `-+experimental`: exclude by tag
//!
//! The selection can be concatenated and copied to the clipboard
//! ([`output::aggregate`]), and the same ignore-aware walk backs a zip snapshot
//! of the whole tree ([`archive::create_archive`]).
//!
//! # Features
//!
//! - `clipboard` (default): system clipboard support via `arboard`.
//!
//! # Example
//!
//! ```no_run
//! use clipsel::{SelectBuilder, candidates, select};
//!
//! let options = SelectBuilder::new(".").respect_gitignore(true).build();
//! let found = candidates(&options).expect("Failed to scan directory");
//! let selection = select(&["*.rs", "-+generated"], &found, options.header_lines)
//!     .expect("Invalid selector");
//!
//! for file in &selection.files {
//!     println!("{}", file.display());
//! }
//! for warning in selection.unmatched.warnings() {
//!     eprintln!("{}", warning);
//! }
//! ```

pub mod archive;
mod args;
mod error;
mod ignore_rules;
mod matcher;
mod options;
pub mod output;
mod types;
mod walk;

pub use args::{ArgKind, ArgumentSet, Unmatched, classify_one};
pub use error::ClipError;
pub use ignore_rules::{CompiledPattern, IgnoreRules, normalize_ignore_line};
pub use matcher::{Selector, read_header, select};
pub use options::{DEFAULT_HEADER_LINES, IGNORE_FILE_NAME, SelectBuilder, SelectOptions};
pub use types::{Aggregate, Candidate, HeaderSnippet, MatchResult, Rule, Selection};
pub use walk::{candidates, relative_slash_path};
