use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Name of the ignore file read from the traversal root.
pub const IGNORE_FILE_NAME: &str = ".gitignore";

/// Number of leading lines scanned for tag declarations.
pub const DEFAULT_HEADER_LINES: usize = 10;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelectOptions {
    pub root: PathBuf,
    pub respect_gitignore: bool,
    pub headers: bool,
    pub include_hidden: bool,
    pub follow_links: bool,
    pub header_lines: usize,
    /// Absolute path that must never show up among the candidates.
    pub exclude_path: Option<PathBuf>,
}
impl Default for SelectOptions {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            respect_gitignore: true,
            headers: true,
            include_hidden: true,
            follow_links: false,
            header_lines: DEFAULT_HEADER_LINES,
            exclude_path: None,
        }
    }
}
#[derive(Debug, Default)]
pub struct SelectBuilder {
    options: SelectOptions,
}
impl SelectBuilder {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            options: SelectOptions {
                root: root.into(),
                ..Default::default()
            },
        }
    }
    pub fn respect_gitignore(mut self, yes: bool) -> Self {
        self.options.respect_gitignore = yes;
        self
    }
    pub fn headers(mut self, yes: bool) -> Self {
        self.options.headers = yes;
        self
    }
    pub fn include_hidden(mut self, yes: bool) -> Self {
        self.options.include_hidden = yes;
        self
    }
    pub fn follow_links(mut self, yes: bool) -> Self {
        self.options.follow_links = yes;
        self
    }
    pub fn header_lines(mut self, lines: usize) -> Self {
        self.options.header_lines = lines;
        self
    }
    pub fn exclude_path(mut self, path: Option<PathBuf>) -> Self {
        self.options.exclude_path = path;
        self
    }
    pub fn build(self) -> SelectOptions {
        self.options
    }
}
