use crate::args::Unmatched;
use serde::Serialize;
use std::path::PathBuf;

/// A file that survived ignore filtering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Candidate {
    /// Path used for I/O.
    pub path: PathBuf,
    /// Path relative to the root, always with `/` separators.
    pub rel: String,
}

impl Candidate {
    /// `./`-prefixed relative path, used in headers and as the primary
    /// matching form so that `*/name` also reaches files at the root.
    pub fn display(&self) -> String {
        format!("./{}", self.rel)
    }
}

/// The first lines of a file, read at most once per file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderSnippet(pub String);

impl HeaderSnippet {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// The argument that decided an inclusion or exclusion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "by", content = "value")]
pub enum Rule {
    Pattern(String),
    Tag(String),
}

/// Outcome of matching one candidate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchResult {
    pub included: bool,
    pub matched_by: Option<Rule>,
    pub excluded_by: Option<Rule>,
}

impl MatchResult {
    pub(crate) fn rejected() -> Self {
        Self {
            included: false,
            matched_by: None,
            excluded_by: None,
        }
    }

    /// Whether the file belongs in the final set.
    pub fn is_selected(&self) -> bool {
        self.included && self.excluded_by.is_none()
    }
}

/// Result of a full matching pass.
#[derive(Debug, Clone, Serialize)]
pub struct Selection {
    /// Selected files in discovery order.
    pub files: Vec<Candidate>,
    /// Arguments that never decided anything.
    pub unmatched: Unmatched,
}

/// Concatenated file contents ready for the clipboard.
#[derive(Debug, Clone, Default)]
pub struct Aggregate {
    /// `(display path, content)` for every file whose content was read.
    pub entries: Vec<(String, String)>,
    pub text: String,
    pub file_count: usize,
    /// Unicode scalar values in `text`.
    pub char_count: usize,
}
