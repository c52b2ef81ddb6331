//! Compiles `.gitignore` lines into an ordered rule set.
//!
//! Each raw line goes through [`normalize_ignore_line`], which rewrites it into a
//! glob with git's placement rules made explicit:
//!
//! - a pattern without any inner `/` (and no leading `/`) is prefixed with `**/`
//!   so it matches at any depth,
//! - a leading `/` anchors the pattern at the root and is dropped,
//! - a trailing `/` marks a directory rule and gets `**` appended so everything
//!   beneath the directory is covered too,
//! - a leading `!` is remembered and re-applied as negation.
//!
//! [`IgnoreRules`] evaluates the compiled globs in file order; the last matching
//! rule decides, so a later `!pattern` un-ignores what an earlier one ignored.

use crate::error::ClipError;
use crate::options::IGNORE_FILE_NAME;
use globset::{GlobBuilder, GlobSet, GlobSetBuilder};
use std::fmt;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use tracing::{debug, warn};

/// One normalized ignore rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledPattern {
    /// The rewritten glob, without the negation marker.
    pub glob: String,
    pub negated: bool,
    pub dir_only: bool,
}

impl CompiledPattern {
    /// Glob that matches the directory itself rather than its contents.
    fn dir_glob(&self) -> Option<&str> {
        if self.dir_only {
            self.glob.strip_suffix("/**")
        } else {
            None
        }
    }
}

impl fmt::Display for CompiledPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.negated {
            write!(f, "!{}", self.glob)
        } else {
            f.write_str(&self.glob)
        }
    }
}

/// Rewrites a single `.gitignore` line. Returns `None` for blank lines,
/// comments and lines that carry no pattern once their markers are removed.
pub fn normalize_ignore_line(line: &str) -> Option<CompiledPattern> {
    let line = line.trim_end();
    if line.is_empty() || line.trim_start().starts_with('#') {
        return None;
    }

    let (negated, line) = match line.strip_prefix('!') {
        Some(rest) => (true, rest),
        None => (false, line),
    };
    let (anchored, line) = match line.strip_prefix('/') {
        Some(rest) => (true, rest),
        None => (false, line),
    };
    let dir_only = line.ends_with('/');
    let body = line.strip_suffix('/').unwrap_or(line);
    if body.is_empty() {
        return None;
    }

    let mut glob = String::with_capacity(line.len() + 5);
    if !anchored && !body.contains('/') {
        glob.push_str("**/");
    }
    glob.push_str(line);
    if dir_only {
        glob.push_str("**");
    }

    Some(CompiledPattern {
        glob,
        negated,
        dir_only,
    })
}

/// Ordered, read-only ignore rule set with last-match-wins evaluation.
#[derive(Debug, Clone)]
pub struct IgnoreRules {
    patterns: Vec<CompiledPattern>,
    set: GlobSet,
    dir_set: GlobSet,
    // dir_set index -> patterns index
    dir_index: Vec<usize>,
}

impl Default for IgnoreRules {
    fn default() -> Self {
        Self::empty()
    }
}

impl IgnoreRules {
    pub fn empty() -> Self {
        Self {
            patterns: Vec::new(),
            set: GlobSet::empty(),
            dir_set: GlobSet::empty(),
            dir_index: Vec::new(),
        }
    }

    /// Reads `<root>/.gitignore`. A missing file yields an empty rule set; a file
    /// that exists but cannot be read is an error.
    pub fn load(root: &Path) -> Result<Self, ClipError> {
        let path = root.join(IGNORE_FILE_NAME);
        match fs::read_to_string(&path) {
            Ok(text) => Ok(Self::from_lines(text.lines())),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("no ignore file at {}", path.display());
                Ok(Self::empty())
            }
            Err(source) => Err(ClipError::IgnoreFile { path, source }),
        }
    }

    /// Compiles the given lines. If any rewritten glob fails to compile the
    /// whole set is dropped with a warning and nothing is ignored.
    pub fn from_lines<'a>(lines: impl IntoIterator<Item = &'a str>) -> Self {
        let patterns: Vec<CompiledPattern> =
            lines.into_iter().filter_map(normalize_ignore_line).collect();
        match Self::compile(patterns) {
            Ok(rules) => rules,
            Err(e) => {
                warn!("Could not compile .gitignore rules, ignoring none: {}", e);
                Self::empty()
            }
        }
    }

    fn compile(patterns: Vec<CompiledPattern>) -> Result<Self, ClipError> {
        let mut set = GlobSetBuilder::new();
        let mut dir_set = GlobSetBuilder::new();
        let mut dir_index = Vec::new();
        for (idx, pattern) in patterns.iter().enumerate() {
            set.add(build_glob(&pattern.glob)?);
            if let Some(dir_glob) = pattern.dir_glob() {
                dir_set.add(build_glob(dir_glob)?);
                dir_index.push(idx);
            }
        }
        let set = set.build().map_err(|source| ClipError::Pattern {
            pattern: "<ignore set>".to_string(),
            source,
        })?;
        let dir_set = dir_set.build().map_err(|source| ClipError::Pattern {
            pattern: "<ignore set>".to_string(),
            source,
        })?;
        Ok(Self {
            patterns,
            set,
            dir_set,
            dir_index,
        })
    }

    pub fn patterns(&self) -> &[CompiledPattern] {
        &self.patterns
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Whether a file at `rel_path` (forward slashes, relative to the root) is
    /// ignored, either by itself or because one of its parent directories is.
    /// A negation cannot re-include a file below an ignored directory.
    pub fn matches(&self, rel_path: &str) -> bool {
        let mut end = 0;
        while let Some(pos) = rel_path[end..].find('/') {
            end += pos;
            if self.is_ignored(&rel_path[..end], true) {
                return true;
            }
            end += 1;
        }
        self.is_ignored(rel_path, false)
    }

    /// Whether `rel_path` is ignored; directory rules also match the
    /// directory itself when `is_dir` is set.
    pub fn is_ignored(&self, rel_path: &str, is_dir: bool) -> bool {
        if self.patterns.is_empty() {
            return false;
        }
        let mut last = self.set.matches(rel_path).into_iter().max();
        if is_dir {
            let dir_last = self
                .dir_set
                .matches(rel_path)
                .into_iter()
                .map(|i| self.dir_index[i])
                .max();
            last = last.max(dir_last);
        }
        last.is_some_and(|idx| !self.patterns[idx].negated)
    }
}

fn build_glob(glob: &str) -> Result<globset::Glob, ClipError> {
    GlobBuilder::new(glob)
        .literal_separator(true)
        .build()
        .map_err(|source| ClipError::Pattern {
            pattern: glob.to_string(),
            source,
        })
}
