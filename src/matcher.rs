//! Include/exclude decision for each candidate.
//!
//! Inclusion tries every include glob first and only falls back to reading the
//! file header when no glob matched and include tags exist. Files that pass are
//! then checked against exclude globs and, if needed, exclude tags, reusing the
//! header already read during inclusion.
//!
//! A tag `T` matches a header line containing `tags:` followed later on the
//! same line by `#T` with a word boundary after it, so `#front` does not match
//! a file tagged `#frontend`.

use crate::args::{ArgKind, ArgumentSet, Unmatched};
use crate::error::ClipError;
use crate::options::DEFAULT_HEADER_LINES;
use crate::types::{Candidate, HeaderSnippet, MatchResult, Rule, Selection};
use globset::{Glob, GlobMatcher};
use regex::Regex;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::{debug, warn};

struct PatternRule {
    source: String,
    matcher: GlobMatcher,
}

impl PatternRule {
    fn new(source: &str) -> Result<Self, ClipError> {
        let matcher = Glob::new(source)
            .map_err(|e| ClipError::Pattern {
                pattern: source.to_string(),
                source: e,
            })?
            .compile_matcher();
        Ok(Self {
            source: source.to_string(),
            matcher,
        })
    }

    fn is_match(&self, candidate: &Candidate) -> bool {
        self.matcher.is_match(candidate.display()) || self.matcher.is_match(&candidate.rel)
    }
}

struct TagRule {
    tag: String,
    regex: Regex,
}

impl TagRule {
    fn new(tag: &str) -> Result<Self, ClipError> {
        let regex = Regex::new(&format!(r"tags:.*#{}\b", regex::escape(tag))).map_err(|e| {
            ClipError::Tag {
                tag: tag.to_string(),
                source: e,
            }
        })?;
        Ok(Self {
            tag: tag.to_string(),
            regex,
        })
    }

    fn is_match(&self, header: &HeaderSnippet) -> bool {
        self.regex.is_match(header.as_str())
    }
}

/// Compiled include/exclude arguments.
pub struct Selector {
    include_patterns: Vec<PatternRule>,
    include_tags: Vec<TagRule>,
    exclude_patterns: Vec<PatternRule>,
    exclude_tags: Vec<TagRule>,
    args: ArgumentSet,
    header_lines: usize,
}

impl Selector {
    /// Compiles every glob and tag in `args`.
    ///
    /// # Errors
    ///
    /// Returns [`ClipError::Pattern`] for a glob that does not parse.
    pub fn new(args: &ArgumentSet) -> Result<Self, ClipError> {
        let patterns = |v: &[String]| -> Result<Vec<PatternRule>, ClipError> {
            v.iter().map(|p| PatternRule::new(p)).collect()
        };
        let tags = |v: &[String]| -> Result<Vec<TagRule>, ClipError> {
            v.iter().map(|t| TagRule::new(t)).collect()
        };
        Ok(Self {
            include_patterns: patterns(&args.include_patterns)?,
            include_tags: tags(&args.include_tags)?,
            exclude_patterns: patterns(&args.exclude_patterns)?,
            exclude_tags: tags(&args.exclude_tags)?,
            args: args.clone(),
            header_lines: DEFAULT_HEADER_LINES,
        })
    }

    pub fn header_lines(mut self, lines: usize) -> Self {
        self.header_lines = lines;
        self
    }

    /// Runs the matching pass over `candidates`, keeping discovery order.
    pub fn select(&self, candidates: &[Candidate]) -> Selection {
        let mut unmatched = self.args.unmatched();
        let files = candidates
            .iter()
            .filter(|c| self.match_candidate(c, &mut unmatched).is_selected())
            .cloned()
            .collect();
        Selection { files, unmatched }
    }

    /// Decides one candidate, crediting whichever argument made the decision.
    pub fn match_candidate(&self, candidate: &Candidate, unmatched: &mut Unmatched) -> MatchResult {
        let mut header: Option<HeaderSnippet> = None;

        let matched_by = if let Some(rule) =
            self.include_patterns.iter().find(|r| r.is_match(candidate))
        {
            unmatched.mark(ArgKind::IncludePattern, &rule.source);
            Rule::Pattern(rule.source.clone())
        } else if !self.include_tags.is_empty() {
            let snippet = match read_header(&candidate.path, self.header_lines) {
                Ok(s) => &*header.insert(s),
                Err(e) => {
                    warn!("{}", e);
                    return MatchResult::rejected();
                }
            };
            match self.include_tags.iter().find(|t| t.is_match(snippet)) {
                Some(tag) => {
                    unmatched.mark(ArgKind::IncludeTag, &tag.tag);
                    Rule::Tag(tag.tag.clone())
                }
                None => return MatchResult::rejected(),
            }
        } else {
            return MatchResult::rejected();
        };

        let excluded_by = self.exclusion(candidate, header, unmatched);
        debug!(
            "{}: included by {:?}, excluded by {:?}",
            candidate.rel, matched_by, excluded_by
        );
        MatchResult {
            included: true,
            matched_by: Some(matched_by),
            excluded_by,
        }
    }

    fn exclusion(
        &self,
        candidate: &Candidate,
        header: Option<HeaderSnippet>,
        unmatched: &mut Unmatched,
    ) -> Option<Rule> {
        if let Some(rule) = self.exclude_patterns.iter().find(|r| r.is_match(candidate)) {
            unmatched.mark(ArgKind::ExcludePattern, &rule.source);
            return Some(Rule::Pattern(rule.source.clone()));
        }
        if self.exclude_tags.is_empty() {
            return None;
        }
        // An unreadable header cannot carry an exclusion tag; the file stays in.
        let header = match header {
            Some(h) => h,
            None => match read_header(&candidate.path, self.header_lines) {
                Ok(h) => h,
                Err(e) => {
                    warn!("{}", e);
                    return None;
                }
            },
        };
        let tag = self.exclude_tags.iter().find(|t| t.is_match(&header))?;
        unmatched.mark(ArgKind::ExcludeTag, &tag.tag);
        Some(Rule::Tag(tag.tag.clone()))
    }
}

/// Reads at most `lines` lines from the start of `path`, replacing invalid
/// UTF-8. The file is closed before returning.
pub fn read_header(path: &Path, lines: usize) -> Result<HeaderSnippet, ClipError> {
    let file = File::open(path).map_err(|e| ClipError::io(path, e))?;
    let mut reader = BufReader::new(file);
    let mut buf = Vec::new();
    for _ in 0..lines {
        let n = reader
            .read_until(b'\n', &mut buf)
            .map_err(|e| ClipError::io(path, e))?;
        if n == 0 {
            break;
        }
    }
    Ok(HeaderSnippet(String::from_utf8_lossy(&buf).into_owned()))
}

/// Classifies `args`, compiles them and runs the matching pass.
///
/// # Errors
///
/// [`ClipError::EmptyArguments`] if `args` is empty, otherwise any compile
/// error from [`Selector::new`].
pub fn select<S: AsRef<str>>(
    args: &[S],
    candidates: &[Candidate],
    header_lines: usize,
) -> Result<Selection, ClipError> {
    if args.is_empty() {
        return Err(ClipError::EmptyArguments);
    }
    let args = ArgumentSet::classify(args);
    let selector = Selector::new(&args)?.header_lines(header_lines);
    Ok(selector.select(candidates))
}
