//! Splits selector arguments into include/exclude globs and tags.

use serde::Serialize;

/// Which of the four bags an argument landed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ArgKind {
    IncludePattern,
    IncludeTag,
    ExcludePattern,
    ExcludeTag,
}

/// Classified selector arguments, each bag in argument order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ArgumentSet {
    pub include_patterns: Vec<String>,
    pub include_tags: Vec<String>,
    pub exclude_patterns: Vec<String>,
    pub exclude_tags: Vec<String>,
}

impl ArgumentSet {
    /// Classifies raw arguments:
    ///
    /// - `-+tag` excludes files tagged `#tag`
    /// - `-glob` excludes files matching `glob`
    /// - `+tag` includes files tagged `#tag`
    /// - anything else is an include glob; without a `*` it becomes `*/<arg>`
    ///   so a bare file name matches at any depth.
    pub fn classify<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = Self::default();
        for arg in args {
            let (kind, value) = classify_one(arg.as_ref());
            set.bag_mut(kind).push(value);
        }
        set
    }

    pub fn bag(&self, kind: ArgKind) -> &[String] {
        match kind {
            ArgKind::IncludePattern => &self.include_patterns,
            ArgKind::IncludeTag => &self.include_tags,
            ArgKind::ExcludePattern => &self.exclude_patterns,
            ArgKind::ExcludeTag => &self.exclude_tags,
        }
    }

    fn bag_mut(&mut self, kind: ArgKind) -> &mut Vec<String> {
        match kind {
            ArgKind::IncludePattern => &mut self.include_patterns,
            ArgKind::IncludeTag => &mut self.include_tags,
            ArgKind::ExcludePattern => &mut self.exclude_patterns,
            ArgKind::ExcludeTag => &mut self.exclude_tags,
        }
    }

    /// True when nothing could ever include a file.
    pub fn has_no_inclusions(&self) -> bool {
        self.include_patterns.is_empty() && self.include_tags.is_empty()
    }

    /// Fresh mirror of every bag, for tracking arguments that matched nothing.
    pub fn unmatched(&self) -> Unmatched {
        Unmatched {
            remaining: self.clone(),
        }
    }
}

/// Classifies one argument, returning its bag and the stripped value.
pub fn classify_one(arg: &str) -> (ArgKind, String) {
    if let Some(rest) = arg.strip_prefix('-') {
        match rest.strip_prefix('+') {
            Some(tag) => (ArgKind::ExcludeTag, tag.to_string()),
            None => (ArgKind::ExcludePattern, rest.to_string()),
        }
    } else if let Some(tag) = arg.strip_prefix('+') {
        (ArgKind::IncludeTag, tag.to_string())
    } else if arg.contains('*') {
        (ArgKind::IncludePattern, arg.to_string())
    } else {
        (ArgKind::IncludePattern, format!("*/{arg}"))
    }
}

/// Arguments that have not yet contributed to any decision. Only ever shrinks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Unmatched {
    remaining: ArgumentSet,
}

impl Unmatched {
    /// Credits `value` in the `kind` bag. Removing an entry that is already
    /// gone does nothing.
    pub fn mark(&mut self, kind: ArgKind, value: &str) {
        let bag = self.remaining.bag_mut(kind);
        if let Some(pos) = bag.iter().position(|v| v == value) {
            bag.remove(pos);
        }
    }

    pub fn get(&self, kind: ArgKind) -> &[String] {
        self.remaining.bag(kind)
    }

    pub fn is_empty(&self) -> bool {
        [
            ArgKind::IncludePattern,
            ArgKind::IncludeTag,
            ArgKind::ExcludePattern,
            ArgKind::ExcludeTag,
        ]
        .iter()
        .all(|kind| self.get(*kind).is_empty())
    }

    /// One warning line per leftover argument, written back in the syntax the
    /// user typed it in.
    pub fn warnings(&self) -> Vec<String> {
        let mut lines = Vec::new();
        for p in self.get(ArgKind::IncludePattern) {
            lines.push(format!("Unmatched inclusion pattern: {p}"));
        }
        for t in self.get(ArgKind::IncludeTag) {
            lines.push(format!("Unmatched inclusion tag: +{t}"));
        }
        for p in self.get(ArgKind::ExcludePattern) {
            lines.push(format!("Unmatched exclusion pattern: {p}"));
        }
        for t in self.get(ArgKind::ExcludeTag) {
            lines.push(format!("Unmatched exclusion tag: -+{t}"));
        }
        lines
    }
}
