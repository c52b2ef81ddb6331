use crate::error::ClipError;
use crate::ignore_rules::IgnoreRules;
use crate::options::SelectOptions;
use crate::types::Candidate;
use ignore::WalkBuilder;
use std::path::{self, Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, warn};
struct Walker {
    inner: ignore::Walk,
    root: PathBuf,
    exclude_path: Option<PathBuf>,
}
impl Walker {
    fn new(options: &SelectOptions) -> Result<Self, ClipError> {
        let root = path::absolute(&options.root).map_err(|e| ClipError::io(&options.root, e))?;
        let rules = if options.respect_gitignore {
            IgnoreRules::load(&root)?
        } else {
            IgnoreRules::empty()
        };
        debug!(
            "walking {} with {} ignore rules",
            root.display(),
            rules.patterns().len()
        );
        let mut builder = WalkBuilder::new(&root);
        builder
            .standard_filters(false)
            .hidden(!options.include_hidden)
            .follow_links(options.follow_links)
            .sort_by_file_name(|a, b| a.cmp(b));
        if !rules.is_empty() {
            let rules = Arc::new(rules);
            let filter_root = root.clone();
            builder.filter_entry(move |entry| {
                if entry.depth() == 0 {
                    return true;
                }
                let rel = relative_slash_path(&filter_root, entry.path());
                let is_dir = entry.file_type().is_some_and(|t| t.is_dir());
                let ignored = rules.is_ignored(&rel, is_dir);
                if ignored {
                    debug!("ignored: {}", rel);
                }
                !ignored
            });
        }
        let exclude_path = match &options.exclude_path {
            Some(p) => Some(path::absolute(p).map_err(|e| ClipError::io(p, e))?),
            None => None,
        };
        Ok(Self {
            inner: builder.build(),
            root,
            exclude_path,
        })
    }
    fn collect_candidates(self) -> Vec<Candidate> {
        let Self {
            inner,
            root,
            exclude_path,
        } = self;
        inner
            .filter_map(|result| match result {
                Ok(entry) => Some(entry.into_path()),
                Err(e) => {
                    warn!("{}", ClipError::Walk(e.to_string()));
                    None
                }
            })
            .filter(|p| p.is_file())
            .filter(|p| match &exclude_path {
                Some(excluded) if p == excluded => {
                    debug!("skipping output file {}", p.display());
                    false
                }
                _ => true,
            })
            .map(|path| Candidate {
                rel: relative_slash_path(&root, &path),
                path,
            })
            .collect()
    }
}

/// `path` relative to `root`, joined with `/` whatever the platform separator.
pub fn relative_slash_path(root: &Path, path: &Path) -> String {
    let rel = path.strip_prefix(root).unwrap_or(path);
    rel.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

/// Walks `options.root` and returns every regular file not pruned by the
/// root `.gitignore`, in file-name order per directory.
///
/// Ignored directories are never descended into. Unreadable entries are
/// logged and skipped.
///
/// # Errors
///
/// Fails if the root cannot be resolved or an existing `.gitignore` cannot
/// be read.
pub fn candidates(options: &SelectOptions) -> Result<Vec<Candidate>, ClipError> {
    let walker = Walker::new(options)?;
    Ok(walker.collect_candidates())
}
