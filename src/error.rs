use std::path::PathBuf;
use thiserror::Error;
#[derive(Debug, Error)]
pub enum ClipError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Error reading {path}: {source}")]
    IgnoreFile {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Invalid glob pattern '{pattern}': {source}")]
    Pattern {
        pattern: String,
        source: globset::Error,
    },
    #[error("Invalid tag '{tag}': {source}")]
    Tag { tag: String, source: regex::Error },
    #[error("Walk error: {0}")]
    Walk(String),
    #[error("No patterns or tags given")]
    EmptyArguments,
    #[error("Error copying to clipboard: {0}")]
    Clipboard(String),
    #[error("Archive error: {0}")]
    Archive(#[from] zip::result::ZipError),
}
impl ClipError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ClipError::Io {
            path: path.into(),
            source,
        }
    }
}
