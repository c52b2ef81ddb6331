//! Zip snapshot of every non-ignored file under a root.

use crate::error::ClipError;
use crate::options::SelectOptions;
use crate::walk::candidates;
use chrono::{DateTime, TimeZone};
use std::fmt::Display;
use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

/// What [`create_archive`] produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveSummary {
    pub path: PathBuf,
    /// Top-level folder inside the archive.
    pub base_name: String,
    pub file_count: usize,
}

/// `<base>-YYYY-MM-DD-HH-MM-SS.zip`
pub fn archive_file_name<Tz>(base_name: &str, now: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    format!("{}-{}.zip", base_name, now.format("%Y-%m-%d-%H-%M-%S"))
}

/// Writes a deflate-compressed archive of `options.root` into `output_dir`
/// (the root itself when `None`). Entries live under a folder named after the
/// root directory; the archive never contains itself.
///
/// Files that cannot be read are logged and left out.
///
/// # Errors
///
/// Fails if the archive cannot be created or written, or if the root's
/// `.gitignore` exists but cannot be read.
pub fn create_archive<Tz>(
    options: &SelectOptions,
    output_dir: Option<&Path>,
    now: &DateTime<Tz>,
) -> Result<ArchiveSummary, ClipError>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    // Canonical so a root like `proj/sub/..` still names the archive after `proj`.
    let root = fs::canonicalize(&options.root).map_err(|e| ClipError::io(&options.root, e))?;
    let base_name = root
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "archive".to_string());
    let archive_path = output_dir
        .unwrap_or(&root)
        .join(archive_file_name(&base_name, now));

    let file = File::create(&archive_path).map_err(|e| ClipError::io(&archive_path, e))?;
    let mut zip = ZipWriter::new(file);
    let entry_options =
        SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    let mut walk_options = options.clone();
    walk_options.root = root;
    walk_options.exclude_path = Some(archive_path.clone());

    let mut file_count = 0;
    for candidate in candidates(&walk_options)? {
        let mut source = match File::open(&candidate.path) {
            Ok(f) => f,
            Err(e) => {
                warn!("{}", ClipError::io(&candidate.path, e));
                continue;
            }
        };
        let name = format!("{}/{}", base_name, candidate.rel);
        debug!("adding {}", name);
        zip.start_file(name, entry_options)?;
        io::copy(&mut source, &mut zip).map_err(|e| ClipError::io(&candidate.path, e))?;
        file_count += 1;
    }
    zip.finish()?;

    Ok(ArchiveSummary {
        path: archive_path,
        base_name,
        file_count,
    })
}
