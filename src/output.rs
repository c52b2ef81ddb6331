//! Aggregation of selected files and hand-off to the clipboard.
//!
//! Files are concatenated in selection order, each optionally preceded by a
//! `===== <path> =====` header line and always followed by a newline.

use crate::error::ClipError;
use crate::types::{Aggregate, Candidate, Selection};
use std::fs;
use tracing::warn;

/// Destination for the aggregated text.
pub trait Clipboard {
    fn set_text(&mut self, text: &str) -> Result<(), ClipError>;
}

/// Set in the environment of the helper process that keeps the clipboard
/// selection alive after `clip-files` exits.
pub const CLIPBOARD_DAEMON_ENV: &str = "CLIPSEL_CLIPBOARD_DAEMON";

/// The system clipboard, through `arboard`.
///
/// On Linux the selection is owned by the process that set it, so the text is
/// piped to a copy of the current executable started with
/// [`CLIPBOARD_DAEMON_ENV`]; that process serves the selection until another
/// program takes it over (see [`run_clipboard_daemon_if_requested`]).
#[cfg(feature = "clipboard")]
pub struct SystemClipboard {
    #[cfg_attr(target_os = "linux", allow(dead_code))]
    inner: arboard::Clipboard,
}

#[cfg(feature = "clipboard")]
impl SystemClipboard {
    pub fn new() -> Result<Self, ClipError> {
        let inner = arboard::Clipboard::new().map_err(|e| ClipError::Clipboard(e.to_string()))?;
        Ok(Self { inner })
    }
}

#[cfg(all(feature = "clipboard", not(target_os = "linux")))]
impl Clipboard for SystemClipboard {
    fn set_text(&mut self, text: &str) -> Result<(), ClipError> {
        self.inner
            .set_text(text)
            .map_err(|e| ClipError::Clipboard(e.to_string()))
    }
}

#[cfg(all(feature = "clipboard", target_os = "linux"))]
impl Clipboard for SystemClipboard {
    fn set_text(&mut self, text: &str) -> Result<(), ClipError> {
        use std::io::Write;
        use std::process::{Command, Stdio};

        let clipboard_err = |e: std::io::Error| ClipError::Clipboard(e.to_string());
        let exe = std::env::current_exe().map_err(clipboard_err)?;
        let mut child = Command::new(exe)
            .env(CLIPBOARD_DAEMON_ENV, "1")
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(clipboard_err)?;
        let mut stdin = child
            .stdin
            .take()
            .ok_or_else(|| ClipError::Clipboard("clipboard helper has no stdin".to_string()))?;
        stdin.write_all(text.as_bytes()).map_err(clipboard_err)?;
        // Closing stdin lets the helper start serving the selection.
        drop(stdin);
        Ok(())
    }
}

/// Runs the clipboard holder when this process was started as one.
///
/// Returns `Ok(false)` in a normal invocation. In the helper it reads the text
/// from stdin, takes the clipboard and blocks until another program replaces
/// the selection, then returns `Ok(true)`; the caller should exit.
pub fn run_clipboard_daemon_if_requested() -> Result<bool, ClipError> {
    if std::env::var_os(CLIPBOARD_DAEMON_ENV).is_none() {
        return Ok(false);
    }
    hold_clipboard()?;
    Ok(true)
}

#[cfg(all(feature = "clipboard", target_os = "linux"))]
fn hold_clipboard() -> Result<(), ClipError> {
    use arboard::SetExtLinux;
    use std::io::Read;

    let mut text = String::new();
    std::io::stdin()
        .read_to_string(&mut text)
        .map_err(|e| ClipError::Clipboard(e.to_string()))?;
    let mut clipboard =
        arboard::Clipboard::new().map_err(|e| ClipError::Clipboard(e.to_string()))?;
    clipboard
        .set()
        .wait()
        .text(text)
        .map_err(|e| ClipError::Clipboard(e.to_string()))
}

#[cfg(not(all(feature = "clipboard", target_os = "linux")))]
fn hold_clipboard() -> Result<(), ClipError> {
    Err(ClipError::Clipboard(
        "clipboard holder is only used on Linux".to_string(),
    ))
}

/// Header line written before each file's content.
pub fn file_header(display_path: &str) -> String {
    format!("===== {} =====\n", display_path)
}

/// Concatenates `files`, calling `on_file` before each one is read.
///
/// Unreadable files are logged; their header (if any) stays in the output and
/// they still count towards `file_count`.
pub fn aggregate(
    files: &[Candidate],
    headers: bool,
    mut on_file: impl FnMut(&Candidate),
) -> Aggregate {
    let mut out = Aggregate::default();
    for file in files {
        on_file(file);
        out.file_count += 1;
        let display = file.display();
        if headers {
            out.text.push_str(&file_header(&display));
        }
        match fs::read(&file.path) {
            Ok(bytes) => {
                let content = String::from_utf8_lossy(&bytes).into_owned();
                out.text.push_str(&content);
                out.text.push('\n');
                out.entries.push((display, content));
            }
            Err(e) => warn!("{}", ClipError::io(&file.path, e)),
        }
    }
    out.char_count = out.text.chars().count();
    out
}

/// Hands the aggregate to `clipboard`. Failures are logged and returned, never
/// raised further than the caller chooses.
pub fn deliver(aggregate: &Aggregate, clipboard: &mut dyn Clipboard) -> Result<(), ClipError> {
    clipboard.set_text(&aggregate.text).inspect_err(|e| warn!("{}", e))
}

/// Serializes a selection report for `--dry-run`.
pub fn format_json(selection: &Selection, pretty: bool) -> Result<String, serde_json::Error> {
    if pretty {
        serde_json::to_string_pretty(selection)
    } else {
        serde_json::to_string(selection)
    }
}
