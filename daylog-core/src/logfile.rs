//! Local log-file resolution.
//!
//! A day's log lives in the log directory under the dated name
//! `{YYYY.MM.DD}.md`. When the dated file is missing, the most recently
//! modified `*.md` file in the directory is used instead.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use chrono::NaiveDate;
use tracing::{debug, info};

#[derive(Debug)]
pub enum ResolveError {
    Io(std::io::Error),
    /// No dated file and no `*.md` fallback in the directory; carries the
    /// path that was expected for the requested date.
    NoLogFound { expected: PathBuf },
}

impl From<std::io::Error> for ResolveError {
    fn from(e: std::io::Error) -> Self {
        ResolveError::Io(e)
    }
}

impl std::fmt::Display for ResolveError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResolveError::Io(e) => write!(f, "log directory error: {e}"),
            ResolveError::NoLogFound { expected } => {
                write!(f, "no local log file found: expected {}", expected.display())
            }
        }
    }
}

impl std::error::Error for ResolveError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ResolveError::Io(e) => Some(e),
            ResolveError::NoLogFound { .. } => None,
        }
    }
}

/// File name convention for a day's log inside the log directory.
pub fn dated_file_name(date: NaiveDate) -> String {
    format!("{}.md", date.format("%Y.%m.%d"))
}

/// Resolve the log file to upload: `{YYYY.MM.DD}.md` under `base_dir` when
/// present, otherwise the most recently modified `*.md` in `base_dir`.
/// The returned path is guaranteed to exist.
pub fn resolve_log_file(base_dir: &Path, date: NaiveDate) -> Result<PathBuf, ResolveError> {
    let expected = base_dir.join(dated_file_name(date));
    if expected.is_file() {
        debug!(path = %expected.display(), "Dated log file present");
        return Ok(expected);
    }

    let mut newest: Option<(SystemTime, PathBuf)> = None;
    for entry in fs::read_dir(base_dir)? {
        let entry = entry?;
        let path = entry.path();
        if !path.is_file() || path.extension().and_then(|e| e.to_str()) != Some("md") {
            continue;
        }
        let modified = entry.metadata()?.modified()?;
        let is_newer = match &newest {
            Some((best, _)) => modified > *best,
            None => true,
        };
        if is_newer {
            newest = Some((modified, path));
        }
    }

    match newest {
        Some((_, path)) => {
            info!(path = %path.display(), "Dated log file missing, using most recent log");
            Ok(path)
        }
        None => Err(ResolveError::NoLogFound { expected }),
    }
}

/// Read the selected log file as UTF-8 text.
pub fn read_log(path: &Path) -> Result<String, ResolveError> {
    let content = fs::read_to_string(path)?;
    debug!(path = %path.display(), bytes = content.len(), "Read local log file");
    Ok(content)
}
