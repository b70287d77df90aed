//! Logging setup.
//!
//! The terminal belongs to the UI, so log records go to a file. `RUST_LOG`
//! overrides the verbosity chosen on the command line.

use std::fs::{self, File, OpenOptions};
use std::path::Path;
use std::sync::Mutex;

use tracing::Level;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::error::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Verbosity {
    /// Errors only.
    Quiet,
    #[default]
    Normal,
    Verbose,
    Trace,
}

impl Verbosity {
    #[must_use]
    pub fn to_level(&self) -> Level {
        match self {
            Self::Quiet => Level::ERROR,
            Self::Normal => Level::INFO,
            Self::Verbose => Level::DEBUG,
            Self::Trace => Level::TRACE,
        }
    }
}

/// Opens `path` for appending, creating parent directories as needed.
///
/// # Errors
///
/// Returns [`Error::LogFile`] if the directory or file cannot be created.
pub fn open_log_file(path: &Path) -> Result<File> {
    let to_err = |source: std::io::Error| Error::LogFile { path: path.to_path_buf(), source };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(to_err)?;
    }
    OpenOptions::new().create(true).append(true).open(path).map_err(to_err)
}

/// Installs the global subscriber writing to `log_path`.
///
/// If the file cannot be opened, records are discarded; they are never
/// written to the terminal. Calling this twice keeps the first subscriber.
pub fn init_logging(verbosity: Verbosity, log_path: &Path) {
    let default_filter = format!("ambucheck={}", verbosity.to_level());
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&default_filter));

    let writer = open_log_file(log_path).ok();
    let enabled = writer.is_some();

    let layer = writer.map(|file| {
        fmt::layer()
            .with_ansi(false)
            .with_target(true)
            .with_writer(Mutex::new(file))
    });

    let _ = tracing_subscriber::registry().with(env_filter).with(layer).try_init();

    if enabled {
        tracing::info!(path = %log_path.display(), "logging initialized");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbosity_to_level() {
        assert_eq!(Verbosity::Quiet.to_level(), Level::ERROR);
        assert_eq!(Verbosity::Normal.to_level(), Level::INFO);
        assert_eq!(Verbosity::Verbose.to_level(), Level::DEBUG);
        assert_eq!(Verbosity::Trace.to_level(), Level::TRACE);
        assert_eq!(Verbosity::default(), Verbosity::Normal);
    }

    #[test]
    fn test_open_log_file_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("logs").join("ambucheck.log");
        open_log_file(&path).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_open_log_file_reports_path_on_failure() {
        let dir = tempfile::tempdir().unwrap();
        // A directory cannot be opened as a log file.
        let result = open_log_file(dir.path());
        assert!(matches!(result, Err(Error::LogFile { ref path, .. }) if path == dir.path()));
    }

    #[test]
    fn test_init_logging_does_not_panic() {
        let dir = tempfile::tempdir().unwrap();
        init_logging(Verbosity::Verbose, &dir.path().join("test.log"));
        init_logging(Verbosity::Quiet, &dir.path().join("test.log"));
    }
}
