//! Startup error types for ambucheck.
//!
//! Errors raised while the wizard is running live in [`crate::domain::errors`]
//! and are always recoverable. The ones here can stop the program before the
//! terminal is taken over.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// Failed to load configuration.
    #[error("failed to load configuration: {0}")]
    ConfigLoad(Box<figment::Error>),

    /// Configuration validation failed.
    #[error("invalid configuration: {message}")]
    ConfigValidation { message: String },

    /// The HTTP client could not be built.
    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),

    /// Failed to open or create the log file.
    #[error("failed to open log file {path}: {source}")]
    LogFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Self::ConfigLoad(Box::new(err))
    }
}

impl Error {
    #[must_use]
    pub fn config_validation(message: impl Into<String>) -> Self {
        Self::ConfigValidation { message: message.into() }
    }
}
