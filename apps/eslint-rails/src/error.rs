//! Crate-wide error type.
//!
//! Every failure is fatal for the current run: there is no per-file
//! isolation and no retry. The binary maps any `Error` to exit code 2.

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to access '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid configuration in '{}': {message}", path.display())]
    Config { path: PathBuf, message: String },

    #[error("asset '{name}' was not found in any load path")]
    AssetNotFound { name: String },

    #[error("ESLint evaluation failed: {message}")]
    Engine { message: String },

    #[error("unexpected ESLint response: {message}")]
    Response { message: String },

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error("invalid exclusion pattern: {0}")]
    Pattern(#[from] regex::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }
}
