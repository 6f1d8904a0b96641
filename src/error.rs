//! Error types for levelbloom.

use std::io;
use thiserror::Error;

/// The result type used throughout levelbloom.
pub type Result<T> = std::result::Result<T, Error>;

/// The error type for filter configuration and construction.
///
/// Filter queries never fail; a malformed blob is answered with a boolean
/// like any other blob.
#[derive(Debug, Error)]
pub enum Error {
    /// An I/O error occurred while loading options.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// An invalid argument was provided.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Options could not be serialized or deserialized.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl Error {
    /// Creates a new invalid argument error.
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Error::InvalidArgument(msg.into())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}
