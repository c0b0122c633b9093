//! I/O error types.

use thiserror::Error;

/// Result type for I/O operations.
pub type Result<T> = std::result::Result<T, Error>;

/// I/O error types.
#[derive(Error, Debug)]
pub enum Error {
    /// File I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The binary file could not be decoded.
    #[error("decode error: {0}")]
    Binary(#[from] sdi_binary::Error),

    /// The decoded traces could not be normalized or grouped.
    #[error("core error: {0}")]
    Core(#[from] sdi_core::Error),

    /// Invalid read configuration.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// A line of a text collaborator file could not be parsed.
    #[error("line {line}: {message}")]
    TextFormat { line: usize, message: String },

    /// A text file names a unit this reader does not support.
    #[error("unsupported unit name {0:?}")]
    UnsupportedUnitName(String),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::Config(err.to_string())
    }
}
