//! Errors that can occur when reading or writing configuration.

use std::path::PathBuf;

/// The errors that can be thrown when parsing the configuration.
#[derive(Debug, thiserror::Error)]
pub enum ParseConfigurationError {
    #[error("parse error on {}:{line}:{column}: {message}", file_path.display())]
    ParseError {
        file_path: PathBuf,
        line: usize,
        column: usize,
        message: String,
    },
    #[error("I/O error reading {}: {inner}", file_path.display())]
    IoError {
        file_path: PathBuf,
        inner: std::io::Error,
    },
}

/// The errors that can be thrown when writing the configuration.
#[derive(Debug, thiserror::Error)]
pub enum WriteParsedConfigurationError {
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("unable to serialize: {0}")]
    SerializeError(#[from] serde_json::Error),
}
