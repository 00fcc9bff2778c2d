//! Errors raised while reading or writing seamline files.

use thiserror::Error;

/// Errors that can occur during file I/O.
#[derive(Debug, Error)]
pub enum IoError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid file content: {0}")]
    Invalid(String),
}

impl From<IoError> for seamline_core::Error {
    fn from(err: IoError) -> Self {
        match err {
            IoError::Io(e) => seamline_core::Error::Io(e),
            IoError::Json(e) => seamline_core::Error::Format(e.to_string()),
            IoError::Invalid(msg) => seamline_core::Error::Format(msg),
        }
    }
}
