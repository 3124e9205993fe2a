//! Error types for docsift library.

use std::io;
use thiserror::Error;

/// Result type alias for docsift operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur during document analysis and ranking.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Error reading or writing JSON records.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The document yielded no usable text runs (e.g. image-only pages).
    #[error("Document {0} has no usable text runs")]
    MalformedInput(String),

    /// A collection run was started without a persona or job-to-be-done.
    #[error("Missing query: {0}")]
    MissingQuery(String),

    /// The embedding collaborator could not produce a vector.
    #[error("Embedding unavailable: {0}")]
    EmbeddingUnavailable(String),

    /// A text run or collection record failed validation.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Error during rendering (JSON, Markdown).
    #[error("Rendering error: {0}")]
    Render(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::MalformedInput("scan.pdf".to_string());
        assert_eq!(err.to_string(), "Document scan.pdf has no usable text runs");

        let err = Error::MissingQuery("persona is empty".to_string());
        assert_eq!(err.to_string(), "Missing query: persona is empty");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_json_error_conversion() {
        let json_err = serde_json::from_str::<u32>("not json").unwrap_err();
        let err: Error = json_err.into();
        assert!(matches!(err, Error::Json(_)));
    }
}
