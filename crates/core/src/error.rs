//! Error types for Folio operations.
//!
//! [`FolioError`] covers every failure the batch pipeline can hit: fetching
//! and parsing articles, rendering documents, writing the archive and
//! resolving run directories.
//!
//! Per-URL failures never escape a batch run; they are flattened into
//! strings inside [`crate::ProcessingResult`]. Only environment failures
//! (output directory, report, archive) surface as `Err` from
//! [`crate::BatchProcessor::process`].
//!
//! # Example
//!
//! ```rust
//! use folio_core::{FolioError, Result};
//!
//! fn require_body(body: &str) -> Result<&str> {
//!     if body.trim().is_empty() {
//!         return Err(FolioError::NoContent);
//!     }
//!     Ok(body)
//! }
//! ```

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for fetching, extraction, rendering and archiving.
#[derive(Error, Debug)]
pub enum FolioError {
    /// HTTP request errors from reqwest.
    ///
    /// This variant wraps network errors, DNS failures, connection issues,
    /// and non-success status codes.
    #[cfg(feature = "fetch")]
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Request timeout.
    ///
    /// Returned when an HTTP request exceeds the configured timeout duration.
    #[error("Request timed out after {timeout} seconds")]
    Timeout { timeout: u64 },

    /// Invalid URL provided.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// HTML parsing errors, usually an invalid CSS selector.
    #[error("Failed to parse HTML: {0}")]
    HtmlParseError(String),

    /// No content could be extracted from the document.
    #[error("No content found")]
    NoContent,

    /// File I/O errors.
    #[error("Failed to write to file: {0}")]
    Io(#[from] std::io::Error),

    /// The run's output directory could not be created.
    ///
    /// This is fatal for a batch: nothing can be written without it.
    #[error("Failed to create output directory {}: {source}", path.display())]
    OutputDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// ZIP container errors (archive and DOCX packaging).
    #[error("Archive error: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// PDF assembly errors from lopdf.
    #[error("PDF error: {0}")]
    Pdf(#[from] lopdf::Error),

    /// Summary serialization errors.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// No archive exists for the requested run.
    #[error("No archive available for run {0}")]
    RunNotFound(String),
}

/// Result type alias for FolioError.
pub type Result<T> = std::result::Result<T, FolioError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = FolioError::InvalidUrl("not a url".to_string());
        assert!(err.to_string().contains("Invalid URL"));
    }

    #[test]
    fn test_no_content_message() {
        assert_eq!(FolioError::NoContent.to_string(), "No content found");
    }

    #[test]
    fn test_timeout_error() {
        let err = FolioError::Timeout { timeout: 10 };
        assert!(err.to_string().contains("10"));
    }

    #[test]
    fn test_output_dir_error_mentions_path() {
        let err = FolioError::OutputDir {
            path: PathBuf::from("/readonly/out"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        let message = err.to_string();
        assert!(message.contains("/readonly/out"));
        assert!(message.contains("denied"));
    }

    #[test]
    fn test_run_not_found() {
        let err = FolioError::RunNotFound("abc".to_string());
        assert!(err.to_string().contains("abc"));
    }
}
