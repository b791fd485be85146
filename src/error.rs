//! Ingestor error types.
//!
//! Per-file malformation is never an error: it is recorded as warnings on
//! the extraction result so a batch of N files always yields N results.
//! Errors are reserved for upstream contract violations and internal
//! invariant breaks.

use thiserror::Error;

/// Main error type for ingestor operations.
#[derive(Error, Debug)]
pub enum IngestError {
    /// Content was not valid UTF-8. Binary files are the file walker's
    /// job to reject; reaching this is a contract violation upstream.
    #[error("invalid UTF-8 in {path} at byte {}", .source.valid_up_to())]
    Utf8 {
        /// The file path whose content failed to decode.
        path: String,
        /// The underlying UTF-8 error.
        #[source]
        source: std::str::Utf8Error,
    },

    /// A symbol span fell outside the content bounds. Internal bug guard.
    #[error("invalid span ({start}, {end}) in {path}")]
    InvalidSpan {
        /// The file containing the invalid span.
        path: String,
        /// Start byte offset.
        start: usize,
        /// End byte offset.
        end: usize,
    },
}

/// Result type alias for ingestor operations.
pub type Result<T> = std::result::Result<T, IngestError>;
