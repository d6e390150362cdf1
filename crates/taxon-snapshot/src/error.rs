//! Error types for taxon-snapshot operations.

use std::io;
use thiserror::Error;

/// The error type for reading and writing taxonomy snapshots.
#[derive(Debug, Error)]
pub enum Error {
    /// IO error occurred while reading or writing.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// The document is not valid JSON or does not match the snapshot layout.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A specialized Result type for taxon-snapshot operations.
pub type Result<T> = std::result::Result<T, Error>;
