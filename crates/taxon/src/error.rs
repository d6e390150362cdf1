//! Error types for taxon operations.
//!
//! Lookup misses are not errors: an unknown concept id or a dangling
//! reference surfaces as `None` or an empty list. The variants here cover
//! lifecycle misuse, unreadable snapshots, and caller contract violations.

use std::io;
use std::path::PathBuf;
use taxon_snapshot::ConceptId;
use thiserror::Error;

/// The error type for taxon operations.
#[derive(Debug, Error)]
pub enum Error {
    /// The store was queried before any snapshot was successfully loaded.
    #[error("Taxonomy store not initialized. Load a snapshot first.")]
    NotInitialized,

    /// Loading the snapshot failed; nothing was initialized.
    #[error("Failed to load taxonomy snapshot from {}: {source}", .path.display())]
    SnapshotUnavailable {
        /// The snapshot path that was being loaded.
        path: PathBuf,
        /// The underlying read or parse failure.
        #[source]
        source: taxon_snapshot::Error,
    },

    /// A relationship kind outside broader/narrower/related was requested.
    #[error("Unsupported SKOS relationship type: {0}")]
    UnsupportedRelationship(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A concept named on the command line does not exist.
    #[error("Concept not found: {0}")]
    ConceptNotFound(ConceptId),

    /// IO error occurred.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// A specialized Result type for taxon operations.
pub type Result<T> = std::result::Result<T, Error>;
