//! Data model and file codec for SKOS taxonomy snapshots.
//!
//! A snapshot is a single JSON document holding one concept scheme and the
//! flat list of its concepts:
//!
//! ```json
//! {
//!   "scheme": { "id": "S1", "name": "Programs", "topConceptIds": ["root"] },
//!   "concepts": [
//!     { "id": "root", "label": "Root", "broader": [], "narrower": ["cs"], "related": [] }
//!   ]
//! }
//! ```
//!
//! Snapshots are produced by an export step that queries a remote taxonomy
//! service and are read back once at process start. This crate only knows the
//! layout; graph semantics live in the `taxon` crate.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod atomic;
pub mod error;
pub mod model;
pub mod reader;

pub use atomic::write_snapshot_atomic;
pub use error::{Error, Result};
pub use model::{Concept, ConceptId, ConceptScheme, TaxonomySnapshot};
pub use reader::{parse_snapshot, read_snapshot};
