//! Taxon - an in-memory index over a SKOS taxonomy snapshot.
//!
//! A snapshot (one concept scheme plus its concepts, exported from a
//! taxonomy service) is loaded once per process into a read-only
//! [`TaxonomyStore`]. Queries go through a [`RelationshipResolver`], which
//! resolves broader, narrower, and related links for batches of concepts,
//! and through the [`traversal`] helpers that flatten the hierarchy.
//!
//! # Example
//!
//! ```no_run
//! use taxon::{RelationshipKind, RelationshipResolver, TaxonomyContext};
//!
//! # async fn example() -> taxon::error::Result<()> {
//! let context = TaxonomyContext::new();
//! let store = context.load_from_file("public/taxonomy.json").await?;
//!
//! let resolver = RelationshipResolver::new(&store);
//! for concept in resolver.resolve(RelationshipKind::Related, &["cs"]) {
//!     println!("{} ({})", concept.id, concept.label);
//! }
//!
//! let all = taxon::traversal::expand_scheme(&resolver);
//! println!("{} concepts reachable from the top", all.len());
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]

pub mod config;
pub mod context;
pub mod diagnostics;
pub mod error;
pub mod resolver;
pub mod store;
pub mod traversal;

// Public CLI module (needed by binary)
pub mod cli;

// Output formatting for CLI commands
pub mod output;

pub use context::TaxonomyContext;
pub use error::{Error, Result};
pub use resolver::{ConceptMapping, RelationshipKind, RelationshipResolver};
pub use store::TaxonomyStore;
pub use taxon_snapshot::{Concept, ConceptId, ConceptScheme, TaxonomySnapshot};
