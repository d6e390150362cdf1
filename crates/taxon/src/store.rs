//! Concept graph store.
//!
//! [`TaxonomyStore`] owns a loaded [`TaxonomySnapshot`] and answers the
//! primitive lookups the resolver is built from. It is immutable once
//! constructed and can be shared freely between readers.
//!
//! # Direction of hierarchy lookups
//!
//! Exported taxonomies list hierarchy links on both ends (`broader` on the
//! child, `narrower` on the parent), but nothing guarantees the two lists
//! agree. The store therefore never derives one direction from the other:
//!
//! - **Children** of `x` are the concepts whose own `broader` list names `x`.
//! - **Parents** of `x` are the concepts whose own `narrower` list names `x`.
//!
//! Neither lookup reads `x`'s own record. On a self-consistent taxonomy the two
//! are inverses; on inconsistent data they are not, and that difference is
//! preserved rather than repaired. See [`crate::diagnostics`] for reporting it.
//!
//! # Indexes
//!
//! Both lookups are answered from indexes built in a single pass at
//! construction, keyed by the referenced id (which need not be a concept
//! itself). Index entries hold concept positions in snapshot order, so results
//! come back in the same order a linear scan over the concepts would produce.

use std::collections::HashMap;
use taxon_snapshot::{Concept, ConceptId, ConceptScheme, TaxonomySnapshot};

/// Read-only index over one taxonomy snapshot.
#[derive(Debug)]
pub struct TaxonomyStore {
    snapshot: TaxonomySnapshot,

    /// Position of the first concept with each id.
    by_id: HashMap<ConceptId, usize>,

    /// Referenced id -> positions of concepts listing it in `broader`.
    children: HashMap<ConceptId, Vec<usize>>,

    /// Referenced id -> positions of concepts listing it in `narrower`.
    parents: HashMap<ConceptId, Vec<usize>>,
}

impl TaxonomyStore {
    /// Build the store and its lookup indexes from a snapshot.
    #[must_use]
    pub fn new(snapshot: TaxonomySnapshot) -> Self {
        let mut by_id = HashMap::with_capacity(snapshot.concepts.len());
        let mut children: HashMap<ConceptId, Vec<usize>> = HashMap::new();
        let mut parents: HashMap<ConceptId, Vec<usize>> = HashMap::new();

        for (position, concept) in snapshot.concepts.iter().enumerate() {
            by_id.entry(concept.id.clone()).or_insert(position);
            index_links(&mut children, &concept.broader, position);
            index_links(&mut parents, &concept.narrower, position);
        }

        tracing::debug!(
            scheme = %snapshot.scheme.id,
            concepts = snapshot.concepts.len(),
            distinct_ids = by_id.len(),
            child_keys = children.len(),
            parent_keys = parents.len(),
            "Built taxonomy store"
        );

        Self {
            snapshot,
            by_id,
            children,
            parents,
        }
    }

    /// Scheme metadata.
    #[must_use]
    pub fn scheme(&self) -> &ConceptScheme {
        &self.snapshot.scheme
    }

    /// Every concept, in snapshot order.
    #[must_use]
    pub fn concepts(&self) -> &[Concept] {
        &self.snapshot.concepts
    }

    /// Look up a concept by exact id.
    ///
    /// Returns `None` for unknown ids. When the snapshot holds duplicate ids
    /// the first occurrence wins.
    #[must_use]
    pub fn concept(&self, id: &str) -> Option<&Concept> {
        self.by_id.get(id).map(|&position| &self.snapshot.concepts[position])
    }

    /// Concepts whose `broader` list contains `id`.
    #[must_use]
    pub fn children_of(&self, id: &str) -> Vec<&Concept> {
        self.collect(self.children.get(id))
    }

    /// Concepts whose `narrower` list contains `id`.
    #[must_use]
    pub fn parents_of(&self, id: &str) -> Vec<&Concept> {
        self.collect(self.parents.get(id))
    }

    /// The scheme's top concepts that exist in the snapshot, in scheme order.
    #[must_use]
    pub fn top_concepts(&self) -> Vec<&Concept> {
        self.snapshot
            .scheme
            .top_concept_ids
            .iter()
            .filter_map(|id| self.concept(id.as_str()))
            .collect()
    }

    /// Number of concepts in the snapshot.
    #[must_use]
    pub fn len(&self) -> usize {
        self.snapshot.concepts.len()
    }

    /// Whether the snapshot holds no concepts.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.snapshot.concepts.is_empty()
    }

    fn collect(&self, positions: Option<&Vec<usize>>) -> Vec<&Concept> {
        positions
            .map(|positions| {
                positions
                    .iter()
                    .map(|&position| &self.snapshot.concepts[position])
                    .collect()
            })
            .unwrap_or_default()
    }
}

/// Record `position` under every id in `links`, at most once per id.
fn index_links(index: &mut HashMap<ConceptId, Vec<usize>>, links: &[ConceptId], position: usize) {
    for link in links {
        let positions = index.entry(link.clone()).or_default();
        // Positions are pushed in increasing order, so a repeat is always last.
        if positions.last() != Some(&position) {
            positions.push(position);
        }
    }
}
