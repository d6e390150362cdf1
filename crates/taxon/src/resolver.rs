//! Relationship resolution.
//!
//! [`RelationshipResolver`] turns a relationship kind plus a batch of input
//! concept ids into the concepts each input points at:
//!
//! | Kind | Result for input `x` |
//! |------|----------------------|
//! | [`Broader`](RelationshipKind::Broader) | concepts whose `narrower` list names `x` |
//! | [`Narrower`](RelationshipKind::Narrower) | concepts whose `broader` list names `x` |
//! | [`Related`](RelationshipKind::Related) | `x`'s own `related` ids that exist in the snapshot |
//!
//! Resolution is total over its input. Unknown ids, orphans and dangling
//! references produce empty results, never errors. The only failure is asking
//! for a kind outside the three above, which can only happen when the kind
//! arrives as a string (see [`RelationshipKind::from_str`]).

use crate::error::{Error, Result};
use crate::store::TaxonomyStore;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use taxon_snapshot::{Concept, ConceptId};

/// SKOS relationship kinds understood by the resolver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RelationshipKind {
    /// Parents of the input
    Broader,

    /// Children of the input
    Narrower,

    /// Associative links of the input
    Related,
}

impl RelationshipKind {
    /// All supported kinds.
    pub const ALL: [Self; 3] = [Self::Broader, Self::Narrower, Self::Related];

    /// Lowercase name as used in the snapshot and on the command line.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Broader => "broader",
            Self::Narrower => "narrower",
            Self::Related => "related",
        }
    }
}

impl fmt::Display for RelationshipKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RelationshipKind {
    type Err = Error;

    /// Parse a kind name, case-insensitively.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedRelationship`] for anything but
    /// `broader`, `narrower`, or `related`.
    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "broader" => Ok(Self::Broader),
            "narrower" => Ok(Self::Narrower),
            "related" => Ok(Self::Related),
            _ => Err(Error::UnsupportedRelationship(s.to_string())),
        }
    }
}

/// The concepts one input resolved to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConceptMapping<'a> {
    /// The input id, as given
    pub input_node: ConceptId,

    /// Resolved concepts, possibly empty
    pub output_concepts: Vec<&'a Concept>,

    /// Kind that was resolved
    pub kind: RelationshipKind,
}

/// Resolves relationship queries against a borrowed store.
#[derive(Debug, Clone, Copy)]
pub struct RelationshipResolver<'a> {
    store: &'a TaxonomyStore,
}

impl<'a> RelationshipResolver<'a> {
    /// Create a resolver over `store`.
    #[must_use]
    pub fn new(store: &'a TaxonomyStore) -> Self {
        Self { store }
    }

    /// The store being queried.
    #[must_use]
    pub fn store(&self) -> &'a TaxonomyStore {
        self.store
    }

    /// Resolve `kind` for every input, keeping track of which input produced
    /// which concepts.
    ///
    /// Returns exactly one mapping per input, in input order.
    pub fn resolve_with_mapping<S: AsRef<str>>(
        &self,
        kind: RelationshipKind,
        inputs: &[S],
    ) -> Vec<ConceptMapping<'a>> {
        inputs
            .iter()
            .map(|input| {
                let input = input.as_ref();
                ConceptMapping {
                    input_node: ConceptId::from(input),
                    output_concepts: self.concepts_for(kind, input),
                    kind,
                }
            })
            .collect()
    }

    /// Resolve `kind` for every input and concatenate the results.
    ///
    /// No deduplication happens: a concept reached from two inputs appears
    /// twice.
    pub fn resolve<S: AsRef<str>>(&self, kind: RelationshipKind, inputs: &[S]) -> Vec<&'a Concept> {
        self.resolve_with_mapping(kind, inputs)
            .into_iter()
            .flat_map(|mapping| mapping.output_concepts)
            .collect()
    }

    /// Like [`resolve_with_mapping`](Self::resolve_with_mapping), for callers
    /// that receive the kind as text.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedRelationship`] if `kind` is not a known
    /// relationship name. Nothing is resolved in that case.
    pub fn resolve_named<S: AsRef<str>>(
        &self,
        kind: &str,
        inputs: &[S],
    ) -> Result<Vec<ConceptMapping<'a>>> {
        let kind = kind.parse::<RelationshipKind>()?;
        Ok(self.resolve_with_mapping(kind, inputs))
    }

    /// Resolve `kind` for a single input.
    #[must_use]
    pub fn concepts_for(&self, kind: RelationshipKind, input: &str) -> Vec<&'a Concept> {
        match kind {
            RelationshipKind::Broader => self.store.parents_of(input),
            RelationshipKind::Narrower => self.store.children_of(input),
            RelationshipKind::Related => self.related_of(input),
        }
    }

    fn related_of(&self, input: &str) -> Vec<&'a Concept> {
        let Some(concept) = self.store.concept(input) else {
            return Vec::new();
        };

        concept
            .related
            .iter()
            .filter_map(|id| self.store.concept(id.as_str()))
            .collect()
    }
}
