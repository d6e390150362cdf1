//! Snapshot domain types.
//!
//! Field names follow the persisted layout exactly (`topConceptIds`, not
//! `top_concept_ids`), so these types round-trip the export file verbatim.

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;

/// Opaque identifier of a concept, unique within its scheme.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConceptId(pub String);

impl ConceptId {
    /// Create a new concept ID
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the ID as a string slice
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ConceptId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for ConceptId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for ConceptId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl Borrow<str> for ConceptId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for ConceptId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for ConceptId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for ConceptId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// A single node of the controlled vocabulary.
///
/// The three link lists are stored exactly as exported. Nothing here
/// guarantees that `broader` and `narrower` mirror each other or that
/// `related` is symmetric; consumers must decide which list is authoritative
/// for the direction they query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Concept {
    /// Unique identifier
    pub id: ConceptId,

    /// Human-readable preferred label
    pub label: String,

    /// Identifiers of the concepts this one sits under
    #[serde(default)]
    pub broader: Vec<ConceptId>,

    /// Identifiers of the concepts that sit under this one
    #[serde(default)]
    pub narrower: Vec<ConceptId>,

    /// Identifiers of associatively related concepts
    #[serde(default)]
    pub related: Vec<ConceptId>,
}

impl Concept {
    /// Create a concept with no links.
    pub fn new(id: impl Into<ConceptId>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            broader: Vec::new(),
            narrower: Vec::new(),
            related: Vec::new(),
        }
    }

    /// Replace the `broader` list.
    #[must_use]
    pub fn with_broader<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<ConceptId>,
    {
        self.broader = ids.into_iter().map(Into::into).collect();
        self
    }

    /// Replace the `narrower` list.
    #[must_use]
    pub fn with_narrower<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<ConceptId>,
    {
        self.narrower = ids.into_iter().map(Into::into).collect();
        self
    }

    /// Replace the `related` list.
    #[must_use]
    pub fn with_related<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<ConceptId>,
    {
        self.related = ids.into_iter().map(Into::into).collect();
        self
    }
}

/// The named container of a taxonomy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConceptScheme {
    /// Scheme identifier
    pub id: String,

    /// Display name
    pub name: String,

    /// Entry points of the hierarchy, in display order
    #[serde(default)]
    pub top_concept_ids: Vec<ConceptId>,
}

impl ConceptScheme {
    /// Create a scheme with the given top concepts.
    pub fn new<I, S>(id: impl Into<String>, name: impl Into<String>, top_concept_ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<ConceptId>,
    {
        Self {
            id: id.into(),
            name: name.into(),
            top_concept_ids: top_concept_ids.into_iter().map(Into::into).collect(),
        }
    }
}

/// A point-in-time export of one scheme and all of its concepts.
///
/// This is the unit of persistence and the unit loaded at startup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxonomySnapshot {
    /// Scheme metadata
    pub scheme: ConceptScheme,

    /// Every concept, in export order
    pub concepts: Vec<Concept>,
}

impl TaxonomySnapshot {
    /// Bundle a scheme with its concepts.
    #[must_use]
    pub fn new(scheme: ConceptScheme, concepts: Vec<Concept>) -> Self {
        Self { scheme, concepts }
    }

    /// Number of concepts in the snapshot.
    #[must_use]
    pub fn len(&self) -> usize {
        self.concepts.len()
    }

    /// Whether the snapshot holds no concepts.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.concepts.is_empty()
    }
}
