//! Consistency checks for loaded taxonomies.
//!
//! Taxonomies are user-authored and exported as-is, so gaps and mismatches are
//! expected. The store answers queries over whatever it was given and never
//! repairs the data; this module only reports what it finds.
//!
//! Findings are non-fatal. A snapshot with findings loads and resolves
//! normally, but results may differ from what an editor expects (for example,
//! BROADER and NARROWER not being inverses).

use crate::resolver::RelationshipKind;
use crate::store::TaxonomyStore;
use petgraph::algo::tarjan_scc;
use petgraph::graph::{DiGraph, NodeIndex};
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;
use taxon_snapshot::ConceptId;

/// A data-quality finding in a loaded taxonomy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum Diagnostic {
    /// More than one concept carries the same id.
    ///
    /// **Effect**: lookups by id return the first occurrence only.
    DuplicateConcept {
        /// The repeated id
        id: ConceptId,
        /// How many concepts carry it
        occurrences: usize,
    },

    /// The scheme lists a top concept that is not in the snapshot.
    ///
    /// **Effect**: expanding the scheme yields only the bare id for it.
    UnknownTopConcept {
        /// The missing id
        id: ConceptId,
    },

    /// A link names an id that is not in the snapshot.
    ///
    /// **Effect**: RELATED silently drops it; hierarchy scans still index it.
    DanglingReference {
        /// Concept holding the link
        from: ConceptId,
        /// Missing target
        to: ConceptId,
        /// Which list the link is in
        relation: RelationshipKind,
    },

    /// A hierarchy link is declared on one end only.
    ///
    /// **Effect**: NARROWER of `parent` and BROADER of `child` disagree.
    AsymmetricHierarchy {
        /// The broader concept
        parent: ConceptId,
        /// The narrower concept
        child: ConceptId,
        /// Which list declares the link: `broader` (on the child) or
        /// `narrower` (on the parent)
        declared_by: RelationshipKind,
    },

    /// `from` lists `to` as related but not the other way round.
    AsymmetricRelated {
        /// Concept holding the link
        from: ConceptId,
        /// Concept missing the reverse link
        to: ConceptId,
    },

    /// Concepts that are their own ancestors through `broader` links.
    ///
    /// **Effect**: descendant expansion stops at the first revisit.
    HierarchyCycle {
        /// Cycle members, sorted
        members: Vec<ConceptId>,
    },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateConcept { id, occurrences } => {
                write!(f, "concept '{id}' appears {occurrences} times")
            }
            Self::UnknownTopConcept { id } => {
                write!(f, "top concept '{id}' is not in the snapshot")
            }
            Self::DanglingReference { from, to, relation } => {
                write!(f, "'{from}' lists unknown concept '{to}' as {relation}")
            }
            Self::AsymmetricHierarchy {
                parent,
                child,
                declared_by: RelationshipKind::Narrower,
            } => write!(
                f,
                "'{parent}' lists '{child}' as narrower, but '{child}' does not list '{parent}' as broader"
            ),
            Self::AsymmetricHierarchy { parent, child, .. } => write!(
                f,
                "'{child}' lists '{parent}' as broader, but '{parent}' does not list '{child}' as narrower"
            ),
            Self::AsymmetricRelated { from, to } => {
                write!(f, "'{from}' lists '{to}' as related, but not the reverse")
            }
            Self::HierarchyCycle { members } => {
                let names: Vec<&str> = members.iter().map(ConceptId::as_str).collect();
                write!(f, "hierarchy cycle through {}", names.join(", "))
            }
        }
    }
}

/// Run every check against `store`.
///
/// Findings are grouped by kind in the order the variants are declared, and
/// within a kind follow snapshot order.
#[must_use]
pub fn check(store: &TaxonomyStore) -> Vec<Diagnostic> {
    let mut findings = Vec::new();
    findings.extend(duplicate_concepts(store));
    findings.extend(unknown_top_concepts(store));
    findings.extend(dangling_references(store));
    findings.extend(asymmetric_hierarchy(store));
    findings.extend(asymmetric_related(store));
    findings.extend(hierarchy_cycles(store));

    tracing::debug!(findings = findings.len(), "Checked taxonomy consistency");
    findings
}

fn duplicate_concepts(store: &TaxonomyStore) -> Vec<Diagnostic> {
    let mut counts: HashMap<&ConceptId, usize> = HashMap::new();
    let mut order = Vec::new();
    for concept in store.concepts() {
        let count = counts.entry(&concept.id).or_insert(0);
        if *count == 0 {
            order.push(&concept.id);
        }
        *count += 1;
    }

    order
        .into_iter()
        .filter_map(|id| {
            let occurrences = counts[id];
            (occurrences > 1).then(|| Diagnostic::DuplicateConcept {
                id: id.clone(),
                occurrences,
            })
        })
        .collect()
}

fn unknown_top_concepts(store: &TaxonomyStore) -> Vec<Diagnostic> {
    store
        .scheme()
        .top_concept_ids
        .iter()
        .filter(|id| store.concept(id.as_str()).is_none())
        .map(|id| Diagnostic::UnknownTopConcept { id: id.clone() })
        .collect()
}

fn dangling_references(store: &TaxonomyStore) -> Vec<Diagnostic> {
    let mut findings = Vec::new();
    for concept in store.concepts() {
        let lists = [
            (RelationshipKind::Broader, &concept.broader),
            (RelationshipKind::Narrower, &concept.narrower),
            (RelationshipKind::Related, &concept.related),
        ];
        for (relation, ids) in lists {
            for to in ids {
                if store.concept(to.as_str()).is_none() {
                    findings.push(Diagnostic::DanglingReference {
                        from: concept.id.clone(),
                        to: to.clone(),
                        relation,
                    });
                }
            }
        }
    }
    findings
}

fn asymmetric_hierarchy(store: &TaxonomyStore) -> Vec<Diagnostic> {
    let mut findings = Vec::new();
    for concept in store.concepts() {
        for parent_id in &concept.broader {
            if let Some(parent) = store.concept(parent_id.as_str()) {
                if !parent.narrower.contains(&concept.id) {
                    findings.push(Diagnostic::AsymmetricHierarchy {
                        parent: parent_id.clone(),
                        child: concept.id.clone(),
                        declared_by: RelationshipKind::Broader,
                    });
                }
            }
        }
        for child_id in &concept.narrower {
            if let Some(child) = store.concept(child_id.as_str()) {
                if !child.broader.contains(&concept.id) {
                    findings.push(Diagnostic::AsymmetricHierarchy {
                        parent: concept.id.clone(),
                        child: child_id.clone(),
                        declared_by: RelationshipKind::Narrower,
                    });
                }
            }
        }
    }
    findings
}

fn asymmetric_related(store: &TaxonomyStore) -> Vec<Diagnostic> {
    let mut findings = Vec::new();
    for concept in store.concepts() {
        for to in &concept.related {
            if let Some(other) = store.concept(to.as_str()) {
                if !other.related.contains(&concept.id) {
                    findings.push(Diagnostic::AsymmetricRelated {
                        from: concept.id.clone(),
                        to: to.clone(),
                    });
                }
            }
        }
    }
    findings
}

/// Cycles in the graph NARROWER resolution walks: an edge `parent -> child`
/// for every `broader` link between two known concepts.
fn hierarchy_cycles(store: &TaxonomyStore) -> Vec<Diagnostic> {
    let mut graph: DiGraph<ConceptId, ()> = DiGraph::new();
    let mut node_map: HashMap<&str, NodeIndex> = HashMap::new();

    for concept in store.concepts() {
        node_map
            .entry(concept.id.as_str())
            .or_insert_with(|| graph.add_node(concept.id.clone()));
    }

    for concept in store.concepts() {
        let child = node_map[concept.id.as_str()];
        for parent_id in &concept.broader {
            if let Some(&parent) = node_map.get(parent_id.as_str()) {
                graph.update_edge(parent, child, ());
            }
        }
    }

    let mut cycles: Vec<Vec<ConceptId>> = tarjan_scc(&graph)
        .into_iter()
        .filter(|component| match component.as_slice() {
            [single] => graph.contains_edge(*single, *single),
            _ => true,
        })
        .map(|component| {
            let mut members: Vec<ConceptId> =
                component.into_iter().map(|node| graph[node].clone()).collect();
            members.sort();
            members
        })
        .collect();
    cycles.sort();

    cycles
        .into_iter()
        .map(|members| Diagnostic::HierarchyCycle { members })
        .collect()
}
