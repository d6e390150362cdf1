//! Descendant expansion over the narrower relationship.
//!
//! All expansions here walk the hierarchy depth-first in pre-order: a node,
//! then each child's complete subtree in the order the resolver returned the
//! children. An id is expanded at most once per call. Once visited it is
//! never emitted or expanded again, even when a different path reaches it,
//! which also makes the walk terminate on cyclic data.
//!
//! The walks use an explicit stack and [`ConceptTree`] stores its nodes flat,
//! so deep hierarchies cannot overflow the call stack.

use crate::resolver::{RelationshipKind, RelationshipResolver};
use serde::Serialize;
use std::collections::HashSet;
use taxon_snapshot::ConceptId;

/// Expand `root` into itself plus every concept reachable through narrower
/// links.
///
/// The root is always the first element, even if it is not a concept in the
/// snapshot.
///
/// # Examples
///
/// ```
/// use taxon::resolver::RelationshipResolver;
/// use taxon::store::TaxonomyStore;
/// use taxon::traversal::expand_descendants;
/// use taxon_snapshot::{Concept, ConceptScheme, TaxonomySnapshot};
///
/// let store = TaxonomyStore::new(TaxonomySnapshot::new(
///     ConceptScheme::new("S1", "Programs", ["root"]),
///     vec![
///         Concept::new("root", "Root").with_narrower(["cs"]),
///         Concept::new("cs", "Computer Science").with_broader(["root"]),
///     ],
/// ));
///
/// let ids = expand_descendants(&RelationshipResolver::new(&store), "root");
/// assert_eq!(ids, ["root", "cs"]);
/// ```
#[must_use]
pub fn expand_descendants(resolver: &RelationshipResolver<'_>, root: &str) -> Vec<ConceptId> {
    let mut visited = HashSet::new();
    let mut out = Vec::new();
    expand_into(resolver, ConceptId::from(root), &mut visited, &mut out);
    out
}

/// Expand every top concept of the scheme, in scheme order.
///
/// The visited set is shared across top concepts, so a concept reachable from
/// two of them is listed once, under the first.
#[must_use]
pub fn expand_scheme(resolver: &RelationshipResolver<'_>) -> Vec<ConceptId> {
    let mut visited = HashSet::new();
    let mut out = Vec::new();
    for top in &resolver.store().scheme().top_concept_ids {
        expand_into(resolver, top.clone(), &mut visited, &mut out);
    }
    out
}

fn expand_into(
    resolver: &RelationshipResolver<'_>,
    root: ConceptId,
    visited: &mut HashSet<ConceptId>,
    out: &mut Vec<ConceptId>,
) {
    let mut stack = vec![root];

    while let Some(id) = stack.pop() {
        if !visited.insert(id.clone()) {
            continue;
        }

        let children = resolver.concepts_for(RelationshipKind::Narrower, id.as_str());
        // Reversed so the first child is popped next.
        stack.extend(children.into_iter().rev().map(|child| child.id.clone()));
        out.push(id);
    }
}

/// One node of an expanded hierarchy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConceptTreeNode {
    /// Concept id
    pub id: ConceptId,

    /// Concept label, `None` when the id is not a concept in the snapshot
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,

    /// Position of the parent in [`ConceptTree::nodes`], `None` for a root
    pub parent: Option<usize>,

    /// Number of edges between this node and its root
    pub depth: usize,

    /// Whether no later sibling shares this node's parent
    pub last_sibling: bool,
}

/// An expanded hierarchy, stored as nodes in pre-order.
///
/// Nodes refer to their parent by position, so the tree has no nesting and
/// its size is not limited by its depth. A tree built from several roots
/// holds one root node per expanded root.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ConceptTree {
    nodes: Vec<ConceptTreeNode>,
}

impl ConceptTree {
    /// All nodes in pre-order.
    #[must_use]
    pub fn nodes(&self) -> &[ConceptTreeNode] {
        &self.nodes
    }

    /// Number of nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the tree has no nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Root nodes, in expansion order.
    pub fn roots(&self) -> impl Iterator<Item = &ConceptTreeNode> {
        self.nodes.iter().filter(|node| node.parent.is_none())
    }

    /// Direct children of the node at `position`, in narrower order.
    pub fn children(&self, position: usize) -> impl Iterator<Item = &ConceptTreeNode> {
        self.nodes
            .iter()
            .skip(position + 1)
            .filter(move |node| node.parent == Some(position))
    }

    /// Ids in pre-order. Matches [`expand_descendants`] from the same root,
    /// or [`expand_scheme`] for [`build_scheme_tree`].
    #[must_use]
    pub fn ids(&self) -> Vec<ConceptId> {
        self.nodes.iter().map(|node| node.id.clone()).collect()
    }
}

/// Expand `root` into a tree for display.
///
/// Uses the same visiting rule as [`expand_descendants`]: a concept reachable
/// along several paths appears once, under the first path that reaches it in
/// pre-order.
#[must_use]
pub fn build_tree(resolver: &RelationshipResolver<'_>, root: &str) -> ConceptTree {
    let mut visited = HashSet::new();
    let mut nodes = Vec::new();
    build_into(resolver, ConceptId::from(root), &mut visited, &mut nodes);
    finish_tree(nodes)
}

/// Expand every top concept of the scheme into one tree with a root per
/// top concept.
///
/// Shares one visited set across top concepts like [`expand_scheme`]. A top
/// concept already placed under an earlier one gets no root of its own.
#[must_use]
pub fn build_scheme_tree(resolver: &RelationshipResolver<'_>) -> ConceptTree {
    let mut visited = HashSet::new();
    let mut nodes = Vec::new();
    for top in &resolver.store().scheme().top_concept_ids {
        build_into(resolver, top.clone(), &mut visited, &mut nodes);
    }
    finish_tree(nodes)
}

fn build_into(
    resolver: &RelationshipResolver<'_>,
    root: ConceptId,
    visited: &mut HashSet<ConceptId>,
    nodes: &mut Vec<ConceptTreeNode>,
) {
    let store = resolver.store();
    let mut stack: Vec<(ConceptId, Option<usize>)> = vec![(root, None)];

    while let Some((id, parent)) = stack.pop() {
        if !visited.insert(id.clone()) {
            continue;
        }

        let position = nodes.len();
        let children = resolver.concepts_for(RelationshipKind::Narrower, id.as_str());
        stack.extend(
            children
                .into_iter()
                .rev()
                .map(|child| (child.id.clone(), Some(position))),
        );

        let depth = parent.map_or(0, |p| nodes[p].depth + 1);
        nodes.push(ConceptTreeNode {
            label: store.concept(id.as_str()).map(|c| c.label.clone()),
            id,
            parent,
            depth,
            last_sibling: false,
        });
    }
}

fn finish_tree(mut nodes: Vec<ConceptTreeNode>) -> ConceptTree {
    // Walking backwards, the first node seen for each parent is its last child.
    let mut parent_seen = vec![false; nodes.len()];
    let mut root_seen = false;
    for node in nodes.iter_mut().rev() {
        let seen = match node.parent {
            Some(parent) => &mut parent_seen[parent],
            None => &mut root_seen,
        };
        node.last_sibling = !*seen;
        *seen = true;
    }
    ConceptTree { nodes }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::TaxonomyStore;
    use taxon_snapshot::{Concept, ConceptScheme, TaxonomySnapshot};

    fn store(top: &[&str], concepts: Vec<Concept>) -> TaxonomyStore {
        TaxonomyStore::new(TaxonomySnapshot::new(
            ConceptScheme::new("S", "Scheme", top.iter().copied()),
            concepts,
        ))
    }

    fn strs(ids: &[ConceptId]) -> Vec<&str> {
        ids.iter().map(ConceptId::as_str).collect()
    }

    #[test]
    fn test_example_programs() {
        let store = store(
            &["root"],
            vec![
                Concept::new("root", "Root").with_narrower(["cs"]),
                Concept::new("cs", "CS").with_broader(["root"]).with_related(["math"]),
                Concept::new("math", "Math").with_related(["cs"]),
            ],
        );
        let resolver = RelationshipResolver::new(&store);

        assert_eq!(strs(&expand_descendants(&resolver, "root")), ["root", "cs"]);
    }

    #[test]
    fn test_pre_order_follows_child_order() {
        // root -> a -> a1, root -> b; a precedes b in the snapshot
        let store = store(
            &["root"],
            vec![
                Concept::new("root", "Root"),
                Concept::new("a", "A").with_broader(["root"]),
                Concept::new("b", "B").with_broader(["root"]),
                Concept::new("a1", "A1").with_broader(["a"]),
            ],
        );
        let resolver = RelationshipResolver::new(&store);

        assert_eq!(
            strs(&expand_descendants(&resolver, "root")),
            ["root", "a", "a1", "b"]
        );
    }

    #[test]
    fn test_two_node_cycle_terminates() {
        let store = store(
            &["p"],
            vec![
                Concept::new("p", "P").with_broader(["q"]),
                Concept::new("q", "Q").with_broader(["p"]),
            ],
        );
        let resolver = RelationshipResolver::new(&store);

        assert_eq!(strs(&expand_descendants(&resolver, "p")), ["p", "q"]);
        assert_eq!(strs(&expand_descendants(&resolver, "q")), ["q", "p"]);
    }

    #[test]
    fn test_self_loop_terminates() {
        let store = store(&["a"], vec![Concept::new("a", "A").with_broader(["a"])]);
        let resolver = RelationshipResolver::new(&store);

        assert_eq!(strs(&expand_descendants(&resolver, "a")), ["a"]);
    }

    #[test]
    fn test_diamond_visits_shared_child_once() {
        // top -> left -> shared, top -> right -> shared
        let store = store(
            &["top"],
            vec![
                Concept::new("top", "Top"),
                Concept::new("left", "Left").with_broader(["top"]),
                Concept::new("right", "Right").with_broader(["top"]),
                Concept::new("shared", "Shared").with_broader(["left", "right"]),
            ],
        );
        let resolver = RelationshipResolver::new(&store);

        assert_eq!(
            strs(&expand_descendants(&resolver, "top")),
            ["top", "left", "shared", "right"]
        );
    }

    #[test]
    fn test_unknown_root_is_returned_alone() {
        let store = store(&[], vec![Concept::new("a", "A")]);
        let resolver = RelationshipResolver::new(&store);

        assert_eq!(strs(&expand_descendants(&resolver, "nowhere")), ["nowhere"]);
    }

    #[test]
    fn test_expand_scheme_shares_visited_set() {
        let store = store(
            &["t1", "t2"],
            vec![
                Concept::new("t1", "T1"),
                Concept::new("t2", "T2"),
                Concept::new("c", "C").with_broader(["t1", "t2"]),
                Concept::new("d", "D").with_broader(["t2"]),
            ],
        );
        let resolver = RelationshipResolver::new(&store);

        assert_eq!(strs(&expand_scheme(&resolver)), ["t1", "c", "t2", "d"]);
    }

    #[test]
    fn test_expand_scheme_without_top_concepts() {
        let store = store(&[], vec![Concept::new("a", "A")]);
        let resolver = RelationshipResolver::new(&store);

        assert!(expand_scheme(&resolver).is_empty());
    }

    #[test]
    fn test_tree_matches_flat_expansion() {
        let store = store(
            &["top"],
            vec![
                Concept::new("top", "Top"),
                Concept::new("left", "Left").with_broader(["top"]),
                Concept::new("right", "Right").with_broader(["top"]),
                Concept::new("shared", "Shared").with_broader(["left", "right"]),
                Concept::new("back", "Back").with_broader(["shared"]).with_narrower(["top"]),
                Concept::new("top2", "Top again").with_broader(["back"]),
            ],
        );
        let resolver = RelationshipResolver::new(&store);

        let tree = build_tree(&resolver, "top");

        assert_eq!(tree.ids(), expand_descendants(&resolver, "top"));
        assert_eq!(tree.len(), 6);
        assert_eq!(tree.roots().count(), 1);

        let root = &tree.nodes()[0];
        assert_eq!(root.label.as_deref(), Some("Top"));
        assert_eq!(root.depth, 0);
        assert_eq!(tree.children(0).count(), 2);

        let left = tree.children(0).next().unwrap();
        assert_eq!(left.id, "left");
        assert!(!left.last_sibling);
        assert_eq!(tree.children(1).next().unwrap().id, "shared");

        let right = tree.nodes().iter().find(|n| n.id == "right").unwrap();
        assert!(right.last_sibling);
        assert_eq!(right.depth, 1);
    }

    #[test]
    fn test_last_sibling_ignores_children_skipped_as_visited() {
        // "shared" is pushed under both a and b but only placed under a, so
        // a's last child is "shared" and b has none
        let store = store(
            &["root"],
            vec![
                Concept::new("root", "Root"),
                Concept::new("a", "A").with_broader(["root"]),
                Concept::new("b", "B").with_broader(["root"]),
                Concept::new("a1", "A1").with_broader(["a"]),
                Concept::new("shared", "Shared").with_broader(["a", "b"]),
            ],
        );
        let resolver = RelationshipResolver::new(&store);

        let tree = build_tree(&resolver, "root");
        let flags: Vec<(&str, bool)> = tree
            .nodes()
            .iter()
            .map(|n| (n.id.as_str(), n.last_sibling))
            .collect();

        assert_eq!(
            flags,
            [
                ("root", true),
                ("a", false),
                ("a1", false),
                ("shared", true),
                ("b", true)
            ]
        );
    }

    #[test]
    fn test_tree_of_unknown_root() {
        let store = store(&[], vec![]);
        let resolver = RelationshipResolver::new(&store);

        let tree = build_tree(&resolver, "nowhere");

        assert_eq!(tree.len(), 1);
        assert_eq!(tree.nodes()[0].id, "nowhere");
        assert!(tree.nodes()[0].label.is_none());
        assert_eq!(tree.children(0).count(), 0);
    }

    #[test]
    fn test_scheme_tree_shares_visited_set() {
        let store = store(
            &["t1", "t2", "c"],
            vec![
                Concept::new("t1", "T1"),
                Concept::new("t2", "T2"),
                Concept::new("c", "C").with_broader(["t1", "t2"]),
                Concept::new("d", "D").with_broader(["t2"]),
            ],
        );
        let resolver = RelationshipResolver::new(&store);

        let tree = build_scheme_tree(&resolver);

        assert_eq!(tree.ids(), expand_scheme(&resolver));
        let roots: Vec<&str> = tree.roots().map(|n| n.id.as_str()).collect();
        assert_eq!(roots, ["t1", "t2"]);
        assert!(tree.nodes()[2].last_sibling);
    }

    fn chain(depth: usize) -> TaxonomyStore {
        let concepts = (0..depth)
            .map(|i| {
                let concept = Concept::new(format!("c{i}"), format!("Level {i}"));
                if i == 0 {
                    concept
                } else {
                    concept.with_broader([format!("c{}", i - 1)])
                }
            })
            .collect();
        store(&["c0"], concepts)
    }

    #[test]
    fn test_deep_chain_tree() {
        const DEPTH: usize = 50_000;
        let store = chain(DEPTH);
        let resolver = RelationshipResolver::new(&store);

        let tree = build_tree(&resolver, "c0");

        assert_eq!(tree.len(), DEPTH);
        assert_eq!(tree.nodes()[DEPTH - 1].depth, DEPTH - 1);
        assert_eq!(tree.ids(), expand_descendants(&resolver, "c0"));

        let json = serde_json::to_string(&tree).unwrap();
        assert!(json.starts_with(r#"[{"id":"c0","label":"Level 0","parent":null"#));
    }
}
