//! Command execution logic.
//!
//! Every command is a read-only query against an already loaded store. The
//! functions here write to any [`Write`] so they can be exercised without a
//! terminal.

use anyhow::{bail, Result};
use std::io::Write;
use std::process::ExitCode;

use super::args::{ConceptArgs, ExpandArgs, ResolveArgs};
use crate::diagnostics;
use crate::error::Error;
use crate::output::{self, OutputConfig, OutputMode};
use crate::resolver::{RelationshipKind, RelationshipResolver};
use crate::store::TaxonomyStore;
use crate::traversal;
use taxon_snapshot::ConceptId;

/// Execute the scheme command
pub fn execute_scheme<W: Write>(
    w: &mut W,
    store: &TaxonomyStore,
    mode: OutputMode,
    config: &OutputConfig,
) -> Result<()> {
    let top = store.top_concepts();
    output::write_scheme(w, store.scheme(), store.len(), &top, mode, config)?;
    Ok(())
}

/// Execute the concepts command
pub fn execute_concepts<W: Write>(
    w: &mut W,
    store: &TaxonomyStore,
    mode: OutputMode,
    config: &OutputConfig,
) -> Result<()> {
    let concepts: Vec<_> = store.concepts().iter().collect();
    output::write_concepts(w, &concepts, mode, config)?;
    Ok(())
}

/// Execute the show command
pub fn execute_show<W: Write>(
    w: &mut W,
    store: &TaxonomyStore,
    args: &ConceptArgs,
    mode: OutputMode,
    config: &OutputConfig,
) -> Result<()> {
    let concept = store
        .concept(&args.concept_id)
        .ok_or_else(|| Error::ConceptNotFound(ConceptId::from(args.concept_id.as_str())))?;
    output::write_concept_details(w, concept, mode, config)?;
    Ok(())
}

/// Execute the children, parents, or related command
pub fn execute_relation<W: Write>(
    w: &mut W,
    store: &TaxonomyStore,
    kind: RelationshipKind,
    args: &ConceptArgs,
    mode: OutputMode,
    config: &OutputConfig,
) -> Result<()> {
    let resolver = RelationshipResolver::new(store);
    let concepts = resolver.resolve(kind, std::slice::from_ref(&args.concept_id));
    output::write_concepts(w, &concepts, mode, config)?;
    Ok(())
}

/// Execute the resolve command
pub fn execute_resolve<W: Write>(
    w: &mut W,
    store: &TaxonomyStore,
    args: &ResolveArgs,
    mode: OutputMode,
    config: &OutputConfig,
) -> Result<()> {
    let resolver = RelationshipResolver::new(store);
    if args.mapping {
        let mappings = resolver.resolve_with_mapping(args.kind, &args.concept_ids);
        output::write_mappings(w, &mappings, mode, config)?;
    } else {
        let concepts = resolver.resolve(args.kind, &args.concept_ids);
        output::write_concepts(w, &concepts, mode, config)?;
    }
    Ok(())
}

/// Execute the descendants command
pub fn execute_descendants<W: Write>(
    w: &mut W,
    store: &TaxonomyStore,
    args: &ExpandArgs,
    mode: OutputMode,
    config: &OutputConfig,
) -> Result<()> {
    let resolver = RelationshipResolver::new(store);
    let ids = match &args.root {
        Some(root) => traversal::expand_descendants(&resolver, root),
        None => traversal::expand_scheme(&resolver),
    };
    output::write_ids(w, &ids, mode, config)?;
    Ok(())
}

/// Execute the tree command
///
/// Without a root, all top concepts share one visited set, so the tree lists
/// the same concepts as `descendants` does.
pub fn execute_tree<W: Write>(
    w: &mut W,
    store: &TaxonomyStore,
    args: &ExpandArgs,
    mode: OutputMode,
    config: &OutputConfig,
) -> Result<()> {
    let resolver = RelationshipResolver::new(store);
    let tree = match &args.root {
        Some(root) => traversal::build_tree(&resolver, root),
        None => {
            if store.scheme().top_concept_ids.is_empty() {
                bail!(
                    "Scheme '{}' has no top concepts. Pass a concept ID to start from.",
                    store.scheme().id
                );
            }
            traversal::build_scheme_tree(&resolver)
        }
    };

    output::write_tree(w, &tree, mode, config)?;
    Ok(())
}

/// Execute the check command
///
/// Returns a failing exit code when any finding is reported.
pub fn execute_check<W: Write>(
    w: &mut W,
    store: &TaxonomyStore,
    mode: OutputMode,
    config: &OutputConfig,
) -> Result<ExitCode> {
    let findings = diagnostics::check(store);
    output::write_diagnostics(w, &findings, mode, config)?;

    if findings.is_empty() {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::FAILURE)
    }
}
