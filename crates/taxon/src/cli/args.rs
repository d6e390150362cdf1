//! CLI argument structs for all commands.
//!
//! Each command has its own argument struct with clap derive attributes
//! for parsing and validation.

use clap::Parser;

use super::validators::{parse_relationship_kind, validate_concept_id};
use crate::resolver::RelationshipKind;

/// Arguments for commands that take a single concept
#[derive(Parser, Debug, Clone)]
pub struct ConceptArgs {
    /// Concept ID
    #[arg(value_parser = validate_concept_id)]
    pub concept_id: String,
}

/// Arguments for the `resolve` command
#[derive(Parser, Debug, Clone)]
pub struct ResolveArgs {
    /// Relationship to resolve (broader, narrower, or related)
    #[arg(short, long, value_parser = parse_relationship_kind)]
    pub kind: RelationshipKind,

    /// Input concept IDs (space- or comma-separated)
    #[arg(required = true, value_delimiter = ',', value_parser = validate_concept_id)]
    pub concept_ids: Vec<String>,

    /// Show which input produced which concepts
    #[arg(short, long)]
    pub mapping: bool,
}

/// Arguments for commands that expand the hierarchy
#[derive(Parser, Debug, Clone)]
pub struct ExpandArgs {
    /// Concept to start from (defaults to the scheme's top concepts)
    #[arg(value_parser = validate_concept_id)]
    pub root: Option<String>,
}
