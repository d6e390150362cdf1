//! CLI input validation functions.
//!
//! These validators are used by clap's `value_parser` attribute to validate
//! user input at parse time, providing immediate feedback for invalid values.

use crate::resolver::RelationshipKind;

/// Validate a concept id argument.
///
/// Concept ids are opaque, so the only requirement is that something other
/// than whitespace was given. Surrounding whitespace is trimmed.
pub fn validate_concept_id(s: &str) -> Result<String, String> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return Err("Concept ID cannot be empty".to_string());
    }
    Ok(trimmed.to_string())
}

/// Parse a relationship kind argument.
///
/// Delegates to [`RelationshipKind::from_str`](std::str::FromStr) so the CLI
/// accepts exactly the kinds the resolver supports.
pub fn parse_relationship_kind(s: &str) -> Result<RelationshipKind, String> {
    s.parse::<RelationshipKind>().map_err(|e| {
        let valid: Vec<&str> = RelationshipKind::ALL.iter().map(|k| k.as_str()).collect();
        format!("{e} (expected one of: {})", valid.join(", "))
    })
}
