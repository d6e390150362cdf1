//! Output formatting for CLI commands.
//!
//! This module formats command results either as human-readable text or as
//! JSON for programmatic use. Every writer takes an explicit [`Write`] so the
//! CLI can pass a locked stdout and tests can pass a buffer.
//!
//! Submodules:
//! - [`color`]: Color and styling helpers
//! - [`tree`]: Hierarchy rendering with ASCII/Unicode connectors

pub mod color;
pub mod tree;

use crate::diagnostics::Diagnostic;
use crate::resolver::ConceptMapping;
use serde::Serialize;
use std::env;
use std::io::{self, Write};
use taxon_snapshot::{Concept, ConceptId, ConceptScheme};

pub use color::{success, warning};
pub use tree::write_tree;

use color::{bold, colorize_id, dimmed};

/// Output mode for CLI commands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Human-readable text output
    Text,
    /// Pretty-printed JSON output
    Json,
}

impl OutputMode {
    /// Pick the mode from the global `--json` flag.
    #[must_use]
    pub fn from_json_flag(json: bool) -> Self {
        if json { Self::Json } else { Self::Text }
    }
}

/// Configuration for output formatting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputConfig {
    /// Whether to use ASCII-only icons and connectors instead of Unicode.
    pub use_ascii: bool,
    /// Whether to use colors in output.
    pub use_colors: bool,
}

impl OutputConfig {
    /// Create an `OutputConfig` with explicit values.
    #[must_use]
    pub fn new(use_ascii: bool, use_colors: bool) -> Self {
        Self {
            use_ascii,
            use_colors,
        }
    }

    /// Create an `OutputConfig` by reading from environment variables.
    ///
    /// Reads:
    /// - `TAXON_ASCII`: Set to "1" or "true" for ASCII-only output (default: false)
    /// - `NO_COLOR`: Standard env var to disable colors (any value disables colors)
    /// - `TAXON_COLOR`: Set to "0" or "false" to disable colors (default: true)
    #[must_use]
    pub fn from_env() -> Self {
        let use_ascii = match env::var("TAXON_ASCII") {
            Ok(v) if v == "1" || v.eq_ignore_ascii_case("true") => true,
            Ok(v) if v == "0" || v.eq_ignore_ascii_case("false") || v.is_empty() => false,
            Ok(v) => {
                tracing::warn!(
                    env_var = "TAXON_ASCII",
                    value = %v,
                    "Invalid value (expected '1', 'true', '0', or 'false'), using default"
                );
                false
            }
            Err(_) => false,
        };

        // Respect NO_COLOR (https://no-color.org/), with TAXON_COLOR for explicit control
        let use_colors = env::var("NO_COLOR").is_err()
            && env::var("TAXON_COLOR")
                .map(|v| v != "0" && !v.eq_ignore_ascii_case("false"))
                .unwrap_or(true);

        Self {
            use_ascii,
            use_colors,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            use_ascii: false,
            use_colors: true,
        }
    }
}

fn write_json<W: Write, T: Serialize + ?Sized>(w: &mut W, value: &T) -> io::Result<()> {
    let output = serde_json::to_string_pretty(value).map_err(io::Error::other)?;
    writeln!(w, "{output}")
}

fn join_ids(ids: &[ConceptId], config: &OutputConfig) -> String {
    if ids.is_empty() {
        return dimmed("(none)", config);
    }
    ids.iter()
        .map(|id| colorize_id(id.as_str(), config))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Write a list of concepts, one `id  label` line each.
pub fn write_concepts<W: Write>(
    w: &mut W,
    concepts: &[&Concept],
    mode: OutputMode,
    config: &OutputConfig,
) -> io::Result<()> {
    match mode {
        OutputMode::Json => write_json(w, concepts),
        OutputMode::Text => {
            if concepts.is_empty() {
                return writeln!(w, "{}", dimmed("No concepts found.", config));
            }
            for concept in concepts {
                writeln!(
                    w,
                    "{}  {}",
                    colorize_id(concept.id.as_str(), config),
                    concept.label
                )?;
            }
            Ok(())
        }
    }
}

/// Write one concept with all three link lists.
pub fn write_concept_details<W: Write>(
    w: &mut W,
    concept: &Concept,
    mode: OutputMode,
    config: &OutputConfig,
) -> io::Result<()> {
    match mode {
        OutputMode::Json => write_json(w, concept),
        OutputMode::Text => {
            writeln!(
                w,
                "{}  {}",
                colorize_id(concept.id.as_str(), config),
                bold(&concept.label, config)
            )?;
            writeln!(
                w,
                "  {} {}",
                dimmed("broader: ", config),
                join_ids(&concept.broader, config)
            )?;
            writeln!(
                w,
                "  {} {}",
                dimmed("narrower:", config),
                join_ids(&concept.narrower, config)
            )?;
            writeln!(
                w,
                "  {} {}",
                dimmed("related: ", config),
                join_ids(&concept.related, config)
            )
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SchemeView<'a> {
    #[serde(flatten)]
    scheme: &'a ConceptScheme,
    concept_count: usize,
    top_concepts: &'a [&'a Concept],
}

/// Write scheme metadata with its resolved top concepts.
pub fn write_scheme<W: Write>(
    w: &mut W,
    scheme: &ConceptScheme,
    concept_count: usize,
    top_concepts: &[&Concept],
    mode: OutputMode,
    config: &OutputConfig,
) -> io::Result<()> {
    match mode {
        OutputMode::Json => write_json(
            w,
            &SchemeView {
                scheme,
                concept_count,
                top_concepts,
            },
        ),
        OutputMode::Text => {
            writeln!(
                w,
                "{} {}",
                bold(&scheme.name, config),
                dimmed(&format!("({})", scheme.id), config)
            )?;
            writeln!(w, "{} {}", dimmed("Concepts:", config), concept_count)?;
            writeln!(
                w,
                "{} {}",
                dimmed("Top concepts:", config),
                join_ids(&scheme.top_concept_ids, config)
            )?;
            for concept in top_concepts {
                writeln!(
                    w,
                    "  {}  {}",
                    colorize_id(concept.id.as_str(), config),
                    concept.label
                )?;
            }
            Ok(())
        }
    }
}

/// Write per-input resolution results.
pub fn write_mappings<W: Write>(
    w: &mut W,
    mappings: &[ConceptMapping<'_>],
    mode: OutputMode,
    config: &OutputConfig,
) -> io::Result<()> {
    match mode {
        OutputMode::Json => write_json(w, mappings),
        OutputMode::Text => {
            let arrow = if config.use_ascii { "->" } else { "→" };
            for mapping in mappings {
                let outputs: Vec<ConceptId> = mapping
                    .output_concepts
                    .iter()
                    .map(|c| c.id.clone())
                    .collect();
                writeln!(
                    w,
                    "{} {} {} {}",
                    colorize_id(mapping.input_node.as_str(), config),
                    dimmed(&format!("{arrow} {}", mapping.kind), config),
                    dimmed(":", config),
                    join_ids(&outputs, config)
                )?;
            }
            Ok(())
        }
    }
}

/// Write a flat list of ids, one per line.
pub fn write_ids<W: Write>(
    w: &mut W,
    ids: &[ConceptId],
    mode: OutputMode,
    config: &OutputConfig,
) -> io::Result<()> {
    match mode {
        OutputMode::Json => write_json(w, ids),
        OutputMode::Text => {
            for id in ids {
                writeln!(w, "{}", colorize_id(id.as_str(), config))?;
            }
            Ok(())
        }
    }
}

/// Write consistency findings followed by a summary line.
pub fn write_diagnostics<W: Write>(
    w: &mut W,
    findings: &[Diagnostic],
    mode: OutputMode,
    config: &OutputConfig,
) -> io::Result<()> {
    match mode {
        OutputMode::Json => write_json(w, findings),
        OutputMode::Text => {
            if findings.is_empty() {
                return writeln!(w, "{}", success("No consistency problems found.", config));
            }
            for finding in findings {
                writeln!(w, "{} {finding}", warning("warning:", config))?;
            }
            let noun = if findings.len() == 1 { "finding" } else { "findings" };
            writeln!(w, "{}", bold(&format!("{} {noun}", findings.len()), config))
        }
    }
}
