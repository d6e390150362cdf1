//! Hierarchy rendering for `taxon tree` output.

use std::io::{self, Write};

use colored::Colorize;

use super::color::{colorize_id, dimmed};
use super::{OutputConfig, OutputMode};
use crate::traversal::{ConceptTree, ConceptTreeNode};

/// Write a concept hierarchy with ASCII/Unicode connectors.
///
/// Renders a tree like:
/// ```text
/// ◆ root Academic Programs
/// ├── cs Computer Science
/// │   └── ai Artificial Intelligence
/// └── math Mathematics
/// ```
///
/// A tree with several roots is rendered as consecutive trees. In JSON mode
/// the flat node list is written as is.
pub fn write_tree<W: Write>(
    w: &mut W,
    tree: &ConceptTree,
    mode: OutputMode,
    config: &OutputConfig,
) -> io::Result<()> {
    match mode {
        OutputMode::Text => write_tree_text(w, tree, config),
        OutputMode::Json => {
            let output = serde_json::to_string_pretty(tree).map_err(io::Error::other)?;
            writeln!(w, "{output}")
        }
    }
}

/// Render nodes in pre-order with connector lines.
///
/// `prefix` holds the continuation segments (`│` or blank) of the current
/// node's ancestors; `ends[k]` is the prefix length after `k + 1` segments.
/// Pre-order guarantees the segments on the stack belong to the current
/// node's ancestors, so each node only trims to its depth and appends.
fn write_tree_text<W: Write>(
    w: &mut W,
    tree: &ConceptTree,
    config: &OutputConfig,
) -> io::Result<()> {
    let (root_icon, branch, corner, pipe, space) = if config.use_ascii {
        ("*", "|-- ", "`-- ", "|   ", "    ")
    } else {
        ("◆", "├── ", "└── ", "│   ", "    ")
    };
    let root_icon = if config.use_colors {
        root_icon.cyan().bold().to_string()
    } else {
        root_icon.to_string()
    };
    let (branch, corner) = (dimmed(branch, config), dimmed(corner, config));
    let (pipe, space) = (dimmed(pipe, config), dimmed(space, config));

    let mut prefix = String::new();
    let mut ends: Vec<usize> = Vec::new();

    for node in tree.nodes() {
        if node.depth == 0 {
            prefix.clear();
            ends.clear();
            writeln!(
                w,
                "{} {}{}",
                root_icon,
                colorize_id(node.id.as_str(), config),
                label_suffix(node, config)
            )?;
            continue;
        }

        ends.truncate(node.depth - 1);
        prefix.truncate(ends.last().copied().unwrap_or(0));

        let connector = if node.last_sibling { &corner } else { &branch };
        writeln!(
            w,
            "{}{}{}{}",
            prefix,
            connector,
            colorize_id(node.id.as_str(), config),
            label_suffix(node, config)
        )?;

        prefix.push_str(if node.last_sibling { &space } else { &pipe });
        ends.push(prefix.len());
    }

    Ok(())
}

fn label_suffix(node: &ConceptTreeNode, config: &OutputConfig) -> String {
    match &node.label {
        Some(label) => format!(" {label}"),
        None => format!(" {}", dimmed("(unknown concept)", config)),
    }
}
