//! DOT format export for Graphviz visualization.
//!
//! Generates Graphviz DOT format for rendering dependency graphs as images.
//! Edges point from a dependency to its dependent.

use crate::{DependencyGraph, NodeKey};
use std::collections::HashMap;
use std::fmt::Display;

/// Options for styling DOT export
#[derive(Debug, Clone)]
pub struct DotOptions {
    /// Fill color for declared nodes (hex color code)
    pub declared_color: String,
    /// Fill color for placeholder nodes (hex color code)
    pub placeholder_color: String,
    /// Fill color for roots, if they should stand out
    pub root_color: Option<String>,
    /// Graph layout direction: LR, TB, RL, BT
    pub rankdir: String,
}

impl Default for DotOptions {
    fn default() -> Self {
        DotOptions {
            declared_color: "#90CAF9".to_string(),
            placeholder_color: "#E0E0E0".to_string(),
            root_color: Some("#A5D6A7".to_string()),
            rankdir: "LR".to_string(),
        }
    }
}

/// Export graph to Graphviz DOT format
pub fn export_dot<K: NodeKey + Display>(graph: &DependencyGraph<K>) -> String {
    export_dot_styled(graph, DotOptions::default())
}

/// Export graph to Graphviz DOT format with custom styling
///
/// Nodes are numbered in label order so the output is stable across runs.
pub fn export_dot_styled<K: NodeKey + Display>(
    graph: &DependencyGraph<K>,
    options: DotOptions,
) -> String {
    let mut nodes: Vec<(String, &K)> = graph
        .records()
        .map(|(id, _)| (escape_dot_label(&id.to_string()), id))
        .collect();
    // Distinct keys may render alike; Debug keeps the order total.
    nodes.sort_by_cached_key(|(label, id)| (label.clone(), format!("{id:?}")));

    let mut output = String::new();

    // Header
    output.push_str("digraph dependency_graph {\n");
    output.push_str(&format!("    rankdir={};\n", options.rankdir));
    output.push_str("    node [shape=box];\n\n");

    for (index, (label, id)) in nodes.iter().enumerate() {
        let Some(node) = graph.record(id) else {
            continue;
        };

        let (style, color) = if !node.is_declared() {
            ("filled,dashed", options.placeholder_color.as_str())
        } else if node.is_root() {
            (
                "filled",
                options
                    .root_color
                    .as_deref()
                    .unwrap_or(options.declared_color.as_str()),
            )
        } else {
            ("filled", options.declared_color.as_str())
        };

        output.push_str(&format!(
            "    n{index} [label=\"{label}\", style=\"{style}\", fillcolor=\"{color}\"];\n"
        ));
    }

    output.push('\n');

    let index_of: HashMap<&K, usize> = nodes
        .iter()
        .enumerate()
        .map(|(index, (_, id))| (*id, index))
        .collect();

    for (child_index, (_, id)) in nodes.iter().enumerate() {
        let Some(node) = graph.record(id) else {
            continue;
        };
        let mut parent_indices: Vec<usize> = node
            .parents()
            .iter()
            .filter_map(|parent| index_of.get(parent).copied())
            .collect();
        parent_indices.sort_unstable();

        for parent_index in parent_indices {
            output.push_str(&format!("    n{parent_index} -> n{child_index};\n"));
        }
    }

    output.push_str("}\n");

    output
}

/// Escape special characters for DOT labels
fn escape_dot_label(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n")
}
