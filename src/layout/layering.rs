// src/layout/layering.rs

use std::collections::HashMap;

use tracing::{debug, trace};

use crate::dag::graph::LineageGraph;
use crate::errors::{Result, SketchDagError};
use crate::types::NodeId;

/// Split the graph into topological layers by repeated frontier removal
/// (Kahn's algorithm).
///
/// - Layer 0 holds every zero in-degree node, in sketch-table order.
/// - A node joins the next frontier when its last incoming edge is removed,
///   in the order its predecessor was visited, then in child-list order.
///
/// Every edge `(u, v)` ends up with `layer(u) < layer(v)`. If some node never
/// reaches in-degree 0 (a cycle) the first such node in table order is
/// reported as `DisconnectedNode`; no partial layering is returned.
pub fn assign_layers(graph: &LineageGraph) -> Result<Vec<Vec<NodeId>>> {
    let mut in_degree: HashMap<&str, usize> = graph
        .node_ids()
        .map(|id| (id, graph.in_degree(id)))
        .collect();

    let mut frontier: Vec<&str> = graph.roots().collect();
    let mut layers: Vec<Vec<NodeId>> = Vec::new();
    let mut placed = 0usize;

    while !frontier.is_empty() {
        trace!(layer = layers.len(), nodes = ?frontier, "frontier");

        let mut next: Vec<&str> = Vec::new();
        for &node in &frontier {
            for child in graph.children_of(node) {
                if let Some(degree) = in_degree.get_mut(child.as_str()) {
                    *degree -= 1;
                    if *degree == 0 {
                        next.push(child.as_str());
                    }
                }
            }
        }

        placed += frontier.len();
        layers.push(frontier.iter().map(|id| id.to_string()).collect());
        frontier = next;
    }

    if placed != graph.len() {
        let stuck = graph
            .node_ids()
            .find(|id| in_degree.get(id).copied().unwrap_or(0) > 0)
            .unwrap_or_default();
        return Err(SketchDagError::DisconnectedNode {
            node: stuck.to_string(),
        });
    }

    debug!(layers = layers.len(), nodes = placed, "layering complete");
    Ok(layers)
}
