// src/layout/engine.rs

use std::cmp::Ordering;
use std::collections::BTreeMap;

use serde::Serialize;
use tracing::{debug, trace};

use crate::config::model::LayoutSection;
use crate::dag::graph::LineageGraph;
use crate::dag::node::{Edge, SketchNode};
use crate::errors::Result;
use crate::layout::layering::assign_layers;
use crate::types::NodeId;

/// Spacing between layers (x) and between nodes of one layer (y).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutOptions {
    pub x_spacing: f64,
    pub y_spacing: f64,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        let section = LayoutSection::default();
        Self::from(&section)
    }
}

impl From<&LayoutSection> for LayoutOptions {
    fn from(section: &LayoutSection) -> Self {
        Self {
            x_spacing: section.x_spacing,
            y_spacing: section.y_spacing,
        }
    }
}

/// Drawing position of one node plus its layer index.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LayoutPosition {
    pub x: f64,
    pub y: f64,
    pub layer: usize,
}

/// Axis-aligned box around all positions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Bounds {
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
}

/// Result of [`layout`]: layers in their final order and one position per node.
#[derive(Debug, Clone, PartialEq)]
pub struct Layout {
    layers: Vec<Vec<NodeId>>,
    positions: BTreeMap<NodeId, LayoutPosition>,
}

impl Layout {
    /// Layers after barycenter ordering; index = layer number.
    pub fn layers(&self) -> &[Vec<NodeId>] {
        &self.layers
    }

    pub fn positions(&self) -> &BTreeMap<NodeId, LayoutPosition> {
        &self.positions
    }

    pub fn position(&self, node: &str) -> Option<LayoutPosition> {
        self.positions.get(node).copied()
    }

    pub fn layer_of(&self, node: &str) -> Option<usize> {
        self.positions.get(node).map(|p| p.layer)
    }

    /// Bounding box of all positions padded by `margin`; `None` when empty.
    pub fn bounds(&self, margin: f64) -> Option<Bounds> {
        let mut iter = self.positions.values();
        let first = iter.next()?;
        let init = Bounds {
            min_x: first.x,
            max_x: first.x,
            min_y: first.y,
            max_y: first.y,
        };
        let b = iter.fold(init, |b, p| Bounds {
            min_x: b.min_x.min(p.x),
            max_x: b.max_x.max(p.x),
            min_y: b.min_y.min(p.y),
            max_y: b.max_y.max(p.y),
        });

        Some(Bounds {
            min_x: b.min_x - margin,
            max_x: b.max_x + margin,
            min_y: b.min_y - margin,
            max_y: b.max_y + margin,
        })
    }
}

/// Assign a 2-D position to every sketch.
pub fn layout(
    nodes: &BTreeMap<NodeId, SketchNode>,
    edges: &[Edge],
    options: &LayoutOptions,
) -> Result<Layout> {
    let graph = LineageGraph::new(nodes, edges)?;
    layout_graph(&graph, options)
}

/// Layered layout over an existing adjacency view.
///
/// 1. Topological layers via [`assign_layers`].
/// 2. Every layer after the first is stably sorted by the mean y of its
///    already-placed parents (0 when none is placed). This is one forward
///    barycenter pass; earlier layers are never revisited.
/// 3. `x = layer * x_spacing`; within a layer of `n` nodes the `i`-th gets
///    `y = i * y_spacing - (n - 1) * y_spacing / 2`, centring it on 0.
pub fn layout_graph(graph: &LineageGraph, options: &LayoutOptions) -> Result<Layout> {
    let layers = assign_layers(graph)?;

    let mut positions: BTreeMap<NodeId, LayoutPosition> = BTreeMap::new();
    let mut ordered_layers: Vec<Vec<NodeId>> = Vec::with_capacity(layers.len());

    for (layer_idx, layer) in layers.into_iter().enumerate() {
        let ordered = if layer_idx == 0 {
            layer
        } else {
            order_by_barycenter(layer, graph, &positions)
        };

        let x = layer_idx as f64 * options.x_spacing;
        let y_offset = ordered.len().saturating_sub(1) as f64 * options.y_spacing / 2.0;

        for (node_idx, id) in ordered.iter().enumerate() {
            let y = node_idx as f64 * options.y_spacing - y_offset;
            trace!(node = %id, layer = layer_idx, x, y, "placed");
            positions.insert(
                id.clone(),
                LayoutPosition {
                    x,
                    y,
                    layer: layer_idx,
                },
            );
        }

        ordered_layers.push(ordered);
    }

    debug!(
        layers = ordered_layers.len(),
        nodes = positions.len(),
        "layout complete"
    );

    Ok(Layout {
        layers: ordered_layers,
        positions,
    })
}

fn order_by_barycenter(
    layer: Vec<NodeId>,
    graph: &LineageGraph,
    positions: &BTreeMap<NodeId, LayoutPosition>,
) -> Vec<NodeId> {
    let mut keyed: Vec<(NodeId, f64)> = layer
        .into_iter()
        .map(|id| {
            let key = parent_barycenter(&id, graph, positions);
            (id, key)
        })
        .collect();

    // `sort_by` is stable: equal keys keep frontier-discovery order.
    keyed.sort_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(Ordering::Equal));
    keyed.into_iter().map(|(id, _)| id).collect()
}

/// Mean y of the placed parents of `id`, or 0 when none is placed.
fn parent_barycenter(
    id: &str,
    graph: &LineageGraph,
    positions: &BTreeMap<NodeId, LayoutPosition>,
) -> f64 {
    let ys: Vec<f64> = graph
        .parents_of(id)
        .iter()
        .filter_map(|p| positions.get(p).map(|pos| pos.y))
        .collect();

    if ys.is_empty() {
        0.0
    } else {
        ys.iter().sum::<f64>() / ys.len() as f64
    }
}
