// src/dag/graph.rs

use std::collections::{BTreeMap, HashMap};

use crate::dag::node::{Edge, SketchNode};
use crate::errors::{Result, SketchDagError};
use crate::types::NodeId;

/// Internal node structure: stores immediate parents and children.
#[derive(Debug, Clone, Default)]
struct GraphNode {
    /// Sources of incoming edges, in edge order (duplicates kept).
    parents: Vec<NodeId>,
    /// Targets of outgoing edges, in edge order (duplicates kept).
    children: Vec<NodeId>,
}

/// Read-only adjacency view over a lineage edge list.
///
/// Node iteration order is the order of the sketch table, which the layout
/// relies on for its tie-breaking.
#[derive(Debug, Clone)]
pub struct LineageGraph {
    order: Vec<NodeId>,
    nodes: HashMap<NodeId, GraphNode>,
}

impl LineageGraph {
    /// Build the adjacency of `edges` over the ids of `nodes`.
    ///
    /// Fails with `UnknownNode` if an edge endpoint is not in `nodes`.
    pub fn new(nodes: &BTreeMap<NodeId, SketchNode>, edges: &[Edge]) -> Result<Self> {
        let order: Vec<NodeId> = nodes.keys().cloned().collect();
        let mut graph: HashMap<NodeId, GraphNode> = order
            .iter()
            .map(|id| (id.clone(), GraphNode::default()))
            .collect();

        for edge in edges {
            for endpoint in [&edge.source, &edge.target] {
                if !graph.contains_key(endpoint) {
                    return Err(SketchDagError::UnknownNode(endpoint.clone()));
                }
            }
            if let Some(target) = graph.get_mut(&edge.target) {
                target.parents.push(edge.source.clone());
            }
            if let Some(source) = graph.get_mut(&edge.source) {
                source.children.push(edge.target.clone());
            }
        }

        Ok(Self {
            order,
            nodes: graph,
        })
    }

    /// All node ids, in sketch-table order.
    pub fn node_ids(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(|s| s.as_str())
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.nodes.contains_key(id)
    }

    /// Immediate parents (sources of incoming edges).
    pub fn parents_of(&self, id: &str) -> &[NodeId] {
        self.nodes
            .get(id)
            .map(|n| n.parents.as_slice())
            .unwrap_or(&[])
    }

    /// Immediate children (targets of outgoing edges).
    pub fn children_of(&self, id: &str) -> &[NodeId] {
        self.nodes
            .get(id)
            .map(|n| n.children.as_slice())
            .unwrap_or(&[])
    }

    pub fn in_degree(&self, id: &str) -> usize {
        self.parents_of(id).len()
    }

    /// Nodes without incoming edges, in sketch-table order.
    pub fn roots(&self) -> impl Iterator<Item = &str> {
        self.node_ids().filter(|id| self.in_degree(id) == 0)
    }
}
