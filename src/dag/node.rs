// src/dag/node.rs

use serde::{Deserialize, Serialize};

use crate::types::{EdgeKind, NodeId, Operation};

/// One entry of `config.sketches`: how a sketch instance was produced.
///
/// `source` names a single parent; `sources` an ordered list of parents
/// (used by `merge`, and by `split` where only the first entry matters).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SketchNode {
    pub operation: Operation,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<NodeId>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sources: Vec<NodeId>,

    /// Declared capacity at creation/resize; 0 when the runner omitted it.
    #[serde(default)]
    pub memory_budget_kb: u64,
}

impl SketchNode {
    pub fn new(operation: Operation) -> Self {
        Self {
            operation,
            source: None,
            sources: Vec::new(),
            memory_budget_kb: 0,
        }
    }

    /// The structural parent of an expand/shrink/split node: `source` when
    /// set, otherwise the first entry of `sources`. Empty ids count as unset.
    pub fn primary_source(&self) -> Option<&str> {
        match self.source.as_deref() {
            Some(s) if !s.is_empty() => Some(s),
            _ => self
                .sources
                .first()
                .map(String::as_str)
                .filter(|s| !s.is_empty()),
        }
    }

    /// Every parent id this node mentions, `source` first.
    pub fn referenced_sources(&self) -> impl Iterator<Item = &str> {
        self.source
            .as_deref()
            .into_iter()
            .chain(self.sources.iter().map(String::as_str))
            .filter(|s| !s.is_empty())
    }
}

/// Directed lineage edge `source -> target`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Edge {
    pub source: NodeId,
    pub target: NodeId,
    pub kind: EdgeKind,
}

impl Edge {
    pub fn new(source: impl Into<NodeId>, target: impl Into<NodeId>, kind: EdgeKind) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            kind,
        }
    }
}
