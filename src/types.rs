use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Identifier of a sketch instance (the key in `config.sketches`).
pub type NodeId = String;

/// Colour family shared by sketches on the same thread/device lineage.
pub type FamilyId = usize;

/// Operation that produced a sketch instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    Create,
    Expand,
    Shrink,
    Merge,
    Split,
}

impl Operation {
    /// The edge kind produced by this operation, or `None` for `create`.
    pub fn edge_kind(self) -> Option<EdgeKind> {
        match self {
            Operation::Create => None,
            Operation::Expand => Some(EdgeKind::Expand),
            Operation::Shrink => Some(EdgeKind::Shrink),
            Operation::Merge => Some(EdgeKind::Merge),
            Operation::Split => Some(EdgeKind::Split),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Operation::Create => "create",
            Operation::Expand => "expand",
            Operation::Shrink => "shrink",
            Operation::Merge => "merge",
            Operation::Split => "split",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Operation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "create" => Ok(Operation::Create),
            "expand" => Ok(Operation::Expand),
            "shrink" => Ok(Operation::Shrink),
            "merge" => Ok(Operation::Merge),
            "split" => Ok(Operation::Split),
            other => Err(format!(
                "invalid operation: {other} (expected create, expand, shrink, merge or split)"
            )),
        }
    }
}

/// Structural transformation relating a parent sketch to a child.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgeKind {
    Expand,
    Shrink,
    Merge,
    Split,
}

impl EdgeKind {
    /// `true` when the child stays on its parent's thread/device lineage.
    ///
    /// - expand/shrink: same lineage, same family.
    /// - merge/split: the child starts a new family.
    pub fn preserves_lineage(self) -> bool {
        matches!(self, EdgeKind::Expand | EdgeKind::Shrink)
    }

    /// Capitalised label used on drawn edges.
    pub fn label(self) -> &'static str {
        match self {
            EdgeKind::Expand => "Expand",
            EdgeKind::Shrink => "Shrink",
            EdgeKind::Merge => "Merge",
            EdgeKind::Split => "Split",
        }
    }
}

impl fmt::Display for EdgeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            EdgeKind::Expand => "expand",
            EdgeKind::Shrink => "shrink",
            EdgeKind::Merge => "merge",
            EdgeKind::Split => "split",
        };
        f.write_str(s)
    }
}

/// How an edge should be stroked by the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgeStyle {
    Solid,
    Dashed,
}

impl From<EdgeKind> for EdgeStyle {
    fn from(kind: EdgeKind) -> Self {
        if kind.preserves_lineage() {
            EdgeStyle::Solid
        } else {
            EdgeStyle::Dashed
        }
    }
}
