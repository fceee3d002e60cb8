// src/dag/builder.rs

//! Lineage reconstruction: edges plus colour families from the sketch table.

use std::collections::BTreeMap;

use tracing::{debug, trace};

use crate::dag::node::{Edge, SketchNode};
use crate::errors::{Result, SketchDagError};
use crate::types::{EdgeKind, FamilyId, NodeId, Operation};

/// Family-id allocator.
///
/// Passed into and returned from the build so that no global counter exists;
/// ids are handed out monotonically starting from the initial value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FamilyCounter {
    next: FamilyId,
}

impl FamilyCounter {
    pub fn starting_at(next: FamilyId) -> Self {
        Self { next }
    }

    /// The id the next allocation will return.
    pub fn peek(&self) -> FamilyId {
        self.next
    }

    fn allocate(&mut self) -> FamilyId {
        let id = self.next;
        self.next += 1;
        id
    }
}

/// Output of [`build`]: the lineage edges, the family of every node, and the
/// counter state after the last allocation.
#[derive(Debug, Clone, PartialEq)]
pub struct LineageModel {
    pub edges: Vec<Edge>,
    pub families: BTreeMap<NodeId, FamilyId>,
    pub counter: FamilyCounter,
}

impl LineageModel {
    pub fn family_of(&self, node: &str) -> Option<FamilyId> {
        self.families.get(node).copied()
    }

    /// Number of distinct families that were allocated.
    pub fn family_count(&self) -> usize {
        let mut ids: Vec<FamilyId> = self.families.values().copied().collect();
        ids.sort_unstable();
        ids.dedup();
        ids.len()
    }
}

/// Build the lineage of `nodes` with family ids starting at 0.
pub fn build(nodes: &BTreeMap<NodeId, SketchNode>) -> Result<LineageModel> {
    build_with_counter(nodes, FamilyCounter::default())
}

/// Build the lineage of `nodes`, allocating family ids from `counter`.
///
/// Two sub-passes over `nodes` in map order:
/// 1. every `create` node gets a fresh family;
/// 2. every other node emits its incoming edges. `merge` and `split` nodes
///    get a fresh family; `expand`/`shrink` inherit their parent's family.
///
/// An `expand`/`shrink` whose parent has no family yet is retried after the
/// pass until nothing changes, so parents do not have to precede children.
pub fn build_with_counter(
    nodes: &BTreeMap<NodeId, SketchNode>,
    mut counter: FamilyCounter,
) -> Result<LineageModel> {
    let mut families: BTreeMap<NodeId, FamilyId> = BTreeMap::new();
    let mut edges: Vec<Edge> = Vec::new();

    for (id, node) in nodes.iter() {
        if node.operation == Operation::Create {
            let family = counter.allocate();
            trace!(node = %id, family, "create node starts a family");
            families.insert(id.clone(), family);
        }
    }

    // (child, parent) pairs waiting for the parent's family.
    let mut deferred: Vec<(&str, &str)> = Vec::new();

    for (id, node) in nodes.iter() {
        match node.operation {
            Operation::Create => {}
            Operation::Expand | Operation::Shrink => {
                let kind = if node.operation == Operation::Expand {
                    EdgeKind::Expand
                } else {
                    EdgeKind::Shrink
                };
                let parent = resolve_parent(nodes, id, node)?;
                edges.push(Edge::new(parent, id.as_str(), kind));

                match families.get(parent).copied() {
                    Some(family) => {
                        families.insert(id.clone(), family);
                    }
                    None => {
                        debug!(node = %id, parent, "parent family not known yet; deferring");
                        deferred.push((id.as_str(), parent));
                    }
                }
            }
            Operation::Merge => {
                let parents = merge_parents(node);
                if parents.is_empty() {
                    return Err(SketchDagError::UnresolvableParent { node: id.clone() });
                }
                for parent in parents {
                    ensure_known(nodes, id, parent)?;
                    edges.push(Edge::new(parent, id.as_str(), EdgeKind::Merge));
                }
                let family = counter.allocate();
                trace!(node = %id, family, "merge node starts a family");
                families.insert(id.clone(), family);
            }
            Operation::Split => {
                let parent = resolve_parent(nodes, id, node)?;
                edges.push(Edge::new(parent, id.as_str(), EdgeKind::Split));
                let family = counter.allocate();
                trace!(node = %id, family, "split node starts a family");
                families.insert(id.clone(), family);
            }
        }
    }

    while !deferred.is_empty() {
        let before = deferred.len();
        deferred.retain(|&(child, parent)| match families.get(parent).copied() {
            Some(family) => {
                families.insert(child.to_string(), family);
                false
            }
            None => true,
        });

        if deferred.len() == before {
            // No progress: the remaining parents can never obtain a family.
            let (child, _) = deferred[0];
            return Err(SketchDagError::UnresolvableParent {
                node: child.to_string(),
            });
        }
    }

    debug!(
        edges = edges.len(),
        families = families.len(),
        next_family = counter.peek(),
        "lineage built"
    );

    Ok(LineageModel {
        edges,
        families,
        counter,
    })
}

/// Parent of an expand/shrink/split node, checked against the table.
fn resolve_parent<'a>(
    nodes: &BTreeMap<NodeId, SketchNode>,
    id: &str,
    node: &'a SketchNode,
) -> Result<&'a str> {
    let parent = node
        .primary_source()
        .ok_or_else(|| SketchDagError::UnresolvableParent { node: id.to_string() })?;
    ensure_known(nodes, id, parent)?;
    Ok(parent)
}

/// Parents of a merge node: `sources`, or the lone `source` when the list is
/// empty.
fn merge_parents(node: &SketchNode) -> Vec<&str> {
    let listed: Vec<&str> = node
        .sources
        .iter()
        .map(String::as_str)
        .filter(|s| !s.is_empty())
        .collect();

    if listed.is_empty() {
        node.primary_source().into_iter().collect()
    } else {
        listed
    }
}

fn ensure_known(nodes: &BTreeMap<NodeId, SketchNode>, id: &str, parent: &str) -> Result<()> {
    if nodes.contains_key(parent) {
        Ok(())
    } else {
        Err(SketchDagError::UnknownSource {
            node: id.to_string(),
            source_id: parent.to_string(),
        })
    }
}
