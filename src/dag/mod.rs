// src/dag/mod.rs

//! Lineage DAG model.
//!
//! - [`node`] holds the sketch table entry and edge types.
//! - [`builder`] reconstructs edges and colour families from the table.
//! - [`graph`] is a read-only adjacency view used by the layout.

pub mod builder;
pub mod graph;
pub mod node;

pub use builder::{FamilyCounter, LineageModel, build, build_with_counter};
pub use graph::LineageGraph;
pub use node::{Edge, SketchNode};
