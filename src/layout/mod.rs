// src/layout/mod.rs

//! Layered drawing layout for the lineage DAG.
//!
//! - [`layering`] assigns topological layers (Kahn's algorithm).
//! - [`engine`] orders each layer by parent barycenter and computes
//!   coordinates.

pub mod engine;
pub mod layering;

pub use engine::{Bounds, Layout, LayoutOptions, LayoutPosition, layout, layout_graph};
pub use layering::assign_layers;
