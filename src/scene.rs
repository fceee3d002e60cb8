// src/scene.rs

//! Data handed to the external renderer.
//!
//! A [`LineageScene`] is everything needed to draw the lineage figure: one
//! entry per sketch with its position, family and metrics, one entry per edge
//! with its stroke style and label, plus the title and drawing bounds. No
//! drawing happens here.

use serde::Serialize;
use tracing::{debug, info};

use crate::config::model::Settings;
use crate::dag::builder::{LineageModel, build};
use crate::document::model::{Repetition, ResultDocument, SketchConfig};
use crate::errors::{Result, SketchDagError};
use crate::layout::{Bounds, Layout, LayoutOptions, layout};
use crate::metrics::{NodeSummary, format_memory, structural_op_for, summarize};
use crate::types::{EdgeKind, EdgeStyle, FamilyId, NodeId, Operation};

/// Presentation knobs that influence the scene contents.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneOptions {
    pub show_structural_ops: bool,
    pub margin: f64,
}

impl From<&Settings> for SceneOptions {
    fn from(settings: &Settings) -> Self {
        Self {
            show_structural_ops: settings.render().show_structural_ops,
            margin: settings.layout().margin,
        }
    }
}

impl Default for SceneOptions {
    fn default() -> Self {
        Self::from(&Settings::default())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NodeView {
    pub id: NodeId,
    pub operation: Operation,
    pub family: FamilyId,
    pub x: f64,
    pub y: f64,
    pub layer: usize,
    /// `None` means "No data": draw a placeholder.
    pub summary: Option<NodeSummary>,
    /// `"CREATE (d=4, k=200)"` for create nodes, `None` otherwise.
    pub create_label: Option<String>,
    pub budget_label: String,
    pub used_label: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EdgeView {
    pub source: NodeId,
    pub target: NodeId,
    pub kind: EdgeKind,
    pub style: EdgeStyle,
    pub label: String,
    /// Latency of the operation that produced `target`, when shown.
    pub latency_ms: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineageScene {
    pub title: String,
    pub dag_name: String,
    pub timestamp: String,
    pub repetition: usize,
    pub family_count: usize,
    pub nodes: Vec<NodeView>,
    pub edges: Vec<EdgeView>,
    pub bounds: Option<Bounds>,
}

impl LineageScene {
    /// Run the whole pipeline for one repetition: lineage build, layout,
    /// metrics aggregation and scene assembly.
    pub fn from_document(
        doc: &ResultDocument,
        requested_repetition: usize,
        settings: &Settings,
    ) -> Result<Self> {
        let (index, repetition) = doc.select_repetition(requested_repetition)?;

        let model = build(doc.sketches())?;
        let layout = layout(
            doc.sketches(),
            &model.edges,
            &LayoutOptions::from(settings.layout()),
        )?;

        debug!(edges = ?model.edges, "lineage edges");
        debug!(families = ?model.families, "lineage families");
        debug!(positions = ?layout.positions(), "layout positions");

        let scene = Self::assemble(
            doc,
            index,
            repetition,
            &model,
            &layout,
            &SceneOptions::from(settings),
        )?;

        info!(
            nodes = scene.nodes.len(),
            edges = scene.edges.len(),
            families = scene.family_count,
            repetition = index,
            "scene assembled"
        );
        Ok(scene)
    }

    /// Combine already-computed pieces into a scene.
    ///
    /// Nodes follow sketch-table order and edges follow build order. A node
    /// missing from the family map or the layout is reported as an error.
    pub fn assemble(
        doc: &ResultDocument,
        repetition_index: usize,
        repetition: &Repetition,
        model: &LineageModel,
        layout: &Layout,
        options: &SceneOptions,
    ) -> Result<Self> {
        let sketch_config = doc.config().sketch_config;

        let mut nodes = Vec::with_capacity(doc.sketches().len());
        for (id, sketch) in doc.sketches().iter() {
            let family = model
                .family_of(id)
                .ok_or_else(|| SketchDagError::UnresolvableParent { node: id.clone() })?;
            let position = layout
                .position(id)
                .ok_or_else(|| SketchDagError::DisconnectedNode { node: id.clone() })?;

            let summary = summarize(id, &repetition.checkpoints, &repetition.structural_ops);
            let used_label = summary.as_ref().map(|s| format_memory(s.memory_kb));

            nodes.push(NodeView {
                id: id.clone(),
                operation: sketch.operation,
                family,
                x: position.x,
                y: position.y,
                layer: position.layer,
                summary,
                create_label: (sketch.operation == Operation::Create)
                    .then(|| create_label(sketch_config)),
                budget_label: format_memory(sketch.memory_budget_kb),
                used_label,
            });
        }

        let edges = model
            .edges
            .iter()
            .map(|edge| {
                let latency_ms = if options.show_structural_ops {
                    structural_op_for(&edge.target, &repetition.structural_ops)
                        .map(|op| op.latency_ms())
                } else {
                    None
                };
                let label = match latency_ms {
                    Some(ms) => format!("{}\n{:.1}ms", edge.kind.label(), ms),
                    None => edge.kind.label().to_string(),
                };

                EdgeView {
                    source: edge.source.clone(),
                    target: edge.target.clone(),
                    kind: edge.kind,
                    style: EdgeStyle::from(edge.kind),
                    label,
                    latency_ms,
                }
            })
            .collect();

        Ok(Self {
            title: title(doc, repetition_index),
            dag_name: doc.metadata().dag_name().to_string(),
            timestamp: doc.metadata().timestamp().to_string(),
            repetition: repetition_index,
            family_count: model.family_count(),
            nodes,
            edges,
            bounds: layout.bounds(options.margin),
        })
    }

    pub fn node(&self, id: &str) -> Option<&NodeView> {
        self.nodes.iter().find(|n| n.id == id)
    }
}

fn title(doc: &ResultDocument, repetition_index: usize) -> String {
    let mut title = format!("ReSketch DAG Results: {}", doc.metadata().dag_name());
    let declared = doc.declared_repetitions();
    if declared > 1 {
        title.push_str(&format!(
            " (Repetition {}/{})",
            repetition_index + 1,
            declared
        ));
    }
    title
}

fn create_label(sketch_config: Option<SketchConfig>) -> String {
    match sketch_config {
        Some(cfg) => format!("CREATE (d={}, k={})", cfg.depth, cfg.kll_k),
        None => "CREATE".to_string(),
    }
}
