// src/metrics/records.rs

//! Measurement records written by the experiment runner.
//!
//! Each record type comes in two forms:
//! - a `Raw*` form where every field is optional, used for deserialization;
//! - a strong form where every required field is present.
//!
//! Conversion never substitutes defaults for required fields: a missing field
//! is reported as [`SketchDagError::MalformedRecord`].

use serde::{Deserialize, Serialize};

use crate::errors::{Result, SketchDagError};
use crate::types::{EdgeKind, NodeId};

pub const CHECKPOINTS_SECTION: &str = "checkpoints";
pub const STRUCTURAL_OPS_SECTION: &str = "structural_operations";

/// One entry of `results[].checkpoints` as found in the document.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawCheckpointRecord {
    pub sketch_name: Option<NodeId>,
    pub items_processed: Option<u64>,
    pub throughput_mops: Option<f64>,
    pub query_throughput_mops: Option<f64>,
    pub are: Option<f64>,
    pub aae: Option<f64>,
    pub memory_kb: Option<u64>,
}

/// Periodic measurement of a sketch during a run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CheckpointRecord {
    pub sketch_name: NodeId,
    pub items_processed: u64,
    pub throughput_mops: f64,
    pub query_throughput_mops: f64,
    pub are: f64,
    pub aae: f64,
    pub memory_kb: u64,
}

impl CheckpointRecord {
    /// Convert a raw record; `index` is its position in the checkpoint list
    /// and is only used for error reporting.
    pub fn from_raw(raw: RawCheckpointRecord, index: usize) -> Result<Self> {
        let missing = |field: &'static str| SketchDagError::MalformedRecord {
            section: CHECKPOINTS_SECTION,
            index,
            field,
        };

        Ok(Self {
            sketch_name: raw.sketch_name.ok_or_else(|| missing("sketch_name"))?,
            items_processed: raw
                .items_processed
                .ok_or_else(|| missing("items_processed"))?,
            throughput_mops: raw
                .throughput_mops
                .ok_or_else(|| missing("throughput_mops"))?,
            query_throughput_mops: raw
                .query_throughput_mops
                .ok_or_else(|| missing("query_throughput_mops"))?,
            are: raw.are.ok_or_else(|| missing("are"))?,
            aae: raw.aae.ok_or_else(|| missing("aae"))?,
            memory_kb: raw.memory_kb.ok_or_else(|| missing("memory_kb"))?,
        })
    }
}

/// One entry of `results[].structural_operations` as found in the document.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawStructuralOpRecord {
    pub sketch_name: Option<NodeId>,
    pub operation: Option<EdgeKind>,
    pub latency_s: Option<f64>,
    pub are: Option<f64>,
    pub aae: Option<f64>,
    pub memory_kb: Option<u64>,
}

/// Measurement taken right after a structural operation produced a sketch.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StructuralOpRecord {
    pub sketch_name: NodeId,
    pub operation: EdgeKind,
    pub latency_s: f64,
    pub are: f64,
    pub aae: f64,
    pub memory_kb: u64,
}

impl StructuralOpRecord {
    pub fn from_raw(raw: RawStructuralOpRecord, index: usize) -> Result<Self> {
        let missing = |field: &'static str| SketchDagError::MalformedRecord {
            section: STRUCTURAL_OPS_SECTION,
            index,
            field,
        };

        Ok(Self {
            sketch_name: raw.sketch_name.ok_or_else(|| missing("sketch_name"))?,
            operation: raw.operation.ok_or_else(|| missing("operation"))?,
            latency_s: raw.latency_s.ok_or_else(|| missing("latency_s"))?,
            are: raw.are.ok_or_else(|| missing("are"))?,
            aae: raw.aae.ok_or_else(|| missing("aae"))?,
            memory_kb: raw.memory_kb.ok_or_else(|| missing("memory_kb"))?,
        })
    }

    pub fn latency_ms(&self) -> f64 {
        self.latency_s * 1000.0
    }
}
