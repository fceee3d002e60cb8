// src/metrics/mod.rs

//! Per-sketch metrics.
//!
//! - [`records`] holds checkpoint and structural-operation records.
//! - [`aggregate`] reduces them to one [`NodeSummary`] per sketch.

pub mod aggregate;
pub mod records;

pub use aggregate::{NodeSummary, SummarySource, format_memory, structural_op_for, summarize};
pub use records::{
    CheckpointRecord, RawCheckpointRecord, RawStructuralOpRecord, StructuralOpRecord,
};
