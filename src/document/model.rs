// src/document/model.rs

use std::collections::BTreeMap;

use serde::Deserialize;
use tracing::warn;

use crate::dag::node::SketchNode;
use crate::errors::{Result, SketchDagError};
use crate::metrics::records::{
    CheckpointRecord, RawCheckpointRecord, RawStructuralOpRecord, StructuralOpRecord,
};
use crate::types::NodeId;

const UNKNOWN: &str = "Unknown";

/// Results document as written by the experiment runner.
///
/// ```json
/// {
///   "metadata": { "experiment_type": "dag", "dag_name": "fork", "timestamp": "..." },
///   "config": {
///     "experiment": { "repetitions": 3, "master_seed": 42 },
///     "sketch_config": { "depth": 4, "kll_k": 200 },
///     "sketches": { "A": { "operation": "create", "memory_budget_kb": 512 } }
///   },
///   "results": [ { "repetition_id": 0, "checkpoints": [], "structural_operations": [] } ]
/// }
/// ```
///
/// This is the unvalidated form; convert it with `ResultDocument::try_from`.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct RawResultDocument {
    #[serde(default)]
    pub metadata: Metadata,

    #[serde(default)]
    pub config: DocumentConfig,

    #[serde(default)]
    pub results: Vec<RawRepetition>,
}

/// `metadata` section. Missing values read as `"Unknown"`.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Metadata {
    #[serde(default)]
    pub experiment_type: Option<String>,
    #[serde(default)]
    pub dag_name: Option<String>,
    #[serde(default)]
    pub timestamp: Option<String>,
}

impl Metadata {
    pub fn dag_name(&self) -> &str {
        self.dag_name.as_deref().unwrap_or(UNKNOWN)
    }

    pub fn timestamp(&self) -> &str {
        self.timestamp.as_deref().unwrap_or(UNKNOWN)
    }

    pub fn experiment_type(&self) -> &str {
        self.experiment_type.as_deref().unwrap_or(UNKNOWN)
    }
}

/// `config` section.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct DocumentConfig {
    #[serde(default)]
    pub experiment: ExperimentSection,

    #[serde(default)]
    pub sketch_config: Option<SketchConfig>,

    /// The sketch table, keyed by sketch id. Key order is the iteration order
    /// used by the lineage build and the layout.
    #[serde(default)]
    pub sketches: BTreeMap<NodeId, SketchNode>,
}

/// `config.experiment` section.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct ExperimentSection {
    #[serde(default = "default_repetitions")]
    pub repetitions: u32,

    #[serde(default)]
    pub master_seed: Option<u64>,
}

fn default_repetitions() -> u32 {
    1
}

impl Default for ExperimentSection {
    fn default() -> Self {
        Self {
            repetitions: default_repetitions(),
            master_seed: None,
        }
    }
}

/// `config.sketch_config`: shape shared by every sketch of the experiment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct SketchConfig {
    pub depth: u32,
    pub kll_k: u32,
}

/// One entry of `results` as found in the document.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct RawRepetition {
    #[serde(default)]
    pub repetition_id: Option<u32>,

    #[serde(default)]
    pub checkpoints: Vec<RawCheckpointRecord>,

    #[serde(default)]
    pub structural_operations: Vec<RawStructuralOpRecord>,
}

/// Measurements of one run repetition.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Repetition {
    pub repetition_id: u32,
    /// Chronological; the aggregator relies on list order.
    pub checkpoints: Vec<CheckpointRecord>,
    pub structural_ops: Vec<StructuralOpRecord>,
}

/// Validated results document.
///
/// Only constructible through `TryFrom<RawResultDocument>`, so the sketch
/// table references only known sketches, is acyclic, and every record carries
/// its required fields.
#[derive(Debug, Clone)]
pub struct ResultDocument {
    metadata: Metadata,
    config: DocumentConfig,
    repetitions: Vec<Repetition>,
}

impl ResultDocument {
    pub(crate) fn new_unchecked(
        metadata: Metadata,
        config: DocumentConfig,
        repetitions: Vec<Repetition>,
    ) -> Self {
        Self {
            metadata,
            config,
            repetitions,
        }
    }

    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    pub fn config(&self) -> &DocumentConfig {
        &self.config
    }

    pub fn sketches(&self) -> &BTreeMap<NodeId, SketchNode> {
        &self.config.sketches
    }

    pub fn repetitions(&self) -> &[Repetition] {
        &self.repetitions
    }

    /// Declared number of repetitions (`config.experiment.repetitions`).
    pub fn declared_repetitions(&self) -> u32 {
        self.config.experiment.repetitions
    }

    /// Pick the repetition to visualise.
    ///
    /// An out-of-range index falls back to repetition 0 with a warning; the
    /// returned index is the one actually used.
    pub fn select_repetition(&self, requested: usize) -> Result<(usize, &Repetition)> {
        if self.repetitions.is_empty() {
            return Err(SketchDagError::NoResults);
        }

        let index = if requested < self.repetitions.len() {
            requested
        } else {
            warn!(
                requested,
                available = self.repetitions.len(),
                "repetition not found; using repetition 0"
            );
            0
        };

        Ok((index, &self.repetitions[index]))
    }
}
