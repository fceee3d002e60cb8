#![allow(dead_code)]

use std::collections::BTreeMap;

use sketchdag::dag::SketchNode;
use sketchdag::document::{
    DocumentConfig, ExperimentSection, Metadata, RawRepetition, RawResultDocument,
    ResultDocument, SketchConfig,
};
use sketchdag::metrics::{
    CheckpointRecord, RawCheckpointRecord, RawStructuralOpRecord, StructuralOpRecord,
};
use sketchdag::types::{EdgeKind, NodeId, Operation};

/// Builder for the sketch table (`config.sketches`).
pub struct SketchTableBuilder {
    sketches: BTreeMap<NodeId, SketchNode>,
}

impl SketchTableBuilder {
    pub fn new() -> Self {
        Self {
            sketches: BTreeMap::new(),
        }
    }

    pub fn with(mut self, name: &str, node: SketchNode) -> Self {
        self.sketches.insert(name.to_string(), node);
        self
    }

    pub fn create(self, name: &str) -> Self {
        self.with(name, SketchNode::new(Operation::Create))
    }

    pub fn expand(self, name: &str, source: &str) -> Self {
        self.with(name, single_source(Operation::Expand, source))
    }

    pub fn shrink(self, name: &str, source: &str) -> Self {
        self.with(name, single_source(Operation::Shrink, source))
    }

    pub fn split(self, name: &str, source: &str) -> Self {
        self.with(name, single_source(Operation::Split, source))
    }

    pub fn merge(self, name: &str, sources: &[&str]) -> Self {
        let mut node = SketchNode::new(Operation::Merge);
        node.sources = sources.iter().map(|s| s.to_string()).collect();
        self.with(name, node)
    }

    pub fn build(self) -> BTreeMap<NodeId, SketchNode> {
        self.sketches
    }
}

impl Default for SketchTableBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn single_source(operation: Operation, source: &str) -> SketchNode {
    let mut node = SketchNode::new(operation);
    node.source = Some(source.to_string());
    node
}

/// Builder for a checkpoint record with plausible defaults.
pub struct CheckpointBuilder {
    record: CheckpointRecord,
}

impl CheckpointBuilder {
    pub fn new(sketch: &str) -> Self {
        Self {
            record: CheckpointRecord {
                sketch_name: sketch.to_string(),
                items_processed: 1000,
                throughput_mops: 1.0,
                query_throughput_mops: 1.0,
                are: 0.0,
                aae: 0.0,
                memory_kb: 64,
            },
        }
    }

    pub fn items(mut self, val: u64) -> Self {
        self.record.items_processed = val;
        self
    }

    pub fn throughput(mut self, val: f64) -> Self {
        self.record.throughput_mops = val;
        self
    }

    pub fn query_throughput(mut self, val: f64) -> Self {
        self.record.query_throughput_mops = val;
        self
    }

    pub fn are(mut self, val: f64) -> Self {
        self.record.are = val;
        self
    }

    pub fn aae(mut self, val: f64) -> Self {
        self.record.aae = val;
        self
    }

    pub fn memory_kb(mut self, val: u64) -> Self {
        self.record.memory_kb = val;
        self
    }

    pub fn build(self) -> CheckpointRecord {
        self.record
    }

    /// The same record in its raw (all-optional) document form.
    pub fn build_raw(self) -> RawCheckpointRecord {
        let r = self.record;
        RawCheckpointRecord {
            sketch_name: Some(r.sketch_name),
            items_processed: Some(r.items_processed),
            throughput_mops: Some(r.throughput_mops),
            query_throughput_mops: Some(r.query_throughput_mops),
            are: Some(r.are),
            aae: Some(r.aae),
            memory_kb: Some(r.memory_kb),
        }
    }
}

/// Builder for a structural-operation record.
pub struct StructuralOpBuilder {
    record: StructuralOpRecord,
}

impl StructuralOpBuilder {
    pub fn new(sketch: &str, operation: EdgeKind) -> Self {
        Self {
            record: StructuralOpRecord {
                sketch_name: sketch.to_string(),
                operation,
                latency_s: 0.001,
                are: 0.0,
                aae: 0.0,
                memory_kb: 64,
            },
        }
    }

    pub fn latency_s(mut self, val: f64) -> Self {
        self.record.latency_s = val;
        self
    }

    pub fn are(mut self, val: f64) -> Self {
        self.record.are = val;
        self
    }

    pub fn aae(mut self, val: f64) -> Self {
        self.record.aae = val;
        self
    }

    pub fn memory_kb(mut self, val: u64) -> Self {
        self.record.memory_kb = val;
        self
    }

    pub fn build(self) -> StructuralOpRecord {
        self.record
    }

    pub fn build_raw(self) -> RawStructuralOpRecord {
        let r = self.record;
        RawStructuralOpRecord {
            sketch_name: Some(r.sketch_name),
            operation: Some(r.operation),
            latency_s: Some(r.latency_s),
            are: Some(r.are),
            aae: Some(r.aae),
            memory_kb: Some(r.memory_kb),
        }
    }
}

/// Builder for a whole results document.
pub struct DocumentBuilder {
    doc: RawResultDocument,
}

impl DocumentBuilder {
    pub fn new(sketches: BTreeMap<NodeId, SketchNode>) -> Self {
        Self {
            doc: RawResultDocument {
                metadata: Metadata::default(),
                config: DocumentConfig {
                    experiment: ExperimentSection::default(),
                    sketch_config: None,
                    sketches,
                },
                results: Vec::new(),
            },
        }
    }

    pub fn dag_name(mut self, name: &str) -> Self {
        self.doc.metadata.dag_name = Some(name.to_string());
        self
    }

    pub fn declared_repetitions(mut self, n: u32) -> Self {
        self.doc.config.experiment.repetitions = n;
        self
    }

    pub fn sketch_config(mut self, depth: u32, kll_k: u32) -> Self {
        self.doc.config.sketch_config = Some(SketchConfig { depth, kll_k });
        self
    }

    pub fn repetition(
        mut self,
        checkpoints: Vec<RawCheckpointRecord>,
        structural_operations: Vec<RawStructuralOpRecord>,
    ) -> Self {
        let id = self.doc.results.len() as u32;
        self.doc.results.push(RawRepetition {
            repetition_id: Some(id),
            checkpoints,
            structural_operations,
        });
        self
    }

    pub fn build_raw(self) -> RawResultDocument {
        self.doc
    }

    pub fn build(self) -> ResultDocument {
        ResultDocument::try_from(self.doc).expect("Failed to build valid document from builder")
    }
}
