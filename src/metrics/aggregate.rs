// src/metrics/aggregate.rs

use serde::Serialize;
use tracing::{trace, warn};

use crate::metrics::records::{CheckpointRecord, StructuralOpRecord};

/// Where a [`NodeSummary`] got its numbers from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SummarySource {
    Checkpoints,
    StructuralOp,
}

/// Aggregated metrics for one sketch node.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NodeSummary {
    pub source: SummarySource,
    /// Mean update throughput; absent for the structural-op fallback.
    pub throughput_mops: Option<f64>,
    /// Mean query throughput; absent for the structural-op fallback.
    pub query_throughput_mops: Option<f64>,
    pub are: f64,
    pub aae: f64,
    /// Memory of the last checkpoint (or of the structural-op record).
    pub memory_kb: u64,
    pub num_checkpoints: usize,
    pub items_processed: u64,
}

/// Reduce the measurements of `node_id` to a single summary.
///
/// - With checkpoints: means of throughput, query throughput, ARE and AAE;
///   memory is taken from the last checkpoint in list order.
/// - Without checkpoints: ARE, AAE and memory from the node's structural-op
///   record.
/// - Otherwise `None`; the caller renders a placeholder.
pub fn summarize(
    node_id: &str,
    checkpoints: &[CheckpointRecord],
    structural_ops: &[StructuralOpRecord],
) -> Option<NodeSummary> {
    let own: Vec<&CheckpointRecord> = checkpoints
        .iter()
        .filter(|cp| cp.sketch_name == node_id)
        .collect();

    if let Some(last) = own.last() {
        let n = own.len() as f64;
        let mean = |f: fn(&CheckpointRecord) -> f64| own.iter().map(|cp| f(cp)).sum::<f64>() / n;

        trace!(node = node_id, checkpoints = own.len(), "summarising checkpoints");
        return Some(NodeSummary {
            source: SummarySource::Checkpoints,
            throughput_mops: Some(mean(|cp| cp.throughput_mops)),
            query_throughput_mops: Some(mean(|cp| cp.query_throughput_mops)),
            are: mean(|cp| cp.are),
            aae: mean(|cp| cp.aae),
            memory_kb: last.memory_kb,
            num_checkpoints: own.len(),
            items_processed: own.iter().map(|cp| cp.items_processed).sum(),
        });
    }

    structural_op_for(node_id, structural_ops).map(|op| NodeSummary {
        source: SummarySource::StructuralOp,
        throughput_mops: None,
        query_throughput_mops: None,
        are: op.are,
        aae: op.aae,
        memory_kb: op.memory_kb,
        num_checkpoints: 0,
        items_processed: 0,
    })
}

/// The structural-operation record of `node_id`, if any.
///
/// A node has at most one such record; extra ones are ignored with a warning.
pub fn structural_op_for<'a>(
    node_id: &str,
    structural_ops: &'a [StructuralOpRecord],
) -> Option<&'a StructuralOpRecord> {
    let mut matching = structural_ops.iter().filter(|op| op.sketch_name == node_id);
    let first = matching.next()?;

    let extra = matching.count();
    if extra > 0 {
        warn!(
            node = node_id,
            extra, "multiple structural-operation records for sketch; using the first"
        );
    }

    Some(first)
}

/// Human-readable memory size: `"512KB"`, `"1.5MB"`.
pub fn format_memory(kb: u64) -> String {
    if kb >= 1024 {
        format!("{:.1}MB", kb as f64 / 1024.0)
    } else {
        format!("{kb}KB")
    }
}
