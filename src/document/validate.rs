// src/document/validate.rs

use petgraph::algo::toposort;
use petgraph::graphmap::DiGraphMap;

use crate::document::model::{RawRepetition, RawResultDocument, Repetition, ResultDocument};
use crate::errors::{Result, SketchDagError};
use crate::metrics::records::{CheckpointRecord, StructuralOpRecord};

impl TryFrom<RawResultDocument> for ResultDocument {
    type Error = SketchDagError;

    fn try_from(raw: RawResultDocument) -> std::result::Result<Self, Self::Error> {
        validate_sketch_table(&raw)?;

        let repetitions = raw
            .results
            .into_iter()
            .enumerate()
            .map(|(index, rep)| convert_repetition(index, rep))
            .collect::<Result<Vec<_>>>()?;

        Ok(ResultDocument::new_unchecked(
            raw.metadata,
            raw.config,
            repetitions,
        ))
    }
}

fn validate_sketch_table(doc: &RawResultDocument) -> Result<()> {
    ensure_has_sketches(doc)?;
    validate_sources(doc)?;
    validate_dag(doc)?;
    Ok(())
}

fn ensure_has_sketches(doc: &RawResultDocument) -> Result<()> {
    if doc.config.sketches.is_empty() {
        return Err(SketchDagError::ConfigError(
            "results document must contain at least one entry in config.sketches".to_string(),
        ));
    }
    Ok(())
}

fn validate_sources(doc: &RawResultDocument) -> Result<()> {
    let sketches = &doc.config.sketches;
    for (name, sketch) in sketches.iter() {
        for source in sketch.referenced_sources() {
            if !sketches.contains_key(source) {
                return Err(SketchDagError::UnknownSource {
                    node: name.clone(),
                    source_id: source.to_string(),
                });
            }
            if source == name.as_str() {
                return Err(SketchDagError::SelfReference { node: name.clone() });
            }
        }
    }
    Ok(())
}

fn validate_dag(doc: &RawResultDocument) -> Result<()> {
    // Edge direction: source -> sketch. For
    //   "C": { "operation": "expand", "source": "A" }
    // we add edge A -> C.
    let mut graph: DiGraphMap<&str, ()> = DiGraphMap::new();

    for name in doc.config.sketches.keys() {
        graph.add_node(name.as_str());
    }

    for (name, sketch) in doc.config.sketches.iter() {
        for source in sketch.referenced_sources() {
            graph.add_edge(source, name.as_str(), ());
        }
    }

    match toposort(&graph, None) {
        Ok(_order) => Ok(()),
        Err(cycle) => {
            let node = cycle.node_id();
            Err(SketchDagError::DagCycle(format!(
                "cycle detected in sketch lineage involving sketch '{}'",
                node
            )))
        }
    }
}

fn convert_repetition(index: usize, raw: RawRepetition) -> Result<Repetition> {
    let checkpoints = raw
        .checkpoints
        .into_iter()
        .enumerate()
        .map(|(i, cp)| CheckpointRecord::from_raw(cp, i))
        .collect::<Result<Vec<_>>>()?;

    let structural_ops = raw
        .structural_operations
        .into_iter()
        .enumerate()
        .map(|(i, op)| StructuralOpRecord::from_raw(op, i))
        .collect::<Result<Vec<_>>>()?;

    Ok(Repetition {
        repetition_id: raw.repetition_id.unwrap_or(index as u32),
        checkpoints,
        structural_ops,
    })
}
