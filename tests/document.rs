use std::io::Write;

use tempfile::NamedTempFile;

use sketchdag::document::{ResultDocument, load_and_validate, parse_str};
use sketchdag::errors::SketchDagError;
use sketchdag::types::{EdgeKind, Operation};
use sketchdag_test_utils::builders::{DocumentBuilder, SketchTableBuilder};

const FORK_DOCUMENT: &str = r#"
{
  "metadata": { "experiment_type": "dag", "dag_name": "fork", "timestamp": "2025-01-01T00:00:00Z" },
  "config": {
    "experiment": { "repetitions": 2, "master_seed": 7 },
    "sketch_config": { "depth": 4, "kll_k": 200 },
    "sketches": {
      "A": { "operation": "create", "memory_budget_kb": 512 },
      "B": { "operation": "expand", "memory_budget_kb": 1024, "sources": ["A"] },
      "C": { "operation": "split", "memory_budget_kb": 256, "sources": ["B"] }
    }
  },
  "results": [
    {
      "repetition_id": 0,
      "checkpoints": [
        { "sketch_name": "A", "items_processed": 1000, "throughput_mops": 2.0,
          "query_throughput_mops": 3.0, "memory_kb": 500, "are": 0.1, "aae": 1.0,
          "are_variance": 0.0, "aae_variance": 0.0 }
      ],
      "structural_operations": [
        { "sketch_name": "B", "operation": "expand", "latency_s": 0.004,
          "memory_kb": 1000, "are": 0.2, "aae": 2.0 }
      ]
    },
    { "repetition_id": 1, "checkpoints": [], "structural_operations": [] }
  ]
}
"#;

#[test]
fn full_document_parses_and_validates() {
    let raw = parse_str(FORK_DOCUMENT).unwrap();
    let doc = ResultDocument::try_from(raw).unwrap();

    assert_eq!(doc.metadata().dag_name(), "fork");
    assert_eq!(doc.metadata().experiment_type(), "dag");
    assert_eq!(doc.declared_repetitions(), 2);
    assert_eq!(doc.config().sketch_config.map(|c| c.kll_k), Some(200));

    let sketches = doc.sketches();
    assert_eq!(sketches.len(), 3);
    assert_eq!(sketches["B"].operation, Operation::Expand);
    assert_eq!(sketches["B"].primary_source(), Some("A"));
    assert_eq!(sketches["A"].memory_budget_kb, 512);

    let rep = &doc.repetitions()[0];
    assert_eq!(rep.checkpoints.len(), 1);
    assert_eq!(rep.checkpoints[0].memory_kb, 500);
    assert_eq!(rep.structural_ops[0].operation, EdgeKind::Expand);
}

#[test]
fn missing_metadata_reads_as_unknown() {
    let doc = DocumentBuilder::new(SketchTableBuilder::new().create("A").build()).build();

    assert_eq!(doc.metadata().dag_name(), "Unknown");
    assert_eq!(doc.metadata().timestamp(), "Unknown");
    assert_eq!(doc.declared_repetitions(), 1);
}

#[test]
fn checkpoint_missing_field_is_malformed() {
    let json = r#"
    {
      "config": { "sketches": { "A": { "operation": "create" } } },
      "results": [ {
        "checkpoints": [
          { "sketch_name": "A", "items_processed": 1, "throughput_mops": 1.0,
            "query_throughput_mops": 1.0, "memory_kb": 1, "are": 0.1, "aae": 1.0 },
          { "sketch_name": "A", "items_processed": 1, "throughput_mops": 1.0,
            "query_throughput_mops": 1.0, "memory_kb": 1, "aae": 1.0 }
        ]
      } ]
    }"#;

    let raw = parse_str(json).unwrap();
    match ResultDocument::try_from(raw) {
        Err(SketchDagError::MalformedRecord {
            section,
            index,
            field,
        }) => {
            assert_eq!(section, "checkpoints");
            assert_eq!(index, 1);
            assert_eq!(field, "are");
        }
        other => panic!("Expected MalformedRecord, got: {:?}", other),
    }
}

#[test]
fn structural_op_missing_latency_is_malformed() {
    let json = r#"
    {
      "config": { "sketches": { "A": { "operation": "create" } } },
      "results": [ {
        "structural_operations": [
          { "sketch_name": "A", "operation": "merge", "memory_kb": 1, "are": 0.1, "aae": 1.0 }
        ]
      } ]
    }"#;

    let raw = parse_str(json).unwrap();
    match ResultDocument::try_from(raw) {
        Err(SketchDagError::MalformedRecord { section, field, .. }) => {
            assert_eq!(section, "structural_operations");
            assert_eq!(field, "latency_s");
        }
        other => panic!("Expected MalformedRecord, got: {:?}", other),
    }
}

#[test]
fn unknown_source_is_rejected() {
    let sketches = SketchTableBuilder::new().create("A").merge("M", &["A", "Nope"]).build();
    let raw = DocumentBuilder::new(sketches).build_raw();

    match ResultDocument::try_from(raw) {
        Err(SketchDagError::UnknownSource { node, source_id }) => {
            assert_eq!(node, "M");
            assert_eq!(source_id, "Nope");
        }
        other => panic!("Expected UnknownSource, got: {:?}", other),
    }
}

#[test]
fn self_reference_is_rejected() {
    let sketches = SketchTableBuilder::new().create("A").expand("B", "B").build();
    let raw = DocumentBuilder::new(sketches).build_raw();

    match ResultDocument::try_from(raw) {
        Err(SketchDagError::SelfReference { node }) => assert_eq!(node, "B"),
        other => panic!("Expected SelfReference, got: {:?}", other),
    }
}

#[test]
fn lineage_cycle_is_rejected() {
    let sketches = SketchTableBuilder::new()
        .create("A")
        .expand("B", "C")
        .shrink("C", "B")
        .build();
    let raw = DocumentBuilder::new(sketches).build_raw();

    match ResultDocument::try_from(raw) {
        Err(SketchDagError::DagCycle(msg)) => {
            assert!(msg.contains("cycle detected"));
            assert!(msg.contains("B") || msg.contains("C"));
        }
        other => panic!("Expected DagCycle, got: {:?}", other),
    }
}

#[test]
fn empty_sketch_table_is_rejected() {
    let raw = parse_str(r#"{ "config": { "sketches": {} } }"#).unwrap();

    match ResultDocument::try_from(raw) {
        Err(SketchDagError::ConfigError(msg)) => assert!(msg.contains("config.sketches")),
        other => panic!("Expected ConfigError, got: {:?}", other),
    }
}

#[test]
fn unknown_operation_fails_to_parse() {
    let result = parse_str(
        r#"{ "config": { "sketches": { "A": { "operation": "teleport" } } } }"#,
    );
    assert!(matches!(result, Err(SketchDagError::JsonError(_))));
}

#[test]
fn out_of_range_repetition_falls_back_to_first() {
    let doc = ResultDocument::try_from(parse_str(FORK_DOCUMENT).unwrap()).unwrap();

    let (index, rep) = doc.select_repetition(1).unwrap();
    assert_eq!(index, 1);
    assert_eq!(rep.repetition_id, 1);

    let (index, rep) = doc.select_repetition(5).unwrap();
    assert_eq!(index, 0);
    assert_eq!(rep.repetition_id, 0);
}

#[test]
fn document_without_results_has_no_repetition() {
    let doc = DocumentBuilder::new(SketchTableBuilder::new().create("A").build()).build();

    assert!(matches!(
        doc.select_repetition(0),
        Err(SketchDagError::NoResults)
    ));
}

#[test]
fn document_loads_from_disk() {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{}", FORK_DOCUMENT).unwrap();

    let doc = load_and_validate(file.path()).unwrap();
    assert_eq!(doc.sketches().len(), 3);
    assert_eq!(doc.repetitions().len(), 2);
}

#[test]
fn missing_file_is_an_io_error() {
    let result = load_and_validate("/definitely/not/here/results.json");
    assert!(matches!(result, Err(SketchDagError::IoError(_))));
}
