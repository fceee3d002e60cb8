use std::fs;
use std::io::Write;

use clap::Parser;
use tempfile::{NamedTempFile, tempdir};

use sketchdag::cli::CliArgs;
use sketchdag::run;

const SPLIT_DOCUMENT: &str = r#"
{
  "metadata": { "dag_name": "split_once" },
  "config": {
    "sketches": {
      "A": { "operation": "create", "memory_budget_kb": 256 },
      "B": { "operation": "split", "memory_budget_kb": 128, "sources": ["A"] },
      "C": { "operation": "split", "memory_budget_kb": 128, "sources": ["A"] }
    }
  },
  "results": [ {
    "checkpoints": [],
    "structural_operations": [
      { "sketch_name": "B", "operation": "split", "latency_s": 0.002,
        "memory_kb": 120, "are": 0.3, "aae": 4.0 }
    ]
  } ]
}
"#;

fn document_file() -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{}", SPLIT_DOCUMENT).unwrap();
    file
}

#[test]
fn run_writes_scene_json_to_output() {
    let doc = document_file();
    let dir = tempdir().unwrap();
    let output = dir.path().join("out/scene.json");

    let args = CliArgs::parse_from([
        "sketchdag",
        doc.path().to_str().unwrap(),
        "--output",
        output.to_str().unwrap(),
        "--repetition",
        "3",
    ]);
    run(args).unwrap();

    let written = fs::read_to_string(&output).unwrap();
    let scene: serde_json::Value = serde_json::from_str(&written).unwrap();

    assert_eq!(scene["title"], "ReSketch DAG Results: split_once");
    assert_eq!(scene["repetition"], 0);
    assert_eq!(scene["nodes"].as_array().map(|n| n.len()), Some(3));
    assert_eq!(scene["edges"][0]["label"], "Split\n2.0ms");
    assert_eq!(scene["edges"][1]["label"], "Split");
}

#[test]
fn no_structural_ops_flag_drops_latencies() {
    let doc = document_file();
    let dir = tempdir().unwrap();
    let output = dir.path().join("scene.json");

    let args = CliArgs::parse_from([
        "sketchdag",
        doc.path().to_str().unwrap(),
        "-o",
        output.to_str().unwrap(),
        "--no-structural-ops",
    ]);
    run(args).unwrap();

    let scene: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
    assert!(scene["edges"][0]["latency_ms"].is_null());
}

#[test]
fn dry_run_writes_nothing() {
    let doc = document_file();
    let dir = tempdir().unwrap();
    let output = dir.path().join("scene.json");

    let args = CliArgs::parse_from([
        "sketchdag",
        doc.path().to_str().unwrap(),
        "--output",
        output.to_str().unwrap(),
        "--dry-run",
    ]);
    run(args).unwrap();

    assert!(!output.exists());
}

#[test]
fn invalid_document_fails_the_run() {
    let mut file = NamedTempFile::new().unwrap();
    write!(
        file,
        r#"{{ "config": {{ "sketches": {{ "A": {{ "operation": "expand", "source": "A" }} }} }} }}"#
    )
    .unwrap();

    let args = CliArgs::parse_from(["sketchdag", file.path().to_str().unwrap(), "--dry-run"]);
    let err = run(args).unwrap_err();
    assert!(format!("{err:?}").contains("cannot list itself"));
}
