use sketchdag::metrics::{SummarySource, format_memory, structural_op_for, summarize};
use sketchdag::types::EdgeKind;
use sketchdag_test_utils::builders::{CheckpointBuilder, StructuralOpBuilder};

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn checkpoints_are_averaged_and_last_memory_wins() {
    let checkpoints = vec![
        CheckpointBuilder::new("A")
            .throughput(2.0)
            .query_throughput(4.0)
            .are(0.1)
            .aae(10.0)
            .memory_kb(100)
            .items(500)
            .build(),
        CheckpointBuilder::new("B").throughput(99.0).memory_kb(999).build(),
        CheckpointBuilder::new("A")
            .throughput(4.0)
            .query_throughput(8.0)
            .are(0.3)
            .aae(30.0)
            .memory_kb(50)
            .items(700)
            .build(),
    ];

    let summary = summarize("A", &checkpoints, &[]).expect("A has checkpoints");

    assert_eq!(summary.source, SummarySource::Checkpoints);
    assert!(approx(summary.throughput_mops.unwrap_or_default(), 3.0));
    assert!(approx(summary.query_throughput_mops.unwrap_or_default(), 6.0));
    assert!(approx(summary.are, 0.2));
    assert!(approx(summary.aae, 20.0));
    assert_eq!(summary.memory_kb, 50);
    assert_eq!(summary.num_checkpoints, 2);
    assert_eq!(summary.items_processed, 1200);
}

#[test]
fn checkpoints_take_precedence_over_structural_op() {
    let checkpoints = vec![CheckpointBuilder::new("C").are(0.5).memory_kb(10).build()];
    let ops = vec![
        StructuralOpBuilder::new("C", EdgeKind::Expand)
            .are(0.9)
            .memory_kb(20)
            .build(),
    ];

    let summary = summarize("C", &checkpoints, &ops).expect("C has data");
    assert_eq!(summary.source, SummarySource::Checkpoints);
    assert!(approx(summary.are, 0.5));
    assert_eq!(summary.memory_kb, 10);
}

#[test]
fn structural_op_is_the_fallback() {
    let ops = vec![
        StructuralOpBuilder::new("M", EdgeKind::Merge)
            .are(0.25)
            .aae(3.5)
            .memory_kb(2048)
            .build(),
    ];

    let summary = summarize("M", &[], &ops).expect("M has a structural op");

    assert_eq!(summary.source, SummarySource::StructuralOp);
    assert!(summary.throughput_mops.is_none());
    assert!(summary.query_throughput_mops.is_none());
    assert!(approx(summary.are, 0.25));
    assert!(approx(summary.aae, 3.5));
    assert_eq!(summary.memory_kb, 2048);
    assert_eq!(summary.num_checkpoints, 0);
}

#[test]
fn no_measurements_means_no_summary() {
    let checkpoints = vec![CheckpointBuilder::new("A").build()];
    let ops = vec![StructuralOpBuilder::new("B", EdgeKind::Split).build()];

    assert!(summarize("Z", &checkpoints, &ops).is_none());
}

#[test]
fn summarize_is_idempotent() {
    let checkpoints = vec![
        CheckpointBuilder::new("A").throughput(1.5).are(0.01).build(),
        CheckpointBuilder::new("A").throughput(2.5).are(0.03).build(),
    ];
    let ops = vec![StructuralOpBuilder::new("A", EdgeKind::Expand).build()];

    let first = summarize("A", &checkpoints, &ops);
    let second = summarize("A", &checkpoints, &ops);
    assert_eq!(first, second);
}

#[test]
fn duplicate_structural_ops_use_the_first() {
    let ops = vec![
        StructuralOpBuilder::new("S", EdgeKind::Split).latency_s(0.002).build(),
        StructuralOpBuilder::new("S", EdgeKind::Split).latency_s(0.009).build(),
    ];

    let op = structural_op_for("S", &ops).expect("S has a record");
    assert!(approx(op.latency_s, 0.002));
    assert!(approx(op.latency_ms(), 2.0));
}

#[test]
fn memory_is_formatted_in_kb_or_mb() {
    assert_eq!(format_memory(0), "0KB");
    assert_eq!(format_memory(512), "512KB");
    assert_eq!(format_memory(1023), "1023KB");
    assert_eq!(format_memory(1024), "1.0MB");
    assert_eq!(format_memory(1536), "1.5MB");
}
