// src/lib.rs

pub mod cli;
pub mod config;
pub mod dag;
pub mod document;
pub mod errors;
pub mod layout;
pub mod logging;
pub mod metrics;
pub mod scene;
pub mod types;

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::cli::CliArgs;
use crate::config::resolve_settings;
use crate::dag::{LineageGraph, build};
use crate::document::ResultDocument;
use crate::layout::assign_layers;
use crate::scene::LineageScene;

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - settings resolution (file + CLI overrides)
/// - results document loading and validation
/// - lineage build, layout and metrics aggregation
/// - writing the scene as JSON
pub fn run(args: CliArgs) -> Result<()> {
    let settings = resolve_settings(args.config.as_deref().map(Path::new))
        .context("loading settings")?;
    let settings = if args.no_structural_ops {
        settings.with_structural_ops(false)
    } else {
        settings
    };

    let doc = document::load_and_validate(&args.result_file)
        .with_context(|| format!("loading results document {:?}", args.result_file))?;
    info!(
        dag = doc.metadata().dag_name(),
        sketches = doc.sketches().len(),
        repetitions = doc.repetitions().len(),
        "results document loaded"
    );

    if args.dry_run {
        print_dry_run(&doc)?;
        return Ok(());
    }

    let scene = LineageScene::from_document(&doc, args.repetition, &settings)?;
    let json = serde_json::to_string_pretty(&scene).context("serialising scene")?;

    match args.output.as_deref() {
        Some(path) => write_scene(Path::new(path), &json)?,
        None => println!("{json}"),
    }

    Ok(())
}

fn write_scene(path: &Path, json: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).with_context(|| format!("creating dir {:?}", parent))?;
        }
    }
    fs::write(path, json).with_context(|| format!("writing scene to {:?}", path))?;
    info!(?path, "scene written");
    Ok(())
}

/// Simple dry-run output: print sketches, edges, families and layers.
fn print_dry_run(doc: &ResultDocument) -> Result<()> {
    let model = build(doc.sketches())?;
    let graph = LineageGraph::new(doc.sketches(), &model.edges)?;
    let layers = assign_layers(&graph)?;

    println!("sketchdag dry-run");
    println!("  dag_name = {}", doc.metadata().dag_name());
    println!("  timestamp = {}", doc.metadata().timestamp());
    println!("  repetitions = {}", doc.repetitions().len());
    println!();

    println!("sketches ({}):", doc.sketches().len());
    for (name, sketch) in doc.sketches().iter() {
        println!("  - {name}");
        println!("      operation: {}", sketch.operation);
        println!("      memory_budget_kb: {}", sketch.memory_budget_kb);
        let parents = graph.parents_of(name);
        if !parents.is_empty() {
            println!("      parents: {:?}", parents);
        }
        if let Some(family) = model.family_of(name) {
            println!("      family: {family}");
        }
    }
    println!();

    println!("edges ({}):", model.edges.len());
    for edge in model.edges.iter() {
        println!("  {} -> {} ({})", edge.source, edge.target, edge.kind);
    }
    println!();

    println!("layers ({}):", layers.len());
    for (idx, layer) in layers.iter().enumerate() {
        println!("  {idx}: {:?}", layer);
    }

    debug!("dry-run complete (no scene written)");
    Ok(())
}
