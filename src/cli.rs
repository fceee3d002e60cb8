// src/cli.rs

//! CLI argument parsing using `clap`.

use clap::{Parser, ValueEnum};

/// Command-line arguments for `sketchdag`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "sketchdag",
    version,
    about = "Lay out the lineage DAG of an adaptive frequency-sketch experiment.",
    long_about = None
)]
pub struct CliArgs {
    /// Path to the JSON results document written by the experiment runner.
    #[arg(value_name = "RESULT_FILE")]
    pub result_file: String,

    /// Where to write the scene (JSON). Prints to stdout when omitted.
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<String>,

    /// Repetition to visualise (0-based). Falls back to 0 if out of range.
    #[arg(short, long, value_name = "N", default_value_t = 0)]
    pub repetition: usize,

    /// Do not annotate edges with structural-operation latencies.
    #[arg(long)]
    pub no_structural_ops: bool,

    /// Path to a settings file (TOML).
    ///
    /// Default: `SketchDag.toml` in the current working directory, if present.
    #[arg(long, value_name = "PATH")]
    pub config: Option<String>,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `SKETCHDAG_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    /// Parse + validate, print the lineage and layers, but write no scene.
    #[arg(long)]
    pub dry_run: bool,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
