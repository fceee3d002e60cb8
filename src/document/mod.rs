// src/document/mod.rs

//! The experiment results document (JSON) consumed by sketchdag.
//!
//! - `model.rs` defines the raw and validated document types.
//! - `loader.rs` reads a document from disk.
//! - `validate.rs` checks the sketch table and converts records.

pub mod loader;
pub mod model;
pub mod validate;

pub use loader::{load_and_validate, load_from_path, parse_str};
pub use model::{
    DocumentConfig, ExperimentSection, Metadata, RawRepetition, RawResultDocument, Repetition,
    ResultDocument, SketchConfig,
};
