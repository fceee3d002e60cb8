// src/config/mod.rs

//! Settings loading and validation for sketchdag.
//!
//! Responsibilities:
//! - Define the TOML-backed settings model (`model.rs`).
//! - Load a settings file from disk (`loader.rs`).
//! - Validate spacing/margin values (`validate.rs`).

pub mod loader;
pub mod model;
pub mod validate;

pub use loader::{load_and_validate, load_from_path, resolve_settings};
pub use model::{LayoutSection, RawSettings, RenderSection, Settings};
