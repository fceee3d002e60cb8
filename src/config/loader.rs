// src/config/loader.rs

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::config::model::{RawSettings, Settings};
use crate::errors::Result;

/// Load a settings file from a given path and return the raw `RawSettings`.
///
/// This only performs TOML deserialization; it does **not** validate values.
/// Use [`load_and_validate`] for that.
pub fn load_from_path(path: impl AsRef<Path>) -> Result<RawSettings> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)?;

    let settings: RawSettings = toml::from_str(&contents)?;

    Ok(settings)
}

/// Load a settings file from path and validate it.
pub fn load_and_validate(path: impl AsRef<Path>) -> Result<Settings> {
    let raw = load_from_path(&path)?;
    Settings::try_from(raw)
}

/// Resolve the settings for a run.
///
/// - An explicitly given path must exist.
/// - Without a path, `SketchDag.toml` in the working directory is used when
///   present; otherwise defaults apply.
pub fn resolve_settings(explicit: Option<&Path>) -> Result<Settings> {
    match explicit {
        Some(path) => load_and_validate(path),
        None => {
            let path = default_config_path();
            if path.is_file() {
                debug!(?path, "loading default settings file");
                load_and_validate(&path)
            } else {
                debug!("no settings file found; using defaults");
                Ok(Settings::default())
            }
        }
    }
}

/// Default settings location: `SketchDag.toml` in the working directory.
pub fn default_config_path() -> PathBuf {
    PathBuf::from("SketchDag.toml")
}
