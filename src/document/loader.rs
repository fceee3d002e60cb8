// src/document/loader.rs

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::document::model::{RawResultDocument, ResultDocument};
use crate::errors::Result;

/// Read a results document and return the raw `RawResultDocument`.
///
/// This only performs JSON deserialization. Use [`load_and_validate`] to also
/// check the sketch table and the measurement records.
pub fn load_from_path(path: impl AsRef<Path>) -> Result<RawResultDocument> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)?;
    parse_str(&contents)
}

/// Deserialize a results document from a JSON string.
pub fn parse_str(contents: &str) -> Result<RawResultDocument> {
    let doc: RawResultDocument = serde_json::from_str(contents)?;
    Ok(doc)
}

/// Read a results document from path and validate it.
///
/// This is the recommended entry point:
///
/// - Reads JSON.
/// - Applies defaults for optional metadata/config values.
/// - Checks for:
///   - unknown or self-referencing sources,
///   - lineage cycles,
///   - records missing required fields.
pub fn load_and_validate(path: impl AsRef<Path>) -> Result<ResultDocument> {
    let raw = load_from_path(&path)?;
    debug!(
        sketches = raw.config.sketches.len(),
        repetitions = raw.results.len(),
        "results document parsed"
    );
    ResultDocument::try_from(raw)
}
