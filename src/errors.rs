// src/errors.rs

//! Crate-wide error type.
//!
//! Every failure of the lineage pipeline is a hard error for the whole run;
//! there is no partial recovery. Missing metrics are *not* an error: the
//! aggregator returns `None` and the renderer shows a placeholder.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SketchDagError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    /// A non-create sketch has neither `source` nor a non-empty `sources`,
    /// or its parent can never be given a family.
    #[error("sketch '{node}' has no resolvable parent")]
    UnresolvableParent { node: String },

    #[error("sketch '{node}' references unknown source '{source_id}'")]
    UnknownSource { node: String, source_id: String },

    #[error("edge endpoint '{0}' is not a known sketch")]
    UnknownNode(String),

    #[error("sketch '{node}' cannot list itself as a source")]
    SelfReference { node: String },

    #[error("Cycle detected in lineage DAG: {0}")]
    DagCycle(String),

    /// A node never reached in-degree 0 during layering.
    #[error("sketch '{node}' is not reachable from any root during layering")]
    DisconnectedNode { node: String },

    #[error("malformed record #{index} in `{section}`: missing field `{field}`")]
    MalformedRecord {
        section: &'static str,
        index: usize,
        field: &'static str,
    },

    #[error("results document contains no repetitions")]
    NoResults,

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, SketchDagError>;
