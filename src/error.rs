//! Error types for scoring, configuration and snapshot loading.
//!
//! Missing data is not an error here: analyzers that cannot produce a signal
//! return `None`. These types cover caller mistakes and I/O.

use std::path::PathBuf;

/// Precondition failures raised by the composite aggregator.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ScoreError {
    /// No dimensions were supplied.
    #[error("composite needs at least one dimension")]
    NoDimensions,

    /// Weights sum to zero, so the weighted mean is undefined.
    #[error("dimension weights sum to zero")]
    ZeroTotalWeight,

    /// A weight was negative or not finite.
    #[error("invalid weight {weight} for dimension '{label}'")]
    InvalidWeight { label: String, weight: f64 },
}

/// A breakpoint table that cannot be evaluated first-match-wins.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LadderError {
    #[error("bound at step {index} is not finite")]
    NonFiniteBound { index: usize },

    #[error("step {index} (bound {bound}) is out of order for {order} ladder")]
    OutOfOrder {
        index: usize,
        bound: f64,
        order: &'static str,
    },
}

/// Configuration could not be parsed or failed validation.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("ladder '{name}': {source}")]
    Ladder {
        name: &'static str,
        #[source]
        source: LadderError,
    },

    #[error("{0}")]
    Invalid(String),
}

/// A dashboard snapshot could not be loaded.
#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse snapshot: {0}")]
    Json(#[from] serde_json::Error),
}
