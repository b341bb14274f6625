//! Crate error type.
//!
//! Errors only arise at the edges: loading a catalog or configuration and
//! building a snapshot. A running search never fails; degraded outcomes
//! show up as conflicts or missing placements instead.

use thiserror::Error;

use crate::validation::ValidationError;

/// Errors raised while preparing a scheduling run.
#[derive(Debug, Error)]
pub enum TimetableError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid catalog: {}", join_errors(.0))]
    InvalidCatalog(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}
