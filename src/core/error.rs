//! Error types for the canopy generator

use thiserror::Error;

/// Main error type for configuration and I/O around the generators.
///
/// Placement itself never produces this type; see
/// [`PlacementError`](crate::generation::PlacementError).
#[derive(Debug, Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid config: {0}")]
    InvalidConfig(String),
}
