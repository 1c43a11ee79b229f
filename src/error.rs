use thiserror::Error;

use crate::model::PersonId;

/// Main error type for famtree
///
/// The graph engine itself never fails on data-shape conditions; these
/// variants cover loading snapshots and configuration.
#[derive(Error, Debug)]
pub enum FamtreeError {
    /// File system I/O errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML deserialization errors
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Parse errors
    #[error("Parse error: {0}")]
    Parse(String),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Person not present in the loaded snapshot
    #[error("Person not found: {0}")]
    PersonNotFound(PersonId),
}

/// Convenient Result type using FamtreeError
pub type Result<T> = std::result::Result<T, FamtreeError>;
