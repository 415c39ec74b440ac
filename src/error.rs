//! Error types for the ingestion boundary
//!
//! Classification itself never fails: bad dates and amounts degrade to `None`,
//! unresolvable liens land in the `UNCERTAIN` bucket. Only loading and
//! deserializing records can produce an error.

use thiserror::Error;

/// Result alias used by loaders and binaries
pub type Result<T> = std::result::Result<T, LienError>;

#[derive(Error, Debug)]
pub enum LienError {
    /// Reading an export from disk failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV export could not be parsed
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON record could not be parsed or serialized
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Record is structurally unusable (wrong container shape, unknown format)
    #[error("Invalid record: {0}")]
    InvalidRecord(String),
}
