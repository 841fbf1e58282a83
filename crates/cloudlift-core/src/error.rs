//! Error types for options schema parsing.

use thiserror::Error;

/// Errors surfaced while parsing a provider options schema document.
///
/// Only the document boundary reports errors. Payload assembly and field
/// filling never fail: malformed or missing inputs produce empty or partial
/// results instead.
#[derive(Debug, Error)]
pub enum SchemaError {
    /// JSON parsing failed.
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    /// The schema document does not have a usable shape.
    #[error("invalid schema document at {path}: {message}")]
    InvalidDocument { path: String, message: String },
}
