//! Error types for the analytics pipeline

use thiserror::Error;

/// Result type alias for pipeline operations
pub type Result<T> = std::result::Result<T, AnalysisError>;

#[derive(Error, Debug)]
pub enum AnalysisError {

    // =============================
    // Core Pipeline Errors
    // =============================

    /// Malformed input record. Fatal: the run aborts and no report is produced.
    #[error("Validation error: {field}: {reason}")]
    Validation { field: String, reason: String },

    /// The language-model collaborator failed or timed out. Recovered locally
    /// by the recommendation stage; never surfaces from a pipeline run.
    #[error("Collaborator error: {0}")]
    Collaborator(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    // =============================
    // External Library Conversions
    // =============================

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl AnalysisError {
    /// Shorthand for a validation failure on a named input field.
    pub fn validation(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            reason: reason.into(),
        }
    }
}
