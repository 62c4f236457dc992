//! Error types for CAD source operations

use thiserror::Error;

/// Error type for CAD source operations
#[derive(Debug, Clone, Error)]
pub enum CadError {
    #[error("Failed to open document: {0}")]
    DocumentOpen(String),

    #[error("Invalid document handle: {0}")]
    InvalidDocument(String),

    #[error("Tessellation failed: {0}")]
    TessellationFailed(String),

    #[error("Mesh sampling failed: {0}")]
    SamplingFailed(String),

    #[error("CAD source not available: {0}")]
    SourceUnavailable(String),
}

/// Result type for CAD source operations
pub type CadResult<T> = Result<T, CadError>;
