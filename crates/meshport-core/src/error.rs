//! Export pipeline error taxonomy
//!
//! Only boundary failures become errors: a document that cannot be opened,
//! a kernel call that fails, output that cannot be written. Degenerate
//! geometry is recovered in place (fallback normal) and unrecognized node
//! types contribute nothing; neither aborts an export.

use thiserror::Error;

/// Errors that abort an export attempt
#[derive(Debug, Clone, Error)]
pub enum ExportError {
    /// Input document failed to open or read; nothing is written
    #[error("Failed to read input document: {0}")]
    Input(String),

    /// A kernel triangulation call failed for a shape
    #[error("Failed to tessellate '{label}': {reason}")]
    Tessellation { label: String, reason: String },

    /// Output file or scene could not be created or persisted; any partial
    /// output is invalid
    #[error("Failed to write output: {0}")]
    Output(String),

    /// Output path has no recognized asset extension
    #[error("Unsupported output format: {0}")]
    UnsupportedFormat(String),
}
