// ⚠️ Error Types - Typed failures for panels, the module registry and storage
//
// Nothing in here is fatal: every error is recovered at the component
// boundary that detects it and surfaced to the user as a status message.

use std::path::PathBuf;
use thiserror::Error;

// ============================================================================
// PANEL ERRORS
// ============================================================================

#[derive(Debug, Error)]
pub enum PanelError {
    /// User-supplied field missing or out of its allowed set.
    /// The record is left unmodified.
    #[error("[{context}] {field}: {message}")]
    Validation {
        field: String,
        message: String,
        context: String,
    },

    /// Stale identifier (deleted record, or never existed)
    #[error("record not found: {0}")]
    RecordNotFound(String),

    /// Mutating call with nothing focused
    #[error("no record is focused")]
    NoFocus,

    /// Panel action not offered by this module
    #[error("unsupported action '{0}'")]
    UnsupportedAction(char),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl PanelError {
    pub fn validation(field: &str, message: impl Into<String>, context: &str) -> Self {
        PanelError::Validation {
            field: field.to_string(),
            message: message.into(),
            context: context.to_string(),
        }
    }
}

// ============================================================================
// MODULE REGISTRY ERRORS
// ============================================================================

#[derive(Debug, Error)]
pub enum ModuleError {
    #[error("unknown module: {0}")]
    UnknownModule(String),

    #[error("module '{module}' failed to construct: {reason}")]
    Construction { module: String, reason: String },

    #[error("module '{0}' is already registered")]
    Duplicate(String),
}

// ============================================================================
// STORAGE ERRORS (planning snapshots, analytics export)
// ============================================================================

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("no snapshot store at {0}")]
    Missing(PathBuf),

    #[error("snapshot store at {0} holds no snapshots")]
    Empty(PathBuf),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}
