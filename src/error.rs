//! Error types for chart construction, validation and export.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while configuring or exporting a control chart.
///
/// Every configuration error is raised at the point of assignment, so a
/// malformed chart never reaches the plotting surface.
#[derive(Debug, Error)]
pub enum ChartError {
    #[error("Monitored series must contain at least one value")]
    EmptySeries,

    #[error("Invalid center: {reason}")]
    InvalidCenter { reason: String },

    #[error("Invalid standard deviation {sigma}: must be a non-negative finite number")]
    InvalidSigma { sigma: f64 },

    #[error("Invalid signal entry at position {position}: {found}")]
    InvalidSignalEntry { position: usize, found: String },

    #[error("Signal length mismatch: expected {expected}, got {got}")]
    SignalLengthMismatch { expected: usize, got: usize },

    #[error("Insufficient data: required {required}, got {got}")]
    InsufficientData { required: usize, got: usize },

    #[error("Export to {} failed: {reason}", .path.display())]
    Export { path: PathBuf, reason: String },
}

/// Result type for chart operations.
pub type Result<T> = std::result::Result<T, ChartError>;
