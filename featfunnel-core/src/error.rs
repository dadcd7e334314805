//! Error types for the featfunnel-core crate.

use std::path::PathBuf;
use thiserror::Error;

/// Top-level error type for funnel analysis.
///
/// Only structural problems surface here. Per-line anomalies such as an
/// unresolved hash are recorded as [`crate::Diagnostic`]s instead.
#[derive(Debug, Error)]
pub enum FunnelError {
    #[error("Malformed model file {}: {reason}", .path.display())]
    MalformedModelFile { path: PathBuf, reason: String },

    #[error("Malformed invert hash file {}: no ':0' section marker", .path.display())]
    MalformedInvertHashFile { path: PathBuf },

    #[error("IO error reading {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid training arguments: {0}")]
    InvalidTrainingArgs(String),

    #[error("No input: {0}")]
    NoInput(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

impl FunnelError {
    pub fn malformed_model(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::MalformedModelFile {
            path: path.into(),
            reason: reason.into(),
        }
    }

    pub fn malformed_invert_hash(path: impl Into<PathBuf>) -> Self {
        Self::MalformedInvertHashFile { path: path.into() }
    }

    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub fn invalid_args(msg: impl Into<String>) -> Self {
        Self::InvalidTrainingArgs(msg.into())
    }

    pub fn no_input(msg: impl Into<String>) -> Self {
        Self::NoInput(msg.into())
    }
}

impl From<figment::Error> for FunnelError {
    fn from(err: figment::Error) -> Self {
        Self::Config(err.to_string())
    }
}

/// Read a whole file, tagging failures with the offending path.
pub(crate) fn read_to_string(path: &std::path::Path) -> Result<String, FunnelError> {
    std::fs::read_to_string(path).map_err(|e| FunnelError::io(path, e))
}
