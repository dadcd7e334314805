//! Non-fatal conditions noticed during a funnel run.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// A recoverable anomaly. The run continues with a degraded but valid result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Diagnostic {
    /// A section had no feature lines; an empty set was used.
    EmptyFeatureSection { path: PathBuf, source: SectionSource },
    /// A model dump referenced a hash with no inversion entry; it was skipped.
    MissingHashValue { path: PathBuf, hash: String },
    /// A level fell below the minimum feature count; accumulation stopped.
    ThresholdReached {
        num_features: usize,
        min_num_features: usize,
        l1: f64,
    },
    /// More model files were listed than the grid has points; the rest were ignored.
    SurplusModelFiles { grid_points: usize, files: usize },
}

/// Which kind of file an empty section came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionSource {
    InvertHash,
    ReadableModel,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyFeatureSection {
                path,
                source: SectionSource::InvertHash,
            } => write!(f, "no features found in invert hash file: {}.", path.display()),
            Self::EmptyFeatureSection {
                path,
                source: SectionSource::ReadableModel,
            } => write!(f, "no features found in model output file: {}", path.display()),
            Self::MissingHashValue { hash, .. } => {
                write!(f, "missing hash value in inv_hash: {hash}")
            }
            Self::ThresholdReached {
                num_features,
                min_num_features,
                l1,
            } => write!(
                f,
                "Number of features is {num_features} which is below the minimum of {min_num_features}. Exiting the loop with L1 value of: {}",
                crate::sweep::format_l1(*l1)
            ),
            Self::SurplusModelFiles { grid_points, files } => write!(
                f,
                "{files} readable model files for {grid_points} grid points; ignoring the extra files"
            ),
        }
    }
}
