//! # featfunnel-core — L1 feature funnels for linear models
//!
//! An L1 sweep trains the same linear model at increasing regularization
//! strength. Each run leaves a readable model dump listing the feature hashes
//! that kept a non-zero weight. This crate turns those dumps into a *feature
//! funnel*: which features survive at each strength, and at which strength
//! each one drops out.
//!
//! Pipeline:
//! 1. [`invert_hash`]: hash -> feature name, from invert hash files
//! 2. [`readable_model`]: surviving feature names per model dump
//! 3. [`importance`]: walk the sweep in grid order, stop below a minimum
//! 4. [`buckets`]: group features by drop-out level
//! 5. [`pretty`]: render names for people

pub mod buckets;
pub mod config;
pub mod diagnostics;
pub mod discovery;
pub mod error;
pub mod importance;
pub mod invert_hash;
pub mod pretty;
pub mod readable_model;
pub mod report;
mod section;
pub mod sweep;

// Re-exports
pub use buckets::feature_buckets;
pub use config::{FunnelConfig, load_config};
pub use diagnostics::Diagnostic;
pub use discovery::{FileLister, PathLister};
pub use error::FunnelError;
pub use importance::{FeatureImportance, FunnelLevel, FunnelReport};
pub use invert_hash::HashInversion;
pub use pretty::{FeaturePrinter, pretty_feature};
pub use readable_model::{ModelFeatures, extract_features};
pub use sweep::{SweepPlan, SweepPoint, TrainingArgs, format_l1};
