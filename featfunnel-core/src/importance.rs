//! Feature importance by L1 funnel.
//!
//! Walks the readable models of an L1 sweep in grid order, collects the
//! surviving features of each, stops once a level has too few features, and
//! buckets features by the regularization level at which they drop out.

use crate::buckets::feature_buckets;
use crate::config::FunnelConfig;
use crate::diagnostics::Diagnostic;
use crate::discovery::FileLister;
use crate::error::FunnelError;
use crate::invert_hash::HashInversion;
use crate::pretty::FeaturePrinter;
use crate::readable_model::extract_features;
use crate::sweep::{SweepPlan, format_l1};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::{info, warn};

/// One accumulated funnel level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunnelLevel {
    pub l1: f64,
    pub path: PathBuf,
    /// Resolved raw feature names in dump order.
    pub features: Vec<String>,
    /// Anomalies noticed while reading this level's model.
    pub diagnostics: Vec<Diagnostic>,
}

impl FunnelLevel {
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }
}

/// Everything a funnel run produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunnelReport {
    pub plan: SweepPlan,
    pub min_num_features: usize,
    /// Anomalies from loading the invert hash files.
    pub inversion_diagnostics: Vec<Diagnostic>,
    pub levels: Vec<FunnelLevel>,
    /// Why accumulation ended before the listed files ran out, if it did.
    pub termination: Option<Diagnostic>,
    /// Raw feature buckets, strictest regularization first.
    pub feature_buckets: Vec<Vec<String>>,
    /// Rendered buckets with excluded features removed.
    pub pretty_feature_buckets: Vec<Vec<String>>,
}

impl FunnelReport {
    pub fn funnel_sizes(&self) -> Vec<usize> {
        self.levels.iter().map(|l| l.features.len()).collect()
    }
}

/// Drives one funnel analysis.
pub struct FeatureImportance {
    config: FunnelConfig,
    printer: FeaturePrinter,
}

impl FeatureImportance {
    pub fn new(config: FunnelConfig) -> Self {
        let printer = FeaturePrinter::new(config.pretty.clone());
        Self { config, printer }
    }

    /// The sweep plan the configured training arguments describe.
    pub fn plan(&self) -> Result<SweepPlan, FunnelError> {
        SweepPlan::new(&self.config.ml_args, &self.config.grid)
    }

    /// Run the analysis over the files of an already executed sweep.
    ///
    /// `models` must list one readable model per grid point, in grid order.
    pub fn run(
        &self,
        invert_hash: &dyn FileLister,
        models: &dyn FileLister,
    ) -> Result<FunnelReport, FunnelError> {
        let plan = self.plan()?;

        let invert_hash_files = invert_hash.list()?;
        if invert_hash_files.is_empty() {
            return Err(FunnelError::no_input("no invert hash files found"));
        }
        let model_files = models.list()?;
        if model_files.is_empty() {
            return Err(FunnelError::no_input("no readable model files found"));
        }

        let mut inversion_diagnostics = Vec::new();
        let inversion = HashInversion::from_files(&invert_hash_files, &mut inversion_diagnostics)?;
        info!(
            hashes = inversion.len(),
            files = invert_hash_files.len(),
            "Testing a range of L1 regularization"
        );

        let min = self.config.min_num_features;
        let mut levels = Vec::new();
        let mut termination = None;

        for (point, path) in plan.points.iter().zip(&model_files) {
            let mut diagnostics = Vec::new();
            let extracted = extract_features(path, &inversion, &mut diagnostics)?;
            let num_features = extracted.features.len();
            info!(
                l1 = %format_l1(point.l1),
                features = num_features,
                file = %path.display(),
                "Funnel level"
            );
            levels.push(FunnelLevel {
                l1: point.l1,
                path: extracted.path,
                features: extracted.features,
                diagnostics,
            });

            if num_features < min {
                let stop = Diagnostic::ThresholdReached {
                    num_features,
                    min_num_features: min,
                    l1: point.l1,
                };
                info!("{stop}");
                termination = Some(stop);
                break;
            }
        }

        if termination.is_none() && model_files.len() > plan.points.len() {
            let surplus = Diagnostic::SurplusModelFiles {
                grid_points: plan.points.len(),
                files: model_files.len(),
            };
            warn!("{surplus}");
            termination = Some(surplus);
        }

        let funnel: Vec<Vec<&str>> = levels
            .iter()
            .map(|l| l.features.iter().map(String::as_str).collect())
            .collect();
        let buckets = feature_buckets(&funnel);
        let pretty = self.pretty_buckets(&buckets);

        Ok(FunnelReport {
            plan,
            min_num_features: min,
            inversion_diagnostics,
            levels,
            termination,
            feature_buckets: buckets,
            pretty_feature_buckets: pretty,
        })
    }

    /// Render every bucket and drop excluded features.
    pub fn pretty_buckets(&self, buckets: &[Vec<String>]) -> Vec<Vec<String>> {
        let excluded: Vec<String> = self
            .config
            .excluded_features
            .iter()
            .map(|f| f.to_lowercase())
            .collect();

        buckets
            .iter()
            .map(|bucket| {
                bucket
                    .iter()
                    .map(|feature| self.printer.render(feature))
                    .filter(|pretty| !excluded.contains(&pretty.to_lowercase()))
                    .collect()
            })
            .collect()
    }
}
