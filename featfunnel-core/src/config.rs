//! Configuration for featfunnel.
//!
//! Uses `figment` for layered configuration: defaults -> user config file ->
//! workspace config file -> explicit config file -> environment.
//! User config lives at `~/.config/featfunnel/config.toml`, workspace config at
//! `.featfunnel/config.toml`.

use crate::error::FunnelError;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Top-level configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FunnelConfig {
    /// Training arguments handed to the sweep. May carry a `--l1` override.
    #[serde(default = "default_ml_args")]
    pub ml_args: String,
    /// Stop accumulating funnel levels once a level has fewer features than this.
    #[serde(default = "default_min_num_features")]
    pub min_num_features: usize,
    /// Pretty feature names (compared lowercase) dropped from the pretty buckets.
    #[serde(default = "default_excluded_features")]
    pub excluded_features: Vec<String>,
    /// L1 grid generation.
    #[serde(default)]
    pub grid: GridConfig,
    /// Feature name rendering.
    #[serde(default)]
    pub pretty: PrettyConfig,
    /// Input file discovery.
    #[serde(default)]
    pub discovery: DiscoveryConfig,
}

impl Default for FunnelConfig {
    fn default() -> Self {
        Self {
            ml_args: default_ml_args(),
            min_num_features: default_min_num_features(),
            excluded_features: default_excluded_features(),
            grid: GridConfig::default(),
            pretty: PrettyConfig::default(),
            discovery: DiscoveryConfig::default(),
        }
    }
}

fn default_ml_args() -> String {
    "--cb_adf -l 0.01".to_string()
}

fn default_min_num_features() -> usize {
    5
}

fn default_excluded_features() -> Vec<String> {
    vec!["constant".to_string(), "action.constant".to_string()]
}

/// L1 grid generation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GridConfig {
    /// Number of grid points.
    #[serde(default = "default_levels")]
    pub levels: usize,
    /// Multiplier between consecutive grid points.
    #[serde(default = "default_factor")]
    pub factor: f64,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            levels: default_levels(),
            factor: default_factor(),
        }
    }
}

fn default_levels() -> usize {
    4
}

fn default_factor() -> f64 {
    10.0
}

/// Feature name rendering.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrettyConfig {
    /// Separator between interaction components.
    #[serde(default = "default_interaction_separator")]
    pub interaction_separator: char,
    /// Separator between namespace and feature within a component.
    #[serde(default = "default_namespace_separator")]
    pub namespace_separator: char,
    /// Namespace token renames.
    #[serde(default = "default_renames")]
    pub renames: BTreeMap<String, String>,
}

impl Default for PrettyConfig {
    fn default() -> Self {
        Self {
            interaction_separator: default_interaction_separator(),
            namespace_separator: default_namespace_separator(),
            renames: default_renames(),
        }
    }
}

fn default_interaction_separator() -> char {
    '*'
}

fn default_namespace_separator() -> char {
    '^'
}

fn default_renames() -> BTreeMap<String, String> {
    [("FromUrl", "Context"), ("i", "Action"), ("j", "Action")]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

/// Input file discovery.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscoveryConfig {
    /// File name suffix of readable model dumps when a directory is given.
    #[serde(default = "default_readable_model_suffix")]
    pub readable_model_suffix: String,
    /// File name suffix of invert hash files when a directory is given.
    #[serde(default = "default_invert_hash_suffix")]
    pub invert_hash_suffix: String,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            readable_model_suffix: default_readable_model_suffix(),
            invert_hash_suffix: default_invert_hash_suffix(),
        }
    }
}

fn default_readable_model_suffix() -> String {
    ".readable_model".to_string()
}

fn default_invert_hash_suffix() -> String {
    ".inv_hash".to_string()
}

/// Load configuration from layered sources.
///
/// Priority (highest to lowest):
/// 1. Environment variables (prefixed with `FEATFUNNEL_`)
/// 2. Explicit config file
/// 3. Workspace-local config (`.featfunnel/config.toml`)
/// 4. User config (`~/.config/featfunnel/config.toml`)
/// 5. Built-in defaults
pub fn load_config(
    workspace: Option<&Path>,
    explicit: Option<&Path>,
) -> Result<FunnelConfig, FunnelError> {
    let mut figment = Figment::from(Serialized::defaults(FunnelConfig::default()));

    if let Some(dirs) = directories::ProjectDirs::from("dev", "featfunnel", "featfunnel") {
        let user_config = dirs.config_dir().join("config.toml");
        if user_config.exists() {
            figment = figment.merge(Toml::file(&user_config));
        }
    }

    if let Some(ws) = workspace {
        let ws_config = ws.join(".featfunnel").join("config.toml");
        if ws_config.exists() {
            figment = figment.merge(Toml::file(&ws_config));
        }
    }

    if let Some(path) = explicit {
        if !path.exists() {
            return Err(FunnelError::Config(format!(
                "config file not found: {}",
                path.display()
            )));
        }
        figment = figment.merge(Toml::file(path));
    }

    // FEATFUNNEL_MIN_NUM_FEATURES, FEATFUNNEL_GRID__LEVELS, ...
    figment = figment.merge(Env::prefixed("FEATFUNNEL_").split("__"));

    let config: FunnelConfig = figment.extract()?;
    config.validate()?;
    Ok(config)
}

impl FunnelConfig {
    /// Reject settings that would make the sweep plan meaningless.
    pub fn validate(&self) -> Result<(), FunnelError> {
        if self.grid.levels == 0 {
            return Err(FunnelError::Config("grid.levels must be at least 1".into()));
        }
        if !(self.grid.factor.is_finite() && self.grid.factor > 0.0) {
            return Err(FunnelError::Config(format!(
                "grid.factor must be a positive number, got {}",
                self.grid.factor
            )));
        }
        if self.pretty.interaction_separator == self.pretty.namespace_separator {
            return Err(FunnelError::Config(
                "pretty.interaction_separator and pretty.namespace_separator must differ".into(),
            ));
        }
        Ok(())
    }
}
