//! Subcommand handlers.

use anyhow::Context;
use featfunnel_core::report::{render_json, render_text};
use featfunnel_core::{FeatureImportance, FunnelConfig, PathLister, SweepPlan, format_l1};
use std::io::Write;
use std::path::PathBuf;
use tracing::debug;

/// Report format for `run`.
#[derive(clap::ValueEnum, Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(clap::Args, Debug)]
pub struct RunArgs {
    /// Invert hash files, or directories to search for them
    #[arg(long, value_name = "PATH", num_args = 1.., required = true)]
    pub invert_hash: Vec<PathBuf>,

    /// Readable model files in grid order, or directories to search for them
    #[arg(long, value_name = "PATH", num_args = 1.., required = true)]
    pub models: Vec<PathBuf>,

    /// Training arguments of the sweep (may include `--l1 <value>`)
    #[arg(long, allow_hyphen_values = true)]
    pub ml_args: Option<String>,

    /// Stop once a level has fewer features than this
    #[arg(short = 'n', long)]
    pub min_num_features: Option<usize>,

    /// Report format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

pub fn run(args: RunArgs, mut config: FunnelConfig) -> anyhow::Result<()> {
    if let Some(ml_args) = args.ml_args {
        config.ml_args = ml_args;
    }
    if let Some(min) = args.min_num_features {
        config.min_num_features = min;
    }

    debug!(
        invert_hash = args.invert_hash.len(),
        models = args.models.len(),
        min_num_features = config.min_num_features,
        "Starting funnel run"
    );
    let invert_hash = PathLister::new(args.invert_hash, config.discovery.invert_hash_suffix.clone());
    let models = PathLister::new(args.models, config.discovery.readable_model_suffix.clone());

    let report = FeatureImportance::new(config)
        .run(&invert_hash, &models)
        .context("Feature funnel run failed")?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    match args.format {
        OutputFormat::Text => render_text(&report, &mut out)?,
        OutputFormat::Json => writeln!(out, "{}", render_json(&report)?)?,
    }
    Ok(())
}

pub fn plan(ml_args: Option<String>, config: FunnelConfig) -> anyhow::Result<()> {
    let ml_args = ml_args.unwrap_or(config.ml_args);
    let plan = SweepPlan::new(&ml_args, &config.grid)?;
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    for line in plan_lines(&plan) {
        writeln!(out, "{line}")?;
    }
    Ok(())
}

fn plan_lines(plan: &SweepPlan) -> Vec<String> {
    plan.points
        .iter()
        .map(|point| format!("{}\t{}", format_l1(point.l1), plan.args_for(point)))
        .collect()
}

pub fn show_config(config: &FunnelConfig) -> anyhow::Result<()> {
    let rendered = toml::to_string_pretty(config).context("Failed to render configuration")?;
    print!("{rendered}");
    Ok(())
}
