//! featfunnel CLI — see at which L1 strength each feature drops out.
//!
//! `run` analyses the readable models of an L1 sweep, `plan` prints the
//! training arguments a sweep executor should run, `config` shows the
//! effective configuration.

mod commands;

use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

/// featfunnel: L1 feature funnels for linear models
#[derive(Parser, Debug)]
#[command(name = "featfunnel", version, about, long_about = None)]
struct Cli {
    /// Workspace directory (for `.featfunnel/config.toml`)
    #[arg(short, long, default_value = ".", global = true)]
    workspace: PathBuf,

    /// Configuration file path
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress log output on stderr
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Build the feature funnel from an executed L1 sweep
    Run(commands::RunArgs),
    /// Print the training arguments for each L1 grid point
    Plan {
        /// Training arguments (may include `--l1 <value>` as the starting point)
        #[arg(long, allow_hyphen_values = true)]
        ml_args: Option<String>,
    },
    /// Print the effective configuration as TOML
    Config,
}

fn main() -> anyhow::Result<()> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    // The report goes to stdout, so stderr only carries logs the user asked for.
    let filter = match cli.verbose {
        _ if cli.quiet => "off",
        0 => "error",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_filter(EnvFilter::new(filter));

    // JSON file layer for structured logging
    let log_dir = directories::ProjectDirs::from("dev", "featfunnel", "featfunnel")
        .map(|d| d.data_dir().join("logs"))
        .unwrap_or_else(|| PathBuf::from("."));
    let _ = std::fs::create_dir_all(&log_dir);
    let file_appender = tracing_appender::rolling::daily(&log_dir, "featfunnel.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);
    let json_layer = tracing_subscriber::fmt::layer()
        .json()
        .with_writer(non_blocking)
        .with_filter(EnvFilter::new("debug"));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let workspace = cli
        .workspace
        .canonicalize()
        .unwrap_or_else(|_| cli.workspace.clone());

    let config = featfunnel_core::load_config(Some(&workspace), cli.config.as_deref())
        .map_err(|e| anyhow::anyhow!("Configuration error: {}", e))?;

    match cli.command {
        Commands::Run(args) => commands::run(args, config),
        Commands::Plan { ml_args } => commands::plan(ml_args, config),
        Commands::Config => commands::show_config(&config),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_run() {
        let cli = Cli::try_parse_from([
            "featfunnel",
            "-v",
            "run",
            "--invert-hash",
            "a.inv_hash",
            "--models",
            "runs/",
            "more/",
            "--ml-args",
            "--cb_adf -l 0.01 --l1 1e-6",
            "-n",
            "7",
            "--format",
            "json",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 1);
        match cli.command {
            Commands::Run(args) => {
                assert_eq!(args.invert_hash, vec![PathBuf::from("a.inv_hash")]);
                assert_eq!(args.models.len(), 2);
                assert_eq!(args.ml_args.as_deref(), Some("--cb_adf -l 0.01 --l1 1e-6"));
                assert_eq!(args.min_num_features, Some(7));
                assert_eq!(args.format, commands::OutputFormat::Json);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_run_requires_inputs() {
        assert!(Cli::try_parse_from(["featfunnel", "run", "--models", "runs/"]).is_err());
        assert!(Cli::try_parse_from(["featfunnel", "run", "--invert-hash", "a"]).is_err());
    }

    #[test]
    fn test_parse_config_and_plan() {
        let cli = Cli::try_parse_from(["featfunnel", "-c", "ff.toml", "config"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("ff.toml")));
        assert!(matches!(cli.command, Commands::Config));

        let cli = Cli::try_parse_from(["featfunnel", "plan", "--ml-args", "--cb_adf"]).unwrap();
        assert!(matches!(cli.command, Commands::Plan { ml_args: Some(_) }));
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "featfunnel",
            "run",
            "-c",
            "ff.toml",
            "-w",
            "ws",
            "--invert-hash",
            "a.inv_hash",
            "--models",
            "runs/",
        ])
        .unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("ff.toml")));
        assert_eq!(cli.workspace, PathBuf::from("ws"));
        assert!(matches!(cli.command, Commands::Run(_)));
    }
}
