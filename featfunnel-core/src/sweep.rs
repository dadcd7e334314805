//! L1 sweep planning.
//!
//! The sweep itself (training once per grid point) runs elsewhere. This module
//! only decides what it should run: the base training arguments and the
//! ordered L1 grid, loosest first.

use crate::config::GridConfig;
use crate::error::FunnelError;
use serde::{Deserialize, Serialize};

/// L1 starting point when the training arguments carry no `--l1`.
pub const DEFAULT_L1: f64 = 1e-7;

const L1_FLAG: &str = "--l1";
const READABLE_MODEL_ARGS: &str = "--dsjson --readable_model";

/// Training arguments with the `--l1` override split out.
#[derive(Debug, Clone, PartialEq)]
pub struct TrainingArgs {
    /// Everything except `--l1 <value>`.
    pub remaining: String,
    pub l1: f64,
}

impl TrainingArgs {
    /// Split `--l1 <value>` (or `--l1=<value>`) out of a training argument string.
    pub fn parse(ml_args: &str) -> Result<Self, FunnelError> {
        let mut remaining = Vec::new();
        let mut l1 = None;
        let mut tokens = ml_args.split_whitespace();

        while let Some(token) = tokens.next() {
            let value = if token == L1_FLAG {
                Some(tokens.next().ok_or_else(|| {
                    FunnelError::invalid_args(format!("'{L1_FLAG}' is missing its value"))
                })?)
            } else {
                token.strip_prefix("--l1=")
            };

            let Some(value) = value else {
                remaining.push(token);
                continue;
            };
            if l1.is_some() {
                return Err(FunnelError::invalid_args(format!(
                    "'{L1_FLAG}' given more than once in '{ml_args}'"
                )));
            }
            let parsed: f64 = value.parse().map_err(|_| {
                FunnelError::invalid_args(format!("'{value}' is not a valid {L1_FLAG} value"))
            })?;
            if !(parsed.is_finite() && parsed > 0.0) {
                return Err(FunnelError::invalid_args(format!(
                    "{L1_FLAG} must be a positive number, got {value}"
                )));
            }
            l1 = Some(parsed);
        }

        Ok(Self {
            remaining: remaining.join(" "),
            l1: l1.unwrap_or(DEFAULT_L1),
        })
    }
}

/// One grid point of the sweep.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SweepPoint {
    pub index: usize,
    pub l1: f64,
}

/// What a sweep executor is asked to run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepPlan {
    /// Arguments shared by every run, with readable model output switched on.
    pub base_args: String,
    /// L1 grid, loosest regularization first.
    pub points: Vec<SweepPoint>,
}

impl SweepPlan {
    pub fn new(ml_args: &str, grid: &GridConfig) -> Result<Self, FunnelError> {
        let args = TrainingArgs::parse(ml_args)?;
        let base_args = if args.remaining.is_empty() {
            READABLE_MODEL_ARGS.to_string()
        } else {
            format!("{} {READABLE_MODEL_ARGS}", args.remaining)
        };
        Ok(Self {
            base_args,
            points: l1_grid(args.l1, grid),
        })
    }

    /// Full argument string for one grid point.
    pub fn args_for(&self, point: &SweepPoint) -> String {
        format!("{} {L1_FLAG} {:e}", self.base_args, point.l1)
    }
}

/// `start * factor^k` for `k = 1..=levels`, rounded to 12 significant digits.
pub fn l1_grid(start: f64, grid: &GridConfig) -> Vec<SweepPoint> {
    (1..=grid.levels)
        .enumerate()
        .map(|(index, k)| SweepPoint {
            index,
            l1: round_significant(start * grid.factor.powi(k as i32)),
        })
        .collect()
}

/// Drop the float drift of repeated multiplication so `1e-7 * 10^2` is `1e-5`.
fn round_significant(value: f64) -> f64 {
    format!("{value:.11e}").parse().unwrap_or(value)
}

/// Format an L1 value with one significant digit and a two-digit exponent (`1e-06`).
pub fn format_l1(l1: f64) -> String {
    let raw = format!("{l1:.0e}");
    let Some((mantissa, exponent)) = raw.split_once('e') else {
        return raw;
    };
    let (sign, digits) = match exponent.strip_prefix('-') {
        Some(digits) => ('-', digits),
        None => ('+', exponent),
    };
    format!("{mantissa}e{sign}{digits:0>2}")
}
