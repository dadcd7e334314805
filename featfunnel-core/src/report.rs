//! Report rendering.

use crate::error::FunnelError;
use crate::importance::FunnelReport;
use crate::sweep::format_l1;
use std::io::{self, Write};

const RULE: &str = "=====================================";

/// Write the human-readable report.
///
/// Diagnostics appear inline, in the order the run produced them.
pub fn render_text(report: &FunnelReport, out: &mut impl Write) -> io::Result<()> {
    for diagnostic in &report.inversion_diagnostics {
        writeln!(out, "{diagnostic}")?;
    }

    writeln!(out)?;
    writeln!(out, "{RULE}")?;
    writeln!(out, "Testing a range of L1 regularization")?;
    for level in &report.levels {
        for diagnostic in &level.diagnostics {
            writeln!(out, "{diagnostic}")?;
        }
        writeln!(
            out,
            "L1: {} - Num of Features: {}, File - {}",
            format_l1(level.l1),
            level.features.len(),
            level.file_name()
        )?;
    }
    if let Some(termination) = &report.termination {
        writeln!(out, "{termination}")?;
    }
    writeln!(out, "feature funnel sizes: {:?}", report.funnel_sizes())?;
    writeln!(out, "{RULE}")?;

    writeln!(out)?;
    writeln!(out, "Feature buckets (strictest L1 first)")?;
    writeln!(out, "{RULE}")?;
    for (i, bucket) in report.pretty_feature_buckets.iter().enumerate() {
        writeln!(out, "Bucket {} - {} features", i + 1, bucket.len())?;
        for feature in bucket {
            writeln!(out, "  {feature}")?;
        }
    }
    writeln!(out, "{RULE}")?;
    Ok(())
}

/// Serialize the whole report as pretty JSON.
pub fn render_json(report: &FunnelReport) -> Result<String, FunnelError> {
    Ok(serde_json::to_string_pretty(report)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::Diagnostic;
    use crate::importance::FunnelLevel;
    use crate::sweep::{SweepPlan, SweepPoint};
    use std::path::PathBuf;

    fn sample() -> FunnelReport {
        FunnelReport {
            plan: SweepPlan {
                base_args: "--cb_adf --dsjson --readable_model".into(),
                points: vec![
                    SweepPoint { index: 0, l1: 1e-6 },
                    SweepPoint { index: 1, l1: 1e-5 },
                ],
            },
            min_num_features: 2,
            inversion_diagnostics: vec![],
            levels: vec![
                FunnelLevel {
                    l1: 1e-6,
                    path: PathBuf::from("/runs/a.readable_model"),
                    features: vec!["FromUrl^x".into(), "i^y".into()],
                    diagnostics: vec![Diagnostic::MissingHashValue {
                        path: PathBuf::from("/runs/a.readable_model"),
                        hash: "42".into(),
                    }],
                },
                FunnelLevel {
                    l1: 1e-5,
                    path: PathBuf::from("/runs/b.readable_model"),
                    features: vec!["FromUrl^x".into()],
                    diagnostics: vec![],
                },
            ],
            termination: Some(Diagnostic::ThresholdReached {
                num_features: 1,
                min_num_features: 2,
                l1: 1e-5,
            }),
            feature_buckets: vec![vec!["FromUrl^x".into()], vec!["i^y".into()]],
            pretty_feature_buckets: vec![vec!["Context.x".into()], vec!["Action.y".into()]],
        }
    }

    #[test]
    fn test_text_report_lines() {
        let mut buf = Vec::new();
        render_text(&sample(), &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();

        let missing = text.find("missing hash value in inv_hash: 42").unwrap();
        let first = text
            .find("L1: 1e-06 - Num of Features: 2, File - a.readable_model")
            .unwrap();
        assert!(missing < first);
        assert!(text.contains("L1: 1e-05 - Num of Features: 1, File - b.readable_model"));
        assert!(text.contains("below the minimum of 2. Exiting the loop with L1 value of: 1e-05"));
        assert!(text.contains("feature funnel sizes: [2, 1]"));
        assert!(text.contains("Bucket 2 - 1 features\n  Action.y"));
    }

    #[test]
    fn test_json_report_has_both_bucket_kinds() {
        let json = render_json(&sample()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["feature_buckets"][0][0], "FromUrl^x");
        assert_eq!(value["pretty_feature_buckets"][1][0], "Action.y");
        assert_eq!(value["termination"]["kind"], "threshold_reached");
    }
}
