//! Property-based tests for bucketing and feature rendering.

use proptest::prelude::*;
use std::collections::BTreeSet;

use featfunnel_core::{feature_buckets, pretty_feature};

fn funnel_strategy() -> impl Strategy<Value = Vec<Vec<String>>> {
    prop::collection::vec(prop::collection::vec("[a-f]{1,2}", 0..8), 0..6)
}

// --- Bucketing properties ---

proptest! {
    #[test]
    fn buckets_cover_every_feature_exactly_once(funnel in funnel_strategy()) {
        let buckets = feature_buckets(&funnel);
        let input: BTreeSet<&String> = funnel.iter().flatten().collect();
        let output: Vec<&String> = buckets.iter().flatten().collect();
        let output_set: BTreeSet<&String> = output.iter().copied().collect();

        prop_assert_eq!(output.len(), output_set.len());
        prop_assert_eq!(input, output_set);
    }

    #[test]
    fn buckets_are_sorted_and_non_empty(funnel in funnel_strategy()) {
        for bucket in feature_buckets(&funnel) {
            prop_assert!(!bucket.is_empty());
            prop_assert!(bucket.windows(2).all(|w| w[0] < w[1]));
        }
    }

    #[test]
    fn first_bucket_is_strictest_non_empty_level(funnel in funnel_strategy()) {
        let buckets = feature_buckets(&funnel);
        if let Some(strictest) = funnel.iter().rev().find(|level| !level.is_empty()) {
            let expected: BTreeSet<&String> = strictest.iter().collect();
            let first: BTreeSet<&String> = buckets[0].iter().collect();
            prop_assert_eq!(expected, first);
        } else {
            prop_assert!(buckets.is_empty());
        }
    }

    #[test]
    fn bucket_count_never_exceeds_levels(funnel in funnel_strategy()) {
        prop_assert!(feature_buckets(&funnel).len() <= funnel.len());
    }
}

// --- Rendering properties ---

proptest! {
    #[test]
    fn pretty_is_total(name in ".*") {
        let _ = pretty_feature(&name);
    }

    #[test]
    fn pretty_without_separators_is_identity(name in "[A-Za-z0-9_. ]{0,20}") {
        prop_assume!(!["FromUrl", "i", "j"].contains(&name.as_str()));
        prop_assert_eq!(pretty_feature(&name), name);
    }

    #[test]
    fn pretty_is_stable_on_rendered_names(
        ns in "[A-Z][a-z]{1,6}",
        feature in "[a-z0-9]{1,6}",
        other in "[A-Z][a-z]{1,6}",
    ) {
        let once = pretty_feature(&format!("{ns}^{feature}*{other}^{feature}"));
        prop_assert_eq!(pretty_feature(&once), once.clone());
    }
}
