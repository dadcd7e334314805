//! Feature funnel bucketing.

use std::collections::BTreeSet;

/// Split a funnel into drop-out buckets.
///
/// `funnel` is ordered loosest regularization first. Levels are visited from
/// the strictest end; each bucket holds the features that first appear
/// (looking from strict to loose) at that level, sorted ascending. Levels that
/// add nothing new produce no bucket, so the output is ordered strictest
/// first and may be shorter than the input.
///
/// ```
/// use featfunnel_core::buckets::feature_buckets;
///
/// let funnel = vec![
///     vec!["c", "b", "a", "d", "e"],
///     vec!["b", "c", "a"],
///     vec!["a"],
/// ];
/// assert_eq!(
///     feature_buckets(&funnel),
///     vec![vec!["a"], vec!["b", "c"], vec!["d", "e"]],
/// );
/// ```
pub fn feature_buckets<S: AsRef<str>>(funnel: &[Vec<S>]) -> Vec<Vec<String>> {
    let mut seen: BTreeSet<&str> = BTreeSet::new();
    let mut buckets = Vec::new();

    for level in funnel.iter().rev() {
        let unique: BTreeSet<&str> = level
            .iter()
            .map(AsRef::as_ref)
            .filter(|feature| !seen.contains(feature))
            .collect();
        if unique.is_empty() {
            continue;
        }
        seen.extend(unique.iter().copied());
        buckets.push(unique.into_iter().map(str::to_string).collect());
    }

    buckets
}
