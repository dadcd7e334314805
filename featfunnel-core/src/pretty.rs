//! Human-readable rendering of raw feature names.
//!
//! Raw names look like `FromUrl^country*i^id`: interaction components joined by
//! `*`, namespace and feature joined by `^`. Rendered, that becomes
//! `Context.country with Action.id`.

use crate::config::PrettyConfig;

const INTERACTION_JOINER: &str = " with ";
const NAMESPACE_JOINER: &str = ".";

/// Renders raw feature names using a namespace rename table.
#[derive(Debug, Clone)]
pub struct FeaturePrinter {
    config: PrettyConfig,
}

impl Default for FeaturePrinter {
    fn default() -> Self {
        Self::new(PrettyConfig::default())
    }
}

impl FeaturePrinter {
    pub fn new(config: PrettyConfig) -> Self {
        Self { config }
    }

    /// Render one raw feature name. Total over any input.
    pub fn render(&self, feature: &str) -> String {
        feature
            .split(self.config.interaction_separator)
            .map(|component| self.render_component(component))
            .collect::<Vec<_>>()
            .join(INTERACTION_JOINER)
    }

    fn render_component(&self, component: &str) -> String {
        let mut tokens = component.split(self.config.namespace_separator);
        let namespace = tokens.next().unwrap_or_default();
        let namespace = self
            .config
            .renames
            .get(namespace)
            .map(String::as_str)
            .unwrap_or(namespace);

        std::iter::once(namespace)
            .chain(tokens)
            .collect::<Vec<_>>()
            .join(NAMESPACE_JOINER)
    }
}

/// Render with the default separators and renames.
pub fn pretty_feature(feature: &str) -> String {
    FeaturePrinter::default().render(feature)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn test_namespace_renames() {
        assert_eq!(pretty_feature("FromUrl^x"), "Context.x");
        assert_eq!(pretty_feature("i^y"), "Action.y");
        assert_eq!(pretty_feature("j^z"), "Action.z");
        assert_eq!(pretty_feature("Other^w"), "Other.w");
    }

    #[test]
    fn test_interactions() {
        assert_eq!(pretty_feature("A^b*C^d"), "A.b with C.d");
        assert_eq!(
            pretty_feature("FromUrl^country*i^id*j^slot"),
            "Context.country with Action.id with Action.slot"
        );
    }

    #[test]
    fn test_degenerate_inputs_pass_through() {
        assert_eq!(pretty_feature("constant"), "constant");
        assert_eq!(pretty_feature("i"), "Action");
        assert_eq!(pretty_feature(""), "");
        assert_eq!(pretty_feature("a^b^c"), "a.b.c");
        assert_eq!(pretty_feature("*"), " with ");
    }

    #[test]
    fn test_only_first_token_is_renamed() {
        assert_eq!(pretty_feature("Emotion0^i"), "Emotion0.i");
    }

    #[test]
    fn test_already_pretty_is_stable() {
        let once = pretty_feature("Emotion2^fear*Other^x");
        assert_eq!(pretty_feature(&once), once);
    }

    #[test]
    fn test_custom_config() {
        let printer = FeaturePrinter::new(PrettyConfig {
            interaction_separator: '&',
            namespace_separator: '|',
            renames: BTreeMap::from([("u".to_string(), "User".to_string())]),
        });
        assert_eq!(printer.render("u|age&i|x"), "User.age with i.x");
    }
}
