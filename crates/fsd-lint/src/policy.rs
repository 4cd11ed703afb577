//! Layer hierarchy lookup.

use crate::config::{FsdConfig, LayerRule};

/// Which layers each layer may depend on.
///
/// Lookup is a direct membership test. No transitive closure is computed,
/// so a configured table must already list every permitted layer.
#[derive(Debug, Clone)]
pub struct LayerPolicyTable {
    rules: Vec<LayerRule>,
}

impl LayerPolicyTable {
    /// Build the table from config.
    #[must_use]
    pub fn new(config: &FsdConfig) -> Self {
        Self {
            rules: config.layers.clone(),
        }
    }

    /// The rule for `layer`, if configured.
    #[must_use]
    pub fn rule(&self, layer: &str) -> Option<&LayerRule> {
        self.rules.iter().find(|r| r.name == layer)
    }

    /// May `from` import from `to`?
    ///
    /// Unknown `from` layers allow nothing.
    #[must_use]
    pub fn allows(&self, from: &str, to: &str) -> bool {
        self.rule(from)
            .is_some_and(|r| r.allowed.iter().any(|a| a == to))
    }

    /// Explanation attached to `invalidImport` for imports made from `layer`.
    ///
    /// Falls back to listing the allowed layers when the rule has no message.
    #[must_use]
    pub fn message(&self, layer: &str) -> String {
        match self.rule(layer) {
            Some(rule) if !rule.message.is_empty() => rule.message.clone(),
            Some(rule) => format!("Allowed layers: {}", rule.allowed.join(", ")),
            None => "Allowed layers: ".to_owned(),
        }
    }
}
