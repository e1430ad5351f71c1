use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::load::Config;

/// Declarative merge policy: global options plus per-strategy precedence rules.
///
/// This is the external representation of the policy document, a JSON-like document
/// with camelCase keys. Every sub-structure defaults when missing, so an absent or
/// empty document degrades to "all defaults" rather than an error. Values are not
/// defensively validated beyond what deserialization enforces.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MergePolicyConfig {
    /// Options applying to the merge as a whole.
    pub model: ModelOptions,
    /// Precedence rules keyed by strategy identifier.
    pub strategies: HashMap<String, StrategyRuleConfig>,
}

/// Global merge options.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ModelOptions {
    /// Whether empty candidate values (empty strings, records, nulls) may displace
    /// template defaults. Off by default.
    pub allow_merging_of_empty_values: bool,
}

/// Precedence rule for one named strategy.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StrategyRuleConfig {
    /// Precedence of this strategy's candidates; higher wins.
    pub priority: i64,
    /// Whether an equal-priority candidate displaces the incumbent winner.
    pub win_on_default: bool,
    /// Field paths this strategy never contributes to.
    pub ignore: Vec<String>,
    /// Field paths this strategy exclusively contributes to; empty means unrestricted.
    pub use_only: Vec<String>,
}

impl Default for StrategyRuleConfig {
    fn default() -> Self {
        Self {
            priority: 0,
            win_on_default: true,
            ignore: Vec::new(),
            use_only: Vec::new(),
        }
    }
}

impl Config for MergePolicyConfig {
    // Strategy ids are dynamic map keys, so no list-valued key can be named statically.
    const LIST_PARSE_KEYS: &'static [&'static str] = &[];
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_document_deserializes() {
        let config: MergePolicyConfig = serde_json::from_value(serde_json::json!({
            "model": { "allowMergingOfEmptyValues": true },
            "strategies": {
                "discogs": {
                    "priority": 2,
                    "winOnDefault": false,
                    "ignore": ["revenue"],
                    "useOnly": ["title", "genre"]
                }
            }
        }))
        .unwrap();

        assert!(config.model.allow_merging_of_empty_values);

        let rule = &config.strategies["discogs"];
        assert_eq!(rule.priority, 2);
        assert!(!rule.win_on_default);
        assert_eq!(rule.ignore, vec!["revenue".to_string()]);
        assert_eq!(rule.use_only, vec!["title".to_string(), "genre".to_string()]);
    }

    #[test]
    fn test_missing_sub_structures_default() {
        let config: MergePolicyConfig = serde_json::from_value(serde_json::json!({})).unwrap();

        assert!(!config.model.allow_merging_of_empty_values);
        assert!(config.strategies.is_empty());
    }

    #[test]
    fn test_partial_rule_fills_defaults() {
        let config: MergePolicyConfig = serde_json::from_value(serde_json::json!({
            "strategies": { "musicbrainz": { "priority": 1 } }
        }))
        .unwrap();

        let rule = &config.strategies["musicbrainz"];
        assert_eq!(rule.priority, 1);
        assert!(rule.win_on_default);
        assert!(rule.ignore.is_empty());
        assert!(rule.use_only.is_empty());
    }

    #[test]
    fn test_round_trip_preserves_camel_case_keys() {
        let mut config = MergePolicyConfig::default();
        config
            .strategies
            .insert("a".to_string(), StrategyRuleConfig::default());

        let rendered = serde_json::to_value(&config).unwrap();

        assert!(rendered["model"]["allowMergingOfEmptyValues"].is_boolean());
        assert!(rendered["strategies"]["a"]["winOnDefault"].is_boolean());
        assert!(rendered["strategies"]["a"]["useOnly"].is_array());
    }
}
