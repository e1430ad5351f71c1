use std::collections::{HashMap, HashSet};

use coalesce_config::shared::{MergePolicyConfig, StrategyRuleConfig};

/// Resolved precedence rule for one strategy.
///
/// [`StrategyRule`] is the queryable form of a [`StrategyRuleConfig`]: path lists become
/// sets, defaults are materialized, and the rule is immutable from then on. The merge
/// loop consults it once per candidate without any existence checks.
#[derive(Debug, Clone, PartialEq)]
pub struct StrategyRule {
    priority: i64,
    win_on_default: bool,
    ignore: HashSet<String>,
    use_only: HashSet<String>,
}

impl StrategyRule {
    /// Resolves a rule from its configuration form.
    fn from_config(config: StrategyRuleConfig) -> Self {
        Self {
            priority: config.priority,
            win_on_default: config.win_on_default,
            ignore: config.ignore.into_iter().collect(),
            use_only: config.use_only.into_iter().collect(),
        }
    }

    /// Returns the precedence of candidates carrying this rule.
    pub fn priority(&self) -> i64 {
        self.priority
    }

    /// Returns whether an equal-priority candidate under this rule displaces the
    /// incumbent winner.
    pub fn win_on_default(&self) -> bool {
        self.win_on_default
    }

    /// Returns whether this rule lets its strategy contend for the given field.
    ///
    /// A field is visible iff it is not on the deny list and the allow list is either
    /// empty (unrestricted) or contains it.
    pub fn allows_field(&self, field: &str) -> bool {
        if self.ignore.contains(field) {
            return false;
        }

        self.use_only.is_empty() || self.use_only.contains(field)
    }
}

/// The implicit rule: priority 0, wins on default, unrestricted.
impl Default for StrategyRule {
    fn default() -> Self {
        Self::from_config(StrategyRuleConfig::default())
    }
}

/// Immutable catalog of per-strategy precedence rules.
///
/// [`StrategyCatalog`] parses a [`MergePolicyConfig`] once into resolved rules, so the
/// merge loop never walks the raw configuration. Lookups are total: an item whose id
/// has no configured entry resolves to the implicit default rule, and an absent
/// configuration degrades to all defaults.
#[derive(Debug, Clone, Default)]
pub struct StrategyCatalog {
    allow_empty_values: bool,
    rules: HashMap<String, StrategyRule>,
    default_rule: StrategyRule,
}

impl StrategyCatalog {
    /// Parses the configuration into a catalog.
    pub fn from_config(config: MergePolicyConfig) -> Self {
        let rules = config
            .strategies
            .into_iter()
            .map(|(id, rule)| (id, StrategyRule::from_config(rule)))
            .collect();

        Self {
            allow_empty_values: config.model.allow_merging_of_empty_values,
            rules,
            default_rule: StrategyRule::default(),
        }
    }

    /// Returns the rule registered for a strategy id.
    ///
    /// Never fails: unknown ids resolve to the implicit default rule.
    pub fn rule_for(&self, id: &str) -> &StrategyRule {
        self.rules.get(id).unwrap_or(&self.default_rule)
    }

    /// Returns whether empty values are allowed to displace defaults.
    pub fn allows_empty_values(&self) -> bool {
        self.allow_empty_values
    }

    /// Returns whether the strategy may contend for the given field.
    pub fn is_visible(&self, id: &str, field: &str) -> bool {
        self.rule_for(id).allows_field(field)
    }
}

impl From<MergePolicyConfig> for StrategyCatalog {
    fn from(config: MergePolicyConfig) -> Self {
        Self::from_config(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog_with(strategies: Vec<(&str, StrategyRuleConfig)>) -> StrategyCatalog {
        let config = MergePolicyConfig {
            strategies: strategies
                .into_iter()
                .map(|(id, rule)| (id.to_string(), rule))
                .collect(),
            ..Default::default()
        };

        StrategyCatalog::from_config(config)
    }

    #[test]
    fn test_unknown_id_resolves_to_implicit_default() {
        let catalog = StrategyCatalog::default();
        let rule = catalog.rule_for("NOT_FOUND_STRAT");

        assert_eq!(rule.priority(), 0);
        assert!(rule.win_on_default());
        assert!(rule.allows_field("anything"));
    }

    #[test]
    fn test_empty_merge_flag_defaults_to_false() {
        assert!(!StrategyCatalog::default().allows_empty_values());
    }

    #[test]
    fn test_ignore_hides_fields() {
        let catalog = catalog_with(vec![(
            "ignore-strat",
            StrategyRuleConfig {
                ignore: vec!["revenue".to_string(), "genre".to_string()],
                ..Default::default()
            },
        )]);

        assert!(!catalog.is_visible("ignore-strat", "revenue"));
        assert!(!catalog.is_visible("ignore-strat", "genre"));
        assert!(catalog.is_visible("ignore-strat", "title"));
    }

    #[test]
    fn test_use_only_restricts_fields() {
        let catalog = catalog_with(vec![(
            "useonly-strat",
            StrategyRuleConfig {
                use_only: vec!["artist".to_string()],
                ..Default::default()
            },
        )]);

        assert!(catalog.is_visible("useonly-strat", "artist"));
        assert!(!catalog.is_visible("useonly-strat", "title"));
    }

    #[test]
    fn test_ignore_wins_over_use_only() {
        let catalog = catalog_with(vec![(
            "conflicted-strat",
            StrategyRuleConfig {
                ignore: vec!["artist".to_string()],
                use_only: vec!["artist".to_string()],
                ..Default::default()
            },
        )]);

        assert!(!catalog.is_visible("conflicted-strat", "artist"));
    }

    #[test]
    fn test_configured_priority_and_tie_break() {
        let catalog = catalog_with(vec![(
            "basic-strat",
            StrategyRuleConfig {
                priority: 5,
                win_on_default: false,
                ..Default::default()
            },
        )]);

        let rule = catalog.rule_for("basic-strat");
        assert_eq!(rule.priority(), 5);
        assert!(!rule.win_on_default());
    }
}
