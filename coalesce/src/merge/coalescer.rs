use coalesce_config::shared::MergePolicyConfig;
use tracing::{debug, trace};

use crate::error::CoalesceResult;
use crate::idgen::IdGenerator;
use crate::merge::catalog::{StrategyCatalog, StrategyRule};
use crate::merge::{emptiness, path};
use crate::types::{Item, Record, Value};

/// The field-by-field winner-selection engine.
///
/// A [`Coalescer`] is bound at construction to a merge policy and a template: the
/// policy supplies per-strategy precedence and visibility, the template supplies the
/// canonical field set and per-field defaults. Each [`Coalescer::merge`] call
/// reconciles one ordered sequence of [`Item`]s into a single merged record.
///
/// The engine is a pure, terminating computation bounded by O(fields × items). It holds
/// no mutable state, so one instance can serve any number of merge calls; every call
/// works on a fresh clone of the template, so concurrent callers sharing an instance
/// cannot interfere with each other.
#[derive(Debug, Clone)]
pub struct Coalescer {
    catalog: StrategyCatalog,
    template: Record,
    id_generator: IdGenerator,
}

impl Coalescer {
    /// Creates a coalescer bound to the given merge policy and template.
    ///
    /// An all-default [`MergePolicyConfig`] is valid: every item then contends under
    /// the implicit default rule and only emptiness gating applies.
    pub fn new(config: MergePolicyConfig, template: Record) -> Self {
        Self {
            catalog: StrategyCatalog::from_config(config),
            template,
            id_generator: IdGenerator::new(),
        }
    }

    /// Replaces the generator used for untagged item identifiers.
    pub fn with_id_generator(mut self, id_generator: IdGenerator) -> Self {
        self.id_generator = id_generator;
        self
    }

    /// Returns the template this coalescer is bound to.
    pub fn template(&self) -> &Record {
        &self.template
    }

    /// Returns the parsed strategy catalog this coalescer consults.
    pub fn catalog(&self) -> &StrategyCatalog {
        &self.catalog
    }

    /// Creates an item tagged with an explicit strategy identifier.
    pub fn create_item(&self, id: impl Into<String>, payload: Record) -> Item {
        Item::new(id, payload)
    }

    /// Creates an item tagged with a generated random identifier.
    ///
    /// Generated identifiers have no configured strategy rule, so untagged items always
    /// contend under the implicit default rule.
    pub fn create_untagged_item(&self, payload: Record) -> Item {
        Item::new(self.id_generator.sample(), payload)
    }

    /// Creates an item with a generated identifier and an empty payload.
    pub fn create_empty_item(&self) -> Item {
        self.create_untagged_item(Record::new())
    }

    /// Reconciles the items into one merged record, delivered through `on_complete`.
    ///
    /// The callback is invoked exactly once, after the full computation; there is no
    /// partial or streamed output. The error slot of the delivered result is reserved
    /// for future strategy sources that may be fallible and is always `Ok` today; no
    /// input condition causes the merge computation itself to fail.
    ///
    /// Items are consulted in supplied order. For a fixed item set with strictly
    /// distinct contending priorities the result is order-independent; equal-priority
    /// contention is resolved by `winOnDefault` and is order-dependent by design.
    pub fn merge<F>(&self, items: &[Item], on_complete: F)
    where
        F: FnOnce(CoalesceResult<Record>),
    {
        debug!(
            items = items.len(),
            fields = self.template.len(),
            "coalescing items into merged record"
        );

        on_complete(Ok(self.coalesce(items)));
    }

    /// Runs the per-field selection loop over a fresh clone of the template.
    fn coalesce(&self, items: &[Item]) -> Record {
        // We clone the template per call: the clone seeds the defaults, and callers
        // sharing this instance never observe mutation of their template.
        let mut merged = self.template.clone();

        for (field, slot) in merged.iter_mut() {
            if let Some(winner) = self.select_winner(field, items) {
                *slot = winner.clone();
            }
        }

        merged
    }

    /// Selects the winning value for one template field, if any item contends for it.
    fn select_winner<'a>(&self, field: &str, items: &'a [Item]) -> Option<&'a Value> {
        let mut winner: Option<(&'a Value, &StrategyRule)> = None;

        for item in items {
            let rule = self.catalog.rule_for(item.id());

            if !rule.allows_field(field) {
                trace!(source = item.id(), field, "field not visible for strategy");
                continue;
            }

            let Some(value) = path::resolve(item.payload(), field) else {
                continue;
            };

            if emptiness::is_empty(value) && !self.catalog.allows_empty_values() {
                trace!(source = item.id(), field, "skipping empty candidate");
                continue;
            }

            // Empty arrays never win, independent of the empty-merge flag.
            if let Value::Array(elements) = value
                && elements.is_empty()
            {
                continue;
            }

            let adopt = match &winner {
                None => true,
                Some((_, incumbent)) => {
                    rule.priority() > incumbent.priority()
                        || (rule.priority() == incumbent.priority() && rule.win_on_default())
                }
            };

            if adopt {
                debug!(
                    source = item.id(),
                    field,
                    priority = rule.priority(),
                    "field adopted candidate"
                );
                winner = Some((value, rule));
            }
        }

        winner.map(|(value, _)| value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(entries: Vec<(&str, Value)>) -> Record {
        entries
            .into_iter()
            .map(|(key, value)| (key.to_string(), value))
            .collect()
    }

    fn merge_now(coalescer: &Coalescer, items: &[Item]) -> Record {
        let mut merged = None;
        coalescer.merge(items, |result| merged = Some(result));

        merged
            .expect("merge must invoke the completion callback")
            .expect("merge never fails")
    }

    #[test]
    fn test_merge_with_empty_template_yields_empty_record() {
        let coalescer = Coalescer::new(MergePolicyConfig::default(), Record::new());
        let items = vec![coalescer.create_untagged_item(record(vec![
            ("title", Value::from("Awesome title 1")),
            ("genre", Value::from("rock")),
        ]))];

        let merged = merge_now(&coalescer, &items);
        assert!(merged.is_empty());
    }

    #[test]
    fn test_callback_is_invoked_exactly_once() {
        let coalescer = Coalescer::new(MergePolicyConfig::default(), Record::new());

        let mut calls = 0;
        coalescer.merge(&[], |result| {
            assert!(result.is_ok());
            calls += 1;
        });

        assert_eq!(calls, 1);
    }

    #[test]
    fn test_template_is_not_mutated_by_merging() {
        let template = record(vec![("title", Value::from(""))]);
        let coalescer = Coalescer::new(MergePolicyConfig::default(), template.clone());

        let items = vec![coalescer.create_untagged_item(record(vec![(
            "title",
            Value::from("Awesome title 1"),
        )]))];

        let merged = merge_now(&coalescer, &items);
        assert_eq!(merged.get("title"), Some(&Value::from("Awesome title 1")));
        assert_eq!(coalescer.template(), &template);
    }

    #[test]
    fn test_opaque_default_survives_and_is_replaceable() {
        let template = record(vec![("print_nothing", Value::Opaque)]);
        let coalescer = Coalescer::new(MergePolicyConfig::default(), template);

        // No contender: the placeholder default is preserved verbatim.
        let merged = merge_now(&coalescer, &[]);
        assert_eq!(merged.get("print_nothing"), Some(&Value::Opaque));

        // A contender of a different type replaces the placeholder wholesale.
        let items = vec![
            coalescer.create_untagged_item(record(vec![("print_nothing", Value::Bool(true))])),
        ];
        let merged = merge_now(&coalescer, &items);
        assert_eq!(merged.get("print_nothing"), Some(&Value::Bool(true)));
    }
}
