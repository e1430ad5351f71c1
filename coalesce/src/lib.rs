//! Declarative reconciliation of multi-source records.
//!
//! `coalesce` merges multiple partial, possibly conflicting records describing the same
//! logical entity into one canonical record, driven by a per-field precedence policy
//! instead of hand-written merge code per schema. Records arrive as tagged [`Item`]s,
//! each carrying the identifier of the strategy (source) that produced it; the
//! [`Coalescer`] selects a winner per template field using the strategies' priorities,
//! tie-break flags, visibility lists and the empty-value policy.
//!
//! # Usage
//!
//! ```rust
//! use coalesce::prelude::*;
//! use coalesce_config::shared::{MergePolicyConfig, StrategyRuleConfig};
//!
//! let config = MergePolicyConfig {
//!     strategies: [
//!         ("a".to_string(), StrategyRuleConfig { priority: 1, ..Default::default() }),
//!         ("b".to_string(), StrategyRuleConfig { priority: 2, ..Default::default() }),
//!     ]
//!     .into_iter()
//!     .collect(),
//!     ..Default::default()
//! };
//!
//! let template = Record::from([
//!     ("title".to_string(), Value::from("")),
//!     ("genre".to_string(), Value::from("")),
//! ]);
//!
//! let coalescer = Coalescer::new(config, template);
//! let items = vec![
//!     coalescer.create_item(
//!         "a",
//!         Record::from([
//!             ("title".to_string(), Value::from("A")),
//!             ("genre".to_string(), Value::from("A")),
//!         ]),
//!     ),
//!     coalescer.create_item("b", Record::from([("title".to_string(), Value::from("B"))])),
//! ];
//!
//! coalescer.merge(&items, |merged| {
//!     let merged = merged.expect("reserved error slot is always Ok");
//!     assert_eq!(merged.get("title"), Some(&Value::from("B")));
//!     assert_eq!(merged.get("genre"), Some(&Value::from("A")));
//! });
//! ```

pub mod conversions;
pub mod error;
pub mod idgen;
mod macros;
pub mod merge;
pub mod types;

/// Commonly used types, re-exported for convenient glob imports.
pub mod prelude {
    pub use crate::error::{CoalesceError, CoalesceResult, ErrorKind};
    pub use crate::idgen::IdGenerator;
    pub use crate::merge::catalog::{StrategyCatalog, StrategyRule};
    pub use crate::merge::coalescer::Coalescer;
    pub use crate::types::{Item, Record, Value};
}

pub use crate::merge::coalescer::Coalescer;
pub use crate::types::{Item, Record, Value};
