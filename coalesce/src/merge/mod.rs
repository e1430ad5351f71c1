//! The coalescing merge engine.
//!
//! Structured precedence computation over a set of tagged partial records: the
//! [`coalescer::Coalescer`] selects, for every template field, the winning candidate
//! value using priority, tie-break, visibility and emptiness rules from the
//! [`catalog::StrategyCatalog`].

pub mod catalog;
pub mod coalescer;
pub mod emptiness;
pub mod path;
