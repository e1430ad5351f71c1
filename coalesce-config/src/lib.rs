//! Configuration types and loading for the coalesce workspace.
//!
//! [`shared`] holds the serde representation of the merge policy document;
//! [`load`] layers configuration files and environment-variable overrides the same way
//! for every binary that embeds the engine.

pub mod environment;
pub mod load;
pub mod shared;
