//! Stat registry (noun module)
//!
//! Immutable, enum-keyed tables mapping each reportable statistic to its
//! storage column, aggregate form, value domain and category. Individuals
//! and teams own disjoint registries.

mod definition;
mod individual;
mod registry;
mod team;
mod types;

pub use definition::{normalize_key, StatDefinition, StatId};
pub use individual::IndividualStat;
pub use registry::StatRegistry;
pub use team::TeamStat;
pub use types::{Aggregation, EntityKind, ProjectionMode, StatCategory, StatSource, ValueDomain};
