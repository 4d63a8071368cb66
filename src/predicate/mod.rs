//! Predicate translator (verb module)
//!
//! Turns filters into a conjunction over aggregate expressions, applied after
//! grouping. `Predicate` can only hold an `AggregateExpr`, so a raw per-game
//! column cannot end up in the conjunction.

mod translate;

pub use translate::{translate_filters, PredicateSet};
