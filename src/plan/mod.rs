//! Report plan types (noun module)
//!
//! Represents an assembled report query: the scope relation, joins,
//! grouping, post-aggregation predicates and ordering.

mod expr;
mod node;
mod params;

pub use expr::{AggregateExpr, Column, ComparisonOp, Placeholder, Predicate};
pub use node::{
    BaseRelation, Join, JoinType, Projection, ReportPlan, ScopeRelation, ScopeWindow, SeasonBound, SortKey,
    TableRef,
    SCOPE_ALIAS, SCOPE_RELATION,
};
pub use params::{ParamCursor, ParamValue};
