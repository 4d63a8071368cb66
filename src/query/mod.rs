//! Report request types (noun module)
//!
//! `ReportRequest` is the loosely-typed wire form; `ReportSpec` is the typed
//! form the compiler consumes.

mod request;
mod spec;

pub use request::{DataFilter, ReportRequest, ScopeRequest, SortRequest};
pub use spec::{
    FilterOperator, FilterSpec, GameSide, PeriodUnit, ReportSpec, ScopeSpec, SortDirection, SortSpec,
    SEASON_GAMES,
};
