//! statreport - Compile sports-statistics report requests to parameterized SQL
//!
//! This library provides:
//! - Stat registries for individuals and teams (columns, aggregates, domains)
//! - Request resolution from loosely-typed JSON
//! - Value normalization (percentage to fraction and back)
//! - Scope resolution (last N games, game ranges, home/away, date windows)
//! - Post-aggregation predicate translation
//! - Projection mode selection and sort normalization
//! - SQL emission of the report query and its count variant
//!
//! # Architecture
//!
//! **Noun modules** (data structures):
//! - `stats/` - stat registries (StatDefinition, StatRegistry, IndividualStat, TeamStat)
//! - `query/` - request types (ReportRequest, ReportSpec, ScopeSpec, FilterSpec)
//! - `plan/` - report plan types (ReportPlan, Predicate, AggregateExpr, ParamCursor)
//! - `config/` - compiler configuration (CompilerConfig, TableNames)
//!
//! **Verb modules** (transformations):
//! - `parser/` - YAML → CompilerConfig
//! - `resolver/` - ReportRequest → ReportSpec
//! - `normalizer/` - user values ⇄ stored values
//! - `scope/` - ScopeSpec → ScopeRelation
//! - `predicate/` - FilterSpec list → post-aggregation predicates
//! - `selector/` - filter stats → ProjectionMode
//! - `sort/` - SortSpec → resolved sort
//! - `planner/` - ReportSpec → ReportPlan
//! - `emitter/` - ReportPlan → SQL
//!
//! # Example
//!
//! ```ignore
//! use statreport::{compile_report, CompilerConfig, EntityKind, FilterSpec, ReportSpec};
//!
//! let spec = ReportSpec::new(EntityKind::Individual).with_filter(FilterSpec::gt("PTS", 25));
//! let report = compile_report(&spec, &CompilerConfig::default())?;
//! // report.query.text: WITH scoped_games AS (...) SELECT ... HAVING AVG(s.points) > $1 ...
//! // report.query.params: [25]
//! ```

pub mod stats;
pub mod query;
pub mod plan;
pub mod config;
pub mod parser;
pub mod resolver;
pub mod normalizer;
pub mod scope;
pub mod predicate;
pub mod selector;
pub mod sort;
pub mod planner;
pub mod emitter;
pub mod compiler;
pub mod executor;
pub mod error;

// Re-export commonly used types
pub use stats::{EntityKind, IndividualStat, ProjectionMode, StatDefinition, StatRegistry, TeamStat, ValueDomain};
pub use query::{FilterOperator, FilterSpec, ReportRequest, ReportSpec, ScopeSpec, SortDirection, SortSpec};
pub use plan::{ParamValue, ReportPlan};
pub use config::CompilerConfig;
pub use resolver::{resolve_request, ResolvedRequest};
pub use planner::{plan_report, PlannedReport};
pub use compiler::{compile_count, compile_report, compile_request, CompiledQuery, CompiledReport};
pub use executor::{run_report, ExecuteError, ReportExecutor, ReportPage, Row};
pub use error::{CompileError, ConfigError, ValidationErrors};
