//! SQL emitter (verb module)
//!
//! Transforms a `ReportPlan` into query text.

mod sql;

pub use sql::{emit_count, emit_report};
