//! Query planner (verb module)
//!
//! Transforms a `ReportSpec` into a `ReportPlan`.

mod assemble;
mod compat;

pub use assemble::{plan_report, PlannedReport};
