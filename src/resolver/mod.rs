//! Request resolver (verb module)
//!
//! Transforms a wire-level `ReportRequest` into a typed `ReportSpec`.

mod resolve;

pub use resolve::{resolve_request, ResolvedRequest};
