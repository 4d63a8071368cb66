//! Report compilation entry points
//!
//! Ties the verb modules together: request resolution, planning and SQL
//! emission. Compilation is pure; each call owns its own parameter cursor.

use serde::Serialize;
use tracing::debug;
use crate::config::CompilerConfig;
use crate::emitter::{emit_count, emit_report};
use crate::error::CompileError;
use crate::plan::ParamValue;
use crate::planner::plan_report;
use crate::query::{ReportRequest, ReportSpec, SortSpec};
use crate::resolver::resolve_request;
use crate::stats::ProjectionMode;

/// Query text with its bind values
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompiledQuery {
    #[serde(rename = "queryText")]
    pub text: String,
    /// Values for `$1..$n`, in order
    pub params: Vec<ParamValue>,
    /// The next unused placeholder index
    #[serde(skip)]
    pub param_cursor: usize,
}

impl CompiledQuery {
    fn new(text: String, params: Vec<ParamValue>) -> Self {
        let param_cursor = params.len() + 1;
        Self {
            text,
            params,
            param_cursor,
        }
    }
}

/// A compiled report and its count variant
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompiledReport {
    #[serde(flatten)]
    pub query: CompiledQuery,
    pub resolved_mode: ProjectionMode,
    pub resolved_sort: SortSpec,
    pub scope_description: String,
    pub warnings: Vec<String>,
    /// Counts the rows the report would return without limit and offset
    pub count: CompiledQuery,
}

/// Compile a typed report spec
pub fn compile_report(spec: &ReportSpec, config: &CompilerConfig) -> Result<CompiledReport, CompileError> {
    let planned = plan_report(spec, config)?;
    let query = CompiledQuery::new(emit_report(&planned.plan), planned.params.clone());
    let count = CompiledQuery::new(emit_count(&planned.plan), planned.params);
    debug!(
        mode = %planned.mode,
        params = query.params.len(),
        warnings = planned.warnings.len(),
        "compiled report"
    );
    Ok(CompiledReport {
        query,
        resolved_mode: planned.mode,
        resolved_sort: planned.sort,
        scope_description: planned.scope_description,
        warnings: planned.warnings,
        count,
    })
}

/// Compile only the count variant of a report
pub fn compile_count(spec: &ReportSpec, config: &CompilerConfig) -> Result<CompiledQuery, CompileError> {
    let planned = plan_report(spec, config)?;
    Ok(CompiledQuery::new(emit_count(&planned.plan), planned.params))
}

/// Resolve and compile a wire-level request
///
/// Warnings from request resolution come first in the result.
pub fn compile_request(request: &ReportRequest, config: &CompilerConfig) -> Result<CompiledReport, CompileError> {
    let resolved = resolve_request(request)?;
    let mut report = compile_report(&resolved.spec, config)?;
    if !resolved.warnings.is_empty() {
        let mut warnings = resolved.warnings;
        warnings.append(&mut report.warnings);
        report.warnings = warnings;
    }
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::FilterSpec;
    use crate::stats::EntityKind;

    #[test]
    fn test_report_and_count_share_params() {
        let spec = ReportSpec::new(EntityKind::Individual)
            .with_filter(FilterSpec::gt("PTS", 25))
            .with_limit(10)
            .with_offset(20);
        let report = compile_report(&spec, &CompilerConfig::default()).unwrap();
        assert_eq!(report.query.params, report.count.params);
        assert_eq!(report.query.param_cursor, 2);
        assert!(report.query.text.ends_with("LIMIT 10\nOFFSET 20"));
        assert!(!report.count.text.contains("LIMIT"));
        assert!(report.count.text.contains("HAVING AVG(s.points) > $1"));
    }

    #[test]
    fn test_serialized_shape() {
        let report = compile_report(&ReportSpec::new(EntityKind::Team), &CompilerConfig::default()).unwrap();
        let json = serde_json::to_value(&report).unwrap();
        assert!(json["queryText"].as_str().unwrap().starts_with("WITH scoped_games AS ("));
        assert_eq!(json["params"], serde_json::json!([]));
        assert_eq!(json["resolvedMode"], "traditional");
        assert_eq!(json["resolvedSort"], serde_json::json!({"column": "w", "direction": "desc"}));
        assert_eq!(json["scopeDescription"], "All regular-season games");
        assert!(json["count"]["queryText"].is_string());
        assert!(json.get("paramCursor").is_none());
    }

    #[test]
    fn test_request_warnings_come_first() {
        let request: ReportRequest = serde_json::from_str(
            r#"{"entityKind": "team", "sort": {"column": "dunks", "direction": "up"}}"#,
        )
        .unwrap();
        let report = compile_request(&request, &CompilerConfig::default()).unwrap();
        assert_eq!(report.warnings.len(), 2);
        assert!(report.warnings[0].contains("unknown sort direction"));
        assert!(report.warnings[1].contains("unknown sort column"));
    }
}
