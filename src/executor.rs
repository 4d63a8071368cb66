//! Execution collaborator seam
//!
//! The compiler never touches a store. A `ReportExecutor` runs compiled
//! queries and hands back rows keyed by projection alias; `run_report`
//! executes both variants and converts stored values for display.

use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::debug;
use crate::compiler::{CompiledQuery, CompiledReport};
use crate::normalizer::display_value;
use crate::query::SortSpec;
use crate::stats::{EntityKind, ProjectionMode, StatRegistry};

/// One result row, keyed by projection alias
pub type Row = Map<String, Value>;

/// Runs compiled queries against a store
pub trait ReportExecutor {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Execute `query.text` with `query.params` bound to `$1..$n`
    fn execute(&self, query: &CompiledQuery) -> Result<Vec<Row>, Self::Error>;
}

/// Errors from running a compiled report
#[derive(Debug, Error)]
pub enum ExecuteError {
    /// The store rejected or failed the query
    #[error("query execution failed: {0}")]
    Store(#[source] Box<dyn std::error::Error + Send + Sync>),
    /// The count query did not return a usable `total`
    #[error("count query returned no total")]
    MissingTotal,
}

/// One page of a report, values in display form
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportPage {
    pub rows: Vec<Row>,
    /// Matching entities across all pages
    pub total: u64,
    pub resolved_mode: ProjectionMode,
    pub resolved_sort: SortSpec,
    pub scope_description: String,
    pub warnings: Vec<String>,
}

/// Execute a compiled report and its count, converting values for display
pub fn run_report<X: ReportExecutor>(
    executor: &X,
    report: &CompiledReport,
    kind: EntityKind,
) -> Result<ReportPage, ExecuteError> {
    let rows = executor
        .execute(&report.query)
        .map_err(|e| ExecuteError::Store(Box::new(e)))?;
    let counted = executor
        .execute(&report.count)
        .map_err(|e| ExecuteError::Store(Box::new(e)))?;
    let total = counted
        .first()
        .and_then(|row| row.get("total"))
        .and_then(as_count)
        .ok_or(ExecuteError::MissingTotal)?;

    let registry = StatRegistry::for_kind(kind);
    let rows: Vec<Row> = rows.into_iter().map(|row| to_display_row(row, registry)).collect();
    debug!(rows = rows.len(), total, "executed report");

    Ok(ReportPage {
        rows,
        total,
        resolved_mode: report.resolved_mode,
        resolved_sort: report.resolved_sort.clone(),
        scope_description: report.scope_description.clone(),
        warnings: report.warnings.clone(),
    })
}

/// Convert every column that names a stat; other columns pass through
fn to_display_row(row: Row, registry: &StatRegistry) -> Row {
    row.into_iter()
        .map(|(alias, value)| {
            let shown = match registry.iter().find(|def| def.sort_key == alias) {
                Some(def) => display_value(&value, def),
                None => value,
            };
            (alias, shown)
        })
        .collect()
}

/// Counts come back as integers or, from some drivers, as numeric text
fn as_count(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::fmt;
    use crate::compiler::compile_report;
    use crate::config::CompilerConfig;
    use crate::query::{FilterSpec, ReportSpec};

    #[derive(Debug)]
    struct Offline;

    impl fmt::Display for Offline {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "store offline")
        }
    }

    impl std::error::Error for Offline {}

    /// Answers count queries with a total and everything else with `rows`
    struct Canned {
        rows: Vec<Row>,
        total: Value,
    }

    impl ReportExecutor for Canned {
        type Error = Offline;

        fn execute(&self, query: &CompiledQuery) -> Result<Vec<Row>, Offline> {
            if query.text.contains("COUNT(*) AS \"total\"") {
                let mut row = Row::new();
                row.insert("total".to_string(), self.total.clone());
                Ok(vec![row])
            } else {
                Ok(self.rows.clone())
            }
        }
    }

    struct Failing;

    impl ReportExecutor for Failing {
        type Error = Offline;

        fn execute(&self, _query: &CompiledQuery) -> Result<Vec<Row>, Offline> {
            Err(Offline)
        }
    }

    fn report() -> CompiledReport {
        let spec = ReportSpec::new(EntityKind::Individual).with_filter(FilterSpec::gt("FG%", 45));
        compile_report(&spec, &CompilerConfig::default()).unwrap()
    }

    #[test]
    fn test_rows_converted_for_display() {
        let row = json!({"player_id": 7, "name": "Nikola Jokic", "fg_pct": 0.583, "pts": "26.4", "gp": 79});
        let executor = Canned {
            rows: vec![row.as_object().unwrap().clone()],
            total: json!("1"),
        };
        let page = run_report(&executor, &report(), EntityKind::Individual).unwrap();
        assert_eq!(page.total, 1);
        let row = &page.rows[0];
        assert_eq!(row["fg_pct"], json!("58.3%"));
        assert_eq!(row["pts"], json!("26.4"));
        assert_eq!(row["gp"], json!("79"));
        assert_eq!(row["name"], json!("Nikola Jokic"));
        assert_eq!(row["player_id"], json!("7"));
    }

    #[test]
    fn test_store_failure_is_reported() {
        let err = run_report(&Failing, &report(), EntityKind::Individual).unwrap_err();
        assert!(matches!(err, ExecuteError::Store(_)));
        assert_eq!(err.to_string(), "query execution failed: store offline");
    }

    #[test]
    fn test_missing_total() {
        let executor = Canned {
            rows: Vec::new(),
            total: Value::Null,
        };
        let err = run_report(&executor, &report(), EntityKind::Individual).unwrap_err();
        assert!(matches!(err, ExecuteError::MissingTotal));
    }
}
