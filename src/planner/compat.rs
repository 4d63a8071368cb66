//! Compatibility checks
//!
//! Combinations that compile to a meaningful query but may surprise the
//! caller. These produce warnings, never errors.

use chrono::NaiveDate;
use crate::predicate::PredicateSet;
use crate::query::{ReportSpec, ScopeSpec};

/// Warnings for filter/scope/season combinations
pub(crate) fn compatibility_warnings(spec: &ReportSpec, predicates: &PredicateSet) -> Vec<String> {
    let mut warnings = Vec::new();
    let scope = spec.scope();

    if scope.is_restricting() {
        for stat in predicates.stats.iter().filter(|s| s.is_identity()) {
            warnings.push(format!(
                "{} is a season-level attribute; the scope ({}) does not change it",
                stat.abbreviation,
                scope.describe()
            ));
        }
    }

    if let (Some(season), ScopeSpec::DateRange { from, to }) = (spec.season.as_deref(), scope) {
        if let Some((start, end)) = season_bounds(season) {
            if *to < start || *from > end {
                warnings.push(format!(
                    "dates {} to {} fall outside the {} season; no games will match",
                    from, to, season
                ));
            }
        }
    }

    warnings
}

/// Widest calendar span of a season label: July 1 through June 30
fn season_bounds(season: &str) -> Option<(NaiveDate, NaiveDate)> {
    let start_year: i32 = season.get(..4)?.parse().ok()?;
    let start = NaiveDate::from_ymd_opt(start_year, 7, 1)?;
    let end = NaiveDate::from_ymd_opt(start_year + 1, 6, 30)?;
    Some((start, end))
}
