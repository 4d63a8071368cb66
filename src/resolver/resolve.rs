use chrono::NaiveDate;
use serde_json::Value;
use tracing::debug;
use crate::error::ValidationErrors;
use crate::query::{
    DataFilter, FilterOperator, FilterSpec, PeriodUnit, ReportRequest, ReportSpec, ScopeRequest, ScopeSpec,
    SortDirection, SortRequest, SortSpec, SEASON_GAMES,
};
use crate::stats::{EntityKind, ProjectionMode};

/// A typed request plus the non-fatal notes gathered while reading it
#[derive(Debug, Clone)]
pub struct ResolvedRequest {
    pub spec: ReportSpec,
    pub warnings: Vec<String>,
}

/// Resolve a wire-level report request into a typed `ReportSpec`
///
/// This turns strings (entity kind, operators, scope type, dates, mode)
/// into typed values. Every violation is collected, so the caller can
/// report all problems at once. Unrecognized sort directions are not
/// errors; they fall back to descending with a warning.
pub fn resolve_request(request: &ReportRequest) -> Result<ResolvedRequest, ValidationErrors> {
    let mut errors = ValidationErrors::new();
    let mut warnings = Vec::new();

    // 1. Entity kind
    let entity_kind = match request.entity_kind.parse::<EntityKind>() {
        Ok(kind) => Some(kind),
        Err(message) => {
            errors.push(message);
            None
        }
    };

    // 2. Scope
    let scope = match request.scope.as_ref() {
        Some(raw) => match resolve_scope(raw) {
            Ok(scope) => Some(scope),
            Err(scope_errors) => {
                errors.extend(scope_errors);
                None
            }
        },
        None => None,
    };

    // 3. Filters, numbered by their position in the request
    let filters: Vec<FilterSpec> = request
        .filters
        .iter()
        .enumerate()
        .filter_map(|(index, raw)| {
            match resolve_filter(raw).and_then(|filter| filter.validate_shape().map(|_| filter)) {
                Ok(filter) => Some(filter),
                Err(message) => {
                    errors.push(format!("filter {} ({}): {}", index + 1, raw.stat, message));
                    None
                }
            }
        })
        .collect();

    // 4. Sort (fail-soft)
    let sort = request.sort.as_ref().map(|raw| resolve_sort(raw, &mut warnings));

    // 5. Projection mode
    let mode = match request.mode.as_deref() {
        Some(raw) => match raw.parse::<ProjectionMode>() {
            Ok(mode) => Some(mode),
            Err(message) => {
                errors.push(message);
                None
            }
        },
        None => None,
    };

    let Some(entity_kind) = entity_kind else {
        return Err(errors);
    };

    let spec = ReportSpec {
        entity_kind,
        filters,
        scope,
        sort,
        limit: request.limit,
        offset: request.offset,
        mode,
        season: request.season.clone(),
    };

    // 6. Range checks on the typed form
    if let Err(spec_errors) = spec.validate_settings() {
        errors.extend(spec_errors);
    }

    errors.into_result()?;
    debug!(entity = %spec.entity_kind, filters = spec.filters.len(), "resolved report request");
    Ok(ResolvedRequest { spec, warnings })
}

fn resolve_filter(raw: &DataFilter) -> Result<FilterSpec, String> {
    let operator = raw.operator.parse::<FilterOperator>()?;
    Ok(FilterSpec {
        stat: raw.stat.clone(),
        operator,
        value: raw.value.clone(),
        value2: raw.value2.clone(),
        values: raw.values.clone(),
    })
}

fn resolve_sort(raw: &SortRequest, warnings: &mut Vec<String>) -> SortSpec {
    let direction = match raw.direction.as_deref() {
        None => SortDirection::Desc,
        Some(text) => text.parse().unwrap_or_else(|message: String| {
            warnings.push(format!("{}; sorting descending", message));
            SortDirection::Desc
        }),
    };
    SortSpec::new(raw.column.clone(), direction)
}

/// Resolve a scope request; range invariants are checked later on the typed form
fn resolve_scope(raw: &ScopeRequest) -> Result<ScopeSpec, ValidationErrors> {
    let mut errors = ValidationErrors::new();
    let kind: String = raw
        .kind
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .collect::<String>()
        .to_lowercase();

    let scope = match kind.as_str() {
        "all" | "allgames" | "season" => Some(ScopeSpec::AllGames),
        "lastn" | "lastgames" => {
            let n = ordinal(&mut errors, "lastN", "n", raw.n.as_ref(), 1, SEASON_GAMES);
            n.map(|n| ScopeSpec::LastN { n })
        }
        "gamerange" => {
            let from = ordinal(&mut errors, "gameRange", "from", raw.from.as_ref(), 1, SEASON_GAMES);
            let to = ordinal(&mut errors, "gameRange", "to", raw.to.as_ref(), 1, SEASON_GAMES);
            match (from, to) {
                (Some(from), Some(to)) => Some(ScopeSpec::GameRange { from, to }),
                _ => None,
            }
        }
        "homeaway" | "location" => match raw.side.as_deref() {
            Some(side) => match side.parse() {
                Ok(side) => Some(ScopeSpec::HomeAway { side }),
                Err(message) => {
                    errors.push(format!("scope homeAway: {}", message));
                    None
                }
            },
            None => {
                errors.push("scope homeAway: side is required");
                None
            }
        },
        "lastperiod" => {
            let unit = match raw.unit.as_deref() {
                Some(unit) => match unit.parse::<PeriodUnit>() {
                    Ok(unit) => Some(unit),
                    Err(message) => {
                        errors.push(format!("scope lastPeriod: {}", message));
                        None
                    }
                },
                None => {
                    errors.push("scope lastPeriod: unit is required");
                    None
                }
            };
            let max = unit.map(|u| u.max_count()).unwrap_or(u32::MAX);
            let n = ordinal(&mut errors, "lastPeriod", "n", raw.n.as_ref(), 1, max);
            match (unit, n) {
                (Some(unit), Some(n)) => Some(ScopeSpec::LastPeriod { unit, n }),
                _ => None,
            }
        }
        "daterange" => {
            let from = date(&mut errors, "from", raw.from.as_ref());
            let to = date(&mut errors, "to", raw.to.as_ref());
            match (from, to) {
                (Some(from), Some(to)) => Some(ScopeSpec::DateRange { from, to }),
                _ => None,
            }
        }
        _ => {
            errors.push(format!("unknown scope type '{}'", raw.kind));
            None
        }
    };

    match scope {
        Some(scope) if errors.is_empty() => Ok(scope),
        _ => Err(errors),
    }
}

/// Read an integer field, reporting missing, non-integer and out-of-range values
fn ordinal(
    errors: &mut ValidationErrors,
    scope: &str,
    field: &str,
    value: Option<&Value>,
    min: u32,
    max: u32,
) -> Option<u32> {
    let Some(value) = value.filter(|v| !v.is_null()) else {
        errors.push(format!("scope {}: {} is required", scope, field));
        return None;
    };
    let parsed = match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    };
    let Some(number) = parsed else {
        errors.push(format!("scope {}: {} must be an integer, got {}", scope, field, value));
        return None;
    };
    if number < i64::from(min) || number > i64::from(max) {
        errors.push(format!("scope {}: {} must be between {} and {}, got {}", scope, field, min, max, number));
        return None;
    }
    u32::try_from(number).ok()
}

fn date(errors: &mut ValidationErrors, field: &str, value: Option<&Value>) -> Option<NaiveDate> {
    let text = match value {
        Some(Value::String(s)) => s.trim(),
        Some(Value::Null) | None => {
            errors.push(format!("scope dateRange: {} is required", field));
            return None;
        }
        Some(other) => {
            errors.push(format!("scope dateRange: {} must be a YYYY-MM-DD string, got {}", field, other));
            return None;
        }
    };
    match NaiveDate::parse_from_str(text, "%Y-%m-%d") {
        Ok(date) => Some(date),
        Err(_) => {
            errors.push(format!("scope dateRange: cannot parse {} date '{}'", field, text));
            None
        }
    }
}
