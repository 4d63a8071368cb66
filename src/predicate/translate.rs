use serde_json::Value;
use tracing::{debug, warn};
use crate::error::ValidationErrors;
use crate::normalizer::{self, NormalizeError};
use crate::plan::{ComparisonOp, ParamCursor, ParamValue, Predicate};
use crate::query::{FilterOperator, FilterSpec};
use crate::stats::{StatDefinition, StatRegistry};

/// The post-aggregation conjunction for one report
#[derive(Debug, Clone, Default)]
pub struct PredicateSet {
    /// Predicates in filter order
    pub predicates: Vec<Predicate>,
    /// Stat behind each predicate, parallel to `predicates`
    pub stats: Vec<&'static StatDefinition>,
    /// Filters that were dropped or look suspicious
    pub warnings: Vec<String>,
}

impl PredicateSet {
    pub fn is_empty(&self) -> bool {
        self.predicates.is_empty()
    }

    /// The predicates joined with AND, empty when there are none
    pub fn conjunction(&self) -> String {
        self.predicates
            .iter()
            .map(|p| p.to_string())
            .collect::<Vec<_>>()
            .join(" AND ")
    }
}

/// A filter that passed checks, with its values already in storage form
enum Checked {
    Compare(ComparisonOp, ParamValue),
    Between(ParamValue, ParamValue),
    In(Vec<ParamValue>),
}

/// Translate filters into predicates over aggregate expressions
///
/// Malformed filters, unknown or unfilterable stats, empty `IN` lists and
/// values outside a stat's domain drop the filter with a warning. Values that
/// cannot be read at all, and ordering comparisons on text stats, are errors.
/// Placeholders are only allocated for filters that survive, so the numbering
/// has no gaps.
pub fn translate_filters(
    filters: &[FilterSpec],
    registry: &StatRegistry,
    cursor: &mut ParamCursor,
) -> Result<PredicateSet, ValidationErrors> {
    let mut set = PredicateSet::default();
    let mut errors = ValidationErrors::new();

    for (index, filter) in filters.iter().enumerate() {
        let label = format!("filter {} ({})", index + 1, filter.stat);

        // ReportSpec::validate reports malformed shapes as errors
        if let Err(message) = filter.validate_shape() {
            drop_filter(&mut set, format!("{}: {}; filter dropped", label, message));
            continue;
        }
        let Some(def) = registry.lookup(&filter.stat) else {
            drop_filter(&mut set, format!("{}: unknown {} stat; filter dropped", label, registry.kind()));
            continue;
        };
        if !def.filterable {
            drop_filter(&mut set, format!("{}: {} cannot be filtered; filter dropped", label, def.name));
            continue;
        }

        match check(filter, def) {
            Ok(Some(checked)) => {
                if let Checked::Between(low, high) = &checked {
                    if is_reversed(low, high) {
                        let message = format!(
                            "{}: BETWEEN bounds are reversed ({} > {}); no rows can match",
                            label, low, high
                        );
                        warn!("{}", message);
                        set.warnings.push(message);
                    }
                }
                set.predicates.push(build(def, checked, cursor));
                set.stats.push(def);
            }
            Ok(None) => {
                drop_filter(&mut set, format!("{}: IN with no values; filter dropped", label));
            }
            Err(Rejection::Error(message)) => errors.push(format!("{}: {}", label, message)),
            Err(Rejection::Drop(message)) => {
                drop_filter(&mut set, format!("{}: {}; filter dropped", label, message));
            }
        }
    }

    errors.into_result()?;
    debug!(predicates = set.predicates.len(), dropped = set.warnings.len(), "translated filters");
    Ok(set)
}

enum Rejection {
    Error(String),
    Drop(String),
}

impl From<NormalizeError> for Rejection {
    fn from(err: NormalizeError) -> Self {
        if err.is_malformed() {
            Rejection::Error(err.to_string())
        } else {
            Rejection::Drop(err.to_string())
        }
    }
}

/// Validate and convert a filter's values; `Ok(None)` means nothing to apply
fn check(filter: &FilterSpec, def: &StatDefinition) -> Result<Option<Checked>, Rejection> {
    let ordered = matches!(
        filter.operator,
        FilterOperator::Gt | FilterOperator::Lt | FilterOperator::Between
    );
    if ordered && def.domain.is_string() {
        return Err(Rejection::Error(format!(
            "{} is not supported for text stat {}",
            filter.operator.as_str(),
            def.abbreviation
        )));
    }

    let checked = match filter.operator {
        FilterOperator::Gt | FilterOperator::Lt | FilterOperator::Eq => {
            let op = match filter.operator {
                FilterOperator::Gt => ComparisonOp::Gt,
                FilterOperator::Lt => ComparisonOp::Lt,
                _ => ComparisonOp::Eq,
            };
            Checked::Compare(op, storage(required(&filter.value, "value")?, def)?)
        }
        FilterOperator::Between => Checked::Between(
            storage(required(&filter.value, "value")?, def)?,
            storage(required(&filter.value2, "value2")?, def)?,
        ),
        FilterOperator::In => {
            let values = filter.values.as_deref().unwrap_or_default();
            if values.is_empty() {
                return Ok(None);
            }
            let stored = values
                .iter()
                .map(|v| storage(v, def))
                .collect::<Result<Vec<_>, _>>()?;
            Checked::In(stored)
        }
    };
    Ok(Some(checked))
}

fn required<'a>(value: &'a Option<Value>, field: &str) -> Result<&'a Value, Rejection> {
    value
        .as_ref()
        .filter(|v| !v.is_null())
        .ok_or_else(|| Rejection::Error(format!("missing {}", field)))
}

fn storage(value: &Value, def: &StatDefinition) -> Result<ParamValue, Rejection> {
    normalizer::validate(value, def)?;
    Ok(normalizer::to_storage(value, def)?)
}

fn build(def: &StatDefinition, checked: Checked, cursor: &mut ParamCursor) -> Predicate {
    let expr = def.aggregate_expr();
    match checked {
        Checked::Compare(op, value) => Predicate::Compare {
            expr,
            op,
            param: cursor.push(value),
        },
        Checked::Between(low, high) => {
            let low = cursor.push(low);
            let high = cursor.push(high);
            Predicate::Between { expr, low, high }
        }
        Checked::In(values) => Predicate::In {
            expr,
            params: values.into_iter().map(|v| cursor.push(v)).collect(),
        },
    }
}

fn is_reversed(low: &ParamValue, high: &ParamValue) -> bool {
    match (as_f64(low), as_f64(high)) {
        (Some(low), Some(high)) => low > high,
        _ => false,
    }
}

fn as_f64(value: &ParamValue) -> Option<f64> {
    match value {
        ParamValue::Int(i) => Some(*i as f64),
        ParamValue::Float(f) => Some(*f),
        ParamValue::Text(_) | ParamValue::Date(_) => None,
    }
}

fn drop_filter(set: &mut PredicateSet, message: String) {
    warn!("{}", message);
    set.warnings.push(message);
}
