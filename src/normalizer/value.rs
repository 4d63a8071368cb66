//! Conversions between user-facing and stored stat values

use serde_json::Value;
use crate::plan::ParamValue;
use crate::stats::{StatDefinition, ValueDomain};
use super::error::NormalizeError;

/// Check a user-facing value against the stat's domain
///
/// Percentages must lie in `0..=100`; numbers must be non-negative unless the
/// domain allows negatives; text must be non-empty after trimming.
pub fn validate(value: &Value, def: &StatDefinition) -> Result<(), NormalizeError> {
    match def.domain {
        ValueDomain::String => {
            if text(value).is_empty() {
                return Err(NormalizeError::Empty {
                    stat: def.abbreviation.to_string(),
                });
            }
        }
        ValueDomain::Percentage => {
            let number = number(value, def)?;
            if !(0.0..=100.0).contains(&number) {
                return Err(out_of_range(value, def, "percentages run from 0 to 100"));
            }
        }
        ValueDomain::Numeric { allow_negative } => {
            let number = number(value, def)?;
            if !allow_negative && number < 0.0 {
                return Err(out_of_range(value, def, "must not be negative"));
            }
        }
    }
    Ok(())
}

/// Convert a user-facing value into the value stored (and bound) for the stat
///
/// Percentages are divided by 100. Integral numbers stay integers so they bind
/// as such; everything else numeric becomes a float. Text is trimmed.
pub fn to_storage(value: &Value, def: &StatDefinition) -> Result<ParamValue, NormalizeError> {
    match def.domain {
        ValueDomain::String => Ok(ParamValue::Text(text(value))),
        ValueDomain::Percentage => Ok(ParamValue::Float(number(value, def)? / 100.0)),
        ValueDomain::Numeric { .. } => {
            if let Some(int) = integer(value) {
                return Ok(ParamValue::Int(int));
            }
            Ok(ParamValue::Float(number(value, def)?))
        }
    }
}

/// Round a percentage to one decimal, halves away from zero
///
/// The value is first snapped to six decimals so that the error picked up by
/// dividing by 100 for storage and multiplying back does not move a half.
pub fn round_to_tenth(value: f64) -> f64 {
    let snapped = (value * 1e6).round() / 1e6;
    (snapped * 10.0).round() / 10.0
}

/// Render a stored number the way reports show it
///
/// Percentages are scaled back to 0-100, rounded with [`round_to_tenth`] and
/// printed with a trailing `%`; whole numbers print without decimals.
pub fn to_display(stored: f64, def: &StatDefinition) -> String {
    match def.domain {
        ValueDomain::Percentage => format!("{:.1}%", round_to_tenth(stored * 100.0)),
        ValueDomain::Numeric { .. } | ValueDomain::String => {
            if stored.fract() == 0.0 {
                format!("{:.0}", stored)
            } else if stored.abs() < 1.0 {
                format!("{:.3}", stored)
            } else {
                format!("{:.1}", stored)
            }
        }
    }
}

/// Display form of one value from a result row
///
/// Stores commonly hand back decimals as strings, so numeric text is parsed
/// before formatting. Nulls stay null.
pub fn display_value(stored: &Value, def: &StatDefinition) -> Value {
    match (stored, def.domain) {
        (Value::Null, _) => Value::Null,
        (_, ValueDomain::String) => Value::String(text(stored)),
        (Value::Number(n), _) => match n.as_f64() {
            Some(number) => Value::String(to_display(number, def)),
            None => stored.clone(),
        },
        (Value::String(s), _) => match s.trim().parse::<f64>() {
            Ok(number) if number.is_finite() => Value::String(to_display(number, def)),
            _ => stored.clone(),
        },
        _ => stored.clone(),
    }
}

fn text(value: &Value) -> String {
    match value {
        Value::String(s) => s.trim().to_string(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

fn integer(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn number(value: &Value, def: &StatDefinition) -> Result<f64, NormalizeError> {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().trim_end_matches('%').trim_end().parse::<f64>().ok(),
        _ => None,
    };
    parsed.filter(|n| n.is_finite()).ok_or_else(|| NormalizeError::NotANumber {
        stat: def.abbreviation.to_string(),
        value: value.to_string(),
    })
}

fn out_of_range(value: &Value, def: &StatDefinition, reason: &'static str) -> NormalizeError {
    NormalizeError::OutOfRange {
        stat: def.abbreviation.to_string(),
        value: value.to_string(),
        reason,
    }
}
