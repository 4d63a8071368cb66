//! Bind parameters and the placeholder cursor

use chrono::NaiveDate;
use serde::Serialize;
use std::fmt;
use super::expr::Placeholder;

/// A value bound to a placeholder
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ParamValue {
    Int(i64),
    Float(f64),
    Text(String),
    Date(NaiveDate),
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Int(i) => write!(f, "{}", i),
            ParamValue::Float(v) => write!(f, "{}", v),
            ParamValue::Text(s) => write!(f, "'{}'", s),
            ParamValue::Date(d) => write!(f, "{}", d),
        }
    }
}

/// Hands out placeholders in increasing order and records their values.
///
/// Local to one compilation; the placeholder index equals the 1-based
/// position of its value in the final parameter list when the cursor starts
/// at 1.
#[derive(Debug, Clone)]
pub struct ParamCursor {
    start: usize,
    params: Vec<ParamValue>,
}

impl Default for ParamCursor {
    fn default() -> Self {
        Self::new()
    }
}

impl ParamCursor {
    pub fn new() -> Self {
        Self::starting_at(1)
    }

    /// Continue numbering from `start` (values pushed earlier elsewhere own `1..start`)
    pub fn starting_at(start: usize) -> Self {
        Self {
            start: start.max(1),
            params: Vec::new(),
        }
    }

    /// Record a value and return the placeholder that refers to it
    pub fn push(&mut self, value: ParamValue) -> Placeholder {
        let placeholder = Placeholder::new(self.next_index());
        self.params.push(value);
        placeholder
    }

    /// The index the next pushed value will receive
    pub fn next_index(&self) -> usize {
        self.start + self.params.len()
    }

    pub fn len(&self) -> usize {
        self.params.len()
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    pub fn params(&self) -> &[ParamValue] {
        &self.params
    }

    pub fn into_params(self) -> Vec<ParamValue> {
        self.params
    }
}
