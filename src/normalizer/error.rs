//! Normalizer error types

use thiserror::Error;

/// Reasons a user-supplied value cannot be used for a stat
#[derive(Debug, Clone, PartialEq, Error)]
pub enum NormalizeError {
    /// The value is not a number where the stat needs one
    #[error("{stat}: expected a number, got {value}")]
    NotANumber { stat: String, value: String },
    /// A number outside the stat's domain
    #[error("{stat}: {value} is out of range ({reason})")]
    OutOfRange {
        stat: String,
        value: String,
        reason: &'static str,
    },
    /// Text that is empty after trimming
    #[error("{stat}: value must not be empty")]
    Empty { stat: String },
}

impl NormalizeError {
    /// Whether the value could not be read at all, as opposed to being read
    /// and found outside the stat's domain
    pub fn is_malformed(&self) -> bool {
        matches!(self, NormalizeError::NotANumber { .. })
    }
}
