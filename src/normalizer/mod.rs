//! Value normalizer (verb module)
//!
//! Converts between user-facing values and stored values (percentage to
//! fraction and back) and checks values against a stat's domain.

mod error;
mod value;

pub use error::NormalizeError;
pub use value::{display_value, round_to_tenth, to_display, to_storage, validate};
