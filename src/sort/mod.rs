//! Sort normalizer (verb module)
//!
//! Resolves a requested ordering to a registry stat, degrading to a fixed
//! per-kind, per-mode default instead of failing.

mod normalize;

pub use normalize::{normalize_sort, ResolvedSort};
