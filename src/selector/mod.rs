//! Mode selector (verb module)
//!
//! Selects the projection mode (which per-game stat tables to join) that can
//! serve a report's filters.

mod select;

pub use select::{select_mode, ModeSelection};
