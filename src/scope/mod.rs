//! Scope resolver (verb module)
//!
//! Turns a validated `ScopeSpec` into the relation of in-scope
//! (entity_id, game_id) pairs. Only regular-season games are ever in scope.

mod memory;
mod resolve;

pub use memory::{evaluate_scope, GameLogEntry};
pub use resolve::{entity_column, resolve_scope};
