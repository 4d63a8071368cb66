//! Projection mode selection
//!
//! Picks the per-game tables a report joins from the stats its filters use:
//! - Base stats only: traditional
//! - Derived-rate stats only: advanced
//! - Both: unified (both tables joined)
//!
//! Identity stats live on the entity tables and need neither.

use tracing::{debug, warn};
use crate::stats::{ProjectionMode, StatDefinition, StatSource};

/// Result of mode selection
#[derive(Debug, Clone, PartialEq)]
pub struct ModeSelection {
    pub mode: ProjectionMode,
    /// Set when an explicitly requested mode had to be widened
    pub warning: Option<String>,
}

/// Select the projection mode for a filter set
///
/// A requested mode is honored when it can serve every filter. When it
/// cannot, the smallest mode that can is used and a warning is recorded.
/// Without filters on per-game stats the requested mode (or traditional)
/// is used as is.
pub fn select_mode(filter_stats: &[&StatDefinition], requested: Option<ProjectionMode>) -> ModeSelection {
    let needs_base = filter_stats.iter().any(|s| s.source == StatSource::Traditional);
    let needs_derived = filter_stats.iter().any(|s| s.source == StatSource::Advanced);

    let required = match (needs_base, needs_derived) {
        (true, true) => Some(ProjectionMode::Unified),
        (true, false) => Some(ProjectionMode::Traditional),
        (false, true) => Some(ProjectionMode::Advanced),
        (false, false) => None,
    };

    let selection = match (requested, required) {
        (Some(mode), None) => ModeSelection { mode, warning: None },
        (None, None) => ModeSelection {
            mode: ProjectionMode::Traditional,
            warning: None,
        },
        (None, Some(mode)) => ModeSelection { mode, warning: None },
        (Some(mode), Some(required)) => {
            let serves = required.stat_sources().iter().all(|source| mode.includes(*source));
            if serves {
                ModeSelection { mode, warning: None }
            } else {
                let message = format!(
                    "{} mode cannot serve the requested filters; using {} mode",
                    mode, ProjectionMode::Unified
                );
                warn!("{}", message);
                ModeSelection {
                    mode: ProjectionMode::Unified,
                    warning: Some(message),
                }
            }
        }
    };

    debug!(mode = %selection.mode, base = needs_base, derived = needs_derived, "selected projection mode");
    selection
}
