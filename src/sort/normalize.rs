//! Sort column resolution

use tracing::warn;
use crate::query::{SortDirection, SortSpec};
use crate::stats::{ProjectionMode, StatDefinition, StatRegistry};

/// A sort resolved to a registry entry
#[derive(Debug, Clone)]
pub struct ResolvedSort {
    pub stat: &'static StatDefinition,
    pub direction: SortDirection,
    /// Set when the requested column was replaced by the default
    pub warning: Option<String>,
}

impl ResolvedSort {
    /// The sort as reported back to callers, keyed by output alias
    pub fn to_spec(&self) -> SortSpec {
        SortSpec::new(self.stat.sort_key, self.direction)
    }
}

/// Resolve the requested sort against the stats visible in `mode`
///
/// Never fails: a missing column uses the mode's default, and a column that
/// is unknown or not visible in `mode` falls back to the default with a
/// warning. A valid column keeps the requested direction; the default
/// column always sorts descending.
pub fn normalize_sort(sort: Option<&SortSpec>, registry: &StatRegistry, mode: ProjectionMode) -> ResolvedSort {
    let default = registry.default_sort(mode);
    let Some(sort) = sort else {
        return ResolvedSort {
            stat: default,
            direction: SortDirection::Desc,
            warning: None,
        };
    };

    match registry.lookup(&sort.column) {
        Some(stat) if mode.includes(stat.source) => ResolvedSort {
            stat,
            direction: sort.direction,
            warning: None,
        },
        found => {
            let reason = match found {
                Some(stat) => format!("{} is not available in {} mode", stat.abbreviation, mode),
                None => format!("unknown sort column '{}'", sort.column),
            };
            let message = format!("{}; sorting by {}", reason, default.abbreviation);
            warn!("{}", message);
            ResolvedSort {
                stat: default,
                direction: SortDirection::Desc,
                warning: Some(message),
            }
        }
    }
}
