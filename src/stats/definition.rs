//! Stat definitions

use crate::plan::{AggregateExpr, Column};
use super::individual::IndividualStat;
use super::team::TeamStat;
use super::types::{Aggregation, EntityKind, StatCategory, StatSource, ValueDomain};

/// Typed key of a registry entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatId {
    Individual(IndividualStat),
    Team(TeamStat),
}

impl StatId {
    pub fn entity_kind(&self) -> EntityKind {
        match self {
            StatId::Individual(_) => EntityKind::Individual,
            StatId::Team(_) => EntityKind::Team,
        }
    }

    pub fn definition(&self) -> &'static StatDefinition {
        match self {
            StatId::Individual(stat) => stat.definition(),
            StatId::Team(stat) => stat.definition(),
        }
    }
}

/// One reportable statistic.
///
/// Definitions live in static tables and are never mutated.
#[derive(Debug, Clone, PartialEq)]
pub struct StatDefinition {
    pub id: StatId,
    /// Display name, e.g. "Field Goal %"
    pub name: &'static str,
    /// Column-header abbreviation, e.g. "FG%"
    pub abbreviation: &'static str,
    pub category: StatCategory,
    pub domain: ValueDomain,
    pub source: StatSource,
    /// Storage column on `source`
    pub column: &'static str,
    pub aggregation: Aggregation,
    pub filterable: bool,
    /// Output alias of the projected value; also accepted as a sort column
    pub sort_key: &'static str,
}

impl StatDefinition {
    /// The value this stat takes for one grouped entity
    pub fn aggregate_expr(&self) -> AggregateExpr {
        let col = format!("{}.{}", self.source.alias(), self.column);
        let alias = self.source.alias();
        let sql = match self.aggregation {
            Aggregation::Key => col,
            Aggregation::Avg => format!("AVG({})", col),
            Aggregation::Count => format!("COUNT({})", col),
            Aggregation::CountTrue => format!("SUM(CASE WHEN {} THEN 1 ELSE 0 END)", col),
            Aggregation::CountFalse => format!("SUM(CASE WHEN {} THEN 0 ELSE 1 END)", col),
            Aggregation::ShareTrue => format!("AVG(CASE WHEN {} THEN 1.0 ELSE 0.0 END)", col),
            Aggregation::Ratio { made, attempted } => format!(
                "CAST(SUM({alias}.{made}) AS DOUBLE PRECISION) / NULLIF(SUM({alias}.{attempted}), 0)"
            ),
        };
        AggregateExpr::new(sql)
    }

    /// Grouping column for identity stats
    pub fn group_column(&self) -> Option<Column> {
        match self.aggregation {
            Aggregation::Key => Some(Column::new(self.source.alias(), self.column)),
            _ => None,
        }
    }

    pub fn is_identity(&self) -> bool {
        self.category == StatCategory::Identity
    }

    /// Whether the stat is read from a per-game statistic table
    pub fn is_per_game(&self) -> bool {
        matches!(self.source, StatSource::Traditional | StatSource::Advanced)
    }

    /// Whether `key` (already normalized) names this stat
    pub fn matches_key(&self, key: &str) -> bool {
        [self.name, self.abbreviation, self.sort_key]
            .into_iter()
            .chain(self.column_alias())
            .any(|alias| normalize_key(alias) == key)
    }

    /// The storage column, when it names the stat itself.
    ///
    /// Counted stats (games, wins, starts) read a column that is shared or
    /// unrelated to their name, so it is not accepted as an alias.
    fn column_alias(&self) -> Option<&'static str> {
        match self.aggregation {
            Aggregation::Key | Aggregation::Avg | Aggregation::Ratio { .. } => Some(self.column),
            _ => None,
        }
    }
}

/// Fold a user-supplied stat name into a canonical lookup key.
///
/// Case, whitespace and separators are ignored; `%`, `percent` and
/// `percentage` all become `pct`; `+/-` becomes `plusminus`.
pub fn normalize_key(name: &str) -> String {
    let lowered = name
        .trim()
        .to_lowercase()
        .replace("+/-", "plusminus")
        .replace('%', "pct")
        .replace("percentage", "pct")
        .replace("percent", "pct");
    lowered.chars().filter(|c| c.is_ascii_alphanumeric()).collect()
}

pub(crate) const COUNT: ValueDomain = ValueDomain::Numeric { allow_negative: false };
pub(crate) const SIGNED: ValueDomain = ValueDomain::Numeric { allow_negative: true };
pub(crate) const PCT: ValueDomain = ValueDomain::Percentage;
pub(crate) const TEXT: ValueDomain = ValueDomain::String;

/// Grouping attribute of the entity
pub(crate) const fn identity(
    id: StatId,
    name: &'static str,
    abbreviation: &'static str,
    source: StatSource,
    column: &'static str,
    domain: ValueDomain,
    filterable: bool,
    sort_key: &'static str,
) -> StatDefinition {
    StatDefinition {
        id,
        name,
        abbreviation,
        category: StatCategory::Identity,
        domain,
        source,
        column,
        aggregation: Aggregation::Key,
        filterable,
        sort_key,
    }
}

/// Box-score stat from the traditional table
pub(crate) const fn base(
    id: StatId,
    name: &'static str,
    abbreviation: &'static str,
    column: &'static str,
    aggregation: Aggregation,
    domain: ValueDomain,
    sort_key: &'static str,
) -> StatDefinition {
    StatDefinition {
        id,
        name,
        abbreviation,
        category: StatCategory::BaseStat,
        domain,
        source: StatSource::Traditional,
        column,
        aggregation,
        filterable: true,
        sort_key,
    }
}

/// Per-game average of an advanced-table column
pub(crate) const fn derived(
    id: StatId,
    name: &'static str,
    abbreviation: &'static str,
    column: &'static str,
    domain: ValueDomain,
    sort_key: &'static str,
) -> StatDefinition {
    StatDefinition {
        id,
        name,
        abbreviation,
        category: StatCategory::DerivedStat,
        domain,
        source: StatSource::Advanced,
        column,
        aggregation: Aggregation::Avg,
        filterable: true,
        sort_key,
    }
}

/// Attempt-weighted shooting percentage
pub(crate) const fn shooting(
    id: StatId,
    name: &'static str,
    abbreviation: &'static str,
    column: &'static str,
    made: &'static str,
    attempted: &'static str,
    sort_key: &'static str,
) -> StatDefinition {
    base(id, name, abbreviation, column, Aggregation::Ratio { made, attempted }, PCT, sort_key)
}
