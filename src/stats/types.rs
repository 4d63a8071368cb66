//! Enumerations shared by the stat registries

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The kind of entity a report ranks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    /// A single player
    Individual,
    /// A franchise
    Team,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityKind::Individual => write!(f, "individual"),
            EntityKind::Team => write!(f, "team"),
        }
    }
}

impl FromStr for EntityKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "individual" | "individuals" | "player" | "players" => Ok(EntityKind::Individual),
            "team" | "teams" => Ok(EntityKind::Team),
            _ => Err(format!("unknown entity kind '{}'", s)),
        }
    }
}

/// Which per-game statistic tables a report joins
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectionMode {
    /// Base (box-score) table only
    Traditional,
    /// Derived-rate table only
    Advanced,
    /// Both tables
    Unified,
}

impl ProjectionMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectionMode::Traditional => "traditional",
            ProjectionMode::Advanced => "advanced",
            ProjectionMode::Unified => "unified",
        }
    }

    /// Whether stats read from `source` are available in this mode
    pub fn includes(&self, source: StatSource) -> bool {
        match source {
            StatSource::Entity | StatSource::EntityTeam => true,
            StatSource::Traditional => !matches!(self, ProjectionMode::Advanced),
            StatSource::Advanced => !matches!(self, ProjectionMode::Traditional),
        }
    }

    /// Per-game tables joined in this mode, base table first
    pub fn stat_sources(&self) -> &'static [StatSource] {
        match self {
            ProjectionMode::Traditional => &[StatSource::Traditional],
            ProjectionMode::Advanced => &[StatSource::Advanced],
            ProjectionMode::Unified => &[StatSource::Traditional, StatSource::Advanced],
        }
    }
}

impl fmt::Display for ProjectionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProjectionMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "traditional" | "base" => Ok(ProjectionMode::Traditional),
            "advanced" => Ok(ProjectionMode::Advanced),
            "unified" | "all" => Ok(ProjectionMode::Unified),
            _ => Err(format!("unknown projection mode '{}'", s)),
        }
    }
}

/// Semantic category of a stat
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatCategory {
    /// Descriptive attribute of the entity, used as a grouping key
    Identity,
    /// Traditional per-game counting statistic
    BaseStat,
    /// Advanced efficiency metric
    DerivedStat,
}

/// Value domain of a stat, governing normalization and validation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueDomain {
    /// Plain number; most stats are non-negative, plus/minus style stats are not
    Numeric { allow_negative: bool },
    /// Entered and displayed as 0-100, stored as a 0-1 fraction
    Percentage,
    /// Identity text (names, codes)
    String,
}

impl ValueDomain {
    pub fn is_string(&self) -> bool {
        matches!(self, ValueDomain::String)
    }
}

/// The relation a stat is read from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatSource {
    /// The entity table itself (players or teams)
    Entity,
    /// The team a player currently belongs to
    EntityTeam,
    /// Per-game base statistics
    Traditional,
    /// Per-game derived-rate statistics
    Advanced,
}

impl StatSource {
    /// Table alias used in compiled queries
    pub fn alias(&self) -> &'static str {
        match self {
            StatSource::Entity => "e",
            StatSource::EntityTeam => "t",
            StatSource::Traditional => "s",
            StatSource::Advanced => "a",
        }
    }
}

/// How a stat's per-game column is folded into one value per entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Aggregation {
    /// Grouping key, emitted bare
    Key,
    /// Mean of the per-game column
    Avg,
    /// Number of per-game rows
    Count,
    /// Number of games where a boolean column is true
    CountTrue,
    /// Number of games where a boolean column is false
    CountFalse,
    /// Share of games where a boolean column is true
    ShareTrue,
    /// Attempt-weighted ratio of two summed columns
    Ratio {
        made: &'static str,
        attempted: &'static str,
    },
}
