//! Compiler configuration (noun module)
//!
//! Row caps, the regular-season game type and the physical table names the
//! compiled SQL refers to. Every field has a default, so an empty YAML
//! document is a valid configuration.

use serde::{Deserialize, Serialize};
use crate::error::ConfigError;
use crate::stats::{EntityKind, StatSource};

/// Settings shared by every compilation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompilerConfig {
    /// Row cap used when a request omits `limit`
    pub default_limit: i64,
    /// Hard cap applied to every requested limit
    pub max_limit: i64,
    /// `games.game_type` value of regular-season games
    pub regular_game_type: String,
    pub tables: TableNames,
}

impl Default for CompilerConfig {
    fn default() -> Self {
        Self {
            default_limit: 50,
            max_limit: 500,
            regular_game_type: "regular".to_string(),
            tables: TableNames::default(),
        }
    }
}

impl CompilerConfig {
    /// Check values that deserialize fine but cannot be used
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.default_limit < 1 {
            return Err(ConfigError::Invalid(format!(
                "default_limit must be at least 1, got {}",
                self.default_limit
            )));
        }
        if self.max_limit < self.default_limit {
            return Err(ConfigError::Invalid(format!(
                "max_limit ({}) must not be below default_limit ({})",
                self.max_limit, self.default_limit
            )));
        }
        if self.regular_game_type.trim().is_empty() {
            return Err(ConfigError::Invalid("regular_game_type must not be empty".to_string()));
        }
        for (key, name) in self.tables.entries() {
            if !is_table_name(name) {
                return Err(ConfigError::Invalid(format!("tables.{}: '{}' is not a table name", key, name)));
            }
        }
        Ok(())
    }
}

/// Physical table names
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableNames {
    pub games: String,
    pub players: String,
    pub teams: String,
    pub player_game_stats: String,
    pub player_advanced_stats: String,
    pub team_game_stats: String,
    pub team_advanced_stats: String,
}

impl Default for TableNames {
    fn default() -> Self {
        Self {
            games: "games".to_string(),
            players: "players".to_string(),
            teams: "teams".to_string(),
            player_game_stats: "player_game_stats".to_string(),
            player_advanced_stats: "player_advanced_stats".to_string(),
            team_game_stats: "team_game_stats".to_string(),
            team_advanced_stats: "team_advanced_stats".to_string(),
        }
    }
}

impl TableNames {
    /// The table a stat source reads from for one entity kind
    pub fn for_source(&self, kind: EntityKind, source: StatSource) -> &str {
        match (kind, source) {
            (EntityKind::Individual, StatSource::Entity) => self.players.as_str(),
            (EntityKind::Team, StatSource::Entity) => self.teams.as_str(),
            (_, StatSource::EntityTeam) => self.teams.as_str(),
            (EntityKind::Individual, StatSource::Traditional) => self.player_game_stats.as_str(),
            (EntityKind::Individual, StatSource::Advanced) => self.player_advanced_stats.as_str(),
            (EntityKind::Team, StatSource::Traditional) => self.team_game_stats.as_str(),
            (EntityKind::Team, StatSource::Advanced) => self.team_advanced_stats.as_str(),
        }
    }

    fn entries(&self) -> [(&'static str, &str); 7] {
        [
            ("games", self.games.as_str()),
            ("players", self.players.as_str()),
            ("teams", self.teams.as_str()),
            ("player_game_stats", self.player_game_stats.as_str()),
            ("player_advanced_stats", self.player_advanced_stats.as_str()),
            ("team_game_stats", self.team_game_stats.as_str()),
            ("team_advanced_stats", self.team_advanced_stats.as_str()),
        ]
    }
}

/// Bare or schema-qualified SQL identifier
fn is_table_name(name: &str) -> bool {
    !name.is_empty()
        && name.split('.').all(|part| {
            let mut chars = part.chars();
            matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_')
                && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        })
}
