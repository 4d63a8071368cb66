//! Individual (player) stat registry

use super::definition::{base, derived, identity, shooting, StatDefinition, StatId, COUNT, PCT, SIGNED, TEXT};
use super::types::{Aggregation, StatSource};

/// Stats reportable for individual players.
///
/// Variant order matches `INDIVIDUAL_STATS`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IndividualStat {
    PlayerId,
    Name,
    Team,
    Position,
    Age,
    GamesPlayed,
    GamesStarted,
    Minutes,
    Points,
    FieldGoalsMade,
    FieldGoalsAttempted,
    FieldGoalPct,
    ThreePointersMade,
    ThreePointersAttempted,
    ThreePointPct,
    FreeThrowsMade,
    FreeThrowsAttempted,
    FreeThrowPct,
    OffensiveRebounds,
    DefensiveRebounds,
    Rebounds,
    Assists,
    Steals,
    Blocks,
    Turnovers,
    PersonalFouls,
    PlusMinus,
    OffensiveRating,
    DefensiveRating,
    NetRating,
    AssistPct,
    AssistToTurnover,
    AssistRatio,
    OffensiveReboundPct,
    DefensiveReboundPct,
    ReboundPct,
    TurnoverPct,
    EffectiveFieldGoalPct,
    TrueShootingPct,
    UsagePct,
    Pace,
    Pie,
}

impl IndividualStat {
    pub fn definition(self) -> &'static StatDefinition {
        &INDIVIDUAL_STATS[self as usize]
    }
}

use IndividualStat as S;

const fn id(stat: IndividualStat) -> StatId {
    StatId::Individual(stat)
}

pub(crate) static INDIVIDUAL_STATS: [StatDefinition; 42] = [
    identity(id(S::PlayerId), "Player ID", "ID", StatSource::Entity, "id", TEXT, false, "player_id"),
    identity(id(S::Name), "Name", "PLAYER", StatSource::Entity, "name", TEXT, true, "name"),
    identity(id(S::Team), "Team", "TEAM", StatSource::EntityTeam, "team_code", TEXT, true, "team"),
    identity(id(S::Position), "Position", "POS", StatSource::Entity, "position", TEXT, true, "pos"),
    identity(id(S::Age), "Age", "AGE", StatSource::Entity, "age", COUNT, true, "age"),
    base(id(S::GamesPlayed), "Games Played", "GP", "game_id", Aggregation::Count, COUNT, "gp"),
    base(id(S::GamesStarted), "Games Started", "GS", "started", Aggregation::CountTrue, COUNT, "gs"),
    base(id(S::Minutes), "Minutes", "MIN", "minutes_played", Aggregation::Avg, COUNT, "min"),
    base(id(S::Points), "Points", "PTS", "points", Aggregation::Avg, COUNT, "pts"),
    base(id(S::FieldGoalsMade), "Field Goals Made", "FGM", "field_goals_made", Aggregation::Avg, COUNT, "fgm"),
    base(id(S::FieldGoalsAttempted), "Field Goals Attempted", "FGA", "field_goals_attempted", Aggregation::Avg, COUNT, "fga"),
    shooting(id(S::FieldGoalPct), "Field Goal %", "FG%", "field_goal_percentage", "field_goals_made", "field_goals_attempted", "fg_pct"),
    base(id(S::ThreePointersMade), "3-Pointers Made", "3PM", "three_pointers_made", Aggregation::Avg, COUNT, "fg3m"),
    base(id(S::ThreePointersAttempted), "3-Pointers Attempted", "3PA", "three_pointers_attempted", Aggregation::Avg, COUNT, "fg3a"),
    shooting(id(S::ThreePointPct), "3-Point %", "3P%", "three_point_percentage", "three_pointers_made", "three_pointers_attempted", "fg3_pct"),
    base(id(S::FreeThrowsMade), "Free Throws Made", "FTM", "free_throws_made", Aggregation::Avg, COUNT, "ftm"),
    base(id(S::FreeThrowsAttempted), "Free Throws Attempted", "FTA", "free_throws_attempted", Aggregation::Avg, COUNT, "fta"),
    shooting(id(S::FreeThrowPct), "Free Throw %", "FT%", "free_throw_percentage", "free_throws_made", "free_throws_attempted", "ft_pct"),
    base(id(S::OffensiveRebounds), "Offensive Rebounds", "OREB", "offensive_rebounds", Aggregation::Avg, COUNT, "oreb"),
    base(id(S::DefensiveRebounds), "Defensive Rebounds", "DREB", "defensive_rebounds", Aggregation::Avg, COUNT, "dreb"),
    base(id(S::Rebounds), "Rebounds", "REB", "total_rebounds", Aggregation::Avg, COUNT, "reb"),
    base(id(S::Assists), "Assists", "AST", "assists", Aggregation::Avg, COUNT, "ast"),
    base(id(S::Steals), "Steals", "STL", "steals", Aggregation::Avg, COUNT, "stl"),
    base(id(S::Blocks), "Blocks", "BLK", "blocks", Aggregation::Avg, COUNT, "blk"),
    base(id(S::Turnovers), "Turnovers", "TOV", "turnovers", Aggregation::Avg, COUNT, "tov"),
    base(id(S::PersonalFouls), "Personal Fouls", "PF", "personal_fouls", Aggregation::Avg, COUNT, "pf"),
    base(id(S::PlusMinus), "Plus Minus", "+/-", "plus_minus", Aggregation::Avg, SIGNED, "plus_minus"),
    derived(id(S::OffensiveRating), "Offensive Rating", "OFFRTG", "offensive_rating", COUNT, "off_rating"),
    derived(id(S::DefensiveRating), "Defensive Rating", "DEFRTG", "defensive_rating", COUNT, "def_rating"),
    derived(id(S::NetRating), "Net Rating", "NETRTG", "net_rating", SIGNED, "net_rating"),
    derived(id(S::AssistPct), "Assist %", "AST%", "assist_percentage", PCT, "ast_pct"),
    derived(id(S::AssistToTurnover), "Assist to Turnover", "AST/TO", "assist_turnover_ratio", COUNT, "ast_to"),
    derived(id(S::AssistRatio), "Assist Ratio", "AST RATIO", "assist_ratio", COUNT, "ast_ratio"),
    derived(id(S::OffensiveReboundPct), "Offensive Rebound %", "OREB%", "offensive_rebound_percentage", PCT, "oreb_pct"),
    derived(id(S::DefensiveReboundPct), "Defensive Rebound %", "DREB%", "defensive_rebound_percentage", PCT, "dreb_pct"),
    derived(id(S::ReboundPct), "Rebound %", "REB%", "rebound_percentage", PCT, "reb_pct"),
    derived(id(S::TurnoverPct), "Turnover %", "TOV%", "turnover_percentage", PCT, "tov_pct"),
    derived(id(S::EffectiveFieldGoalPct), "Effective FG %", "EFG%", "effective_field_goal_percentage", PCT, "efg_pct"),
    derived(id(S::TrueShootingPct), "True Shooting %", "TS%", "true_shooting_percentage", PCT, "ts_pct"),
    derived(id(S::UsagePct), "Usage %", "USG%", "usage_percentage", PCT, "usg_pct"),
    derived(id(S::Pace), "Pace", "PACE", "pace", COUNT, "pace"),
    derived(id(S::Pie), "Player Impact Estimate", "PIE", "pie", PCT, "pie"),
];
