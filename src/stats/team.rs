//! Team stat registry

use super::definition::{base, derived, identity, shooting, StatDefinition, StatId, COUNT, PCT, SIGNED, TEXT};
use super::types::{Aggregation, StatSource};

/// Stats reportable for teams.
///
/// Variant order matches `TEAM_STATS`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TeamStat {
    TeamId,
    Name,
    Abbreviation,
    Conference,
    Division,
    GamesPlayed,
    Wins,
    Losses,
    WinPct,
    Points,
    OpponentPoints,
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
    OffensiveReboundPct,
    DefensiveReboundPct,
    ReboundPct,
    TurnoverPct,
    EffectiveFieldGoalPct,
    TrueShootingPct,
    Pace,
    Pie,
}

impl TeamStat {
    pub fn definition(self) -> &'static StatDefinition {
        &TEAM_STATS[self as usize]
    }
}

use TeamStat as T;

const fn id(stat: TeamStat) -> StatId {
    StatId::Team(stat)
}

pub(crate) static TEAM_STATS: [StatDefinition; 42] = [
    identity(id(T::TeamId), "Team ID", "ID", StatSource::Entity, "id", TEXT, false, "team_id"),
    identity(id(T::Name), "Team", "TEAM", StatSource::Entity, "team_name", TEXT, true, "team_name"),
    identity(id(T::Abbreviation), "Abbreviation", "ABBR", StatSource::Entity, "team_code", TEXT, true, "team_code"),
    identity(id(T::Conference), "Conference", "CONF", StatSource::Entity, "conference", TEXT, true, "conference"),
    identity(id(T::Division), "Division", "DIV", StatSource::Entity, "division", TEXT, true, "division"),
    base(id(T::GamesPlayed), "Games Played", "GP", "game_id", Aggregation::Count, COUNT, "gp"),
    base(id(T::Wins), "Wins", "W", "win", Aggregation::CountTrue, COUNT, "w"),
    base(id(T::Losses), "Losses", "L", "win", Aggregation::CountFalse, COUNT, "l"),
    base(id(T::WinPct), "Win %", "WIN%", "win", Aggregation::ShareTrue, PCT, "win_pct"),
    base(id(T::Points), "Points", "PTS", "points", Aggregation::Avg, COUNT, "pts"),
    base(id(T::OpponentPoints), "Opponent Points", "OPP PTS", "opponent_points", Aggregation::Avg, COUNT, "opp_pts"),
    base(id(T::FieldGoalsMade), "Field Goals Made", "FGM", "field_goals_made", Aggregation::Avg, COUNT, "fgm"),
    base(id(T::FieldGoalsAttempted), "Field Goals Attempted", "FGA", "field_goals_attempted", Aggregation::Avg, COUNT, "fga"),
    shooting(id(T::FieldGoalPct), "Field Goal %", "FG%", "field_goal_percentage", "field_goals_made", "field_goals_attempted", "fg_pct"),
    base(id(T::ThreePointersMade), "3-Pointers Made", "3PM", "three_pointers_made", Aggregation::Avg, COUNT, "fg3m"),
    base(id(T::ThreePointersAttempted), "3-Pointers Attempted", "3PA", "three_pointers_attempted", Aggregation::Avg, COUNT, "fg3a"),
    shooting(id(T::ThreePointPct), "3-Point %", "3P%", "three_point_percentage", "three_pointers_made", "three_pointers_attempted", "fg3_pct"),
    base(id(T::FreeThrowsMade), "Free Throws Made", "FTM", "free_throws_made", Aggregation::Avg, COUNT, "ftm"),
    base(id(T::FreeThrowsAttempted), "Free Throws Attempted", "FTA", "free_throws_attempted", Aggregation::Avg, COUNT, "fta"),
    shooting(id(T::FreeThrowPct), "Free Throw %", "FT%", "free_throw_percentage", "free_throws_made", "free_throws_attempted", "ft_pct"),
    base(id(T::OffensiveRebounds), "Offensive Rebounds", "OREB", "offensive_rebounds", Aggregation::Avg, COUNT, "oreb"),
    base(id(T::DefensiveRebounds), "Defensive Rebounds", "DREB", "defensive_rebounds", Aggregation::Avg, COUNT, "dreb"),
    base(id(T::Rebounds), "Rebounds", "REB", "total_rebounds", Aggregation::Avg, COUNT, "reb"),
    base(id(T::Assists), "Assists", "AST", "assists", Aggregation::Avg, COUNT, "ast"),
    base(id(T::Steals), "Steals", "STL", "steals", Aggregation::Avg, COUNT, "stl"),
    base(id(T::Blocks), "Blocks", "BLK", "blocks", Aggregation::Avg, COUNT, "blk"),
    base(id(T::Turnovers), "Turnovers", "TOV", "turnovers", Aggregation::Avg, COUNT, "tov"),
    base(id(T::PersonalFouls), "Personal Fouls", "PF", "personal_fouls", Aggregation::Avg, COUNT, "pf"),
    base(id(T::PlusMinus), "Plus Minus", "+/-", "plus_minus", Aggregation::Avg, SIGNED, "plus_minus"),
    derived(id(T::OffensiveRating), "Offensive Rating", "OFFRTG", "offensive_rating", COUNT, "off_rating"),
    derived(id(T::DefensiveRating), "Defensive Rating", "DEFRTG", "defensive_rating", COUNT, "def_rating"),
    derived(id(T::NetRating), "Net Rating", "NETRTG", "net_rating", SIGNED, "net_rating"),
    derived(id(T::AssistPct), "Assist %", "AST%", "assist_percentage", PCT, "ast_pct"),
    derived(id(T::AssistToTurnover), "Assist to Turnover", "AST/TO", "assist_turnover_ratio", COUNT, "ast_to"),
    derived(id(T::OffensiveReboundPct), "Offensive Rebound %", "OREB%", "offensive_rebound_percentage", PCT, "oreb_pct"),
    derived(id(T::DefensiveReboundPct), "Defensive Rebound %", "DREB%", "defensive_rebound_percentage", PCT, "dreb_pct"),
    derived(id(T::ReboundPct), "Rebound %", "REB%", "rebound_percentage", PCT, "reb_pct"),
    derived(id(T::TurnoverPct), "Turnover %", "TOV%", "turnover_percentage", PCT, "tov_pct"),
    derived(id(T::EffectiveFieldGoalPct), "Effective FG %", "EFG%", "effective_field_goal_percentage", PCT, "efg_pct"),
    derived(id(T::TrueShootingPct), "True Shooting %", "TS%", "true_shooting_percentage", PCT, "ts_pct"),
    derived(id(T::Pace), "Pace", "PACE", "pace", COUNT, "pace"),
    derived(id(T::Pie), "Player Impact Estimate", "PIE", "pie", PCT, "pie"),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_order_matches_enum() {
        for (index, def) in TEAM_STATS.iter().enumerate() {
            let StatId::Team(stat) = def.id else {
                panic!("individual stat {:?} in team table", def.id);
            };
            assert_eq!(stat as usize, index, "{} is out of order", def.name);
        }
    }

    #[test]
    fn test_record_stats_share_win_column() {
        assert_eq!(TeamStat::Losses.definition().aggregate_expr().as_sql(), "SUM(CASE WHEN s.win THEN 0 ELSE 1 END)");
        assert_eq!(TeamStat::WinPct.definition().aggregate_expr().as_sql(), "AVG(CASE WHEN s.win THEN 1.0 ELSE 0.0 END)");
    }
}
