//! In-memory scope evaluation
//!
//! Applies the same window rules as the compiled scope relation to a game log
//! held in memory. Used to check fixture data and ranking behaviour without
//! a store.

use std::collections::BTreeMap;
use chrono::{Duration, Months, NaiveDate};
use serde::Deserialize;
use crate::query::{GameSide, PeriodUnit, ScopeSpec};

/// One entity's participation in one game
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GameLogEntry {
    pub entity_id: i64,
    pub game_id: i64,
    pub game_date: NaiveDate,
    pub season: String,
    pub game_type: String,
    /// The team the entity played for (the entity itself for teams)
    pub team_id: i64,
    pub home_team_id: i64,
    pub away_team_id: i64,
}

/// Select the in-scope entries of `log`
///
/// Results are grouped by entity (ascending id) and season, and ordered
/// oldest game first within each group. Without a season, `LastN` and
/// `GameRange` only look at the latest season in the log.
pub fn evaluate_scope<'a>(
    scope: &ScopeSpec,
    log: &'a [GameLogEntry],
    season: Option<&str>,
    regular_game_type: &str,
) -> Vec<&'a GameLogEntry> {
    let is_regular = |entry: &GameLogEntry| entry.game_type == regular_game_type;
    let season = match season {
        None if scope.is_ranked() => log.iter().filter(|e| is_regular(e)).map(|e| e.season.as_str()).max(),
        other => other,
    };
    let in_base = |entry: &GameLogEntry| is_regular(entry) && season.map_or(true, |s| entry.season == s);

    let mut by_entity: BTreeMap<(i64, &'a str), Vec<&'a GameLogEntry>> = BTreeMap::new();
    for entry in log.iter().filter(|e| in_base(e)) {
        by_entity.entry((entry.entity_id, entry.season.as_str())).or_default().push(entry);
    }
    for games in by_entity.values_mut() {
        games.sort_by_key(|e| (e.game_date, e.game_id));
    }

    let latest = log.iter().filter(|e| in_base(e)).map(|e| e.game_date).max();

    let mut selected = Vec::new();
    for games in by_entity.into_values() {
        match *scope {
            ScopeSpec::AllGames => selected.extend(games),
            ScopeSpec::LastN { n } => {
                let keep = (n as usize).min(games.len());
                selected.extend(games[games.len() - keep..].iter().copied());
            }
            ScopeSpec::GameRange { from, to } => {
                let skip = from.saturating_sub(1) as usize;
                let take = (to + 1).saturating_sub(from) as usize;
                selected.extend(games.into_iter().skip(skip).take(take));
            }
            ScopeSpec::HomeAway { side } => {
                selected.extend(games.into_iter().filter(|e| match side {
                    GameSide::Home => e.home_team_id == e.team_id,
                    GameSide::Away => e.away_team_id == e.team_id,
                }));
            }
            ScopeSpec::LastPeriod { unit, n } => {
                if let Some(cutoff) = latest.and_then(|date| period_start(date, unit, n)) {
                    selected.extend(games.into_iter().filter(|e| e.game_date > cutoff));
                }
            }
            ScopeSpec::DateRange { from, to } => {
                selected.extend(games.into_iter().filter(|e| e.game_date >= from && e.game_date <= to));
            }
        }
    }
    selected
}

/// `latest` minus `n` units; month arithmetic clamps to the end of the month
fn period_start(latest: NaiveDate, unit: PeriodUnit, n: u32) -> Option<NaiveDate> {
    match unit {
        PeriodUnit::Days => latest.checked_sub_signed(Duration::days(i64::from(n))),
        PeriodUnit::Weeks => latest.checked_sub_signed(Duration::weeks(i64::from(n))),
        PeriodUnit::Months => latest.checked_sub_months(Months::new(n)),
    }
}
