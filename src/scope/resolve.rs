use tracing::debug;
use crate::config::CompilerConfig;
use crate::plan::{BaseRelation, ParamCursor, ParamValue, ScopeRelation, ScopeWindow, SeasonBound};
use crate::query::ScopeSpec;
use crate::stats::{EntityKind, StatSource};

/// Build the relation of in-scope (entity_id, game_id) pairs
///
/// The scope must already be validated. Values are pushed onto `cursor` in
/// the order their placeholders appear in the emitted text: the season bound
/// of the base relation first, then the window's own values.
///
/// Game ordinals restart every season, so a ranked window without a season
/// is anchored to the latest one.
pub fn resolve_scope(
    scope: &ScopeSpec,
    kind: EntityKind,
    season: Option<&str>,
    config: &CompilerConfig,
    cursor: &mut ParamCursor,
) -> ScopeRelation {
    let season_bound = match season {
        Some(s) => SeasonBound::Param(cursor.push(ParamValue::Text(s.to_string()))),
        None if scope.is_ranked() => SeasonBound::Latest,
        None => SeasonBound::Any,
    };

    let base = BaseRelation {
        stats_table: config.tables.for_source(kind, StatSource::Traditional).to_string(),
        entity_column: entity_column(kind),
        games_table: config.tables.games.clone(),
        game_type: config.regular_game_type.clone(),
        season: season_bound,
    };

    let window = match *scope {
        ScopeSpec::AllGames => ScopeWindow::All,
        ScopeSpec::LastN { n } => ScopeWindow::Newest {
            count: cursor.push(ParamValue::Int(i64::from(n))),
        },
        ScopeSpec::GameRange { from, to } => {
            let from = cursor.push(ParamValue::Int(i64::from(from)));
            let to = cursor.push(ParamValue::Int(i64::from(to)));
            ScopeWindow::Ordinal { from, to }
        }
        ScopeSpec::HomeAway { side } => ScopeWindow::Side(side),
        ScopeSpec::LastPeriod { unit, n } => {
            // The latest-date lookup repeats the season bound with its own placeholder
            let season = season.map(|s| cursor.push(ParamValue::Text(s.to_string())));
            let amount = cursor.push(ParamValue::Int(i64::from(n)));
            ScopeWindow::Since { season, amount, unit }
        }
        ScopeSpec::DateRange { from, to } => {
            let from = cursor.push(ParamValue::Date(from));
            let to = cursor.push(ParamValue::Date(to));
            ScopeWindow::Dates { from, to }
        }
    };

    debug!(scope = %scope.describe(), params = cursor.len(), "resolved scope");
    ScopeRelation { base, window }
}

/// Entity key column on the per-game tables
pub fn entity_column(kind: EntityKind) -> &'static str {
    match kind {
        EntityKind::Individual => "player_id",
        EntityKind::Team => "team_id",
    }
}
