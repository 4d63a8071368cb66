//! SQL emitter
//!
//! Renders a `ReportPlan` as PostgreSQL text. Placeholders appear in the text
//! in increasing order: scope relation first, then the HAVING conjunction.

use crate::plan::{
    Column, Join, JoinType, Projection, ReportPlan, ScopeRelation, ScopeWindow, SeasonBound, SortKey,
    SCOPE_ALIAS, SCOPE_RELATION,
};
use crate::query::GameSide;

/// Alias of the per-game base table inside the scope relation
const BASE_ALIAS: &str = "s";
/// Alias of the games table inside the scope relation
const GAMES_ALIAS: &str = "g";

/// Emit the paginated report query
pub fn emit_report(plan: &ReportPlan) -> String {
    let mut sql = emit_scope(&plan.scope);
    sql.push_str("\nSELECT\n");
    let items: Vec<String> = plan.projections.iter().map(|p| format!("{}{}", pad(1), emit_projection(p))).collect();
    sql.push_str(&items.join(",\n"));
    sql.push('\n');
    sql.push_str(&emit_grouped_body(plan, 0));

    if !plan.order_by.is_empty() {
        let keys: Vec<String> = plan.order_by.iter().map(emit_sort_key).collect();
        sql.push_str(&format!("\nORDER BY {}", keys.join(", ")));
    }
    if let Some(limit) = plan.limit {
        sql.push_str(&format!("\nLIMIT {}", limit));
    }
    if let Some(offset) = plan.offset {
        sql.push_str(&format!("\nOFFSET {}", offset));
    }
    sql
}

/// Emit the matching count query
///
/// Same scope relation, joins, grouping and HAVING as the report, so it binds
/// the same parameters; no ordering, limit or offset.
pub fn emit_count(plan: &ReportPlan) -> String {
    let p = pad(1);
    format!(
        "{scope}\nSELECT COUNT(*) AS \"total\"\nFROM (\n{p}SELECT 1\n{body}\n) AS report_rows",
        scope = emit_scope(&plan.scope),
        body = emit_grouped_body(plan, 1),
    )
}

fn pad(indent: usize) -> String {
    "  ".repeat(indent)
}

fn quote_literal(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}

// ---------------------------------------------------------------------------
// Scope relation
// ---------------------------------------------------------------------------

fn emit_scope(scope: &ScopeRelation) -> String {
    let body = if scope.window.is_ranked() {
        emit_ranked_scope(scope)
    } else {
        emit_base_select(scope, 1, scope_conditions(scope))
    };
    format!("WITH {} AS (\n{}\n)", SCOPE_RELATION, body)
}

/// `SELECT entity_id, game_id` over regular-season games plus `extra` conditions
fn emit_base_select(scope: &ScopeRelation, indent: usize, extra: Vec<String>) -> String {
    let p = pad(indent);
    let base = &scope.base;
    let mut conditions = vec![format!("{GAMES_ALIAS}.game_type = {}", quote_literal(&base.game_type))];
    match base.season {
        SeasonBound::Any => {}
        SeasonBound::Param(season) => conditions.push(format!("{GAMES_ALIAS}.season = {}", season)),
        SeasonBound::Latest => conditions.push(format!(
            "{GAMES_ALIAS}.season = (SELECT MAX(ls.season) FROM {} AS ls WHERE ls.game_type = {})",
            base.games_table,
            quote_literal(&base.game_type)
        )),
    }
    conditions.extend(extra);

    let rank = match &scope.window {
        ScopeWindow::Newest { .. } => Some("DESC"),
        ScopeWindow::Ordinal { .. } => Some("ASC"),
        _ => None,
    };
    // Ordinals restart every season
    let rank_column = rank.map(|dir| {
        format!(
            ",\n{p}  ROW_NUMBER() OVER (PARTITION BY {b}.{e}, {g}.season ORDER BY {g}.game_date {dir}, {g}.id {dir}) AS game_rank",
            b = BASE_ALIAS,
            e = base.entity_column,
            g = GAMES_ALIAS,
        )
    });

    format!(
        "{p}SELECT {b}.{e} AS entity_id, {b}.game_id{rank}\n\
         {p}FROM {stats} AS {b}\n\
         {p}INNER JOIN {games} AS {g} ON {g}.id = {b}.game_id\n\
         {p}WHERE {conds}",
        b = BASE_ALIAS,
        e = base.entity_column,
        g = GAMES_ALIAS,
        rank = rank_column.unwrap_or_default(),
        stats = base.stats_table,
        games = base.games_table,
        conds = conditions.join(&format!("\n{p}  AND ")),
    )
}

fn emit_ranked_scope(scope: &ScopeRelation) -> String {
    let p = pad(1);
    let keep = match &scope.window {
        ScopeWindow::Newest { count } => format!("ranked.game_rank <= {}", count),
        ScopeWindow::Ordinal { from, to } => format!("ranked.game_rank BETWEEN {} AND {}", from, to),
        _ => String::new(),
    };
    format!(
        "{p}SELECT ranked.entity_id, ranked.game_id\n{p}FROM (\n{inner}\n{p}) AS ranked\n{p}WHERE {keep}",
        inner = emit_base_select(scope, 2, Vec::new()),
    )
}

/// Conditions an unranked window adds to the base relation
fn scope_conditions(scope: &ScopeRelation) -> Vec<String> {
    match &scope.window {
        ScopeWindow::All | ScopeWindow::Newest { .. } | ScopeWindow::Ordinal { .. } => Vec::new(),
        ScopeWindow::Side(side) => {
            let column = match side {
                GameSide::Home => "home_team_id",
                GameSide::Away => "away_team_id",
            };
            vec![format!("{GAMES_ALIAS}.{column} = {BASE_ALIAS}.team_id")]
        }
        ScopeWindow::Since { season, amount, unit } => {
            let mut latest = format!(
                "SELECT MAX(lg.game_date) FROM {} AS lg WHERE lg.game_type = {}",
                scope.base.games_table,
                quote_literal(&scope.base.game_type)
            );
            if let Some(season) = season {
                latest.push_str(&format!(" AND lg.season = {}", season));
            }
            vec![format!(
                "{GAMES_ALIAS}.game_date > ({latest}) - make_interval({field} => {amount})",
                field = unit.interval_field()
            )]
        }
        ScopeWindow::Dates { from, to } => {
            vec![format!("{GAMES_ALIAS}.game_date BETWEEN {} AND {}", from, to)]
        }
    }
}

// ---------------------------------------------------------------------------
// Grouped body
// ---------------------------------------------------------------------------

/// FROM, joins, GROUP BY and HAVING, shared by the report and count queries
fn emit_grouped_body(plan: &ReportPlan, indent: usize) -> String {
    let p = pad(indent);
    let mut lines = vec![format!("{p}FROM {} AS {}", SCOPE_RELATION, SCOPE_ALIAS)];
    lines.extend(plan.joins.iter().map(|j| format!("{p}{}", emit_join(j))));

    if !plan.group_by.is_empty() {
        let cols: Vec<String> = plan.group_by.iter().map(emit_column).collect();
        lines.push(format!("{p}GROUP BY {}", cols.join(", ")));
    }
    if !plan.having.is_empty() {
        let preds: Vec<String> = plan.having.iter().map(|pred| pred.to_string()).collect();
        lines.push(format!("{p}HAVING {}", preds.join(&format!("\n{p}  AND "))));
    }
    lines.join("\n")
}

fn emit_join(join: &Join) -> String {
    let join_kw = match join.join_type {
        JoinType::Inner => "INNER JOIN",
        JoinType::Left => "LEFT JOIN",
    };
    let on: Vec<String> = join
        .on
        .iter()
        .map(|(left, right)| format!("{} = {}", emit_column(left), emit_column(right)))
        .collect();
    format!("{} {} AS {} ON {}", join_kw, join.table.table, join.table.alias, on.join(" AND "))
}

fn emit_projection(projection: &Projection) -> String {
    format!("{} AS \"{}\"", projection.expr, projection.alias)
}

fn emit_sort_key(key: &SortKey) -> String {
    let nulls = if key.nulls_last { " NULLS LAST" } else { "" };
    format!("{} {}{}", key.expr, key.direction.as_sql(), nulls)
}

fn emit_column(col: &Column) -> String {
    col.qualified_name()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CompilerConfig;
    use crate::plan::ParamCursor;
    use crate::query::{PeriodUnit, ScopeSpec};
    use crate::scope::resolve_scope;
    use crate::stats::EntityKind;

    fn scope_sql(spec: &ScopeSpec, season: Option<&str>) -> String {
        let mut cursor = ParamCursor::new();
        let scope = resolve_scope(spec, EntityKind::Individual, season, &CompilerConfig::default(), &mut cursor);
        emit_scope(&scope)
    }

    #[test]
    fn test_all_games_scope() {
        let sql = scope_sql(&ScopeSpec::AllGames, None);
        assert_eq!(
            sql,
            "WITH scoped_games AS (\n  \
             SELECT s.player_id AS entity_id, s.game_id\n  \
             FROM player_game_stats AS s\n  \
             INNER JOIN games AS g ON g.id = s.game_id\n  \
             WHERE g.game_type = 'regular'\n)"
        );
    }

    #[test]
    fn test_last_n_ranks_newest_first() {
        let sql = scope_sql(&ScopeSpec::LastN { n: 10 }, Some("2023-24"));
        assert!(sql.contains(
            "ROW_NUMBER() OVER (PARTITION BY s.player_id, g.season ORDER BY g.game_date DESC, g.id DESC) AS game_rank"
        ));
        assert!(sql.contains("AND g.season = $1"));
        assert!(sql.contains("WHERE ranked.game_rank <= $2"));
    }

    #[test]
    fn test_game_range_ranks_oldest_first() {
        let sql = scope_sql(&ScopeSpec::GameRange { from: 1, to: 5 }, None);
        assert!(sql.contains("ORDER BY g.game_date ASC, g.id ASC"));
        assert!(sql.contains("ranked.game_rank BETWEEN $1 AND $2"));
    }

    #[test]
    fn test_unseasoned_game_range_stays_in_latest_season() {
        let sql = scope_sql(&ScopeSpec::GameRange { from: 1, to: 1 }, None);
        assert!(sql.contains("PARTITION BY s.player_id, g.season ORDER BY g.game_date ASC"));
        assert!(sql.contains(
            "AND g.season = (SELECT MAX(ls.season) FROM games AS ls WHERE ls.game_type = 'regular')"
        ));
        assert!(sql.contains("ranked.game_rank BETWEEN $1 AND $2"));

        // Unranked windows still span every season
        let sql = scope_sql(&ScopeSpec::AllGames, None);
        assert!(!sql.contains("season"));
    }

    #[test]
    fn test_last_period_scope() {
        let sql = scope_sql(&ScopeSpec::LastPeriod { unit: PeriodUnit::Weeks, n: 2 }, Some("2023-24"));
        assert!(sql.contains(
            "g.game_date > (SELECT MAX(lg.game_date) FROM games AS lg WHERE lg.game_type = 'regular' \
             AND lg.season = $2) - make_interval(weeks => $3)"
        ));
    }

    #[test]
    fn test_last_period_interval_binds_an_integer_count() {
        let sql = scope_sql(&ScopeSpec::LastPeriod { unit: PeriodUnit::Months, n: 3 }, None);
        assert!(sql.ends_with("- make_interval(months => $1)\n)"));
        assert!(!sql.contains("INTERVAL"));

        let sql = scope_sql(&ScopeSpec::LastPeriod { unit: PeriodUnit::Days, n: 10 }, None);
        assert!(sql.contains("make_interval(days => $1)"));
    }

    #[test]
    fn test_home_scope() {
        let sql = scope_sql(&ScopeSpec::HomeAway { side: GameSide::Home }, None);
        assert!(sql.contains("AND g.home_team_id = s.team_id"));
    }

    #[test]
    fn test_literal_quoting() {
        assert_eq!(quote_literal("it's"), "'it''s'");
    }
}
