//! Report assembly
//!
//! `plan_report` is the orchestrator: it validates the `ReportSpec`, resolves the
//! scope relation, translates filters, selects the projection mode, resolves
//! the sort and assembles everything into a `ReportPlan`.

use tracing::debug;
use crate::config::CompilerConfig;
use crate::error::ValidationErrors;
use crate::plan::{
    Column, Join, JoinType, ParamCursor, ParamValue, Projection, ReportPlan, SortKey, TableRef, SCOPE_ALIAS,
};
use crate::predicate::{translate_filters, PredicateSet};
use crate::query::{ReportSpec, SortDirection, SortSpec};
use crate::scope::{entity_column, resolve_scope};
use crate::selector::select_mode;
use crate::sort::{normalize_sort, ResolvedSort};
use crate::stats::{EntityKind, ProjectionMode, StatRegistry, StatSource};
use super::compat::compatibility_warnings;

/// A report plan plus everything resolved while building it
#[derive(Debug, Clone)]
pub struct PlannedReport {
    pub plan: ReportPlan,
    /// Bind values, in placeholder order
    pub params: Vec<ParamValue>,
    pub mode: ProjectionMode,
    pub sort: SortSpec,
    pub scope_description: String,
    pub warnings: Vec<String>,
}

/// Plan a report query
///
/// Request errors from every stage are collected and returned
/// together; nothing is planned when any are present.
pub fn plan_report(spec: &ReportSpec, config: &CompilerConfig) -> Result<PlannedReport, ValidationErrors> {
    let mut errors = ValidationErrors::new();
    if let Err(spec_errors) = spec.validate() {
        errors.extend(spec_errors);
    }

    let kind = spec.entity_kind;
    let registry = StatRegistry::for_kind(kind);
    let mut cursor = ParamCursor::new();

    // 1. Scope relation (its placeholders come first in the text)
    let scope = resolve_scope(spec.scope(), kind, spec.season.as_deref(), config, &mut cursor);

    // 2. Post-aggregation predicates
    let predicates = match translate_filters(&spec.filters, registry, &mut cursor) {
        Ok(predicates) => predicates,
        Err(filter_errors) => {
            errors.extend(filter_errors);
            PredicateSet::default()
        }
    };
    errors.into_result()?;

    let mut warnings = predicates.warnings.clone();

    // 3. Projection mode
    let selection = select_mode(&predicates.stats, spec.mode);
    warnings.extend(selection.warning);
    let mode = selection.mode;

    // 4. Ordering
    let sort = normalize_sort(spec.sort.as_ref(), registry, mode);
    warnings.extend(sort.warning.clone());

    // 5. Combination checks
    warnings.extend(compatibility_warnings(spec, &predicates));

    // 6. Row cap
    let mut limit = spec.limit.unwrap_or(config.default_limit);
    if limit > config.max_limit {
        warnings.push(format!("limit {} exceeds the maximum; using {}", limit, config.max_limit));
        limit = config.max_limit;
    }

    let plan = ReportPlan {
        scope,
        joins: build_joins(kind, mode, &predicates, config),
        group_by: registry.identity_stats().filter_map(|def| def.group_column()).collect(),
        projections: registry
            .visible_in(mode)
            .map(|def| Projection {
                expr: def.aggregate_expr(),
                alias: def.sort_key,
            })
            .collect(),
        having: predicates.predicates,
        order_by: order_by(&sort, registry),
        limit: Some(limit),
        offset: spec.offset.filter(|offset| *offset > 0),
    };

    let scope_description = match &spec.season {
        Some(season) => format!("{}, {} season", spec.scope().describe(), season),
        None if spec.scope().is_ranked() => format!("{}, latest season", spec.scope().describe()),
        None => spec.scope().describe(),
    };

    debug!(
        entity = %kind,
        mode = %mode,
        sort = sort.stat.sort_key,
        params = cursor.len(),
        warnings = warnings.len(),
        "planned report"
    );

    Ok(PlannedReport {
        plan,
        params: cursor.into_params(),
        mode,
        sort: sort.to_spec(),
        scope_description,
        warnings,
    })
}

/// Entity table, the player's team, then the per-game stat tables of `mode`
///
/// In unified mode a stat table is inner-joined only when every per-game
/// filter reads from it; otherwise it is left-joined so entities missing a
/// row in that table are kept.
fn build_joins(kind: EntityKind, mode: ProjectionMode, predicates: &PredicateSet, config: &CompilerConfig) -> Vec<Join> {
    let entity = StatSource::Entity.alias();
    let mut joins = vec![Join {
        join_type: JoinType::Inner,
        table: TableRef::new(config.tables.for_source(kind, StatSource::Entity), entity),
        on: vec![(Column::new(entity, "id"), Column::new(SCOPE_ALIAS, "entity_id"))],
    }];

    if kind == EntityKind::Individual {
        let team = StatSource::EntityTeam.alias();
        joins.push(Join {
            join_type: JoinType::Left,
            table: TableRef::new(config.tables.for_source(kind, StatSource::EntityTeam), team),
            on: vec![(Column::new(team, "id"), Column::new(entity, "team_id"))],
        });
    }

    let per_game: Vec<StatSource> = predicates
        .stats
        .iter()
        .filter(|s| s.is_per_game())
        .map(|s| s.source)
        .collect();

    for &source in mode.stat_sources() {
        let join_type = if mode != ProjectionMode::Unified
            || (!per_game.is_empty() && per_game.iter().all(|s| *s == source))
        {
            JoinType::Inner
        } else {
            JoinType::Left
        };
        let alias = source.alias();
        joins.push(Join {
            join_type,
            table: TableRef::new(config.tables.for_source(kind, source), alias),
            on: vec![
                (Column::new(alias, entity_column(kind)), Column::new(SCOPE_ALIAS, "entity_id")),
                (Column::new(alias, "game_id"), Column::new(SCOPE_ALIAS, "game_id")),
            ],
        });
    }
    joins
}

/// The requested key with nulls last, then the entity key as a tie-breaker
fn order_by(sort: &ResolvedSort, registry: &StatRegistry) -> Vec<SortKey> {
    let mut keys = vec![SortKey {
        expr: sort.stat.aggregate_expr(),
        direction: sort.direction,
        nulls_last: true,
    }];
    let entity_key = registry.entity_key();
    if sort.stat.id != entity_key.id {
        keys.push(SortKey {
            expr: entity_key.aggregate_expr(),
            direction: SortDirection::Asc,
            nulls_last: false,
        });
    }
    keys
}
