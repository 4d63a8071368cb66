//! Property-based tests for statreport.
//!
//! These tests check compilation invariants for arbitrary requests and game
//! logs using proptest.
//!
//! Run with: cargo test --test property_tests

mod common;

use chrono::{Duration, NaiveDate};
use common::{compile, placeholders_in};
use proptest::prelude::*;
use serde_json::Value;
use statreport::normalizer::{round_to_tenth, to_display, to_storage, validate};
use statreport::scope::{evaluate_scope, GameLogEntry};
use statreport::selector::select_mode;
use statreport::{
    EntityKind, FilterOperator, FilterSpec, ParamValue, ProjectionMode, ReportSpec, ScopeSpec, StatDefinition,
    StatRegistry,
};

// ============================================================================
// Arbitrary generators
// ============================================================================

const SEASON: &str = "2023-24";

fn stat(abbreviation: &str) -> &'static StatDefinition {
    StatRegistry::for_kind(EntityKind::Individual)
        .lookup(abbreviation)
        .unwrap_or_else(|| panic!("no individual stat {}", abbreviation))
}

fn arb_numeric_stat() -> impl Strategy<Value = &'static str> {
    prop_oneof![
        Just("PTS"),
        Just("REB"),
        Just("AST"),
        Just("STL"),
        Just("BLK"),
        Just("GP"),
        Just("FG%"),
        Just("3P%"),
        Just("USG%"),
        Just("TS%"),
        Just("PACE"),
    ]
}

fn arb_base_stat() -> impl Strategy<Value = &'static str> {
    prop_oneof![Just("PTS"), Just("REB"), Just("AST"), Just("FG%"), Just("GP"), Just("+/-")]
}

fn arb_derived_stat() -> impl Strategy<Value = &'static str> {
    prop_oneof![Just("USG%"), Just("TS%"), Just("NETRTG"), Just("PIE"), Just("PACE")]
}

/// A well-formed filter with in-domain values (percent stats stay in 0..=100)
fn arb_filter() -> impl Strategy<Value = FilterSpec> {
    let numeric = (arb_numeric_stat(), 0i64..=100, 0i64..=100, prop::collection::vec(0i64..=100, 1..4), 0u8..5)
        .prop_map(|(stat, a, b, list, op)| match op {
            0 => FilterSpec::gt(stat, a),
            1 => FilterSpec::lt(stat, a),
            2 => FilterSpec::eq(stat, a),
            3 => FilterSpec::between(stat, a.min(b), a.max(b)),
            _ => FilterSpec::one_of(stat, list),
        });
    let positions = prop::collection::vec(prop_oneof![Just("G"), Just("F"), Just("C")], 1..3)
        .prop_map(|list| FilterSpec::one_of("POS", list));
    prop_oneof![4 => numeric, 1 => positions]
}

fn arb_scope() -> impl Strategy<Value = ScopeSpec> {
    prop_oneof![
        Just(ScopeSpec::AllGames),
        (1u32..=82).prop_map(|n| ScopeSpec::LastN { n }),
        (1u32..=82, 0u32..10).prop_map(|(from, span)| ScopeSpec::GameRange { from, to: (from + span).min(82) }),
    ]
}

fn arb_game_log() -> impl Strategy<Value = Vec<GameLogEntry>> {
    let opening = NaiveDate::from_ymd_opt(2023, 10, 24).unwrap();
    prop::collection::vec((1i64..4, 0i64..160), 0..60).prop_map(move |rows| {
        rows.into_iter()
            .enumerate()
            .map(|(index, (entity_id, day))| GameLogEntry {
                entity_id,
                game_id: index as i64 + 1,
                game_date: opening + Duration::days(day),
                season: SEASON.to_string(),
                game_type: "regular".to_string(),
                team_id: entity_id * 10,
                home_team_id: entity_id * 10,
                away_team_id: 99,
            })
            .collect()
    })
}

/// The log of one entity, oldest first, ties broken by game id
fn history(log: &[GameLogEntry], entity_id: i64) -> Vec<&GameLogEntry> {
    let mut games: Vec<&GameLogEntry> = log.iter().filter(|e| e.entity_id == entity_id).collect();
    games.sort_by_key(|e| (e.game_date, e.game_id));
    games
}

// ============================================================================
// Placeholder numbering
// ============================================================================

proptest! {
    /// `$1..$n` each appear exactly once and in increasing order, and the
    /// parameter list has exactly n entries.
    #[test]
    fn prop_placeholders_are_contiguous(
        filters in prop::collection::vec(arb_filter(), 0..6),
        scope in arb_scope(),
        season in prop::option::of(Just(SEASON)),
    ) {
        let mut spec = ReportSpec::new(EntityKind::Individual).with_scope(scope);
        if let Some(season) = season {
            spec = spec.with_season(season);
        }
        for filter in filters {
            spec = spec.with_filter(filter);
        }

        let report = compile(&spec).unwrap();
        let expected: Vec<usize> = (1..=report.query.params.len()).collect();
        prop_assert_eq!(placeholders_in(&report.query.text), expected.clone());
        prop_assert_eq!(placeholders_in(&report.count.text), expected);
        prop_assert_eq!(report.query.param_cursor, report.query.params.len() + 1);
    }

    /// Every surviving filter contributes exactly its own bind values.
    #[test]
    fn prop_param_count_follows_operators(filters in prop::collection::vec(arb_filter(), 1..6)) {
        let mut spec = ReportSpec::new(EntityKind::Individual);
        let mut expected = 0;
        for filter in filters {
            expected += match filter.operator {
                FilterOperator::Between => 2,
                FilterOperator::In => filter.values.as_ref().map_or(0, Vec::len),
                _ => 1,
            };
            spec = spec.with_filter(filter);
        }
        let report = compile(&spec).unwrap();
        prop_assert_eq!(report.query.params.len(), expected);
        prop_assert!(report.warnings.is_empty(), "{:?}", report.warnings);
    }
}

// ============================================================================
// Value normalization
// ============================================================================

proptest! {
    /// Any in-domain percentage displays as itself rounded to one decimal.
    #[test]
    fn prop_percentage_round_trip(value in 0.0f64..=100.0, abbreviation in prop_oneof![Just("FG%"), Just("USG%"), Just("PIE")]) {
        let def = stat(abbreviation);
        let stored = match to_storage(&Value::from(value), def).unwrap() {
            ParamValue::Float(v) => v,
            other => panic!("unexpected stored value {:?}", other),
        };
        prop_assert!((0.0..=1.0).contains(&stored));

        let rounded = round_to_tenth(value);
        prop_assert!((rounded - value).abs() <= 0.05 + 1e-6, "{} rounded to {}", value, rounded);
        prop_assert_eq!(to_display(stored, def), format!("{:.1}%", rounded));
    }

    /// Percentages above 100 or below 0 fall outside the domain.
    #[test]
    fn prop_percentage_outside_domain_rejected(value in prop_oneof![100.5f64..1000.0, -1000.0f64..-0.5]) {
        let result = validate(&Value::from(value), stat("FG%"));
        prop_assert!(result.is_err());
        prop_assert!(!result.unwrap_err().is_malformed());
    }
}

// ============================================================================
// Mode selection
// ============================================================================

proptest! {
    #[test]
    fn prop_mode_follows_filter_sources(
        base in prop::collection::vec(arb_base_stat(), 0..4),
        derived in prop::collection::vec(arb_derived_stat(), 0..4),
    ) {
        let defs: Vec<&StatDefinition> = base.iter().chain(derived.iter()).map(|abbr| stat(abbr)).collect();
        let selection = select_mode(&defs, None);
        let expected = match (base.is_empty(), derived.is_empty()) {
            (false, false) => ProjectionMode::Unified,
            (true, false) => ProjectionMode::Advanced,
            _ => ProjectionMode::Traditional,
        };
        prop_assert_eq!(selection.mode, expected);
        prop_assert!(selection.warning.is_none());
    }

    /// Whatever mode is requested, the selected mode includes every filter's table.
    #[test]
    fn prop_selected_mode_serves_filters(
        base in prop::collection::vec(arb_base_stat(), 0..3),
        derived in prop::collection::vec(arb_derived_stat(), 0..3),
        requested in prop_oneof![
            Just(ProjectionMode::Traditional),
            Just(ProjectionMode::Advanced),
            Just(ProjectionMode::Unified),
        ],
    ) {
        let defs: Vec<&StatDefinition> = base.iter().chain(derived.iter()).map(|abbr| stat(abbr)).collect();
        let selection = select_mode(&defs, Some(requested));
        for def in &defs {
            prop_assert!(selection.mode.includes(def.source), "{} not served by {}", def.name, selection.mode);
        }
    }
}

// ============================================================================
// Scope windows
// ============================================================================

proptest! {
    /// lastN keeps min(n, played) games per entity, all newer than any it drops.
    #[test]
    fn prop_last_n_keeps_newest(log in arb_game_log(), n in 1u32..=82) {
        let selected = evaluate_scope(&ScopeSpec::LastN { n }, &log, Some(SEASON), "regular");
        for entity_id in 1..4 {
            let games = history(&log, entity_id);
            let kept: Vec<&GameLogEntry> = selected.iter().copied().filter(|e| e.entity_id == entity_id).collect();
            let expected_len = (n as usize).min(games.len());
            prop_assert_eq!(kept.len(), expected_len);
            prop_assert_eq!(&kept[..], &games[games.len() - expected_len..]);
        }
    }

    /// gameRange keeps exactly the games at positions from..=to of each entity's season.
    #[test]
    fn prop_game_range_is_positional(log in arb_game_log(), from in 1u32..=30, span in 0u32..10) {
        let to = from + span;
        let selected = evaluate_scope(&ScopeSpec::GameRange { from, to }, &log, Some(SEASON), "regular");
        for entity_id in 1..4 {
            let games = history(&log, entity_id);
            let kept: Vec<&GameLogEntry> = selected.iter().copied().filter(|e| e.entity_id == entity_id).collect();
            let start = (from as usize - 1).min(games.len());
            let end = (to as usize).min(games.len());
            prop_assert_eq!(&kept[..], &games[start..end]);
        }
    }

    /// Games from another season or game type are never in scope.
    #[test]
    fn prop_scope_excludes_other_seasons(log in arb_game_log(), n in 1u32..=82) {
        let mut mixed = log.clone();
        for entry in &log {
            let mut other = entry.clone();
            other.game_id += 10_000;
            other.season = "2022-23".to_string();
            mixed.push(other);
        }
        let selected = evaluate_scope(&ScopeSpec::LastN { n }, &mixed, Some(SEASON), "regular");
        prop_assert!(selected.iter().all(|e| e.season == SEASON));
    }
}
