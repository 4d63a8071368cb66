//! Typed report specification
//!
//! Built fresh for every request and discarded once the query is compiled.

use chrono::NaiveDate;
use serde::Serialize;
use serde_json::Value;
use std::fmt;
use std::str::FromStr;
use crate::error::ValidationErrors;
use crate::stats::{EntityKind, ProjectionMode};

/// Regular-season games per entity; bounds every game-ordinal scope
pub const SEASON_GAMES: u32 = 82;

static ALL_GAMES: ScopeSpec = ScopeSpec::AllGames;

/// Which (entity, game) pairs participate in aggregation
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ScopeSpec {
    /// Every regular-season game
    #[default]
    AllGames,
    /// Each entity's `n` most recent games
    LastN { n: u32 },
    /// Each entity's `from`-th through `to`-th game of the season, oldest first
    GameRange { from: u32, to: u32 },
    /// Games played on one side of the court
    HomeAway { side: GameSide },
    /// Games within `n` units of the latest known game date
    LastPeriod { unit: PeriodUnit, n: u32 },
    /// Games in a closed calendar interval
    DateRange { from: NaiveDate, to: NaiveDate },
}

impl ScopeSpec {
    /// Check the range invariants of the variant
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        match *self {
            ScopeSpec::AllGames | ScopeSpec::HomeAway { .. } => {}
            ScopeSpec::LastN { n } => {
                if !(1..=SEASON_GAMES).contains(&n) {
                    errors.push(format!("scope lastN: n must be between 1 and {}, got {}", SEASON_GAMES, n));
                }
            }
            ScopeSpec::GameRange { from, to } => {
                for (label, value) in [("from", from), ("to", to)] {
                    if !(1..=SEASON_GAMES).contains(&value) {
                        errors.push(format!(
                            "scope gameRange: {} must be between 1 and {}, got {}",
                            label, SEASON_GAMES, value
                        ));
                    }
                }
                if from > to {
                    errors.push(format!("scope gameRange: from ({}) must not exceed to ({})", from, to));
                }
            }
            ScopeSpec::LastPeriod { unit, n } => {
                if !(1..=unit.max_count()).contains(&n) {
                    errors.push(format!(
                        "scope lastPeriod: n must be between 1 and {} {}, got {}",
                        unit.max_count(),
                        unit,
                        n
                    ));
                }
            }
            ScopeSpec::DateRange { from, to } => {
                if from > to {
                    errors.push(format!("scope dateRange: from ({}) must not be after to ({})", from, to));
                }
            }
        }
        errors.into_result()
    }

    /// Whether the scope picks games by their position in an entity's season
    pub fn is_ranked(&self) -> bool {
        matches!(self, ScopeSpec::LastN { .. } | ScopeSpec::GameRange { .. })
    }

    /// Whether the scope narrows the season to a subset of games
    pub fn is_restricting(&self) -> bool {
        !matches!(self, ScopeSpec::AllGames)
    }

    /// Human-readable summary for report headers
    pub fn describe(&self) -> String {
        match self {
            ScopeSpec::AllGames => "All regular-season games".to_string(),
            ScopeSpec::LastN { n: 1 } => "Most recent game".to_string(),
            ScopeSpec::LastN { n } => format!("Last {} games", n),
            ScopeSpec::GameRange { from, to } if from == to => format!("Game {} of the season", from),
            ScopeSpec::GameRange { from, to } => format!("Games {}-{} of the season", from, to),
            ScopeSpec::HomeAway { side } => format!("{} games", side.label()),
            ScopeSpec::LastPeriod { unit, n } => format!("Last {} {}", n, unit.label(*n)),
            ScopeSpec::DateRange { from, to } => format!("Games from {} to {}", from, to),
        }
    }
}

/// Home or away
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameSide {
    Home,
    Away,
}

impl GameSide {
    pub fn label(&self) -> &'static str {
        match self {
            GameSide::Home => "Home",
            GameSide::Away => "Away",
        }
    }
}

impl FromStr for GameSide {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "home" | "h" => Ok(GameSide::Home),
            "away" | "road" | "a" => Ok(GameSide::Away),
            _ => Err(format!("unknown side '{}', expected home or away", s)),
        }
    }
}

/// Calendar unit of a trailing period
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PeriodUnit {
    Days,
    Weeks,
    Months,
}

impl PeriodUnit {
    /// Largest count accepted (about one calendar year)
    pub fn max_count(&self) -> u32 {
        match self {
            PeriodUnit::Days => 366,
            PeriodUnit::Weeks => 53,
            PeriodUnit::Months => 12,
        }
    }

    /// Named argument of PostgreSQL's `make_interval` for this unit
    pub fn interval_field(&self) -> &'static str {
        match self {
            PeriodUnit::Days => "days",
            PeriodUnit::Weeks => "weeks",
            PeriodUnit::Months => "months",
        }
    }

    fn label(&self, n: u32) -> &'static str {
        match (self, n) {
            (PeriodUnit::Days, 1) => "day",
            (PeriodUnit::Days, _) => "days",
            (PeriodUnit::Weeks, 1) => "week",
            (PeriodUnit::Weeks, _) => "weeks",
            (PeriodUnit::Months, 1) => "month",
            (PeriodUnit::Months, _) => "months",
        }
    }
}

impl fmt::Display for PeriodUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label(2))
    }
}

impl FromStr for PeriodUnit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "day" | "days" | "d" => Ok(PeriodUnit::Days),
            "week" | "weeks" | "w" => Ok(PeriodUnit::Weeks),
            "month" | "months" | "m" => Ok(PeriodUnit::Months),
            _ => Err(format!("unknown period unit '{}', expected days, weeks or months", s)),
        }
    }
}

/// Filter comparison operator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterOperator {
    Gt,
    Lt,
    Eq,
    Between,
    In,
}

impl FilterOperator {
    pub fn as_str(&self) -> &'static str {
        match self {
            FilterOperator::Gt => "GT",
            FilterOperator::Lt => "LT",
            FilterOperator::Eq => "EQ",
            FilterOperator::Between => "BETWEEN",
            FilterOperator::In => "IN",
        }
    }
}

impl FromStr for FilterOperator {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "gt" | ">" => Ok(FilterOperator::Gt),
            "lt" | "<" => Ok(FilterOperator::Lt),
            "eq" | "=" | "==" => Ok(FilterOperator::Eq),
            "between" => Ok(FilterOperator::Between),
            "in" => Ok(FilterOperator::In),
            _ => Err(format!("unknown operator '{}'", s)),
        }
    }
}

/// One statistical predicate as requested by the user
#[derive(Debug, Clone, PartialEq)]
pub struct FilterSpec {
    pub stat: String,
    pub operator: FilterOperator,
    pub value: Option<Value>,
    pub value2: Option<Value>,
    pub values: Option<Vec<Value>>,
}

impl FilterSpec {
    pub fn new(stat: impl Into<String>, operator: FilterOperator) -> Self {
        Self {
            stat: stat.into(),
            operator,
            value: None,
            value2: None,
            values: None,
        }
    }

    pub fn compare(stat: impl Into<String>, operator: FilterOperator, value: impl Into<Value>) -> Self {
        Self {
            value: Some(value.into()),
            ..Self::new(stat, operator)
        }
    }

    pub fn gt(stat: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::compare(stat, FilterOperator::Gt, value)
    }

    pub fn lt(stat: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::compare(stat, FilterOperator::Lt, value)
    }

    pub fn eq(stat: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::compare(stat, FilterOperator::Eq, value)
    }

    pub fn between(stat: impl Into<String>, low: impl Into<Value>, high: impl Into<Value>) -> Self {
        Self {
            value: Some(low.into()),
            value2: Some(high.into()),
            ..Self::new(stat, FilterOperator::Between)
        }
    }

    pub fn one_of<V: Into<Value>>(stat: impl Into<String>, values: impl IntoIterator<Item = V>) -> Self {
        Self {
            values: Some(values.into_iter().map(Into::into).collect()),
            ..Self::new(stat, FilterOperator::In)
        }
    }

    /// Check that the fields the operator needs are present
    pub fn validate_shape(&self) -> Result<(), String> {
        let present = |v: &Option<Value>| v.as_ref().is_some_and(|v| !v.is_null());
        match self.operator {
            FilterOperator::Gt | FilterOperator::Lt | FilterOperator::Eq => {
                if !present(&self.value) {
                    return Err(format!("{} requires a value", self.operator.as_str()));
                }
            }
            FilterOperator::Between => {
                if !present(&self.value) || !present(&self.value2) {
                    return Err("BETWEEN requires value and value2".to_string());
                }
            }
            FilterOperator::In => {
                if self.values.is_none() {
                    return Err("IN requires a values list".to_string());
                }
            }
        }
        Ok(())
    }
}

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

impl SortDirection {
    pub fn as_sql(&self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

impl FromStr for SortDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "asc" | "ascending" => Ok(SortDirection::Asc),
            "desc" | "descending" => Ok(SortDirection::Desc),
            _ => Err(format!("unknown sort direction '{}'", s)),
        }
    }
}

/// Requested ordering
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SortSpec {
    pub column: String,
    pub direction: SortDirection,
}

impl SortSpec {
    pub fn new(column: impl Into<String>, direction: SortDirection) -> Self {
        Self {
            column: column.into(),
            direction,
        }
    }
}

/// A complete, typed report request
#[derive(Debug, Clone, PartialEq)]
pub struct ReportSpec {
    pub entity_kind: EntityKind,
    pub filters: Vec<FilterSpec>,
    /// `None` means every regular-season game
    pub scope: Option<ScopeSpec>,
    pub sort: Option<SortSpec>,
    /// `None` uses the configured default; larger values are clamped
    pub limit: Option<i64>,
    pub offset: Option<i64>,
    /// `None` lets the filter set decide
    pub mode: Option<ProjectionMode>,
    /// Season label such as `2023-24`
    pub season: Option<String>,
}

impl ReportSpec {
    pub fn new(entity_kind: EntityKind) -> Self {
        Self {
            entity_kind,
            filters: Vec::new(),
            scope: None,
            sort: None,
            limit: None,
            offset: None,
            mode: None,
            season: None,
        }
    }

    pub fn with_filter(mut self, filter: FilterSpec) -> Self {
        self.filters.push(filter);
        self
    }

    pub fn with_scope(mut self, scope: ScopeSpec) -> Self {
        self.scope = Some(scope);
        self
    }

    pub fn with_sort(mut self, sort: SortSpec) -> Self {
        self.sort = Some(sort);
        self
    }

    pub fn with_limit(mut self, limit: i64) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn with_offset(mut self, offset: i64) -> Self {
        self.offset = Some(offset);
        self
    }

    pub fn with_mode(mut self, mode: ProjectionMode) -> Self {
        self.mode = Some(mode);
        self
    }

    pub fn with_season(mut self, season: impl Into<String>) -> Self {
        self.season = Some(season.into());
        self
    }

    pub fn scope(&self) -> &ScopeSpec {
        self.scope.as_ref().unwrap_or(&ALL_GAMES)
    }

    /// Collect every error in the request
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        for (index, filter) in self.filters.iter().enumerate() {
            if let Err(message) = filter.validate_shape() {
                errors.push(format!("filter {} ({}): {}", index + 1, filter.stat, message));
            }
        }
        if let Err(other) = self.validate_settings() {
            errors.extend(other);
        }
        errors.into_result()
    }

    /// Scope, paging and season checks; filters are not inspected
    pub(crate) fn validate_settings(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        if let Err(scope_errors) = self.scope().validate() {
            errors.extend(scope_errors);
        }

        if let Some(limit) = self.limit {
            if limit < 1 {
                errors.push(format!("limit must be at least 1, got {}", limit));
            }
        }
        if let Some(offset) = self.offset {
            if offset < 0 {
                errors.push(format!("offset must not be negative, got {}", offset));
            }
        }
        if let Some(season) = &self.season {
            if !is_season_label(season) {
                errors.push(format!("season '{}' must look like 2023-24", season));
            }
        }

        errors.into_result()
    }
}

/// `YYYY-YY` where the second year follows the first
fn is_season_label(label: &str) -> bool {
    let Some((start, end)) = label.split_once('-') else {
        return false;
    };
    if start.len() != 4 || end.len() != 2 {
        return false;
    }
    match (start.parse::<u32>(), end.parse::<u32>()) {
        (Ok(start), Ok(end)) => (start + 1) % 100 == end,
        _ => false,
    }
}
