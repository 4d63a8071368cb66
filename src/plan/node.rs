//! Plan node types

use crate::query::{GameSide, PeriodUnit, SortDirection};
use super::expr::{AggregateExpr, Column, Placeholder, Predicate};

/// Name of the common table expression holding the in-scope games
pub const SCOPE_RELATION: &str = "scoped_games";

/// Alias under which the scope relation is joined
pub const SCOPE_ALIAS: &str = "sc";

/// A fully assembled report query, ready for emission
#[derive(Debug, Clone)]
pub struct ReportPlan {
    /// In-scope (entity, game) pairs
    pub scope: ScopeRelation,
    /// Joins onto the scope relation, entity table first
    pub joins: Vec<Join>,
    /// GROUP BY columns
    pub group_by: Vec<Column>,
    /// SELECT list
    pub projections: Vec<Projection>,
    /// Post-aggregation conjunction (HAVING)
    pub having: Vec<Predicate>,
    /// ORDER BY keys
    pub order_by: Vec<SortKey>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// A table with the alias it is referenced by
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRef {
    pub table: String,
    pub alias: String,
}

impl TableRef {
    pub fn new(table: impl Into<String>, alias: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            alias: alias.into(),
        }
    }
}

/// Join type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinType {
    Inner,
    Left,
}

/// Join one table onto the relation built so far
#[derive(Debug, Clone)]
pub struct Join {
    pub join_type: JoinType,
    pub table: TableRef,
    /// Equality conditions, ANDed
    pub on: Vec<(Column, Column)>,
}

/// A projected expression with its output alias
#[derive(Debug, Clone)]
pub struct Projection {
    pub expr: AggregateExpr,
    /// Output column name
    pub alias: &'static str,
}

/// A sort key with direction
#[derive(Debug, Clone)]
pub struct SortKey {
    pub expr: AggregateExpr,
    pub direction: SortDirection,
    pub nulls_last: bool,
}

/// The sub-relation of in-scope (entity_id, game_id) pairs
#[derive(Debug, Clone)]
pub struct ScopeRelation {
    pub base: BaseRelation,
    pub window: ScopeWindow,
}

/// Every regular-season game an entity took part in
///
/// Participation means a row in the base (traditional) per-game table.
#[derive(Debug, Clone)]
pub struct BaseRelation {
    /// Base per-game table, referenced as `s`
    pub stats_table: String,
    /// Entity key column on `stats_table`
    pub entity_column: &'static str,
    /// Games table, referenced as `g`
    pub games_table: String,
    /// Literal game type kept (regular season)
    pub game_type: String,
    pub season: SeasonBound,
}

/// Which season the base relation keeps
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeasonBound {
    /// Every season
    Any,
    /// The season bound to this placeholder
    Param(Placeholder),
    /// The most recent regular season in the games table
    Latest,
}

impl SeasonBound {
    pub fn placeholder(&self) -> Option<Placeholder> {
        match self {
            SeasonBound::Param(p) => Some(*p),
            _ => None,
        }
    }
}

/// The rule narrowing the base relation
#[derive(Debug, Clone, PartialEq)]
pub enum ScopeWindow {
    /// No narrowing
    All,
    /// Rank games newest first per entity, keep rank <= count
    Newest { count: Placeholder },
    /// Rank games oldest first per entity, keep rank in from..=to
    Ordinal { from: Placeholder, to: Placeholder },
    /// Games on one side of the court
    Side(GameSide),
    /// Games within `amount` units of the latest regular-season game date
    Since {
        /// Season bound of the latest-date lookup, when the request has one
        season: Option<Placeholder>,
        amount: Placeholder,
        unit: PeriodUnit,
    },
    /// Closed calendar interval
    Dates { from: Placeholder, to: Placeholder },
}

impl ScopeWindow {
    /// Whether games are ranked per entity before filtering
    pub fn is_ranked(&self) -> bool {
        matches!(self, ScopeWindow::Newest { .. } | ScopeWindow::Ordinal { .. })
    }
}
