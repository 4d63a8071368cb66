//! Expression types for the report plan

use std::fmt;

/// A column reference
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    /// Table name or alias
    pub table: String,
    /// Column name
    pub name: String,
}

impl Column {
    pub fn new(table: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            name: name.into(),
        }
    }

    /// Fully qualified name: table.column
    pub fn qualified_name(&self) -> String {
        if self.table.is_empty() {
            self.name.clone()
        } else {
            format!("{}.{}", self.table, self.name)
        }
    }
}

/// SQL evaluated over a group of scoped game rows: an aggregate call, or a
/// grouping key that is constant within the group.
///
/// Only the stat registry can build one, so a raw per-game column can never
/// reach a post-aggregation predicate or an ORDER BY.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AggregateExpr(String);

impl AggregateExpr {
    pub(crate) fn new(sql: String) -> Self {
        Self(sql)
    }

    pub fn as_sql(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AggregateExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A numbered bind placeholder (`$k`, 1-based)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Placeholder(usize);

impl Placeholder {
    pub(crate) fn new(index: usize) -> Self {
        Self(index)
    }

    pub fn index(&self) -> usize {
        self.0
    }
}

impl fmt::Display for Placeholder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${}", self.0)
    }
}

/// Single-parameter comparison operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComparisonOp {
    Gt,
    Lt,
    Eq,
}

impl ComparisonOp {
    pub fn as_str(&self) -> &'static str {
        match self {
            ComparisonOp::Gt => ">",
            ComparisonOp::Lt => "<",
            ComparisonOp::Eq => "=",
        }
    }
}

/// A condition evaluated after grouping (HAVING)
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    /// `expr OP $k`
    Compare {
        expr: AggregateExpr,
        op: ComparisonOp,
        param: Placeholder,
    },
    /// `expr BETWEEN $k AND $k+1`, bounds in the order given
    Between {
        expr: AggregateExpr,
        low: Placeholder,
        high: Placeholder,
    },
    /// `expr IN ($k, ...)`, never empty
    In {
        expr: AggregateExpr,
        params: Vec<Placeholder>,
    },
}

impl Predicate {
    pub fn expr(&self) -> &AggregateExpr {
        match self {
            Predicate::Compare { expr, .. } => expr,
            Predicate::Between { expr, .. } => expr,
            Predicate::In { expr, .. } => expr,
        }
    }

    /// Placeholders referenced by this predicate, in text order
    pub fn placeholders(&self) -> Vec<Placeholder> {
        match self {
            Predicate::Compare { param, .. } => vec![*param],
            Predicate::Between { low, high, .. } => vec![*low, *high],
            Predicate::In { params, .. } => params.clone(),
        }
    }
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Predicate::Compare { expr, op, param } => write!(f, "{} {} {}", expr, op.as_str(), param),
            Predicate::Between { expr, low, high } => write!(f, "{} BETWEEN {} AND {}", expr, low, high),
            Predicate::In { expr, params } => {
                let list: Vec<String> = params.iter().map(|p| p.to_string()).collect();
                write!(f, "{} IN ({})", expr, list.join(", "))
            }
        }
    }
}
