use serde::Deserialize;
use serde_json::Value;

/// Filter as it arrives from the request layer
#[derive(Debug, Deserialize, Clone, Default)]
pub struct DataFilter {
    pub stat: String,
    /// GT, LT, EQ, BETWEEN or IN (case-insensitive)
    pub operator: String,
    #[serde(default)]
    pub value: Option<Value>,
    #[serde(default)]
    pub value2: Option<Value>,
    #[serde(default)]
    pub values: Option<Vec<Value>>,
}

/// Scope ("organizer") as it arrives from the request layer.
///
/// Which fields are read depends on `type`: `n` for lastN/lastPeriod,
/// `from`/`to` for gameRange (game ordinals) and dateRange (ISO dates),
/// `side` for homeAway, `unit` for lastPeriod.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct ScopeRequest {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub n: Option<Value>,
    #[serde(default)]
    pub from: Option<Value>,
    #[serde(default)]
    pub to: Option<Value>,
    #[serde(default)]
    pub side: Option<String>,
    #[serde(default)]
    pub unit: Option<String>,
}

/// Requested ordering
#[derive(Debug, Deserialize, Clone, Default)]
pub struct SortRequest {
    pub column: String,
    #[serde(default)]
    pub direction: Option<String>,
}

/// Request body for report queries
///
/// Everything is loosely typed here; the resolver turns it into a
/// `ReportSpec` and reports every violation at once.
#[derive(Debug, Deserialize, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct ReportRequest {
    #[serde(alias = "entity")]
    pub entity_kind: String,
    #[serde(default)]
    pub filters: Vec<DataFilter>,
    #[serde(default)]
    pub scope: Option<ScopeRequest>,
    #[serde(default)]
    pub sort: Option<SortRequest>,
    #[serde(default)]
    pub limit: Option<i64>,
    #[serde(default)]
    pub offset: Option<i64>,
    #[serde(default)]
    pub mode: Option<String>,
    #[serde(default)]
    pub season: Option<String>,
}
