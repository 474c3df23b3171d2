use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, FromRow)]
pub struct ItemAverage {
    pub itemid: i64,
    pub avg_price: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, FromRow)]
pub struct TitledAverage {
    pub title: String,
    pub avg_price: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, FromRow)]
pub struct CustomerTotal {
    pub firstname: String,
    pub total: f64,
}

/// One line of `EXPLAIN QUERY PLAN` output. The wording of `detail` is
/// SQLite-version specific.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, FromRow)]
pub struct QueryPlanStep {
    pub id: i64,
    pub parent: i64,
    pub detail: String,
}
