//! Settlement model

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// An append-only ledger entry recording that a user paid down debt in a
/// group. Immutable once recorded; removed only when its group is deleted.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Settlement {
    pub id: i64,
    pub group_id: i64,
    pub from_id: i64,
    pub amount: Decimal,
    pub description: Option<String>,
    pub date: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateSettlementRequest {
    pub group_id: i64,
    pub from_id: i64,
    pub amount: Decimal,
    pub description: Option<String>,
    /// Splits this settlement covers. `None` or an empty list records a
    /// manual settlement that changes no split state.
    pub split_ids: Option<Vec<i64>>,
}
