//! Expense and split models

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Expense category, matching the fixed set offered by the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "expense_category")]
pub enum ExpenseCategory {
    #[sqlx(rename = "FOOD")]
    #[serde(rename = "FOOD")]
    Food,
    #[sqlx(rename = "TRANSPORT")]
    #[serde(rename = "TRANSPORT")]
    Transport,
    #[sqlx(rename = "SHOPPING")]
    #[serde(rename = "SHOPPING")]
    Shopping,
    #[sqlx(rename = "ENTERTAINMENT")]
    #[serde(rename = "ENTERTAINMENT")]
    Entertainment,
    #[sqlx(rename = "UTILITIES")]
    #[serde(rename = "UTILITIES")]
    Utilities,
    #[sqlx(rename = "RENT")]
    #[serde(rename = "RENT")]
    Rent,
    #[sqlx(rename = "OTHER")]
    #[serde(rename = "OTHER")]
    Other,
}

/// A shared expense fronted by one payer on behalf of a group.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Expense {
    pub id: i64,
    pub group_id: i64,
    /// The user who fronted the money; creditor of every generated split.
    pub paid_by: i64,
    pub amount: Decimal,
    pub description: String,
    pub category: ExpenseCategory,
    pub date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

/// One debtor -> creditor obligation generated from an expense.
///
/// Lifecycle is one-way: `settled` starts false and flips to true exactly
/// once, when a settlement covers the split.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Split {
    pub id: i64,
    pub expense_id: i64,
    pub debtor_id: i64,
    pub creditor_id: i64,
    pub amount: Decimal,
    pub settled: bool,
}

/// An expense together with its split rows, as returned by the listings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExpenseWithSplits {
    #[serde(flatten)]
    pub expense: Expense,
    pub splits: Vec<Split>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateExpenseRequest {
    pub group_id: i64,
    pub paid_by: i64,
    pub amount: Decimal,
    pub description: String,
    pub category: ExpenseCategory,
    pub date: DateTime<Utc>,
    /// Users the expense is divided among; may or may not include the payer.
    pub participants: Vec<i64>,
}
