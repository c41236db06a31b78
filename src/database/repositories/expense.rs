//! Expense repository implementation

use chrono::Utc;
use rust_decimal::Decimal;
use sqlx::PgPool;
use std::collections::HashMap;

use crate::models::expense::{CreateExpenseRequest, Expense, ExpenseWithSplits, Split};
use crate::utils::errors::SplitmateError;

#[derive(Debug, Clone)]
pub struct ExpenseRepository {
    pool: PgPool,
}

impl ExpenseRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create an expense together with its splits.
    ///
    /// One split row is written per participant, with the payer as creditor.
    /// Everything happens in one transaction: no expense is ever observable
    /// without its splits, and vice versa. `shares` must be positionally
    /// aligned with `request.participants`.
    pub async fn create_with_splits(
        &self,
        request: &CreateExpenseRequest,
        shares: &[Decimal],
    ) -> Result<ExpenseWithSplits, SplitmateError> {
        debug_assert_eq!(request.participants.len(), shares.len());

        let mut tx = self.pool.begin().await?;

        let expense = sqlx::query_as::<_, Expense>(
            r#"
            INSERT INTO expenses (group_id, paid_by, amount, description, category, date, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, group_id, paid_by, amount, description, category, date, created_at
            "#,
        )
        .bind(request.group_id)
        .bind(request.paid_by)
        .bind(request.amount)
        .bind(&request.description)
        .bind(request.category)
        .bind(request.date)
        .bind(Utc::now())
        .fetch_one(&mut *tx)
        .await?;

        let mut splits = Vec::with_capacity(request.participants.len());
        for (participant, share) in request.participants.iter().zip(shares) {
            let split = sqlx::query_as::<_, Split>(
                r#"
                INSERT INTO splits (expense_id, debtor_id, creditor_id, amount, settled)
                VALUES ($1, $2, $3, $4, FALSE)
                RETURNING id, expense_id, debtor_id, creditor_id, amount, settled
                "#,
            )
            .bind(expense.id)
            .bind(participant)
            .bind(request.paid_by)
            .bind(share)
            .fetch_one(&mut *tx)
            .await?;
            splits.push(split);
        }

        tx.commit().await?;

        Ok(ExpenseWithSplits { expense, splits })
    }

    /// Find expense by ID
    pub async fn find_by_id(&self, id: i64) -> Result<Option<Expense>, SplitmateError> {
        let expense = sqlx::query_as::<_, Expense>(
            "SELECT id, group_id, paid_by, amount, description, category, date, created_at FROM expenses WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(expense)
    }

    /// Delete an expense and its splits in one transaction
    pub async fn delete_with_splits(&self, expense_id: i64) -> Result<(), SplitmateError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM splits WHERE expense_id = $1")
            .bind(expense_id)
            .execute(&mut *tx)
            .await?;

        sqlx::query("DELETE FROM expenses WHERE id = $1")
            .bind(expense_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(())
    }

    /// List the expenses of the given groups with their splits, newest
    /// expense date first
    pub async fn list_for_groups(
        &self,
        group_ids: &[i64],
    ) -> Result<Vec<ExpenseWithSplits>, SplitmateError> {
        if group_ids.is_empty() {
            return Ok(vec![]);
        }

        let expenses = sqlx::query_as::<_, Expense>(
            r#"
            SELECT id, group_id, paid_by, amount, description, category, date, created_at
            FROM expenses
            WHERE group_id = ANY($1)
            ORDER BY date DESC
            "#,
        )
        .bind(group_ids)
        .fetch_all(&self.pool)
        .await?;

        self.attach_splits(expenses).await
    }

    /// List one group's expenses with their splits, newest date first
    pub async fn list_for_group(
        &self,
        group_id: i64,
    ) -> Result<Vec<ExpenseWithSplits>, SplitmateError> {
        let expenses = sqlx::query_as::<_, Expense>(
            r#"
            SELECT id, group_id, paid_by, amount, description, category, date, created_at
            FROM expenses
            WHERE group_id = $1
            ORDER BY date DESC
            "#,
        )
        .bind(group_id)
        .fetch_all(&self.pool)
        .await?;

        self.attach_splits(expenses).await
    }

    /// Splits belonging to one expense
    pub async fn splits_for_expense(&self, expense_id: i64) -> Result<Vec<Split>, SplitmateError> {
        let splits = sqlx::query_as::<_, Split>(
            "SELECT id, expense_id, debtor_id, creditor_id, amount, settled FROM splits WHERE expense_id = $1 ORDER BY id ASC",
        )
        .bind(expense_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(splits)
    }

    /// Fetch splits for the given expenses and stitch them onto each row,
    /// preserving the expense ordering.
    async fn attach_splits(
        &self,
        expenses: Vec<Expense>,
    ) -> Result<Vec<ExpenseWithSplits>, SplitmateError> {
        if expenses.is_empty() {
            return Ok(vec![]);
        }

        let expense_ids: Vec<i64> = expenses.iter().map(|e| e.id).collect();

        let splits = sqlx::query_as::<_, Split>(
            "SELECT id, expense_id, debtor_id, creditor_id, amount, settled FROM splits WHERE expense_id = ANY($1) ORDER BY id ASC",
        )
        .bind(&expense_ids)
        .fetch_all(&self.pool)
        .await?;

        let mut by_expense: HashMap<i64, Vec<Split>> = HashMap::new();
        for split in splits {
            by_expense.entry(split.expense_id).or_default().push(split);
        }

        Ok(expenses
            .into_iter()
            .map(|expense| {
                let splits = by_expense.remove(&expense.id).unwrap_or_default();
                ExpenseWithSplits { expense, splits }
            })
            .collect())
    }
}
