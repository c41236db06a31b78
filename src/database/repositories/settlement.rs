//! Settlement repository implementation

use chrono::Utc;
use rust_decimal::Decimal;
use sqlx::PgPool;

use crate::models::settlement::{CreateSettlementRequest, Settlement};
use crate::utils::errors::SplitmateError;

/// Row shape used while validating the splits a settlement covers.
#[derive(Debug, sqlx::FromRow)]
struct CoveredSplit {
    id: i64,
    amount: Decimal,
    settled: bool,
    group_id: i64,
}

#[derive(Debug, Clone)]
pub struct SettlementRepository {
    pool: PgPool,
}

impl SettlementRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Record a settlement and mark the covered splits settled.
    ///
    /// Runs as one transaction. When split ids are given, every id must
    /// resolve to a split of an expense in the settlement's group, and every
    /// split must still be unsettled; otherwise nothing is written. The
    /// split rows are locked while the settlement is inserted, so two
    /// settlements racing for the same split cannot both commit.
    pub async fn record(
        &self,
        request: &CreateSettlementRequest,
    ) -> Result<Settlement, SplitmateError> {
        let split_ids: &[i64] = match &request.split_ids {
            Some(ids) if !ids.is_empty() => ids.as_slice(),
            _ => &[],
        };

        let mut tx = self.pool.begin().await?;

        if !split_ids.is_empty() {
            let covered = sqlx::query_as::<_, CoveredSplit>(
                r#"
                SELECT s.id, s.amount, s.settled, e.group_id
                FROM splits s
                INNER JOIN expenses e ON e.id = s.expense_id
                WHERE s.id = ANY($1)
                FOR UPDATE OF s
                "#,
            )
            .bind(split_ids)
            .fetch_all(&mut *tx)
            .await?;

            for &split_id in split_ids {
                if !covered.iter().any(|row| row.id == split_id) {
                    return Err(SplitmateError::SplitNotFound { split_id });
                }
            }

            for row in &covered {
                if row.group_id != request.group_id {
                    return Err(SplitmateError::Validation(format!(
                        "split {} does not belong to group {}",
                        row.id, request.group_id
                    )));
                }
                if row.settled {
                    return Err(SplitmateError::Validation(format!(
                        "split {} is already settled",
                        row.id
                    )));
                }
            }

            // The recorded amount is not required to match the covered
            // total, but a mismatch is worth an audit-trail entry.
            let covered_total: Decimal = covered.iter().map(|row| row.amount).sum();
            if covered_total != request.amount {
                tracing::warn!(
                    group_id = request.group_id,
                    settlement_amount = %request.amount,
                    covered_total = %covered_total,
                    "Settlement amount differs from the total of its covered splits"
                );
            }
        }

        let settlement = sqlx::query_as::<_, Settlement>(
            r#"
            INSERT INTO settlements (group_id, from_id, amount, description, date)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, group_id, from_id, amount, description, date
            "#,
        )
        .bind(request.group_id)
        .bind(request.from_id)
        .bind(request.amount)
        .bind(&request.description)
        .bind(Utc::now())
        .fetch_one(&mut *tx)
        .await?;

        if !split_ids.is_empty() {
            for &split_id in split_ids {
                sqlx::query(
                    "INSERT INTO settlement_splits (settlement_id, split_id) VALUES ($1, $2)",
                )
                .bind(settlement.id)
                .bind(split_id)
                .execute(&mut *tx)
                .await?;
            }

            sqlx::query("UPDATE splits SET settled = TRUE WHERE id = ANY($1)")
                .bind(split_ids)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;

        Ok(settlement)
    }

    /// List the settlements of the given groups, newest first
    pub async fn list_for_groups(
        &self,
        group_ids: &[i64],
    ) -> Result<Vec<Settlement>, SplitmateError> {
        if group_ids.is_empty() {
            return Ok(vec![]);
        }

        let settlements = sqlx::query_as::<_, Settlement>(
            r#"
            SELECT id, group_id, from_id, amount, description, date
            FROM settlements
            WHERE group_id = ANY($1)
            ORDER BY date DESC
            "#,
        )
        .bind(group_ids)
        .fetch_all(&self.pool)
        .await?;

        Ok(settlements)
    }

    /// IDs of the splits a settlement covers
    pub async fn covered_split_ids(&self, settlement_id: i64) -> Result<Vec<i64>, SplitmateError> {
        let rows: Vec<(i64,)> = sqlx::query_as(
            "SELECT split_id FROM settlement_splits WHERE settlement_id = $1 ORDER BY split_id ASC",
        )
        .bind(settlement_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(|(id,)| id).collect())
    }
}
