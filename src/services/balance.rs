//! Balance service implementation
//!
//! Computes a user's outstanding position on demand. Nothing is cached:
//! the result depends on the current settled state of every split, so each
//! call re-reads and re-folds.

use tracing::debug;

use crate::database::repositories::{ExpenseRepository, GroupRepository};
use crate::ledger;
use crate::models::BalanceSummary;
use crate::utils::errors::Result;

#[derive(Clone)]
pub struct BalanceService {
    expense_repository: ExpenseRepository,
    group_repository: GroupRepository,
}

impl BalanceService {
    pub fn new(expense_repository: ExpenseRepository, group_repository: GroupRepository) -> Self {
        Self {
            expense_repository,
            group_repository,
        }
    }

    /// Aggregate every unsettled split visible to the user into
    /// `{ total_owed, total_owing, net_balance }`.
    ///
    /// Always succeeds; a user with no groups or no expenses gets the
    /// all-zero summary.
    pub async fn compute_for_user(&self, user_id: i64) -> Result<BalanceSummary> {
        let group_ids = self.group_repository.group_ids_for_user(user_id).await?;
        let expenses = self.expense_repository.list_for_groups(&group_ids).await?;

        let summary = ledger::summarize(
            user_id,
            expenses.iter().flat_map(|expense| expense.splits.iter()),
        );

        debug!(
            user_id = user_id,
            total_owed = %summary.total_owed,
            total_owing = %summary.total_owing,
            net_balance = %summary.net_balance,
            "Computed balance summary"
        );

        Ok(summary)
    }
}
