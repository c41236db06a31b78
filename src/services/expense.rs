//! Expense service implementation
//!
//! Turns "expense of amount A paid by P, split among members" into the
//! expense row plus one split per participant, created atomically. Also
//! covers the listings and the payer-only delete.

use std::collections::HashSet;

use tracing::{debug, info, warn};

use crate::config::Settings;
use crate::database::repositories::{ExpenseRepository, GroupRepository};
use crate::ledger;
use crate::models::expense::{CreateExpenseRequest, ExpenseWithSplits};
use crate::utils::errors::{Result, SplitmateError};
use crate::utils::logging::log_ledger_mutation;

#[derive(Clone)]
pub struct ExpenseService {
    expense_repository: ExpenseRepository,
    group_repository: GroupRepository,
    settings: Settings,
}

impl ExpenseService {
    pub fn new(
        expense_repository: ExpenseRepository,
        group_repository: GroupRepository,
        settings: Settings,
    ) -> Self {
        Self {
            expense_repository,
            group_repository,
            settings,
        }
    }

    /// Create an expense and its splits.
    ///
    /// The amount is divided equally among the participants (remainder
    /// cents go to the front of the list); the payer is the creditor of
    /// every split. Payer and participants must all belong to the group.
    /// Expense and splits are committed together or not at all.
    pub async fn create_expense(&self, request: CreateExpenseRequest) -> Result<ExpenseWithSplits> {
        debug!(
            group_id = request.group_id,
            paid_by = request.paid_by,
            amount = %request.amount,
            "Creating expense"
        );

        if request.description.trim().is_empty() {
            return Err(SplitmateError::Validation(
                "description must not be empty".to_string(),
            ));
        }

        if request.participants.is_empty() {
            return Err(SplitmateError::Validation(
                "an expense needs at least one participant".to_string(),
            ));
        }
        if request.participants.len() > self.settings.ledger.max_participants {
            return Err(SplitmateError::Validation(format!(
                "too many participants: {} (limit {})",
                request.participants.len(),
                self.settings.ledger.max_participants
            )));
        }

        let unique: HashSet<i64> = request.participants.iter().copied().collect();
        if unique.len() != request.participants.len() {
            return Err(SplitmateError::Validation(
                "participant list contains duplicates".to_string(),
            ));
        }

        self.group_repository
            .find_by_id(request.group_id)
            .await?
            .ok_or(SplitmateError::GroupNotFound {
                group_id: request.group_id,
            })?;

        let members: HashSet<i64> = self
            .group_repository
            .get_members(request.group_id)
            .await?
            .into_iter()
            .map(|m| m.user_id)
            .collect();

        if !members.contains(&request.paid_by) {
            warn!(
                group_id = request.group_id,
                paid_by = request.paid_by,
                "Rejecting expense from non-member payer"
            );
            return Err(SplitmateError::Validation(format!(
                "payer {} is not a member of group {}",
                request.paid_by, request.group_id
            )));
        }
        for participant in &request.participants {
            if !members.contains(participant) {
                return Err(SplitmateError::Validation(format!(
                    "user {} is not a member of group {}",
                    participant, request.group_id
                )));
            }
        }

        let shares = ledger::split_equally(
            request.amount,
            request.participants.len(),
            self.settings.ledger.currency_scale,
        )?;

        let created = self
            .expense_repository
            .create_with_splits(&request, &shares)
            .await?;

        let amount = request.amount.to_string();
        log_ledger_mutation(
            "create_expense",
            request.group_id,
            request.paid_by,
            Some(amount.as_str()),
        );
        info!(
            expense_id = created.expense.id,
            split_count = created.splits.len(),
            "Expense created with splits"
        );

        Ok(created)
    }

    /// All expenses visible to the user (member of the expense's group),
    /// with their splits, newest date first
    pub async fn list_expenses_for_user(&self, user_id: i64) -> Result<Vec<ExpenseWithSplits>> {
        let group_ids = self.group_repository.group_ids_for_user(user_id).await?;
        self.expense_repository.list_for_groups(&group_ids).await
    }

    /// One group's expenses; the caller must be a member
    pub async fn list_group_expenses(
        &self,
        group_id: i64,
        caller_id: i64,
    ) -> Result<Vec<ExpenseWithSplits>> {
        self.group_repository
            .find_by_id(group_id)
            .await?
            .ok_or(SplitmateError::GroupNotFound { group_id })?;

        if !self.group_repository.is_member(group_id, caller_id).await? {
            return Err(SplitmateError::PermissionDenied(
                "You are not a member of this group".to_string(),
            ));
        }

        self.expense_repository.list_for_group(group_id).await
    }

    /// Delete an expense and its splits. Only the payer may delete.
    pub async fn delete_expense(&self, expense_id: i64, caller_id: i64) -> Result<()> {
        let expense = self
            .expense_repository
            .find_by_id(expense_id)
            .await?
            .ok_or(SplitmateError::ExpenseNotFound { expense_id })?;

        if expense.paid_by != caller_id {
            return Err(SplitmateError::PermissionDenied(
                "Only the payer can delete an expense".to_string(),
            ));
        }

        self.expense_repository.delete_with_splits(expense_id).await?;

        log_ledger_mutation("delete_expense", expense.group_id, caller_id, None);
        Ok(())
    }
}
