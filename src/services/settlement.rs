//! Settlement service implementation
//!
//! Records append-only settlement entries. A settlement either covers a set
//! of splits (which flip to settled in the same transaction) or is a manual
//! ledger entry with no split linkage.

use tracing::debug;

use crate::config::Settings;
use crate::database::repositories::{GroupRepository, SettlementRepository};
use crate::ledger;
use crate::models::settlement::{CreateSettlementRequest, Settlement};
use crate::utils::errors::{Result, SplitmateError};
use crate::utils::logging::log_ledger_mutation;

#[derive(Clone)]
pub struct SettlementService {
    settlement_repository: SettlementRepository,
    group_repository: GroupRepository,
    settings: Settings,
}

impl SettlementService {
    pub fn new(
        settlement_repository: SettlementRepository,
        group_repository: GroupRepository,
        settings: Settings,
    ) -> Self {
        Self {
            settlement_repository,
            group_repository,
            settings,
        }
    }

    /// Record a settlement.
    ///
    /// When split ids are given, all of them must resolve to unsettled
    /// splits of the settlement's group; they are marked settled together
    /// with the insert, atomically. Covering an already-settled split is a
    /// validation error, so a payment can never be double-applied.
    pub async fn record_settlement(&self, request: CreateSettlementRequest) -> Result<Settlement> {
        debug!(
            group_id = request.group_id,
            from_id = request.from_id,
            amount = %request.amount,
            "Recording settlement"
        );

        ledger::validate_amount(request.amount, self.settings.ledger.currency_scale)?;

        self.group_repository
            .find_by_id(request.group_id)
            .await?
            .ok_or(SplitmateError::GroupNotFound {
                group_id: request.group_id,
            })?;

        if !self
            .group_repository
            .is_member(request.group_id, request.from_id)
            .await?
        {
            return Err(SplitmateError::Validation(format!(
                "user {} is not a member of group {}",
                request.from_id, request.group_id
            )));
        }

        let settlement = self.settlement_repository.record(&request).await?;

        let amount = settlement.amount.to_string();
        log_ledger_mutation(
            "record_settlement",
            settlement.group_id,
            settlement.from_id,
            Some(amount.as_str()),
        );

        Ok(settlement)
    }

    /// All settlements in the user's groups, newest first
    pub async fn list_settlements_for_user(&self, user_id: i64) -> Result<Vec<Settlement>> {
        let group_ids = self.group_repository.group_ids_for_user(user_id).await?;
        self.settlement_repository.list_for_groups(&group_ids).await
    }
}
