//! Services module
//!
//! This module contains business logic services

pub mod balance;
pub mod expense;
pub mod group;
pub mod settlement;
pub mod user;

// Re-export commonly used services
pub use balance::BalanceService;
pub use expense::ExpenseService;
pub use group::GroupService;
pub use settlement::SettlementService;
pub use user::UserService;

use crate::config::Settings;
use crate::database::DatabaseService;

/// Service factory for creating and managing all services
#[derive(Clone)]
pub struct ServiceFactory {
    pub user_service: UserService,
    pub group_service: GroupService,
    pub expense_service: ExpenseService,
    pub settlement_service: SettlementService,
    pub balance_service: BalanceService,
}

impl ServiceFactory {
    /// Create a new ServiceFactory with all services initialized
    pub fn new(database: DatabaseService, settings: Settings) -> Self {
        let user_service = UserService::new(database.users.clone());
        let group_service = GroupService::new(database.groups.clone(), database.users.clone());
        let expense_service = ExpenseService::new(
            database.expenses.clone(),
            database.groups.clone(),
            settings.clone(),
        );
        let settlement_service = SettlementService::new(
            database.settlements.clone(),
            database.groups.clone(),
            settings,
        );
        let balance_service = BalanceService::new(database.expenses, database.groups);

        Self {
            user_service,
            group_service,
            expense_service,
            settlement_service,
            balance_service,
        }
    }
}
