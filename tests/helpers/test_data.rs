//! Seed-data helpers for integration tests

use chrono::Utc;
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use splitmate::config::Settings;
use splitmate::models::{
    CreateExpenseRequest, CreateGroupRequest, ExpenseCategory, ExpenseWithSplits,
    GroupWithMembers, User,
};
use splitmate::{DatabaseService, Result, ServiceFactory};

/// A fully wired service stack over a test database, plus seeding shortcuts.
pub struct TestLedger {
    pub services: ServiceFactory,
    pub database: DatabaseService,
}

impl TestLedger {
    pub fn new(pool: PgPool) -> Self {
        let database = DatabaseService::new(pool);
        let services = ServiceFactory::new(database.clone(), Settings::default());
        Self { services, database }
    }

    /// Register a user under a fresh unique phone number
    pub async fn register_user(&self) -> Result<User> {
        self.services
            .user_service
            .authenticate(&unique_phone())
            .await
    }

    /// Create a group; the creator becomes its admin
    pub async fn create_group(&self, name: &str, creator_id: i64) -> Result<GroupWithMembers> {
        self.services
            .group_service
            .create_group(CreateGroupRequest {
                name: name.to_string(),
                description: None,
                creator_id,
            })
            .await
    }

    /// Create an equally split food expense dated now
    pub async fn create_expense(
        &self,
        group_id: i64,
        paid_by: i64,
        amount: Decimal,
        participants: Vec<i64>,
    ) -> Result<ExpenseWithSplits> {
        self.services
            .expense_service
            .create_expense(CreateExpenseRequest {
                group_id,
                paid_by,
                amount,
                description: "test expense".to_string(),
                category: ExpenseCategory::Food,
                date: Utc::now(),
                participants,
            })
            .await
    }
}

/// Generate a unique, well-formed phone number
pub fn unique_phone() -> String {
    let digits = Uuid::new_v4().as_u128() % 10_000_000_000;
    format!("+1{:010}", digits)
}
