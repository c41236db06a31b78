//! Database service layer
//!
//! This module provides a high-level interface to database operations

use crate::database::{
    DatabasePool, ExpenseRepository, GroupRepository, SettlementRepository, UserRepository,
};

/// Bundle of all entity repositories sharing one connection pool.
#[derive(Debug, Clone)]
pub struct DatabaseService {
    pub users: UserRepository,
    pub groups: GroupRepository,
    pub expenses: ExpenseRepository,
    pub settlements: SettlementRepository,
}

impl DatabaseService {
    pub fn new(pool: DatabasePool) -> Self {
        Self {
            users: UserRepository::new(pool.clone()),
            groups: GroupRepository::new(pool.clone()),
            expenses: ExpenseRepository::new(pool.clone()),
            settlements: SettlementRepository::new(pool),
        }
    }
}
