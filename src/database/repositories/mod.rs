//! Database repositories module
//!
//! This module contains all repository implementations for data access

pub mod expense;
pub mod group;
pub mod settlement;
pub mod user;

// Re-export repositories
pub use expense::ExpenseRepository;
pub use group::GroupRepository;
pub use settlement::SettlementRepository;
pub use user::UserRepository;
