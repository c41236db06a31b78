//! Error handling for splitmate
//!
//! This module defines the main error types used throughout the ledger core
//! and provides a unified error handling strategy. The API boundary maps
//! each variant onto a response status: `Validation` -> client error,
//! `PermissionDenied` -> forbidden, the `*NotFound` variants -> not found,
//! everything else -> internal error.

use thiserror::Error;

/// Main error type for the splitmate ledger core
#[derive(Error, Debug)]
pub enum SplitmateError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Database migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("User not found: {user_id}")]
    UserNotFound { user_id: i64 },

    #[error("Group not found: {group_id}")]
    GroupNotFound { group_id: i64 },

    #[error("Expense not found: {expense_id}")]
    ExpenseNotFound { expense_id: i64 },

    #[error("Split not found: {split_id}")]
    SplitNotFound { split_id: i64 },

    #[error("Settlement not found: {settlement_id}")]
    SettlementNotFound { settlement_id: i64 },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for splitmate operations
pub type Result<T> = std::result::Result<T, SplitmateError>;

impl SplitmateError {
    /// Check if the error is recoverable by retrying the operation
    pub fn is_recoverable(&self) -> bool {
        match self {
            SplitmateError::Database(_) => false,
            SplitmateError::Migration(_) => false,
            SplitmateError::Config(_) => false,
            SplitmateError::Validation(_) => false,
            SplitmateError::PermissionDenied(_) => false,
            SplitmateError::UserNotFound { .. } => false,
            SplitmateError::GroupNotFound { .. } => false,
            SplitmateError::ExpenseNotFound { .. } => false,
            SplitmateError::SplitNotFound { .. } => false,
            SplitmateError::SettlementNotFound { .. } => false,
            SplitmateError::Serialization(_) => false,
            SplitmateError::Io(_) => true,
        }
    }

    /// Whether this error is caused by the caller rather than the system
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            SplitmateError::Validation(_)
                | SplitmateError::PermissionDenied(_)
                | SplitmateError::UserNotFound { .. }
                | SplitmateError::GroupNotFound { .. }
                | SplitmateError::ExpenseNotFound { .. }
                | SplitmateError::SplitNotFound { .. }
                | SplitmateError::SettlementNotFound { .. }
        )
    }

    /// Get error severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            SplitmateError::Database(_) => ErrorSeverity::Critical,
            SplitmateError::Migration(_) => ErrorSeverity::Critical,
            SplitmateError::Config(_) => ErrorSeverity::Critical,
            SplitmateError::PermissionDenied(_) => ErrorSeverity::Warning,
            SplitmateError::Validation(_) => ErrorSeverity::Info,
            SplitmateError::UserNotFound { .. }
            | SplitmateError::GroupNotFound { .. }
            | SplitmateError::ExpenseNotFound { .. }
            | SplitmateError::SplitNotFound { .. }
            | SplitmateError::SettlementNotFound { .. } => ErrorSeverity::Info,
            _ => ErrorSeverity::Error,
        }
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Info,
    Warning,
    Error,
    Critical,
}

impl std::fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorSeverity::Info => write!(f, "INFO"),
            ErrorSeverity::Warning => write!(f, "WARN"),
            ErrorSeverity::Error => write!(f, "ERROR"),
            ErrorSeverity::Critical => write!(f, "CRITICAL"),
        }
    }
}
