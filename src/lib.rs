//! Splitmate ledger core
//!
//! Backend core of a group expense splitting application: users form
//! groups, log shared expenses, the system divides each expense into
//! per-member splits, and members record settlements to pay their debts
//! down. This library owns the data model, the persistence layer and the
//! ledger arithmetic; the HTTP surface on top of it lives elsewhere.

pub mod config;
pub mod database;
pub mod ledger;
pub mod models;
pub mod services;
pub mod utils;

// Re-export commonly used types
pub use config::Settings;
pub use utils::errors::{Result, SplitmateError};

// Re-export main components for easy access
pub use database::DatabaseService;
pub use services::ServiceFactory;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Get library information
pub fn info() -> String {
    format!("{} v{}", NAME, VERSION)
}
