//! Ledger arithmetic
//!
//! Pure functions over the data model: dividing an expense into per-member
//! shares and folding splits into a user's net position. Everything here is
//! deterministic and free of I/O so the services can be exercised without a
//! database.

pub mod balance;
pub mod split;

pub use balance::summarize;
pub use split::{split_equally, validate_amount};
