//! Balance summary model

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A user's net position across all groups they belong to, derived from
/// outstanding (unsettled) splits only.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceSummary {
    /// Total other members owe this user.
    pub total_owed: Decimal,
    /// Total this user owes other members.
    pub total_owing: Decimal,
    /// `total_owed - total_owing`; negative when the user is a net debtor.
    pub net_balance: Decimal,
}
