//! Outstanding-balance aggregation

use rust_decimal::Decimal;

use crate::models::{BalanceSummary, Split};

/// Fold a user's visible splits into their outstanding position.
///
/// Only unsettled splits count; settled splits are excluded entirely, so
/// this reports the outstanding balance, not lifetime volume. A self-split
/// (debtor == creditor) contributes to neither bucket. The result is a pure
/// function of the input set: no ordering dependency, no hidden state.
pub fn summarize<'a, I>(user_id: i64, splits: I) -> BalanceSummary
where
    I: IntoIterator<Item = &'a Split>,
{
    let mut total_owed = Decimal::ZERO;
    let mut total_owing = Decimal::ZERO;

    for split in splits {
        if split.settled || split.debtor_id == split.creditor_id {
            continue;
        }
        if split.debtor_id == user_id {
            total_owing += split.amount;
        } else if split.creditor_id == user_id {
            total_owed += split.amount;
        }
    }

    let net_balance = total_owed - total_owing;

    // Displayed totals are never negative.
    BalanceSummary {
        total_owed: total_owed.max(Decimal::ZERO),
        total_owing: total_owing.max(Decimal::ZERO),
        net_balance,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn split(id: i64, debtor: i64, creditor: i64, amount: Decimal, settled: bool) -> Split {
        Split {
            id,
            expense_id: 1,
            debtor_id: debtor,
            creditor_id: creditor,
            amount,
            settled,
        }
    }

    #[test]
    fn empty_input_is_all_zero() {
        let summary = summarize(1, []);
        assert_eq!(summary, BalanceSummary::default());
    }

    #[test]
    fn debts_and_credits_land_in_their_buckets() {
        let splits = vec![
            split(1, 1, 2, dec!(30.00), false),
            split(2, 3, 1, dec!(12.50), false),
        ];
        let summary = summarize(1, &splits);
        assert_eq!(summary.total_owing, dec!(30.00));
        assert_eq!(summary.total_owed, dec!(12.50));
        assert_eq!(summary.net_balance, dec!(-17.50));
    }

    #[test]
    fn self_split_is_neutral() {
        // Payer 1 splits 90 three ways including themselves; their own
        // share must appear in no bucket.
        let splits = vec![
            split(1, 1, 1, dec!(30.00), false),
            split(2, 2, 1, dec!(30.00), false),
            split(3, 3, 1, dec!(30.00), false),
        ];
        let summary = summarize(1, &splits);
        assert_eq!(summary.total_owed, dec!(60.00));
        assert_eq!(summary.total_owing, dec!(0.00));
    }

    #[test]
    fn settled_splits_are_excluded() {
        let splits = vec![
            split(1, 1, 2, dec!(50.00), true),
            split(2, 1, 2, dec!(20.00), false),
        ];
        let summary = summarize(1, &splits);
        assert_eq!(summary.total_owing, dec!(20.00));
        assert_eq!(summary.net_balance, dec!(-20.00));
    }

    #[test]
    fn splits_between_other_users_are_ignored() {
        let splits = vec![split(1, 2, 3, dec!(75.00), false)];
        let summary = summarize(1, &splits);
        assert_eq!(summary, BalanceSummary::default());
    }

    #[test]
    fn aggregation_is_order_independent() {
        let mut splits = vec![
            split(1, 1, 2, dec!(10.00), false),
            split(2, 2, 1, dec!(25.00), false),
            split(3, 1, 3, dec!(5.00), false),
        ];
        let forward = summarize(1, &splits);
        splits.reverse();
        let backward = summarize(1, &splits);
        assert_eq!(forward, backward);
    }

    #[test]
    fn repeated_aggregation_is_identical() {
        let splits = vec![
            split(1, 1, 2, dec!(33.34), false),
            split(2, 3, 1, dec!(33.33), false),
        ];
        assert_eq!(summarize(1, &splits), summarize(1, &splits));
    }
}
