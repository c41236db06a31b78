//! Ledger scenario tests
//!
//! Exercises the pure ledger arithmetic end-to-end over the data model,
//! without a database: the same flows the services run, minus persistence.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use splitmate::ledger;
use splitmate::models::{BalanceSummary, Split};

/// Build the split rows the expense service would persist for an equally
/// divided expense.
fn generate_splits(payer: i64, participants: &[i64], amount: Decimal) -> Vec<Split> {
    let shares = ledger::split_equally(amount, participants.len(), 2).unwrap();
    participants
        .iter()
        .zip(shares)
        .enumerate()
        .map(|(i, (&debtor, share))| Split {
            id: i as i64 + 1,
            expense_id: 1,
            debtor_id: debtor,
            creditor_id: payer,
            amount: share,
            settled: false,
        })
        .collect()
}

#[test]
fn dinner_scenario_full_cycle() {
    // Group with members A (payer) and B. A creates "Dinner", amount 100,
    // split equally between both.
    let user_a = 1;
    let user_b = 2;
    let mut splits = generate_splits(user_a, &[user_a, user_b], dec!(100.00));

    assert_eq!(splits.len(), 2);
    assert_eq!(splits[0].amount, dec!(50.00));
    assert_eq!(splits[1].amount, dec!(50.00));

    // B owes 50; A's self-split is neutral, A is owed 50.
    let balance_b = ledger::summarize(user_b, &splits);
    assert_eq!(balance_b.total_owing, dec!(50.00));
    assert_eq!(balance_b.total_owed, dec!(0.00));
    assert_eq!(balance_b.net_balance, dec!(-50.00));

    let balance_a = ledger::summarize(user_a, &splits);
    assert_eq!(balance_a.total_owed, dec!(50.00));
    assert_eq!(balance_a.total_owing, dec!(0.00));

    // B settles their split; the next aggregation shows nothing outstanding.
    splits[1].settled = true;
    let balance_b = ledger::summarize(user_b, &splits);
    assert_eq!(balance_b, BalanceSummary::default());

    let balance_a = ledger::summarize(user_a, &splits);
    assert_eq!(balance_a, BalanceSummary::default());
}

#[test]
fn uneven_amount_still_sums_to_total() {
    let splits = generate_splits(1, &[1, 2, 3], dec!(100.00));

    let amounts: Vec<Decimal> = splits.iter().map(|s| s.amount).collect();
    assert_eq!(amounts, vec![dec!(33.34), dec!(33.33), dec!(33.33)]);

    let total: Decimal = amounts.iter().sum();
    assert_eq!(total, dec!(100.00));
}

#[test]
fn payer_share_never_reaches_a_balance_bucket() {
    // Payer 1 splits 90 three ways including themselves: the 30 self-share
    // appears in nobody's owed or owing totals.
    let splits = generate_splits(1, &[1, 2, 3], dec!(90.00));

    let payer_balance = ledger::summarize(1, &splits);
    assert_eq!(payer_balance.total_owed, dec!(60.00));
    assert_eq!(payer_balance.total_owing, dec!(0.00));

    let total_everyone_owes: Decimal = [1, 2, 3]
        .iter()
        .map(|&u| ledger::summarize(u, &splits).total_owing)
        .sum();
    assert_eq!(total_everyone_owes, dec!(60.00));
}

#[test]
fn settled_split_reduces_owing_without_other_effects() {
    let mut splits = generate_splits(1, &[2, 3], dec!(100.00));
    let before = ledger::summarize(2, &splits);
    assert_eq!(before.total_owing, dec!(50.00));

    splits[0].settled = true;

    let after = ledger::summarize(2, &splits);
    assert_eq!(after.total_owing, dec!(0.00));

    // The other debtor's position is untouched.
    let third = ledger::summarize(3, &splits);
    assert_eq!(third.total_owing, dec!(50.00));
}

#[test]
fn balances_are_zero_for_uninvolved_users() {
    let splits = generate_splits(1, &[1, 2], dec!(80.00));
    let outsider = ledger::summarize(99, &splits);
    assert_eq!(outsider, BalanceSummary::default());
    assert!(outsider.total_owed >= Decimal::ZERO);
    assert!(outsider.total_owing >= Decimal::ZERO);
}

#[test]
fn aggregation_is_stable_across_calls() {
    let splits = generate_splits(4, &[4, 5, 6, 7], dec!(123.45));
    let first = ledger::summarize(5, &splits);
    let second = ledger::summarize(5, &splits);
    assert_eq!(first, second);
}
