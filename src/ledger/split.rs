//! Equal division of an expense amount into per-member shares

use rust_decimal::{Decimal, RoundingStrategy};

use crate::utils::errors::{Result, SplitmateError};

/// Check that an amount is positive and carries no sub-unit precision.
pub fn validate_amount(amount: Decimal, scale: u32) -> Result<()> {
    if amount <= Decimal::ZERO {
        return Err(SplitmateError::Validation(
            "amount must be positive".to_string(),
        ));
    }

    if amount.round_dp(scale) != amount {
        return Err(SplitmateError::Validation(format!(
            "amount has more than {} decimal places",
            scale
        )));
    }

    Ok(())
}

/// Divide `amount` equally among `participants` members.
///
/// Each share is the truncated equal part; the leftover currency units are
/// handed out one per member from the front of the list, so the shares
/// always sum to exactly `amount` and differ by at most one unit.
/// 100.00 over three members yields 33.34, 33.33, 33.33.
pub fn split_equally(amount: Decimal, participants: usize, scale: u32) -> Result<Vec<Decimal>> {
    validate_amount(amount, scale)?;

    if participants == 0 {
        return Err(SplitmateError::Validation(
            "at least one participant is required".to_string(),
        ));
    }

    let count = Decimal::from(participants as u64);
    let base = (amount / count).round_dp_with_strategy(scale, RoundingStrategy::ToZero);
    let unit = Decimal::new(1, scale);

    let mut shares = vec![base; participants];
    let mut remainder = amount - base * count;
    for share in shares.iter_mut() {
        if remainder < unit {
            break;
        }
        *share += unit;
        remainder -= unit;
    }
    debug_assert!(remainder.is_zero());

    Ok(shares)
}
