//! Arithmetic helpers with explicit zero guards.
//!
//! Results that would exceed the `Decimal` range saturate at `Decimal::MAX`
//! or `Decimal::MIN` instead of panicking.

use rust_decimal::{Decimal, RoundingStrategy};

use super::constants::HUNDRED;

/// Calculate mean of a slice of decimals.
pub fn mean(values: &[Decimal]) -> Option<Decimal> {
    if values.is_empty() {
        return None;
    }
    Some(saturating_sum(values.iter().copied()) / Decimal::from(values.len() as u64))
}

/// Sum that saturates at the `Decimal` bounds.
pub fn saturating_sum(values: impl IntoIterator<Item = Decimal>) -> Decimal {
    values
        .into_iter()
        .fold(Decimal::ZERO, Decimal::saturating_add)
}

/// `part / whole`, or zero when `whole` is zero.
///
/// An overflowing quotient saturates with the sign of the true result.
pub fn safe_div(part: Decimal, whole: Decimal) -> Decimal {
    if whole == Decimal::ZERO {
        return Decimal::ZERO;
    }
    part.checked_div(whole).unwrap_or_else(|| {
        if part.is_sign_negative() == whole.is_sign_negative() {
            Decimal::MAX
        } else {
            Decimal::MIN
        }
    })
}

/// `part / whole * 100`, or zero when `whole` is zero.
pub fn percent(part: Decimal, whole: Decimal) -> Decimal {
    safe_div(part, whole).saturating_mul(HUNDRED)
}

/// Round half away from zero to `dp` decimal places.
#[must_use]
pub fn round_dp(value: Decimal, dp: u32) -> Decimal {
    value.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero)
}
