//! Decimal constants for metric calculations.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

pub const TWO: Decimal = Decimal::TWO;
pub const HUNDRED: Decimal = Decimal::ONE_HUNDRED;
pub const BPS_PER_UNIT: Decimal = dec!(10000);
pub const MINUTES_PER_HOUR: Decimal = dec!(60);
pub const MINUTES_PER_DAY: Decimal = dec!(1440);
pub const MS_PER_SECOND: Decimal = dec!(1000);

/// Quality score reported when the execution bar has zero range.
pub const NEUTRAL_QUALITY_SCORE: u32 = 50;
/// Upper bound of the quality score.
pub const MAX_QUALITY_SCORE: Decimal = HUNDRED;

/// Decimal places kept for currency-like and bps outputs.
pub const MONEY_DP: u32 = 2;
