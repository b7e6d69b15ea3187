//! Tagged metric value for ratios that can be infinite or undefined.

use std::cmp::Ordering;
use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::math::safe_div;

/// A metric that is either a finite number or one of two sentinels.
///
/// Serialises as `{"kind": "finite", "value": "2.5"}`, `{"kind": "undefined"}`
/// or `{"kind": "positive_infinite"}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum MetricValue {
    /// A real, finite value.
    Finite(Decimal),
    /// Both numerator and denominator are empty (e.g. no trades at all).
    Undefined,
    /// Denominator is zero with a positive numerator, or "no data" for a
    /// minimum over an empty set.
    PositiveInfinite,
}

impl MetricValue {
    /// Zero-guarded ratio.
    ///
    /// `numerator / denominator` when `denominator > 0`; otherwise
    /// `PositiveInfinite` when `numerator > 0`, else `Undefined`.
    #[must_use]
    pub fn ratio(numerator: Decimal, denominator: Decimal) -> Self {
        if denominator > Decimal::ZERO {
            Self::Finite(safe_div(numerator, denominator))
        } else if numerator > Decimal::ZERO {
            Self::PositiveInfinite
        } else {
            Self::Undefined
        }
    }

    /// Zero-guarded ratio of two counts.
    #[must_use]
    pub fn count_ratio(numerator: u64, denominator: u64) -> Self {
        Self::ratio(Decimal::from(numerator), Decimal::from(denominator))
    }

    /// The finite value, if any.
    #[must_use]
    pub const fn finite(&self) -> Option<Decimal> {
        match self {
            Self::Finite(v) => Some(*v),
            Self::Undefined | Self::PositiveInfinite => None,
        }
    }

    /// Whether this is a finite value.
    #[must_use]
    pub const fn is_finite(&self) -> bool {
        matches!(self, Self::Finite(_))
    }

    /// Whether this is the infinite sentinel.
    #[must_use]
    pub const fn is_infinite(&self) -> bool {
        matches!(self, Self::PositiveInfinite)
    }

    /// Numeric value for display gauges: finite value, or zero for `Undefined`.
    ///
    /// Returns `None` for `PositiveInfinite`, which has no numeric stand-in.
    #[must_use]
    pub const fn or_zero(&self) -> Option<Decimal> {
        match self {
            Self::Finite(v) => Some(*v),
            Self::Undefined => Some(Decimal::ZERO),
            Self::PositiveInfinite => None,
        }
    }
}

impl From<Decimal> for MetricValue {
    fn from(value: Decimal) -> Self {
        Self::Finite(value)
    }
}

impl PartialOrd for MetricValue {
    /// Finite values order numerically and below `PositiveInfinite`.
    /// `Undefined` only compares equal to itself.
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (Self::Finite(a), Self::Finite(b)) => Some(a.cmp(b)),
            (Self::Finite(_), Self::PositiveInfinite) => Some(Ordering::Less),
            (Self::PositiveInfinite, Self::Finite(_)) => Some(Ordering::Greater),
            (Self::PositiveInfinite, Self::PositiveInfinite)
            | (Self::Undefined, Self::Undefined) => Some(Ordering::Equal),
            (Self::Undefined, _) | (_, Self::Undefined) => None,
        }
    }
}

impl fmt::Display for MetricValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Finite(v) => write!(f, "{v:.2}"),
            Self::Undefined => f.write_str("N/A"),
            Self::PositiveInfinite => f.write_str("∞"),
        }
    }
}
