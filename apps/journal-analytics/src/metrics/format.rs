//! Formatting utilities for metric display.

use rust_decimal::Decimal;

use super::constants::{HUNDRED, MINUTES_PER_DAY, MINUTES_PER_HOUR, MS_PER_SECOND};
use super::math::round_dp;
use super::value::MetricValue;

/// Format a fraction as percentage string.
#[must_use]
pub fn format_pct(value: Decimal) -> String {
    format!("{:.2}%", round_dp(value * HUNDRED, 2))
}

/// Format a decimal with 2 decimal places.
#[must_use]
pub fn format_decimal(value: Decimal) -> String {
    format!("{:.2}", round_dp(value, 2))
}

/// Format a tagged metric; infinity renders as `∞`.
#[must_use]
pub fn format_metric(value: MetricValue) -> String {
    match value {
        MetricValue::Finite(v) => format_decimal(v),
        other => other.to_string(),
    }
}

/// Format a holding period given in minutes (`45m`, `2.5h`, `1.2d`).
#[must_use]
pub fn format_duration_minutes(minutes: Decimal) -> String {
    if minutes < MINUTES_PER_HOUR {
        format!("{:.0}m", round_dp(minutes, 0))
    } else if minutes < MINUTES_PER_DAY {
        format!("{:.1}h", round_dp(minutes / MINUTES_PER_HOUR, 1))
    } else {
        format!("{:.1}d", round_dp(minutes / MINUTES_PER_DAY, 1))
    }
}

/// Format a fill time (`850ms`, `1.2s`).
#[must_use]
pub fn format_fill_time_ms(ms: u64) -> String {
    if ms < 1000 {
        format!("{ms}ms")
    } else {
        format!("{:.1}s", round_dp(Decimal::from(ms) / MS_PER_SECOND, 1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_helpers() {
        assert_eq!(format_pct(Decimal::new(1523, 4)), "15.23%"); // 0.1523
        assert_eq!(format_decimal(Decimal::new(123_456, 3)), "123.46");
        assert_eq!(format_metric(MetricValue::Finite(Decimal::new(235, 2))), "2.35");
        assert_eq!(format_metric(MetricValue::PositiveInfinite), "∞");
        assert_eq!(format_metric(MetricValue::Undefined), "N/A");
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration_minutes(Decimal::new(45, 0)), "45m");
        assert_eq!(format_duration_minutes(Decimal::new(150, 0)), "2.5h");
        assert_eq!(format_duration_minutes(Decimal::new(2880, 0)), "2.0d");
    }

    #[test]
    fn test_format_fill_time() {
        assert_eq!(format_fill_time_ms(850), "850ms");
        assert_eq!(format_fill_time_ms(1250), "1.3s");
    }
}
