//! Filter stage: reduces the trade universe to a working subset.
//!
//! Two independent predicates are applied:
//! - symbol membership (an empty selection keeps every symbol)
//! - a trailing time window ending at the latest exit time of the **whole
//!   universe**, never the wall clock and never the symbol-filtered subset
//!
//! Output preserves input order.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::trade::Trade;

/// Named trailing window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TimeWindow {
    /// Last 24 hours.
    #[serde(rename = "24h")]
    Last24Hours,
    /// Last 7 days.
    #[serde(rename = "7d")]
    Last7Days,
    /// Last 30 days.
    #[serde(rename = "30d")]
    Last30Days,
    /// No time restriction.
    #[default]
    #[serde(rename = "all")]
    AllTime,
}

impl TimeWindow {
    /// Window length in milliseconds, `None` for all-time.
    #[must_use]
    pub const fn millis(&self) -> Option<i64> {
        match self {
            Self::Last24Hours => Some(86_400_000),
            Self::Last7Days => Some(604_800_000),
            Self::Last30Days => Some(2_592_000_000),
            Self::AllTime => None,
        }
    }

    /// Window length as a duration, `None` for all-time.
    #[must_use]
    pub fn duration(&self) -> Option<Duration> {
        self.millis().map(Duration::milliseconds)
    }

    /// Short label used in config files and output.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Last24Hours => "24h",
            Self::Last7Days => "7d",
            Self::Last30Days => "30d",
            Self::AllTime => "all",
        }
    }

    /// Earliest exit time kept by this window for the given anchor.
    ///
    /// `None` means no lower bound: all-time, or an empty universe.
    #[must_use]
    pub fn cutoff(&self, anchor: Option<DateTime<Utc>>) -> Option<DateTime<Utc>> {
        let duration = self.duration()?;
        anchor.map(|a| a - duration)
    }
}

impl fmt::Display for TimeWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unrecognised window label.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown time window '{0}' (expected 24h, 7d, 30d or all)")]
pub struct ParseWindowError(String);

impl FromStr for TimeWindow {
    type Err = ParseWindowError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "24h" => Ok(Self::Last24Hours),
            "7d" => Ok(Self::Last7Days),
            "30d" => Ok(Self::Last30Days),
            "all" => Ok(Self::AllTime),
            other => Err(ParseWindowError(other.to_string())),
        }
    }
}

/// Filter selection built per interaction.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FilterCriteria {
    /// Selected symbols; empty means all.
    #[serde(default)]
    pub symbols: BTreeSet<String>,
    /// Trailing window.
    #[serde(default)]
    pub window: TimeWindow,
}

impl FilterCriteria {
    /// Create criteria from a symbol selection and a window.
    #[must_use]
    pub fn new(symbols: impl IntoIterator<Item = String>, window: TimeWindow) -> Self {
        Self {
            symbols: symbols.into_iter().collect(),
            window,
        }
    }

    /// Criteria that keep every trade.
    #[must_use]
    pub fn all() -> Self {
        Self::default()
    }

    /// Whether a trade passes the symbol predicate.
    #[must_use]
    pub fn matches_symbol(&self, trade: &Trade) -> bool {
        self.symbols.is_empty() || self.symbols.contains(&trade.asset)
    }
}

/// Filter `universe`, anchoring the window at the universe's latest exit time.
#[must_use]
pub fn filter_trades(universe: &[Trade], criteria: &FilterCriteria) -> Vec<Trade> {
    let anchor = universe.iter().map(|t| t.exit_time).max();
    filter_with_anchor(universe, criteria, anchor)
}

/// Filter `trades` against an explicit window anchor.
///
/// Use this when `trades` is already a subset and the anchor must still come
/// from the full universe (e.g. re-filtering a previous result).
#[must_use]
pub fn filter_with_anchor(
    trades: &[Trade],
    criteria: &FilterCriteria,
    anchor: Option<DateTime<Utc>>,
) -> Vec<Trade> {
    let cutoff = criteria.window.cutoff(anchor);

    let filtered: Vec<Trade> = trades
        .iter()
        .filter(|t| criteria.matches_symbol(t))
        .filter(|t| cutoff.is_none_or(|c| t.exit_time >= c))
        .cloned()
        .collect();

    tracing::debug!(
        input = trades.len(),
        kept = filtered.len(),
        window = %criteria.window,
        symbols = criteria.symbols.len(),
        "Filtered trades"
    );

    filtered
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use test_case::test_case;

    use super::*;
    use crate::trade::test_support::trade;

    #[test_case("24h", TimeWindow::Last24Hours ; "day")]
    #[test_case("7D", TimeWindow::Last7Days ; "week uppercase")]
    #[test_case(" 30d ", TimeWindow::Last30Days ; "month padded")]
    #[test_case("all", TimeWindow::AllTime ; "all time")]
    fn test_parse_window(input: &str, expected: TimeWindow) {
        assert_eq!(input.parse::<TimeWindow>(), Ok(expected));
    }

    #[test]
    fn test_parse_window_rejects_unknown() {
        assert!("1y".parse::<TimeWindow>().is_err());
    }

    #[test_case(TimeWindow::Last24Hours, 86_400_000)]
    #[test_case(TimeWindow::Last7Days, 604_800_000)]
    #[test_case(TimeWindow::Last30Days, 2_592_000_000)]
    fn test_window_millis(window: TimeWindow, expected: i64) {
        assert_eq!(window.millis(), Some(expected));
    }

    #[test]
    fn test_empty_symbols_keep_all() {
        let trades = vec![trade("1", "SOL", 1, 1), trade("2", "JUP", 1, 2)];
        let filtered = filter_trades(&trades, &FilterCriteria::all());
        assert_eq!(filtered, trades);
    }

    #[test]
    fn test_symbol_filter_preserves_order() {
        let trades = vec![
            trade("1", "SOL", 1, 3),
            trade("2", "JUP", 1, 2),
            trade("3", "SOL", 1, 1),
        ];
        let criteria = FilterCriteria::new(vec!["SOL".to_string()], TimeWindow::AllTime);
        let ids: Vec<_> = filter_trades(&trades, &criteria)
            .into_iter()
            .map(|t| t.id)
            .collect();
        assert_eq!(ids, ["1", "3"]);
    }

    #[test]
    fn test_window_cutoff_is_inclusive() {
        // Exits at 0h, 24h and 48h: a 24h window anchored at 48h keeps 24h and 48h.
        let trades = vec![
            trade("1", "SOL", 1, 0),
            trade("2", "SOL", 1, 24),
            trade("3", "SOL", 1, 48),
        ];
        let criteria = FilterCriteria::new(Vec::new(), TimeWindow::Last24Hours);
        let ids: Vec<_> = filter_trades(&trades, &criteria)
            .into_iter()
            .map(|t| t.id)
            .collect();
        assert_eq!(ids, ["2", "3"]);
    }

    #[test]
    fn test_window_anchor_ignores_wall_clock() {
        let anchor = Utc
            .with_ymd_and_hms(2025, 12, 10, 0, 0, 0)
            .single()
            .unwrap_or_else(|| panic!("valid anchor"));
        let cutoff = TimeWindow::Last24Hours.cutoff(Some(anchor));
        assert_eq!(cutoff, Some(anchor - Duration::milliseconds(86_400_000)));
        assert_eq!(TimeWindow::AllTime.cutoff(Some(anchor)), None);
        assert_eq!(TimeWindow::Last7Days.cutoff(None), None);
    }

    #[test]
    fn test_empty_universe() {
        let criteria = FilterCriteria::new(vec!["SOL".to_string()], TimeWindow::Last7Days);
        assert!(filter_trades(&[], &criteria).is_empty());
    }

    #[test]
    fn test_filter_is_idempotent_with_fixed_anchor() {
        let trades = vec![
            trade("1", "SOL", 1, 0),
            trade("2", "JUP", 1, 100),
            trade("3", "SOL", 1, 200),
        ];
        let anchor = trades.iter().map(|t| t.exit_time).max();
        let criteria = FilterCriteria::new(vec!["SOL".to_string()], TimeWindow::Last7Days);

        let once = filter_with_anchor(&trades, &criteria, anchor);
        let twice = filter_with_anchor(&once, &criteria, anchor);
        assert_eq!(once, twice);
    }
}
