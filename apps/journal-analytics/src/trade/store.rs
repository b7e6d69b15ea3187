//! Immutable trade universe.

use std::collections::HashSet;

use chrono::{DateTime, Utc};

use super::Trade;
use crate::filter::{FilterCriteria, filter_with_anchor};

/// The full, immutable set of trades plus the symbols they may be filtered on.
#[derive(Debug, Clone, Default)]
pub struct TradeStore {
    trades: Vec<Trade>,
    symbols: Vec<String>,
}

impl TradeStore {
    /// Create a store whose known symbols are the distinct assets of `trades`
    /// in first-seen order.
    #[must_use]
    pub fn new(trades: Vec<Trade>) -> Self {
        let mut seen = HashSet::new();
        let symbols = trades
            .iter()
            .filter(|t| seen.insert(t.asset.as_str()))
            .map(|t| t.asset.clone())
            .collect();
        Self { trades, symbols }
    }

    /// Create a store with an explicit list of known symbols.
    #[must_use]
    pub fn with_symbols(trades: Vec<Trade>, symbols: Vec<String>) -> Self {
        Self { trades, symbols }
    }

    /// All trades, in ingestion order.
    #[must_use]
    pub fn trades(&self) -> &[Trade] {
        &self.trades
    }

    /// Known asset symbols.
    #[must_use]
    pub fn symbols(&self) -> &[String] {
        &self.symbols
    }

    /// Number of trades in the universe.
    #[must_use]
    pub fn len(&self) -> usize {
        self.trades.len()
    }

    /// Whether the universe is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.trades.is_empty()
    }

    /// Look up a trade by id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Trade> {
        self.trades.iter().find(|t| t.id == id)
    }

    /// Latest exit time in the universe; the anchor for trailing windows.
    #[must_use]
    pub fn latest_exit_time(&self) -> Option<DateTime<Utc>> {
        self.trades.iter().map(|t| t.exit_time).max()
    }

    /// Apply filter criteria, anchoring windows at the universe's latest exit.
    #[must_use]
    pub fn filter(&self, criteria: &FilterCriteria) -> Vec<Trade> {
        filter_with_anchor(&self.trades, criteria, self.latest_exit_time())
    }
}
