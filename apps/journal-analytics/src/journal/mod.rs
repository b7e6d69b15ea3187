//! Trade journal: sortable trade listing plus per-trade annotations.

mod annotation;

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

pub use annotation::{
    Annotation, AnnotationStore, InMemoryAnnotationStore, JsonFileAnnotationStore, StoreError,
    annotated_ids,
};

use crate::trade::Trade;

/// Column the journal is sorted by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortKey {
    /// Asset symbol, case-insensitive (see [`compare_symbols`]).
    Asset,
    /// Realized P&L.
    RealizedPnl,
    /// Entry time.
    #[default]
    EntryTime,
    /// Notional size (`size * entry_price`).
    Size,
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    /// Smallest first.
    Ascending,
    /// Largest first.
    #[default]
    Descending,
}

impl SortOrder {
    /// The opposite direction.
    #[must_use]
    pub const fn reversed(self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }
}

/// Current journal ordering. Defaults to newest entry first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct JournalSort {
    /// Sort column.
    pub key: SortKey,
    /// Sort direction.
    pub order: SortOrder,
}

impl JournalSort {
    /// Column-header click: flip direction on the same key, otherwise switch
    /// to the new key ascending.
    #[must_use]
    pub fn toggle(self, key: SortKey) -> Self {
        let order = if self.key == key {
            self.order.reversed()
        } else {
            SortOrder::Ascending
        };
        Self { key, order }
    }

    /// Apply this ordering.
    #[must_use]
    pub fn apply<'a>(&self, trades: &'a [Trade]) -> Vec<&'a Trade> {
        sort_journal(trades, self.key, self.order)
    }
}

/// Case-insensitive symbol order; symbols equal ignoring case fall back to
/// byte order, so `JUP` sorts before `jup` and the result stays total.
#[must_use]
pub fn compare_symbols(a: &str, b: &str) -> Ordering {
    a.chars()
        .flat_map(char::to_lowercase)
        .cmp(b.chars().flat_map(char::to_lowercase))
        .then_with(|| a.cmp(b))
}

fn compare(a: &Trade, b: &Trade, key: SortKey) -> Ordering {
    match key {
        SortKey::Asset => compare_symbols(&a.asset, &b.asset),
        SortKey::RealizedPnl => a.realized_pnl.cmp(&b.realized_pnl),
        SortKey::EntryTime => a.entry_time.cmp(&b.entry_time),
        SortKey::Size => a.volume().cmp(&b.volume()),
    }
}

/// Order trades for the journal table.
///
/// The sort is stable in both directions: trades that compare equal keep
/// their input order.
#[must_use]
pub fn sort_journal(trades: &[Trade], key: SortKey, order: SortOrder) -> Vec<&Trade> {
    let mut sorted: Vec<&Trade> = trades.iter().collect();
    sorted.sort_by(|a, b| {
        let cmp = compare(a, b, key);
        match order {
            SortOrder::Ascending => cmp,
            SortOrder::Descending => cmp.reverse(),
        }
    });
    sorted
}
