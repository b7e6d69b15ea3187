//! Per-asset composition: volume/P&L slices and fee breakdown.
//!
//! Groups are emitted in the order each asset first appears in the input so
//! the output is deterministic regardless of hashing.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::trade::Trade;

/// Which quantity sizes the composition slices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompositionMode {
    /// Sum of `size * entry_price`.
    #[default]
    Volume,
    /// Absolute value of net realized P&L.
    Pnl,
}

impl fmt::Display for CompositionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Volume => f.write_str("volume"),
            Self::Pnl => f.write_str("pnl"),
        }
    }
}

/// Unrecognised composition mode label.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown composition mode '{0}' (expected volume or pnl)")]
pub struct ParseModeError(String);

impl FromStr for CompositionMode {
    type Err = ParseModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "volume" => Ok(Self::Volume),
            "pnl" => Ok(Self::Pnl),
            other => Err(ParseModeError(other.to_string())),
        }
    }
}

/// One asset's share of the portfolio.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompositionSlice {
    /// Asset symbol.
    pub asset: String,
    /// Slice size for the selected mode (never zero, never negative in pnl mode).
    pub value: Decimal,
    /// Total traded volume for the asset.
    pub volume: Decimal,
    /// Signed net P&L for the asset, kept for tooltips.
    pub signed_pnl: Decimal,
    /// Number of trades in the group.
    pub trade_count: u64,
    /// Whether the caller's highlight key selects this asset. Display only.
    pub highlighted: bool,
}

/// Network vs protocol fees for one asset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeSlice {
    /// Asset symbol.
    pub asset: String,
    /// Sum of network fees.
    pub network_fee: Decimal,
    /// Sum of protocol fees.
    pub protocol_fee: Decimal,
    /// `network_fee + protocol_fee`.
    pub total_fee: Decimal,
}

/// Fold trades into per-asset accumulators, preserving first-seen order.
fn group_by_asset<A: Default>(
    trades: &[Trade],
    mut fold: impl FnMut(&mut A, &Trade),
) -> Vec<(String, A)> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut groups: Vec<(String, A)> = Vec::new();

    for trade in trades {
        let slot = *index.entry(trade.asset.as_str()).or_insert_with(|| {
            groups.push((trade.asset.clone(), A::default()));
            groups.len() - 1
        });
        fold(&mut groups[slot].1, trade);
    }

    groups
}

#[derive(Default)]
struct AssetTotals {
    volume: Decimal,
    pnl: Decimal,
    count: u64,
}

/// Build composition slices for the selected mode.
///
/// Groups whose selected value is exactly zero are dropped. `highlighted`
/// only sets the pass-through flag on the matching slice.
#[must_use]
pub fn asset_composition(
    trades: &[Trade],
    mode: CompositionMode,
    highlighted: Option<&str>,
) -> Vec<CompositionSlice> {
    group_by_asset(trades, |acc: &mut AssetTotals, t| {
        acc.volume = acc.volume.saturating_add(t.volume());
        acc.pnl = acc.pnl.saturating_add(t.realized_pnl);
        acc.count += 1;
    })
    .into_iter()
    .filter_map(|(asset, totals)| {
        let value = match mode {
            CompositionMode::Volume => totals.volume,
            CompositionMode::Pnl => totals.pnl.abs(),
        };
        if value.is_zero() {
            return None;
        }
        let highlighted = highlighted == Some(asset.as_str());
        Some(CompositionSlice {
            asset,
            value,
            volume: totals.volume,
            signed_pnl: totals.pnl,
            trade_count: totals.count,
            highlighted,
        })
    })
    .collect()
}

/// Sum network and protocol fees per asset.
#[must_use]
pub fn fee_composition(trades: &[Trade]) -> Vec<FeeSlice> {
    group_by_asset(trades, |acc: &mut (Decimal, Decimal), t| {
        acc.0 = acc.0.saturating_add(t.network_fee);
        acc.1 = acc.1.saturating_add(t.protocol_fee);
    })
    .into_iter()
    .map(|(asset, (network_fee, protocol_fee))| FeeSlice {
        asset,
        network_fee,
        protocol_fee,
        total_fee: network_fee.saturating_add(protocol_fee),
    })
    .collect()
}
