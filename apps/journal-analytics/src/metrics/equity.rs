//! Equity and drawdown series.
//!
//! Trades are ordered by exit time (stable, so ties keep their input order)
//! and scanned once, left to right. The peak starts at zero before the first
//! trade, which makes every drawdown value `<= 0`.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::trade::Trade;

/// One point of the cumulative P&L curve.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EquityPoint {
    /// Exit time of the trade that produced this point.
    pub timestamp: DateTime<Utc>,
    /// Trade that produced this point.
    pub trade_id: String,
    /// Cumulative realized P&L.
    pub equity: Decimal,
    /// Highest cumulative P&L so far (never below zero).
    pub peak: Decimal,
    /// `equity - peak`, always `<= 0`.
    pub drawdown: Decimal,
}

/// Trades ordered by exit time; ties keep input order.
pub(crate) fn chronological(trades: &[Trade]) -> Vec<&Trade> {
    let mut sorted: Vec<&Trade> = trades.iter().collect();
    sorted.sort_by_key(|t| t.exit_time);
    sorted
}

/// Build the equity and drawdown curve for a set of trades.
#[must_use]
pub fn build_equity_curve(trades: &[Trade]) -> Vec<EquityPoint> {
    let mut cum_pnl = Decimal::ZERO;
    let mut peak = Decimal::ZERO;

    chronological(trades)
        .into_iter()
        .map(|trade| {
            cum_pnl = cum_pnl.saturating_add(trade.realized_pnl);
            peak = peak.max(cum_pnl);
            EquityPoint {
                timestamp: trade.exit_time,
                trade_id: trade.id.clone(),
                equity: cum_pnl,
                peak,
                drawdown: cum_pnl.saturating_sub(peak),
            }
        })
        .collect()
}

/// Summary of an equity curve's drawdowns.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DrawdownStats {
    /// Deepest drawdown as a positive magnitude.
    pub max_drawdown: Decimal,
    /// When the deepest drawdown was reached.
    pub max_drawdown_at: Option<DateTime<Utc>>,
    /// Highest cumulative P&L reached.
    pub peak_equity: Decimal,
    /// Cumulative P&L after the last trade.
    pub final_equity: Decimal,
}

impl DrawdownStats {
    /// Summarise an already-built curve.
    #[must_use]
    pub fn from_curve(curve: &[EquityPoint]) -> Self {
        let mut stats = Self::default();

        for point in curve {
            if -point.drawdown > stats.max_drawdown {
                stats.max_drawdown = -point.drawdown;
                stats.max_drawdown_at = Some(point.timestamp);
            }
            stats.peak_equity = stats.peak_equity.max(point.peak);
        }
        stats.final_equity = curve.last().map_or(Decimal::ZERO, |p| p.equity);

        stats
    }
}
