//! Headline KPI aggregation.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::equity::chronological;
use super::math::{percent, saturating_sum};
use super::value::MetricValue;
use crate::trade::Trade;

/// Headline statistics for a filtered trade set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KpiSummary {
    /// Number of trades.
    pub total_trades: u64,
    /// Trades with positive P&L.
    pub winning_trades: u64,
    /// Trades with negative P&L.
    pub losing_trades: u64,
    /// Sum of realized P&L.
    pub total_pnl: Decimal,
    /// Winning fraction of all trades (0..=1).
    pub win_rate: Decimal,
    /// Sum of `size * entry_price`.
    pub total_volume: Decimal,
    /// Sum of fees.
    pub total_fees: Decimal,
    /// Largest single P&L (0 if empty).
    pub largest_win: Decimal,
    /// Smallest single P&L (0 if empty).
    pub largest_loss: Decimal,
    /// Mean holding period in minutes.
    pub avg_duration_minutes: Decimal,
    /// Mean execution-bar range as a percentage of entry price.
    pub avg_range_percent: Decimal,
    /// Sum of winning P&L.
    pub gross_profit: Decimal,
    /// Magnitude of summed losing P&L (positive value).
    pub gross_loss: Decimal,
    /// `gross_profit / gross_loss` with infinite/undefined sentinels.
    pub profit_factor: MetricValue,
    /// `total_pnl / total_volume * 100`.
    pub pnl_percent: Decimal,
    /// Running P&L in exit-time order, for sparklines.
    pub cumulative_pnl: Vec<Decimal>,
}

impl Default for KpiSummary {
    fn default() -> Self {
        Self {
            total_trades: 0,
            winning_trades: 0,
            losing_trades: 0,
            total_pnl: Decimal::ZERO,
            win_rate: Decimal::ZERO,
            total_volume: Decimal::ZERO,
            total_fees: Decimal::ZERO,
            largest_win: Decimal::ZERO,
            largest_loss: Decimal::ZERO,
            avg_duration_minutes: Decimal::ZERO,
            avg_range_percent: Decimal::ZERO,
            gross_profit: Decimal::ZERO,
            gross_loss: Decimal::ZERO,
            profit_factor: MetricValue::Undefined,
            pnl_percent: Decimal::ZERO,
            cumulative_pnl: Vec::new(),
        }
    }
}

impl KpiSummary {
    /// Compute all KPIs for a trade set.
    #[must_use]
    pub fn from_trades(trades: &[Trade]) -> Self {
        if trades.is_empty() {
            return Self::default();
        }

        let (gross_profit, gross_loss, winning_trades, losing_trades) = trade_stats(trades);
        let total_trades = trades.len() as u64;
        let count = Decimal::from(total_trades);

        let total_pnl = saturating_sum(trades.iter().map(|t| t.realized_pnl));
        let total_volume = saturating_sum(trades.iter().map(Trade::volume));
        let total_fees = saturating_sum(trades.iter().map(|t| t.fee));

        let largest_win = trades
            .iter()
            .map(|t| t.realized_pnl)
            .max()
            .unwrap_or(Decimal::ZERO);
        let largest_loss = trades
            .iter()
            .map(|t| t.realized_pnl)
            .min()
            .unwrap_or(Decimal::ZERO);

        let total_minutes = saturating_sum(trades.iter().map(Trade::holding_minutes));
        let total_range_pct = saturating_sum(
            trades
                .iter()
                .map(|t| percent(t.candle_range(), t.entry_price)),
        );

        let mut running = Decimal::ZERO;
        let cumulative_pnl = chronological(trades)
            .into_iter()
            .map(|t| {
                running = running.saturating_add(t.realized_pnl);
                running
            })
            .collect();

        tracing::debug!(trades = total_trades, "Computed KPI summary");

        Self {
            total_trades,
            winning_trades,
            losing_trades,
            total_pnl,
            win_rate: Decimal::from(winning_trades) / count,
            total_volume,
            total_fees,
            largest_win,
            largest_loss,
            avg_duration_minutes: total_minutes / count,
            avg_range_percent: total_range_pct / count,
            gross_profit,
            gross_loss,
            profit_factor: MetricValue::ratio(gross_profit, gross_loss),
            pnl_percent: percent(total_pnl, total_volume),
            cumulative_pnl,
        }
    }
}

/// Gross profit, gross loss (positive), winner count and loser count.
pub(crate) fn trade_stats(trades: &[Trade]) -> (Decimal, Decimal, u64, u64) {
    let mut gross_profit = Decimal::ZERO;
    let mut gross_loss = Decimal::ZERO;
    let mut winning = 0u64;
    let mut losing = 0u64;

    for trade in trades {
        if trade.is_winner() {
            gross_profit = gross_profit.saturating_add(trade.realized_pnl);
            winning += 1;
        } else if trade.is_loser() {
            gross_loss = gross_loss.saturating_add(trade.realized_pnl.abs());
            losing += 1;
        }
    }

    (gross_profit, gross_loss, winning, losing)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trade::test_support::trade;

    #[test]
    fn test_two_trade_scenario() {
        let trades = vec![trade("1", "SOL", 100, 1), trade("2", "SOL", -40, 2)];
        let kpi = KpiSummary::from_trades(&trades);

        assert_eq!(kpi.total_pnl, Decimal::new(60, 0));
        assert_eq!(kpi.win_rate, Decimal::new(5, 1));
        assert_eq!(kpi.profit_factor, MetricValue::Finite(Decimal::new(25, 1)));
        assert_eq!(kpi.gross_profit, Decimal::new(100, 0));
        assert_eq!(kpi.gross_loss, Decimal::new(40, 0));
        assert_eq!(kpi.largest_win, Decimal::new(100, 0));
        assert_eq!(kpi.largest_loss, Decimal::new(-40, 0));
    }

    #[test]
    fn test_empty_trades() {
        let kpi = KpiSummary::from_trades(&[]);
        assert_eq!(kpi.total_trades, 0);
        assert_eq!(kpi.win_rate, Decimal::ZERO);
        assert_eq!(kpi.profit_factor, MetricValue::Undefined);
        assert_eq!(kpi.profit_factor.or_zero(), Some(Decimal::ZERO));
        assert_eq!(kpi.pnl_percent, Decimal::ZERO);
        assert!(kpi.cumulative_pnl.is_empty());
    }

    #[test]
    fn test_profit_factor_infinite_without_losses() {
        let kpi = KpiSummary::from_trades(&[trade("1", "SOL", 10, 1), trade("2", "SOL", 0, 2)]);
        assert_eq!(kpi.profit_factor, MetricValue::PositiveInfinite);
        assert_eq!(kpi.winning_trades, 1);
        assert_eq!(kpi.losing_trades, 0);
    }

    #[test]
    fn test_volume_fees_and_pnl_percent() {
        let mut a = trade("1", "SOL", 10, 1);
        a.fee = Decimal::new(15, 1);
        a.network_fee = Decimal::new(5, 1);
        a.protocol_fee = Decimal::ONE;
        let b = trade("2", "SOL", -5, 2);

        let kpi = KpiSummary::from_trades(&[a, b]);
        assert_eq!(kpi.total_volume, Decimal::new(200, 0));
        assert_eq!(kpi.total_fees, Decimal::new(15, 1));
        assert_eq!(kpi.pnl_percent, Decimal::new(25, 1)); // 5 / 200 * 100
    }

    #[test]
    fn test_duration_and_range() {
        let mut long_hold = trade("1", "SOL", 1, 3);
        long_hold.entry_time = long_hold.exit_time - chrono::Duration::minutes(90);
        let short_hold = trade("2", "SOL", 1, 4); // 60 minutes, range 20 on 100

        let kpi = KpiSummary::from_trades(&[long_hold, short_hold]);
        assert_eq!(kpi.avg_duration_minutes, Decimal::new(75, 0));
        assert_eq!(kpi.avg_range_percent, Decimal::new(20, 0));
    }

    #[test]
    fn test_cumulative_pnl_in_exit_order() {
        let trades = vec![trade("1", "SOL", 5, 3), trade("2", "SOL", -2, 1)];
        let kpi = KpiSummary::from_trades(&trades);
        assert_eq!(
            kpi.cumulative_pnl,
            [Decimal::new(-2, 0), Decimal::new(3, 0)]
        );
    }

    #[test]
    fn test_volume_saturates_at_decimal_max() {
        let mut a = trade("1", "SOL", 100, 1);
        a.size = Decimal::MAX;
        a.entry_price = Decimal::TWO;
        let mut b = a.clone();
        b.id = "2".to_string();

        let trades = vec![a, b];
        let kpi = KpiSummary::from_trades(&trades);
        assert_eq!(kpi.total_volume, Decimal::MAX);
        assert_eq!(kpi.total_pnl, Decimal::new(200, 0));
        assert!(kpi.pnl_percent < Decimal::ONE);

        let slices = crate::metrics::asset_composition(
            &trades,
            crate::metrics::CompositionMode::Volume,
            None,
        );
        assert_eq!(slices[0].value, Decimal::MAX);
    }
}
