//! Execution-efficiency scoring.
//!
//! Five independent views over the same trade set:
//! - slippage of the achieved entry vs the requested price (bps)
//! - entry/exit quality relative to the execution bar (0–100)
//! - time-to-fill (mean and upper median)
//! - profit factor and win/loss ratio with explicit infinity

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};

use super::constants::{
    BPS_PER_UNIT, HUNDRED, MAX_QUALITY_SCORE, MONEY_DP, NEUTRAL_QUALITY_SCORE, TWO,
};
use super::kpi::trade_stats;
use super::math::{mean, round_dp, safe_div, saturating_sum};
use super::value::MetricValue;
use crate::trade::{Direction, Trade};

/// Entry slippage in basis points, rounded to 2 dp.
///
/// A zero requested price yields zero rather than dividing by zero. Values
/// beyond the `Decimal` range saturate at `Decimal::MAX`.
#[must_use]
pub fn slippage_bps(trade: &Trade) -> Decimal {
    let deviation = trade.entry_price.saturating_sub(trade.requested_price).abs();
    let ratio = safe_div(deviation, trade.requested_price);
    round_dp(ratio.saturating_mul(BPS_PER_UNIT), MONEY_DP)
}

/// Entry/exit quality score in `0..=100`.
///
/// Rewards entering near the favourable extreme of the bar and exiting near
/// the other one. A zero-range bar carries no information and scores 50.
#[must_use]
pub fn quality_score(trade: &Trade) -> u32 {
    let range = trade.candle_range();
    if range.is_zero() {
        return NEUTRAL_QUALITY_SCORE;
    }

    // Positions far outside a tiny bar saturate; the clamp pins them to 0 or 100.
    let entry_pos = safe_div(trade.entry_price.saturating_sub(trade.candle_low), range);
    let exit_pos = safe_div(trade.exit_price.saturating_sub(trade.candle_low), range);
    let (entry_score, exit_score) = match trade.direction {
        Direction::Long => (Decimal::ONE.saturating_sub(entry_pos), exit_pos),
        Direction::Short => (entry_pos, Decimal::ONE.saturating_sub(exit_pos)),
    };

    let raw = (entry_score.saturating_add(exit_score) / TWO).saturating_mul(HUNDRED);
    let clamped = raw.clamp(Decimal::ZERO, MAX_QUALITY_SCORE);
    round_dp(clamped, 0).to_u32().unwrap_or(NEUTRAL_QUALITY_SCORE)
}

/// Slippage across a trade set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlippageStats {
    /// Mean slippage (bps, 2 dp).
    pub avg_bps: Decimal,
    /// Largest slippage (bps).
    pub worst_bps: Decimal,
    /// Smallest slippage; `PositiveInfinite` means no data.
    pub best_bps: MetricValue,
}

impl SlippageStats {
    /// Compute slippage statistics.
    #[must_use]
    pub fn from_trades(trades: &[Trade]) -> Self {
        let values: Vec<Decimal> = trades.iter().map(slippage_bps).collect();

        let Some(avg) = mean(&values) else {
            return Self {
                avg_bps: Decimal::ZERO,
                worst_bps: Decimal::ZERO,
                best_bps: MetricValue::PositiveInfinite,
            };
        };

        let worst = values.iter().copied().max().unwrap_or(Decimal::ZERO);
        let best = values
            .iter()
            .copied()
            .min()
            .map_or(MetricValue::PositiveInfinite, MetricValue::Finite);

        Self {
            avg_bps: round_dp(avg, MONEY_DP),
            worst_bps: worst,
            best_bps: best,
        }
    }
}

/// Entry/exit quality across a trade set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct QualityStats {
    /// Mean score, rounded to an integer.
    pub avg_score: u32,
    /// Best score.
    pub best_score: u32,
}

impl QualityStats {
    /// Compute quality statistics.
    #[must_use]
    pub fn from_trades(trades: &[Trade]) -> Self {
        let scores: Vec<u32> = trades.iter().map(quality_score).collect();
        if scores.is_empty() {
            return Self::default();
        }

        let total: u64 = scores.iter().map(|&s| u64::from(s)).sum();
        let avg = Decimal::from(total) / Decimal::from(scores.len() as u64);

        Self {
            avg_score: round_dp(avg, 0).to_u32().unwrap_or_default(),
            best_score: scores.iter().copied().max().unwrap_or_default(),
        }
    }
}

/// Time-to-fill across a trade set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FillTimeStats {
    /// Mean fill time in ms, rounded to an integer.
    pub avg_ms: u64,
    /// Element at index `n / 2` of the sorted fill times (upper median).
    pub median_ms: u64,
}

impl FillTimeStats {
    /// Compute fill-time statistics.
    #[must_use]
    pub fn from_trades(trades: &[Trade]) -> Self {
        let mut times: Vec<u64> = trades.iter().map(|t| t.time_to_fill_ms).collect();
        if times.is_empty() {
            return Self::default();
        }
        times.sort_unstable();

        let total = saturating_sum(times.iter().map(|&ms| Decimal::from(ms)));
        let avg = total / Decimal::from(times.len() as u64);

        Self {
            avg_ms: round_dp(avg, 0).to_u64().unwrap_or_default(),
            median_ms: times[times.len() / 2],
        }
    }
}

/// All execution-efficiency views.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EfficiencySummary {
    /// Slippage statistics.
    pub slippage: SlippageStats,
    /// Entry/exit quality statistics.
    pub quality: QualityStats,
    /// Time-to-fill statistics.
    pub fill_time: FillTimeStats,
    /// Gross profit / gross loss.
    pub profit_factor: MetricValue,
    /// Winning trades / losing trades.
    pub win_loss_ratio: MetricValue,
}

impl EfficiencySummary {
    /// Compute every efficiency view.
    #[must_use]
    pub fn from_trades(trades: &[Trade]) -> Self {
        let (gross_profit, gross_loss, wins, losses) = trade_stats(trades);

        tracing::debug!(trades = trades.len(), "Computed efficiency summary");

        Self {
            slippage: SlippageStats::from_trades(trades),
            quality: QualityStats::from_trades(trades),
            fill_time: FillTimeStats::from_trades(trades),
            profit_factor: MetricValue::ratio(gross_profit, gross_loss),
            win_loss_ratio: MetricValue::count_ratio(wins, losses),
        }
    }
}
