//! Long/short breakdown.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::math::percent;
use crate::trade::{Direction, Trade};

/// Statistics for one direction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectionStats {
    /// Direction these figures describe.
    pub direction: Direction,
    /// Number of trades.
    pub count: u64,
    /// Sum of realized P&L.
    pub pnl: Decimal,
    /// Share of all trades, in percent.
    pub share_pct: Decimal,
}

/// Long vs short partition of a trade set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectionalSummary {
    /// Long trades.
    pub long: DirectionStats,
    /// Short trades.
    pub short: DirectionStats,
}

impl DirectionalSummary {
    /// Partition trades by direction.
    #[must_use]
    pub fn from_trades(trades: &[Trade]) -> Self {
        let total = Decimal::from(trades.len() as u64);
        let stats = |direction: Direction| {
            let (count, pnl) = trades
                .iter()
                .filter(|t| t.direction == direction)
                .fold((0u64, Decimal::ZERO), |(n, pnl), t| {
                    (n + 1, pnl.saturating_add(t.realized_pnl))
                });
            DirectionStats {
                direction,
                count,
                pnl,
                share_pct: percent(Decimal::from(count), total),
            }
        };

        Self {
            long: stats(Direction::Long),
            short: stats(Direction::Short),
        }
    }

    /// Both partitions in display order.
    #[must_use]
    pub fn as_array(&self) -> [&DirectionStats; 2] {
        [&self.long, &self.short]
    }
}
