//! Per-order-type performance.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::constants::MONEY_DP;
use super::math::{round_dp, safe_div};
use crate::trade::{OrderType, Trade};

/// Performance of one order type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderTypeStats {
    /// Order type.
    pub order_type: OrderType,
    /// Number of trades opened with this type.
    pub count: u64,
    /// Sum of realized P&L.
    pub total_pnl: Decimal,
    /// Mean realized P&L, rounded to 2 dp (0 when `count == 0`).
    pub avg_pnl: Decimal,
}

/// Break trades down by order type.
///
/// Always returns one entry per [`OrderType`], in [`OrderType::ALL`] order,
/// including types with no trades.
#[must_use]
pub fn order_type_breakdown(trades: &[Trade]) -> Vec<OrderTypeStats> {
    OrderType::ALL
        .into_iter()
        .map(|order_type| {
            let (count, total_pnl) = trades
                .iter()
                .filter(|t| t.order_type == order_type)
                .fold((0u64, Decimal::ZERO), |(n, pnl), t| {
                    (n + 1, pnl + t.realized_pnl)
                });
            OrderTypeStats {
                order_type,
                count,
                total_pnl,
                avg_pnl: round_dp(safe_div(total_pnl, Decimal::from(count)), MONEY_DP),
            }
        })
        .collect()
}
