//! Trade records and the immutable trade universe.
//!
//! A [`Trade`] is one completed round trip (entry + exit) with its costs and
//! the execution bar it traded in. Trades are created once by ingestion and
//! never mutated; every analytics view is derived from slices of them.

mod load;
mod store;

use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use load::{LoadError, ingest, read_trades_json};
pub use store::TradeStore;

/// Milliseconds per minute, used for holding-period conversion.
const MS_PER_MINUTE: i64 = 60_000;

/// Maximum tolerated difference between `fee` and its components.
const FEE_TOLERANCE: Decimal = dec!(0.01);

/// Position direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Profits when price rises.
    Long,
    /// Profits when price falls.
    Short,
}

impl Direction {
    /// All directions in display order.
    pub const ALL: [Self; 2] = [Self::Long, Self::Short];

    /// Display label.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Long => "Long",
            Self::Short => "Short",
        }
    }
}

/// Order type used to open the position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderType {
    /// Immediate fill at market.
    Market,
    /// Resting limit order.
    Limit,
    /// Stop/trigger order.
    Trigger,
}

impl OrderType {
    /// All order types in display order.
    pub const ALL: [Self; 3] = [Self::Market, Self::Limit, Self::Trigger];

    /// Display label.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Market => "Market",
            Self::Limit => "Limit",
            Self::Trigger => "Trigger",
        }
    }
}

/// A completed trade.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Trade {
    /// Unique trade identifier.
    pub id: String,
    /// Asset symbol.
    pub asset: String,
    /// Position direction.
    #[serde(rename = "side")]
    pub direction: Direction,
    /// Price requested when the order was placed.
    pub requested_price: Decimal,
    /// Achieved entry price.
    pub entry_price: Decimal,
    /// Achieved exit price.
    pub exit_price: Decimal,
    /// Position size in units of the asset.
    pub size: Decimal,
    /// Total fee (network + protocol).
    pub fee: Decimal,
    /// Network component of the fee.
    pub network_fee: Decimal,
    /// Protocol component of the fee.
    pub protocol_fee: Decimal,
    /// Net P&L after fees.
    pub realized_pnl: Decimal,
    /// Order type.
    pub order_type: OrderType,
    /// Entry timestamp.
    pub entry_time: DateTime<Utc>,
    /// Exit timestamp.
    pub exit_time: DateTime<Utc>,
    /// Time from submission to fill in milliseconds.
    pub time_to_fill_ms: u64,
    /// High of the execution bar.
    pub candle_high: Decimal,
    /// Low of the execution bar.
    pub candle_low: Decimal,
}

impl Trade {
    /// Check if this trade was profitable.
    #[must_use]
    pub fn is_winner(&self) -> bool {
        self.realized_pnl > Decimal::ZERO
    }

    /// Check if this trade lost money. Break-even trades are neither.
    #[must_use]
    pub fn is_loser(&self) -> bool {
        self.realized_pnl < Decimal::ZERO
    }

    /// Notional traded at entry (`size * entry_price`), saturating at the
    /// `Decimal` bounds.
    #[must_use]
    pub fn volume(&self) -> Decimal {
        self.size.saturating_mul(self.entry_price)
    }

    /// Time the position was held.
    #[must_use]
    pub fn holding_period(&self) -> Duration {
        self.exit_time - self.entry_time
    }

    /// Holding period in (fractional) minutes.
    #[must_use]
    pub fn holding_minutes(&self) -> Decimal {
        Decimal::from(self.holding_period().num_milliseconds()) / Decimal::from(MS_PER_MINUTE)
    }

    /// Width of the execution bar.
    #[must_use]
    pub fn candle_range(&self) -> Decimal {
        self.candle_high.saturating_sub(self.candle_low)
    }

    /// Check the structural invariants of a trade record.
    ///
    /// The analytics never call this; it exists for ingestion, which decides
    /// whether to warn or reject.
    pub fn validate(&self) -> Result<(), TradeError> {
        if self.id.trim().is_empty() {
            return Err(TradeError::MissingField {
                trade_id: self.id.clone(),
                field: "id",
            });
        }
        if self.asset.trim().is_empty() {
            return Err(TradeError::MissingField {
                trade_id: self.id.clone(),
                field: "asset",
            });
        }

        for (field, value) in [
            ("requestedPrice", self.requested_price),
            ("entryPrice", self.entry_price),
            ("exitPrice", self.exit_price),
            ("size", self.size),
        ] {
            if value <= Decimal::ZERO {
                return Err(TradeError::NonPositive {
                    trade_id: self.id.clone(),
                    field,
                    value,
                });
            }
        }

        if self.exit_time < self.entry_time {
            return Err(TradeError::ExitBeforeEntry {
                trade_id: self.id.clone(),
            });
        }

        if self.candle_low < Decimal::ZERO || self.candle_high < self.candle_low {
            return Err(TradeError::InvalidCandle {
                trade_id: self.id.clone(),
                high: self.candle_high,
                low: self.candle_low,
            });
        }

        let components = self.network_fee + self.protocol_fee;
        if (self.fee - components).abs() > FEE_TOLERANCE {
            return Err(TradeError::FeeMismatch {
                trade_id: self.id.clone(),
                fee: self.fee,
                components,
            });
        }

        Ok(())
    }
}

/// Structural problems found in a trade record.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TradeError {
    /// A required text field is empty.
    #[error("trade '{trade_id}': missing {field}")]
    MissingField {
        /// Offending trade.
        trade_id: String,
        /// Field name.
        field: &'static str,
    },

    /// A price or size is zero or negative.
    #[error("trade '{trade_id}': {field} must be positive, got {value}")]
    NonPositive {
        /// Offending trade.
        trade_id: String,
        /// Field name.
        field: &'static str,
        /// Observed value.
        value: Decimal,
    },

    /// Exit happened before entry.
    #[error("trade '{trade_id}': exit time precedes entry time")]
    ExitBeforeEntry {
        /// Offending trade.
        trade_id: String,
    },

    /// Candle bounds are inverted or negative.
    #[error("trade '{trade_id}': invalid candle bounds high={high} low={low}")]
    InvalidCandle {
        /// Offending trade.
        trade_id: String,
        /// Candle high.
        high: Decimal,
        /// Candle low.
        low: Decimal,
    },

    /// `fee` does not equal `network_fee + protocol_fee`.
    #[error("trade '{trade_id}': fee {fee} does not match components {components}")]
    FeeMismatch {
        /// Offending trade.
        trade_id: String,
        /// Reported total fee.
        fee: Decimal,
        /// Sum of the fee components.
        components: Decimal,
    },
}


#[cfg(test)]
mod tests {
    use super::test_support::trade;
    use super::*;

    #[test]
    fn test_winner_loser_flags() {
        assert!(trade("1", "SOL", 5, 1).is_winner());
        assert!(trade("2", "SOL", -5, 1).is_loser());

        let flat = trade("3", "SOL", 0, 1);
        assert!(!flat.is_winner());
        assert!(!flat.is_loser());
    }

    #[test]
    fn test_volume_and_holding_minutes() {
        let mut t = trade("1", "SOL", 5, 1);
        t.size = Decimal::new(25, 1); // 2.5
        assert_eq!(t.volume(), Decimal::new(250, 0));
        assert_eq!(t.holding_minutes(), Decimal::new(60, 0));
    }

    #[test]
    fn test_validate_accepts_well_formed_trade() {
        assert_eq!(trade("1", "SOL", 5, 1).validate(), Ok(()));
    }

    #[test]
    fn test_validate_rejects_fee_mismatch() {
        let mut t = trade("1", "SOL", 5, 1);
        t.fee = Decimal::new(3, 0);
        t.network_fee = Decimal::ONE;
        t.protocol_fee = Decimal::ONE;
        assert!(matches!(t.validate(), Err(TradeError::FeeMismatch { .. })));
    }

    #[test]
    fn test_validate_rejects_inverted_candle() {
        let mut t = trade("1", "SOL", 5, 1);
        t.candle_high = Decimal::new(80, 0);
        assert!(matches!(t.validate(), Err(TradeError::InvalidCandle { .. })));
    }

    #[test]
    fn test_validate_rejects_exit_before_entry() {
        let mut t = trade("1", "SOL", 5, 1);
        t.exit_time = t.entry_time - Duration::minutes(1);
        assert!(matches!(
            t.validate(),
            Err(TradeError::ExitBeforeEntry { .. })
        ));
    }

    #[test]
    fn test_deserializes_camel_case_json() {
        let json = r#"{
            "id": "trade-000",
            "asset": "SOL",
            "side": "Short",
            "requestedPrice": 150.1,
            "entryPrice": 150.0,
            "exitPrice": 140.0,
            "size": 2,
            "fee": 0.3,
            "networkFee": 0.1,
            "protocolFee": 0.2,
            "realizedPnl": 19.7,
            "orderType": "Limit",
            "entryTime": "2025-12-01T10:00:00.000Z",
            "exitTime": "2025-12-01T11:30:00.000Z",
            "timeToFillMs": 850,
            "candleHigh": 152.0,
            "candleLow": 139.5
        }"#;

        let t: Trade = match serde_json::from_str(json) {
            Ok(t) => t,
            Err(e) => panic!("trade json should parse: {e}"),
        };
        assert_eq!(t.direction, Direction::Short);
        assert_eq!(t.order_type, OrderType::Limit);
        assert_eq!(t.realized_pnl, Decimal::new(197, 1));
        assert_eq!(t.holding_minutes(), Decimal::new(90, 0));
        assert_eq!(t.validate(), Ok(()));
    }
}
