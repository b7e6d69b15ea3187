//! Trade builders shared by the integration tests.

#![allow(dead_code)]

use chrono::{DateTime, Duration, TimeZone, Utc};
use journal_analytics::{Direction, OrderType, Trade};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// UTC timestamp at the top of an hour.
pub fn at(year: i32, month: u32, day: u32, hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, hour, 0, 0)
        .single()
        .unwrap_or_else(|| panic!("invalid timestamp {year}-{month}-{day}T{hour}"))
}

/// Long market trade: 1 unit at 100, no fees, held 30 minutes, exiting at `exit`.
pub fn trade(id: &str, asset: &str, pnl: Decimal, exit: DateTime<Utc>) -> Trade {
    Trade {
        id: id.to_string(),
        asset: asset.to_string(),
        direction: Direction::Long,
        requested_price: dec!(100),
        entry_price: dec!(100),
        exit_price: dec!(100) + pnl,
        size: Decimal::ONE,
        fee: Decimal::ZERO,
        network_fee: Decimal::ZERO,
        protocol_fee: Decimal::ZERO,
        realized_pnl: pnl,
        order_type: OrderType::Market,
        entry_time: exit - Duration::minutes(30),
        exit_time: exit,
        time_to_fill_ms: 1_000,
        candle_high: dec!(110),
        candle_low: dec!(90),
    }
}
