//! Deterministic sample trade universe.
//!
//! Reproduces a realistic Solana-DEX journal: eight assets traded in rotation,
//! two trades per day from 2025-12-01, moves between −15% and +20%, and fees of
//! 0.5–2% of the gross move. All randomness comes from a seeded [`StdRng`] so
//! the same `(count, seed)` always yields the same trades.

use chrono::{DateTime, Duration, TimeZone, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rust_decimal::Decimal;

use crate::metrics::round_dp;
use crate::trade::{Direction, OrderType, Trade};

/// Assets the sample universe rotates through.
pub const SAMPLE_SYMBOLS: [&str; 8] = ["SOL", "BONK", "JUP", "WIF", "PYTH", "RNDR", "RAY", "ORCA"];

/// Significant digits kept on derived prices.
const PRICE_SIG_FIGS: u32 = 6;

/// Probability that a generated trade is long.
const LONG_PROBABILITY: f64 = 0.55;

/// Entry price bounds per asset as `(min, max, decimal places)` in scaled units.
fn price_range(asset: &str) -> (i64, i64, u32) {
    match asset {
        "SOL" => (8_000, 20_000, 2),
        "BONK" => (10, 50, 6),
        "JUP" => (50, 250, 2),
        "WIF" => (30, 350, 2),
        "PYTH" => (20, 80, 2),
        "RNDR" => (300, 1_200, 2),
        "RAY" => (100, 500, 2),
        "ORCA" => (100, 600, 2),
        _ => (100, 10_000, 2),
    }
}

/// Uniform decimal on the grid `[min, max] * 10^-dp`.
fn uniform(rng: &mut StdRng, min: i64, max: i64, dp: u32) -> Decimal {
    Decimal::new(rng.random_range(min..=max), dp)
}

fn sig_figs(value: Decimal) -> Decimal {
    value.round_sf(PRICE_SIG_FIGS).unwrap_or(value)
}

fn base_date() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 12, 1, 0, 0, 0)
        .single()
        .unwrap_or(DateTime::UNIX_EPOCH)
}

fn generate_trade(rng: &mut StdRng, index: usize) -> Trade {
    let asset = SAMPLE_SYMBOLS[index % SAMPLE_SYMBOLS.len()];
    let direction = if rng.random_bool(LONG_PROBABILITY) {
        Direction::Long
    } else {
        Direction::Short
    };
    let order_type = OrderType::ALL[rng.random_range(0..OrderType::ALL.len())];

    let (min, max, dp) = price_range(asset);
    let entry_price = uniform(rng, min, max, dp);

    let move_fraction = uniform(rng, -1_500, 2_000, 2) / Decimal::ONE_HUNDRED;
    let signed_move = match direction {
        Direction::Long => move_fraction,
        Direction::Short => -move_fraction,
    };
    let exit_price = sig_figs(entry_price * (Decimal::ONE + signed_move));

    let size = if asset == "BONK" {
        uniform(rng, 1_000_000, 50_000_000, 0)
    } else {
        uniform(rng, 10, 5_000, 1)
    };

    let gross = match direction {
        Direction::Long => (exit_price - entry_price) * size,
        Direction::Short => (entry_price - exit_price) * size,
    };
    let total_fee = gross.abs() * uniform(rng, 50, 200, 4);
    let network_share = uniform(rng, 30, 50, 2);
    let fee = round_dp(total_fee, 2);
    let network_fee = round_dp(total_fee * network_share, 2);
    let protocol_fee = fee - network_fee;
    let realized_pnl = round_dp(gross - total_fee, 2);

    let slippage_bps = uniform(rng, -500, 500, 1);
    let requested_price =
        sig_figs(entry_price / (Decimal::ONE + slippage_bps / Decimal::from(10_000)));

    let wick_low = uniform(rng, 0, 300, 4);
    let wick_high = uniform(rng, 0, 300, 4);
    let candle_low = sig_figs(entry_price.min(exit_price) * (Decimal::ONE - wick_low));
    let candle_high = sig_figs(entry_price.max(exit_price) * (Decimal::ONE + wick_high));

    let day_offset = i64::try_from(index / 2).unwrap_or(i64::MAX / 2);
    let entry_time = base_date()
        + Duration::days(day_offset)
        + Duration::hours(rng.random_range(0..24))
        + Duration::minutes(rng.random_range(0..60));
    let exit_time = entry_time + Duration::minutes(rng.random_range(5..=480));

    Trade {
        id: format!("trade-{index:03}"),
        asset: asset.to_string(),
        direction,
        requested_price,
        entry_price,
        exit_price,
        size,
        fee,
        network_fee,
        protocol_fee,
        realized_pnl,
        order_type,
        entry_time,
        exit_time,
        time_to_fill_ms: rng.random_range(200..=5_000),
        candle_high,
        candle_low,
    }
}

/// Generate `count` sample trades from `seed`.
#[must_use]
pub fn generate_sample(count: usize, seed: u64) -> Vec<Trade> {
    let mut rng = StdRng::seed_from_u64(seed);
    let trades: Vec<Trade> = (0..count).map(|i| generate_trade(&mut rng, i)).collect();
    tracing::debug!(count, seed, "Generated sample trades");
    trades
}
