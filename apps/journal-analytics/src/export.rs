//! CSV and JSON export of a trade set.

use std::borrow::Cow;
use std::fmt::Write;

use chrono::SecondsFormat;

use crate::trade::Trade;

const CSV_HEADER: &str = "id,asset,side,orderType,entryTime,exitTime,requestedPrice,entryPrice,exitPrice,size,fee,networkFee,protocolFee,realizedPnl,timeToFillMs,candleHigh,candleLow\n";

/// Quote a CSV field if it contains a delimiter, quote or newline.
fn escape(field: &str) -> Cow<'_, str> {
    if field.contains([',', '"', '\n', '\r']) {
        Cow::Owned(format!("\"{}\"", field.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(field)
    }
}

/// Export trades as CSV: a header row then one row per trade, in input order.
///
/// Timestamps are RFC 3339 UTC with millisecond precision.
#[must_use]
pub fn export_csv(trades: &[Trade]) -> String {
    let mut csv = String::from(CSV_HEADER);

    for trade in trades {
        let _ = writeln!(
            csv,
            "{},{},{},{},{},{},{},{},{},{},{},{},{},{},{},{},{}",
            escape(&trade.id),
            escape(&trade.asset),
            trade.direction.as_str(),
            trade.order_type.as_str(),
            trade.entry_time.to_rfc3339_opts(SecondsFormat::Millis, true),
            trade.exit_time.to_rfc3339_opts(SecondsFormat::Millis, true),
            trade.requested_price,
            trade.entry_price,
            trade.exit_price,
            trade.size,
            trade.fee,
            trade.network_fee,
            trade.protocol_fee,
            trade.realized_pnl,
            trade.time_to_fill_ms,
            trade.candle_high,
            trade.candle_low,
        );
    }

    csv
}

/// Export trades as a pretty-printed JSON array in the ingestion format.
///
/// # Errors
///
/// Returns the serializer error, which does not occur for well-formed trades.
pub fn export_json(trades: &[Trade]) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(trades)
}
