//! Trade ingestion from JSON.

use std::path::Path;

use thiserror::Error;

use super::{Trade, TradeError, TradeStore};

/// Failure to load a trade file.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The file could not be read.
    #[error("Failed to read trades from '{path}': {source}")]
    Read {
        /// Path to the trade file.
        path: String,
        /// The underlying IO error.
        source: std::io::Error,
    },

    /// The file is not a JSON array of trades.
    #[error("Failed to parse trades from '{path}': {source}")]
    Parse {
        /// Path to the trade file.
        path: String,
        /// The underlying JSON error.
        source: serde_json::Error,
    },

    /// A trade failed validation in strict mode.
    #[error("Invalid trade: {0}")]
    Invalid(#[from] TradeError),
}

/// Read a JSON array of trades from disk.
///
/// # Errors
///
/// Returns [`LoadError::Read`] or [`LoadError::Parse`].
pub fn read_trades_json(path: impl AsRef<Path>) -> Result<Vec<Trade>, LoadError> {
    let path = path.as_ref();
    let contents = std::fs::read_to_string(path).map_err(|source| LoadError::Read {
        path: path.display().to_string(),
        source,
    })?;
    serde_json::from_str(&contents).map_err(|source| LoadError::Parse {
        path: path.display().to_string(),
        source,
    })
}

/// Validate trades and build the immutable store.
///
/// Invalid trades are logged and kept unless `strict` is set, in which case
/// the first violation aborts the load.
///
/// # Errors
///
/// Returns [`LoadError::Invalid`] in strict mode.
pub fn ingest(trades: Vec<Trade>, strict: bool) -> Result<TradeStore, LoadError> {
    let mut invalid = 0usize;
    for trade in &trades {
        if let Err(e) = trade.validate() {
            if strict {
                return Err(e.into());
            }
            tracing::warn!(error = %e, "Keeping trade that failed validation");
            invalid += 1;
        }
    }

    let store = TradeStore::new(trades);
    tracing::info!(
        trades = store.len(),
        symbols = store.symbols().len(),
        invalid,
        "Trade universe loaded"
    );
    Ok(store)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use rust_decimal::Decimal;

    use super::*;
    use crate::trade::test_support::trade;

    fn broken() -> Trade {
        let mut t = trade("bad", "SOL", 1, 1);
        t.size = Decimal::ZERO;
        t
    }

    #[test]
    fn test_lenient_keeps_invalid() {
        let Ok(store) = ingest(vec![trade("1", "SOL", 1, 1), broken()], false) else {
            panic!("lenient ingest should succeed");
        };
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_strict_rejects_invalid() {
        let Err(err) = ingest(vec![trade("1", "SOL", 1, 1), broken()], true) else {
            panic!("strict ingest should fail");
        };
        assert!(matches!(err, LoadError::Invalid(TradeError::NonPositive { .. })));
    }

    #[test]
    fn test_read_camel_case_json() {
        let json = r#"[{
            "id": "trade-001", "asset": "SOL", "side": "Long",
            "requestedPrice": 100, "entryPrice": "100.05", "exitPrice": 104.2,
            "size": 2, "fee": 0.5, "networkFee": 0.2, "protocolFee": 0.3,
            "realizedPnl": 7.8, "orderType": "Limit",
            "entryTime": "2025-12-01T09:00:00Z", "exitTime": "2025-12-01T11:30:00Z",
            "timeToFillMs": 850, "candleHigh": 105, "candleLow": 99.5
        }]"#;
        let mut file = match tempfile::NamedTempFile::new() {
            Ok(f) => f,
            Err(e) => panic!("temp file: {e}"),
        };
        if let Err(e) = file.write_all(json.as_bytes()) {
            panic!("write temp file: {e}");
        }

        let trades = match read_trades_json(file.path()) {
            Ok(t) => t,
            Err(e) => panic!("should parse trades: {e}"),
        };
        assert_eq!(trades.len(), 1);
        assert_eq!(trades[0].entry_price, Decimal::new(10_005, 2));
        assert_eq!(trades[0].time_to_fill_ms, 850);
        assert!(trades[0].validate().is_ok());
    }

    #[test]
    fn test_missing_file() {
        let Err(err) = read_trades_json("/nonexistent/trades.json") else {
            panic!("missing file should fail");
        };
        assert!(err.to_string().contains("/nonexistent/trades.json"));
    }
}
