//! Glue between configuration, the trade universe and rendered output.

use std::fmt::Write as _;
use std::io::Write as _;

use crate::config::{OutputFormat, SourceConfig};
use crate::error::{AnalyticsError, Result};
use crate::export::export_csv;
use crate::metrics::{
    DashboardSnapshot, format_decimal, format_duration_minutes, format_fill_time_ms,
    format_metric, format_pct,
};
use crate::sample::generate_sample;
use crate::trade::{Trade, TradeStore, ingest, read_trades_json};

/// Build the trade universe from the configured source.
///
/// # Errors
///
/// Returns an error if the trade file cannot be loaded, or if a trade is
/// invalid and strict validation is enabled.
pub fn load_universe(source: &SourceConfig) -> Result<TradeStore> {
    let trades = match &source.trades_path {
        Some(path) => read_trades_json(path)?,
        None => {
            let sample = source.sample.unwrap_or_default();
            generate_sample(sample.count, sample.seed)
        }
    };
    Ok(ingest(trades, source.strict_validation)?)
}

/// Render the requested output.
///
/// `filtered` is the trade set the snapshot was computed over; it is only
/// used by the CSV format. `annotated` lists ids that carry a journal note.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn render(
    format: OutputFormat,
    snapshot: &DashboardSnapshot,
    filtered: &[Trade],
    annotated: &[String],
) -> Result<String> {
    Ok(match format {
        OutputFormat::Json => serde_json::to_string_pretty(snapshot)?,
        OutputFormat::Csv => export_csv(filtered),
        OutputFormat::Summary => render_summary(snapshot, annotated.len()),
    })
}

/// Human-readable summary of a snapshot.
#[must_use]
pub fn render_summary(snapshot: &DashboardSnapshot, annotated: usize) -> String {
    let kpi = &snapshot.kpi;
    let eff = &snapshot.efficiency;
    let mut out = String::new();

    let _ = writeln!(
        out,
        "Trades: {} (window {}, {} winners, {} losers, {} annotated)",
        snapshot.trade_count,
        snapshot.criteria.window,
        kpi.winning_trades,
        kpi.losing_trades,
        annotated
    );
    let _ = writeln!(
        out,
        "Total P&L: {} ({}% of volume)",
        format_decimal(kpi.total_pnl),
        format_decimal(kpi.pnl_percent)
    );
    let _ = writeln!(out, "Win rate: {}", format_pct(kpi.win_rate));
    let _ = writeln!(out, "Profit factor: {}", format_metric(kpi.profit_factor));
    let _ = writeln!(out, "Win/loss ratio: {}", format_metric(eff.win_loss_ratio));
    let _ = writeln!(
        out,
        "Volume: {}  Fees: {}",
        format_decimal(kpi.total_volume),
        format_decimal(kpi.total_fees)
    );
    let _ = writeln!(
        out,
        "Largest win: {}  Largest loss: {}",
        format_decimal(kpi.largest_win),
        format_decimal(kpi.largest_loss)
    );
    let _ = writeln!(
        out,
        "Avg hold: {}  Avg range: {}%",
        format_duration_minutes(kpi.avg_duration_minutes),
        format_decimal(kpi.avg_range_percent)
    );
    let _ = writeln!(
        out,
        "Max drawdown: {}  Final equity: {}",
        format_decimal(snapshot.drawdown.max_drawdown),
        format_decimal(snapshot.drawdown.final_equity)
    );
    let _ = writeln!(
        out,
        "Slippage (bps): avg {} worst {} best {}",
        format_decimal(eff.slippage.avg_bps),
        format_decimal(eff.slippage.worst_bps),
        format_metric(eff.slippage.best_bps)
    );
    let _ = writeln!(
        out,
        "Entry/exit quality: avg {} best {}",
        eff.quality.avg_score, eff.quality.best_score
    );
    let _ = writeln!(
        out,
        "Time to fill: avg {} median {}",
        format_fill_time_ms(eff.fill_time.avg_ms),
        format_fill_time_ms(eff.fill_time.median_ms)
    );

    for stats in snapshot.directional.as_array() {
        let _ = writeln!(
            out,
            "{}: {} trades ({}%), P&L {}",
            stats.direction.as_str(),
            stats.count,
            format_decimal(stats.share_pct),
            format_decimal(stats.pnl)
        );
    }
    for stats in &snapshot.order_types {
        let _ = writeln!(
            out,
            "{}: {} trades, avg P&L {}",
            stats.order_type.as_str(),
            stats.count,
            format_decimal(stats.avg_pnl)
        );
    }

    out
}

/// Write rendered output to a file, or to stdout when `path` is `None`.
///
/// # Errors
///
/// Returns [`AnalyticsError::Write`] if the destination cannot be written.
pub fn write_output(path: Option<&str>, contents: &str) -> Result<()> {
    match path {
        Some(path) => std::fs::write(path, contents).map_err(|source| AnalyticsError::Write {
            path: path.to_string(),
            source,
        }),
        None => std::io::stdout()
            .lock()
            .write_all(contents.as_bytes())
            .map_err(|source| AnalyticsError::Write {
                path: "<stdout>".to_string(),
                source,
            }),
    }
}
