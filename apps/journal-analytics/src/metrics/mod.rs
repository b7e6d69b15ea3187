//! Metrics engine: pure aggregators over a filtered trade set.
//!
//! Every function here is deterministic and infallible:
//! - KPI summary (P&L, win rate, volume, fees, profit factor)
//! - Equity curve and drawdown (peak starts at zero)
//! - Long/short partition and per-asset composition
//! - Hour-of-day and weekday buckets
//! - Execution efficiency (slippage, quality, fill time)
//! - Per-order-type performance
//!
//! Ratios that can be infinite or undefined are carried as [`MetricValue`].

mod composition;
mod constants;
mod dashboard;
mod directional;
mod efficiency;
mod equity;
mod format;
mod kpi;
mod math;
mod order_type;
mod time_buckets;
mod value;

pub use composition::{
    CompositionMode, CompositionSlice, FeeSlice, ParseModeError, asset_composition,
    fee_composition,
};
pub use dashboard::{DashboardOptions, DashboardSnapshot};
pub use directional::{DirectionStats, DirectionalSummary};
pub use efficiency::{
    EfficiencySummary, FillTimeStats, QualityStats, SlippageStats, quality_score, slippage_bps,
};
pub use equity::{DrawdownStats, EquityPoint, build_equity_curve};
pub use format::{
    format_decimal, format_duration_minutes, format_fill_time_ms, format_metric, format_pct,
};
pub use kpi::KpiSummary;
pub use math::round_dp;
pub use order_type::{OrderTypeStats, order_type_breakdown};
pub use time_buckets::{BucketPolicy, TimeBucket, TimeBuckets};
pub use value::MetricValue;
