// Allow unwrap/expect in tests - tests should panic on unexpected errors
// Allow test-specific patterns and pedantic lints in test code
#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::too_many_lines,
        clippy::needless_pass_by_value,
        clippy::needless_collect,
        clippy::items_after_statements
    )
)]

//! Journal Analytics - trading-performance metrics over a trade journal
//!
//! Derives dashboard views from a finite, immutable set of completed trades.
//!
//! # Pipeline
//!
//! - **Trade Store** (`trade`): immutable universe plus known symbols
//! - **Filter Stage** (`filter`): symbol selection and a trailing window
//!   anchored at the universe's latest exit
//! - **Metrics Engine** (`metrics`): independent pure aggregators
//!   - KPI summary, equity curve and drawdown
//!   - Long/short, per-asset and per-order-type breakdowns
//!   - Hour-of-day and weekday buckets
//!   - Execution efficiency (slippage, entry/exit quality, fill time)
//!
//! Everything is recomputed in full for each filter state; see
//! [`DashboardSnapshot`].
//!
//! # Collaborators
//!
//! - `journal`: sortable journal and the annotation store port
//! - `export`: CSV/JSON export
//! - `sample`: deterministic sample universe
//! - `config`, `telemetry`, `report`: CLI plumbing

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::pedantic)]

/// YAML configuration with environment interpolation.
pub mod config;

/// Crate-level error type.
pub mod error;

/// CSV and JSON export.
pub mod export;

/// Filter stage.
pub mod filter;

/// Journal ordering and annotations.
pub mod journal;

/// Metrics engine.
pub mod metrics;

/// Config-driven loading and rendering used by the CLI.
pub mod report;

/// Sample trade generator.
pub mod sample;

/// Tracing subscriber setup.
pub mod telemetry;

/// Trade model and store.
pub mod trade;

pub use error::{AnalyticsError, Result};
pub use filter::{FilterCriteria, TimeWindow, filter_trades, filter_with_anchor};
pub use metrics::{DashboardOptions, DashboardSnapshot, MetricValue};
pub use trade::{Direction, OrderType, Trade, TradeError, TradeStore};
