//! Every derived view for one filter state, computed in a single pass.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::composition::{
    CompositionMode, CompositionSlice, FeeSlice, asset_composition, fee_composition,
};
use super::directional::DirectionalSummary;
use super::efficiency::EfficiencySummary;
use super::equity::{DrawdownStats, EquityPoint, build_equity_curve};
use super::kpi::KpiSummary;
use super::order_type::{OrderTypeStats, order_type_breakdown};
use super::time_buckets::{BucketPolicy, TimeBuckets};
use crate::filter::FilterCriteria;
use crate::trade::{Trade, TradeStore};

/// Presentation choices that shape (but never filter) the views.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DashboardOptions {
    /// Sizing quantity for the composition slices.
    pub composition_mode: CompositionMode,
    /// Asset flagged as highlighted in the composition output.
    pub highlighted_asset: Option<String>,
    /// Time-zone policy for hour/weekday buckets.
    pub bucket_policy: BucketPolicy,
}

/// All derived views over the filtered trade set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardSnapshot {
    /// Criteria the snapshot was computed for.
    pub criteria: FilterCriteria,
    /// Latest exit time in the full universe.
    pub window_anchor: Option<DateTime<Utc>>,
    /// Earliest exit time kept by the window (`None` = unbounded).
    pub window_cutoff: Option<DateTime<Utc>>,
    /// Number of trades that passed the filter.
    pub trade_count: usize,
    /// Headline KPIs.
    pub kpi: KpiSummary,
    /// Cumulative P&L and drawdown per trade.
    pub equity_curve: Vec<EquityPoint>,
    /// Drawdown summary of `equity_curve`.
    pub drawdown: DrawdownStats,
    /// Long vs short partition.
    pub directional: DirectionalSummary,
    /// Hour-of-day and weekday buckets.
    pub time_buckets: TimeBuckets,
    /// Per-asset composition slices.
    pub composition: Vec<CompositionSlice>,
    /// Per-asset fee breakdown.
    pub fees: Vec<FeeSlice>,
    /// Execution-efficiency views.
    pub efficiency: EfficiencySummary,
    /// Per-order-type performance.
    pub order_types: Vec<OrderTypeStats>,
}

impl DashboardSnapshot {
    /// Filter the store and compute every view sequentially.
    #[must_use]
    pub fn compute(
        store: &TradeStore,
        criteria: &FilterCriteria,
        options: &DashboardOptions,
    ) -> Self {
        let trades = store.filter(criteria);
        Self::from_filtered(&trades, criteria, store.latest_exit_time(), options)
    }

    /// Same result as [`Self::compute`], with independent aggregators run on
    /// the rayon pool.
    #[must_use]
    pub fn compute_parallel(
        store: &TradeStore,
        criteria: &FilterCriteria,
        options: &DashboardOptions,
    ) -> Self {
        let trades = store.filter(criteria);
        Self::from_filtered_parallel(&trades, criteria, store.latest_exit_time(), options)
    }

    /// Compute every view over an already-filtered trade set.
    ///
    /// `trades` must be the output of filtering the universe with `criteria`
    /// and `window_anchor` (see [`TradeStore::filter`]); callers that also
    /// export or annotate the filtered set use this to share one filter pass.
    #[must_use]
    pub fn from_filtered(
        trades: &[Trade],
        criteria: &FilterCriteria,
        window_anchor: Option<DateTime<Utc>>,
        options: &DashboardOptions,
    ) -> Self {
        let window_cutoff = Self::window(criteria, window_anchor, trades.len());
        let equity_curve = build_equity_curve(trades);
        let drawdown = DrawdownStats::from_curve(&equity_curve);

        Self {
            criteria: criteria.clone(),
            window_anchor,
            window_cutoff,
            trade_count: trades.len(),
            kpi: KpiSummary::from_trades(trades),
            equity_curve,
            drawdown,
            directional: DirectionalSummary::from_trades(trades),
            time_buckets: TimeBuckets::from_trades(trades, options.bucket_policy),
            composition: asset_composition(
                trades,
                options.composition_mode,
                options.highlighted_asset.as_deref(),
            ),
            fees: fee_composition(trades),
            efficiency: EfficiencySummary::from_trades(trades),
            order_types: order_type_breakdown(trades),
        }
    }

    /// Parallel form of [`Self::from_filtered`]; the result is identical.
    #[must_use]
    pub fn from_filtered_parallel(
        trades: &[Trade],
        criteria: &FilterCriteria,
        window_anchor: Option<DateTime<Utc>>,
        options: &DashboardOptions,
    ) -> Self {
        let window_cutoff = Self::window(criteria, window_anchor, trades.len());

        let ((kpi, (equity_curve, drawdown)), ((directional, time_buckets), rest)) = rayon::join(
            || {
                rayon::join(
                    || KpiSummary::from_trades(trades),
                    || {
                        let curve = build_equity_curve(trades);
                        let drawdown = DrawdownStats::from_curve(&curve);
                        (curve, drawdown)
                    },
                )
            },
            || {
                rayon::join(
                    || {
                        rayon::join(
                            || DirectionalSummary::from_trades(trades),
                            || TimeBuckets::from_trades(trades, options.bucket_policy),
                        )
                    },
                    || {
                        let (composition, fees) = rayon::join(
                            || {
                                asset_composition(
                                    trades,
                                    options.composition_mode,
                                    options.highlighted_asset.as_deref(),
                                )
                            },
                            || fee_composition(trades),
                        );
                        let (efficiency, order_types) = rayon::join(
                            || EfficiencySummary::from_trades(trades),
                            || order_type_breakdown(trades),
                        );
                        (composition, fees, efficiency, order_types)
                    },
                )
            },
        );
        let (composition, fees, efficiency, order_types) = rest;

        Self {
            criteria: criteria.clone(),
            window_anchor,
            window_cutoff,
            trade_count: trades.len(),
            kpi,
            equity_curve,
            drawdown,
            directional,
            time_buckets,
            composition,
            fees,
            efficiency,
            order_types,
        }
    }

    /// Resolve the window cutoff for the snapshot header.
    fn window(
        criteria: &FilterCriteria,
        anchor: Option<DateTime<Utc>>,
        filtered: usize,
    ) -> Option<DateTime<Utc>> {
        tracing::debug!(
            filtered,
            window = %criteria.window,
            anchor = ?anchor,
            "Computing dashboard snapshot"
        );

        criteria.window.cutoff(anchor)
    }
}
