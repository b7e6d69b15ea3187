//! Filter, dashboard and bucketing configuration.

use serde::{Deserialize, Serialize};

use crate::filter::{FilterCriteria, TimeWindow};
use crate::metrics::{BucketPolicy, CompositionMode};

/// Initial filter selection.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FilterConfig {
    /// Selected symbols; empty keeps all.
    #[serde(default)]
    pub symbols: Vec<String>,
    /// Trailing window.
    #[serde(default)]
    pub window: TimeWindow,
}

impl FilterConfig {
    /// Build filter criteria from this selection.
    #[must_use]
    pub fn criteria(&self) -> FilterCriteria {
        FilterCriteria::new(self.symbols.iter().cloned(), self.window)
    }
}

/// Presentation options.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DashboardConfig {
    /// Sizing quantity for composition slices.
    #[serde(default)]
    pub composition_mode: CompositionMode,
    /// Asset to flag as highlighted.
    #[serde(default)]
    pub highlighted_asset: Option<String>,
    /// Fan aggregators out on the rayon pool.
    #[serde(default)]
    pub parallel: bool,
}

/// Time-zone policy for hour/weekday buckets.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct BucketingConfig {
    /// Fixed offset east of UTC in minutes (0 = UTC).
    #[serde(default)]
    pub utc_offset_minutes: i32,
}

/// Smallest accepted offset (UTC-12:00).
pub const MIN_UTC_OFFSET_MINUTES: i32 = -720;
/// Largest accepted offset (UTC+14:00).
pub const MAX_UTC_OFFSET_MINUTES: i32 = 840;

impl BucketingConfig {
    /// Resolve the bucket policy; `None` if the offset is out of range.
    #[must_use]
    pub fn policy(&self) -> Option<BucketPolicy> {
        if (MIN_UTC_OFFSET_MINUTES..=MAX_UTC_OFFSET_MINUTES).contains(&self.utc_offset_minutes) {
            BucketPolicy::from_offset_minutes(self.utc_offset_minutes)
        } else {
            None
        }
    }
}
