//! Trade source configuration.

use serde::{Deserialize, Serialize};

/// Where the trade universe comes from.
///
/// At most one of `trades_path` and `sample` may be set; with neither, the
/// default sample universe is generated.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SourceConfig {
    /// Path to a JSON array of trades.
    #[serde(default)]
    pub trades_path: Option<String>,
    /// Deterministic sample universe.
    #[serde(default)]
    pub sample: Option<SampleConfig>,
    /// Reject the whole load on the first invalid trade instead of skipping it.
    #[serde(default)]
    pub strict_validation: bool,
}

/// Sample generator settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SampleConfig {
    /// Number of trades to generate.
    #[serde(default = "default_sample_count")]
    pub count: usize,
    /// RNG seed.
    #[serde(default = "default_sample_seed")]
    pub seed: u64,
}

impl Default for SampleConfig {
    fn default() -> Self {
        Self {
            count: default_sample_count(),
            seed: default_sample_seed(),
        }
    }
}

pub(crate) const fn default_sample_count() -> usize {
    60
}

pub(crate) const fn default_sample_seed() -> u64 {
    42
}
