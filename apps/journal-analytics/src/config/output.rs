//! Output configuration.

use serde::{Deserialize, Serialize};

/// Rendering of the CLI result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Full dashboard snapshot as JSON.
    Json,
    /// Filtered trades as CSV.
    Csv,
    /// Human-readable KPI summary.
    #[default]
    Summary,
}

/// Output destination and format.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Output format.
    #[serde(default)]
    pub format: OutputFormat,
    /// File to write; stdout when absent.
    #[serde(default)]
    pub path: Option<String>,
    /// JSON annotation store to cross-reference.
    #[serde(default)]
    pub annotations_path: Option<String>,
}
