//! Configuration for the journal analytics CLI.
//!
//! YAML with `${VAR}` / `${VAR:-default}` environment interpolation,
//! validated after parsing. Every section is optional.
//!
//! # Usage
//!
//! ```rust,ignore
//! use journal_analytics::config::load_config;
//!
//! // Load from default path (journal.yaml)
//! let config = load_config(None)?;
//!
//! // Load from custom path
//! let config = load_config(Some("custom/journal.yaml"))?;
//! ```

mod dashboard;
mod observability;
mod output;
mod source;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use dashboard::{
    BucketingConfig, DashboardConfig, FilterConfig, MAX_UTC_OFFSET_MINUTES,
    MIN_UTC_OFFSET_MINUTES,
};
pub use observability::{LOG_FORMATS, LoggingConfig, ObservabilityConfig};
pub use output::{OutputConfig, OutputFormat};
pub use source::{SampleConfig, SourceConfig};

use crate::metrics::{BucketPolicy, DashboardOptions};

/// Config file used when no path is given.
pub const DEFAULT_CONFIG_PATH: &str = "journal.yaml";

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read configuration file.
    #[error("Failed to read config file '{path}': {source}")]
    ReadError {
        /// Path to the config file.
        path: String,
        /// The underlying IO error.
        source: std::io::Error,
    },

    /// Failed to parse YAML configuration.
    #[error("Failed to parse config YAML: {0}")]
    ParseError(#[from] serde_yaml_bw::Error),

    /// Configuration validation failed.
    #[error("Config validation failed: {0}")]
    ValidationError(String),
}

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Trade source.
    #[serde(default)]
    pub source: SourceConfig,
    /// Initial filter selection.
    #[serde(default)]
    pub filter: FilterConfig,
    /// Presentation options.
    #[serde(default)]
    pub dashboard: DashboardConfig,
    /// Time-bucket policy.
    #[serde(default)]
    pub bucketing: BucketingConfig,
    /// Output destination and format.
    #[serde(default)]
    pub output: OutputConfig,
    /// Observability configuration.
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

impl Config {
    /// Dashboard options resolved from the `dashboard` and `bucketing` sections.
    ///
    /// An out-of-range offset (only possible if validation was bypassed)
    /// falls back to UTC.
    #[must_use]
    pub fn dashboard_options(&self) -> DashboardOptions {
        DashboardOptions {
            composition_mode: self.dashboard.composition_mode,
            highlighted_asset: self.dashboard.highlighted_asset.clone(),
            bucket_policy: self.bucketing.policy().unwrap_or_else(BucketPolicy::utc),
        }
    }
}

// ============================================
// Configuration Loading
// ============================================

/// Load configuration from a YAML file with environment variable interpolation.
///
/// # Arguments
///
/// * `path` - Optional path to the config file. Defaults to `journal.yaml`.
///
/// # Errors
///
/// Returns a `ConfigError` if the file cannot be read, parsed, or validated.
pub fn load_config(path: Option<&str>) -> Result<Config, ConfigError> {
    let path = path.unwrap_or(DEFAULT_CONFIG_PATH);

    let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
        path: path.to_string(),
        source: e,
    })?;

    let config = load_config_from_string(&contents)?;
    tracing::debug!(path, "Loaded configuration");
    Ok(config)
}

/// Load configuration from a YAML string (useful for testing).
///
/// # Errors
///
/// Returns a `ConfigError` if the YAML cannot be parsed or validated.
pub fn load_config_from_string(yaml: &str) -> Result<Config, ConfigError> {
    let interpolated = interpolate_env_vars(yaml);
    let config: Config = serde_yaml_bw::from_str(&interpolated)?;
    validate_config(&config)?;
    Ok(config)
}

/// Interpolate environment variables in a string.
///
/// Supports both `${VAR}` and `${VAR:-default}` syntax.
#[allow(clippy::expect_used)] // constant pattern
fn interpolate_env_vars(input: &str) -> String {
    use std::sync::OnceLock;

    static ENV_VAR_REGEX: OnceLock<regex::Regex> = OnceLock::new();

    let re = ENV_VAR_REGEX.get_or_init(|| {
        regex::Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)(?::-([^}]*))?\}")
            .expect("env var regex is valid")
    });

    re.replace_all(input, |cap: &regex::Captures<'_>| {
        let default_value = cap.get(2).map_or("", |m| m.as_str());
        match std::env::var(&cap[1]) {
            Ok(v) if !v.is_empty() => v,
            _ => default_value.to_string(),
        }
    })
    .into_owned()
}

/// Validate configuration values.
fn validate_config(config: &Config) -> Result<(), ConfigError> {
    let source = &config.source;
    if source.trades_path.is_some() && source.sample.is_some() {
        return Err(ConfigError::ValidationError(
            "source.trades_path and source.sample are mutually exclusive".to_string(),
        ));
    }
    if source.sample.is_some_and(|s| s.count == 0) {
        return Err(ConfigError::ValidationError(
            "source.sample.count must be positive".to_string(),
        ));
    }

    if config.filter.symbols.iter().any(|s| s.trim().is_empty()) {
        return Err(ConfigError::ValidationError(
            "filter.symbols must not contain empty entries".to_string(),
        ));
    }

    if config.bucketing.policy().is_none() {
        return Err(ConfigError::ValidationError(format!(
            "bucketing.utc_offset_minutes must be between {MIN_UTC_OFFSET_MINUTES} and {MAX_UTC_OFFSET_MINUTES}"
        )));
    }

    let format = config.observability.logging.format.as_str();
    if !LOG_FORMATS.contains(&format) {
        return Err(ConfigError::ValidationError(format!(
            "observability.logging.format must be one of: {LOG_FORMATS:?}"
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::TimeWindow;
    use crate::metrics::CompositionMode;

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert!(config.source.trades_path.is_none());
        assert!(!config.source.strict_validation);
        assert_eq!(config.filter.window, TimeWindow::AllTime);
        assert_eq!(config.dashboard.composition_mode, CompositionMode::Volume);
        assert_eq!(config.output.format, OutputFormat::Summary);
        assert_eq!(config.observability.logging.level, "info");
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_load_empty_config() {
        let config = match load_config_from_string("{}") {
            Ok(c) => c,
            Err(e) => panic!("should load empty config: {e}"),
        };
        assert_eq!(config.bucketing.utc_offset_minutes, 0);
        assert_eq!(config.dashboard_options().bucket_policy, BucketPolicy::utc());
    }

    #[test]
    fn test_full_config_parse() {
        let yaml = r#"
source:
  sample:
    count: 25
    seed: 7
  strict_validation: true

filter:
  symbols: ["SOL", "JUP"]
  window: "7d"

dashboard:
  composition_mode: pnl
  highlighted_asset: SOL
  parallel: true

bucketing:
  utc_offset_minutes: -300

output:
  format: json
  path: out/snapshot.json
  annotations_path: notes.json

observability:
  logging:
    level: debug
    format: json
"#;

        let config = match load_config_from_string(yaml) {
            Ok(c) => c,
            Err(e) => panic!("should parse full config: {e}"),
        };

        assert_eq!(
            config.source.sample,
            Some(SampleConfig { count: 25, seed: 7 })
        );
        assert!(config.source.strict_validation);

        let criteria = config.filter.criteria();
        assert_eq!(criteria.window, TimeWindow::Last7Days);
        assert!(criteria.symbols.contains("JUP"));

        let options = config.dashboard_options();
        assert_eq!(options.composition_mode, CompositionMode::Pnl);
        assert_eq!(options.highlighted_asset.as_deref(), Some("SOL"));
        assert_eq!(options.bucket_policy.offset().local_minus_utc(), -300 * 60);
        assert!(config.dashboard.parallel);

        assert_eq!(config.output.format, OutputFormat::Json);
        assert_eq!(config.output.path.as_deref(), Some("out/snapshot.json"));
        assert_eq!(config.observability.logging.format, "json");
    }

    #[test]
    fn test_sample_defaults() {
        let config = match load_config_from_string("source:\n  sample: {}\n") {
            Ok(c) => c,
            Err(e) => panic!("should load sample config: {e}"),
        };
        assert_eq!(config.source.sample, Some(SampleConfig::default()));
    }

    #[test]
    fn test_env_var_with_default_when_missing() {
        let input = "window: ${JOURNAL_CONFIG_TEST_NONEXISTENT_VAR:-30d}";
        let result = interpolate_env_vars(input);
        assert_eq!(result, "window: 30d");
    }

    #[test]
    #[expect(clippy::literal_string_with_formatting_args)] // ${...} is env var syntax, not format args
    fn test_env_var_with_default_uses_existing() {
        // PATH should always exist
        let input = "path: ${PATH:-default}";
        let result = interpolate_env_vars(input);

        assert_ne!(result, "path: default");
        assert!(result.starts_with("path: "));
    }

    #[test]
    fn test_env_var_without_default_becomes_empty() {
        let input = "trades_path: ${JOURNAL_CONFIG_TEST_UNLIKELY_TO_EXIST}";
        let result = interpolate_env_vars(input);
        assert_eq!(result, "trades_path: ");
    }

    #[test]
    fn test_validation_exclusive_sources() {
        let yaml = r"
source:
  trades_path: trades.json
  sample:
    count: 10
";
        let Err(err) = load_config_from_string(yaml) else {
            panic!("expected error for two sources");
        };
        assert!(err.to_string().contains("mutually exclusive"));
    }

    #[test]
    fn test_validation_zero_sample_count() {
        let Err(err) = load_config_from_string("source:\n  sample:\n    count: 0\n") else {
            panic!("expected error for empty sample");
        };
        assert!(err.to_string().contains("count"));
    }

    #[test]
    fn test_validation_offset_range() {
        let Err(err) = load_config_from_string("bucketing:\n  utc_offset_minutes: 900\n") else {
            panic!("expected error for offset out of range");
        };
        assert!(err.to_string().contains("utc_offset_minutes"));
        assert!(load_config_from_string("bucketing:\n  utc_offset_minutes: 840\n").is_ok());
    }

    #[test]
    fn test_validation_log_format() {
        let yaml = "observability:\n  logging:\n    format: xml\n";
        let Err(err) = load_config_from_string(yaml) else {
            panic!("expected error for unknown log format");
        };
        assert!(err.to_string().contains("logging.format"));
    }

    #[test]
    fn test_invalid_window_is_parse_error() {
        let Err(err) = load_config_from_string("filter:\n  window: 1y\n") else {
            panic!("expected parse error for unknown window");
        };
        assert!(matches!(err, ConfigError::ParseError(_)));
    }
}
