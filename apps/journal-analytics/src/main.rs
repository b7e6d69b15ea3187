//! Journal Analytics Binary
//!
//! Loads a trade universe, applies the configured filter and prints the
//! derived dashboard views.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin journal-analytics -- [config.yaml]
//! ```
//!
//! # Environment Variables
//!
//! - `JOURNAL_CONFIG`: config path when no argument is given (default: `journal.yaml`)
//! - `RUST_LOG`: overrides `observability.logging.level`
//!
//! Any `${VAR}` referenced by the config may also come from a `.env` file.

use anyhow::Context;
use journal_analytics::config::{self, Config, DEFAULT_CONFIG_PATH};
use journal_analytics::journal::{JsonFileAnnotationStore, annotated_ids};
use journal_analytics::metrics::DashboardSnapshot;
use journal_analytics::{report, telemetry};

fn main() -> anyhow::Result<()> {
    load_dotenv();

    let config_path = config_path();
    let config = config::load_config(Some(&config_path))
        .with_context(|| format!("loading configuration from {config_path}"))?;

    telemetry::init_tracing(&config.observability.logging).context("initializing tracing")?;

    tracing::info!(path = %config_path, "Starting journal analytics");
    log_config(&config);

    run(&config)
}

fn run(config: &Config) -> anyhow::Result<()> {
    let store = report::load_universe(&config.source).context("loading trade universe")?;

    let criteria = config.filter.criteria();
    let options = config.dashboard_options();
    let filtered = store.filter(&criteria);
    let anchor = store.latest_exit_time();
    let snapshot = if config.dashboard.parallel {
        DashboardSnapshot::from_filtered_parallel(&filtered, &criteria, anchor, &options)
    } else {
        DashboardSnapshot::from_filtered(&filtered, &criteria, anchor, &options)
    };

    let annotated = match &config.output.annotations_path {
        Some(path) => {
            let annotations = JsonFileAnnotationStore::open(path)
                .with_context(|| format!("opening annotation store {path}"))?;
            annotated_ids(&filtered, &annotations)?
        }
        None => Vec::new(),
    };

    let rendered = report::render(config.output.format, &snapshot, &filtered, &annotated)
        .context("rendering output")?;
    report::write_output(config.output.path.as_deref(), &rendered)?;

    tracing::info!(
        trades = snapshot.trade_count,
        annotated = annotated.len(),
        "Done"
    );
    Ok(())
}

/// First positional argument, then `JOURNAL_CONFIG`, then the default path.
fn config_path() -> String {
    std::env::args()
        .nth(1)
        .or_else(|| std::env::var("JOURNAL_CONFIG").ok())
        .unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string())
}

/// Log the parsed configuration.
fn log_config(config: &Config) {
    tracing::info!(
        source = config.source.trades_path.as_deref().unwrap_or("sample"),
        window = %config.filter.window,
        symbols = config.filter.symbols.len(),
        composition_mode = %config.dashboard.composition_mode,
        parallel = config.dashboard.parallel,
        utc_offset_minutes = config.bucketing.utc_offset_minutes,
        "Configuration loaded"
    );
    tracing::debug!(
        format = ?config.output.format,
        path = config.output.path.as_deref().unwrap_or("<stdout>"),
        "Output"
    );
}

/// Load .env file from current directory or any ancestor directory.
fn load_dotenv() {
    if dotenvy::dotenv().is_ok() {
        return;
    }

    if let Ok(cwd) = std::env::current_dir() {
        let mut dir = cwd.as_path();
        while let Some(parent) = dir.parent() {
            let env_path = parent.join(".env");
            if env_path.exists() {
                let _ = dotenvy::from_path(&env_path);
                return;
            }
            dir = parent;
        }
    }
}
