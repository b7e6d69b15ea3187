//! Crate-level error type.
//!
//! The analytics themselves never fail; errors come from the collaborators
//! around them (config, trade loading, annotation store, output).

use thiserror::Error;

use crate::config::ConfigError;
use crate::journal::StoreError;
use crate::trade::{LoadError, TradeError};

/// Any failure surfaced by the journal analytics collaborators.
#[derive(Debug, Error)]
pub enum AnalyticsError {
    /// Configuration could not be loaded or validated.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Trade file could not be loaded.
    #[error(transparent)]
    Load(#[from] LoadError),

    /// A trade record is structurally invalid.
    #[error(transparent)]
    Trade(#[from] TradeError),

    /// Annotation store failure.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Serializing output failed.
    #[error("Failed to serialize output: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Writing output failed.
    #[error("Failed to write output to '{path}': {source}")]
    Write {
        /// Destination path.
        path: String,
        /// The underlying IO error.
        source: std::io::Error,
    },
}

/// Result alias for fallible collaborator operations.
pub type Result<T> = std::result::Result<T, AnalyticsError>;
