use std::path::PathBuf;

use thiserror::Error;

/// Invalid or unreadable matching configuration.
///
/// Configuration problems are fatal: a session is never started with
/// thresholds that fail validation.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{tier} {field} must be within [0, 1], got {value}")]
    ThresholdOutOfRange {
        tier: &'static str,
        field: &'static str,
        value: f64,
    },

    #[error("{tier} auto-map threshold {auto_map} is below review threshold {review}")]
    ThresholdOrder {
        tier: &'static str,
        auto_map: f64,
        review: f64,
    },

    #[error("fuzzy minimum threshold must be within [0, 100], got {0}")]
    FuzzyFloorOutOfRange(u32),

    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse TOML config {path}: {source}")]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

pub type Result<T> = std::result::Result<T, ConfigError>;
