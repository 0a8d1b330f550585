//! Configuration errors.

use std::path::PathBuf;

/// Result type alias for configuration loading
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Errors raised while loading or validating audio tables
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error reading {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Table JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Row `{0}` not found in table")]
    MissingRow(String),

    #[error("Row `{row}`: {field} range is invalid (min {min}, max {max})")]
    InvalidRange {
        row: String,
        field: &'static str,
        min: f32,
        max: f32,
    },

    #[error(
        "Row `{row}`, point `{point}`: thresholds must ascend (loop {loop_threshold}, medium {medium}, high {high})"
    )]
    ThresholdOrder {
        row: String,
        point: String,
        loop_threshold: f32,
        medium: f32,
        high: f32,
    },

    #[error("Row `{row}`: {field} must not be negative (got {value})")]
    Negative {
        row: String,
        field: String,
        value: f32,
    },
}
