//! Error types for the ev_charge_forecast crate

use polars::prelude::PolarsError;
use thiserror::Error;

/// Custom error types for the ev_charge_forecast crate
#[derive(Debug, Error)]
pub enum ForecastError {
    /// The input source could not be read at all
    #[error("Data unavailable: {0}")]
    DataUnavailable(String),

    /// Columns could not be reconciled to the canonical seven
    #[error("Schema mismatch: {0}")]
    SchemaMismatch(String),

    /// A timestamp cell could not be parsed
    #[error("Unparseable timestamp in column '{column}' at row {row}: '{value}'")]
    UnparseableTimestamp {
        column: String,
        row: usize,
        value: String,
    },

    /// The aggregated series is too short to fit a model
    #[error("Insufficient data: {0}")]
    InsufficientData(String),

    /// Model fitting failed
    #[error("Forecast unavailable: {0}")]
    ForecastUnavailable(String),

    /// Actuals and predictions share no months
    #[error("No overlapping months between actual and predicted series")]
    NoOverlap,

    /// Error from invalid parameters
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Error from Polars operations
    #[error("Data frame error: {0}")]
    PolarsError(String),
}

/// Result type with our custom error
pub type Result<T> = std::result::Result<T, ForecastError>;

impl From<PolarsError> for ForecastError {
    fn from(err: PolarsError) -> Self {
        ForecastError::PolarsError(err.to_string())
    }
}
