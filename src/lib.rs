//! # EV Charge Forecast
//!
//! A Rust library for analyzing and forecasting monthly energy usage from
//! home EV-charging session data.
//!
//! ## Features
//!
//! - Delimited-text session ingestion (semicolon or comma, with recovery of
//!   a known malformed-export header artifact)
//! - Timestamp normalization and missing-tolerant energy coercion
//! - Calendar-month aggregation into a strictly ordered energy series
//! - Additive Holt-Winters forecasting (trend + yearly seasonality) behind a
//!   pluggable model seam
//! - MAE / RMSE evaluation over month-aligned actuals and predictions
//! - Fixed-rate cost projection
//!
//! ## Quick Start
//!
//! ```no_run
//! use ev_charge_forecast::config::PipelineConfig;
//! use ev_charge_forecast::pipeline;
//!
//! # fn main() -> ev_charge_forecast::Result<()> {
//! let config = PipelineConfig::default();
//! let dashboard = pipeline::run_from_path("charging_reports.csv", &config)?;
//!
//! for row in &dashboard.outlook {
//!     println!("{}: {:.1} kWh (cost {:.2})", row.month, row.predicted_kwh, row.predicted_cost);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! The pipeline output is plain structured data (chart rows, summary metrics,
//! a 12-month outlook table); chart and table rendering is left to an
//! external presentation layer.

pub mod config;
pub mod cost;
pub mod data;
pub mod error;
pub mod metrics;
pub mod models;
pub mod pipeline;
pub mod series;

// Re-export commonly used types
pub use crate::config::{PipelineConfig, TimestampPolicy};
pub use crate::data::{SessionLoader, SessionRecord, SessionTable};
pub use crate::error::{ForecastError, Result};
pub use crate::metrics::EvaluationSummary;
pub use crate::models::holt_winters::HoltWinters;
pub use crate::models::{ForecastModel, ForecastResult, TrainedForecastModel};
pub use crate::pipeline::DashboardData;
pub use crate::series::{MonthlyPoint, MonthlySeries};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
