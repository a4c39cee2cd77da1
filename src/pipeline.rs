//! End-to-end pipeline: load, normalize, aggregate, fit, evaluate, project
//!
//! One interactive run is a single synchronous pass over these stages. The
//! output is plain structured data; rendering belongs to an external
//! presentation layer.

use crate::config::PipelineConfig;
use crate::cost::energy_cost;
use crate::data::{SessionLoader, SessionTable};
use crate::error::{ForecastError, Result};
use crate::metrics::evaluate_forecast;
use crate::models::holt_winters::HoltWinters;
use crate::models::{ForecastModel, TrainedForecastModel};
use crate::series::MonthlySeries;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, warn};

/// One charting row: actual versus in-sample prediction for a month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartRow {
    /// First day of the month
    pub month: NaiveDate,
    /// Observed energy total, in kWh
    pub actual_kwh: f64,
    /// In-sample model prediction for the month, when one exists
    pub predicted_kwh: Option<f64>,
}

/// Named scalar metrics for the summary panel
///
/// All fields are optional so a run whose actuals and predictions share no
/// months still renders its chart and outlook.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryMetrics {
    /// Mean absolute error over overlapping months, in kWh
    pub mae: Option<f64>,
    /// Root-mean-square error over overlapping months, in kWh
    pub rmse: Option<f64>,
    /// Average actual monthly cost over overlapping months
    pub avg_actual_cost: Option<f64>,
    /// Average predicted monthly cost over overlapping months
    pub avg_predicted_cost: Option<f64>,
}

/// One forward-forecast row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutlookRow {
    /// First day of the forecast month
    pub month: NaiveDate,
    /// Predicted energy total, in kWh
    pub predicted_kwh: f64,
    /// Predicted cost at the configured rate
    pub predicted_cost: f64,
}

/// The three data products a presentation layer consumes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardData {
    /// Actual versus predicted energy per historical month
    pub chart: Vec<ChartRow>,
    /// Summary error metrics and average costs
    pub summary: SummaryMetrics,
    /// Forward forecast with cost projection, one row per horizon month
    pub outlook: Vec<OutlookRow>,
}

/// Run the pipeline on a delimited-text file
pub fn run_from_path<P: AsRef<Path>>(path: P, config: &PipelineConfig) -> Result<DashboardData> {
    let table = SessionLoader::from_csv(path)?;
    run(&table, config)
}

/// Run the pipeline on an upload buffer
pub fn run_from_bytes(bytes: &[u8], config: &PipelineConfig) -> Result<DashboardData> {
    let table = SessionLoader::from_bytes(bytes)?;
    run(&table, config)
}

/// Run the pipeline on a loaded session table with the default model
pub fn run(table: &SessionTable, config: &PipelineConfig) -> Result<DashboardData> {
    let model = HoltWinters::with_period(config.seasonal_period)?;
    run_with_model(table, &model, config)
}

/// Run the pipeline with a caller-supplied forecasting model
pub fn run_with_model<M: ForecastModel>(
    table: &SessionTable,
    model: &M,
    config: &PipelineConfig,
) -> Result<DashboardData> {
    let records = table.normalize(config.timestamp_policy)?;
    debug!(records = records.len(), "normalized session records");

    let series = MonthlySeries::from_records(&records);
    debug!(months = series.len(), "aggregated monthly series");

    let trained = model.train(&series)?;
    let predicted = trained.predict(&series)?;
    let forecast = trained.forecast(config.horizon_months)?;
    debug!(
        model = trained.name(),
        in_sample = predicted.len(),
        horizon = forecast.len(),
        "fitted forecast model"
    );

    let summary = match evaluate_forecast(&series, &predicted) {
        Ok(evaluation) => SummaryMetrics {
            mae: Some(evaluation.mae),
            rmse: Some(evaluation.rmse),
            avg_actual_cost: Some(energy_cost(evaluation.mean_actual, config.cost_per_kwh)),
            avg_predicted_cost: Some(energy_cost(evaluation.mean_predicted, config.cost_per_kwh)),
        },
        Err(ForecastError::NoOverlap) => {
            warn!("actuals and predictions share no months; metrics unavailable");
            SummaryMetrics {
                mae: None,
                rmse: None,
                avg_actual_cost: None,
                avg_predicted_cost: None,
            }
        }
        Err(other) => return Err(other),
    };

    let chart = series
        .points()
        .iter()
        .map(|point| ChartRow {
            month: point.month,
            actual_kwh: point.energy_kwh,
            predicted_kwh: predicted.value_for(point.month),
        })
        .collect();

    let outlook = forecast
        .iter()
        .map(|(month, predicted_kwh)| OutlookRow {
            month,
            predicted_kwh,
            predicted_cost: energy_cost(predicted_kwh, config.cost_per_kwh),
        })
        .collect();

    Ok(DashboardData {
        chart,
        summary,
        outlook,
    })
}
