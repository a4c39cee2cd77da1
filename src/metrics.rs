//! Forecast evaluation over month-aligned actuals and predictions

use crate::error::{ForecastError, Result};
use crate::models::ForecastResult;
use crate::series::MonthlySeries;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Error summary over the months present in both series
///
/// Both series cover the same historical range in normal runs, so these are
/// in-sample fit measures, not out-of-sample accuracy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationSummary {
    /// Mean absolute error, in kWh
    pub mae: f64,
    /// Root-mean-square error, in kWh
    pub rmse: f64,
    /// Mean actual energy over the overlap, in kWh
    pub mean_actual: f64,
    /// Mean predicted energy over the overlap, in kWh
    pub mean_predicted: f64,
    /// Number of overlapping months
    pub overlap_months: usize,
}

impl std::fmt::Display for EvaluationSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Forecast Evaluation ({} months):", self.overlap_months)?;
        writeln!(f, "  MAE:   {:.2} kWh", self.mae)?;
        writeln!(f, "  RMSE:  {:.2} kWh", self.rmse)?;
        Ok(())
    }
}

/// Inner-join actuals and predictions on month and compute error metrics
///
/// Only months present in both series contribute. An empty join yields
/// [`ForecastError::NoOverlap`]; callers that can still render without
/// metrics absorb it.
pub fn evaluate_forecast(
    actual: &MonthlySeries,
    predicted: &ForecastResult,
) -> Result<EvaluationSummary> {
    let predicted_by_month: BTreeMap<NaiveDate, f64> = predicted.iter().collect();

    let pairs: Vec<(f64, f64)> = actual
        .points()
        .iter()
        .filter_map(|point| {
            predicted_by_month
                .get(&point.month)
                .map(|prediction| (point.energy_kwh, *prediction))
        })
        .collect();

    if pairs.is_empty() {
        return Err(ForecastError::NoOverlap);
    }

    let n = pairs.len() as f64;
    let mae = pairs.iter().map(|(a, p)| (a - p).abs()).sum::<f64>() / n;
    let mse = pairs.iter().map(|(a, p)| (a - p).powi(2)).sum::<f64>() / n;
    let mean_actual = pairs.iter().map(|(a, _)| a).sum::<f64>() / n;
    let mean_predicted = pairs.iter().map(|(_, p)| p).sum::<f64>() / n;

    Ok(EvaluationSummary {
        mae,
        rmse: mse.sqrt(),
        mean_actual,
        mean_predicted,
        overlap_months: pairs.len(),
    })
}
