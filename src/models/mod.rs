//! Forecasting models for monthly energy series

use crate::error::{ForecastError, Result};
use crate::series::MonthlySeries;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

pub mod holt_winters;

/// Month-stamped point predictions produced by a trained model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastResult {
    months: Vec<NaiveDate>,
    values: Vec<f64>,
}

impl ForecastResult {
    /// Create a new forecast result
    pub fn new(months: Vec<NaiveDate>, values: Vec<f64>) -> Result<Self> {
        if months.len() != values.len() {
            return Err(ForecastError::InvalidParameter(format!(
                "Months length ({}) doesn't match values length ({})",
                months.len(),
                values.len()
            )));
        }
        Ok(Self { months, values })
    }

    /// The predicted months
    pub fn months(&self) -> &[NaiveDate] {
        &self.months
    }

    /// The predicted values, in month order
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Number of predictions
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check if the result holds no predictions
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Look up the prediction for one month
    pub fn value_for(&self, month: NaiveDate) -> Option<f64> {
        self.months
            .iter()
            .position(|m| *m == month)
            .map(|idx| self.values[idx])
    }

    /// Iterate over (month, value) pairs
    pub fn iter(&self) -> impl Iterator<Item = (NaiveDate, f64)> + '_ {
        self.months.iter().copied().zip(self.values.iter().copied())
    }
}

/// Trained forecast model
pub trait TrainedForecastModel: Debug {
    /// One in-sample prediction per point of the given series
    fn predict(&self, series: &MonthlySeries) -> Result<ForecastResult>;

    /// Point predictions for the `horizon` months following the last trained
    /// month
    fn forecast(&self, horizon: usize) -> Result<ForecastResult>;

    /// Name of the model
    fn name(&self) -> &str;
}

/// Forecast model that can be trained on a monthly series
pub trait ForecastModel: Debug + Clone {
    /// The type of trained model produced
    type Trained: TrainedForecastModel;

    /// Train the model on a monthly series
    fn train(&self, series: &MonthlySeries) -> Result<Self::Trained>;

    /// Get the name of the model
    fn name(&self) -> &str;
}
