//! Additive Holt-Winters decomposition for monthly energy series
//!
//! Level + trend + seasonal smoothing with a yearly period. Histories shorter
//! than two full seasons cannot initialize the seasonal component, so the
//! model degrades to Holt linear trend (seasonal terms held at zero), which
//! keeps 2-point histories fittable.

use crate::error::{ForecastError, Result};
use crate::models::{ForecastModel, ForecastResult, TrainedForecastModel};
use crate::series::{months_after, MonthlySeries};
use chrono::NaiveDate;

const DEFAULT_ALPHA: f64 = 0.4;
const DEFAULT_BETA: f64 = 0.1;
const DEFAULT_GAMMA: f64 = 0.3;

/// Additive Holt-Winters model
#[derive(Debug, Clone)]
pub struct HoltWinters {
    /// Name of the model
    name: String,
    /// Level smoothing parameter
    alpha: f64,
    /// Trend smoothing parameter
    beta: f64,
    /// Seasonal smoothing parameter
    gamma: f64,
    /// Seasonal period in months
    period: usize,
}

/// Trained additive Holt-Winters model
#[derive(Debug, Clone)]
pub struct TrainedHoltWinters {
    /// Name of the model
    name: String,
    /// Level smoothing parameter
    alpha: f64,
    /// Trend smoothing parameter
    beta: f64,
    /// Seasonal smoothing parameter
    gamma: f64,
    /// Seasonal period in months
    period: usize,
    /// Final smoothed level
    level: f64,
    /// Final smoothed trend
    trend: f64,
    /// Final seasonal terms; empty when the history was too short for them
    seasonals: Vec<f64>,
    /// Number of observations trained on
    n_obs: usize,
    /// Last trained month
    last_month: NaiveDate,
}

/// Final state and fitted values of one smoothing pass
struct SmoothingPass {
    level: f64,
    trend: f64,
    seasonals: Vec<f64>,
    fitted: Vec<f64>,
}

impl HoltWinters {
    /// Create a new additive Holt-Winters model
    pub fn new(alpha: f64, beta: f64, gamma: f64, period: usize) -> Result<Self> {
        for (label, value) in [("alpha", alpha), ("beta", beta), ("gamma", gamma)] {
            if value <= 0.0 || value >= 1.0 {
                return Err(ForecastError::InvalidParameter(format!(
                    "{label} must be between 0 and 1"
                )));
            }
        }
        if period == 0 {
            return Err(ForecastError::InvalidParameter(
                "Seasonal period must be positive".to_string(),
            ));
        }

        Ok(Self {
            name: format!(
                "Holt-Winters additive (alpha={alpha}, beta={beta}, gamma={gamma}, period={period})"
            ),
            alpha,
            beta,
            gamma,
            period,
        })
    }

    /// Default parameterization for monthly data with yearly seasonality
    pub fn monthly() -> Self {
        Self {
            name: format!(
                "Holt-Winters additive (alpha={DEFAULT_ALPHA}, beta={DEFAULT_BETA}, gamma={DEFAULT_GAMMA}, period=12)"
            ),
            alpha: DEFAULT_ALPHA,
            beta: DEFAULT_BETA,
            gamma: DEFAULT_GAMMA,
            period: 12,
        }
    }

    /// Like [`HoltWinters::monthly`] but with an explicit seasonal period
    pub fn with_period(period: usize) -> Result<Self> {
        Self::new(DEFAULT_ALPHA, DEFAULT_BETA, DEFAULT_GAMMA, period)
    }

    fn run_pass(&self, values: &[f64]) -> Result<SmoothingPass> {
        run_pass(values, self.alpha, self.beta, self.gamma, self.period)
    }
}

impl ForecastModel for HoltWinters {
    type Trained = TrainedHoltWinters;

    fn train(&self, series: &MonthlySeries) -> Result<Self::Trained> {
        let values = series.values();
        if values.len() < 2 {
            return Err(ForecastError::InsufficientData(format!(
                "the model needs at least 2 monthly points, got {}",
                values.len()
            )));
        }
        let last_month = series.last_month().ok_or_else(|| {
            ForecastError::InsufficientData("series has no last month".to_string())
        })?;

        let pass = self.run_pass(&values)?;

        Ok(TrainedHoltWinters {
            name: self.name.clone(),
            alpha: self.alpha,
            beta: self.beta,
            gamma: self.gamma,
            period: self.period,
            level: pass.level,
            trend: pass.trend,
            seasonals: pass.seasonals,
            n_obs: values.len(),
            last_month,
        })
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl TrainedForecastModel for TrainedHoltWinters {
    fn predict(&self, series: &MonthlySeries) -> Result<ForecastResult> {
        let values = series.values();
        if values.len() < 2 {
            return Err(ForecastError::InsufficientData(format!(
                "the model needs at least 2 monthly points, got {}",
                values.len()
            )));
        }

        let pass = run_pass(&values, self.alpha, self.beta, self.gamma, self.period)?;
        ForecastResult::new(series.months(), pass.fitted)
    }

    fn forecast(&self, horizon: usize) -> Result<ForecastResult> {
        let mut values = Vec::with_capacity(horizon);
        for step in 1..=horizon {
            let seasonal = if self.seasonals.is_empty() {
                0.0
            } else {
                self.seasonals[(self.n_obs + step - 1) % self.period]
            };
            values.push(self.level + step as f64 * self.trend + seasonal);
        }

        if values.iter().any(|v| !v.is_finite()) {
            return Err(ForecastError::ForecastUnavailable(
                "forecast produced non-finite values".to_string(),
            ));
        }

        ForecastResult::new(months_after(self.last_month, horizon), values)
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// One smoothing pass over the series
///
/// Seasonal smoothing needs two full seasons to initialize; below that the
/// seasonal terms stay empty and only level and trend are smoothed.
fn run_pass(values: &[f64], alpha: f64, beta: f64, gamma: f64, period: usize) -> Result<SmoothingPass> {
    if values.iter().any(|v| !v.is_finite()) {
        return Err(ForecastError::ForecastUnavailable(
            "series contains non-finite energy totals".to_string(),
        ));
    }

    let n = values.len();
    let pass = if n >= 2 * period && period > 1 {
        seasonal_pass(values, alpha, beta, gamma, period)
    } else {
        linear_pass(values, alpha, beta)
    };

    let state_finite = pass.level.is_finite()
        && pass.trend.is_finite()
        && pass.seasonals.iter().all(|s| s.is_finite())
        && pass.fitted.iter().all(|f| f.is_finite());
    if !state_finite {
        return Err(ForecastError::ForecastUnavailable(
            "model fitting produced non-finite state".to_string(),
        ));
    }

    Ok(pass)
}

fn linear_pass(values: &[f64], alpha: f64, beta: f64) -> SmoothingPass {
    let mut level = values[0];
    let mut trend = values[1] - values[0];

    let mut fitted = Vec::with_capacity(values.len());
    fitted.push(values[0]);

    for &value in &values[1..] {
        fitted.push(level + trend);
        let prev_level = level;
        level = alpha * value + (1.0 - alpha) * (level + trend);
        trend = beta * (level - prev_level) + (1.0 - beta) * trend;
    }

    SmoothingPass {
        level,
        trend,
        seasonals: Vec::new(),
        fitted,
    }
}

fn seasonal_pass(values: &[f64], alpha: f64, beta: f64, gamma: f64, period: usize) -> SmoothingPass {
    let n = values.len();
    let seasons = n / period;

    // Per-season means anchor the initial level, trend and seasonal terms
    let season_means: Vec<f64> = (0..seasons)
        .map(|k| values[k * period..(k + 1) * period].iter().sum::<f64>() / period as f64)
        .collect();

    let mut level = season_means[0];
    let mut trend = (season_means[1] - season_means[0]) / period as f64;
    let mut seasonals: Vec<f64> = (0..period)
        .map(|i| {
            (0..seasons)
                .map(|k| values[k * period + i] - season_means[k])
                .sum::<f64>()
                / seasons as f64
        })
        .collect();

    let mut fitted = Vec::with_capacity(n);
    for (t, &value) in values.iter().enumerate() {
        let slot = t % period;
        fitted.push(level + trend + seasonals[slot]);
        let prev_level = level;
        level = alpha * (value - seasonals[slot]) + (1.0 - alpha) * (level + trend);
        trend = beta * (level - prev_level) + (1.0 - beta) * trend;
        seasonals[slot] = gamma * (value - level) + (1.0 - gamma) * seasonals[slot];
    }

    SmoothingPass {
        level,
        trend,
        seasonals,
        fitted,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;

    fn series_from(values: &[f64]) -> MonthlySeries {
        let start = NaiveDate::from_ymd_opt(2023, 1, 1).unwrap();
        MonthlySeries::from_points(
            std::iter::once(start)
                .chain(months_after(start, values.len() - 1))
                .zip(values.iter().copied()),
        )
    }

    #[test]
    fn constant_series_fits_exactly() {
        let series = series_from(&[50.0; 6]);
        let trained = HoltWinters::monthly().train(&series).unwrap();

        let predicted = trained.predict(&series).unwrap();
        for (_, value) in predicted.iter() {
            assert_approx_eq!(value, 50.0);
        }

        let forecast = trained.forecast(12).unwrap();
        for (_, value) in forecast.iter() {
            assert_approx_eq!(value, 50.0);
        }
    }

    #[test]
    fn perfectly_seasonal_series_fits_exactly() {
        // Four seasons of a period-4 pattern, no trend
        let pattern = [10.0, 20.0, 30.0, 20.0];
        let values: Vec<f64> = pattern.iter().cycle().take(16).copied().collect();
        let series = series_from(&values);

        let model = HoltWinters::with_period(4).unwrap();
        let trained = model.train(&series).unwrap();

        let predicted = trained.predict(&series).unwrap();
        for (expected, (_, value)) in pattern.iter().cycle().zip(predicted.iter()) {
            assert_approx_eq!(value, *expected, 1e-6);
        }

        let forecast = trained.forecast(4).unwrap();
        for (expected, (_, value)) in pattern.iter().cycle().zip(forecast.iter()) {
            assert_approx_eq!(value, *expected, 1e-6);
        }
    }

    #[test]
    fn single_point_is_insufficient() {
        let series = series_from(&[50.0]);
        let result = HoltWinters::monthly().train(&series);
        assert!(matches!(result, Err(ForecastError::InsufficientData(_))));
    }

    #[test]
    fn non_finite_input_is_unfittable() {
        let series = series_from(&[10.0, f64::NAN, 12.0]);
        let result = HoltWinters::monthly().train(&series);
        assert!(matches!(result, Err(ForecastError::ForecastUnavailable(_))));
    }

    #[test]
    fn invalid_parameters_are_rejected() {
        assert!(HoltWinters::new(1.5, 0.1, 0.3, 12).is_err());
        assert!(HoltWinters::new(0.4, 0.0, 0.3, 12).is_err());
        assert!(HoltWinters::new(0.4, 0.1, 0.3, 0).is_err());
    }
}
