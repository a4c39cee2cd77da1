//! Pipeline configuration

use serde::{Deserialize, Serialize};

/// Default cost rate in currency units per kWh
pub const DEFAULT_COST_PER_KWH: f64 = 8.0;

/// Default forward forecast horizon in months
pub const DEFAULT_HORIZON_MONTHS: usize = 12;

/// Default seasonal period (months per year)
pub const DEFAULT_SEASONAL_PERIOD: usize = 12;

/// Policy for rows whose timestamps cannot be parsed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TimestampPolicy {
    /// Fail the whole batch on the first unparseable timestamp
    #[default]
    Strict,
    /// Drop the offending row and continue
    SkipInvalid,
}

/// Configuration for a pipeline run
///
/// All knobs the pipeline would otherwise embed as literals: the cost rate,
/// the forward horizon, the seasonal period of the model, and the policy for
/// unparseable timestamps. Aggregation granularity is fixed at monthly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Cost rate in currency units per kWh
    pub cost_per_kwh: f64,
    /// Number of months to forecast beyond the last observed month
    pub horizon_months: usize,
    /// Seasonal period of the decomposition model, in months
    pub seasonal_period: usize,
    /// How to treat rows with unparseable timestamps
    pub timestamp_policy: TimestampPolicy,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            cost_per_kwh: DEFAULT_COST_PER_KWH,
            horizon_months: DEFAULT_HORIZON_MONTHS,
            seasonal_period: DEFAULT_SEASONAL_PERIOD,
            timestamp_policy: TimestampPolicy::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_matches_reference_constants() {
        let config = PipelineConfig::default();
        assert_eq!(config.cost_per_kwh, 8.0);
        assert_eq!(config.horizon_months, 12);
        assert_eq!(config.seasonal_period, 12);
        assert_eq!(config.timestamp_policy, TimestampPolicy::Strict);
    }
}
