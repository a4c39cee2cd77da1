//! Fixed-rate cost projection
//!
//! Costs are always a view over energy quantities: energy times a constant
//! rate in currency units per kWh, with missing energy staying missing.

/// Cost of one energy quantity
pub fn energy_cost(energy_kwh: f64, rate_per_kwh: f64) -> f64 {
    energy_kwh * rate_per_kwh
}

/// Cost of an optional energy quantity; missing energy yields missing cost
pub fn optional_cost(energy_kwh: Option<f64>, rate_per_kwh: f64) -> Option<f64> {
    energy_kwh.map(|kwh| energy_cost(kwh, rate_per_kwh))
}

/// Costs for a sequence of energy quantities
pub fn costs(energy_kwh: &[f64], rate_per_kwh: f64) -> Vec<f64> {
    energy_kwh
        .iter()
        .map(|kwh| energy_cost(*kwh, rate_per_kwh))
        .collect()
}
