//! Monthly energy series derived from session records

use crate::data::SessionRecord;
use chrono::{Datelike, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Total energy for one calendar month
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MonthlyPoint {
    /// First day of the month
    pub month: NaiveDate,
    /// Sum of energy delivered that month, in kWh
    pub energy_kwh: f64,
}

/// Ascending, duplicate-free sequence of monthly energy totals
///
/// Months with no valid sessions produce no point; the series may therefore
/// have gaps and downstream models must tolerate irregular spacing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlySeries {
    points: Vec<MonthlyPoint>,
}

impl MonthlySeries {
    /// Aggregate session records by the calendar month of plug-in time
    ///
    /// Rows with missing energy contribute nothing; a month whose only rows
    /// are missing still gets a point when at least one valid row exists.
    pub fn from_records(records: &[SessionRecord]) -> Self {
        let mut totals: BTreeMap<NaiveDate, f64> = BTreeMap::new();
        for record in records {
            if let Some(energy) = record.energy_session {
                *totals.entry(month_start(record.plugin_time)).or_insert(0.0) += energy;
            }
        }

        let points = totals
            .into_iter()
            .map(|(month, energy_kwh)| MonthlyPoint { month, energy_kwh })
            .collect();
        Self { points }
    }

    /// Build a series directly from (month, energy) pairs, for tests and
    /// callers that aggregate elsewhere. Points are re-sorted and months
    /// deduplicated by summing.
    pub fn from_points(pairs: impl IntoIterator<Item = (NaiveDate, f64)>) -> Self {
        let mut totals: BTreeMap<NaiveDate, f64> = BTreeMap::new();
        for (month, energy) in pairs {
            *totals.entry(month).or_insert(0.0) += energy;
        }
        let points = totals
            .into_iter()
            .map(|(month, energy_kwh)| MonthlyPoint { month, energy_kwh })
            .collect();
        Self { points }
    }

    /// The ordered points
    pub fn points(&self) -> &[MonthlyPoint] {
        &self.points
    }

    /// Months of the series, ascending
    pub fn months(&self) -> Vec<NaiveDate> {
        self.points.iter().map(|p| p.month).collect()
    }

    /// Energy totals of the series, in month order
    pub fn values(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.energy_kwh).collect()
    }

    /// Number of monthly points
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Check if the series has no points
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Last observed month, if any
    pub fn last_month(&self) -> Option<NaiveDate> {
        self.points.last().map(|p| p.month)
    }

    /// The `horizon` calendar months immediately following the last observed
    /// month
    pub fn future_months(&self, horizon: usize) -> Vec<NaiveDate> {
        match self.last_month() {
            Some(last) => months_after(last, horizon),
            None => Vec::new(),
        }
    }
}

/// Truncate a timestamp to the first day of its month
pub fn month_start(ts: NaiveDateTime) -> NaiveDate {
    let date = ts.date();
    NaiveDate::from_ymd_opt(date.year(), date.month(), 1)
        .unwrap_or(date)
}

/// First day of the month following `month`
pub fn next_month(month: NaiveDate) -> NaiveDate {
    let (year, m) = if month.month() == 12 {
        (month.year() + 1, 1)
    } else {
        (month.year(), month.month() + 1)
    };
    NaiveDate::from_ymd_opt(year, m, 1).unwrap_or(month)
}

/// The `count` consecutive month starts after `month`
pub fn months_after(month: NaiveDate, count: usize) -> Vec<NaiveDate> {
    let mut months = Vec::with_capacity(count);
    let mut current = month;
    for _ in 0..count {
        current = next_month(current);
        months.push(current);
    }
    months
}
