use assert_approx_eq::assert_approx_eq;
use chrono::NaiveDate;
use ev_charge_forecast::metrics::evaluate_forecast;
use ev_charge_forecast::models::ForecastResult;
use ev_charge_forecast::series::MonthlySeries;
use ev_charge_forecast::ForecastError;

fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

#[test]
fn known_errors() {
    let actual = MonthlySeries::from_points(vec![
        (ymd(2024, 1, 1), 10.0),
        (ymd(2024, 2, 1), 20.0),
    ]);
    let predicted = ForecastResult::new(
        vec![ymd(2024, 1, 1), ymd(2024, 2, 1)],
        vec![12.0, 16.0],
    )
    .unwrap();

    let summary = evaluate_forecast(&actual, &predicted).unwrap();
    assert_eq!(summary.overlap_months, 2);
    assert_approx_eq!(summary.mae, 3.0);
    assert_approx_eq!(summary.rmse, 10.0_f64.sqrt());
    assert_approx_eq!(summary.mean_actual, 15.0);
    assert_approx_eq!(summary.mean_predicted, 14.0);
}

#[test]
fn only_overlapping_months_contribute() {
    let actual = MonthlySeries::from_points(vec![
        (ymd(2024, 1, 1), 10.0),
        (ymd(2024, 2, 1), 20.0),
        (ymd(2024, 3, 1), 30.0),
    ]);
    // Predictions cover February through April; January and April cannot pair
    let predicted = ForecastResult::new(
        vec![ymd(2024, 2, 1), ymd(2024, 3, 1), ymd(2024, 4, 1)],
        vec![20.0, 33.0, 99.0],
    )
    .unwrap();

    let summary = evaluate_forecast(&actual, &predicted).unwrap();
    assert_eq!(summary.overlap_months, 2);
    assert_approx_eq!(summary.mae, 1.5);
    assert_approx_eq!(summary.mean_actual, 25.0);
}

#[test]
fn perfect_fit_has_zero_errors() {
    let months = vec![ymd(2024, 1, 1), ymd(2024, 2, 1), ymd(2024, 3, 1)];
    let values = vec![15.0, 8.0, 11.5];
    let actual = MonthlySeries::from_points(months.iter().copied().zip(values.iter().copied()));
    let predicted = ForecastResult::new(months, values).unwrap();

    let summary = evaluate_forecast(&actual, &predicted).unwrap();
    assert_approx_eq!(summary.mae, 0.0);
    assert_approx_eq!(summary.rmse, 0.0);
}

#[test]
fn errors_are_never_negative() {
    let actual = MonthlySeries::from_points(vec![
        (ymd(2024, 1, 1), 5.0),
        (ymd(2024, 2, 1), 50.0),
        (ymd(2024, 3, 1), 0.5),
    ]);
    let predicted = ForecastResult::new(
        vec![ymd(2024, 1, 1), ymd(2024, 2, 1), ymd(2024, 3, 1)],
        vec![60.0, 1.0, -3.0],
    )
    .unwrap();

    let summary = evaluate_forecast(&actual, &predicted).unwrap();
    assert!(summary.mae >= 0.0);
    assert!(summary.rmse >= 0.0);
}

#[test]
fn disjoint_months_are_no_overlap() {
    let actual = MonthlySeries::from_points(vec![(ymd(2024, 1, 1), 10.0)]);
    let predicted = ForecastResult::new(vec![ymd(2025, 1, 1)], vec![10.0]).unwrap();

    let result = evaluate_forecast(&actual, &predicted);
    assert!(matches!(result, Err(ForecastError::NoOverlap)));
}

#[test]
fn mismatched_result_lengths_are_rejected() {
    let result = ForecastResult::new(vec![ymd(2024, 1, 1)], vec![1.0, 2.0]);
    assert!(matches!(result, Err(ForecastError::InvalidParameter(_))));
}
