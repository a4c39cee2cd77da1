use assert_approx_eq::assert_approx_eq;
use chrono::NaiveDate;
use ev_charge_forecast::models::holt_winters::HoltWinters;
use ev_charge_forecast::models::{ForecastModel, TrainedForecastModel};
use ev_charge_forecast::series::{months_after, MonthlySeries};
use ev_charge_forecast::ForecastError;

fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

fn monthly_series(start: NaiveDate, values: &[f64]) -> MonthlySeries {
    MonthlySeries::from_points(
        std::iter::once(start)
            .chain(months_after(start, values.len() - 1))
            .zip(values.iter().copied()),
    )
}

#[test]
fn forecast_has_one_point_per_horizon_month() {
    let series = monthly_series(ymd(2024, 1, 1), &[10.0, 12.0, 11.0, 13.0, 14.0]);
    let trained = HoltWinters::monthly().train(&series).unwrap();

    let predicted = trained.predict(&series).unwrap();
    assert_eq!(predicted.len(), series.len());
    assert_eq!(predicted.months(), series.months());

    let forecast = trained.forecast(12).unwrap();
    assert_eq!(forecast.len(), 12);
    assert_eq!(forecast.months().first(), Some(&ymd(2024, 6, 1)));
    assert_eq!(forecast.months().last(), Some(&ymd(2025, 5, 1)));

    // Out-of-sample months are consecutive calendar months
    for pair in forecast.months().windows(2) {
        assert_eq!(pair[1], ev_charge_forecast::series::next_month(pair[0]));
    }
}

#[test]
fn forecast_starts_after_last_month_despite_gaps() {
    // January, February, April: a gap month produces no point
    let series = MonthlySeries::from_points(vec![
        (ymd(2024, 1, 1), 10.0),
        (ymd(2024, 2, 1), 12.0),
        (ymd(2024, 4, 1), 9.0),
    ]);
    let trained = HoltWinters::monthly().train(&series).unwrap();

    let forecast = trained.forecast(3).unwrap();
    assert_eq!(
        forecast.months(),
        vec![ymd(2024, 5, 1), ymd(2024, 6, 1), ymd(2024, 7, 1)]
    );
}

#[test]
fn two_point_series_is_fittable() {
    let series = monthly_series(ymd(2024, 1, 1), &[15.0, 8.0]);
    let trained = HoltWinters::monthly().train(&series).unwrap();

    let predicted = trained.predict(&series).unwrap();
    assert_eq!(predicted.len(), 2);
    // Holt initialization reproduces a two-point history exactly
    assert_approx_eq!(predicted.values()[0], 15.0);
    assert_approx_eq!(predicted.values()[1], 8.0);
}

#[test]
fn trending_series_forecasts_continue_the_trend() {
    // Ten points stay below two full seasons, so the linear-trend path runs
    // and reproduces a perfect line exactly
    let values: Vec<f64> = (0..10).map(|i| 100.0 + 2.0 * i as f64).collect();
    let series = monthly_series(ymd(2022, 1, 1), &values);
    let trained = HoltWinters::monthly().train(&series).unwrap();

    let forecast = trained.forecast(6).unwrap();
    let last = *values.last().unwrap();
    for (step, (_, value)) in forecast.iter().enumerate() {
        assert_approx_eq!(value, last + 2.0 * (step as f64 + 1.0), 1e-6);
    }
}

#[test]
fn fewer_than_two_points_is_insufficient_data() {
    let empty = MonthlySeries::from_points(vec![]);
    assert!(matches!(
        HoltWinters::monthly().train(&empty),
        Err(ForecastError::InsufficientData(_))
    ));

    let single = MonthlySeries::from_points(vec![(ymd(2024, 1, 1), 10.0)]);
    assert!(matches!(
        HoltWinters::monthly().train(&single),
        Err(ForecastError::InsufficientData(_))
    ));
}

#[test]
fn model_reports_its_name() {
    let model = HoltWinters::monthly();
    assert!(model.name().contains("Holt-Winters"));

    let series = monthly_series(ymd(2024, 1, 1), &[10.0, 12.0]);
    let trained = model.train(&series).unwrap();
    assert_eq!(trained.name(), model.name());
}
