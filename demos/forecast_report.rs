//! Text report over the pipeline's three data products.
//!
//! Usage: forecast_report <charging_reports.csv>

use ev_charge_forecast::config::PipelineConfig;
use ev_charge_forecast::pipeline;

fn main() {
    tracing_subscriber::fmt::init();

    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "dataset/charging_reports.csv".to_string());
    let config = PipelineConfig::default();

    let dashboard = match pipeline::run_from_path(&path, &config) {
        Ok(dashboard) => dashboard,
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    };

    println!("Monthly actual vs predicted (kWh):");
    for row in &dashboard.chart {
        match row.predicted_kwh {
            Some(predicted) => println!(
                "  {}  actual {:>8.1}  predicted {:>8.1}",
                row.month, row.actual_kwh, predicted
            ),
            None => println!("  {}  actual {:>8.1}  predicted        -", row.month, row.actual_kwh),
        }
    }

    println!("\nSummary:");
    let summary = &dashboard.summary;
    match (summary.mae, summary.rmse) {
        (Some(mae), Some(rmse)) => {
            println!("  MAE:  {mae:.2} kWh");
            println!("  RMSE: {rmse:.2} kWh");
        }
        _ => println!("  error metrics unavailable"),
    }
    if let (Some(actual), Some(predicted)) = (summary.avg_actual_cost, summary.avg_predicted_cost) {
        println!("  Average actual monthly cost:    {actual:.2}");
        println!("  Average predicted monthly cost: {predicted:.2}");
    }

    println!("\nForecast for the next {} months:", dashboard.outlook.len());
    for row in &dashboard.outlook {
        println!(
            "  {}  {:>8.1} kWh  cost {:>10.2}",
            row.month, row.predicted_kwh, row.predicted_cost
        );
    }

    match serde_json::to_string_pretty(&dashboard) {
        Ok(json) => println!("\n{json}"),
        Err(err) => eprintln!("could not serialize dashboard data: {err}"),
    }
}
