use chrono::Local;
use demand_forecast::models::linear_trend::LinearTrend;
use demand_forecast::models::{ForecastModel, TrainedForecastModel};
use demand_forecast::simulator::{DemandSimulator, SimulationParams};
use demand_forecast::utils::forecast_accuracy;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("Demand Forecast: Simulate and Forecast Example");
    println!("==============================================\n");

    let today = Local::now().date_naive();
    let simulator = DemandSimulator::new(SimulationParams::default())?;
    let history = simulator.simulate_seeded(today, 42)?;

    println!(
        "Simulated {} days of demand ({} to {})",
        history.len(),
        history.first_date().unwrap_or(today),
        history.last_date().unwrap_or(today)
    );
    println!("Average daily demand: {:.2}\n", history.mean_daily_demand()?);

    let trained = LinearTrend::new().train(&history)?;
    let model = trained.model();
    println!(
        "{}: quantity = {:.3} * day + {:.3}",
        trained.name(),
        model.slope,
        model.intercept
    );

    let fitted = trained.predict(&history)?;
    println!("\n{}", forecast_accuracy(&fitted, &history.quantities_f64())?);

    let projection = trained.forecast(7)?;
    println!("Forecast for the next 7 days:");
    for point in projection.points() {
        println!("  {}: {}", point.date, point.predicted_quantity);
    }

    Ok(())
}
