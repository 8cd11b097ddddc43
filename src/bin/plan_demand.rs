//! Sample planning run: simulate, forecast and print the report as JSON.
//!
//! Usage: `plan_demand [config.json]`

use chrono::Local;
use inventory_planner::{DemandPlanner, PlanningConfig};
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("inventory_planner=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = match std::env::args().nth(1) {
        Some(path) => {
            info!(%path, "loading planning config");
            PlanningConfig::from_json_file(&path)?
        }
        None => PlanningConfig::default(),
    };

    let planner = DemandPlanner::new(config)?;
    let report = planner.run(Local::now().date_naive())?;

    println!("{}", report.to_json()?);
    Ok(())
}
