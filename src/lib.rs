//! # Inventory Planner
//!
//! `inventory_planner` ties together demand simulation, linear trend
//! forecasting and the EOQ / reorder point calculators. It produces a
//! [`PlanningReport`]: plain dates and numbers that any chart or console
//! renderer can consume.
//!
//! ## Example
//!
//! ```
//! use chrono::NaiveDate;
//! use inventory_planner::{DemandPlanner, PlanningConfig};
//!
//! let config = PlanningConfig {
//!     seed: Some(7),
//!     ..PlanningConfig::default()
//! };
//! let planner = DemandPlanner::new(config)?;
//! let report = planner.run(NaiveDate::from_ymd_opt(2024, 6, 1).unwrap())?;
//!
//! assert_eq!(report.history.len(), 30);
//! assert_eq!(report.forecast.len(), 30);
//! # Ok::<(), inventory_planner::PlannerError>(())
//! ```

use chrono::NaiveDate;
use demand_forecast::{forecast, ChartSeries, DemandSeries, DemandSimulator, ForecastError};
use demand_forecast::{LinearTrendModel, SimulationParams};
use inventory_math::{InventoryPolicyInputs, MathError, PolicyCosts};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;
use tracing::{debug, info};

/// Label of the historical series in reports
pub const HISTORY_LABEL: &str = "Historical Demand";
/// Label of the projected series in reports
pub const FORECAST_LABEL: &str = "Forecasted Demand";

/// Errors raised while configuring or running a planning pass
#[derive(Debug, Error)]
pub enum PlannerError {
    #[error(transparent)]
    Forecast(#[from] ForecastError),

    #[error(transparent)]
    Inventory(#[from] MathError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for planning operations
pub type Result<T> = std::result::Result<T, PlannerError>;

/// Everything needed for one planning pass
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlanningConfig {
    pub simulation: SimulationParams,
    pub costs: PolicyCosts,
    /// Days to project past the end of the history
    pub horizon_days: usize,
    /// Fixed seed for reproducible runs; `None` draws from the thread-local source
    pub seed: Option<u64>,
}

impl Default for PlanningConfig {
    fn default() -> Self {
        Self {
            simulation: SimulationParams::default(),
            costs: PolicyCosts::default(),
            horizon_days: 30,
            seed: None,
        }
    }
}

impl PlanningConfig {
    /// Parse a configuration from JSON; missing fields take their defaults
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a configuration from a JSON file
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }
}

/// Scalar outputs of a planning pass
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InventoryMetrics {
    pub daily_average: f64,
    pub annual_demand: f64,
    pub economic_order_quantity: u64,
    pub reorder_point: u64,
}

/// Serializable hand-off to a chart or console renderer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanningReport {
    pub history: ChartSeries,
    pub forecast: ChartSeries,
    pub model: LinearTrendModel,
    pub metrics: InventoryMetrics,
}

impl PlanningReport {
    /// Pretty JSON rendering of the report
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Runs simulate -> forecast -> inventory metrics
#[derive(Debug, Clone)]
pub struct DemandPlanner {
    config: PlanningConfig,
    simulator: DemandSimulator,
}

impl DemandPlanner {
    /// Create a planner, validating the whole configuration up front
    pub fn new(config: PlanningConfig) -> Result<Self> {
        if config.horizon_days == 0 {
            return Err(PlannerError::Config(
                "Forecast horizon must be at least 1 day".to_string(),
            ));
        }
        config.costs.validate()?;
        let simulator = DemandSimulator::new(config.simulation)?;

        Ok(Self { config, simulator })
    }

    /// Get the planning configuration
    pub fn config(&self) -> &PlanningConfig {
        &self.config
    }

    /// Simulate a history ending the day before `today` and plan from it
    pub fn run(&self, today: NaiveDate) -> Result<PlanningReport> {
        let history = match self.config.seed {
            Some(seed) => self.simulator.simulate_seeded(today, seed)?,
            None => self.simulator.simulate(today, &mut rand::thread_rng())?,
        };
        debug!(days = history.len(), seed = ?self.config.seed, "simulated demand history");

        self.plan(&history)
    }

    /// Like [`DemandPlanner::run`], drawing noise from a caller-supplied source
    pub fn run_with_rng<R: Rng + ?Sized>(&self, today: NaiveDate, rng: &mut R) -> Result<PlanningReport> {
        let history = self.simulator.simulate(today, rng)?;
        debug!(days = history.len(), "simulated demand history");

        self.plan(&history)
    }

    /// Forecast and compute inventory metrics for an existing history
    pub fn plan(&self, history: &DemandSeries) -> Result<PlanningReport> {
        let (projection, model) = forecast(history, self.config.horizon_days)?;
        debug!(
            slope = model.slope,
            intercept = model.intercept,
            horizon = projection.horizons(),
            "fitted linear trend"
        );

        let daily_average = history.mean_daily_demand()?;
        let inputs = InventoryPolicyInputs::from_daily_demand(daily_average, &self.config.costs);
        let policy = inputs.evaluate()?;

        let metrics = InventoryMetrics {
            daily_average,
            annual_demand: inputs.annual_demand,
            economic_order_quantity: policy.economic_order_quantity,
            reorder_point: policy.reorder_point,
        };
        info!(
            daily_average = metrics.daily_average,
            eoq = metrics.economic_order_quantity,
            reorder_point = metrics.reorder_point,
            "planning pass complete"
        );

        Ok(PlanningReport {
            history: history.to_chart_series(HISTORY_LABEL),
            forecast: projection.to_chart_series(FORECAST_LABEL),
            model,
            metrics,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use chrono::Days;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
    }

    fn seeded_config(seed: u64) -> PlanningConfig {
        PlanningConfig {
            seed: Some(seed),
            ..PlanningConfig::default()
        }
    }

    #[test]
    fn test_plan_from_known_history() {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let dates = (0..3).map(|i| start + Days::new(i)).collect();
        let history = DemandSeries::from_parts(dates, vec![90, 100, 110]).unwrap();

        let planner = DemandPlanner::new(PlanningConfig {
            horizon_days: 1,
            ..PlanningConfig::default()
        })
        .unwrap();
        let report = planner.plan(&history).unwrap();

        assert_eq!(report.model.slope, 10.0);
        assert_eq!(report.model.intercept, 90.0);
        assert_eq!(report.forecast.values, vec![120]);
        assert_eq!(report.forecast.dates, vec![start + Days::new(3)]);
        assert_relative_eq!(report.metrics.daily_average, 100.0);
        assert_relative_eq!(report.metrics.annual_demand, 36_500.0);
        assert_eq!(report.metrics.economic_order_quantity, 854);
        assert_eq!(report.metrics.reorder_point, 700);
        assert_eq!(report.history.label, HISTORY_LABEL);
        assert_eq!(report.forecast.label, FORECAST_LABEL);
    }

    #[test]
    fn test_seeded_runs_repeat() {
        let planner = DemandPlanner::new(seeded_config(5)).unwrap();

        let first = planner.run(today()).unwrap();
        let second = planner.run(today()).unwrap();

        assert_eq!(first, second);
        assert_eq!(first.history.dates.last(), today().checked_sub_days(Days::new(1)).as_ref());
        assert_eq!(first.forecast.dates.first(), Some(&today()));
    }

    #[test]
    fn test_injected_rng_matches_seeded_run() {
        use rand::rngs::StdRng;
        use rand::SeedableRng;

        let planner = DemandPlanner::new(seeded_config(21)).unwrap();

        let seeded = planner.run(today()).unwrap();
        let injected = planner
            .run_with_rng(today(), &mut StdRng::seed_from_u64(21))
            .unwrap();
        let other_seed = planner
            .run_with_rng(today(), &mut StdRng::seed_from_u64(22))
            .unwrap();

        assert_eq!(injected, seeded);
        assert_ne!(other_seed.history, seeded.history);
    }

    #[test]
    fn test_unseeded_run_shape() {
        let planner = DemandPlanner::new(PlanningConfig::default()).unwrap();
        let report = planner.run(today()).unwrap();

        assert_eq!(report.history.len(), 30);
        assert_eq!(report.forecast.len(), 30);
    }

    #[test]
    fn test_invalid_config_rejected_before_running() {
        let zero_horizon = PlanningConfig {
            horizon_days: 0,
            ..PlanningConfig::default()
        };
        assert!(matches!(
            DemandPlanner::new(zero_horizon),
            Err(PlannerError::Config(_))
        ));

        let mut bad_costs = PlanningConfig::default();
        bad_costs.costs.holding_cost = 0.0;
        assert!(matches!(
            DemandPlanner::new(bad_costs),
            Err(PlannerError::Inventory(MathError::InvalidParameter(_)))
        ));

        let mut bad_trend = PlanningConfig::default();
        bad_trend.simulation.trend = 0.0;
        assert!(matches!(
            DemandPlanner::new(bad_trend),
            Err(PlannerError::Forecast(ForecastError::InvalidParameter(_)))
        ));
    }

    #[test]
    fn test_single_day_history_cannot_be_planned() {
        let mut config = seeded_config(1);
        config.simulation.days = 1;
        let planner = DemandPlanner::new(config).unwrap();

        assert!(matches!(
            planner.run(today()),
            Err(PlannerError::Forecast(ForecastError::InsufficientData(_)))
        ));
    }

    #[test]
    fn test_config_from_json_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"{{"simulation": {{"days": 60, "trend": 1.0}}, "costs": {{"lead_time_days": 3}}, "seed": 9}}"#
        )
        .unwrap();

        let config = PlanningConfig::from_json_file(file.path()).unwrap();

        assert_eq!(config.simulation.days, 60);
        assert_eq!(config.simulation.trend, 1.0);
        assert_eq!(config.simulation.base_demand, 100.0);
        assert_eq!(config.costs.lead_time_days, 3.0);
        assert_eq!(config.costs.ordering_cost, 50.0);
        assert_eq!(config.horizon_days, 30);
        assert_eq!(config.seed, Some(9));
    }

    #[test]
    fn test_report_json_shape() {
        let planner = DemandPlanner::new(seeded_config(3)).unwrap();
        let report = planner.run(today()).unwrap();

        let json = report.to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert!(value["history"]["dates"].is_array());
        assert!(value["forecast"]["values"].is_array());
        assert!(value["model"]["slope"].is_number());
        assert!(value["metrics"]["economic_order_quantity"].is_u64());
        assert!(value["metrics"]["reorder_point"].is_u64());

        let back: PlanningReport = serde_json::from_str(&json).unwrap();
        assert_eq!(back.metrics, report.metrics);
    }
}
