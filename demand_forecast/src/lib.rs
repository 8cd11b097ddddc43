//! # Demand Forecast
//!
//! Synthetic daily demand generation and linear trend forecasting.
//!
//! ## Features
//!
//! - Demand history model (`Observation`, `DemandSeries`) with strictly increasing dates
//! - Seedable demand simulator with exponential trend ramp and gaussian noise
//! - Ordinary least squares trend model projected day by day
//! - Chart-ready and columnar (`polars`) views of history and forecast
//! - CSV ingestion of externally recorded demand
//!
//! ## Quick Start
//!
//! ```rust
//! use chrono::NaiveDate;
//! use demand_forecast::simulator::{DemandSimulator, SimulationParams};
//! use demand_forecast::models::linear_trend::forecast;
//!
//! let today = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
//! let simulator = DemandSimulator::new(SimulationParams::default())?;
//! let history = simulator.simulate_seeded(today, 42)?;
//!
//! let (projection, model) = forecast(&history, 14)?;
//! assert_eq!(projection.horizons(), 14);
//! assert_eq!(projection.points()[0].date, today);
//! println!("slope {:.2}, intercept {:.2}", model.slope, model.intercept);
//! # Ok::<(), demand_forecast::ForecastError>(())
//! ```

pub mod data;
pub mod error;
pub mod models;
pub mod simulator;
pub mod utils;

// Re-export commonly used types
pub use crate::data::{ChartSeries, DataLoader, DemandSeries, Observation};
pub use crate::error::ForecastError;
pub use crate::models::linear_trend::{forecast, LinearTrend, LinearTrendModel};
pub use crate::models::{ForecastModel, ForecastPoint, ForecastSeries, TrainedForecastModel};
pub use crate::simulator::{DemandSimulator, SimulationParams};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
