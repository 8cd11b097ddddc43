//! Synthetic daily demand generation
//!
//! Demand for day `i` of an `n`-day horizon is
//! `base_demand * trend^(i / n)` plus gaussian noise, floored at zero and
//! rounded. The random source is always passed in so runs can be replayed.

use crate::data::{quantity_from_f64, DemandSeries, Observation};
use crate::error::{ForecastError, Result};
use chrono::{Days, Local, NaiveDate};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Normal};
use serde::{Deserialize, Serialize};

/// Parameters controlling the synthetic demand history
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationParams {
    /// Number of days of history to generate
    pub days: usize,
    /// Demand level on the first simulated day
    pub base_demand: f64,
    /// Standard deviation of the additive daily noise
    pub noise_level: f64,
    /// Growth factor reached at the end of the horizon (1.0 = flat)
    pub trend: f64,
}

impl Default for SimulationParams {
    fn default() -> Self {
        Self {
            days: 30,
            base_demand: 100.0,
            noise_level: 20.0,
            trend: 1.5,
        }
    }
}

impl SimulationParams {
    /// Check every parameter against its documented domain
    pub fn validate(&self) -> Result<()> {
        if self.days == 0 {
            return Err(ForecastError::InvalidParameter(
                "Number of days must be at least 1".to_string(),
            ));
        }

        if !self.base_demand.is_finite() || self.base_demand < 0.0 {
            return Err(ForecastError::InvalidParameter(format!(
                "Base demand must be a non-negative number, got {}",
                self.base_demand
            )));
        }

        if !self.noise_level.is_finite() || self.noise_level < 0.0 {
            return Err(ForecastError::InvalidParameter(format!(
                "Noise level must be a non-negative number, got {}",
                self.noise_level
            )));
        }

        if !self.trend.is_finite() || self.trend <= 0.0 {
            return Err(ForecastError::InvalidParameter(format!(
                "Trend must be positive, got {}",
                self.trend
            )));
        }

        if self.peak_level() > f64::from(u32::MAX) {
            return Err(ForecastError::InvalidParameter(format!(
                "Peak demand level {} exceeds the largest representable quantity {}",
                self.peak_level(),
                u32::MAX
            )));
        }

        Ok(())
    }

    /// Highest noise-free level reached over the horizon
    pub fn peak_level(&self) -> f64 {
        let last = self.days.saturating_sub(1) as f64 / self.days.max(1) as f64;
        self.base_demand * self.trend.powf(last).max(1.0)
    }
}

/// Generator of synthetic demand histories
#[derive(Debug, Clone)]
pub struct DemandSimulator {
    params: SimulationParams,
    noise: Normal<f64>,
}

impl DemandSimulator {
    /// Create a new simulator from validated parameters
    pub fn new(params: SimulationParams) -> Result<Self> {
        params.validate()?;

        let noise = Normal::new(0.0, params.noise_level).map_err(|e| {
            ForecastError::InvalidParameter(format!("Invalid noise distribution: {}", e))
        })?;

        Ok(Self { params, noise })
    }

    /// Get the simulation parameters
    pub fn params(&self) -> &SimulationParams {
        &self.params
    }

    /// Generate a history whose last observation falls on the day before `today`
    pub fn simulate<R: Rng + ?Sized>(&self, today: NaiveDate, rng: &mut R) -> Result<DemandSeries> {
        let days = self.params.days;
        let start = today
            .checked_sub_days(Days::new(days as u64))
            .ok_or_else(|| {
                ForecastError::InvalidParameter(format!(
                    "{} days before {} is outside the supported calendar",
                    days, today
                ))
            })?;

        let mut observations = Vec::with_capacity(days);
        for i in 0..days {
            // start + i < today, so this cannot leave the calendar
            let date = start + Days::new(i as u64);
            let level = self.params.base_demand * self.params.trend.powf(i as f64 / days as f64);
            let raw = level + self.noise.sample(rng);
            observations.push(Observation::new(date, quantity_from_f64(raw)?));
        }

        DemandSeries::new(observations)
    }

    /// Generate a reproducible history from a fixed seed
    pub fn simulate_seeded(&self, today: NaiveDate, seed: u64) -> Result<DemandSeries> {
        let mut rng = StdRng::seed_from_u64(seed);
        self.simulate(today, &mut rng)
    }

    /// Generate a history ending yesterday using the thread-local random source
    pub fn simulate_now(&self) -> Result<DemandSeries> {
        let today = Local::now().date_naive();
        self.simulate(today, &mut rand::thread_rng())
    }
}

/// Generate a demand history with the given parameters
///
/// Shorthand for building a [`DemandSimulator`] and running it once.
pub fn simulate<R: Rng + ?Sized>(
    days: usize,
    base_demand: f64,
    noise_level: f64,
    trend: f64,
    today: NaiveDate,
    rng: &mut R,
) -> Result<DemandSeries> {
    DemandSimulator::new(SimulationParams {
        days,
        base_demand,
        noise_level,
        trend,
    })?
    .simulate(today, rng)
}
