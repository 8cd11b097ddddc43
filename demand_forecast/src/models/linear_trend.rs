//! Linear trend model for demand forecasting
//!
//! Demand is regressed on the number of days elapsed since the first
//! observation with ordinary least squares, then extrapolated one day at a
//! time past the end of the history.

use crate::data::{quantity_from_f64, DemandSeries};
use crate::error::{ForecastError, Result};
use crate::models::{ForecastModel, ForecastPoint, ForecastSeries, TrainedForecastModel};
use crate::utils::future_dates;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Fitted coefficients of `quantity = slope * elapsed_days + intercept`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearTrendModel {
    /// Change in demand per elapsed day
    pub slope: f64,
    /// Demand at elapsed day zero
    pub intercept: f64,
}

impl LinearTrendModel {
    /// Fit by ordinary least squares over `(x, y)` pairs
    pub fn fit(points: &[(f64, f64)]) -> Result<Self> {
        if points.len() < 2 {
            return Err(ForecastError::InsufficientData(format!(
                "Need at least 2 observations to fit a trend, got {}",
                points.len()
            )));
        }

        let n = points.len() as f64;
        let x_mean = points.iter().map(|(x, _)| x).sum::<f64>() / n;
        let y_mean = points.iter().map(|(_, y)| y).sum::<f64>() / n;

        let mut numerator = 0.0;
        let mut denominator = 0.0;
        for &(x, y) in points {
            numerator += (x - x_mean) * (y - y_mean);
            denominator += (x - x_mean) * (x - x_mean);
        }

        if denominator.abs() < 1e-10 {
            return Err(ForecastError::DegenerateInput(
                "Elapsed days have zero variance".to_string(),
            ));
        }

        let slope = numerator / denominator;
        let intercept = y_mean - slope * x_mean;

        Ok(Self { slope, intercept })
    }

    /// Raw regression output at `x`
    pub fn value_at(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }

    /// Regression output as a non-negative whole quantity
    pub fn quantity_at(&self, x: f64) -> Result<u32> {
        quantity_from_f64(self.value_at(x))
    }
}

/// Linear trend forecaster (untrained)
#[derive(Debug, Clone)]
pub struct LinearTrend {
    /// Name of the model
    name: String,
}

/// Linear trend forecaster fitted to a particular history
#[derive(Debug, Clone)]
pub struct TrainedLinearTrend {
    /// Name of the model
    name: String,
    /// Fitted coefficients
    model: LinearTrendModel,
    /// Origin of the elapsed-day feature
    first_date: NaiveDate,
    /// Last observed date; forecasts start the day after
    last_date: NaiveDate,
}

impl LinearTrend {
    /// Create a new linear trend model
    pub fn new() -> Self {
        Self {
            name: "Linear Trend".to_string(),
        }
    }
}

impl Default for LinearTrend {
    fn default() -> Self {
        Self::new()
    }
}

fn elapsed_days(date: NaiveDate, origin: NaiveDate) -> f64 {
    date.signed_duration_since(origin).num_days() as f64
}

impl ForecastModel for LinearTrend {
    type Trained = TrainedLinearTrend;

    fn train(&self, data: &DemandSeries) -> Result<Self::Trained> {
        let (first_date, last_date) = match (data.first_date(), data.last_date()) {
            (Some(first), Some(last)) if data.len() >= 2 => (first, last),
            _ => {
                return Err(ForecastError::InsufficientData(format!(
                    "Need at least 2 observations to fit a trend, got {}",
                    data.len()
                )))
            }
        };

        let points: Vec<(f64, f64)> = data
            .observations()
            .iter()
            .map(|o| (elapsed_days(o.date, first_date), f64::from(o.quantity)))
            .collect();

        let model = LinearTrendModel::fit(&points)?;

        Ok(TrainedLinearTrend {
            name: self.name.clone(),
            model,
            first_date,
            last_date,
        })
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl TrainedLinearTrend {
    /// Get the fitted coefficients
    pub fn model(&self) -> LinearTrendModel {
        self.model
    }

    /// First date of the training history
    pub fn first_date(&self) -> NaiveDate {
        self.first_date
    }

    /// Last date of the training history
    pub fn last_date(&self) -> NaiveDate {
        self.last_date
    }
}

impl TrainedForecastModel for TrainedLinearTrend {
    fn forecast(&self, horizon: usize) -> Result<ForecastSeries> {
        if horizon == 0 {
            return Err(ForecastError::InvalidParameter(
                "Forecast horizon must be at least 1 day".to_string(),
            ));
        }

        let points = future_dates(self.last_date, horizon)?
            .into_iter()
            .map(|date| -> Result<ForecastPoint> {
                Ok(ForecastPoint {
                    date,
                    predicted_quantity: self
                        .model
                        .quantity_at(elapsed_days(date, self.first_date))?,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        ForecastSeries::new(points)
    }

    fn predict(&self, data: &DemandSeries) -> Result<Vec<f64>> {
        if data.is_empty() {
            return Err(ForecastError::DataError(
                "Empty demand series".to_string(),
            ));
        }

        Ok(data
            .observations()
            .iter()
            .map(|o| self.model.value_at(elapsed_days(o.date, self.first_date)))
            .collect())
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Fit a linear trend to `series` and project it `horizon_days` forward
///
/// Returns the projected series together with the fitted coefficients.
/// Nothing is cached between calls.
pub fn forecast(
    series: &DemandSeries,
    horizon_days: usize,
) -> Result<(ForecastSeries, LinearTrendModel)> {
    if horizon_days == 0 {
        return Err(ForecastError::InvalidParameter(
            "Forecast horizon must be at least 1 day".to_string(),
        ));
    }

    let trained = LinearTrend::new().train(series)?;
    let projection = trained.forecast(horizon_days)?;

    Ok((projection, trained.model()))
}
