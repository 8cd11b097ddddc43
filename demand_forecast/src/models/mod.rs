//! Forecasting models for demand series

use crate::data::{ChartSeries, DemandSeries, DATE_FORMAT};
use crate::error::{ForecastError, Result};
use chrono::NaiveDate;
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

/// A single projected day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForecastPoint {
    /// Calendar date being forecast
    pub date: NaiveDate,
    /// Projected demand, floored at zero and rounded
    pub predicted_quantity: u32,
}

/// Forecast result: a contiguous daily run of projected demand
///
/// Deserialization goes through [`ForecastSeries::new`], so gaps and
/// out-of-order dates are rejected there too.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<ForecastPoint>", into = "Vec<ForecastPoint>")]
pub struct ForecastSeries {
    points: Vec<ForecastPoint>,
}

impl ForecastSeries {
    /// Create a forecast series, checking the dates form a daily run
    pub fn new(points: Vec<ForecastPoint>) -> Result<Self> {
        for pair in points.windows(2) {
            if pair[1].date.signed_duration_since(pair[0].date).num_days() != 1 {
                return Err(ForecastError::DataError(format!(
                    "Forecast dates {} and {} are not consecutive days",
                    pair[0].date, pair[1].date
                )));
            }
        }

        Ok(Self { points })
    }

    /// Get the forecast points
    pub fn points(&self) -> &[ForecastPoint] {
        &self.points
    }

    /// Get the number of periods forecasted
    pub fn horizons(&self) -> usize {
        self.points.len()
    }

    /// Check if the forecast is empty
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Get the forecast dates
    pub fn dates(&self) -> Vec<NaiveDate> {
        self.points.iter().map(|p| p.date).collect()
    }

    /// Get the forecasted values
    pub fn values(&self) -> Vec<u32> {
        self.points.iter().map(|p| p.predicted_quantity).collect()
    }

    /// Chart-ready view of the forecast
    pub fn to_chart_series(&self, label: &str) -> ChartSeries {
        ChartSeries {
            label: label.to_string(),
            dates: self.dates(),
            values: self.values(),
        }
    }

    /// Columnar view with `date` and `predicted_quantity` columns
    pub fn to_dataframe(&self) -> Result<DataFrame> {
        let dates: Vec<String> = self
            .points
            .iter()
            .map(|p| p.date.format(DATE_FORMAT).to_string())
            .collect();
        let date_series = Series::new("date", dates);
        let value_series = Series::new("predicted_quantity", self.values());

        Ok(DataFrame::new(vec![date_series, value_series])?)
    }
}

impl TryFrom<Vec<ForecastPoint>> for ForecastSeries {
    type Error = ForecastError;

    fn try_from(points: Vec<ForecastPoint>) -> Result<Self> {
        Self::new(points)
    }
}

impl From<ForecastSeries> for Vec<ForecastPoint> {
    fn from(series: ForecastSeries) -> Self {
        series.points
    }
}

/// Trained forecast model
pub trait TrainedForecastModel: Debug {
    /// Generate forecast for future periods
    fn forecast(&self, horizons: usize) -> Result<ForecastSeries>;

    /// Fitted values for each observation of a series
    fn predict(&self, data: &DemandSeries) -> Result<Vec<f64>>;

    /// Name of the model
    fn name(&self) -> &str;
}

/// Forecast model that can be trained on a demand series
pub trait ForecastModel: Debug + Clone {
    /// The type of trained model produced
    type Trained: TrainedForecastModel;

    /// Train the model on a demand series
    fn train(&self, data: &DemandSeries) -> Result<Self::Trained>;

    /// Get the name of the model
    fn name(&self) -> &str;
}

pub mod linear_trend;
