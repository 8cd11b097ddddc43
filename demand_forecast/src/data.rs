//! Demand history data handling for forecasting

use crate::error::{ForecastError, Result};
use chrono::NaiveDate;
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use statrs::statistics::Statistics;
use std::io::Read;
use std::path::Path;

/// Date format used for CSV ingestion and columnar export
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Round a demand level to a whole quantity, flooring at zero
///
/// Levels beyond `u32::MAX` are rejected rather than saturated.
pub fn quantity_from_f64(value: f64) -> Result<u32> {
    let rounded = value.max(0.0).round();
    if rounded > f64::from(u32::MAX) {
        return Err(ForecastError::DataError(format!(
            "Demand level {} exceeds the largest representable quantity {}",
            value,
            u32::MAX
        )));
    }

    Ok(rounded as u32)
}

/// A single day of observed demand
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Observation {
    /// Calendar date of the observation
    pub date: NaiveDate,
    /// Units demanded on that date
    pub quantity: u32,
}

impl Observation {
    /// Create a new observation
    pub fn new(date: NaiveDate, quantity: u32) -> Self {
        Self { date, quantity }
    }
}

/// Ordered demand history, strictly increasing by date
///
/// The series is immutable once built. Every constructor (including
/// deserialization) goes through [`DemandSeries::new`], so a value of this
/// type always has unique, ascending dates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Observation>", into = "Vec<Observation>")]
pub struct DemandSeries {
    observations: Vec<Observation>,
}

/// Paired date/value arrays ready to hand to a plotting backend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartSeries {
    /// Legend label
    pub label: String,
    /// X axis
    pub dates: Vec<NaiveDate>,
    /// Y axis
    pub values: Vec<u32>,
}

impl ChartSeries {
    /// Number of points in the series
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    /// Check if the series has no points
    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }
}

impl DemandSeries {
    /// Create a demand series, rejecting unordered or duplicate dates
    pub fn new(observations: Vec<Observation>) -> Result<Self> {
        for (i, pair) in observations.windows(2).enumerate() {
            if pair[1].date <= pair[0].date {
                return Err(ForecastError::DataError(format!(
                    "Observation {} ({}) does not follow {} ({}); dates must be strictly increasing",
                    i + 1,
                    pair[1].date,
                    i,
                    pair[0].date
                )));
            }
        }

        Ok(Self { observations })
    }

    /// Create a demand series from parallel date and quantity vectors
    pub fn from_parts(dates: Vec<NaiveDate>, quantities: Vec<u32>) -> Result<Self> {
        if dates.len() != quantities.len() {
            return Err(ForecastError::DataError(format!(
                "Dates length ({}) doesn't match quantities length ({})",
                dates.len(),
                quantities.len()
            )));
        }

        Self::new(
            dates
                .into_iter()
                .zip(quantities)
                .map(|(date, quantity)| Observation::new(date, quantity))
                .collect(),
        )
    }

    /// Get the observations
    pub fn observations(&self) -> &[Observation] {
        &self.observations
    }

    /// Get the length of the series
    pub fn len(&self) -> usize {
        self.observations.len()
    }

    /// Check if the series is empty
    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    /// Earliest date in the series
    pub fn first_date(&self) -> Option<NaiveDate> {
        self.observations.first().map(|o| o.date)
    }

    /// Latest date in the series
    pub fn last_date(&self) -> Option<NaiveDate> {
        self.observations.last().map(|o| o.date)
    }

    /// Get the dates as a vector
    pub fn dates(&self) -> Vec<NaiveDate> {
        self.observations.iter().map(|o| o.date).collect()
    }

    /// Get the quantities as a vector
    pub fn quantities(&self) -> Vec<u32> {
        self.observations.iter().map(|o| o.quantity).collect()
    }

    /// Get the quantities as f64 values
    pub fn quantities_f64(&self) -> Vec<f64> {
        self.observations
            .iter()
            .map(|o| f64::from(o.quantity))
            .collect()
    }

    /// Sum of all observed demand
    pub fn total_demand(&self) -> u64 {
        self.observations
            .iter()
            .map(|o| u64::from(o.quantity))
            .sum()
    }

    /// Average demand per observation
    pub fn mean_daily_demand(&self) -> Result<f64> {
        if self.is_empty() {
            return Err(ForecastError::InsufficientData(
                "Cannot average an empty demand series".to_string(),
            ));
        }

        Ok(self.quantities_f64().iter().mean())
    }

    /// Sample standard deviation of daily demand
    pub fn demand_std_dev(&self) -> Result<f64> {
        if self.len() < 2 {
            return Err(ForecastError::InsufficientData(format!(
                "Standard deviation needs at least 2 observations, got {}",
                self.len()
            )));
        }

        Ok(self.quantities_f64().iter().std_dev())
    }

    /// Chart-ready view of the history
    pub fn to_chart_series(&self, label: &str) -> ChartSeries {
        ChartSeries {
            label: label.to_string(),
            dates: self.dates(),
            values: self.quantities(),
        }
    }

    /// Columnar view with `date` and `quantity` columns
    pub fn to_dataframe(&self) -> Result<DataFrame> {
        let dates: Vec<String> = self
            .observations
            .iter()
            .map(|o| o.date.format(DATE_FORMAT).to_string())
            .collect();
        let date_series = Series::new("date", dates);
        let quantity_series = Series::new("quantity", self.quantities());

        Ok(DataFrame::new(vec![date_series, quantity_series])?)
    }
}

impl TryFrom<Vec<Observation>> for DemandSeries {
    type Error = ForecastError;

    fn try_from(observations: Vec<Observation>) -> Result<Self> {
        Self::new(observations)
    }
}

impl From<DemandSeries> for Vec<Observation> {
    fn from(series: DemandSeries) -> Self {
        series.observations
    }
}

/// Row layout accepted by [`DataLoader`]
#[derive(Debug, Deserialize)]
struct DemandRecord {
    date: NaiveDate,
    quantity: u32,
}

/// Data loader for externally supplied demand history
#[derive(Debug)]
pub struct DataLoader;

impl DataLoader {
    /// Load a demand series from a CSV file with `date,quantity` columns
    pub fn from_csv<P: AsRef<Path>>(path: P) -> Result<DemandSeries> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    /// Load a demand series from any CSV source with `date,quantity` columns
    pub fn from_reader<R: Read>(reader: R) -> Result<DemandSeries> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut observations = Vec::new();
        for record in csv_reader.deserialize::<DemandRecord>() {
            let record = record?;
            observations.push(Observation::new(record.date, record.quantity));
        }

        DemandSeries::new(observations)
    }
}
