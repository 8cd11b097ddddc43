//! Reorder point and safety stock

use crate::{ensure_non_negative, MathError, Result};
use statrs::distribution::{ContinuousCDF, Normal};

/// Stock level at which a replenishment order should be placed, rounded
///
/// `ROP = avg_daily_demand * lead_time_days + safety_stock`
pub fn reorder_point(avg_daily_demand: f64, lead_time_days: f64, safety_stock: f64) -> Result<u64> {
    ensure_non_negative("Average daily demand", avg_daily_demand)?;
    ensure_non_negative("Lead time", lead_time_days)?;
    ensure_non_negative("Safety stock", safety_stock)?;

    let rop = avg_daily_demand * lead_time_days + safety_stock;
    if !rop.is_finite() {
        return Err(MathError::CalculationError(format!(
            "Reorder point overflowed for demand {} over {} days",
            avg_daily_demand, lead_time_days
        )));
    }

    Ok(rop.round() as u64)
}

/// Safety stock covering demand variability over the lead time
///
/// `z * sigma * sqrt(L)`, with `z` the standard normal quantile of the
/// target cycle service level (for example 0.95).
pub fn safety_stock(demand_std_dev: f64, lead_time_days: f64, service_level: f64) -> Result<f64> {
    ensure_non_negative("Demand standard deviation", demand_std_dev)?;
    ensure_non_negative("Lead time", lead_time_days)?;
    if !(service_level > 0.0 && service_level < 1.0) {
        return Err(MathError::InvalidParameter(format!(
            "Service level must be strictly between 0 and 1, got {}",
            service_level
        )));
    }

    let standard_normal =
        Normal::new(0.0, 1.0).map_err(|e| MathError::CalculationError(e.to_string()))?;
    let z = standard_normal.inverse_cdf(service_level);

    Ok((z * demand_std_dev * lead_time_days.sqrt()).max(0.0))
}
