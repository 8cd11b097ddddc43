//! Economic Order Quantity
//!
//! `EOQ = sqrt(2 * D * S / H)` where `D` is annual demand, `S` the cost of
//! one order and `H` the yearly holding cost of one unit.

use crate::{ensure_non_negative, MathError, Result};
use serde::{Deserialize, Serialize};

/// Days used to annualise a daily demand rate
pub const DAYS_PER_YEAR: f64 = 365.0;

/// Annual demand extrapolated from an average daily rate
///
/// A straight `avg * 365` with no seasonality; coarse, but it is what the
/// planning report has always used.
pub fn annual_demand_from_daily(avg_daily_demand: f64) -> f64 {
    avg_daily_demand * DAYS_PER_YEAR
}

/// Reject zero, negative, NaN and infinite holding costs
pub(crate) fn ensure_positive_holding_cost(holding_cost: f64) -> Result<()> {
    if holding_cost.is_finite() && holding_cost > 0.0 {
        Ok(())
    } else {
        Err(MathError::InvalidParameter(format!(
            "Holding cost must be positive, got {}",
            holding_cost
        )))
    }
}

/// Order quantity minimising combined ordering and holding cost, rounded
pub fn economic_order_quantity(
    annual_demand: f64,
    ordering_cost: f64,
    holding_cost: f64,
) -> Result<u64> {
    ensure_non_negative("Annual demand", annual_demand)?;
    ensure_non_negative("Ordering cost", ordering_cost)?;
    ensure_positive_holding_cost(holding_cost)?;

    let eoq = (2.0 * annual_demand * ordering_cost / holding_cost).sqrt();
    if !eoq.is_finite() {
        return Err(MathError::CalculationError(format!(
            "EOQ overflowed for demand {} and ordering cost {}",
            annual_demand, ordering_cost
        )));
    }

    Ok(eoq.round() as u64)
}

/// Yearly cost split of ordering a fixed quantity each cycle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InventoryCost {
    pub orders_per_year: f64,
    pub annual_ordering_cost: f64,
    pub annual_holding_cost: f64,
    pub total_cost: f64,
}

/// Annual ordering and holding cost of replenishing `order_quantity` units at a time
pub fn annual_inventory_cost(
    annual_demand: f64,
    ordering_cost: f64,
    holding_cost: f64,
    order_quantity: u64,
) -> Result<InventoryCost> {
    ensure_non_negative("Annual demand", annual_demand)?;
    ensure_non_negative("Ordering cost", ordering_cost)?;
    ensure_positive_holding_cost(holding_cost)?;
    if order_quantity == 0 {
        return Err(MathError::InvalidParameter(
            "Order quantity must be at least 1".to_string(),
        ));
    }

    let q = order_quantity as f64;
    let orders_per_year = annual_demand / q;
    let annual_ordering_cost = orders_per_year * ordering_cost;
    let annual_holding_cost = q / 2.0 * holding_cost;

    Ok(InventoryCost {
        orders_per_year,
        annual_ordering_cost,
        annual_holding_cost,
        total_cost: annual_ordering_cost + annual_holding_cost,
    })
}
