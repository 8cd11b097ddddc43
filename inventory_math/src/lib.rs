//! # Inventory Math
//!
//! Classic inventory-control calculations driven by scalar demand statistics.
//! This crate provides the Economic Order Quantity, the reorder point and a
//! service-level based safety stock.

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod eoq;
pub mod reorder;

pub use eoq::{annual_demand_from_daily, annual_inventory_cost, economic_order_quantity};

use eoq::ensure_positive_holding_cost;
pub use reorder::{reorder_point, safety_stock};

/// Errors that can occur in inventory calculations
#[derive(Error, Debug, PartialEq)]
pub enum MathError {
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Calculation error: {0}")]
    CalculationError(String),
}

/// Result type for inventory math operations
pub type Result<T> = std::result::Result<T, MathError>;

/// Reject negative, NaN and infinite inputs
pub(crate) fn ensure_non_negative(name: &str, value: f64) -> Result<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(MathError::InvalidParameter(format!(
            "{} must be a non-negative number, got {}",
            name, value
        )))
    }
}

/// Cost and lead-time parameters of a replenishment policy
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PolicyCosts {
    /// Fixed cost of placing one order
    pub ordering_cost: f64,
    /// Cost of holding one unit for a year
    pub holding_cost: f64,
    /// Days between placing and receiving an order
    pub lead_time_days: f64,
    /// Buffer units held against variability
    pub safety_stock: f64,
}

impl Default for PolicyCosts {
    fn default() -> Self {
        Self {
            ordering_cost: 50.0,
            holding_cost: 5.0,
            lead_time_days: 7.0,
            safety_stock: 0.0,
        }
    }
}

impl PolicyCosts {
    /// Check every cost and lead-time parameter
    pub fn validate(&self) -> Result<()> {
        ensure_non_negative("Ordering cost", self.ordering_cost)?;
        ensure_positive_holding_cost(self.holding_cost)?;
        ensure_non_negative("Lead time", self.lead_time_days)?;
        ensure_non_negative("Safety stock", self.safety_stock)
    }
}

/// All scalar inputs needed to evaluate a replenishment policy
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InventoryPolicyInputs {
    pub annual_demand: f64,
    pub ordering_cost: f64,
    pub holding_cost: f64,
    pub avg_daily_demand: f64,
    pub lead_time_days: f64,
    pub safety_stock: f64,
}

/// Order quantity and trigger level of a replenishment policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryPolicy {
    pub economic_order_quantity: u64,
    pub reorder_point: u64,
}

impl InventoryPolicyInputs {
    /// Derive inputs from an average daily demand, annualised over 365 days
    pub fn from_daily_demand(avg_daily_demand: f64, costs: &PolicyCosts) -> Self {
        Self {
            annual_demand: annual_demand_from_daily(avg_daily_demand),
            ordering_cost: costs.ordering_cost,
            holding_cost: costs.holding_cost,
            avg_daily_demand,
            lead_time_days: costs.lead_time_days,
            safety_stock: costs.safety_stock,
        }
    }

    /// Check every input before any metric is computed
    pub fn validate(&self) -> Result<()> {
        ensure_non_negative("Annual demand", self.annual_demand)?;
        ensure_non_negative("Ordering cost", self.ordering_cost)?;
        ensure_positive_holding_cost(self.holding_cost)?;
        ensure_non_negative("Average daily demand", self.avg_daily_demand)?;
        ensure_non_negative("Lead time", self.lead_time_days)?;
        ensure_non_negative("Safety stock", self.safety_stock)?;
        Ok(())
    }

    /// Compute both the EOQ and the reorder point
    pub fn evaluate(&self) -> Result<InventoryPolicy> {
        self.validate()?;

        Ok(InventoryPolicy {
            economic_order_quantity: economic_order_quantity(
                self.annual_demand,
                self.ordering_cost,
                self.holding_cost,
            )?,
            reorder_point: reorder_point(
                self.avg_daily_demand,
                self.lead_time_days,
                self.safety_stock,
            )?,
        })
    }
}
