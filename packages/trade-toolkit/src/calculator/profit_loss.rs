//! Profit/loss derivation for a single option position.

use crate::types::round_to;
use serde::{Deserialize, Serialize};

pub const DEFAULT_PREMIUM: f64 = 100.0;
pub const DEFAULT_LOT_SIZE: f64 = 20.0;
pub const DEFAULT_STOP_LOSS_PERCENT: f64 = 2.0;
pub const DEFAULT_TARGET_MULTIPLIER: f64 = 5.0;

/// Calculator inputs.
///
/// These are transient and never persisted. Lot size is kept as `f64` because
/// inputs arrive as free text and are coerced, not validated.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct CalculatorInputs {
    /// Premium paid per unit
    pub premium: f64,
    /// Units per lot
    pub lot_size: f64,
    /// Stop-loss distance as a percentage of the premium
    pub stop_loss_percent: f64,
    /// Reward multiple of the stop-loss distance
    pub target_multiplier: f64,
}

impl Default for CalculatorInputs {
    fn default() -> Self {
        Self {
            premium: DEFAULT_PREMIUM,
            lot_size: DEFAULT_LOT_SIZE,
            stop_loss_percent: DEFAULT_STOP_LOSS_PERCENT,
            target_multiplier: DEFAULT_TARGET_MULTIPLIER,
        }
    }
}

impl CalculatorInputs {
    /// Create inputs from numeric values.
    pub fn new(
        premium: f64,
        lot_size: f64,
        stop_loss_percent: f64,
        target_multiplier: f64,
    ) -> Self {
        Self {
            premium,
            lot_size,
            stop_loss_percent,
            target_multiplier,
        }
    }

    /// Create inputs from raw text fields.
    ///
    /// Blank or non-numeric fields coerce to `0.0`; no error is raised.
    pub fn from_raw(
        premium: &str,
        lot_size: &str,
        stop_loss_percent: &str,
        target_multiplier: &str,
    ) -> Self {
        Self {
            premium: coerce_number(premium),
            lot_size: coerce_number(lot_size),
            stop_loss_percent: coerce_number(stop_loss_percent),
            target_multiplier: coerce_number(target_multiplier),
        }
    }

    /// Restore the default inputs (100, 20, 2, 5).
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Parse a free-text numeric field, treating anything unparsable as zero.
pub fn coerce_number(raw: &str) -> f64 {
    match raw.trim().parse::<f64>() {
        Ok(value) if value.is_finite() => value,
        _ => 0.0,
    }
}

/// Derived figures, each rounded to 2 decimal places.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ProfitLossResult {
    /// Exit price that caps the loss
    pub stop_loss_price: f64,
    /// Exit price that realizes the profit
    pub target_price: f64,
    pub loss_per_qty: f64,
    pub total_loss: f64,
    pub profit_per_qty: f64,
    pub total_profit: f64,
    pub loss_percent: f64,
    pub profit_percent: f64,
    /// Capital required to buy one lot
    pub amount_needed: f64,
    pub total_profit_with_investment: f64,
    pub total_loss_with_investment: f64,
}

/// Calculate stop-loss, target and P&L figures.
///
/// # Example
///
/// ```rust
/// use trade_toolkit::calculator::{calculate, CalculatorInputs};
///
/// let result = calculate(&CalculatorInputs::new(100.0, 20.0, 2.0, 5.0));
/// assert_eq!(result.stop_loss_price, 98.0);
/// assert_eq!(result.target_price, 110.0);
/// assert_eq!(result.total_profit, 200.0);
/// ```
pub fn calculate(inputs: &CalculatorInputs) -> ProfitLossResult {
    let p = inputs.premium;
    let l = inputs.lot_size;
    let m = inputs.target_multiplier;

    let sl_amount = (inputs.stop_loss_percent / 100.0) * p;
    let stop_loss_price = p - sl_amount;
    let target_price = p + sl_amount * m;

    let loss_per_qty = p - stop_loss_price;
    let total_loss = loss_per_qty * l;
    let profit_per_qty = target_price - p;
    let total_profit = profit_per_qty * l;

    let (loss_percent, profit_percent) = if p != 0.0 {
        ((loss_per_qty / p) * 100.0, (profit_per_qty / p) * 100.0)
    } else {
        (0.0, 0.0)
    };

    let amount_needed = p * l;

    tracing::debug!(
        premium = p,
        lot_size = l,
        sl_amount,
        "calculated profit/loss"
    );

    ProfitLossResult {
        stop_loss_price: round_to(stop_loss_price, 2),
        target_price: round_to(target_price, 2),
        loss_per_qty: round_to(loss_per_qty, 2),
        total_loss: round_to(total_loss, 2),
        profit_per_qty: round_to(profit_per_qty, 2),
        total_profit: round_to(total_profit, 2),
        loss_percent: round_to(loss_percent, 2),
        profit_percent: round_to(profit_percent, 2),
        amount_needed: round_to(amount_needed, 2),
        total_profit_with_investment: round_to(total_profit + amount_needed, 2),
        total_loss_with_investment: round_to(amount_needed - total_loss, 2),
    }
}
