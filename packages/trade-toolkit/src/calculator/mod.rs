//! Option profit/loss calculator.
//!
//! Derives stop-loss and target prices plus per-lot profit and loss from a
//! premium, lot size, stop-loss percentage and target multiplier.

mod profit_loss;

pub use profit_loss::{
    calculate, coerce_number, CalculatorInputs, ProfitLossResult, DEFAULT_LOT_SIZE,
    DEFAULT_PREMIUM, DEFAULT_STOP_LOSS_PERCENT, DEFAULT_TARGET_MULTIPLIER,
};
