//! Paper trade records and the form that creates them.

use crate::types::round_to;
use crate::{Error, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lot size used when the form leaves it blank.
pub const DEFAULT_LOT_SIZE: u32 = 20;

/// Stop-loss distance as a fraction of the premium.
pub const STOP_LOSS_FRACTION: f64 = 0.02;

/// Target distance as a multiple of the stop-loss distance.
pub const TARGET_MULTIPLIER: f64 = 5.0;

/// Outcome status of a paper trade.
///
/// `Pending` moves to either `Done` (target hit) or `Close` (stopped out);
/// both are terminal.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TradeStatus {
    #[default]
    Pending,
    Done,
    Close,
}

impl TradeStatus {
    /// Whether no further transition is allowed.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, TradeStatus::Pending)
    }
}

impl fmt::Display for TradeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TradeStatus::Pending => "pending",
            TradeStatus::Done => "done",
            TradeStatus::Close => "close",
        };
        f.write_str(s)
    }
}

/// Raw form input for a new paper trade.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewTrade {
    /// Option type, conventionally "CE" or "PE"
    pub option_type: String,
    /// Strike price as entered
    pub strike_price: String,
    /// Premium per unit as entered
    pub premium_price: String,
    /// Lot size as entered; blank means the default of 20
    pub lot_size: String,
}

impl NewTrade {
    /// Create a form with the three required fields and a blank lot size.
    pub fn new(option_type: &str, strike_price: &str, premium_price: &str) -> Self {
        Self {
            option_type: option_type.to_string(),
            strike_price: strike_price.to_string(),
            premium_price: premium_price.to_string(),
            lot_size: String::new(),
        }
    }

    /// Set the lot size field.
    pub fn with_lot_size(mut self, lot_size: &str) -> Self {
        self.lot_size = lot_size.to_string();
        self
    }

    /// Check required fields and parse the numeric ones.
    ///
    /// Returns the parsed `(premium, lot_size)` pair.
    pub fn validate(&self) -> Result<(f64, u32)> {
        require(&self.option_type, "Option type")?;
        require(&self.strike_price, "Strike price")?;
        let premium_raw = require(&self.premium_price, "Premium price")?;

        let premium = premium_raw
            .parse::<f64>()
            .ok()
            .filter(|p| p.is_finite())
            .ok_or_else(|| {
                Error::Validation(format!("Premium price must be a number, got '{}'", premium_raw))
            })?;

        let lot_raw = self.lot_size.trim();
        let lot_size = if lot_raw.is_empty() {
            DEFAULT_LOT_SIZE
        } else {
            lot_raw.parse::<u32>().map_err(|_| {
                Error::Validation(format!("Lot size must be a whole number, got '{}'", lot_raw))
            })?
        };

        Ok((premium, lot_size))
    }
}

fn require<'a>(value: &'a str, field: &str) -> Result<&'a str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(Error::Validation(format!("{} is required", field)));
    }
    Ok(trimmed)
}

/// A recorded paper trade.
///
/// Derived prices are fixed at creation; only `status` changes afterwards.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TradeRecord {
    /// Creation timestamp in milliseconds, unique within a journal
    pub id: i64,
    pub option_type: String,
    pub strike_price: String,
    /// Units in the lot
    pub lot_size: u32,
    /// Premium times lot size (amount invested)
    pub lot_size_amount: f64,
    pub premium_price: f64,
    pub stop_loss_per_qty: f64,
    pub target_per_qty: f64,
    pub stop_loss_whole: f64,
    pub profit_per_qty: f64,
    pub profit_whole: f64,
    #[serde(default)]
    pub loss_per_qty: f64,
    #[serde(default)]
    pub status: TradeStatus,
    /// Creation date, DD/MM/YYYY
    #[serde(default)]
    pub created_at: String,
}

impl TradeRecord {
    /// Build a pending record from a validated form.
    pub fn from_form(form: &NewTrade, id: i64, created_at: DateTime<Utc>) -> Result<Self> {
        let (premium, lot_size) = form.validate()?;
        let lot = lot_size as f64;

        let stop_loss_per_qty = premium - premium * STOP_LOSS_FRACTION;
        let stop_loss_distance = premium - stop_loss_per_qty;
        let target_per_qty = premium + stop_loss_distance * TARGET_MULTIPLIER;
        let profit_per_qty = target_per_qty - premium;

        Ok(Self {
            id,
            option_type: form.option_type.trim().to_string(),
            strike_price: form.strike_price.trim().to_string(),
            lot_size,
            lot_size_amount: round_to(premium * lot, 2),
            premium_price: premium,
            stop_loss_per_qty: round_to(stop_loss_per_qty, 2),
            target_per_qty: round_to(target_per_qty, 2),
            stop_loss_whole: round_to(stop_loss_distance * lot, 2),
            profit_per_qty: round_to(profit_per_qty, 2),
            profit_whole: round_to(profit_per_qty * lot, 2),
            loss_per_qty: round_to(stop_loss_distance, 2),
            status: TradeStatus::Pending,
            created_at: created_at.format("%d/%m/%Y").to_string(),
        })
    }
}
