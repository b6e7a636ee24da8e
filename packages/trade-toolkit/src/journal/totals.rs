//! Aggregate figures over the journal.

use super::record::{TradeRecord, TradeStatus};
use crate::types::round_to;
use serde::{Deserialize, Serialize};

/// Journal totals, recomputed from scratch on every call.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct JournalTotals {
    /// Sum of premium times lot size over every trade
    pub total_invested: f64,
    /// Sum of full-lot profit over trades marked done
    pub total_profit: f64,
    /// Sum of full-lot stop loss over trades marked close
    pub total_loss: f64,
    /// Total profit minus total loss
    pub final_adjusted_profit: f64,
    pub trade_count: usize,
    pub pending_count: usize,
    pub done_count: usize,
    pub closed_count: usize,
}

impl JournalTotals {
    /// Calculate totals from a list of trades.
    pub fn from_trades(trades: &[TradeRecord]) -> Self {
        let mut totals = Self {
            trade_count: trades.len(),
            ..Self::default()
        };

        let mut invested = 0.0;
        let mut profit = 0.0;
        let mut loss = 0.0;

        for trade in trades {
            invested += trade.lot_size_amount;
            match trade.status {
                TradeStatus::Pending => totals.pending_count += 1,
                TradeStatus::Done => {
                    profit += trade.profit_whole;
                    totals.done_count += 1;
                }
                TradeStatus::Close => {
                    loss += trade.stop_loss_whole;
                    totals.closed_count += 1;
                }
            }
        }

        totals.total_invested = round_to(invested, 2);
        totals.total_profit = round_to(profit, 2);
        totals.total_loss = round_to(loss, 2);
        totals.final_adjusted_profit = round_to(profit - loss, 2);
        totals
    }
}
