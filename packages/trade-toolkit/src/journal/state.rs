//! Paper trade journal state machine.

use super::record::{NewTrade, TradeRecord, TradeStatus};
use super::store::TradeStore;
use super::totals::JournalTotals;
use crate::{Error, Result};
use chrono::{DateTime, Utc};

/// An ordered list of paper trades mirrored to a [`TradeStore`].
///
/// The store is read once in [`TradeJournal::open`] and rewritten after every
/// add, status change and delete.
#[derive(Debug)]
pub struct TradeJournal<S: TradeStore> {
    store: S,
    trades: Vec<TradeRecord>,
}

impl<S: TradeStore> TradeJournal<S> {
    /// Open a journal, loading any persisted trades.
    pub fn open(store: S) -> Result<Self> {
        let trades = store.load()?;
        tracing::debug!(count = trades.len(), "loaded trade journal");
        Ok(Self { store, trades })
    }

    /// All trades in insertion order.
    pub fn trades(&self) -> &[TradeRecord] {
        &self.trades
    }

    /// Find a trade by id.
    pub fn get(&self, id: i64) -> Option<&TradeRecord> {
        self.trades.iter().find(|t| t.id == id)
    }

    /// Get the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Consume the journal, returning the store.
    pub fn into_store(self) -> S {
        self.store
    }

    /// Record a new pending trade created now.
    pub fn add_trade(&mut self, form: &NewTrade) -> Result<TradeRecord> {
        self.add_trade_at(form, Utc::now())
    }

    /// Record a new pending trade with an explicit creation time.
    ///
    /// The id is the creation time in milliseconds, bumped past the largest
    /// existing id when two trades land in the same millisecond.
    pub fn add_trade_at(&mut self, form: &NewTrade, now: DateTime<Utc>) -> Result<TradeRecord> {
        let mut id = now.timestamp_millis();
        if let Some(max_id) = self.trades.iter().map(|t| t.id).max() {
            if id <= max_id {
                id = max_id + 1;
            }
        }

        let record = TradeRecord::from_form(form, id, now)?;
        self.trades.push(record.clone());
        self.persist()?;

        tracing::info!(
            id = record.id,
            option_type = %record.option_type,
            strike = %record.strike_price,
            premium = record.premium_price,
            lot_size = record.lot_size,
            "added paper trade"
        );
        Ok(record)
    }

    /// Move a pending trade to `Done` or `Close`.
    pub fn mark_status(&mut self, id: i64, status: TradeStatus) -> Result<TradeRecord> {
        if status == TradeStatus::Pending {
            return Err(Error::InvalidOperation(
                "Trades cannot be moved back to pending".to_string(),
            ));
        }

        let trade = self
            .trades
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or(Error::TradeNotFound(id))?;

        if trade.status.is_terminal() {
            return Err(Error::InvalidOperation(format!(
                "Trade {} is already {}",
                id, trade.status
            )));
        }

        trade.status = status;
        let updated = trade.clone();
        self.persist()?;

        tracing::info!(id, status = %status, "updated paper trade status");
        Ok(updated)
    }

    /// Mark a trade as having hit its target.
    pub fn mark_done(&mut self, id: i64) -> Result<TradeRecord> {
        self.mark_status(id, TradeStatus::Done)
    }

    /// Mark a trade as stopped out.
    pub fn mark_closed(&mut self, id: i64) -> Result<TradeRecord> {
        self.mark_status(id, TradeStatus::Close)
    }

    /// Permanently remove a trade.
    pub fn delete(&mut self, id: i64) -> Result<TradeRecord> {
        let idx = self
            .trades
            .iter()
            .position(|t| t.id == id)
            .ok_or(Error::TradeNotFound(id))?;

        let removed = self.trades.remove(idx);
        self.persist()?;

        tracing::info!(id, "deleted paper trade");
        Ok(removed)
    }

    /// Aggregate totals over the current trades.
    pub fn totals(&self) -> JournalTotals {
        JournalTotals::from_trades(&self.trades)
    }

    fn persist(&mut self) -> Result<()> {
        self.store.save(&self.trades)
    }
}
