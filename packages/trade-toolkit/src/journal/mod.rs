//! Paper trade journal.
//!
//! Records hypothetical option trades, tracks whether each hit its target or
//! its stop loss, and aggregates totals. Persistence is injected through the
//! [`TradeStore`] trait.

mod record;
mod state;
mod store;
mod totals;

pub use record::{
    NewTrade, TradeRecord, TradeStatus, DEFAULT_LOT_SIZE, STOP_LOSS_FRACTION, TARGET_MULTIPLIER,
};
pub use state::TradeJournal;
pub use store::{JsonFileStore, MemoryStore, TradeStore, STORAGE_KEY};
pub use totals::JournalTotals;
