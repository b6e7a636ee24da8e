//! Trade Toolkit - Options trading decision support library.
//!
//! This crate provides three independent tools:
//!
//! - **Profit/loss calculator**: Stop-loss, target and per-lot P&L from a premium
//! - **Paper trade journal**: Hypothetical trades persisted to JSON with status tracking
//! - **Gann levels**: Square-root support/resistance levels with CSV export
//!
//! # Example
//!
//! ```rust
//! use trade_toolkit::calculator::{calculate, CalculatorInputs};
//! use trade_toolkit::journal::{MemoryStore, NewTrade, TradeJournal};
//!
//! let result = calculate(&CalculatorInputs::default());
//! assert_eq!(result.total_loss, 40.0);
//!
//! let mut journal = TradeJournal::open(MemoryStore::new()).unwrap();
//! let trade = journal.add_trade(&NewTrade::new("CE", "24500", "100")).unwrap();
//! assert_eq!(trade.profit_whole, 200.0);
//! ```

pub mod calculator;
pub mod config;
pub mod gann;
pub mod journal;
pub mod types;

// Re-export commonly used types
pub use types::{round_to, ApiResponse};

// Re-export main functionality
pub use calculator::{calculate, CalculatorInputs, ProfitLossResult};
pub use config::Config;
pub use gann::{calculate_levels, parse_price, GannLevel, GannResult, RoundingMode, StepPreset};
pub use journal::{
    JournalTotals, JsonFileStore, MemoryStore, NewTrade, TradeJournal, TradeRecord, TradeStatus,
    TradeStore,
};

/// Error types for trade-toolkit operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Config error: {0}")]
    Config(#[from] toml::de::Error),

    #[error("{0}")]
    Validation(String),

    #[error("Trade not found: {0}")]
    TradeNotFound(i64),

    #[error("Invalid operation: {0}")]
    InvalidOperation(String),

    #[error("Unknown preset: {0}")]
    UnknownPreset(String),
}

/// Result type for trade-toolkit operations.
pub type Result<T> = std::result::Result<T, Error>;
