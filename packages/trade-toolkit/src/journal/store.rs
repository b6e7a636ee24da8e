//! Persistence backends for the trade journal.

use super::record::TradeRecord;
use crate::Result;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Storage key the journal is persisted under.
pub const STORAGE_KEY: &str = "paperTrades";

/// A place the journal reads its trades from once and rewrites after every mutation.
pub trait TradeStore {
    /// Load the persisted sequence. Missing storage yields an empty list.
    fn load(&self) -> Result<Vec<TradeRecord>>;

    /// Replace the persisted sequence.
    fn save(&mut self, trades: &[TradeRecord]) -> Result<()>;
}

/// JSON file store.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Create a store at the default path.
    ///
    /// Default path: `~/.trade-toolkit/paperTrades.json`
    /// Can be overridden with `TRADE_TOOLKIT_JOURNAL_FILE` environment variable.
    pub fn new() -> Self {
        Self::with_path(Self::default_path())
    }

    /// Create a store backed by a specific file.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Get the default journal file path.
    pub fn default_path() -> PathBuf {
        if let Ok(path) = env::var("TRADE_TOOLKIT_JOURNAL_FILE") {
            if !path.is_empty() {
                return PathBuf::from(path);
            }
        }

        let file_name = format!("{}.json", STORAGE_KEY);
        directories::BaseDirs::new()
            .map(|dirs| dirs.home_dir().join(".trade-toolkit").join(&file_name))
            .unwrap_or_else(|| PathBuf::from(file_name))
    }

    /// Get the current path.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for JsonFileStore {
    fn default() -> Self {
        Self::new()
    }
}

impl TradeStore for JsonFileStore {
    fn load(&self) -> Result<Vec<TradeRecord>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let content = fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(Vec::new());
        }

        // A stored `null` is treated like absent storage
        let trades: Option<Vec<TradeRecord>> = serde_json::from_str(&content)?;
        Ok(trades.unwrap_or_default())
    }

    fn save(&mut self, trades: &[TradeRecord]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(trades)?;
        fs::write(&self.path, content)?;
        tracing::debug!(path = %self.path.display(), count = trades.len(), "saved trade journal");
        Ok(())
    }
}

/// In-memory store (no persistence across processes).
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    trades: Vec<TradeRecord>,
    saves: usize,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with trades.
    pub fn with_trades(trades: Vec<TradeRecord>) -> Self {
        Self { trades, saves: 0 }
    }

    /// The last saved sequence.
    pub fn trades(&self) -> &[TradeRecord] {
        &self.trades
    }

    /// Number of times `save` has been called.
    pub fn save_count(&self) -> usize {
        self.saves
    }
}

impl TradeStore for MemoryStore {
    fn load(&self) -> Result<Vec<TradeRecord>> {
        Ok(self.trades.clone())
    }

    fn save(&mut self, trades: &[TradeRecord]) -> Result<()> {
        self.trades = trades.to_vec();
        self.saves += 1;
        Ok(())
    }
}
