//! Toolkit configuration loaded from TOML.

use crate::gann::{require_preset, RoundingMode, StepPreset, DEFAULT_PRESET_ID};
use crate::journal::JsonFileStore;
use crate::Result;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Top-level configuration.
///
/// Every field has a default, so a missing or partial file is fine.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Fallback tracing filter when `RUST_LOG` is unset
    pub log_level: String,
    pub journal: JournalConfig,
    pub gann: GannConfig,
}

/// Paper trade journal settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct JournalConfig {
    /// Journal file; defaults to `~/.trade-toolkit/paperTrades.json`
    pub path: Option<PathBuf>,
}

/// Gann calculator settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GannConfig {
    /// Preset id or name used when none is given
    pub preset: String,
    pub rounding: RoundingMode,
    /// Directory CSV exports are written to; defaults to the working directory
    pub export_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: "warn".to_string(),
            journal: JournalConfig::default(),
            gann: GannConfig::default(),
        }
    }
}

impl Default for GannConfig {
    fn default() -> Self {
        Self {
            preset: DEFAULT_PRESET_ID.to_string(),
            rounding: RoundingMode::default(),
            export_dir: None,
        }
    }
}

impl Config {
    /// Get the default config file path.
    ///
    /// Default path: `~/.trade-toolkit/config.toml`
    /// Can be overridden with `TRADE_TOOLKIT_CONFIG` environment variable.
    pub fn default_path() -> PathBuf {
        if let Ok(path) = env::var("TRADE_TOOLKIT_CONFIG") {
            return PathBuf::from(path);
        }

        directories::BaseDirs::new()
            .map(|dirs| dirs.home_dir().join(".trade-toolkit/config.toml"))
            .unwrap_or_else(|| PathBuf::from("config.toml"))
    }

    /// Load config from the default path.
    pub fn load() -> Result<Self> {
        Self::load_from_path(&Self::default_path())
    }

    /// Load config from a specific path. A missing file yields defaults.
    pub fn load_from_path(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Resolve the journal file.
    ///
    /// `TRADE_TOOLKIT_JOURNAL_FILE` wins over the config file.
    pub fn journal_path(&self) -> PathBuf {
        self.resolve_journal_path(env::var("TRADE_TOOLKIT_JOURNAL_FILE").ok())
    }

    /// Pick the journal file given an optional override.
    pub fn resolve_journal_path(&self, env_override: Option<String>) -> PathBuf {
        if let Some(path) = env_override.filter(|p| !p.is_empty()) {
            return PathBuf::from(path);
        }

        self.journal
            .path
            .clone()
            .unwrap_or_else(JsonFileStore::default_path)
    }

    /// Build the journal store.
    pub fn journal_store(&self) -> JsonFileStore {
        JsonFileStore::with_path(self.journal_path())
    }

    /// The configured default Gann preset.
    pub fn gann_preset(&self) -> Result<StepPreset> {
        require_preset(&self.gann.preset)
    }

    /// Directory for CSV exports.
    pub fn export_dir(&self) -> PathBuf {
        self.gann
            .export_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from("."))
    }
}
