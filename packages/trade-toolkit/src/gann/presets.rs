//! Step presets and rounding modes for Gann levels.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A named set of additive offsets applied to the square root of the price.
#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
pub struct StepPreset {
    /// Preset identifier
    pub id: &'static str,
    /// Human-readable name
    pub name: &'static str,
    /// Offsets added to the square root, in display order
    pub steps: &'static [f64],
}

pub const DEFAULT_PRESET_ID: &str = "intraday-standard";

/// Built-in step presets.
pub static BUILTIN_PRESETS: &[StepPreset] = &[
    StepPreset {
        id: "intraday-tight",
        name: "Intraday (tight)",
        steps: &[-0.5, -0.25, 0.0, 0.25, 0.5],
    },
    StepPreset {
        id: "intraday-standard",
        name: "Intraday (standard)",
        steps: &[-2.0, -1.0, -0.5, -0.25, 0.0, 0.25, 0.5, 1.0, 2.0],
    },
    StepPreset {
        id: "scalping",
        name: "Very tight (scalping)",
        steps: &[-0.5, -0.25, -0.125, 0.0, 0.125, 0.25, 0.5],
    },
];

impl Default for StepPreset {
    fn default() -> Self {
        BUILTIN_PRESETS
            .iter()
            .find(|p| p.id == DEFAULT_PRESET_ID)
            .copied()
            .unwrap_or(BUILTIN_PRESETS[1])
    }
}

/// Get all built-in presets.
pub fn list_presets() -> &'static [StepPreset] {
    BUILTIN_PRESETS
}

/// Find a preset by id or display name (case-insensitive).
pub fn get_preset(key: &str) -> Option<StepPreset> {
    let key = key.trim();
    BUILTIN_PRESETS
        .iter()
        .find(|p| p.id.eq_ignore_ascii_case(key) || p.name.eq_ignore_ascii_case(key))
        .copied()
}

/// Find a preset or fail with the list of valid ids.
pub fn require_preset(key: &str) -> Result<StepPreset> {
    get_preset(key).ok_or_else(|| {
        let available: Vec<_> = BUILTIN_PRESETS.iter().map(|p| p.id).collect();
        Error::UnknownPreset(format!("{}. Available: {}", key, available.join(", ")))
    })
}

/// How a precise level is snapped to a whole price.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RoundingMode {
    #[default]
    Round,
    Floor,
    Ceil,
}

impl RoundingMode {
    /// Apply the rounding mode.
    pub fn apply(&self, value: f64) -> f64 {
        match self {
            RoundingMode::Round => value.round(),
            RoundingMode::Floor => value.floor(),
            RoundingMode::Ceil => value.ceil(),
        }
    }
}

impl fmt::Display for RoundingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            RoundingMode::Round => "round",
            RoundingMode::Floor => "floor",
            RoundingMode::Ceil => "ceil",
        };
        f.write_str(s)
    }
}

impl FromStr for RoundingMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "round" => Ok(RoundingMode::Round),
            "floor" => Ok(RoundingMode::Floor),
            "ceil" => Ok(RoundingMode::Ceil),
            other => Err(Error::Validation(format!(
                "Unknown rounding mode: {}. Expected round, floor or ceil",
                other
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_preset() {
        let preset = StepPreset::default();
        assert_eq!(preset.name, "Intraday (standard)");
        assert_eq!(preset.steps.len(), 9);
    }

    #[test]
    fn test_lookup_by_id_or_name() {
        assert_eq!(get_preset("scalping").unwrap().steps.len(), 7);
        assert_eq!(get_preset("intraday (TIGHT)").unwrap().id, "intraday-tight");
        assert!(get_preset("swing").is_none());
    }

    #[test]
    fn test_require_unknown_preset() {
        let err = require_preset("swing").unwrap_err();
        assert!(matches!(err, Error::UnknownPreset(_)));
        assert!(err.to_string().contains("intraday-standard"));
    }

    #[test]
    fn test_every_preset_has_base_step() {
        for preset in list_presets() {
            assert!(preset.steps.iter().any(|s| s.abs() < 1e-9), "{}", preset.id);
        }
    }

    #[test]
    fn test_rounding_modes() {
        assert_eq!(RoundingMode::Round.apply(85412.5), 85413.0);
        assert_eq!(RoundingMode::Floor.apply(85412.9), 85412.0);
        assert_eq!(RoundingMode::Ceil.apply(85412.1), 85413.0);
    }

    #[test]
    fn test_parse_rounding_mode() {
        assert_eq!("Floor".parse::<RoundingMode>().unwrap(), RoundingMode::Floor);
        assert_eq!(" ceil ".parse::<RoundingMode>().unwrap(), RoundingMode::Ceil);
        assert!("truncate".parse::<RoundingMode>().is_err());
    }
}
