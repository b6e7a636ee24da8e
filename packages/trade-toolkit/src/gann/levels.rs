//! Gann square-root level calculation.

use super::presets::{RoundingMode, StepPreset};
use crate::types::round_to;
use crate::{Error, Result};
use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;

/// Steps closer to zero than this mark the base row.
pub const BASE_STEP_TOLERANCE: f64 = 1e-9;

static NUMBER_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"-?\d+(\.\d+)?").expect("valid number pattern"));

/// A single Gann level row.
#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
pub struct GannLevel {
    /// Offset added to the square root
    pub step: f64,
    /// Square root plus step (6 dp)
    pub root: f64,
    /// Root squared (6 dp)
    pub level_raw: f64,
    /// Level snapped by the rounding mode
    pub level_rounded: f64,
    /// Level minus the input price (4 dp)
    pub diff_from_price: f64,
    /// Whether this is the zero-step anchor row
    pub is_base: bool,
}

/// Result of a Gann level calculation.
#[derive(Debug, Clone, Serialize)]
pub struct GannResult {
    /// Price text as entered
    pub original_input: String,
    /// Parsed price
    pub normalized_price: f64,
    /// Square root of the price (8 dp)
    pub sqrt_val: f64,
    /// Preset the steps came from
    pub preset: String,
    pub rounding: RoundingMode,
    /// Levels sorted ascending by precise level
    pub levels: Vec<GannLevel>,
}

impl GannResult {
    /// The zero-step row, if the preset has one.
    pub fn base_level(&self) -> Option<&GannLevel> {
        self.levels.iter().find(|l| l.is_base)
    }
}

/// Parse a free-text index price.
///
/// Thousands separators are stripped and the first signed decimal number is
/// taken. The price must be finite and strictly positive.
///
/// # Example
///
/// ```rust
/// use trade_toolkit::gann::parse_price;
///
/// assert_eq!(parse_price("85,698.25").unwrap(), 85698.25);
/// assert!(parse_price("-5").is_err());
/// assert!(parse_price("").is_err());
/// ```
pub fn parse_price(input: &str) -> Result<f64> {
    if input.trim().is_empty() {
        return Err(Error::Validation(
            "Please enter a valid index price (e.g. 85698 or 85698.25).".to_string(),
        ));
    }

    let cleaned = input.replace(',', "");
    let matched = NUMBER_PATTERN.find(&cleaned).ok_or_else(|| {
        Error::Validation(
            "Input must be a number (digits, optional single decimal point).".to_string(),
        )
    })?;

    match matched.as_str().parse::<f64>() {
        Ok(price) if price.is_finite() && price > 0.0 => Ok(price),
        _ => Err(Error::Validation(
            "Please enter a positive numeric index price.".to_string(),
        )),
    }
}

/// Compute levels for a price already accepted by [`parse_price`].
///
/// A price that is not finite and strictly positive has no square root to
/// offset, so no levels are produced.
pub fn levels_for_price(price: f64, steps: &[f64], rounding: RoundingMode) -> Vec<GannLevel> {
    if !price.is_finite() || price <= 0.0 {
        tracing::warn!(price, "skipping gann levels for invalid price");
        return Vec::new();
    }

    let sqrt_val = price.sqrt();

    let mut levels: Vec<GannLevel> = steps
        .iter()
        .map(|&step| {
            let root = sqrt_val + step;
            let level_raw = root * root;

            GannLevel {
                step,
                root: round_to(root, 6),
                level_raw: round_to(level_raw, 6),
                level_rounded: rounding.apply(level_raw),
                diff_from_price: round_to(level_raw - price, 4),
                is_base: step.abs() < BASE_STEP_TOLERANCE,
            }
        })
        .collect();

    levels.sort_by(|a, b| a.level_raw.total_cmp(&b.level_raw));
    levels
}

/// Parse the price text and compute levels for a preset.
pub fn calculate_levels(
    input: &str,
    preset: &StepPreset,
    rounding: RoundingMode,
) -> Result<GannResult> {
    let price = parse_price(input)?;
    let levels = levels_for_price(price, preset.steps, rounding);

    tracing::debug!(
        price,
        preset = preset.id,
        rounding = %rounding,
        count = levels.len(),
        "calculated gann levels"
    );

    Ok(GannResult {
        original_input: input.to_string(),
        normalized_price: price,
        sqrt_val: round_to(price.sqrt(), 8),
        preset: preset.name.to_string(),
        rounding,
        levels,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gann::presets::{get_preset, list_presets};
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_parse_thousands_separator() {
        assert_eq!(parse_price("85,698.25").unwrap(), 85698.25);
        assert_eq!(parse_price("85698").unwrap(), 85698.0);
        assert_eq!(parse_price("  24,350.5 pts").unwrap(), 24350.5);
    }

    #[test]
    fn test_parse_rejects_invalid() {
        let empty = parse_price("").unwrap_err();
        assert!(empty.to_string().starts_with("Please enter a valid index price"));

        let blank = parse_price("   ").unwrap_err();
        assert!(matches!(blank, Error::Validation(_)));

        let text = parse_price("nifty").unwrap_err();
        assert!(text.to_string().starts_with("Input must be a number"));

        let negative = parse_price("-5").unwrap_err();
        assert_eq!(
            negative.to_string(),
            "Please enter a positive numeric index price."
        );

        assert!(parse_price("0").is_err());
        assert!(parse_price("0.0").is_err());
    }

    #[test]
    fn test_base_row_equals_price() {
        for price in [1.0, 2.0, 97.3, 24_350.5, 85_698.25, 1_234_567.891] {
            let levels = levels_for_price(price, StepPreset::default().steps, RoundingMode::Round);
            let base = levels.iter().find(|l| l.is_base).unwrap();

            assert_abs_diff_eq!(base.level_raw, price, epsilon = 1e-6);
            assert_abs_diff_eq!(base.diff_from_price, 0.0, epsilon = 1e-4);
        }
    }

    #[test]
    fn test_levels_sorted_ascending() {
        for preset in list_presets() {
            for price in [0.01, 0.2, 3.0, 85_698.25] {
                let levels = levels_for_price(price, preset.steps, RoundingMode::Floor);
                assert_eq!(levels.len(), preset.steps.len());
                assert!(levels.windows(2).all(|w| w[0].level_raw <= w[1].level_raw));
            }
        }
    }

    #[test]
    fn test_invalid_price_yields_no_levels() {
        let steps = StepPreset::default().steps;

        assert!(levels_for_price(0.0, steps, RoundingMode::Round).is_empty());
        assert!(levels_for_price(-5.0, steps, RoundingMode::Round).is_empty());
        assert!(levels_for_price(f64::NAN, steps, RoundingMode::Round).is_empty());
        assert!(levels_for_price(f64::INFINITY, steps, RoundingMode::Round).is_empty());
    }

    #[test]
    fn test_standard_preset_values() {
        // sqrt(10000) = 100, so levels are (100 + step)^2
        let levels = levels_for_price(10_000.0, StepPreset::default().steps, RoundingMode::Round);

        assert_eq!(levels[0].step, -2.0);
        assert_eq!(levels[0].root, 98.0);
        assert_eq!(levels[0].level_raw, 9604.0);
        assert_eq!(levels[0].diff_from_price, -396.0);

        assert_eq!(levels[5].step, 0.25);
        assert_eq!(levels[5].level_raw, 10050.0625);
        assert_eq!(levels[5].level_rounded, 10050.0);

        assert_eq!(levels[8].level_raw, 10404.0);
        assert_eq!(levels.iter().filter(|l| l.is_base).count(), 1);
    }

    #[test]
    fn test_rounding_mode_applied_to_precise_level() {
        let preset = get_preset("intraday-tight").unwrap();
        let floor = levels_for_price(10_000.0, preset.steps, RoundingMode::Floor);
        let ceil = levels_for_price(10_000.0, preset.steps, RoundingMode::Ceil);

        // (100 + 0.25)^2 = 10050.0625
        assert_eq!(floor[3].level_rounded, 10050.0);
        assert_eq!(ceil[3].level_rounded, 10051.0);
    }

    #[test]
    fn test_calculate_levels() {
        let result =
            calculate_levels("85,698.25", &StepPreset::default(), RoundingMode::Round).unwrap();

        assert_eq!(result.original_input, "85,698.25");
        assert_eq!(result.normalized_price, 85698.25);
        assert_eq!(result.preset, "Intraday (standard)");
        assert_eq!(result.levels.len(), 9);
        assert_abs_diff_eq!(result.sqrt_val, 292.74263, epsilon = 1e-5);
        assert_abs_diff_eq!(result.base_level().unwrap().level_raw, 85698.25, epsilon = 1e-6);
    }

    #[test]
    fn test_calculate_levels_rejects_without_result() {
        let result = calculate_levels("-5", &StepPreset::default(), RoundingMode::Round);
        assert!(matches!(result, Err(Error::Validation(_))));
    }
}
