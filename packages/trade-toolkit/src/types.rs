//! Shared types for the toolkit front ends.

use serde::{Deserialize, Serialize};

/// Round a value to `places` decimal places, half away from zero.
///
/// Non-finite inputs (NaN, infinities) are reported as `0.0` so that degenerate
/// inputs never leak a not-a-number value into results. Values too large to
/// scale have no fractional digits left and are returned unchanged.
///
/// # Example
///
/// ```rust
/// use trade_toolkit::round_to;
///
/// assert_eq!(round_to(2.345678, 2), 2.35);
/// assert_eq!(round_to(-0.125, 2), -0.13);
/// assert_eq!(round_to(f64::NAN, 2), 0.0);
/// ```
pub fn round_to(value: f64, places: u32) -> f64 {
    if !value.is_finite() {
        return 0.0;
    }
    let factor = 10f64.powi(places as i32);
    let scaled = value * factor;
    if !scaled.is_finite() {
        return value;
    }
    let rounded = scaled.round() / factor;
    // Avoid serializing "-0.0"
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}

/// API response wrapper used by the command line front end.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    /// Create a successful response.
    pub fn ok(data: T) -> Self {
        Self {
            ok: true,
            data: Some(data),
            error: None,
        }
    }

    /// Create an error response.
    pub fn err(error: impl Into<String>) -> Self {
        Self {
            ok: false,
            data: None,
            error: Some(error.into()),
        }
    }
}
