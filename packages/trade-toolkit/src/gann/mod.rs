//! Gann square-root level calculator.
//!
//! Offsets the square root of an index price by a preset list of steps and
//! squares the result to get support and resistance levels.

mod export;
mod levels;
mod presets;

pub use export::{export_filename, to_csv, write_csv, write_csv_to, CSV_HEADERS};
pub use levels::{
    calculate_levels, levels_for_price, parse_price, GannLevel, GannResult, BASE_STEP_TOLERANCE,
};
pub use presets::{
    get_preset, list_presets, require_preset, RoundingMode, StepPreset, BUILTIN_PRESETS,
    DEFAULT_PRESET_ID,
};
