//! CSV export of Gann levels.

use super::levels::GannResult;
use crate::Result;
use chrono::{DateTime, Utc};
use std::fs;
use std::path::{Path, PathBuf};

pub const CSV_HEADERS: [&str; 5] = [
    "Step",
    "Root",
    "Level (precise)",
    "Level (rounded)",
    "Diff from price",
];

/// Render levels as CSV: one header row plus one row per level.
pub fn to_csv(result: &GannResult) -> Result<String> {
    let mut writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    writer.write_record(CSV_HEADERS)?;
    for level in &result.levels {
        writer.write_record([
            level.step.to_string(),
            level.root.to_string(),
            level.level_raw.to_string(),
            level.level_rounded.to_string(),
            level.diff_from_price.to_string(),
        ])?;
    }

    let bytes = writer.into_inner().map_err(|e| e.into_error())?;
    Ok(String::from_utf8_lossy(&bytes).trim_end().to_string())
}

/// Timestamped download name, e.g. `gann-levels-2025-03-14-09-15-00.csv`.
pub fn export_filename(now: DateTime<Utc>) -> String {
    format!("gann-levels-{}.csv", now.format("%Y-%m-%d-%H-%M-%S"))
}

/// Write the CSV to an explicit path.
pub fn write_csv_to(result: &GannResult, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, to_csv(result)?)?;
    tracing::info!(path = %path.display(), rows = result.levels.len(), "exported gann levels");
    Ok(())
}

/// Write the CSV into `dir` under a timestamped name, returning the path.
pub fn write_csv(result: &GannResult, dir: &Path, now: DateTime<Utc>) -> Result<PathBuf> {
    let path = dir.join(export_filename(now));
    write_csv_to(result, &path)?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gann::levels::calculate_levels;
    use crate::gann::presets::{get_preset, RoundingMode};
    use chrono::TimeZone;
    use tempfile::tempdir;

    fn sample() -> GannResult {
        let preset = get_preset("intraday-tight").unwrap();
        calculate_levels("10,000", &preset, RoundingMode::Round).unwrap()
    }

    #[test]
    fn test_csv_layout() {
        let csv = to_csv(&sample()).unwrap();
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(lines.len(), 6);
        assert_eq!(lines[0], "Step,Root,Level (precise),Level (rounded),Diff from price");
        assert_eq!(lines[1], "-0.5,99.5,9900.25,9900,-99.75");
        assert_eq!(lines[3], "0,100,10000,10000,0");
        assert_eq!(lines[5], "0.5,100.5,10100.25,10100,100.25");
    }

    #[test]
    fn test_export_filename() {
        let now = Utc.with_ymd_and_hms(2025, 3, 14, 9, 15, 7).unwrap();
        assert_eq!(export_filename(now), "gann-levels-2025-03-14-09-15-07.csv");
    }

    #[test]
    fn test_write_csv() {
        let dir = tempdir().unwrap();
        let now = Utc.with_ymd_and_hms(2025, 1, 2, 3, 4, 5).unwrap();

        let path = write_csv(&sample(), dir.path(), now).unwrap();

        assert_eq!(path.file_name().unwrap(), "gann-levels-2025-01-02-03-04-05.csv");
        let content = fs::read_to_string(path).unwrap();
        assert!(content.starts_with("Step,Root"));
    }
}
