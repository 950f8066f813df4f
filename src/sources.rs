pub mod json;
pub mod table;

pub use json::parse_json_series;
pub use table::parse_csv_series;

use crate::builder::{RawSeries, Reading};
use anyhow::{Context, Result, anyhow};
use log::{debug, warn};
use std::path::Path;
use tokio::fs;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeriesFormat {
    Json,
    Csv,
}

impl SeriesFormat {
    /// # Errors
    ///
    /// Fails for any extension other than `.json` or `.csv`.
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);
        match extension.as_deref() {
            Some("json") => Ok(Self::Json),
            Some("csv") => Ok(Self::Csv),
            _ => Err(anyhow!(
                "unsupported input format for {}; expected a .json or .csv file",
                path.display()
            )),
        }
    }
}

/// Reads and parses a readings file, picking the parser from its extension.
///
/// # Errors
///
/// Fails when the extension is unsupported, the file cannot be read, or its
/// contents are malformed.
pub async fn load_series(path: &Path) -> Result<RawSeries> {
    let format = SeriesFormat::from_path(path)?;
    let bytes = fs::read(path)
        .await
        .with_context(|| format!("failed to read {}", path.display()))?;

    let series = match format {
        SeriesFormat::Json => parse_json_series(&bytes),
        SeriesFormat::Csv => parse_csv_series(&bytes),
    }
    .with_context(|| format!("failed to parse readings from {}", path.display()))?;

    debug!("Loaded {} day(s) from {}", series.len(), path.display());
    Ok(series)
}

/// Collapses the two optional components of a day into a [`Reading`].
///
/// A day with either component absent is treated as missing as a whole.
///
/// # Errors
///
/// Fails when a present component is NaN or infinite.
pub fn reading_from_components(day: u32, v1: Option<f64>, v2: Option<f64>) -> Result<Reading> {
    for value in [v1, v2].into_iter().flatten() {
        if !value.is_finite() {
            return Err(anyhow!("day {day} has a non-finite reading ({value})"));
        }
    }

    match (v1, v2) {
        (Some(v1), Some(v2)) => Ok(Reading::Present { v1, v2 }),
        (None, None) => Ok(Reading::Missing),
        _ => {
            warn!("Day {day} has only one of V1/V2; treating the day as missing");
            Ok(Reading::Missing)
        }
    }
}

/// # Errors
///
/// Fails unless `key` is a positive integer.
pub fn parse_day(key: &str) -> Result<u32> {
    let day = key
        .trim()
        .parse::<u32>()
        .with_context(|| format!("day key {key:?} is not a positive integer"))?;
    if day == 0 {
        return Err(anyhow!("day key {key:?} is not a positive integer"));
    }
    Ok(day)
}
