use crate::builder::RawSeries;
use anyhow::{Context, Result, anyhow};
use csv::{ReaderBuilder, Trim};
use serde::Deserialize;

use super::reading_from_components;

#[derive(Debug, Deserialize)]
struct CsvReading {
    day: u32,
    v1: Option<f64>,
    v2: Option<f64>,
}

/// Parses `day,v1,v2` rows; an empty cell stands for an absent component.
///
/// # Errors
///
/// Fails on an unparsable row, day 0, a duplicate day, or a non-finite value.
pub fn parse_csv_series(bytes: &[u8]) -> Result<RawSeries> {
    let mut reader = ReaderBuilder::new().trim(Trim::All).from_reader(bytes);

    let mut series = RawSeries::default();
    for (idx, record) in reader.deserialize::<CsvReading>().enumerate() {
        let CsvReading { day, v1, v2 } =
            record.with_context(|| format!("failed to parse CSV row {}", idx + 1))?;
        if day == 0 {
            return Err(anyhow!("CSV row {} has day 0; days start at 1", idx + 1));
        }
        let reading = reading_from_components(day, v1, v2)?;
        if series.insert(day, reading).is_some() {
            return Err(anyhow!("day {day} appears more than once"));
        }
    }
    Ok(series)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::Reading;

    #[test]
    fn parses_rows_with_empty_cells() {
        let series = parse_csv_series(b"day,v1,v2\n2, 110, 95\n1,100,90\n3,,\n").unwrap();

        assert_eq!(series.len(), 3);
        assert_eq!(series[&1], Reading::Present { v1: 100.0, v2: 90.0 });
        assert_eq!(series[&2], Reading::Present { v1: 110.0, v2: 95.0 });
        assert_eq!(series[&3], Reading::Missing);
    }

    #[test]
    fn half_filled_row_is_missing() {
        let series = parse_csv_series(b"day,v1,v2\n5,12.5,\n").unwrap();
        assert_eq!(series[&5], Reading::Missing);
    }

    #[test]
    fn rejects_duplicate_days() {
        let err = parse_csv_series(b"day,v1,v2\n1,1,1\n1,2,2\n").unwrap_err();
        assert!(err.to_string().contains("more than once"));
    }

    #[test]
    fn rejects_bad_day_cell() {
        assert!(parse_csv_series(b"day,v1,v2\nmonday,1,1\n").is_err());
        assert!(parse_csv_series(b"day,v1,v2\n0,1,1\n").is_err());
    }
}
