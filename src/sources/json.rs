use crate::builder::{RawSeries, Reading};
use anyhow::{Context, Result, anyhow};
use log::warn;
use serde::Deserialize;
use serde::de::{Deserializer, MapAccess, Visitor};
use serde_json::{Map, Value};
use std::fmt;

use super::{parse_day, reading_from_components};

/// Every `(key, value)` pair of the top-level object in document order.
///
/// Collected through a map visitor so repeated keys stay visible instead of
/// the last one overwriting the others.
struct DayEntries(Vec<(String, Value)>);

impl<'de> Deserialize<'de> for DayEntries {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(DayEntriesVisitor)
    }
}

struct DayEntriesVisitor;

impl<'de> Visitor<'de> for DayEntriesVisitor {
    type Value = DayEntries;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("an object keyed by day")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
        let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
        while let Some(entry) = map.next_entry::<String, Value>()? {
            entries.push(entry);
        }
        Ok(DayEntries(entries))
    }
}

/// Parses an object keyed by day, each value either `{"V1": .., "V2": ..}` or `null`.
///
/// Any other value for a day (array, string, number, bool) is not a pair and
/// the day is reported as missing.
///
/// # Errors
///
/// Fails when the document is not a JSON object, a key is not a positive
/// integer, a day appears twice, or a `V1`/`V2` component is neither a
/// number nor `null`.
pub fn parse_json_series(bytes: &[u8]) -> Result<RawSeries> {
    let DayEntries(entries) =
        serde_json::from_slice(bytes).context("readings must be a JSON object keyed by day")?;

    let mut series = RawSeries::default();
    for (key, value) in entries {
        let day = parse_day(&key)?;
        let reading = match value {
            Value::Object(fields) => reading_from_object(day, &fields)?,
            Value::Null => Reading::Missing,
            other => {
                warn!("Day {day} holds {other} instead of a V1/V2 object; treating the day as missing");
                Reading::Missing
            }
        };
        if series.insert(day, reading).is_some() {
            return Err(anyhow!("day {day} appears more than once"));
        }
    }
    Ok(series)
}

fn reading_from_object(day: u32, fields: &Map<String, Value>) -> Result<Reading> {
    let v1 = component(day, fields, "V1")?;
    let v2 = component(day, fields, "V2")?;
    reading_from_components(day, v1, v2)
}

fn component(day: u32, fields: &Map<String, Value>, name: &str) -> Result<Option<f64>> {
    match fields.get(name) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(number)) => number
            .as_f64()
            .map(Some)
            .ok_or_else(|| anyhow!("day {day} has an unrepresentable {name} value {number}")),
        Some(other) => Err(anyhow!("day {day} has a non-numeric {name} value {other}")),
    }
}
