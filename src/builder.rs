use crate::formatting::{exceeds_threshold, format_percent};
use rustc_hash::FxHashMap;

/// Readings for one day: both volumes, or nothing at all.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Reading {
    Present { v1: f64, v2: f64 },
    Missing,
}

impl Reading {
    const fn pair(self) -> Option<(f64, f64)> {
        match self {
            Self::Present { v1, v2 } => Some((v1, v2)),
            Self::Missing => None,
        }
    }
}

/// Raw input keyed by day number. Iteration order carries no meaning.
pub type RawSeries = FxHashMap<u32, Reading>;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Volume {
    Measured(f64),
    Missing,
}

impl Volume {
    #[must_use]
    pub const fn value(self) -> Option<f64> {
        match self {
            Self::Measured(value) => Some(value),
            Self::Missing => None,
        }
    }

    #[must_use]
    pub const fn is_missing(self) -> bool {
        matches!(self, Self::Missing)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReportRow {
    pub day: u32,
    pub v1: Volume,
    pub v2: Volume,
    pub percent: Option<f64>,
    pub percent_formatted: String,
    pub highlight: bool,
}

impl ReportRow {
    const fn missing(day: u32) -> Self {
        Self {
            day,
            v1: Volume::Missing,
            v2: Volume::Missing,
            percent: None,
            percent_formatted: String::new(),
            highlight: false,
        }
    }

    fn measured(day: u32, v1: f64, v2: f64, percent: Option<f64>) -> Self {
        Self {
            day,
            v1: Volume::Measured(v1),
            v2: Volume::Measured(v2),
            percent,
            percent_formatted: percent.map_or_else(String::new, format_percent),
            highlight: percent.is_some_and(exceeds_threshold),
        }
    }
}

/// Turns a [`RawSeries`] into report rows ordered newest day first.
///
/// Holds no state; every call to [`ReportBuilder::build`] is independent.
#[derive(Debug, Default, Clone, Copy)]
pub struct ReportBuilder;

impl ReportBuilder {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    #[must_use]
    pub fn build(&self, raw: &RawSeries) -> Vec<ReportRow> {
        let days = sorted_days(raw);
        let mut rows = Vec::with_capacity(days.len());

        for (position, &day) in days.iter().enumerate() {
            let Some((v1, v2)) = raw[&day].pair() else {
                rows.push(ReportRow::missing(day));
                continue;
            };

            // Predecessor is the previous key in sorted order, so gaps between
            // day numbers are skipped over rather than treated as missing.
            let previous = position
                .checked_sub(1)
                .and_then(|idx| raw[&days[idx]].pair());
            // A subnormal or overflowing delta can push the ratio out of range;
            // such a day gets no percent rather than an infinite one.
            let percent = previous
                .map(|(prev_v1, prev_v2)| deviation(v1 - prev_v1, v2 - prev_v2))
                .filter(|percent| percent.is_finite());

            rows.push(ReportRow::measured(day, v1, v2, percent));
        }

        into_descending(rows)
    }
}

fn sorted_days(raw: &RawSeries) -> Vec<u32> {
    let mut days: Vec<u32> = raw.keys().copied().collect();
    days.sort_unstable();
    days
}

fn into_descending(mut rows: Vec<ReportRow>) -> Vec<ReportRow> {
    rows.sort_unstable_by(|a, b| b.day.cmp(&a.day));
    rows
}

/// `((ΔV1 - ΔV2) / ΔV1) * 100`, with a flat `ΔV1` reported as zero deviation.
#[must_use]
pub const fn deviation(delta_v1: f64, delta_v2: f64) -> f64 {
    if delta_v1 == 0.0 {
        return 0.0;
    }
    ((delta_v1 - delta_v2) / delta_v1) * 100.0
}
