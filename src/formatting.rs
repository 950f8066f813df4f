use crate::builder::Volume;

/// Deviations strictly above this value are highlighted.
pub const HIGHLIGHT_THRESHOLD: f64 = 7.4;

pub const MISSING_LABEL: &str = "Данные отсутствуют";

#[must_use]
pub const fn exceeds_threshold(percent: f64) -> bool {
    percent > HIGHLIGHT_THRESHOLD
}

/// Two decimals with a trailing `%`.
///
/// Rounds half away from zero on the value scaled by 100, so `7.405`
/// becomes `7.41%`. A result that rounds to zero is printed unsigned.
#[must_use]
pub fn format_percent(percent: f64) -> String {
    format!("{}%", round_to_cents(percent))
}

/// Two decimals with `,` grouping thousands, or the missing label.
#[must_use]
pub fn format_volume(volume: Volume) -> String {
    volume.value().map_or_else(
        || MISSING_LABEL.to_string(),
        |value| group_thousands(&round_to_cents(value)),
    )
}

/// Beyond this magnitude an `f64` carries no fractional cents, and scaling
/// by 100 could overflow to infinity.
const CENTS_PRECISION_LIMIT: f64 = 1e15;

fn round_to_cents(value: f64) -> String {
    if value.abs() >= CENTS_PRECISION_LIMIT {
        return format!("{value:.2}");
    }
    let rounded = (value * 100.0).round() / 100.0 + 0.0;
    format!("{rounded:.2}")
}

fn group_thousands(formatted: &str) -> String {
    let (sign, unsigned) = formatted
        .strip_prefix('-')
        .map_or(("", formatted), |rest| ("-", rest));
    let (integer, fraction) = unsigned.split_once('.').unwrap_or((unsigned, ""));

    let mut grouped = String::with_capacity(formatted.len() + integer.len() / 3);
    grouped.push_str(sign);
    for (idx, digit) in integer.chars().enumerate() {
        if idx > 0 && (integer.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    if !fraction.is_empty() {
        grouped.push('.');
        grouped.push_str(fraction);
    }
    grouped
}
