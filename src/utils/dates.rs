use crate::error::Result;
use crate::utils::constants::{DATE_FORMATS, MISSING_MARKERS};
use chrono::NaiveDate;

/// Normalize a date cell to a calendar date, dropping any time of day.
///
/// # Examples
/// ```
/// use climate_dashboard::utils::normalize_date;
///
/// let date = normalize_date("2014-06-30 00:00:00").unwrap();
/// assert_eq!(date.to_string(), "2014-06-30");
/// ```
pub fn normalize_date(raw: &str) -> Option<NaiveDate> {
    let date_part = raw
        .trim()
        .split(|c: char| c == ' ' || c == 'T')
        .next()
        .unwrap_or_default();

    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(date_part, format).ok())
}

/// Parse a date given on the command line (`YYYY-MM-DD`).
pub fn parse_date_arg(raw: &str) -> Result<NaiveDate> {
    Ok(NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")?)
}

/// Parse a numeric cell. Missing markers and NaN become `None`.
pub fn parse_measurement(raw: &str) -> std::result::Result<Option<f64>, String> {
    let value = raw.trim();
    if is_missing_marker(value) {
        return Ok(None);
    }

    let parsed = value
        .parse::<f64>()
        .map_err(|_| format!("Invalid measurement: '{}'", value))?;

    Ok(if parsed.is_nan() { None } else { Some(parsed) })
}

pub fn is_missing_marker(value: &str) -> bool {
    value.is_empty() || MISSING_MARKERS.contains(&value)
}
