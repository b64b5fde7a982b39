use crate::utils::constants::NO_DATA;

/// Format a metric the way the dashboard cards show it: two decimals,
/// thousands separators, unit suffix.
///
/// # Examples
/// ```
/// use climate_dashboard::utils::format_metric;
///
/// assert_eq!(format_metric(Some(1234.5), " mm"), "1,234.50 mm");
/// assert_eq!(format_metric(None, " mm"), "no data");
/// ```
pub fn format_metric(value: Option<f64>, unit: &str) -> String {
    match value {
        Some(v) if v.is_finite() => format!("{}{}", group_thousands(v), unit),
        _ => NO_DATA.to_string(),
    }
}

/// Series value without a unit
pub fn format_value(value: Option<f64>) -> String {
    match value {
        Some(v) if v.is_finite() => group_thousands(v),
        _ => NO_DATA.to_string(),
    }
}

fn group_thousands(value: f64) -> String {
    let formatted = format!("{:.2}", value.abs());
    let (integer, fraction) = formatted.split_once('.').unwrap_or((formatted.as_str(), "00"));

    let mut grouped = String::with_capacity(integer.len() + integer.len() / 3);
    for (i, digit) in integer.chars().enumerate() {
        if i > 0 && (integer.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    // Rounding can turn a tiny negative into "0.00"
    let sign = if value < 0.0 && formatted != "0.00" { "-" } else { "" };
    format!("{}{}.{}", sign, grouped, fraction)
}
