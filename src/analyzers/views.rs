use crate::models::DashboardFilter;
use crate::utils::constants::{UNIT_HUMIDITY, UNIT_RAINFALL, UNIT_SUNSHINE, UNIT_TEMPERATURE};
use crate::utils::format::{format_metric, format_value};
use chrono::NaiveDate;
use serde::Serialize;
use std::fmt::{Display, Write};

/// One point of a chart series. `value` is `None` when every value in
/// the group was missing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesPoint<K> {
    pub key: K,
    pub value: Option<f64>,
}

impl<K> SeriesPoint<K> {
    pub fn new(key: K, value: Option<f64>) -> Self {
        Self { key, value }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedProvince {
    pub province: String,
    pub mean_tavg: f64,
}

/// Column means over the filtered subset, `None` meaning "no data".
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ScalarMetrics {
    pub avg_temperature: Option<f64>,
    pub avg_humidity: Option<f64>,
    pub avg_rainfall: Option<f64>,
    pub avg_sunshine: Option<f64>,
}

impl ScalarMetrics {
    pub fn has_data(&self) -> bool {
        self.avg_temperature.is_some()
            || self.avg_humidity.is_some()
            || self.avg_rainfall.is_some()
            || self.avg_sunshine.is_some()
    }
}

/// Everything the dashboard displays for one filter selection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardViews {
    pub filter: DashboardFilter,
    pub record_count: usize,
    pub metrics: ScalarMetrics,
    pub monthly_temperature: Vec<SeriesPoint<u32>>,
    pub annual_temperature: Vec<SeriesPoint<i32>>,
    pub hottest_provinces: Vec<RankedProvince>,
    pub coolest_provinces: Vec<RankedProvince>,
    pub monthly_rainfall: Vec<SeriesPoint<u32>>,
    pub annual_rainfall: Vec<SeriesPoint<i32>>,
    pub daily_min_temperature: Vec<SeriesPoint<NaiveDate>>,
    pub daily_max_temperature: Vec<SeriesPoint<NaiveDate>>,
}

impl DashboardViews {
    pub fn summary(&self) -> String {
        let province = self.filter.province.as_deref().unwrap_or("All provinces");
        let station = self.filter.station.as_deref().unwrap_or("All stations");

        format!(
            "Climate Dashboard\n\
            Date Range: {} to {}\n\
            Province: {}\n\
            Station: {}\n\
            Records: {}\n\n\
            Metrics:\n\
            - Average Temperature: {}\n\
            - Average Humidity: {}\n\
            - Average Rainfall: {}\n\
            - Average Sun Duration: {}",
            self.filter.date_range.start,
            self.filter.date_range.end,
            province,
            station,
            self.record_count,
            format_metric(self.metrics.avg_temperature, UNIT_TEMPERATURE),
            format_metric(self.metrics.avg_humidity, UNIT_HUMIDITY),
            format_metric(self.metrics.avg_rainfall, UNIT_RAINFALL),
            format_metric(self.metrics.avg_sunshine, UNIT_SUNSHINE),
        )
    }

    pub fn detailed_summary(&self) -> String {
        let mut out = self.summary();

        out.push_str("\n\nAverage Temperature Change by Period");
        push_series(&mut out, "Monthly Avg Temperature Change", &self.monthly_temperature);
        push_series(&mut out, "Annual Avg Temperature Change", &self.annual_temperature);

        push_ranking(
            &mut out,
            &format!(
                "Top {} Province with the Highest Avg Temperature",
                self.hottest_provinces.len()
            ),
            &self.hottest_provinces,
        );
        push_ranking(
            &mut out,
            &format!(
                "Top {} Province with the Lowest Avg Temperature",
                self.coolest_provinces.len()
            ),
            &self.coolest_provinces,
        );

        out.push_str("\n\nAverage Rain Change by Period");
        push_series(&mut out, "Monthly Avg Rain Change", &self.monthly_rainfall);
        push_series(&mut out, "Annual Avg Rain Change", &self.annual_rainfall);

        push_series(&mut out, "Daily Min Temperature", &self.daily_min_temperature);
        push_series(&mut out, "Daily Max Temperature", &self.daily_max_temperature);

        out
    }
}

fn push_series<K: Display>(out: &mut String, title: &str, series: &[SeriesPoint<K>]) {
    let _ = write!(out, "\n\n{}:", title);
    if series.is_empty() {
        let _ = write!(out, "\n  (no data)");
    }
    for point in series {
        let _ = write!(out, "\n  {:>10}  {}", point.key, format_value(point.value));
    }
}

fn push_ranking(out: &mut String, title: &str, ranking: &[RankedProvince]) {
    let _ = write!(out, "\n\n{}:", title);
    if ranking.is_empty() {
        let _ = write!(out, "\n  (no data)");
    }
    for (i, entry) in ranking.iter().enumerate() {
        let _ = write!(
            out,
            "\n  {:>2}. {}: {}",
            i + 1,
            entry.province,
            format_metric(Some(entry.mean_tavg), UNIT_TEMPERATURE)
        );
    }
}
