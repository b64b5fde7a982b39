use chrono::{Datelike, NaiveDate};
use validator::Validate;

/// One day of measurements at one station.
///
/// Numeric fields are `None` when the source cell was empty or a missing
/// marker. Means skip those values.
#[derive(Debug, Clone, PartialEq, Validate)]
pub struct Observation {
    pub date: NaiveDate,

    #[validate(length(min = 1))]
    pub province_name: String,

    #[validate(length(min = 1))]
    pub station_name: String,

    #[validate(range(min = -60.0, max = 60.0))]
    pub tavg: Option<f64>,

    #[validate(range(min = -60.0, max = 60.0))]
    pub tn: Option<f64>,

    #[validate(range(min = -60.0, max = 60.0))]
    pub tx: Option<f64>,

    #[validate(range(min = 0.0, max = 100.0))]
    pub rh_avg: Option<f64>,

    #[validate(range(min = 0.0))]
    pub rr: Option<f64>,

    #[validate(range(min = 0.0, max = 24.0))]
    pub ss: Option<f64>,
}

impl Observation {
    pub fn new(date: NaiveDate, province_name: &str, station_name: &str) -> Self {
        Self {
            date,
            province_name: province_name.to_string(),
            station_name: station_name.to_string(),
            tavg: None,
            tn: None,
            tx: None,
            rh_avg: None,
            rr: None,
            ss: None,
        }
    }

    pub fn with_temperatures(
        mut self,
        min: impl Into<Option<f64>>,
        avg: impl Into<Option<f64>>,
        max: impl Into<Option<f64>>,
    ) -> Self {
        self.tn = min.into();
        self.tavg = avg.into();
        self.tx = max.into();
        self
    }

    pub fn with_humidity(mut self, rh_avg: impl Into<Option<f64>>) -> Self {
        self.rh_avg = rh_avg.into();
        self
    }

    pub fn with_rainfall(mut self, rr: impl Into<Option<f64>>) -> Self {
        self.rr = rr.into();
        self
    }

    pub fn with_sunshine(mut self, ss: impl Into<Option<f64>>) -> Self {
        self.ss = ss.into();
        self
    }

    /// Calendar month number, 1-12.
    pub fn month(&self) -> u32 {
        self.date.month()
    }

    pub fn year(&self) -> i32 {
        self.date.year()
    }
}
