/// Default observation source
pub const DEFAULT_SOURCE_URL: &str =
    "https://raw.githubusercontent.com/putriafia26/dashboard-climate/master/climate-change-clean.csv";

/// Accepted date layouts, tried in order after any time of day is dropped
pub const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%d-%m-%Y", "%m/%d/%Y"];

/// Cell values treated as missing measurements
pub const MISSING_MARKERS: &[&str] = &["NA", "N/A", "NaN", "nan", "null", "None"];

/// Number of provinces in each temperature ranking
pub const DEFAULT_RANKING_SIZE: usize = 10;

/// Environment variable prefix for configuration overrides
pub const CONFIG_ENV_PREFIX: &str = "CLIMATE_DASHBOARD";

/// Shown in place of a metric with no values
pub const NO_DATA: &str = "no data";

/// Metric units, matching the dashboard labels
pub const UNIT_TEMPERATURE: &str = "°C";
pub const UNIT_HUMIDITY: &str = "%";
pub const UNIT_RAINFALL: &str = " mm";
pub const UNIT_SUNSHINE: &str = " hour";

/// Processing defaults
pub const DEFAULT_BUFFER_SIZE: usize = 8192 * 16; // 128KB
