use thiserror::Error;

pub type Result<T> = std::result::Result<T, DashboardError>;

#[derive(Error, Debug)]
pub enum DashboardError {
    #[error(transparent)]
    DataLoad(#[from] DataLoadError),

    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON encoding error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Date parsing error: {0}")]
    DateParse(#[from] chrono::ParseError),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

/// Failures while fetching or decoding the observation source.
///
/// All of these are fatal: the dashboard has nothing to show without data.
#[derive(Error, Debug)]
pub enum DataLoadError {
    #[error("Failed to read data source '{location}'")]
    Io {
        location: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Network request failed for {url}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("CSV parsing error in '{location}'")]
    Csv {
        location: String,
        #[source]
        source: csv::Error,
    },

    #[error("Invalid record on line {line}: {message}")]
    InvalidRecord { line: u64, message: String },

    #[error("Record on line {line} failed validation")]
    Validation {
        line: u64,
        #[source]
        source: validator::ValidationErrors,
    },

    #[error("Data source '{location}' contains no observations")]
    Empty { location: String },
}
