pub mod analyzers;
pub mod cli;
pub mod dataset;
pub mod error;
pub mod logging;
pub mod models;
pub mod readers;
pub mod settings;
pub mod utils;

pub use analyzers::{DashboardAnalyzer, DashboardViews};
pub use dataset::Dataset;
pub use error::{DashboardError, DataLoadError, Result};
pub use models::{DashboardFilter, DateRange, Observation};
