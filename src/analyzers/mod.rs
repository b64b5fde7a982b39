pub mod dashboard_analyzer;
pub mod views;

pub use dashboard_analyzer::DashboardAnalyzer;
pub use views::{DashboardViews, RankedProvince, ScalarMetrics, SeriesPoint};
