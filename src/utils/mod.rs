pub mod constants;
pub mod dates;
pub mod filename;
pub mod format;
pub mod progress;

pub use constants::*;
pub use dates::{normalize_date, parse_date_arg, parse_measurement};
pub use filename::generate_default_export_filename;
pub use format::{format_metric, format_value};
pub use progress::ProgressReporter;
