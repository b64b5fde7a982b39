pub mod filter;
pub mod observation;

pub use filter::{DashboardFilter, DateRange};
pub use observation::Observation;
