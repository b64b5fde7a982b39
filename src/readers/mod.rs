pub mod observation_reader;
pub mod source;

pub use observation_reader::ObservationReader;
pub use source::DataSource;
