use crate::error::Result;
use crate::utils::constants::{CONFIG_ENV_PREFIX, DEFAULT_RANKING_SIZE, DEFAULT_SOURCE_URL};
use config::{Config, Environment, File};
use serde::Deserialize;
use std::path::Path;

/// Runtime settings, layered as defaults < config file < environment.
///
/// Command-line flags override whatever ends up here.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DashboardSettings {
    pub source: String,
    pub ranking_size: usize,
    pub strict_validation: bool,
}

impl DashboardSettings {
    pub fn load(config_file: Option<&Path>) -> Result<Self> {
        let mut builder = Config::builder()
            .set_default("source", DEFAULT_SOURCE_URL)?
            .set_default("ranking_size", DEFAULT_RANKING_SIZE as i64)?
            .set_default("strict_validation", false)?;

        if let Some(path) = config_file {
            builder = builder.add_source(File::from(path).required(true));
        }

        let settings = builder
            .add_source(Environment::with_prefix(CONFIG_ENV_PREFIX).try_parsing(true))
            .build()?
            .try_deserialize()?;

        Ok(settings)
    }
}
