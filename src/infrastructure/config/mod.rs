use std::path::{Path, PathBuf};

use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use tracing::debug;

use crate::domain::error::{AppError, Result};
use crate::domain::prep_config::AppConfig;

pub const DEFAULT_CONFIG_FILE: &str = "qpair-prep.toml";
pub const ENV_PREFIX: &str = "QPAIR_";

/// Layers defaults, a TOML file and `QPAIR_*` environment variables.
pub struct ConfigService {
    file: Option<PathBuf>,
}

impl ConfigService {
    pub fn new() -> Self {
        Self { file: None }
    }

    /// Use an explicit config file; unlike the default file it must exist
    pub fn with_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.file = Some(path.into());
        self
    }

    pub fn figment(&self) -> Result<Figment> {
        let figment = Figment::from(Serialized::defaults(AppConfig::default()));

        let figment = match &self.file {
            Some(path) => {
                if !path.is_file() {
                    return Err(AppError::not_readable(path, "config file not found"));
                }
                figment.merge(Toml::file(path))
            }
            None => figment.merge(Toml::file(Path::new(DEFAULT_CONFIG_FILE))),
        };

        Ok(figment.merge(Env::prefixed(ENV_PREFIX).split("__")))
    }

    pub fn load(&self) -> Result<AppConfig> {
        let config: AppConfig = self.figment()?.extract()?;
        config.validate()?;
        debug!(?config, "Loaded configuration");
        Ok(config)
    }
}

impl Default for ConfigService {
    fn default() -> Self {
        Self::new()
    }
}
