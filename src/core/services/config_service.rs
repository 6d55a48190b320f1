use super::traits::ConfigSource;
use crate::storage::config::Config;
use std::path::PathBuf;

/// Configuration service loading `config.toml` from disk
pub struct ConfigService {
    config_dir: Option<String>,
}

impl ConfigService {
    /// Create new ConfigService instance; `None` uses the platform config directory
    pub fn new(config_dir: Option<String>) -> Self {
        Self { config_dir }
    }

    /// Location of the configuration file
    pub fn config_path(&self) -> crate::Result<PathBuf> {
        Ok(Config::file_path_in(self.config_dir.as_deref())?)
    }
}

impl ConfigSource for ConfigService {
    fn load(&self) -> crate::Result<Config> {
        let path = self.config_path()?;
        log::debug!("Loading configuration from {}", path.to_string_lossy());
        Config::load(Some(path))
    }
}
