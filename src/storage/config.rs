use super::Result;
use crate::error::{ConfigError, StorageError};
use crate::utils::validation::validate_url;
use dirs;
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::PathBuf;

pub const DEFAULT_IDENTITY_URL: &str = "https://api.identity.manifold.co/v1";
pub const DEFAULT_BILLING_URL: &str = "https://api.billing.manifold.co/v1";
pub const DEFAULT_ANALYTICS_URL: &str = "https://api.analytics.manifold.co/v1";
pub const DEFAULT_STRIPE_URL: &str = "https://api.stripe.com/v1";

const CONFIG_FILE_NAME: &str = "config.toml";

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
    pub identity_url: String,
    pub billing_url: String,
    pub analytics_url: String,
    pub stripe_url: String,
    pub stripe_publishable_key: Option<String>,
    /// Team used by billing commands when neither `--team` nor `--me` is given.
    pub default_team: Option<String>,
    pub oauth_poll_interval_secs: u64,
    pub oauth_timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            identity_url: DEFAULT_IDENTITY_URL.to_string(),
            billing_url: DEFAULT_BILLING_URL.to_string(),
            analytics_url: DEFAULT_ANALYTICS_URL.to_string(),
            stripe_url: DEFAULT_STRIPE_URL.to_string(),
            stripe_publishable_key: None,
            default_team: None,
            oauth_poll_interval_secs: 2,
            oauth_timeout_secs: 300,
        }
    }
}

impl Config {
    /// Load the configuration file, falling back to defaults when it does not exist.
    pub fn load(path: Option<PathBuf>) -> crate::Result<Self> {
        let config_path = match path {
            Some(p) => p,
            None => Self::config_file_path()?,
        };

        let mut config = if config_path.exists() {
            let content =
                fs::read_to_string(&config_path).map_err(|source| StorageError::FileIo {
                    path: config_path.to_string_lossy().to_string(),
                    source,
                })?;

            toml::from_str::<Config>(&content).map_err(|e| StorageError::ConfigParseError {
                message: format!("{}: {}", config_path.to_string_lossy(), e.message()),
            })?
        } else {
            log::debug!(
                "No config file at {}, using defaults",
                config_path.to_string_lossy()
            );
            Self::default()
        };

        config.apply_overrides(|key| env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    /// Path of the config file inside `dir`, or inside the platform config directory.
    pub fn file_path_in(dir: Option<&str>) -> Result<PathBuf> {
        match dir {
            Some(dir) => Ok(PathBuf::from(dir).join(CONFIG_FILE_NAME)),
            None => Self::config_file_path(),
        }
    }

    fn config_file_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir().ok_or(StorageError::ConfigDirNotFound)?;
        Ok(config_dir.join("manifold").join(CONFIG_FILE_NAME))
    }

    /// Apply `MANIFOLD_*` overrides; empty values are ignored.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let lookup = |key: &str| lookup(key).filter(|v| !v.is_empty());

        if let Some(url) = lookup("MANIFOLD_IDENTITY_URL") {
            self.identity_url = url;
        }
        if let Some(url) = lookup("MANIFOLD_BILLING_URL") {
            self.billing_url = url;
        }
        if let Some(url) = lookup("MANIFOLD_ANALYTICS_URL") {
            self.analytics_url = url;
        }
        if let Some(key) = lookup("MANIFOLD_STRIPE_KEY") {
            self.stripe_publishable_key = Some(key);
        }
    }

    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        let urls = [
            ("identity_url", &self.identity_url),
            ("billing_url", &self.billing_url),
            ("analytics_url", &self.analytics_url),
            ("stripe_url", &self.stripe_url),
        ];
        for (field, value) in urls {
            validate_url(value).map_err(|e| ConfigError::InvalidValue {
                field: field.to_string(),
                value: value.clone(),
                reason: e.to_string(),
            })?;
        }

        if self.oauth_poll_interval_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "oauth_poll_interval_secs".to_string(),
                value: "0".to_string(),
                reason: "must be at least 1 second".to_string(),
            });
        }

        Ok(())
    }
}
