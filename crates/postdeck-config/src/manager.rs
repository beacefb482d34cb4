//! Configuration manager implementation

use std::path::{Path, PathBuf};

use config::{Config, Environment, File};
use tracing::debug;

use crate::{
    error::{ConfigError, Result},
    types::{ConfigSource, PostdeckConfig},
};

/// Environment variable prefix, e.g. `POSTDECK_MAX_SNAPSHOTS`
pub const ENV_PREFIX: &str = "POSTDECK";

/// Configuration file looked up in the working directory
pub const CONFIG_FILE_NAME: &str = "postdeck.toml";

/// Configuration manager
#[derive(Debug, Clone)]
pub struct ConfigManager {
    /// Configuration file path
    config_path: PathBuf,
    /// Environment prefix
    env_prefix: String,
}

impl ConfigManager {
    /// Create a new configuration manager
    pub fn new() -> Self {
        Self::with_path(Self::default_config_path())
    }

    /// Create with custom config path
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: path.into(),
            env_prefix: ENV_PREFIX.to_string(),
        }
    }

    /// Use another environment prefix
    pub fn with_env_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.env_prefix = prefix.into();
        self
    }

    /// Configuration file path
    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// `./postdeck.toml` when present, else the per-user config file
    fn default_config_path() -> PathBuf {
        let local = PathBuf::from(CONFIG_FILE_NAME);
        if local.exists() {
            return local;
        }
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("postdeck")
            .join("config.toml")
    }
}

impl ConfigSource for ConfigManager {
    fn load_config(&self) -> Result<PostdeckConfig> {
        debug!(path = %self.config_path.display(), prefix = %self.env_prefix, "Loading configuration");
        let builder = Config::builder()
            .add_source(File::from(self.config_path.clone()).required(false))
            .add_source(Environment::with_prefix(&self.env_prefix).try_parsing(true));

        let config = builder.build()?;
        let postdeck_config: PostdeckConfig = config.try_deserialize()?;
        self.validate_config(&postdeck_config)?;
        Ok(postdeck_config)
    }

    fn save_config(&self, config: &PostdeckConfig) -> Result<()> {
        self.validate_config(config)?;
        let toml = toml::to_string(config)?;
        if let Some(parent) = self.config_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(&self.config_path, toml)?;
        debug!(path = %self.config_path.display(), "Saved configuration");
        Ok(())
    }

    fn validate_config(&self, config: &PostdeckConfig) -> Result<()> {
        if config.max_snapshots == 0 {
            return Err(ConfigError::Validation(
                "max_snapshots must be greater than 0".to_string(),
            ));
        }
        if config.defer_positions == 0 {
            return Err(ConfigError::Validation(
                "defer_positions must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}
