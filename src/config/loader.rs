use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info};

use super::{ConfigOverrides, ServerConfig};
use crate::error::{ErrorCode, RegistryError, RegistryResult};

/// Assembles a [`ServerConfig`] from file, environment and CLI sources
#[derive(Debug, Default)]
pub struct ConfigLoader {
    config_path: Option<PathBuf>,
    overrides: ConfigOverrides,
    skip_env: bool,
}

impl ConfigLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read a TOML file before applying other sources
    pub fn with_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.config_path = Some(path.into());
        self
    }

    pub fn with_overrides(mut self, overrides: ConfigOverrides) -> Self {
        self.overrides = overrides;
        self
    }

    /// Ignore the process environment
    pub fn without_env(mut self) -> Self {
        self.skip_env = true;
        self
    }

    pub async fn load(&self) -> RegistryResult<ServerConfig> {
        let mut config = match &self.config_path {
            Some(path) => Self::load_file(path).await?,
            None => ServerConfig::default(),
        };

        if !self.skip_env {
            config.merge_env_vars()?;
        }
        config.apply_overrides(&self.overrides);

        debug!("Resolved configuration: {:?}", config);
        Ok(config)
    }

    async fn load_file(path: &Path) -> RegistryResult<ServerConfig> {
        let content = fs::read_to_string(path).await.map_err(|e| {
            RegistryError::config_with_code(
                ErrorCode::CONFIG_NOT_FOUND,
                format!("Cannot read config file {}", path.display()),
                Some(path.to_path_buf()),
            )
            .with_source(e)
        })?;

        let config: ServerConfig = toml::from_str(&content).map_err(|e| {
            RegistryError::config_with_code(
                ErrorCode::CONFIG_INVALID_TOML,
                format!("Invalid config file {}: {}", path.display(), e.message()),
                Some(path.to_path_buf()),
            )
            .with_source(e)
        })?;

        info!("Loaded configuration from {}", path.display());
        Ok(config)
    }
}
