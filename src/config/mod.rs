//! Server configuration
//!
//! Values are layered from lowest to highest precedence: built-in defaults,
//! an optional TOML file, `PERSON_REGISTRY_*` environment variables, and
//! finally command-line flags.

use serde::{Deserialize, Serialize};
use std::net::SocketAddr;

use crate::error::{ErrorCode, RegistryError, RegistryResult};

pub mod loader;

pub use loader::ConfigLoader;

pub const ENV_HOST: &str = "PERSON_REGISTRY_HOST";
pub const ENV_PORT: &str = "PERSON_REGISTRY_PORT";
pub const ENV_LOG: &str = "PERSON_REGISTRY_LOG";
pub const ENV_DOCS: &str = "PERSON_REGISTRY_DOCS";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Interface to bind
    #[serde(default = "default_host")]
    pub host: String,

    /// TCP port to listen on
    #[serde(default = "default_port")]
    pub port: u16,

    /// Tracing filter directive, e.g. `info` or `person_registry=debug`
    #[serde(default)]
    pub log_filter: Option<String>,

    /// Allow cross-origin requests from any origin
    #[serde(default = "default_true")]
    pub cors_permissive: bool,

    /// Serve the OpenAPI document and the interactive docs page
    #[serde(default = "default_true")]
    pub docs_enabled: bool,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_true() -> bool {
    true
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            log_filter: None,
            cors_permissive: true,
            docs_enabled: true,
        }
    }
}

/// Command-line values that take precedence over every other source
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub disable_docs: bool,
}

impl ServerConfig {
    /// Apply `PERSON_REGISTRY_*` variables from the process environment
    pub fn merge_env_vars(&mut self) -> RegistryResult<()> {
        self.merge_env_from(|key| std::env::var(key).ok())
    }

    /// Apply environment overrides read through `lookup`
    pub fn merge_env_from<F>(&mut self, lookup: F) -> RegistryResult<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup(ENV_HOST) {
            self.host = host;
        }

        if let Some(port) = lookup(ENV_PORT) {
            self.port = port.trim().parse::<u16>().map_err(|e| {
                RegistryError::config_with_code(
                    ErrorCode::CONFIG_INVALID_VALUE,
                    format!("{ENV_PORT} must be a port number, got {port:?}"),
                    None,
                )
                .with_source(e)
            })?;
        }

        if let Some(filter) = lookup(ENV_LOG) {
            self.log_filter = Some(filter);
        }

        if let Some(docs) = lookup(ENV_DOCS) {
            self.docs_enabled = docs.trim().parse::<bool>().map_err(|e| {
                RegistryError::config_with_code(
                    ErrorCode::CONFIG_INVALID_VALUE,
                    format!("{ENV_DOCS} must be true or false, got {docs:?}"),
                    None,
                )
                .with_source(e)
            })?;
        }

        Ok(())
    }

    /// Apply command-line overrides
    pub fn apply_overrides(&mut self, overrides: &ConfigOverrides) {
        if let Some(host) = &overrides.host {
            self.host = host.clone();
        }
        if let Some(port) = overrides.port {
            self.port = port;
        }
        if overrides.disable_docs {
            self.docs_enabled = false;
        }
    }

    /// Socket address to bind
    pub fn bind_addr(&self) -> RegistryResult<SocketAddr> {
        let host = match self.host.as_str() {
            "localhost" => "127.0.0.1".to_string(),
            ipv6 if ipv6.contains(':') && !ipv6.starts_with('[') => format!("[{ipv6}]"),
            other => other.to_string(),
        };

        format!("{}:{}", host, self.port)
            .parse()
            .map_err(|e: std::net::AddrParseError| {
                RegistryError::config_with_code(
                    ErrorCode::CONFIG_INVALID_VALUE,
                    format!("Invalid bind address {}:{}", self.host, self.port),
                    None,
                )
                .with_source(e)
            })
    }

    /// Base URL advertised to clients and in the API documentation
    pub fn public_url(&self) -> String {
        let host = match self.host.as_str() {
            "0.0.0.0" | "::" | "[::]" => "localhost",
            other => other,
        };
        format!("http://{}:{}", host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = ServerConfig::default();

        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 3000);
        assert!(config.cors_permissive);
        assert!(config.docs_enabled);
        assert_eq!(config.public_url(), "http://localhost:3000");
    }

    #[test]
    fn test_env_overrides() {
        let mut config = ServerConfig::default();
        config
            .merge_env_from(env(&[
                (ENV_HOST, "127.0.0.1"),
                (ENV_PORT, "8080"),
                (ENV_LOG, "debug"),
                (ENV_DOCS, "false"),
            ]))
            .unwrap();

        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 8080);
        assert_eq!(config.log_filter.as_deref(), Some("debug"));
        assert!(!config.docs_enabled);
        assert_eq!(config.public_url(), "http://127.0.0.1:8080");
    }

    #[test]
    fn test_invalid_env_port() {
        let mut config = ServerConfig::default();
        let err = config
            .merge_env_from(env(&[(ENV_PORT, "seventy")]))
            .unwrap_err();

        assert_eq!(err.code(), ErrorCode::CONFIG_INVALID_VALUE);
        assert_eq!(config.port, 3000);
    }

    #[test]
    fn test_cli_overrides_win() {
        let mut config = ServerConfig::default();
        config
            .merge_env_from(env(&[(ENV_PORT, "8080")]))
            .unwrap();
        config.apply_overrides(&ConfigOverrides {
            host: Some("127.0.0.1".to_string()),
            port: Some(9090),
            disable_docs: true,
        });

        assert_eq!(config.port, 9090);
        assert_eq!(config.host, "127.0.0.1");
        assert!(!config.docs_enabled);
    }

    #[test]
    fn test_bind_addr() {
        let config = ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 4000,
            ..Default::default()
        };
        assert_eq!(config.bind_addr().unwrap().port(), 4000);

        for host in ["localhost", "::", "[::1]"] {
            let config = ServerConfig {
                host: host.to_string(),
                ..Default::default()
            };
            assert!(config.bind_addr().is_ok(), "{host}");
        }

        let bad = ServerConfig {
            host: "not a host".to_string(),
            ..Default::default()
        };
        assert!(bad.bind_addr().is_err());
    }
}
