//! Configuration management for linked-steps.
//!
//! Handles loading configuration from a TOML file and environment variables.
//! Command-line flags are merged on top by the binary.

use crate::consumer::DEFAULT_SHELL;
use crate::error::{Result, StepsError};
use crate::sparql::{AuthMode, Credentials, EndpointTarget};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::warn;

/// Endpoint used when nothing else is configured.
pub const DEFAULT_ENDPOINT: &str = "http://sparql.turnguard.com";

/// Main configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    /// SPARQL endpoint settings.
    #[serde(default)]
    pub endpoint: EndpointConfig,

    /// Step execution settings.
    #[serde(default)]
    pub run: RunConfig,
}

/// SPARQL endpoint configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct EndpointConfig {
    /// Endpoint URL.
    pub url: Option<String>,

    /// Endpoint user.
    pub user: Option<String>,

    /// Endpoint password (not recommended to store in config).
    pub password: Option<String>,

    /// Authentication mode: "none", "basic" or "digest".
    pub auth: Option<AuthMode>,
}

/// Step execution configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RunConfig {
    /// Shell program used to interpret step commands.
    #[serde(default = "default_shell")]
    pub shell: String,
}

fn default_shell() -> String {
    DEFAULT_SHELL.to_string()
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            shell: default_shell(),
        }
    }
}

impl EndpointConfig {
    /// Merges another config into this one, with the other taking precedence.
    pub fn merge(&mut self, other: &EndpointConfig) {
        if other.url.is_some() {
            self.url = other.url.clone();
        }
        if other.user.is_some() {
            self.user = other.user.clone();
        }
        if other.password.is_some() {
            self.password = other.password.clone();
        }
        if other.auth.is_some() {
            self.auth = other.auth;
        }
    }

    /// Resolves against command-line overrides with `LINKED_STEPS_*`
    /// environment variables as defaults.
    pub fn resolve_with_env(&self, overrides: &EndpointConfig) -> Result<EndpointConfig> {
        self.resolve(overrides, |name| std::env::var(name).ok())
    }

    /// Combines file settings with command-line overrides and variable defaults.
    ///
    /// Precedence: overrides, then this config, then `lookup`. Variables are
    /// only consulted for fields still unset after the merge.
    pub fn resolve(
        &self,
        overrides: &EndpointConfig,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<EndpointConfig> {
        let mut resolved = self.clone();
        resolved.merge(overrides);
        resolved.apply_defaults_from(lookup)?;
        Ok(resolved)
    }

    /// Fills unset fields from a variable lookup.
    pub fn apply_defaults_from(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<()> {
        if self.url.is_none() {
            self.url = lookup("LINKED_STEPS_ENDPOINT");
        }
        if self.user.is_none() {
            self.user = lookup("LINKED_STEPS_USER");
        }
        if self.password.is_none() {
            self.password = lookup("LINKED_STEPS_PASSWORD");
        }
        if self.auth.is_none() {
            if let Some(auth) = lookup("LINKED_STEPS_AUTH") {
                self.auth = Some(auth.parse()?);
            }
        }
        Ok(())
    }

    /// Validates the settings and builds the endpoint target.
    pub fn to_target(&self) -> Result<EndpointTarget> {
        let url = self.url.as_deref().unwrap_or(DEFAULT_ENDPOINT);
        let mut target = EndpointTarget::parse(url)?;

        match (&self.user, &self.password) {
            (Some(user), Some(password)) => {
                target = target.with_credentials(Credentials::new(user, password));
            }
            (Some(_), None) | (None, Some(_)) => {
                warn!("Both user and password are needed for authentication; querying anonymously");
            }
            (None, None) => {}
        }

        if let Some(auth) = self.auth {
            target = target.with_auth(auth);
        }

        Ok(target)
    }
}

impl Config {
    /// Returns the default config file path for the current platform.
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("linked-steps")
            .join("config.toml")
    }

    /// Loads configuration from a TOML file. A missing file yields defaults.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .map_err(|e| StepsError::config(format!("Failed to read config file: {e}")))?;

        Self::parse_toml(&content, path)
    }

    /// Parses configuration from a TOML string.
    fn parse_toml(content: &str, path: &Path) -> Result<Self> {
        toml::from_str(content).map_err(|e| {
            StepsError::config(format!(
                "Configuration error in {}:\n  {}",
                path.display(),
                e
            ))
        })
    }
}
