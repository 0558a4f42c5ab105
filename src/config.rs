//! Configuration loading for InfraSee.
//!
//! Configuration is read from a TOML file. Every section is optional and
//! falls back to local-development defaults; a handful of environment
//! variables override the file so secrets can stay out of it.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::auth::AuthState;

/// Environment variable overriding `sms.api_key`
pub const ENV_SMS_API_KEY: &str = "INFRASEE_SMS_API_KEY";
/// Environment variable overriding `identity.base_url`
pub const ENV_IDENTITY_URL: &str = "INFRASEE_IDENTITY_URL";
/// Environment variable overriding `sms.base_url`
pub const ENV_SMS_URL: &str = "INFRASEE_SMS_URL";
/// Environment variable overriding `filters.base_url`
pub const ENV_FILTERS_URL: &str = "INFRASEE_FILTERS_URL";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path:?}: {message}")]
    Parse { path: PathBuf, message: String },

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub identity: IdentityConfig,
    #[serde(default)]
    pub sms: SmsConfig,
    #[serde(default)]
    pub filters: FiltersConfig,
    /// Client-side auth flag the route guard reflects
    #[serde(default)]
    pub auth: AuthState,
}

/// Identity provider used by the password-reset wizard.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct IdentityConfig {
    /// Base URL of the identity API (e.g., "https://id.infrasee.local/api")
    #[serde(default = "default_identity_url")]
    pub base_url: String,
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

/// Hosted SMS gateway.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct SmsConfig {
    #[serde(default = "default_sms_url")]
    pub base_url: String,
    /// Gateway API key (prefer INFRASEE_SMS_API_KEY)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    /// Sender name or number shown to recipients
    #[serde(default = "default_sender_id")]
    pub sender_id: String,
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

/// Data table filter-options endpoint.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct FiltersConfig {
    #[serde(default = "default_filters_url")]
    pub base_url: String,
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

fn default_identity_url() -> String {
    "http://localhost:8080/api".to_string()
}

fn default_sms_url() -> String {
    "http://localhost:8090/v1".to_string()
}

fn default_filters_url() -> String {
    "http://localhost:8080/api".to_string()
}

fn default_sender_id() -> String {
    "InfraSee".to_string()
}

fn default_timeout() -> u64 {
    10
}

impl Default for IdentityConfig {
    fn default() -> Self {
        Self {
            base_url: default_identity_url(),
            timeout_secs: default_timeout(),
        }
    }
}

impl Default for SmsConfig {
    fn default() -> Self {
        Self {
            base_url: default_sms_url(),
            api_key: None,
            sender_id: default_sender_id(),
            timeout_secs: default_timeout(),
        }
    }
}

impl Default for FiltersConfig {
    fn default() -> Self {
        Self {
            base_url: default_filters_url(),
            timeout_secs: default_timeout(),
        }
    }
}

impl Config {
    /// Default config location: `<config dir>/infrasee/config.toml`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("infrasee").join("config.toml"))
    }

    /// Parse configuration from TOML text
    pub fn from_toml(content: &str, path: &Path) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Load configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content, path)
    }

    /// Resolve the effective configuration.
    ///
    /// An explicit path must exist. Without one, the default location is used
    /// when present and built-in defaults otherwise. Environment overrides are
    /// applied last, then the result is validated.
    pub fn discover(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match explicit {
            Some(path) => Self::load(path)?,
            None => match Self::default_path().filter(|p| p.is_file()) {
                Some(path) => {
                    debug!(path = %path.display(), "loading default config");
                    Self::load(path)?
                }
                None => Self::default(),
            },
        };
        config.apply_overrides(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    /// Apply overrides from a key lookup (normally the process environment)
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(key) = get(ENV_SMS_API_KEY) {
            self.sms.api_key = Some(key);
        }
        if let Some(url) = get(ENV_IDENTITY_URL) {
            self.identity.base_url = url;
        }
        if let Some(url) = get(ENV_SMS_URL) {
            self.sms.base_url = url;
        }
        if let Some(url) = get(ENV_FILTERS_URL) {
            self.filters.base_url = url;
        }
    }

    /// Check URLs and timeouts
    pub fn validate(&self) -> Result<(), ConfigError> {
        let services = [
            ("identity", &self.identity.base_url, self.identity.timeout_secs),
            ("sms", &self.sms.base_url, self.sms.timeout_secs),
            ("filters", &self.filters.base_url, self.filters.timeout_secs),
        ];
        for (section, url, timeout) in services {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(ConfigError::Invalid(format!(
                    "{}.base_url must start with http:// or https://, got '{}'",
                    section, url
                )));
            }
            if timeout == 0 {
                return Err(ConfigError::Invalid(format!(
                    "{}.timeout_secs must be greater than 0",
                    section
                )));
            }
        }
        Ok(())
    }
}
