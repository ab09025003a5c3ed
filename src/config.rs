//! Connection configuration for the catalog client.
//!
//! Provides YAML-based configuration through `sw360-adapter.config.yml` files,
//! including data structures, file loading, and validation.

use anyhow::{bail, Context};
use serde::Deserialize;
use std::collections::HashMap;
use std::fmt;
use std::path::Path;
use std::time::Duration;

use crate::shared::Result;

const CONFIG_FILENAME: &str = "sw360-adapter.config.yml";
const DEFAULT_TIMEOUT_SECS: u64 = 30;
const REDACTED: &str = "<redacted>";

/// HTTP proxy applied to every catalog request when enabled.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct ProxyConfig {
    #[serde(default)]
    pub enabled: bool,
    pub host: Option<String>,
    pub port: Option<u16>,
}

impl ProxyConfig {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            enabled: true,
            host: Some(host.into()),
            port: Some(port),
        }
    }

    /// Proxy URL, `None` unless enabled with host and port.
    pub fn url(&self) -> Option<String> {
        if !self.enabled {
            return None;
        }
        match (self.host.as_deref(), self.port) {
            (Some(host), Some(port)) if !host.trim().is_empty() => {
                Some(format!("http://{}:{}", host.trim(), port))
            }
            _ => None,
        }
    }
}

/// Top-level configuration file schema.
#[derive(Clone, Deserialize)]
pub struct ClientConfig {
    /// Base URL of the REST API, e.g. `https://sw360.example.org/resource/api`
    #[serde(default)]
    pub rest_url: String,
    /// Base URL of the authorization server hosting `/token`
    pub auth_url: Option<String>,
    pub user: Option<String>,
    pub password: Option<String>,
    pub client_id: Option<String>,
    pub client_password: Option<String>,
    /// Token obtained out-of-band; when set no `/token` request is made.
    pub access_token: Option<String>,
    #[serde(default)]
    pub proxy: ProxyConfig,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Captures unknown fields for warnings.
    #[serde(flatten)]
    pub unknown_fields: HashMap<String, serde_yaml_ng::Value>,
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl ClientConfig {
    /// Configuration for a REST URL with a pre-issued access token.
    pub fn with_access_token(rest_url: impl Into<String>, access_token: impl Into<String>) -> Self {
        Self {
            rest_url: rest_url.into(),
            auth_url: None,
            user: None,
            password: None,
            client_id: None,
            client_password: None,
            access_token: Some(access_token.into()),
            proxy: ProxyConfig::default(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            unknown_fields: HashMap::new(),
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// The configured access token, ignoring blank values.
    pub fn configured_token(&self) -> Option<&str> {
        self.access_token
            .as_deref()
            .filter(|token| !token.trim().is_empty())
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let redact = |value: &Option<String>| value.as_ref().map(|_| REDACTED);
        f.debug_struct("ClientConfig")
            .field("rest_url", &self.rest_url)
            .field("auth_url", &self.auth_url)
            .field("user", &self.user)
            .field("password", &redact(&self.password))
            .field("client_id", &self.client_id)
            .field("client_password", &redact(&self.client_password))
            .field("access_token", &redact(&self.access_token))
            .field("proxy", &self.proxy)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

/// Load config from an explicit path. Returns an error if the file is not found.
pub fn load_config_from_path(path: &Path) -> Result<ClientConfig> {
    let content = std::fs::read_to_string(path).with_context(|| {
        format!(
            "Failed to read config file: {}\n\n💡 Hint: Check that the file exists and is readable.",
            path.display()
        )
    })?;

    let config: ClientConfig = serde_yaml_ng::from_str(&content).with_context(|| {
        format!(
            "Failed to parse config file: {}\n\n💡 Hint: Ensure the file contains valid YAML syntax.",
            path.display()
        )
    })?;

    validate_config(&config)?;
    warn_unknown_fields(&config);

    Ok(config)
}

/// Auto-discover config in a directory. Returns `None` silently if not found.
pub fn discover_config(dir: &Path) -> Result<Option<ClientConfig>> {
    let config_path = dir.join(CONFIG_FILENAME);

    if !config_path.exists() {
        return Ok(None);
    }

    let config = load_config_from_path(&config_path)?;
    Ok(Some(config))
}

/// Validate the loaded configuration.
pub fn validate_config(config: &ClientConfig) -> Result<()> {
    if config.rest_url.trim().is_empty() {
        bail!(
            "Invalid config: rest_url must not be empty.\n\n\
             💡 Hint: Set rest_url to the REST API base, e.g. \"https://sw360.example.org/resource/api\"."
        );
    }

    if config.configured_token().is_none() {
        let credentials = [
            ("auth_url", &config.auth_url),
            ("user", &config.user),
            ("password", &config.password),
            ("client_id", &config.client_id),
            ("client_password", &config.client_password),
        ];
        for (name, value) in credentials {
            if value.as_deref().map_or(true, |v| v.trim().is_empty()) {
                bail!(
                    "Invalid config: {} must not be empty when no access_token is given.\n\n\
                     💡 Hint: Either configure access_token or the full set of credentials.",
                    name
                );
            }
        }
    }

    if config.proxy.enabled && config.proxy.url().is_none() {
        bail!(
            "Invalid config: proxy is enabled but host or port is missing.\n\n\
             💡 Hint: Set proxy.host and proxy.port, or set proxy.enabled to false."
        );
    }

    if config.timeout_secs == 0 {
        bail!("Invalid config: timeout_secs must be greater than 0.");
    }

    Ok(())
}

/// Warn about unknown fields in the config file.
fn warn_unknown_fields(config: &ClientConfig) {
    for key in config.unknown_fields.keys() {
        tracing::warn!(field = %key, "Unknown config field will be ignored");
    }
}
