use crate::domain::error::{BatfishError, BatfishResult};
use crate::domain::name::validate_name;
use serde::{Deserialize, Serialize};
use std::net::Ipv6Addr;

/// API key accepted by a service running without authentication
pub const DEFAULT_API_KEY: &str = "00000000000000000000000000000000";

/// Client configuration file contents
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Global configuration
    #[serde(default)]
    pub global: GlobalConfig,
    /// Service session configuration
    #[serde(default)]
    pub session: SessionConfig,
}

/// Global configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GlobalConfig {
    /// Default log level
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

/// Connection settings for a [`crate::Session`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Service host name or address
    #[serde(default = "default_host")]
    pub host: String,
    /// Service v2 API port
    #[serde(default = "default_port")]
    pub port: u16,
    /// Use https
    #[serde(default)]
    pub ssl: bool,
    /// Verify TLS certificates when `ssl` is set
    #[serde(default = "default_verify_ssl_certs")]
    pub verify_ssl_certs: bool,
    /// API key sent with every request
    #[serde(default = "default_api_key")]
    pub api_key: String,
    /// Per-request timeout in milliseconds
    #[serde(default = "default_timeout")]
    pub timeout_ms: u64,
    /// Network selected when the session starts
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub network: Option<String>,
    /// Snapshot selected when the session starts
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub snapshot: Option<String>,
}

// Default value functions
fn default_log_level() -> String {
    "info".to_string()
}

fn default_host() -> String {
    "localhost".to_string()
}

fn default_port() -> u16 {
    9996
}

fn default_verify_ssl_certs() -> bool {
    true
}

fn default_api_key() -> String {
    DEFAULT_API_KEY.to_string()
}

fn default_timeout() -> u64 {
    30_000
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            ssl: false,
            verify_ssl_certs: default_verify_ssl_certs(),
            api_key: default_api_key(),
            timeout_ms: default_timeout(),
            network: None,
            snapshot: None,
        }
    }
}

impl SessionConfig {
    /// Configuration for a service on the given host with all other defaults
    pub fn with_host(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            ..Self::default()
        }
    }

    /// Check every field; fails before any connection is attempted
    pub fn validate(&self) -> BatfishResult<()> {
        let host = self.host.as_str();
        if host.is_empty() {
            return Err(BatfishError::Configuration("host must not be empty".to_string()));
        }
        if host.contains("://") {
            return Err(BatfishError::Configuration(format!(
                "host '{}' must not include a scheme; use the ssl setting instead",
                host
            )));
        }
        if !is_valid_host(host) {
            return Err(BatfishError::Configuration(format!(
                "invalid host '{}'; expected a host name, IPv4 address or IPv6 literal",
                host
            )));
        }
        if self.port == 0 {
            return Err(BatfishError::Configuration("port must be non-zero".to_string()));
        }
        if self.api_key.trim().is_empty() {
            return Err(BatfishError::Configuration("api_key must not be empty".to_string()));
        }
        if self.timeout_ms == 0 {
            return Err(BatfishError::Configuration("timeout_ms must be non-zero".to_string()));
        }
        if let Some(network) = &self.network {
            validate_name("network", network)?;
        }
        if let Some(snapshot) = &self.snapshot {
            if self.network.is_none() {
                return Err(BatfishError::Configuration(
                    "snapshot requires a network".to_string(),
                ));
            }
            validate_name("snapshot", snapshot)?;
        }
        Ok(())
    }

    /// Service base URL, e.g. `http://localhost:9996`
    pub fn base_url(&self) -> String {
        let scheme = if self.ssl { "https" } else { "http" };
        // Bare IPv6 literals need brackets in a URL authority
        if self.host.contains(':') && !self.host.starts_with('[') {
            format!("{}://[{}]:{}", scheme, self.host, self.port)
        } else {
            format!("{}://{}:{}", scheme, self.host, self.port)
        }
    }
}

/// Host name or IPv4 address built from `[A-Za-z0-9.-]`, or an IPv6
/// literal with or without brackets
fn is_valid_host(host: &str) -> bool {
    let literal = host
        .strip_prefix('[')
        .and_then(|h| h.strip_suffix(']'))
        .unwrap_or(host);
    if literal.contains(':') {
        return literal.parse::<Ipv6Addr>().is_ok();
    }
    literal.len() == host.len()
        && !host.starts_with(['.', '-'])
        && !host.ends_with('-')
        && host.chars().all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '-')
}
