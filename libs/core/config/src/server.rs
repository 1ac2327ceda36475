use crate::{ConfigError, FromEnv, env_or_default, env_parse_or};
use std::net::Ipv4Addr;
use std::time::Duration;

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_SHUTDOWN_TIMEOUT_SECS: u64 = 30;

/// Listener settings for HTTP services
#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Upper bound for the cleanup phase after a shutdown signal
    pub shutdown_timeout: Duration,
}

impl ServerConfig {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            shutdown_timeout: Duration::from_secs(DEFAULT_SHUTDOWN_TIMEOUT_SECS),
        }
    }

    /// Get the server address as "host:port"
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl FromEnv for ServerConfig {
    /// Reads `HOST` (default `0.0.0.0`), `PORT` (default 8080) and
    /// `SHUTDOWN_TIMEOUT_SECS` (default 30).
    fn from_env() -> Result<Self, ConfigError> {
        let host = env_or_default("HOST", &Ipv4Addr::UNSPECIFIED.to_string());
        let port = env_parse_or("PORT", DEFAULT_PORT)?;
        let shutdown_secs = env_parse_or("SHUTDOWN_TIMEOUT_SECS", DEFAULT_SHUTDOWN_TIMEOUT_SECS)?;

        Ok(Self {
            host,
            port,
            shutdown_timeout: Duration::from_secs(shutdown_secs),
        })
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self::new(Ipv4Addr::UNSPECIFIED.to_string(), DEFAULT_PORT)
    }
}
