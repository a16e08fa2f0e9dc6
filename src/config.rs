//! Server configuration from CLI flags and `ECHO_*` environment variables

use std::net::{IpAddr, SocketAddr};

use clap::Parser;
use thiserror::Error;

use crate::event_store::DEFAULT_CAPACITY;
use crate::ingest::{IngestSettings, DEFAULT_MAX_TEXT_PART_BYTES};

/// Default request body limit (10 MiB)
pub const DEFAULT_MAX_BODY_BYTES: usize = 10 * 1024 * 1024;

/// Configuration problems detected at startup
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("capacity must be at least 1")]
    ZeroCapacity,
    #[error("max body size must be at least 1 byte")]
    ZeroBodyLimit,
    #[error("invalid bind host '{0}': expected an IP address")]
    InvalidHost(String),
}

/// Webhook echo server settings
#[derive(Debug, Clone, Parser)]
#[command(name = "echo-server", version, about = "Capture and inspect incoming webhooks")]
pub struct Config {
    /// Address to bind
    #[arg(long, env = "ECHO_HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port to listen on
    #[arg(long, short = 'p', env = "ECHO_PORT", default_value_t = 8000)]
    pub port: u16,

    /// Number of webhooks kept in memory before the oldest is evicted
    #[arg(long, short = 'n', env = "ECHO_CAPACITY", default_value_t = DEFAULT_CAPACITY)]
    pub capacity: usize,

    /// Largest accepted request body in bytes
    #[arg(long, env = "ECHO_MAX_BODY_BYTES", default_value_t = DEFAULT_MAX_BODY_BYTES)]
    pub max_body_bytes: usize,

    /// Multipart text parts above this size keep only their metadata
    #[arg(long, env = "ECHO_MAX_TEXT_PART_BYTES", default_value_t = DEFAULT_MAX_TEXT_PART_BYTES)]
    pub max_text_part_bytes: usize,

    /// Report the first X-Forwarded-For entry as the client address
    #[arg(
        long,
        env = "ECHO_TRUST_FORWARDED_FOR",
        default_value_t = true,
        action = clap::ArgAction::Set
    )]
    pub trust_forwarded_for: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            capacity: DEFAULT_CAPACITY,
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
            max_text_part_bytes: DEFAULT_MAX_TEXT_PART_BYTES,
            trust_forwarded_for: true,
        }
    }
}

impl Config {
    /// Reject settings the server cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.capacity == 0 {
            return Err(ConfigError::ZeroCapacity);
        }
        if self.max_body_bytes == 0 {
            return Err(ConfigError::ZeroBodyLimit);
        }
        self.bind_addr()?;
        Ok(())
    }

    /// Socket address to listen on
    pub fn bind_addr(&self) -> Result<SocketAddr, ConfigError> {
        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|_| ConfigError::InvalidHost(self.host.clone()))?;
        Ok(SocketAddr::new(ip, self.port))
    }

    pub fn ingest_settings(&self) -> IngestSettings {
        IngestSettings {
            trust_forwarded_for: self.trust_forwarded_for,
            max_text_part_bytes: self.max_text_part_bytes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::try_parse_from(["echo-server"]).unwrap();
        assert_eq!(config.capacity, 1000);
        assert!(config.trust_forwarded_for);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_cli_overrides() {
        let config = Config::try_parse_from([
            "echo-server",
            "--host",
            "127.0.0.1",
            "--port",
            "9090",
            "--capacity",
            "5",
            "--trust-forwarded-for",
            "false",
        ])
        .unwrap();

        assert_eq!(config.bind_addr().unwrap(), "127.0.0.1:9090".parse().unwrap());
        assert_eq!(config.capacity, 5);
        assert!(!config.ingest_settings().trust_forwarded_for);
    }

    #[test]
    fn test_zero_capacity_rejected() {
        let config = Config {
            capacity: 0,
            ..Config::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::ZeroCapacity)));
    }

    #[test]
    fn test_bad_host_rejected() {
        let config = Config {
            host: "not an ip".to_string(),
            ..Config::default()
        };
        assert!(matches!(config.bind_addr(), Err(ConfigError::InvalidHost(_))));
    }
}
