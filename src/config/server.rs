//! Server configuration

use serde::Deserialize;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use super::error::ValidationError;

/// Server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host address to bind to
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to listen on
    #[serde(default = "default_port")]
    pub port: u16,

    /// Permitted cross-origin value (`*` for any)
    #[serde(default = "default_cors_origin")]
    pub cors_origin: String,

    /// Rust log filter directive
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Emit logs as JSON lines instead of human-readable text
    #[serde(default)]
    pub log_json: bool,
}

impl ServerConfig {
    /// Get the socket address to bind to, falling back to all interfaces
    /// when `host` is not an IP address.
    pub fn socket_addr(&self) -> SocketAddr {
        let ip = self
            .host
            .parse::<IpAddr>()
            .unwrap_or(IpAddr::V4(Ipv4Addr::UNSPECIFIED));
        SocketAddr::new(ip, self.port)
    }

    /// True if any origin is permitted.
    pub fn allows_any_origin(&self) -> bool {
        self.cors_origin.trim() == "*"
    }

    /// Validate server configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.port == 0 {
            return Err(ValidationError::InvalidPort);
        }
        if self.cors_origin.trim().is_empty() {
            return Err(ValidationError::MissingRequired("SERVER__CORS_ORIGIN"));
        }
        Ok(())
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origin: default_cors_origin(),
            log_level: default_log_level(),
            log_json: false,
        }
    }
}

pub(super) fn default_host() -> String {
    "0.0.0.0".to_string()
}

pub(super) fn default_port() -> u16 {
    3000
}

pub(super) fn default_cors_origin() -> String {
    "http://localhost:8080".to_string()
}

pub(super) fn default_log_level() -> String {
    "info,agentic_gateway=debug,tower_http=info".to_string()
}
