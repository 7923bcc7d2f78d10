//! Server configuration sourced from the environment.

use std::env;
use std::net::SocketAddr;

/// Default bind address when `BIND_ADDR` is unset.
const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8000";

/// Errors raised while reading configuration at startup.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// Without a store connection string there is no service to run.
    #[error("DATABASE_URL is not set")]
    MissingDatabaseUrl,

    /// `BIND_ADDR` was present but not a socket address.
    #[error("BIND_ADDR is not a valid socket address: {0}")]
    InvalidBindAddr(String),
}

/// Runtime configuration for the HTTP server.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub database_url: String,
    pub bind_addr: SocketAddr,
}

impl ServerConfig {
    /// Read configuration from the environment.
    ///
    /// `DATABASE_URL` is required; its absence is a fatal startup error.
    pub fn from_env() -> Result<Self, ConfigError> {
        let database_url = env::var("DATABASE_URL").unwrap_or_default();
        Self::from_parts(database_url, env::var("BIND_ADDR").ok())
    }

    fn from_parts(database_url: String, bind_addr: Option<String>) -> Result<Self, ConfigError> {
        if database_url.trim().is_empty() {
            return Err(ConfigError::MissingDatabaseUrl);
        }
        let addr = bind_addr.unwrap_or_else(|| DEFAULT_BIND_ADDR.to_owned());
        let bind_addr = addr
            .parse()
            .map_err(|_| ConfigError::InvalidBindAddr(addr))?;
        Ok(Self {
            database_url,
            bind_addr,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_database_url_is_fatal() {
        let err = ServerConfig::from_parts(String::new(), None).expect_err("missing url");
        assert_eq!(err, ConfigError::MissingDatabaseUrl);
    }

    #[test]
    fn bind_addr_defaults_to_port_8000() {
        let config = ServerConfig::from_parts("postgres://localhost/clinic".to_owned(), None)
            .expect("config");
        assert_eq!(config.bind_addr.port(), 8000);
    }

    #[test]
    fn explicit_bind_addr_is_honoured() {
        let config = ServerConfig::from_parts(
            "postgres://localhost/clinic".to_owned(),
            Some("127.0.0.1:9090".to_owned()),
        )
        .expect("config");
        assert_eq!(config.bind_addr.to_string(), "127.0.0.1:9090");
    }

    #[test]
    fn malformed_bind_addr_is_rejected() {
        let err = ServerConfig::from_parts(
            "postgres://localhost/clinic".to_owned(),
            Some("not-an-addr".to_owned()),
        )
        .expect_err("bad addr");
        assert_eq!(err, ConfigError::InvalidBindAddr("not-an-addr".to_owned()));
    }
}
