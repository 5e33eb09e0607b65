use std::net::SocketAddr;

use stays_common::liteapi::LiteApiConfig;

use crate::error::AppError;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";

/// Process configuration, loaded once at startup and never mutated.
#[derive(Debug, Clone)]
pub struct Config {
    /// Address the HTTP server listens on.
    pub bind_addr: SocketAddr,
    /// Upstream provider settings, including the secret API key.
    pub liteapi: LiteApiConfig,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Required:
    /// - `LITEAPI_KEY`: upstream API key
    /// - `LITEAPI_BASE_URL`: upstream base URL
    ///
    /// Optional:
    /// - `LITEAPI_TIMEOUT_SECS`: upstream timeout (default 30)
    /// - `STAYS_BIND_ADDR`: listen address (default "0.0.0.0:3000")
    pub fn from_env() -> Result<Self, AppError> {
        let liteapi = LiteApiConfig::from_env()?;

        let raw_addr =
            std::env::var("STAYS_BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = parse_bind_addr(&raw_addr)?;

        Ok(Self { bind_addr, liteapi })
    }
}

fn parse_bind_addr(raw: &str) -> Result<SocketAddr, AppError> {
    raw.trim()
        .parse()
        .map_err(|e| AppError::Config(format!("invalid STAYS_BIND_ADDR {raw:?}: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bind_addr_must_be_socket_addr() {
        assert_eq!(
            parse_bind_addr(" 127.0.0.1:8080 ").unwrap(),
            "127.0.0.1:8080".parse::<SocketAddr>().unwrap()
        );
        let err = parse_bind_addr("localhost").unwrap_err();
        assert!(err.to_string().contains("STAYS_BIND_ADDR"));
    }

    #[test]
    fn default_bind_addr_parses() {
        assert!(parse_bind_addr(DEFAULT_BIND_ADDR).is_ok());
    }
}
