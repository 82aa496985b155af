//! Server configuration.
//!
//! Defaults are overridden by environment variables (a `.env` file is
//! loaded at startup), which are in turn overridden by CLI flags.
//!
//! | Variable                      | Default   |
//! |-------------------------------|-----------|
//! | `MATRIXOPS_HOST`              | `0.0.0.0` |
//! | `MATRIXOPS_PORT`              | `3000`    |
//! | `MATRIXOPS_MAX_UPLOAD_BYTES`  | 10 MiB    |
//! | `MATRIXOPS_CORS`              | `true`    |
//!
//! Unparseable values fall back to the default.

use std::env;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};

pub const DEFAULT_PORT: u16 = 3000;

/// Maximum upload size (in bytes).
///
/// 10 MB limit.
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: IpAddr,
    pub port: u16,
    pub max_upload_bytes: usize,
    /// Allow any origin (development frontends on another port)
    pub cors_permissive: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: DEFAULT_PORT,
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            cors_permissive: true,
        }
    }
}

impl ServerConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Read configuration through `lookup`, one call per variable.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        Self {
            host: parse_or(lookup("MATRIXOPS_HOST"), defaults.host),
            port: parse_or(lookup("MATRIXOPS_PORT"), defaults.port),
            max_upload_bytes: parse_or(
                lookup("MATRIXOPS_MAX_UPLOAD_BYTES"),
                defaults.max_upload_bytes,
            ),
            cors_permissive: lookup("MATRIXOPS_CORS")
                .and_then(|v| parse_bool(&v))
                .unwrap_or(defaults.cors_permissive),
        }
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

fn parse_or<T: std::str::FromStr>(value: Option<String>, default: T) -> T {
    value
        .and_then(|v| v.trim().parse::<T>().ok())
        .unwrap_or(default)
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim() {
        "1" | "true" | "TRUE" | "yes" | "YES" => Some(true),
        "0" | "false" | "FALSE" | "no" | "NO" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> ServerConfig {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ServerConfig::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]);
        assert_eq!(config, ServerConfig::default());
        assert_eq!(config.socket_addr().to_string(), "0.0.0.0:3000");
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("MATRIXOPS_HOST", "127.0.0.1"),
            ("MATRIXOPS_PORT", "8080"),
            ("MATRIXOPS_MAX_UPLOAD_BYTES", "1024"),
            ("MATRIXOPS_CORS", "no"),
        ]);
        assert_eq!(config.socket_addr().to_string(), "127.0.0.1:8080");
        assert_eq!(config.max_upload_bytes, 1024);
        assert!(!config.cors_permissive);
    }

    #[test]
    fn test_invalid_values_fall_back() {
        let config = config_from(&[
            ("MATRIXOPS_PORT", "http"),
            ("MATRIXOPS_MAX_UPLOAD_BYTES", "-1"),
            ("MATRIXOPS_CORS", "maybe"),
        ]);
        assert_eq!(config.port, DEFAULT_PORT);
        assert_eq!(config.max_upload_bytes, DEFAULT_MAX_UPLOAD_BYTES);
        assert!(config.cors_permissive);
    }
}
