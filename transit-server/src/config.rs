//! Server configuration from environment variables.

use std::fmt::Display;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;

use crate::client::RouteClientConfig;

const DEFAULT_GRAPH_PATH: &str = "data/transport_graph.json";
const DEFAULT_STATIC_DIR: &str = "static";
const DEFAULT_BACKEND_TIMEOUT_SECS: u64 = 30;

/// Error reading configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid {var}={value:?}: {message}")]
    Invalid {
        var: &'static str,
        value: String,
        message: String,
    },
}

/// Runtime configuration for the server binary.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,

    /// Transit graph JSON (`nodes` and `links`)
    pub graph_path: PathBuf,

    /// Stop catalog JSON array. When unset, the catalog is every stop in
    /// the graph.
    pub catalog_path: Option<PathBuf>,

    pub static_dir: PathBuf,

    /// Remote route backend. When set, route searches are forwarded
    /// instead of planned locally.
    pub backend: Option<RouteClientConfig>,
}

fn default_bind_addr() -> SocketAddr {
    ([127, 0, 0, 1], 8080).into()
}

impl ServerConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Read configuration through `lookup`, which returns a variable's
    /// value if set.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        // Blank values count as unset
        let get = |var: &str| lookup(var).filter(|v| !v.trim().is_empty());

        let bind_addr = parse_var("BIND_ADDR", get("BIND_ADDR"), default_bind_addr())?;
        let backend_timeout = parse_var(
            "ROUTE_BACKEND_TIMEOUT_SECS",
            get("ROUTE_BACKEND_TIMEOUT_SECS"),
            DEFAULT_BACKEND_TIMEOUT_SECS,
        )?;

        let backend = get("ROUTE_BACKEND_URL").map(|url| {
            let config = RouteClientConfig::new(url).with_timeout(backend_timeout);
            match get("ROUTE_BACKEND_TOKEN") {
                Some(token) => config.with_token(token),
                None => config,
            }
        });

        Ok(Self {
            bind_addr,
            graph_path: get("TRANSPORT_GRAPH_PATH")
                .unwrap_or_else(|| DEFAULT_GRAPH_PATH.to_string())
                .into(),
            catalog_path: get("STOP_CATALOG_PATH").map(PathBuf::from),
            static_dir: get("STATIC_DIR")
                .unwrap_or_else(|| DEFAULT_STATIC_DIR.to_string())
                .into(),
            backend,
        })
    }
}

/// Parse `value` if present, otherwise `default`.
fn parse_var<T>(var: &'static str, value: Option<String>, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: Display,
{
    match value {
        Some(value) => value.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
            var,
            message: e.to_string(),
            value,
        }),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> Result<ServerConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ServerConfig::from_lookup(|var| vars.get(var).cloned())
    }

    #[test]
    fn defaults() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.bind_addr, SocketAddr::from(([127, 0, 0, 1], 8080)));
        assert_eq!(config.graph_path, PathBuf::from("data/transport_graph.json"));
        assert_eq!(config.catalog_path, None);
        assert_eq!(config.static_dir, PathBuf::from("static"));
        assert!(config.backend.is_none());
    }

    #[test]
    fn overrides() {
        let config = config_from(&[
            ("BIND_ADDR", "0.0.0.0:3000"),
            ("TRANSPORT_GRAPH_PATH", "/srv/graph.json"),
            ("STOP_CATALOG_PATH", "/srv/unique_stops.json"),
            ("STATIC_DIR", "/srv/static"),
        ])
        .unwrap();

        assert_eq!(config.bind_addr.port(), 3000);
        assert_eq!(config.graph_path, PathBuf::from("/srv/graph.json"));
        assert_eq!(config.catalog_path, Some(PathBuf::from("/srv/unique_stops.json")));
        assert_eq!(config.static_dir, PathBuf::from("/srv/static"));
    }

    #[test]
    fn backend_settings() {
        let config = config_from(&[
            ("ROUTE_BACKEND_URL", "http://localhost:9000/api"),
            ("ROUTE_BACKEND_TOKEN", "secret"),
            ("ROUTE_BACKEND_TIMEOUT_SECS", "5"),
        ])
        .unwrap();

        let backend = config.backend.unwrap();
        assert_eq!(backend.base_url, "http://localhost:9000/api");
        assert_eq!(backend.token.as_deref(), Some("secret"));
        assert_eq!(backend.timeout_secs, 5);
    }

    #[test]
    fn blank_values_are_unset() {
        let config = config_from(&[("ROUTE_BACKEND_URL", "  "), ("BIND_ADDR", "")]).unwrap();
        assert!(config.backend.is_none());
        assert_eq!(config.bind_addr.port(), 8080);
    }

    #[test]
    fn malformed_values_are_errors() {
        let err = config_from(&[("BIND_ADDR", "localhost")]).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { var: "BIND_ADDR", .. }));

        let err = config_from(&[("ROUTE_BACKEND_TIMEOUT_SECS", "soon")]).unwrap_err();
        assert!(err.to_string().starts_with("invalid ROUTE_BACKEND_TIMEOUT_SECS=\"soon\""));
    }
}
