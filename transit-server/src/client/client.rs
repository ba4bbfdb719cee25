//! Route backend HTTP client.

use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use serde::Serialize;
use tracing::debug;

use crate::domain::RouteSearchResult;
use crate::normalize::normalize_slice;

use super::error::ClientError;

/// Configuration for the route backend client.
#[derive(Debug, Clone)]
pub struct RouteClientConfig {
    /// Base URL, e.g. `http://localhost:8080/api`
    pub base_url: String,
    /// Bearer token sent with every request
    pub token: Option<String>,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl RouteClientConfig {
    /// Create a new config for the given base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            token: None,
            timeout_secs: 30,
        }
    }

    /// Authenticate with a bearer token.
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

#[derive(Debug, Serialize)]
struct FindRouteBody<'a> {
    origin: &'a str,
    destination: &'a str,
}

/// Client for a route-search backend.
#[derive(Debug, Clone)]
pub struct RouteClient {
    http: reqwest::Client,
    base_url: String,
}

impl RouteClient {
    /// Create a new client with the given configuration.
    pub fn new(config: RouteClientConfig) -> Result<Self, ClientError> {
        let mut headers = HeaderMap::new();

        if let Some(token) = &config.token {
            let value = HeaderValue::from_str(&format!("Bearer {token}")).map_err(|_| {
                ClientError::Api {
                    status: 0,
                    message: "Invalid token format".to_string(),
                }
            })?;
            headers.insert(AUTHORIZATION, value);
        }

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Ask the backend for routes between two stops.
    ///
    /// An empty result is a valid answer, not an error.
    pub async fn find_route(
        &self,
        origin: &str,
        destination: &str,
    ) -> Result<RouteSearchResult, ClientError> {
        let url = format!("{}/routes/find", self.base_url);
        debug!(%url, origin, destination, "requesting routes");

        let response = self
            .http
            .post(&url)
            .json(&FindRouteBody {
                origin,
                destination,
            })
            .send()
            .await?;

        let status = response.status();

        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Err(ClientError::Unauthorized);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ClientError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.bytes().await?;
        Ok(normalize_slice(&body)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_builder() {
        let config = RouteClientConfig::new("http://localhost:8080/api")
            .with_token("secret")
            .with_timeout(5);

        assert_eq!(config.base_url, "http://localhost:8080/api");
        assert_eq!(config.token.as_deref(), Some("secret"));
        assert_eq!(config.timeout_secs, 5);
    }

    #[test]
    fn default_config_has_no_token() {
        let config = RouteClientConfig::new("http://example.com");
        assert!(config.token.is_none());
        assert_eq!(config.timeout_secs, 30);
    }

    #[test]
    fn trailing_slash_is_trimmed() {
        let client = RouteClient::new(RouteClientConfig::new("http://localhost/api/")).unwrap();
        assert_eq!(client.base_url(), "http://localhost/api");
    }

    #[test]
    fn invalid_token_is_rejected() {
        let err = RouteClient::new(RouteClientConfig::new("http://localhost").with_token("bad\ntoken"))
            .unwrap_err();
        assert!(matches!(err, ClientError::Api { status: 0, .. }));
    }

    #[tokio::test]
    async fn unreachable_backend_is_http_error() {
        let client = RouteClient::new(
            RouteClientConfig::new("http://127.0.0.1:1/api").with_timeout(2),
        )
        .unwrap();
        let err = client.find_route("Uttara", "Motijheel").await.unwrap_err();
        assert!(matches!(err, ClientError::Http(_)));
    }
}
