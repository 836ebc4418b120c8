//! HTTP utilities.
//!
//! A thin wrapper around `reqwest` that applies the client settings from the
//! configuration and hands back raw responses. Status handling is left to
//! the caller; see [`crate::dispatch`].

use crate::{api::ApiError, configuration::Configuration};
use reqwest::{Client, StatusCode};
use std::collections::HashMap;
use std::time::Duration;
use tracing::{debug, trace};

pub const USER_AGENT: &str = concat!("apictl/", env!("CARGO_PKG_VERSION"));

/// Configuration for HTTP requests with common settings
#[derive(Debug, Clone)]
pub struct HttpRequestConfig {
    /// Default headers to include with all requests
    pub default_headers: HashMap<String, String>,
    /// Request timeout in seconds
    pub timeout: u64,
    /// Accept invalid TLS certificates (self-signed development servers)
    pub insecure: bool,
}

impl Default for HttpRequestConfig {
    fn default() -> Self {
        let mut default_headers = HashMap::new();
        default_headers.insert("Cache-Control".to_string(), "no-cache".to_string());

        Self {
            default_headers,
            timeout: crate::configuration::DEFAULT_HTTP_REQUEST_TIMEOUT,
            insecure: false,
        }
    }
}

impl HttpRequestConfig {
    pub fn from_configuration(configuration: &Configuration, insecure: bool) -> Self {
        Self {
            timeout: configuration.http_request_timeout(),
            insecure,
            ..Self::default()
        }
    }
}

/// Status and body of a completed request.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpResponse {
    pub status: StatusCode,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn new(status: StatusCode, body: Vec<u8>) -> Self {
        Self { status, body }
    }

    /// Status line such as `500 Internal Server Error`.
    pub fn status_line(&self) -> String {
        self.status.to_string()
    }
}

/// HTTP client wrapper with common request handling logic
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
    config: HttpRequestConfig,
}

impl HttpClient {
    /// Create a new HTTP client with the given configuration
    pub fn new(config: HttpRequestConfig) -> Result<Self, ApiError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(config.timeout))
            .danger_accept_invalid_certs(config.insecure)
            .build()?;

        Ok(Self { client, config })
    }

    /// The underlying client, for requests that do not follow the bearer
    /// token pattern (token exchange, client registration).
    pub fn inner(&self) -> &Client {
        &self.client
    }

    /// Issue an authenticated GET and return the response whatever its
    /// status. Only failures that prevent a response (DNS, connection,
    /// timeout) are errors.
    pub async fn get_raw(
        &self,
        url: &str,
        auth_token: &str,
        query: &[(&str, String)],
    ) -> Result<HttpResponse, ApiError> {
        debug!("GET {}", url);
        trace!("Query parameters: {:?}", query);

        let mut request = self.client.get(url).bearer_auth(auth_token);
        if !query.is_empty() {
            request = request.query(query);
        }
        for (key, value) in &self.config.default_headers {
            request = request.header(key, value);
        }

        let response = request.send().await?;
        let status = response.status();
        let body = response.bytes().await?.to_vec();
        trace!("Received {} bytes with status {}", body.len(), status);

        Ok(HttpResponse::new(status, body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_client_config_default() {
        let config = HttpRequestConfig::default();
        assert_eq!(config.timeout, 30);
        assert!(!config.insecure);
        assert_eq!(
            config.default_headers.get("Cache-Control").map(String::as_str),
            Some("no-cache")
        );
    }

    #[test]
    fn test_status_line() {
        let response = HttpResponse::new(StatusCode::INTERNAL_SERVER_ERROR, Vec::new());
        assert_eq!(response.status_line(), "500 Internal Server Error");
        let response = HttpResponse::new(StatusCode::NOT_FOUND, Vec::new());
        assert_eq!(response.status_line(), "404 Not Found");
    }
}
