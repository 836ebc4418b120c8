//! Publisher REST API client.
//!
//! Each call issues exactly one request and returns the raw response; the
//! status is interpreted by the caller.

use crate::{
    auth::AccessToken,
    configuration::EnvironmentEndpoints,
    http_utils::{HttpClient, HttpResponse},
    model::PolicyIdentifier,
};
use tracing::trace;

pub const EXPORT_FORMAT: &str = "YAML";

/// Error emitted by the publisher API client
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),
}

pub struct PublisherApiClient {
    http: HttpClient,
    base_url: String,
}

impl PublisherApiClient {
    pub fn new(http: HttpClient, endpoints: &EnvironmentEndpoints) -> Self {
        Self {
            http,
            base_url: endpoints.publisher_url(),
        }
    }

    /// `GET /operation-policies/export?name=..&version=..&format=YAML`
    pub async fn export_api_policy(
        &self,
        token: &AccessToken,
        policy: &PolicyIdentifier,
    ) -> Result<HttpResponse, ApiError> {
        trace!("Exporting API policy {}...", policy);
        let url = format!("{}/operation-policies/export", self.base_url);
        let query = [
            ("name", policy.name().to_string()),
            ("version", policy.version().to_string()),
            ("format", EXPORT_FORMAT.to_string()),
        ];
        self.http.get_raw(&url, token.token(), &query).await
    }

    /// `GET /operation-policies[?limit=..]`. `None` leaves the page size to
    /// the server.
    pub async fn list_api_policies(
        &self,
        token: &AccessToken,
        limit: Option<i64>,
    ) -> Result<HttpResponse, ApiError> {
        trace!("Listing API policies (limit: {:?})...", limit);
        let url = format!("{}/operation-policies", self.base_url);
        let query: Vec<(&str, String)> = limit
            .map(|limit| vec![("limit", limit.to_string())])
            .unwrap_or_default();
        self.http.get_raw(&url, token.token(), &query).await
    }
}
