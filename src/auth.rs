use crate::{
    configuration::EnvironmentEndpoints,
    credentials::Credential,
    http_utils::HttpClient,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Scopes requested with every token. They cover the publisher API
/// operations apictl performs.
pub const OAUTH_SCOPES: &str = "apim:api_view apim:api_create apim:api_manage \
    apim:api_import_export apim:common_operation_policy_view apim:common_operation_policy_manage";

pub const CLIENT_NAME_PREFIX: &str = "apictl_rest_api_client";

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),
    #[error("JSON parsing error: {0}")]
    JsonError(#[from] serde_json::Error),
    #[error("Authentication failed: {0}")]
    AuthFailed(String),
    #[error("Client registration failed: {0}")]
    RegistrationFailed(String),
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub expires_in: u64,
    #[serde(default)]
    pub token_type: String,
    #[serde(default)]
    pub scope: Option<String>,
}

/// Bearer token for one command run. Never written to disk.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken {
    token: String,
    token_type: String,
    expires_in: u64,
}

impl AccessToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            token_type: "Bearer".to_string(),
            expires_in: 0,
        }
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn token_type(&self) -> &str {
        &self.token_type
    }

    /// Lifetime in seconds as reported by the token endpoint.
    pub fn expires_in(&self) -> u64 {
        self.expires_in
    }
}

impl From<TokenResponse> for AccessToken {
    fn from(response: TokenResponse) -> Self {
        Self {
            token: response.access_token,
            token_type: response.token_type,
            expires_in: response.expires_in,
        }
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccessToken")
            .field("token", &"***")
            .field("token_type", &self.token_type)
            .field("expires_in", &self.expires_in)
            .finish()
    }
}

/// OAuth client issued by the dynamic client registration endpoint.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientRegistration {
    pub client_id: String,
    pub client_secret: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ClientRegistrationRequest<'a> {
    callback_url: &'a str,
    client_name: String,
    owner: &'a str,
    grant_type: &'a str,
    saas_app: bool,
}

pub struct AuthClient<'a> {
    http: &'a HttpClient,
    token_url: String,
}

impl<'a> AuthClient<'a> {
    pub fn new(http: &'a HttpClient, endpoints: &EnvironmentEndpoints) -> Self {
        Self {
            http,
            token_url: endpoints.token_url(),
        }
    }

    /// Exchange a stored credential for an access token using the password
    /// grant, authenticating as the registered OAuth client.
    pub async fn get_access_token(
        &self,
        credential: &Credential,
    ) -> Result<AccessToken, AuthError> {
        tracing::debug!("Requesting access token from {}", &self.token_url);
        tracing::debug!("Client ID: {}", &credential.client_id);

        let params = [
            ("grant_type", "password"),
            ("username", credential.username.as_str()),
            ("password", credential.password.as_str()),
            ("scope", OAUTH_SCOPES),
        ];

        let response = self
            .http
            .inner()
            .post(&self.token_url)
            .basic_auth(&credential.client_id, Some(&credential.client_secret))
            .form(&params)
            .send()
            .await?;

        tracing::debug!("Token response status: {}", response.status());

        if response.status().is_success() {
            let token_response = response.json::<TokenResponse>().await?;
            tracing::debug!("Access token received, expires in {}s", token_response.expires_in);
            Ok(token_response.into())
        } else {
            let status = response.status();
            let error_body = match response.text().await {
                Ok(text) => text,
                Err(e) => {
                    tracing::error!("Failed to read error response body: {}", e);
                    "Unable to read error response body".to_string()
                }
            };
            tracing::debug!("Token request failed with status {}: {}", status, &error_body);

            Err(AuthError::AuthFailed(format!(
                "HTTP {} {}",
                status,
                describe_oauth_error(&error_body)
            )))
        }
    }
}

/// Register an OAuth client for `username` with the environment's dynamic
/// client registration endpoint.
pub async fn register_client(
    http: &HttpClient,
    endpoints: &EnvironmentEndpoints,
    username: &str,
    password: &str,
) -> Result<ClientRegistration, AuthError> {
    let url = endpoints.registration_url();
    tracing::debug!("Registering OAuth client at {}", url);

    let request = ClientRegistrationRequest {
        callback_url: "www.google.lk",
        client_name: format!("{}_{}", CLIENT_NAME_PREFIX, username),
        owner: username,
        grant_type: "client_credentials password refresh_token",
        saas_app: true,
    };

    let response = http
        .inner()
        .post(&url)
        .basic_auth(username, Some(password))
        .json(&request)
        .send()
        .await?;

    let status = response.status();
    tracing::debug!("Client registration response status: {}", status);

    if status.is_success() {
        Ok(response.json::<ClientRegistration>().await?)
    } else {
        let body = response.text().await.unwrap_or_default();
        Err(AuthError::RegistrationFailed(format!("HTTP {} {}", status, body)))
    }
}

/// Turn an OAuth error body into a readable message. Bodies that are not
/// OAuth error documents are returned unchanged.
fn describe_oauth_error(error_body: &str) -> String {
    let error_json = match serde_json::from_str::<serde_json::Value>(error_body) {
        Ok(error_json) => error_json,
        Err(json_err) => {
            tracing::warn!("Failed to parse error response as JSON: {}", json_err);
            return error_body.to_string();
        }
    };

    let Some(error_str) = error_json.get("error").and_then(|e| e.as_str()) else {
        return error_body.to_string();
    };

    let error_description = error_json
        .get("error_description")
        .and_then(|d| d.as_str())
        .map(|d| format!(" - {}", d))
        .unwrap_or_default();

    match error_str {
        "invalid_client" => format!(
            "Invalid client credentials{}. Log in to the environment again.",
            error_description
        ),
        "invalid_grant" => format!(
            "Invalid grant{}. The stored username or password is no longer valid.",
            error_description
        ),
        "invalid_scope" => format!(
            "Invalid scope{}. The user may lack the permissions apictl needs.",
            error_description
        ),
        "unauthorized_client" => format!(
            "Unauthorized client{}. The client is not authorized to use the password grant.",
            error_description
        ),
        _ => format!("{}{}", error_str, error_description),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http_utils::HttpRequestConfig;
    use url::Url;
    use wiremock::matchers::{body_string_contains, header_exists, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn credential() -> Credential {
        Credential {
            username: "admin".to_string(),
            password: "admin".to_string(),
            client_id: "cid".to_string(),
            client_secret: "csecret".to_string(),
        }
    }

    fn endpoints(server: &MockServer) -> EnvironmentEndpoints {
        EnvironmentEndpoints::new(Url::parse(&server.uri()).unwrap())
    }

    #[test]
    fn test_describe_invalid_grant() {
        let message = describe_oauth_error(
            r#"{"error":"invalid_grant","error_description":"Authentication failed for admin"}"#,
        );
        assert!(message.starts_with("Invalid grant - Authentication failed for admin"));
    }

    #[test]
    fn test_describe_non_json_body() {
        assert_eq!(describe_oauth_error("<html>oops</html>"), "<html>oops</html>");
    }

    #[test]
    fn test_access_token_debug_hides_token() {
        let token = AccessToken::new("very-secret-token");
        assert!(!format!("{:?}", token).contains("very-secret-token"));
    }

    #[tokio::test]
    async fn test_get_access_token_success() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/oauth2/token"))
            .and(header_exists("authorization"))
            .and(body_string_contains("grant_type=password"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "access_token": "token-123",
                "token_type": "Bearer",
                "expires_in": 3600,
                "scope": "apim:api_view"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let http = HttpClient::new(HttpRequestConfig::default()).unwrap();
        let token = AuthClient::new(&http, &endpoints(&server))
            .get_access_token(&credential())
            .await
            .unwrap();

        assert_eq!(token.token(), "token-123");
        assert_eq!(token.token_type(), "Bearer");
        assert_eq!(token.expires_in(), 3600);
    }

    #[tokio::test]
    async fn test_get_access_token_failure() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/oauth2/token"))
            .respond_with(
                ResponseTemplate::new(401)
                    .set_body_string(r#"{"error":"invalid_client","error_description":"bad"}"#),
            )
            .mount(&server)
            .await;

        let http = HttpClient::new(HttpRequestConfig::default()).unwrap();
        let error = AuthClient::new(&http, &endpoints(&server))
            .get_access_token(&credential())
            .await
            .unwrap_err();

        let message = error.to_string();
        assert!(message.contains("401 Unauthorized"));
        assert!(message.contains("Invalid client credentials - bad"));
    }

    #[tokio::test]
    async fn test_register_client() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/client-registration/v0.17/register"))
            .and(body_string_contains("\"owner\":\"admin\""))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "clientId": "issued-id",
                "clientSecret": "issued-secret",
                "clientName": "apictl_rest_api_client_admin"
            })))
            .mount(&server)
            .await;

        let http = HttpClient::new(HttpRequestConfig::default()).unwrap();
        let registration = register_client(&http, &endpoints(&server), "admin", "admin")
            .await
            .unwrap();
        assert_eq!(registration.client_id, "issued-id");
        assert_eq!(registration.client_secret, "issued-secret");
    }
}
