//! Helpers shared by the integration tests: an isolated configuration
//! directory and a mocked API manager.

#![allow(dead_code)]

use apictl::{
    configuration::{parse_endpoint, Configuration, EnvironmentEndpoints, CONFIG_DIR_ENV_VAR},
    credentials::{Credential, CredentialStore, FileCredentialStore, CREDENTIALS_FILE_NAME},
};
use assert_cmd::Command;
use serde_json::json;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use wiremock::{
    matchers::{method, path},
    Mock, MockServer, ResponseTemplate,
};

pub const ENVIRONMENT: &str = "dev";
pub const ACCESS_TOKEN: &str = "test-access-token";
/// Nothing listens here, so requests fail before any response.
pub const UNREACHABLE_ENDPOINT: &str = "http://127.0.0.1:1/";

/// A configuration directory with `dev` pointing at `server`.
pub struct TestEnvironment {
    pub directory: TempDir,
}

impl TestEnvironment {
    pub fn new(server: &MockServer, logged_in: bool) -> Self {
        Self::with_endpoints(
            EnvironmentEndpoints::new(parse_endpoint(&server.uri()).unwrap()),
            logged_in,
        )
    }

    /// Logged in, with the token endpoint on `server` and the publisher API
    /// on `publisher`.
    pub fn with_publisher(server: &MockServer, publisher: &str) -> Self {
        let mut endpoints = EnvironmentEndpoints::new(parse_endpoint(&server.uri()).unwrap());
        endpoints.publisher_endpoint = Some(parse_endpoint(publisher).unwrap());
        Self::with_endpoints(endpoints, true)
    }

    pub fn with_endpoints(endpoints: EnvironmentEndpoints, logged_in: bool) -> Self {
        let directory = tempfile::tempdir().unwrap();

        let mut configuration = Configuration::default();
        configuration.add_environment(ENVIRONMENT, endpoints).unwrap();
        configuration.set_export_directory(directory.path().join("exported"));
        configuration
            .save(&directory.path().join("main_config.yaml"))
            .unwrap();

        if logged_in {
            FileCredentialStore::new(directory.path().join(CREDENTIALS_FILE_NAME))
                .set(ENVIRONMENT, &credential())
                .unwrap();
        }

        Self { directory }
    }

    /// An empty configuration directory.
    pub fn empty() -> Self {
        Self {
            directory: tempfile::tempdir().unwrap(),
        }
    }

    pub fn path(&self) -> &Path {
        self.directory.path()
    }

    pub fn exported_api_policy(&self, file_name: &str) -> PathBuf {
        self.path()
            .join("exported")
            .join("policies")
            .join("api-policies")
            .join(file_name)
    }

    pub fn command(&self) -> Command {
        let mut cmd = Command::cargo_bin("apictl").unwrap();
        cmd.env(CONFIG_DIR_ENV_VAR, self.path()).env_remove("RUST_LOG");
        cmd
    }
}

pub fn credential() -> Credential {
    Credential {
        username: "admin".to_string(),
        password: "admin".to_string(),
        client_id: "client-id".to_string(),
        client_secret: "client-secret".to_string(),
    }
}

pub async fn mount_token_endpoint(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/oauth2/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": ACCESS_TOKEN,
            "token_type": "Bearer",
            "expires_in": 3600
        })))
        .mount(server)
        .await;
}
