//! Execution context shared by the CLI commands.
//!
//! Every command needs the loaded configuration, a credential store and an
//! HTTP client configured from it. The context is built once per process
//! and passed to the action explicitly.

use std::path::{Path, PathBuf};

use crate::{
    configuration::Configuration,
    credentials::{self, CredentialStore},
    error::CliError,
    http_utils::{HttpClient, HttpRequestConfig},
};

/// Execution context containing common resources needed by CLI commands.
pub struct ExecutionContext {
    configuration: Configuration,
    configuration_path: PathBuf,
    credential_store: Box<dyn CredentialStore>,
    http: HttpClient,
}

impl ExecutionContext {
    pub fn new(
        configuration: Configuration,
        configuration_path: PathBuf,
        credential_store: Box<dyn CredentialStore>,
        http: HttpClient,
    ) -> Self {
        Self {
            configuration,
            configuration_path,
            credential_store,
            http,
        }
    }

    /// Build the context from the default configuration file, creating it
    /// on first use.
    ///
    /// # Arguments
    ///
    /// * `insecure` - accept invalid TLS certificates for this run
    pub fn load_default(insecure: bool) -> Result<Self, CliError> {
        let configuration_path = Configuration::get_default_configuration_file_path()?;
        let configuration = Configuration::load_or_create_default()?;
        let credential_store = credentials::open_store(&configuration)?;
        let http = HttpClient::new(HttpRequestConfig::from_configuration(&configuration, insecure))
            .map_err(CliError::HttpClientError)?;

        Ok(Self::new(configuration, configuration_path, credential_store, http))
    }

    pub fn configuration(&self) -> &Configuration {
        &self.configuration
    }

    pub fn configuration_mut(&mut self) -> &mut Configuration {
        &mut self.configuration
    }

    pub fn configuration_path(&self) -> &Path {
        &self.configuration_path
    }

    /// Persist the (possibly modified) configuration to the file it was
    /// loaded from.
    pub fn save_configuration(&self) -> Result<(), CliError> {
        self.configuration.save(&self.configuration_path)?;
        Ok(())
    }

    pub fn credential_store(&self) -> &dyn CredentialStore {
        self.credential_store.as_ref()
    }

    pub fn http(&self) -> &HttpClient {
        &self.http
    }
}
