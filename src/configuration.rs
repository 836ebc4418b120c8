//! Configuration management.
//!
//! The configuration lives in `main_config.yaml` inside the configuration
//! directory (`$APICTL_CONFIG_DIR`, or `~/.wso2apictl`). It holds the known
//! environments and a few client settings.

use crate::format::Formattable;
use dirs::home_dir;
use serde::{Deserialize, Serialize};
use std::{
    collections::BTreeMap,
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};
use strum::{Display, EnumString, VariantNames};
use tracing::debug;
use url::Url;

pub const CONFIG_DIR_ENV_VAR: &str = "APICTL_CONFIG_DIR";
pub const DEFAULT_CONFIGURATION_DIR_NAME: &str = ".wso2apictl";
pub const DEFAULT_CONFIGURATION_FILE_NAME: &str = "main_config.yaml";
pub const DEFAULT_EXPORT_DIR_NAME: &str = "exported";
pub const DEFAULT_HTTP_REQUEST_TIMEOUT: u64 = 30;

const PUBLISHER_API_PATH: &str = "api/am/publisher/v4";
const TOKEN_PATH: &str = "oauth2/token";
const REGISTRATION_PATH: &str = "client-registration/v0.17/register";

#[derive(Debug, thiserror::Error)]
pub enum ConfigurationError {
    #[error("failed to resolve the configuration directory")]
    FailedToFindConfigurationDirectory,
    #[error("failed to load configuration data, because of: {cause}")]
    FailedToLoadData { cause: Box<dyn std::error::Error> },
    #[error("failed to write configuration data to file, because of: {cause}")]
    FailedToWriteData { cause: Box<dyn std::error::Error> },
    #[error("environment '{0}' was not found. Add it with 'apictl add env'")]
    EnvironmentNotFound(String),
    #[error("environment '{0}' already exists")]
    EnvironmentAlreadyExists(String),
    #[error("invalid endpoint URL '{url}': {cause}")]
    InvalidEndpoint { url: String, cause: url::ParseError },
}

/// Where login credentials are kept.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    VariantNames,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum CredentialStoreKind {
    /// `keys.json` in the configuration directory
    #[default]
    File,
    /// The operating system keyring
    Keyring,
}

/// Endpoints of one environment. Only the APIM endpoint is mandatory; the
/// others are derived from it when absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnvironmentEndpoints {
    pub apim_endpoint: Url,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publisher_endpoint: Option<Url>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token_endpoint: Option<Url>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub registration_endpoint: Option<Url>,
}

impl EnvironmentEndpoints {
    pub fn new(apim_endpoint: Url) -> Self {
        Self {
            apim_endpoint,
            publisher_endpoint: None,
            token_endpoint: None,
            registration_endpoint: None,
        }
    }

    fn derive(&self, path: &str) -> String {
        format!("{}/{}", self.apim_endpoint.as_str().trim_end_matches('/'), path)
    }

    fn explicit_or_derived(&self, explicit: &Option<Url>, path: &str) -> String {
        match explicit {
            Some(url) => url.as_str().trim_end_matches('/').to_string(),
            None => self.derive(path),
        }
    }

    /// Base URL of the publisher REST API, without a trailing slash.
    pub fn publisher_url(&self) -> String {
        self.explicit_or_derived(&self.publisher_endpoint, PUBLISHER_API_PATH)
    }

    pub fn token_url(&self) -> String {
        self.explicit_or_derived(&self.token_endpoint, TOKEN_PATH)
    }

    pub fn registration_url(&self) -> String {
        self.explicit_or_derived(&self.registration_endpoint, REGISTRATION_PATH)
    }
}

/// Parse a user supplied endpoint.
pub fn parse_endpoint(url: &str) -> Result<Url, ConfigurationError> {
    Url::parse(url).map_err(|cause| ConfigurationError::InvalidEndpoint {
        url: url.to_string(),
        cause,
    })
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Configuration {
    #[serde(default)]
    environments: BTreeMap<String, EnvironmentEndpoints>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    export_directory: Option<PathBuf>,
    #[serde(default = "default_http_request_timeout")]
    http_request_timeout: u64,
    #[serde(default)]
    credential_store: CredentialStoreKind,
}

fn default_http_request_timeout() -> u64 {
    DEFAULT_HTTP_REQUEST_TIMEOUT
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            environments: BTreeMap::new(),
            export_directory: None,
            http_request_timeout: DEFAULT_HTTP_REQUEST_TIMEOUT,
            credential_store: CredentialStoreKind::default(),
        }
    }
}

impl Configuration {
    /// The configuration directory. `APICTL_CONFIG_DIR` takes precedence over
    /// the default location in the home directory.
    pub fn get_default_configuration_dir() -> Result<PathBuf, ConfigurationError> {
        if let Ok(config_dir) = std::env::var(CONFIG_DIR_ENV_VAR) {
            if !config_dir.is_empty() {
                return Ok(PathBuf::from(config_dir));
            }
        }

        match home_dir() {
            Some(mut path) => {
                path.push(DEFAULT_CONFIGURATION_DIR_NAME);
                Ok(path)
            }
            None => Err(ConfigurationError::FailedToFindConfigurationDirectory),
        }
    }

    pub fn get_default_configuration_file_path() -> Result<PathBuf, ConfigurationError> {
        let mut path = Self::get_default_configuration_dir()?;
        path.push(DEFAULT_CONFIGURATION_FILE_NAME);
        Ok(path)
    }

    /// Load the default configuration, creating it on first use.
    pub fn load_or_create_default() -> Result<Configuration, ConfigurationError> {
        let path = Self::get_default_configuration_file_path()?;
        debug!("Loading configuration from {}...", path.display());

        if !path.exists() {
            debug!("Configuration file not found, creating default configuration");
            let configuration = Configuration::default();
            configuration.save(&path)?;
            return Ok(configuration);
        }

        Self::load_from_file(&path)
    }

    pub fn load_from_file(path: &Path) -> Result<Configuration, ConfigurationError> {
        let content = fs::read_to_string(path)
            .map_err(|cause| ConfigurationError::FailedToLoadData { cause: Box::new(cause) })?;
        serde_yaml::from_str(&content)
            .map_err(|cause| ConfigurationError::FailedToLoadData { cause: Box::new(cause) })
    }

    pub fn write(&self, writer: Box<dyn Write>) -> Result<(), ConfigurationError> {
        serde_yaml::to_writer(writer, self)
            .map_err(|e| ConfigurationError::FailedToWriteData { cause: Box::new(e) })
    }

    pub fn save(&self, path: &Path) -> Result<(), ConfigurationError> {
        match path.parent() {
            Some(directory) => fs::create_dir_all(directory)
                .map_err(|_| ConfigurationError::FailedToFindConfigurationDirectory)?,
            None => return Err(ConfigurationError::FailedToFindConfigurationDirectory),
        }

        let file = File::create(path)
            .map_err(|e| ConfigurationError::FailedToWriteData { cause: Box::new(e) })?;
        self.write(Box::new(file))
    }

    pub fn environment(&self, name: &str) -> Result<&EnvironmentEndpoints, ConfigurationError> {
        self.environments
            .get(name)
            .ok_or_else(|| ConfigurationError::EnvironmentNotFound(name.to_string()))
    }

    pub fn environments(&self) -> &BTreeMap<String, EnvironmentEndpoints> {
        &self.environments
    }

    pub fn add_environment(
        &mut self,
        name: &str,
        endpoints: EnvironmentEndpoints,
    ) -> Result<(), ConfigurationError> {
        if self.environments.contains_key(name) {
            return Err(ConfigurationError::EnvironmentAlreadyExists(name.to_string()));
        }
        self.environments.insert(name.to_string(), endpoints);
        Ok(())
    }

    pub fn remove_environment(
        &mut self,
        name: &str,
    ) -> Result<EnvironmentEndpoints, ConfigurationError> {
        self.environments
            .remove(name)
            .ok_or_else(|| ConfigurationError::EnvironmentNotFound(name.to_string()))
    }

    /// Root directory for exported artifacts.
    pub fn export_directory(&self) -> Result<PathBuf, ConfigurationError> {
        match &self.export_directory {
            Some(directory) => Ok(directory.clone()),
            None => {
                let mut directory = Self::get_default_configuration_dir()?;
                directory.push(DEFAULT_EXPORT_DIR_NAME);
                Ok(directory)
            }
        }
    }

    pub fn set_export_directory(&mut self, directory: PathBuf) {
        self.export_directory = Some(directory);
    }

    pub fn http_request_timeout(&self) -> u64 {
        self.http_request_timeout
    }

    pub fn credential_store(&self) -> CredentialStoreKind {
        self.credential_store
    }
}

/// One row of `get envs`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnvironmentRow {
    pub name: String,
    pub apim_endpoint: String,
    pub publisher_endpoint: String,
    pub token_endpoint: String,
    pub registration_endpoint: String,
}

pub struct EnvironmentList(Vec<EnvironmentRow>);

impl From<&Configuration> for EnvironmentList {
    fn from(configuration: &Configuration) -> Self {
        EnvironmentList(
            configuration
                .environments
                .iter()
                .map(|(name, endpoints)| EnvironmentRow {
                    name: name.clone(),
                    apim_endpoint: endpoints
                        .apim_endpoint
                        .as_str()
                        .trim_end_matches('/')
                        .to_string(),
                    publisher_endpoint: endpoints.publisher_url(),
                    token_endpoint: endpoints.token_url(),
                    registration_endpoint: endpoints.registration_url(),
                })
                .collect(),
        )
    }
}

impl Formattable for EnvironmentList {
    const DEFAULT_TABLE_FORMAT: &'static str =
        "table {{.Name}}\t{{.ApimEndpoint}}\t{{.PublisherEndpoint}}\t{{.TokenEndpoint}}";
    type Row = EnvironmentRow;

    fn rows(&self) -> &[EnvironmentRow] {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn endpoints(url: &str) -> EnvironmentEndpoints {
        EnvironmentEndpoints::new(Url::parse(url).unwrap())
    }

    #[test]
    fn test_derived_endpoints() {
        let env = endpoints("https://localhost:9443/");
        assert_eq!(env.publisher_url(), "https://localhost:9443/api/am/publisher/v4");
        assert_eq!(env.token_url(), "https://localhost:9443/oauth2/token");
        assert_eq!(
            env.registration_url(),
            "https://localhost:9443/client-registration/v0.17/register"
        );
    }

    #[test]
    fn test_explicit_endpoints_win() {
        let mut env = endpoints("https://localhost:9443");
        env.token_endpoint = Some(Url::parse("https://sts.example.com/token/").unwrap());
        assert_eq!(env.token_url(), "https://sts.example.com/token");
        assert_eq!(env.publisher_url(), "https://localhost:9443/api/am/publisher/v4");
    }

    #[test]
    fn test_add_and_remove_environment() {
        let mut configuration = Configuration::default();
        configuration
            .add_environment("dev", endpoints("https://dev.example.com"))
            .unwrap();

        assert!(matches!(
            configuration.add_environment("dev", endpoints("https://other.example.com")),
            Err(ConfigurationError::EnvironmentAlreadyExists(name)) if name == "dev"
        ));
        assert!(configuration.environment("dev").is_ok());

        configuration.remove_environment("dev").unwrap();
        assert!(matches!(
            configuration.environment("dev"),
            Err(ConfigurationError::EnvironmentNotFound(_))
        ));
        assert!(configuration.remove_environment("dev").is_err());
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join(DEFAULT_CONFIGURATION_FILE_NAME);

        let mut configuration = Configuration::default();
        configuration
            .add_environment("prod", endpoints("https://prod.example.com"))
            .unwrap();
        configuration.set_export_directory(dir.path().join("out"));
        configuration.save(&path).unwrap();

        let loaded = Configuration::load_from_file(&path).unwrap();
        assert_eq!(loaded, configuration);
        assert_eq!(loaded.export_directory().unwrap(), dir.path().join("out"));
    }

    #[test]
    fn test_minimal_yaml_gets_defaults() {
        let yaml = "environments:\n  dev:\n    apim_endpoint: https://localhost:9443\n";
        let configuration: Configuration = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(configuration.http_request_timeout(), DEFAULT_HTTP_REQUEST_TIMEOUT);
        assert_eq!(configuration.credential_store(), CredentialStoreKind::File);
        assert!(configuration.environment("dev").is_ok());
    }

    #[test]
    fn test_credential_store_kind_names() {
        assert_eq!(CredentialStoreKind::VARIANTS, &["file", "keyring"]);
        let yaml = "credential_store: keyring\n";
        let configuration: Configuration = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(configuration.credential_store(), CredentialStoreKind::Keyring);
    }

    #[test]
    fn test_environment_list_default_table() {
        let mut configuration = Configuration::default();
        configuration
            .add_environment("dev", endpoints("https://dev.example.com"))
            .unwrap();
        let output = EnvironmentList::from(&configuration).format(None).unwrap();
        let lines: Vec<&str> = output.lines().collect();
        assert!(lines[0].starts_with("NAME"));
        assert!(lines[0].contains("APIM ENDPOINT"));
        assert!(lines[1].starts_with("dev"));
        assert!(lines[1].contains("https://dev.example.com/api/am/publisher/v4"));
    }
}
