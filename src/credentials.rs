//! Stored environment logins.
//!
//! A [`Credential`] is written by `apictl login` and read back by every
//! command that talks to an environment. Where it is kept depends on the
//! `credential_store` setting: a `keys.json` file next to the configuration
//! (the default) or the operating system keyring.

use crate::{
    configuration::{Configuration, ConfigurationError, CredentialStoreKind},
    keyring::{KeyringCredentialStore, KeyringError},
};
use base64::{engine::general_purpose, Engine};
use serde::{Deserialize, Serialize};
use std::{
    collections::BTreeMap,
    fmt, fs,
    path::{Path, PathBuf},
};
use thiserror::Error;
use tracing::{debug, trace};

pub const CREDENTIALS_FILE_NAME: &str = "keys.json";

#[derive(Debug, Error)]
pub enum CredentialError {
    #[error("no login found for environment '{0}'. Run 'apictl login {0}' first")]
    NotLoggedIn(String),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
    #[error("corrupted credential entry: {0}")]
    CorruptedEntry(String),
    #[error("{0}")]
    KeyringError(#[from] KeyringError),
    #[error("{0}")]
    ConfigurationError(#[from] ConfigurationError),
}

/// Login for one environment: the user plus the OAuth client registered
/// for that user at login time.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Credential {
    pub username: String,
    pub password: String,
    pub client_id: String,
    pub client_secret: String,
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("username", &self.username)
            .field("password", &"***")
            .field("client_id", &self.client_id)
            .field("client_secret", &"***")
            .finish()
    }
}

/// Storage backend for credentials, keyed by environment name.
pub trait CredentialStore {
    fn get(&self, environment: &str) -> Result<Option<Credential>, CredentialError>;

    fn set(&self, environment: &str, credential: &Credential) -> Result<(), CredentialError>;

    /// Remove the entry. Returns `false` when there was nothing to remove.
    fn erase(&self, environment: &str) -> Result<bool, CredentialError>;
}

/// Look up the login for `environment`, failing when there is none.
pub fn resolve(
    store: &dyn CredentialStore,
    environment: &str,
) -> Result<Credential, CredentialError> {
    trace!("Resolving credentials for environment {}...", environment);
    store
        .get(environment)?
        .ok_or_else(|| CredentialError::NotLoggedIn(environment.to_string()))
}

/// Open the store selected in the configuration.
pub fn open_store(
    configuration: &Configuration,
) -> Result<Box<dyn CredentialStore>, CredentialError> {
    debug!("Using the {} credential store", configuration.credential_store());
    match configuration.credential_store() {
        CredentialStoreKind::File => Ok(Box::new(FileCredentialStore::try_default()?)),
        CredentialStoreKind::Keyring => Ok(Box::new(KeyringCredentialStore::default())),
    }
}

/// On-disk form of a credential; every value is base64 encoded.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct EncodedCredential {
    username: String,
    password: String,
    client_id: String,
    client_secret: String,
}

impl From<&Credential> for EncodedCredential {
    fn from(credential: &Credential) -> Self {
        let encode = |value: &str| general_purpose::STANDARD.encode(value);
        EncodedCredential {
            username: encode(&credential.username),
            password: encode(&credential.password),
            client_id: encode(&credential.client_id),
            client_secret: encode(&credential.client_secret),
        }
    }
}

impl TryFrom<&EncodedCredential> for Credential {
    type Error = CredentialError;

    fn try_from(encoded: &EncodedCredential) -> Result<Self, Self::Error> {
        let decode = |field: &str, value: &str| -> Result<String, CredentialError> {
            let bytes = general_purpose::STANDARD
                .decode(value)
                .map_err(|e| CredentialError::CorruptedEntry(format!("{}: {}", field, e)))?;
            String::from_utf8(bytes)
                .map_err(|e| CredentialError::CorruptedEntry(format!("{}: {}", field, e)))
        };
        Ok(Credential {
            username: decode("username", &encoded.username)?,
            password: decode("password", &encoded.password)?,
            client_id: decode("clientId", &encoded.client_id)?,
            client_secret: decode("clientSecret", &encoded.client_secret)?,
        })
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct CredentialsFile {
    #[serde(default)]
    environments: BTreeMap<String, EncodedCredential>,
}

/// Credentials kept in `keys.json`.
pub struct FileCredentialStore {
    file_path: PathBuf,
}

impl FileCredentialStore {
    pub fn new(file_path: PathBuf) -> Self {
        Self { file_path }
    }

    /// Store in the default configuration directory.
    pub fn try_default() -> Result<Self, CredentialError> {
        let mut file_path = Configuration::get_default_configuration_dir()?;
        file_path.push(CREDENTIALS_FILE_NAME);
        Ok(Self::new(file_path))
    }

    pub fn file_path(&self) -> &Path {
        &self.file_path
    }

    fn load(&self) -> Result<CredentialsFile, CredentialError> {
        if !self.file_path.exists() {
            return Ok(CredentialsFile::default());
        }
        let content = fs::read_to_string(&self.file_path)?;
        Ok(serde_json::from_str(&content)?)
    }

    fn save(&self, credentials: &CredentialsFile) -> Result<(), CredentialError> {
        if let Some(parent) = self.file_path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(credentials)?;
        fs::write(&self.file_path, content)?;
        Ok(())
    }
}

impl CredentialStore for FileCredentialStore {
    fn get(&self, environment: &str) -> Result<Option<Credential>, CredentialError> {
        self.load()?
            .environments
            .get(environment)
            .map(Credential::try_from)
            .transpose()
    }

    fn set(&self, environment: &str, credential: &Credential) -> Result<(), CredentialError> {
        let mut credentials = self.load()?;
        credentials
            .environments
            .insert(environment.to_string(), EncodedCredential::from(credential));
        self.save(&credentials)
    }

    fn erase(&self, environment: &str) -> Result<bool, CredentialError> {
        let mut credentials = self.load()?;
        if credentials.environments.remove(environment).is_none() {
            return Ok(false);
        }
        self.save(&credentials)?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn credential() -> Credential {
        Credential {
            username: "admin".to_string(),
            password: "s3cret".to_string(),
            client_id: "client".to_string(),
            client_secret: "client-secret".to_string(),
        }
    }

    #[test]
    fn test_file_store_set_get_erase() {
        let dir = tempdir().unwrap();
        let store = FileCredentialStore::new(dir.path().join("keys.json"));

        assert!(store.get("dev").unwrap().is_none());
        store.set("dev", &credential()).unwrap();
        assert_eq!(store.get("dev").unwrap(), Some(credential()));

        assert!(store.erase("dev").unwrap());
        assert!(!store.erase("dev").unwrap());
        assert!(store.get("dev").unwrap().is_none());
    }

    #[test]
    fn test_file_store_encodes_values() {
        let dir = tempdir().unwrap();
        let store = FileCredentialStore::new(dir.path().join("keys.json"));
        store.set("dev", &credential()).unwrap();

        let raw = fs::read_to_string(store.file_path()).unwrap();
        assert!(!raw.contains("s3cret"));
        assert!(raw.contains(&general_purpose::STANDARD.encode("s3cret")));
    }

    #[test]
    fn test_resolve_missing_login() {
        let dir = tempdir().unwrap();
        let store = FileCredentialStore::new(dir.path().join("keys.json"));
        let error = resolve(&store, "prod").unwrap_err();
        assert!(matches!(error, CredentialError::NotLoggedIn(ref env) if env == "prod"));
        assert!(error.to_string().contains("apictl login prod"));
    }

    #[test]
    fn test_corrupted_entry() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("keys.json");
        fs::write(
            &path,
            concat!(
                r#"{"environments":{"dev":"#,
                r#"{"username":"!!","password":"","clientId":"","clientSecret":""}}}"#
            ),
        )
        .unwrap();
        let store = FileCredentialStore::new(path);
        assert!(matches!(store.get("dev"), Err(CredentialError::CorruptedEntry(_))));
    }

    #[test]
    fn test_debug_hides_secrets() {
        let output = format!("{:?}", credential());
        assert!(output.contains("admin"));
        assert!(!output.contains("s3cret"));
        assert!(!output.contains("client-secret"));
    }
}
