use crate::credentials::{Credential, CredentialError, CredentialStore};
use keyring::Entry;
use thiserror::Error;
use tracing::trace;

pub const KEYRING_SERVICE: &str = "apictl";

#[derive(Debug, Error)]
pub enum KeyringError {
    #[error("keyring error: {0}")]
    KeyringAccessError(#[from] KeyringErrorInternal),
}

impl From<keyring::Error> for KeyringError {
    fn from(error: keyring::Error) -> Self {
        KeyringError::KeyringAccessError(KeyringErrorInternal::CannotAccessKeyringEntity(error))
    }
}

#[derive(Debug, Error)]
pub enum KeyringErrorInternal {
    #[error("{0}")]
    CannotAccessKeyringEntity(#[from] keyring::Error),
}

impl From<keyring::Error> for CredentialError {
    fn from(error: keyring::Error) -> Self {
        CredentialError::KeyringError(KeyringError::from(error))
    }
}

/// Credentials kept in the operating system keyring, one JSON encoded entry
/// per environment.
#[derive(Default)]
pub struct KeyringCredentialStore {}

impl KeyringCredentialStore {
    fn entry(&self, environment: &str) -> Result<Entry, CredentialError> {
        Ok(Entry::new(KEYRING_SERVICE, environment)?)
    }
}

impl CredentialStore for KeyringCredentialStore {
    fn get(&self, environment: &str) -> Result<Option<Credential>, CredentialError> {
        trace!("Reading keyring entry for environment {}", environment);
        match self.entry(environment)?.get_password() {
            Ok(value) => Ok(Some(serde_json::from_str(&value)?)),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&self, environment: &str, credential: &Credential) -> Result<(), CredentialError> {
        let value = serde_json::to_string(credential)?;
        self.entry(environment)?.set_password(&value)?;
        Ok(())
    }

    fn erase(&self, environment: &str) -> Result<bool, CredentialError> {
        match self.entry(environment)?.delete_password() {
            Ok(()) => Ok(true),
            Err(keyring::Error::NoEntry) => Ok(false),
            Err(e) => Err(e.into()),
        }
    }
}
