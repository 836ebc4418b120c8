//! Writing exported artifacts to the export directory.

use crate::model::PolicyIdentifier;
use std::{
    fs,
    path::{Path, PathBuf},
};
use thiserror::Error;
use tracing::debug;

pub const EXPORTED_POLICIES_DIR_NAME: &str = "policies";
pub const EXPORTED_API_POLICIES_DIR_NAME: &str = "api-policies";
pub const EXPORTED_ARCHIVE_EXTENSION: &str = "zip";

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to create export directory {path}: {source}")]
    CreateDirectory {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to write {path}: {source}")]
    WriteFile {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// `<export-root>/policies/api-policies`
pub fn api_policies_export_directory(export_root: &Path) -> PathBuf {
    export_root
        .join(EXPORTED_POLICIES_DIR_NAME)
        .join(EXPORTED_API_POLICIES_DIR_NAME)
}

/// `<name>_<version>.zip`
pub fn api_policy_file_name(policy: &PolicyIdentifier) -> String {
    format!(
        "{}_{}.{}",
        policy.name(),
        policy.version(),
        EXPORTED_ARCHIVE_EXTENSION
    )
}

/// Write `bytes` to `directory/file_name`, creating missing directories and
/// replacing an existing file.
pub fn write_file(directory: &Path, file_name: &str, bytes: &[u8]) -> Result<PathBuf, ExportError> {
    fs::create_dir_all(directory).map_err(|source| ExportError::CreateDirectory {
        path: directory.to_path_buf(),
        source,
    })?;

    let path = directory.join(file_name);
    fs::write(&path, bytes).map_err(|source| ExportError::WriteFile {
        path: path.clone(),
        source,
    })?;
    debug!("Wrote {} bytes to {}", bytes.len(), path.display());

    Ok(path)
}

/// Persist an exported API policy archive and return where it went.
pub fn write_api_policy_to_file(
    directory: &Path,
    policy: &PolicyIdentifier,
    body: &[u8],
) -> Result<PathBuf, ExportError> {
    write_file(directory, &api_policy_file_name(policy), body)
}
