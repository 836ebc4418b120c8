use thiserror::Error;

use crate::{
    api::ApiError, auth::AuthError, configuration::ConfigurationError,
    credentials::CredentialError, exit_codes::ApictlExitCode, export::ExportError,
    format::FormattingError,
};

/// Error types that can occur during CLI command execution
#[derive(Debug, Error)]
pub enum CliError {
    /// Error when an unsupported or undefined subcommand is encountered
    #[error("Undefined or unsupported subcommand: {0}")]
    UnsupportedSubcommand(String),
    /// Error when a required command-line argument is missing
    #[error("Missing required argument: {0}")]
    MissingRequiredArgument(String),
    /// `--limit` is not an integer
    #[error("Error converting limit value: {0}")]
    InvalidLimit(String),
    /// Error related to configuration loading or management
    #[error("Configuration error: {0}")]
    ConfigurationError(#[from] ConfigurationError),
    /// No usable login for the environment
    #[error("Error getting credentials: {0}")]
    CredentialError(#[from] CredentialError),
    /// The token endpoint refused or could not be reached
    #[error("Error getting OAuth tokens while {operation}: {source}")]
    OAuthTokenError {
        operation: &'static str,
        source: AuthError,
    },
    /// The API request did not produce an HTTP response
    #[error("Error while {operation}: {source}")]
    TransportError {
        operation: &'static str,
        source: ApiError,
    },
    #[error("Error logging in to environment '{environment}': {source}")]
    LoginError {
        environment: String,
        source: AuthError,
    },
    #[error("Failed to initialize the HTTP client: {0}")]
    HttpClientError(#[source] ApiError),
    /// A 200 response whose body is not what the command expects
    #[error("Unexpected response payload: {0}")]
    InvalidResponse(#[source] serde_json::Error),
    /// Error related to data formatting
    #[error("Formatting error: {0}")]
    FormattingError(#[from] FormattingError),
    #[error("{0}")]
    ExportError(#[from] ExportError),
    #[error("Prompt error: {0}")]
    PromptError(#[from] inquire::InquireError),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl CliError {
    /// Get the appropriate exit code for this error
    pub fn exit_code(&self) -> ApictlExitCode {
        match self {
            CliError::UnsupportedSubcommand(_) => ApictlExitCode::UsageError,
            CliError::MissingRequiredArgument(_) => ApictlExitCode::UsageError,
            CliError::InvalidLimit(_) => ApictlExitCode::UsageError,
            CliError::ConfigurationError(ConfigurationError::EnvironmentNotFound(_)) => {
                ApictlExitCode::NotFound
            }
            CliError::ConfigurationError(ConfigurationError::InvalidEndpoint { .. }) => {
                ApictlExitCode::UsageError
            }
            CliError::ConfigurationError(_) => ApictlExitCode::ConfigError,
            CliError::CredentialError(_) => ApictlExitCode::AuthError,
            CliError::OAuthTokenError { .. } => ApictlExitCode::AuthError,
            CliError::LoginError { .. } => ApictlExitCode::AuthError,
            CliError::TransportError { .. } => ApictlExitCode::NetworkError,
            CliError::InvalidResponse(_) => ApictlExitCode::DataError,
            CliError::FormattingError(_) => ApictlExitCode::DataError,
            CliError::ExportError(_) => ApictlExitCode::CantCreate,
            CliError::PromptError(_) => ApictlExitCode::UsageError,
            CliError::HttpClientError(_) | CliError::IoError(_) => ApictlExitCode::SoftwareError,
        }
    }
}
