//! Process exit codes for apictl.
//!
//! Scripts driving apictl can tell a usage mistake from a failed login or an
//! error reported by the remote platform by looking at the exit status.

/// Exit codes returned by the `apictl` binary.
///
/// Values follow BSD sysexits.h where one fits:
/// - 0: Success
/// - 64-78: Standard exit codes from sysexits.h
/// - 100+: apictl specific codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApictlExitCode {
    /// Success (0)
    Success = 0,

    /// Command line usage error (64), including invalid flag values
    UsageError = 64,

    /// Data format error (65), e.g. an unparsable list payload or bad template
    DataError = 65,

    /// Addressee unknown (67), e.g. an environment that was never added
    NotFound = 67,

    /// Internal software error (70)
    SoftwareError = 70,

    /// Cannot create or write an output file (73)
    CantCreate = 73,

    /// Configuration error (78)
    ConfigError = 78,

    /// Authentication error (100): missing credentials or failed token exchange
    AuthError = 100,

    /// Network error (101): the request never produced an HTTP status
    NetworkError = 101,

    /// API error (102): the platform answered with a non-200 status
    ApiError = 102,
}

impl ApictlExitCode {
    /// Convert to numeric exit code
    pub fn code(&self) -> i32 {
        *self as i32
    }

    /// Get descriptive message for the exit code
    pub fn message(&self) -> &'static str {
        match self {
            ApictlExitCode::Success => "Success",
            ApictlExitCode::UsageError => "Command line usage error",
            ApictlExitCode::DataError => "Data format error",
            ApictlExitCode::NotFound => "Resource not found",
            ApictlExitCode::SoftwareError => "Internal software error",
            ApictlExitCode::CantCreate => "Cannot create output file",
            ApictlExitCode::ConfigError => "Configuration error",
            ApictlExitCode::AuthError => "Authentication error",
            ApictlExitCode::NetworkError => "Network communication error",
            ApictlExitCode::ApiError => "Remote API error",
        }
    }
}

impl From<ApictlExitCode> for i32 {
    fn from(code: ApictlExitCode) -> Self {
        code.code()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_code_values() {
        assert_eq!(ApictlExitCode::Success.code(), 0);
        assert_eq!(ApictlExitCode::UsageError.code(), 64);
        assert_eq!(ApictlExitCode::AuthError.code(), 100);
        assert_eq!(i32::from(ApictlExitCode::ApiError), 102);
    }
}
