//! Shared command parameters for all CLI commands.
//!
//! Command and parameter names live here together with the constructors for
//! arguments used by more than one command.

use crate::model::DEFAULT_POLICIES_DISPLAY_LIMIT;
use clap::{builder::NonEmptyStringValueParser, Arg, ArgAction};

// Verbs
pub const COMMAND_EXPORT: &str = "export";
pub const COMMAND_GET: &str = "get";
pub const COMMAND_ADD: &str = "add";
pub const COMMAND_REMOVE: &str = "remove";
pub const COMMAND_LOGIN: &str = "login";
pub const COMMAND_LOGOUT: &str = "logout";

// Nouns
pub const COMMAND_POLICY: &str = "policy";
pub const COMMAND_POLICIES: &str = "policies";
pub const COMMAND_API: &str = "api";
pub const COMMAND_ENV: &str = "env";
pub const COMMAND_ENVS: &str = "envs";

// Global parameters
pub const PARAMETER_VERBOSE: &str = "verbose";
pub const PARAMETER_INSECURE: &str = "insecure";

// Parameter names
pub const PARAMETER_NAME: &str = "name";
pub const PARAMETER_ENVIRONMENT: &str = "environment";
pub const PARAMETER_LIMIT: &str = "limit";
pub const PARAMETER_ALL: &str = "all";
pub const PARAMETER_FORMAT: &str = "format";
pub const PARAMETER_ENVIRONMENT_NAME: &str = "environment-name";
pub const PARAMETER_APIM: &str = "apim";
pub const PARAMETER_PUBLISHER: &str = "publisher";
pub const PARAMETER_TOKEN: &str = "token";
pub const PARAMETER_REGISTRATION: &str = "registration";
pub const PARAMETER_USERNAME: &str = "username";
pub const PARAMETER_PASSWORD: &str = "password";

pub fn verbose_parameter() -> Arg {
    Arg::new(PARAMETER_VERBOSE)
        .long(PARAMETER_VERBOSE)
        .action(ArgAction::SetTrue)
        .global(true)
        .help("Enable verbose mode")
}

pub fn insecure_parameter() -> Arg {
    Arg::new(PARAMETER_INSECURE)
        .short('k')
        .long(PARAMETER_INSECURE)
        .action(ArgAction::SetTrue)
        .global(true)
        .help("Allow connections to SSL endpoints without certs")
}

/// `--environment/-e`, mandatory wherever it is used.
pub fn environment_parameter(help: &'static str) -> Arg {
    Arg::new(PARAMETER_ENVIRONMENT)
        .short('e')
        .long(PARAMETER_ENVIRONMENT)
        .num_args(1)
        .required(true)
        .value_parser(NonEmptyStringValueParser::new())
        .help(help)
}

/// Positional environment name used by `add env`, `remove env`, `login`
/// and `logout`.
pub fn environment_name_parameter() -> Arg {
    Arg::new(PARAMETER_ENVIRONMENT_NAME)
        .value_name("ENVIRONMENT")
        .required(true)
        .value_parser(NonEmptyStringValueParser::new())
        .help("Name of the environment")
}

pub fn policy_name_parameter() -> Arg {
    Arg::new(PARAMETER_NAME)
        .short('n')
        .long(PARAMETER_NAME)
        .num_args(1)
        .required(true)
        .value_parser(NonEmptyStringValueParser::new())
        .help("Name of the API Policy to be exported")
}

/// `--format`, a Go-style output template.
pub fn format_parameter(help: &'static str) -> Arg {
    Arg::new(PARAMETER_FORMAT)
        .long(PARAMETER_FORMAT)
        .num_args(1)
        .required(false)
        .help(help)
}

/// `--limit/-l`. Kept as a string so an invalid value is reported by the
/// command with its own message; negative numbers are let through.
pub fn limit_parameter(help: &'static str) -> Arg {
    Arg::new(PARAMETER_LIMIT)
        .short('l')
        .long(PARAMETER_LIMIT)
        .num_args(1)
        .allow_negative_numbers(true)
        .default_value(DEFAULT_POLICIES_DISPLAY_LIMIT.to_string())
        .conflicts_with(PARAMETER_ALL)
        .help(help)
}

pub fn all_parameter(help: &'static str) -> Arg {
    Arg::new(PARAMETER_ALL)
        .long(PARAMETER_ALL)
        .action(ArgAction::SetTrue)
        .help(help)
}

pub fn endpoint_parameter(name: &'static str, required: bool, help: &'static str) -> Arg {
    Arg::new(name)
        .long(name)
        .num_args(1)
        .required(required)
        .value_parser(NonEmptyStringValueParser::new())
        .help(help)
}

pub fn username_parameter() -> Arg {
    Arg::new(PARAMETER_USERNAME)
        .short('u')
        .long(PARAMETER_USERNAME)
        .num_args(1)
        .required(true)
        .value_parser(NonEmptyStringValueParser::new())
        .help("Username for login")
}

pub fn password_parameter() -> Arg {
    Arg::new(PARAMETER_PASSWORD)
        .short('p')
        .long(PARAMETER_PASSWORD)
        .num_args(1)
        .required(false)
        .help("Password for login. Prompted for when omitted")
}
