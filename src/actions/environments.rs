use std::io::Write;

use clap::ArgMatches;
use tracing::{trace, warn};

use crate::{
    actions::CommandOutcome,
    commands::params::{
        PARAMETER_APIM, PARAMETER_ENVIRONMENT_NAME, PARAMETER_FORMAT, PARAMETER_PUBLISHER,
        PARAMETER_REGISTRATION, PARAMETER_TOKEN,
    },
    configuration::{parse_endpoint, EnvironmentEndpoints, EnvironmentList},
    context::ExecutionContext,
    error::CliError,
    format::Formattable,
};

/// Flags of `add env`.
#[derive(Debug, Clone, PartialEq)]
pub struct AddEnvironmentOptions {
    pub name: String,
    pub endpoints: EnvironmentEndpoints,
}

impl AddEnvironmentOptions {
    pub fn from_matches(sub_matches: &ArgMatches) -> Result<Self, CliError> {
        let name = environment_name(sub_matches)?;
        let apim = sub_matches
            .get_one::<String>(PARAMETER_APIM)
            .ok_or_else(|| CliError::MissingRequiredArgument(PARAMETER_APIM.to_string()))?;

        let optional = |parameter: &str| -> Result<_, CliError> {
            match sub_matches.get_one::<String>(parameter) {
                Some(url) => Ok(Some(parse_endpoint(url)?)),
                None => Ok(None),
            }
        };

        let mut endpoints = EnvironmentEndpoints::new(parse_endpoint(apim)?);
        endpoints.publisher_endpoint = optional(PARAMETER_PUBLISHER)?;
        endpoints.token_endpoint = optional(PARAMETER_TOKEN)?;
        endpoints.registration_endpoint = optional(PARAMETER_REGISTRATION)?;

        Ok(Self { name, endpoints })
    }
}

pub fn environment_name(sub_matches: &ArgMatches) -> Result<String, CliError> {
    sub_matches
        .get_one::<String>(PARAMETER_ENVIRONMENT_NAME)
        .cloned()
        .ok_or_else(|| CliError::MissingRequiredArgument(PARAMETER_ENVIRONMENT_NAME.to_string()))
}

/// `add env`
pub fn add_environment(
    context: &mut ExecutionContext,
    options: &AddEnvironmentOptions,
    out: &mut dyn Write,
) -> Result<CommandOutcome, CliError> {
    trace!("Adding environment {}...", options.name);

    context
        .configuration_mut()
        .add_environment(&options.name, options.endpoints.clone())?;
    context.save_configuration()?;

    writeln!(out, "Successfully added environment '{}'", options.name)?;
    Ok(CommandOutcome::Completed)
}

/// `remove env`. The stored login for the environment goes with it.
pub fn remove_environment(
    context: &mut ExecutionContext,
    name: &str,
    out: &mut dyn Write,
) -> Result<CommandOutcome, CliError> {
    trace!("Removing environment {}...", name);

    context.configuration_mut().remove_environment(name)?;
    context.save_configuration()?;

    match context.credential_store().erase(name) {
        Ok(true) => trace!("Removed stored credentials of {}", name),
        Ok(false) => {}
        Err(e) => warn!("Failed to remove stored credentials of {}: {}", name, e),
    }

    writeln!(out, "Successfully removed environment '{}'", name)?;
    Ok(CommandOutcome::Completed)
}

/// `get envs`
pub fn list_environments(
    context: &ExecutionContext,
    sub_matches: &ArgMatches,
    out: &mut dyn Write,
) -> Result<CommandOutcome, CliError> {
    let format = sub_matches.get_one::<String>(PARAMETER_FORMAT);
    let environments = EnvironmentList::from(context.configuration());

    writeln!(out, "{}", environments.format(format.map(String::as_str))?)?;
    Ok(CommandOutcome::Completed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        configuration::{Configuration, ConfigurationError},
        credentials::{Credential, CredentialStore, FileCredentialStore},
        http_utils::{HttpClient, HttpRequestConfig},
    };
    use tempfile::TempDir;

    fn context(directory: &TempDir) -> ExecutionContext {
        let store = FileCredentialStore::new(directory.path().join("keys.json"));
        ExecutionContext::new(
            Configuration::default(),
            directory.path().join("main_config.yaml"),
            Box::new(store),
            HttpClient::new(HttpRequestConfig::default()).unwrap(),
        )
    }

    fn options(name: &str) -> AddEnvironmentOptions {
        AddEnvironmentOptions {
            name: name.to_string(),
            endpoints: EnvironmentEndpoints::new(parse_endpoint("https://localhost:9443").unwrap()),
        }
    }

    #[test]
    fn test_add_environment_is_saved() {
        let directory = tempfile::tempdir().unwrap();
        let mut context = context(&directory);
        let mut out = Vec::new();

        add_environment(&mut context, &options("dev"), &mut out).unwrap();

        let saved = Configuration::load_from_file(context.configuration_path()).unwrap();
        assert!(saved.environment("dev").is_ok());
        assert_eq!(String::from_utf8(out).unwrap(), "Successfully added environment 'dev'\n");
    }

    #[test]
    fn test_add_duplicate_environment_fails() {
        let directory = tempfile::tempdir().unwrap();
        let mut context = context(&directory);
        let mut out = Vec::new();

        add_environment(&mut context, &options("dev"), &mut out).unwrap();
        let error = add_environment(&mut context, &options("dev"), &mut out).unwrap_err();
        assert!(matches!(
            error,
            CliError::ConfigurationError(ConfigurationError::EnvironmentAlreadyExists(_))
        ));
    }

    #[test]
    fn test_remove_environment_erases_login() {
        let directory = tempfile::tempdir().unwrap();
        let mut context = context(&directory);
        let mut out = Vec::new();

        add_environment(&mut context, &options("dev"), &mut out).unwrap();
        let credential = Credential {
            username: "admin".to_string(),
            password: "admin".to_string(),
            client_id: "id".to_string(),
            client_secret: "secret".to_string(),
        };
        context.credential_store().set("dev", &credential).unwrap();

        remove_environment(&mut context, "dev", &mut out).unwrap();

        assert!(context.configuration().environment("dev").is_err());
        assert_eq!(context.credential_store().get("dev").unwrap(), None);
    }

    #[test]
    fn test_remove_unknown_environment_fails() {
        let directory = tempfile::tempdir().unwrap();
        let mut context = context(&directory);
        let mut out = Vec::new();

        let error = remove_environment(&mut context, "prod", &mut out).unwrap_err();
        assert_eq!(error.exit_code(), crate::exit_codes::ApictlExitCode::NotFound);
    }
}
