use std::io::Write;

use clap::ArgMatches;
use inquire::Password;
use tracing::{debug, trace};

use crate::{
    actions::{environments::environment_name, CommandOutcome},
    auth::{register_client, AuthClient},
    commands::params::{PARAMETER_PASSWORD, PARAMETER_USERNAME},
    context::ExecutionContext,
    credentials::Credential,
    error::CliError,
};

/// Flags of `login`.
#[derive(Clone, PartialEq, Eq)]
pub struct LoginOptions {
    pub environment: String,
    pub username: String,
    /// Prompted for when `None`.
    pub password: Option<String>,
}

impl std::fmt::Debug for LoginOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginOptions")
            .field("environment", &self.environment)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "***"))
            .finish()
    }
}

impl LoginOptions {
    pub fn from_matches(sub_matches: &ArgMatches) -> Result<Self, CliError> {
        Ok(Self {
            environment: environment_name(sub_matches)?,
            username: sub_matches
                .get_one::<String>(PARAMETER_USERNAME)
                .cloned()
                .ok_or_else(|| CliError::MissingRequiredArgument(PARAMETER_USERNAME.to_string()))?,
            password: sub_matches.get_one::<String>(PARAMETER_PASSWORD).cloned(),
        })
    }

    fn password(&self) -> Result<String, CliError> {
        match &self.password {
            Some(password) => Ok(password.clone()),
            None => Ok(Password::new("Enter password:")
                .without_confirmation()
                .prompt()?),
        }
    }
}

/// `login`: register an OAuth client for the user, check that the
/// credentials are accepted by the token endpoint and store them.
pub async fn login(
    context: &ExecutionContext,
    options: &LoginOptions,
    out: &mut dyn Write,
) -> Result<CommandOutcome, CliError> {
    trace!("Logging in to {} as {}...", options.environment, options.username);

    let endpoints = context.configuration().environment(&options.environment)?.clone();
    let password = options.password()?;
    let login_error = |source| CliError::LoginError {
        environment: options.environment.clone(),
        source,
    };

    let client = register_client(context.http(), &endpoints, &options.username, &password)
        .await
        .map_err(login_error)?;
    debug!("Registered OAuth client {}", client.client_id);

    let credential = Credential {
        username: options.username.clone(),
        password,
        client_id: client.client_id,
        client_secret: client.client_secret,
    };
    AuthClient::new(context.http(), &endpoints)
        .get_access_token(&credential)
        .await
        .map_err(login_error)?;

    context.credential_store().set(&options.environment, &credential)?;

    writeln!(out, "Logged into {} environment", options.environment)?;
    Ok(CommandOutcome::Completed)
}

/// `logout`: forget the stored login of an environment.
pub fn logout(
    context: &ExecutionContext,
    environment: &str,
    out: &mut dyn Write,
) -> Result<CommandOutcome, CliError> {
    if !context.credential_store().erase(environment)? {
        debug!("No stored login for {}", environment);
    }

    writeln!(out, "Logged out from {} environment", environment)?;
    Ok(CommandOutcome::Completed)
}
