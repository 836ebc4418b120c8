use std::io::Write;

use clap::ArgMatches;
use tracing::{debug, trace};

use crate::{
    actions::CommandOutcome,
    api::PublisherApiClient,
    auth::{AccessToken, AuthClient},
    commands::params::{
        PARAMETER_ALL, PARAMETER_ENVIRONMENT, PARAMETER_FORMAT, PARAMETER_LIMIT, PARAMETER_NAME,
    },
    configuration::EnvironmentEndpoints,
    context::ExecutionContext,
    credentials,
    dispatch::{write_body, ResponseOutcome},
    error::CliError,
    export::{api_policies_export_directory, write_api_policy_to_file},
    format::Formattable,
    model::{ApiPolicyList, PolicyIdentifier, DEFAULT_API_POLICY_VERSION},
};

const EXPORTING_POLICIES: &str = "exporting API Policies";
const EXPORTING: &str = "exporting";
const GETTING_POLICIES: &str = "getting API Policies";

/// Flags of `export policy api`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportApiPolicyOptions {
    pub name: String,
    pub environment: String,
    pub version: String,
}

impl ExportApiPolicyOptions {
    pub fn from_matches(sub_matches: &ArgMatches) -> Result<Self, CliError> {
        Ok(Self {
            name: required_string(sub_matches, PARAMETER_NAME)?,
            environment: required_string(sub_matches, PARAMETER_ENVIRONMENT)?,
            version: DEFAULT_API_POLICY_VERSION.to_string(),
        })
    }

    pub fn policy(&self) -> PolicyIdentifier {
        PolicyIdentifier::new(&self.name, &self.version)
    }
}

/// Flags of `get policies api`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListApiPoliciesOptions {
    pub environment: String,
    /// `None` when `--all` was given.
    pub limit: Option<i64>,
    pub format: Option<String>,
}

impl ListApiPoliciesOptions {
    pub fn from_matches(sub_matches: &ArgMatches) -> Result<Self, CliError> {
        let limit = if sub_matches.get_flag(PARAMETER_ALL) {
            None
        } else {
            let raw = required_string(sub_matches, PARAMETER_LIMIT)?;
            let limit = raw
                .trim()
                .parse::<i64>()
                .map_err(|e| CliError::InvalidLimit(format!("'{}' {}", raw, e)))?;
            Some(limit)
        };

        Ok(Self {
            environment: required_string(sub_matches, PARAMETER_ENVIRONMENT)?,
            limit,
            format: sub_matches.get_one::<String>(PARAMETER_FORMAT).cloned(),
        })
    }
}

fn required_string(sub_matches: &ArgMatches, name: &str) -> Result<String, CliError> {
    sub_matches
        .get_one::<String>(name)
        .cloned()
        .ok_or_else(|| CliError::MissingRequiredArgument(name.to_string()))
}

/// Look up the environment and its login, then obtain a token. Nothing is
/// sent to the publisher API unless this succeeds.
async fn authorize(
    context: &ExecutionContext,
    environment: &str,
    operation: &'static str,
) -> Result<(EnvironmentEndpoints, AccessToken), CliError> {
    let endpoints = context.configuration().environment(environment)?.clone();
    let credential = credentials::resolve(context.credential_store(), environment)?;

    let token = AuthClient::new(context.http(), &endpoints)
        .get_access_token(&credential)
        .await
        .map_err(|source| CliError::OAuthTokenError { operation, source })?;

    Ok((endpoints, token))
}

/// `export policy api`: download one API policy archive into the export
/// directory.
pub async fn export_api_policy(
    context: &ExecutionContext,
    options: &ExportApiPolicyOptions,
    out: &mut dyn Write,
) -> Result<CommandOutcome, CliError> {
    trace!("Exporting API policy {} from {}...", options.name, options.environment);

    let (endpoints, token) = authorize(context, &options.environment, EXPORTING_POLICIES).await?;
    let api = PublisherApiClient::new(context.http().clone(), &endpoints);
    let policy = options.policy();

    let response = api
        .export_api_policy(&token, &policy)
        .await
        .map_err(|source| CliError::TransportError {
            operation: EXPORTING,
            source,
        })?;
    debug!("Response status: {}", response.status_line());
    let status_line = response.status_line();

    match ResponseOutcome::from(response) {
        ResponseOutcome::Success(body) => {
            let export_root = context.configuration().export_directory()?;
            let directory = api_policies_export_directory(&export_root);
            let path = write_api_policy_to_file(&directory, &policy, &body)?;
            writeln!(out, "Successfully exported API Policy!")?;
            writeln!(out, "Find the exported API Policies at {}", path.display())?;
            Ok(CommandOutcome::Completed)
        }
        ResponseOutcome::ServerError(body) => {
            write_body(out, &body)?;
            Ok(CommandOutcome::ApiFailure)
        }
        ResponseOutcome::OtherError { body, .. } => {
            writeln!(out, "Error exporting API Policies: {}", status_line)?;
            write_body(out, &body)?;
            Ok(CommandOutcome::ApiFailure)
        }
    }
}

/// `get policies api`: print the API policies of an environment.
pub async fn list_api_policies(
    context: &ExecutionContext,
    options: &ListApiPoliciesOptions,
    out: &mut dyn Write,
) -> Result<CommandOutcome, CliError> {
    trace!("Listing API policies of {}...", options.environment);

    let (endpoints, token) = authorize(context, &options.environment, GETTING_POLICIES).await?;

    if matches!(options.limit, Some(limit) if limit < 0) {
        writeln!(out, "Limit value should be greater than 0")?;
    }

    let api = PublisherApiClient::new(context.http().clone(), &endpoints);

    let response = api
        .list_api_policies(&token, options.limit)
        .await
        .map_err(|source| CliError::TransportError {
            operation: GETTING_POLICIES,
            source,
        })?;
    debug!("Response status: {}", response.status_line());
    let status_line = response.status_line();

    match ResponseOutcome::from(response) {
        ResponseOutcome::Success(body) => {
            let policies = ApiPolicyList::from_slice(&body).map_err(CliError::InvalidResponse)?;
            trace!("Received {} API policies", policies.count);
            writeln!(out, "{}", policies.format(options.format.as_deref())?)?;
            Ok(CommandOutcome::Completed)
        }
        ResponseOutcome::ServerError(body) | ResponseOutcome::OtherError { body, .. } => {
            writeln!(out, "Error getting API Policies: {}", status_line)?;
            write_body(out, &body)?;
            Ok(CommandOutcome::ApiFailure)
        }
    }
}
