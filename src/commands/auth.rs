//! Authentication command definitions.
//!
//! This module defines the `login` and `logout` commands.

use crate::commands::params::{
    environment_name_parameter, password_parameter, username_parameter, COMMAND_LOGIN,
    COMMAND_LOGOUT,
};
use clap::Command;

/// Create the `login` command.
pub fn login_command() -> Command {
    Command::new(COMMAND_LOGIN)
        .about("Login to an API Manager environment")
        .long_about(
            "Login to an API Manager environment. An OAuth client is registered for the user \
             and stored together with the user's credentials",
        )
        .after_help("Examples:\n  apictl login dev -u admin\n  apictl login dev -u admin -p admin")
        .arg(environment_name_parameter())
        .arg(username_parameter())
        .arg(password_parameter())
}

/// Create the `logout` command.
pub fn logout_command() -> Command {
    Command::new(COMMAND_LOGOUT)
        .about("Logout from an API Manager environment")
        .after_help("Examples:\n  apictl logout dev")
        .arg(environment_name_parameter())
}
