//! A command line client for an API management platform.
//!
//! `apictl` exports API policies from a named environment to local archives
//! and lists the API policies an environment holds. Environments, logins and
//! output templates are managed locally.
//!
//! # Modules
//!
//! - `actions`: Command implementations
//! - `api`: Publisher REST API client
//! - `auth`: OAuth client registration and token exchange
//! - `commands`: CLI command definitions
//! - `configuration`: Environments and settings stored in `main_config.yaml`
//! - `credentials`: Stored logins (file or OS keyring)
//! - `dispatch`: Classification of API responses
//! - `export`: Layout of exported artifacts on disk
//! - `format` and `template`: List output

pub mod actions;
pub mod api;
pub mod auth;
pub mod commands;
pub mod configuration;
pub mod context;
pub mod credentials;
pub mod dispatch;
pub mod error;
pub mod exit_codes;
pub mod export;
pub mod format;
pub mod http_utils;
pub mod keyring;
pub mod model;
pub mod template;
