//! Command-line argument definitions using clap

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::auth::{AuthState, Role};

/// InfraSee - admin dashboard companion: password reset, SMS alerts, filters, routes
#[derive(Parser, Debug)]
#[command(name = "infrasee")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file (TOML). Defaults to <config dir>/infrasee/config.toml when present.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace). RUST_LOG overrides.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Reset an account password through the interactive wizard
    ResetPassword {
        /// Pre-fill the account email on the first step
        #[arg(short, long)]
        email: Option<String>,
    },

    /// Send an SMS notification through the configured gateway
    Sms {
        /// Destination phone number (e.g., +15550109999)
        #[arg(long)]
        to: String,

        /// Message text
        #[arg(short, long)]
        message: String,

        /// Print the gateway receipt as JSON
        #[arg(long, default_value = "false")]
        json: bool,
    },

    /// List the filter options the server offers for a data table column
    Filters {
        /// Column name (e.g., status, region)
        column: String,

        /// Print the options as JSON
        #[arg(long, default_value = "false")]
        json: bool,
    },

    /// Show which dashboard routes the current user may open
    Routes {
        /// Check a single path instead of listing the route table.
        /// Exits non-zero when access is not allowed.
        #[arg(short, long)]
        path: Option<String>,

        /// Act as a signed-in user with this role
        #[arg(short, long, value_enum, conflicts_with = "anonymous")]
        role: Option<Role>,

        /// Act as a signed-out visitor
        #[arg(long, default_value = "false")]
        anonymous: bool,
    },
}

/// Resolve the auth state for `routes`: flags win over the configured flag
pub fn effective_auth(configured: &AuthState, role: Option<Role>, anonymous: bool) -> AuthState {
    if anonymous {
        AuthState::anonymous()
    } else if let Some(role) = role {
        AuthState::signed_in(Some(role))
    } else {
        configured.clone()
    }
}
