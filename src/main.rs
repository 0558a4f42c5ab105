//! InfraSee CLI
//!
//! Hosts the password-reset wizard and the dashboard's helper services
//! from a terminal.

use anyhow::{Context, Result};
use clap::Parser;

use infrasee::cli::commands::{run_filters, run_reset_password, run_routes, run_sms};
use infrasee::cli::{Cli, Commands};
use infrasee::config::Config;
use infrasee::logging::init_logging;

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose)?;

    let config = Config::discover(cli.config.as_deref()).context("Failed to load configuration")?;

    match &cli.command {
        Commands::ResetPassword { email } => run_reset_password(&config, email.as_deref()),
        Commands::Sms { to, message, json } => run_sms(&config, to, message, *json),
        Commands::Filters { column, json } => run_filters(&config, column, *json),
        Commands::Routes {
            path,
            role,
            anonymous,
        } => run_routes(&config, path.as_deref(), *role, *anonymous),
    }
}
