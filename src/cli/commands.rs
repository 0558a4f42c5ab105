//! Subcommand implementations

use anyhow::{bail, Context, Result};
use comfy_table::{presets::UTF8_FULL_CONDENSED, Attribute, Cell, Color, Table};
use console::style;

use super::args::effective_auth;
use super::prompts::DialoguerPrompter;
use super::wizard::{run_wizard, WizardOutcome};
use crate::auth::{AccessDecision, AuthState, Role, RouteGuard};
use crate::config::Config;
use crate::flows::PasswordResetFlow;
use crate::services::{
    FilterOption, FilterOptionsSource, HttpFilterOptions, HttpIdentityService, HttpSmsGateway,
    SmsGateway, SmsMessage,
};
use crate::utils::{
    create_spinner, finish_with_failure, finish_with_success, print_banner, print_field,
    print_info, print_success, KEY, PHONE, SHIELD,
};

const RESET_PASSWORD_PATH: &str = "/reset-password";

/// `infrasee reset-password`
pub fn run_reset_password(config: &Config, email: Option<&str>) -> Result<()> {
    let guard = RouteGuard::dashboard();
    if guard.check(RESET_PASSWORD_PATH, &config.auth) != AccessDecision::Allow {
        bail!("Password reset is not available for the current session");
    }

    print_banner(env!("CARGO_PKG_VERSION"), &format!("{}Password reset", KEY));

    let identity = HttpIdentityService::from_config(&config.identity);
    let mut flow = PasswordResetFlow::new(identity);
    let mut prompter = DialoguerPrompter::new();

    match run_wizard(&mut flow, &mut prompter, email)? {
        WizardOutcome::Completed { email } => {
            println!();
            print_success(&format!("Password updated for {}", email));
        }
        WizardOutcome::Abandoned => {
            println!("Cancelled by user.");
        }
    }
    Ok(())
}

/// `infrasee sms`
pub fn run_sms(config: &Config, to: &str, message: &str, json: bool) -> Result<()> {
    let message = SmsMessage::new(to, message)?;
    let gateway = HttpSmsGateway::from_config(&config.sms)?;

    let spinner = (!json).then(|| create_spinner(&format!("{}Sending to {}...", PHONE, message.to())));
    let result = gateway.send(&message);
    if let Some(spinner) = &spinner {
        match &result {
            Ok(_) => finish_with_success(spinner, "SMS accepted by gateway"),
            Err(_) => finish_with_failure(spinner),
        }
    }
    let receipt = result.context("SMS dispatch failed")?;

    if json {
        println!("{}", serde_json::to_string_pretty(&receipt)?);
    } else {
        print_field("Message id", &receipt.message_id);
        print_field("Status", &receipt.status);
        print_field("Sent at", &receipt.sent_at.to_rfc3339());
    }
    Ok(())
}

/// `infrasee filters`
pub fn run_filters(config: &Config, column: &str, json: bool) -> Result<()> {
    let source = HttpFilterOptions::from_config(&config.filters);
    let options = source
        .fetch_options(column)
        .with_context(|| format!("Failed to load filter options for '{}'", column))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&options)?);
        return Ok(());
    }

    if options.is_empty() {
        print_info(&format!("No filter options for '{}'", column));
        return Ok(());
    }
    println!("{}", filter_table(&options));
    Ok(())
}

fn filter_table(options: &[FilterOption]) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(vec![
        Cell::new("Label").add_attribute(Attribute::Bold),
        Cell::new("Value").add_attribute(Attribute::Bold),
    ]);
    for option in options {
        table.add_row(vec![Cell::new(&option.label), Cell::new(&option.value)]);
    }
    table
}

/// `infrasee routes`
pub fn run_routes(
    config: &Config,
    path: Option<&str>,
    role: Option<Role>,
    anonymous: bool,
) -> Result<()> {
    let guard = RouteGuard::dashboard();
    let auth = effective_auth(&config.auth, role, anonymous);

    println!("    {}Acting as {}", SHIELD, describe_auth(&auth));

    if let Some(path) = path {
        let decision = guard.check(path, &auth);
        println!("{} {} ({})", path, decision_label(decision), decision.status());
        if !decision.is_allowed() {
            bail!("Access to {} denied: {}", path, decision);
        }
        return Ok(());
    }

    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(vec![
        Cell::new("Route").add_attribute(Attribute::Bold),
        Cell::new("Page").add_attribute(Attribute::Bold),
        Cell::new("Requires").add_attribute(Attribute::Bold),
        Cell::new("Decision").add_attribute(Attribute::Bold),
    ]);
    for route in guard.routes() {
        let decision = guard.check(route.pattern.trim_end_matches("/*"), &auth);
        table.add_row(vec![
            Cell::new(route.pattern),
            Cell::new(route.title),
            Cell::new(route.access),
            Cell::new(decision).fg(if decision.is_allowed() {
                Color::Green
            } else {
                Color::Red
            }),
        ]);
    }
    println!("{table}");
    Ok(())
}

fn describe_auth(auth: &AuthState) -> String {
    match (auth.authenticated, auth.role) {
        (false, _) => "a signed-out visitor".to_string(),
        (true, None) => "a signed-in user".to_string(),
        (true, Some(role)) => format!("a signed-in {}", role),
    }
}

fn decision_label(decision: AccessDecision) -> String {
    match decision {
        AccessDecision::Allow => style(decision.as_str()).green().bold().to_string(),
        _ => style(decision.as_str()).red().bold().to_string(),
    }
}
