//! Interactive prompts using dialoguer

use anyhow::Result;
use dialoguer::{theme::ColorfulTheme, Confirm, Input, Password};
use indicatif::ProgressBar;

use super::wizard::{StepInput, WizardPrompter};
use crate::flows::{FlowError, PasswordResetStep};
use crate::utils::{
    create_spinner, finish_with_failure, finish_with_success, print_error, print_info,
    print_step_header,
};
use crate::wizard::WizardStep;

/// Prompt user to confirm proceeding with an action
pub fn confirm_step(message: &str) -> Result<bool> {
    let confirmed = Confirm::with_theme(&ColorfulTheme::default())
        .with_prompt(message)
        .default(true)
        .interact()?;
    Ok(confirmed)
}

/// Terminal prompter for the password-reset wizard
pub struct DialoguerPrompter {
    theme: ColorfulTheme,
    spinner: Option<ProgressBar>,
}

impl Default for DialoguerPrompter {
    fn default() -> Self {
        Self::new()
    }
}

impl DialoguerPrompter {
    pub fn new() -> Self {
        Self {
            theme: ColorfulTheme::default(),
            spinner: None,
        }
    }
}

impl WizardPrompter for DialoguerPrompter {
    fn step_started(&mut self, step: PasswordResetStep, progress: (usize, usize)) {
        print_step_header(progress.0, progress.1, step.title());
        if progress.0 > 1 {
            print_info("Leave the field blank to go back");
        } else {
            print_info("Leave the field blank to cancel");
        }
    }

    fn email(&mut self, current: Option<&str>) -> Result<StepInput<String>> {
        let mut input = Input::<String>::with_theme(&self.theme)
            .with_prompt("Account email")
            .allow_empty(true);
        if let Some(current) = current {
            input = input.with_initial_text(current);
        }
        let email = input.interact_text()?;
        Ok(if email.trim().is_empty() {
            StepInput::Back
        } else {
            StepInput::Submit(email)
        })
    }

    fn code(&mut self, email: &str) -> Result<StepInput<String>> {
        let code = Input::<String>::with_theme(&self.theme)
            .with_prompt(format!("Code sent to {}", email))
            .allow_empty(true)
            .interact_text()?;
        Ok(if code.trim().is_empty() {
            StepInput::Back
        } else {
            StepInput::Submit(code)
        })
    }

    fn new_password(&mut self) -> Result<StepInput<(String, String)>> {
        let password = Password::with_theme(&self.theme)
            .with_prompt("New password")
            .allow_empty_password(true)
            .interact()?;
        if password.is_empty() {
            return Ok(StepInput::Back);
        }
        let confirmation = Password::with_theme(&self.theme)
            .with_prompt("Confirm new password")
            .allow_empty_password(true)
            .interact()?;
        Ok(StepInput::Submit((password, confirmation)))
    }

    fn begin_request(&mut self, message: &str) {
        self.spinner = Some(create_spinner(message));
    }

    fn end_request(&mut self, succeeded: bool) {
        if let Some(spinner) = self.spinner.take() {
            if succeeded {
                finish_with_success(&spinner, "Done");
            } else {
                finish_with_failure(&spinner);
            }
        }
    }

    fn step_failed(&mut self, error: &FlowError) -> Result<bool> {
        print_error(&error.to_string());
        if reprompt_without_asking(error) {
            Ok(true)
        } else {
            confirm_step("Try again?")
        }
    }
}

/// Errors caused by what the user typed go straight back to the prompt.
/// Outages and server errors ask first, since retrying may not help.
fn reprompt_without_asking(error: &FlowError) -> bool {
    match error {
        FlowError::Validation(_) => true,
        FlowError::Service(service) => service.is_client_error(),
        _ => false,
    }
}
