//! Interactive driver for the password-reset wizard
//!
//! The loop asks the prompter for the current step's input, submits it to
//! the flow, and lets the flow decide whether the session moves. Input comes
//! through [`WizardPrompter`] so the loop can be driven by a script in tests.
//!
//! # Flow
//!
//! 1. Request Reset: account email, identity provider sends a code; blank leaves
//! 2. Verify Code: code from the email, blank goes back
//! 3. Set New Password: password plus confirmation, blank goes back
//!
//! Input is checked locally before any remote call starts. A failed step
//! stays put, and the prompter decides whether to try it again.

use anyhow::Result;
use chrono::Utc;
use tracing::{debug, info};

use crate::flows::{FlowError, PasswordResetFlow, PasswordResetStep};
use crate::services::IdentityService;

/// What the user entered on a step that allows going back
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepInput<T> {
    Submit(T),
    Back,
}

/// How a wizard run ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WizardOutcome {
    /// The new password was accepted for this account
    Completed { email: String },
    /// The user gave up before finishing
    Abandoned,
}

/// Source of user input for the wizard loop
pub trait WizardPrompter {
    /// Called each time a step is (re)entered
    fn step_started(&mut self, step: PasswordResetStep, progress: (usize, usize));

    /// Account email; `current` is the previously entered value, if any.
    /// `Back` on the first step leaves the wizard.
    fn email(&mut self, current: Option<&str>) -> Result<StepInput<String>>;

    fn code(&mut self, email: &str) -> Result<StepInput<String>>;

    /// New password and its confirmation
    fn new_password(&mut self) -> Result<StepInput<(String, String)>>;

    /// A remote call is about to start
    fn begin_request(&mut self, _message: &str) {}

    /// The remote call finished
    fn end_request(&mut self, _succeeded: bool) {}

    /// Report a failed step; return whether to try the step again
    fn step_failed(&mut self, error: &FlowError) -> Result<bool>;
}

/// Run the wizard until it completes or the user abandons it
pub fn run_wizard<I, P>(
    flow: &mut PasswordResetFlow<I>,
    prompter: &mut P,
    initial_email: Option<&str>,
) -> Result<WizardOutcome>
where
    I: IdentityService,
    P: WizardPrompter,
{
    loop {
        let step = flow.current_step();
        prompter.step_started(step, flow.session().progress());

        let result = match step {
            PasswordResetStep::RequestReset => {
                let current = flow.email().or(initial_email).map(str::to_string);
                match prompter.email(current.as_deref())? {
                    StepInput::Back => {
                        info!("password reset wizard cancelled");
                        return Ok(WizardOutcome::Abandoned);
                    }
                    StepInput::Submit(email) => remote_call(
                        prompter,
                        "Requesting reset code...",
                        flow.check_email(&email),
                        || flow.submit_email(&email),
                    ),
                }
            }
            PasswordResetStep::VerifyCode => {
                let email = flow.email().unwrap_or_default().to_string();
                match prompter.code(&email)? {
                    StepInput::Back => {
                        flow.back();
                        continue;
                    }
                    StepInput::Submit(code) => remote_call(
                        prompter,
                        "Verifying code...",
                        flow.check_code(&code),
                        || flow.submit_code(&code),
                    ),
                }
            }
            PasswordResetStep::SetNewPassword => match prompter.new_password()? {
                StepInput::Back => {
                    flow.back();
                    continue;
                }
                StepInput::Submit((password, confirmation)) => remote_call(
                    prompter,
                    "Saving new password...",
                    flow.check_new_password(&password, &confirmation),
                    || flow.submit_new_password(&password, &confirmation),
                ),
            },
        };

        match result {
            Ok(()) if flow.is_complete() => {
                let email = flow.email().unwrap_or_default().to_string();
                let elapsed = Utc::now() - flow.session().started_at();
                info!(elapsed_secs = elapsed.num_seconds(), "password reset wizard completed");
                return Ok(WizardOutcome::Completed { email });
            }
            Ok(()) => {}
            Err(error) => {
                debug!(step = ?step, %error, "wizard step failed");
                if !prompter.step_failed(&error)? {
                    info!(step = ?step, "password reset wizard abandoned");
                    return Ok(WizardOutcome::Abandoned);
                }
            }
        }
    }
}

/// Run `call` between `begin_request` and `end_request`, unless the local
/// check already failed.
fn remote_call<P, T>(
    prompter: &mut P,
    message: &str,
    checked: Result<(), FlowError>,
    call: impl FnOnce() -> Result<T, FlowError>,
) -> Result<(), FlowError>
where
    P: WizardPrompter,
{
    checked?;
    prompter.begin_request(message);
    let result = call().map(|_| ());
    prompter.end_request(result.is_ok());
    result
}
