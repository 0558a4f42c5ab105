//! Password reset: request a code, verify it, set a new password
//!
//! `PasswordResetFlow` hosts one wizard session. Every submit validates its
//! input, records the step's field, calls the identity service, and advances
//! only when the call succeeds. A failed call leaves the step unchanged.

use thiserror::Error;
use tracing::info;

use super::validation::{validate_code, validate_email, validate_new_password};
use crate::services::{IdentityService, ServiceError};
use crate::wizard::{WizardSession, WizardStep};

/// Field holding the account email, collected on the first step
pub const EMAIL_FIELD: &str = "email";
/// Field holding the verification code, collected on the second step
pub const CODE_FIELD: &str = "code";

/// Steps of the password-reset wizard
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PasswordResetStep {
    RequestReset,
    VerifyCode,
    SetNewPassword,
}

impl WizardStep for PasswordResetStep {
    const SEQUENCE: &'static [Self] = &[
        PasswordResetStep::RequestReset,
        PasswordResetStep::VerifyCode,
        PasswordResetStep::SetNewPassword,
    ];

    fn title(&self) -> &'static str {
        match self {
            PasswordResetStep::RequestReset => "Request Reset",
            PasswordResetStep::VerifyCode => "Verify Code",
            PasswordResetStep::SetNewPassword => "Set New Password",
        }
    }
}

/// Reasons a submission did not move the flow forward
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FlowError {
    /// Input failed the screen's own checks; nothing was sent
    #[error("{0}")]
    Validation(String),

    #[error("Cannot submit '{expected}' while on '{current}'")]
    WrongStep {
        expected: &'static str,
        current: &'static str,
    },

    #[error("Missing '{0}' from an earlier step")]
    MissingField(&'static str),

    #[error("Password reset is already complete")]
    AlreadyComplete,

    #[error(transparent)]
    Service(#[from] ServiceError),
}

/// Host for one password-reset wizard session
pub struct PasswordResetFlow<I> {
    session: WizardSession<PasswordResetStep>,
    identity: I,
    complete: bool,
}

impl<I: IdentityService> PasswordResetFlow<I> {
    pub fn new(identity: I) -> Self {
        Self {
            session: WizardSession::new(),
            identity,
            complete: false,
        }
    }

    /// Read-only view of the underlying session
    pub fn session(&self) -> &WizardSession<PasswordResetStep> {
        &self.session
    }

    pub fn current_step(&self) -> PasswordResetStep {
        self.session.current_step()
    }

    pub fn is_complete(&self) -> bool {
        self.complete
    }

    /// Email collected on the first step, if any
    pub fn email(&self) -> Option<&str> {
        self.session.field(EMAIL_FIELD)
    }

    fn expect_step(&self, expected: PasswordResetStep) -> Result<(), FlowError> {
        if self.complete {
            return Err(FlowError::AlreadyComplete);
        }
        let current = self.session.current_step();
        if current != expected {
            return Err(FlowError::WrongStep {
                expected: expected.title(),
                current: current.title(),
            });
        }
        Ok(())
    }

    fn required_field(&self, key: &'static str) -> Result<String, FlowError> {
        self.session
            .field(key)
            .map(str::to_string)
            .ok_or(FlowError::MissingField(key))
    }

    /// Local checks for step 1, without contacting the identity provider
    pub fn check_email(&self, email: &str) -> Result<(), FlowError> {
        self.expect_step(PasswordResetStep::RequestReset)?;
        validate_email(email.trim()).map_err(FlowError::Validation)
    }

    /// Local checks for step 2, without contacting the identity provider
    pub fn check_code(&self, code: &str) -> Result<(), FlowError> {
        self.expect_step(PasswordResetStep::VerifyCode)?;
        validate_code(code.trim()).map_err(FlowError::Validation)?;
        self.required_field(EMAIL_FIELD).map(|_| ())
    }

    /// Local checks for step 3, without contacting the identity provider
    pub fn check_new_password(&self, password: &str, confirmation: &str) -> Result<(), FlowError> {
        self.expect_step(PasswordResetStep::SetNewPassword)?;
        validate_new_password(password, confirmation).map_err(FlowError::Validation)?;
        self.required_field(EMAIL_FIELD)?;
        self.required_field(CODE_FIELD).map(|_| ())
    }

    /// Step 1: ask the identity provider to send a reset code
    pub fn submit_email(&mut self, email: &str) -> Result<PasswordResetStep, FlowError> {
        self.check_email(email)?;
        let email = email.trim();

        self.session.set_field(EMAIL_FIELD, email);
        self.identity.request_reset(email)?;
        info!("reset code requested");
        Ok(self.session.advance())
    }

    /// Step 2: verify the code that was sent
    pub fn submit_code(&mut self, code: &str) -> Result<PasswordResetStep, FlowError> {
        self.check_code(code)?;
        let code = code.trim();
        let email = self.required_field(EMAIL_FIELD)?;

        self.session.set_field(CODE_FIELD, code);
        self.identity.verify_code(&email, code)?;
        info!("reset code verified");
        Ok(self.session.advance())
    }

    /// Step 3: set the new password. The password is never stored in the session.
    pub fn submit_new_password(
        &mut self,
        password: &str,
        confirmation: &str,
    ) -> Result<(), FlowError> {
        self.check_new_password(password, confirmation)?;
        let email = self.required_field(EMAIL_FIELD)?;
        let code = self.required_field(CODE_FIELD)?;

        self.identity.set_new_password(&email, &code, password)?;
        self.complete = true;
        info!("password reset complete");
        Ok(())
    }

    /// Go back one step, keeping what was entered. No-op once complete.
    pub fn back(&mut self) -> PasswordResetStep {
        if self.complete {
            return self.session.current_step();
        }
        self.session.retreat()
    }

    /// Start over with an empty session
    pub fn restart(&mut self) -> PasswordResetStep {
        self.complete = false;
        self.session.reset()
    }
}
