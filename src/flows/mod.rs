//! Flows that host a wizard session

pub mod password_reset;
pub mod validation;

pub use password_reset::{FlowError, PasswordResetFlow, PasswordResetStep, CODE_FIELD, EMAIL_FIELD};
pub use validation::{validate_code, validate_email, validate_new_password};
