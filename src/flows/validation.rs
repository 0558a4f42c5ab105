//! Input checks for the password-reset screens
//!
//! These belong to the UI layer; the wizard itself stores whatever it is given.

use std::sync::OnceLock;

use regex::Regex;

/// Minimum length for a new password
pub const MIN_PASSWORD_CHARS: usize = 8;

fn email_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid"))
}

/// Validate an email address shape (something@domain.tld)
pub fn validate_email(email: &str) -> Result<(), String> {
    if email.is_empty() {
        return Err("Email address is required".to_string());
    }
    if !email_pattern().is_match(email) {
        return Err(format!("'{}' is not a valid email address", email));
    }
    Ok(())
}

/// Validate a verification code: 4 to 8 digits
pub fn validate_code(code: &str) -> Result<(), String> {
    if !(4..=8).contains(&code.len()) || !code.chars().all(|c| c.is_ascii_digit()) {
        return Err("Verification code must be 4 to 8 digits".to_string());
    }
    Ok(())
}

/// Validate a new password against its confirmation
pub fn validate_new_password(password: &str, confirmation: &str) -> Result<(), String> {
    if password.chars().count() < MIN_PASSWORD_CHARS {
        return Err(format!(
            "Password must be at least {} characters",
            MIN_PASSWORD_CHARS
        ));
    }
    if password.trim().is_empty() {
        return Err("Password cannot be blank".to_string());
    }
    if password != confirmation {
        return Err("Passwords do not match".to_string());
    }
    Ok(())
}
