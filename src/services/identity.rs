//! Identity service calls backing the password-reset steps

use std::time::Duration;

use serde::Serialize;
use tracing::{info, warn};

use super::http::{build_agent, join_url, map_error};
use super::ServiceError;
use crate::config::IdentityConfig;

/// The three remote operations of a password reset.
///
/// Each call either succeeds or reports why it failed; the caller decides
/// what happens to the wizard.
pub trait IdentityService {
    /// Ask the identity provider to send a reset code to `email`
    fn request_reset(&self, email: &str) -> Result<(), ServiceError>;

    /// Check a reset code previously sent to `email`
    fn verify_code(&self, email: &str, code: &str) -> Result<(), ServiceError>;

    /// Set the new password, authorized by a verified code
    fn set_new_password(&self, email: &str, code: &str, password: &str)
        -> Result<(), ServiceError>;
}

impl<T: IdentityService + ?Sized> IdentityService for &T {
    fn request_reset(&self, email: &str) -> Result<(), ServiceError> {
        (**self).request_reset(email)
    }

    fn verify_code(&self, email: &str, code: &str) -> Result<(), ServiceError> {
        (**self).verify_code(email, code)
    }

    fn set_new_password(
        &self,
        email: &str,
        code: &str,
        password: &str,
    ) -> Result<(), ServiceError> {
        (**self).set_new_password(email, code, password)
    }
}

#[derive(Serialize)]
struct ResetRequest<'a> {
    email: &'a str,
}

#[derive(Serialize)]
struct VerifyRequest<'a> {
    email: &'a str,
    code: &'a str,
}

#[derive(Serialize)]
struct CompleteRequest<'a> {
    email: &'a str,
    code: &'a str,
    password: &'a str,
}

/// JSON-over-HTTP identity service client
pub struct HttpIdentityService {
    base_url: String,
    agent: ureq::Agent,
}

impl HttpIdentityService {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            base_url: base_url.into(),
            agent: build_agent(timeout),
        }
    }

    pub fn from_config(config: &IdentityConfig) -> Self {
        Self::new(
            config.base_url.clone(),
            Duration::from_secs(config.timeout_secs),
        )
    }

    fn post<B: Serialize>(&self, path: &str, body: &B) -> Result<(), ServiceError> {
        let url = join_url(&self.base_url, path);
        info!(%url, "identity request");
        self.agent
            .post(&url)
            .send_json(body)
            .map(|_| ())
            .map_err(|err| {
                let err = map_error(err);
                warn!(%url, error = %err, "identity request failed");
                err
            })
    }
}

impl IdentityService for HttpIdentityService {
    fn request_reset(&self, email: &str) -> Result<(), ServiceError> {
        self.post("password-reset/request", &ResetRequest { email })
    }

    fn verify_code(&self, email: &str, code: &str) -> Result<(), ServiceError> {
        self.post("password-reset/verify", &VerifyRequest { email, code })
    }

    fn set_new_password(
        &self,
        email: &str,
        code: &str,
        password: &str,
    ) -> Result<(), ServiceError> {
        self.post(
            "password-reset/complete",
            &CompleteRequest {
                email,
                code,
                password,
            },
        )
    }
}
