//! Shared plumbing for the blocking HTTP clients

use std::time::Duration;

use serde::Deserialize;

use super::ServiceError;

/// Build an agent with the InfraSee user agent and a request timeout
pub(crate) fn build_agent(timeout: Duration) -> ureq::Agent {
    let user_agent = format!("infrasee/{}", env!("CARGO_PKG_VERSION"));
    ureq::AgentBuilder::new()
        .timeout(timeout)
        .user_agent(&user_agent)
        .build()
}

/// Join a base URL and a path without doubling or dropping the slash
pub(crate) fn join_url(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

/// Error bodies we know how to read a message out of
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

/// Pull a human-readable message out of an error response body
pub(crate) fn error_message(body: &str) -> Option<String> {
    if let Ok(parsed) = serde_json::from_str::<ErrorBody>(body) {
        if let Some(message) = parsed.message.or(parsed.error) {
            return Some(message);
        }
    }
    let trimmed = body.trim();
    if trimmed.is_empty() || trimmed.starts_with('{') {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Map a ureq failure onto our error type
pub(crate) fn map_error(err: ureq::Error) -> ServiceError {
    match err {
        ureq::Error::Status(status, response) => {
            let message = response
                .into_string()
                .ok()
                .and_then(|body| error_message(&body))
                .unwrap_or_else(|| format!("HTTP {}", status));
            ServiceError::Rejected { status, message }
        }
        ureq::Error::Transport(transport) => ServiceError::Transport(transport.to_string()),
    }
}
