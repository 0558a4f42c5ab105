//! SMS notifications through a hosted gateway
//!
//! The gateway is a plain JSON API: one `POST /messages` per SMS, bearer
//! token auth, and a receipt carrying the provider's message id. Delivery
//! tracking stays with the provider.

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{error, info};

use super::http::{build_agent, join_url, map_error};
use super::ServiceError;
use crate::config::{ConfigError, SmsConfig};

/// Gateway limit for a single (possibly concatenated) message
pub const MAX_BODY_CHARS: usize = 1600;

/// A validated outgoing SMS
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SmsMessage {
    to: String,
    body: String,
}

impl SmsMessage {
    /// Build a message, normalizing the destination number.
    ///
    /// Spaces, dashes, dots and parentheses are stripped from `to`; what is
    /// left must be 6 to 15 digits with an optional leading `+`.
    pub fn new(to: &str, body: &str) -> Result<Self, ServiceError> {
        let to = normalize_destination(to)?;
        let body = body.trim();
        if body.is_empty() {
            return Err(ServiceError::InvalidRequest(
                "Message body is empty".to_string(),
            ));
        }
        let length = body.chars().count();
        if length > MAX_BODY_CHARS {
            return Err(ServiceError::InvalidRequest(format!(
                "Message body is {} characters, the limit is {}",
                length, MAX_BODY_CHARS
            )));
        }
        Ok(Self {
            to,
            body: body.to_string(),
        })
    }

    pub fn to(&self) -> &str {
        &self.to
    }

    pub fn body(&self) -> &str {
        &self.body
    }
}

/// Strip formatting characters from a phone number and check what remains
pub fn normalize_destination(raw: &str) -> Result<String, ServiceError> {
    let cleaned: String = raw
        .trim()
        .chars()
        .filter(|c| !matches!(c, ' ' | '-' | '.' | '(' | ')'))
        .collect();

    let digits = cleaned.strip_prefix('+').unwrap_or(&cleaned);
    let valid = (6..=15).contains(&digits.len()) && digits.chars().all(|c| c.is_ascii_digit());
    if !valid {
        return Err(ServiceError::InvalidRequest(format!(
            "'{}' is not a valid phone number",
            raw.trim()
        )));
    }
    Ok(cleaned)
}

/// What the gateway told us about an accepted message
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SmsReceipt {
    pub message_id: String,
    pub status: String,
    pub sent_at: DateTime<Utc>,
}

/// Anything that can dispatch an SMS
pub trait SmsGateway {
    fn send(&self, message: &SmsMessage) -> Result<SmsReceipt, ServiceError>;
}

#[derive(Serialize)]
struct GatewayRequest<'a> {
    to: &'a str,
    from: &'a str,
    message: &'a str,
}

#[derive(Debug, Deserialize)]
struct GatewayResponse {
    #[serde(default, alias = "id", alias = "messageId")]
    message_id: Option<String>,
    #[serde(default)]
    status: Option<String>,
}

/// HTTP client for the hosted SMS gateway
pub struct HttpSmsGateway {
    base_url: String,
    api_key: String,
    sender_id: String,
    agent: ureq::Agent,
}

impl HttpSmsGateway {
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        sender_id: impl Into<String>,
        timeout: Duration,
    ) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
            sender_id: sender_id.into(),
            agent: build_agent(timeout),
        }
    }

    /// Build a gateway from config; the API key is mandatory
    pub fn from_config(config: &SmsConfig) -> Result<Self, ConfigError> {
        let api_key = config
            .api_key
            .as_deref()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| {
                ConfigError::Invalid(
                    "sms.api_key is not set (config file or INFRASEE_SMS_API_KEY)".to_string(),
                )
            })?;
        Ok(Self::new(
            config.base_url.clone(),
            api_key,
            config.sender_id.clone(),
            Duration::from_secs(config.timeout_secs),
        ))
    }
}

impl SmsGateway for HttpSmsGateway {
    fn send(&self, message: &SmsMessage) -> Result<SmsReceipt, ServiceError> {
        let url = join_url(&self.base_url, "messages");
        info!(%url, to = message.to(), "dispatching sms");

        let response = self
            .agent
            .post(&url)
            .set("Authorization", &format!("Bearer {}", self.api_key))
            .send_json(&GatewayRequest {
                to: message.to(),
                from: &self.sender_id,
                message: message.body(),
            })
            .map_err(|err| {
                let err = map_error(err);
                error!(%url, error = %err, "sms dispatch failed");
                err
            })?;

        let parsed: GatewayResponse = response
            .into_json()
            .map_err(|e| ServiceError::Decode(format!("SMS gateway receipt: {}", e)))?;

        let message_id = parsed
            .message_id
            .ok_or_else(|| ServiceError::Decode("SMS gateway receipt has no message id".to_string()))?;

        Ok(SmsReceipt {
            message_id,
            status: parsed.status.unwrap_or_else(|| "accepted".to_string()),
            sent_at: Utc::now(),
        })
    }
}
