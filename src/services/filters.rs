//! Server-backed filter options for the dashboard data table

use std::collections::HashSet;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::http::{build_agent, join_url, map_error};
use super::ServiceError;
use crate::config::FiltersConfig;

/// One selectable value for a column filter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterOption {
    pub label: String,
    pub value: String,
}

impl FilterOption {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

/// Source of the distinct values a column can be filtered by
pub trait FilterOptionsSource {
    fn fetch_options(&self, column: &str) -> Result<Vec<FilterOption>, ServiceError>;
}

/// Drop blank values, keep the first option per value, order by label
pub fn normalize_options(options: Vec<FilterOption>) -> Vec<FilterOption> {
    let mut seen = HashSet::new();
    let mut result: Vec<FilterOption> = options
        .into_iter()
        .filter(|opt| !opt.value.trim().is_empty())
        .filter(|opt| seen.insert(opt.value.clone()))
        .map(|opt| {
            if opt.label.trim().is_empty() {
                FilterOption::new(opt.value.clone(), opt.value)
            } else {
                opt
            }
        })
        .collect();
    result.sort_by_key(|opt| opt.label.to_lowercase());
    result
}

/// Column names end up in the URL path, so keep them to a safe alphabet.
/// Dot-only names (`.`, `..`) are path segments, not columns.
fn validate_column(column: &str) -> Result<(), ServiceError> {
    let valid = !column.is_empty()
        && !column.chars().all(|c| c == '.')
        && column
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'));
    if valid {
        Ok(())
    } else {
        Err(ServiceError::InvalidRequest(format!(
            "'{}' is not a valid column name",
            column
        )))
    }
}

// Servers answer with either bare strings or label/value objects, optionally
// wrapped in an envelope.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawOption {
    Plain(String),
    Labeled {
        #[serde(default)]
        label: Option<String>,
        value: serde_json::Value,
    },
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawResponse {
    List(Vec<RawOption>),
    Envelope {
        #[serde(alias = "data")]
        options: Vec<RawOption>,
    },
}

impl From<RawOption> for FilterOption {
    fn from(raw: RawOption) -> Self {
        match raw {
            RawOption::Plain(value) => FilterOption::new(value.clone(), value),
            RawOption::Labeled { label, value } => {
                let value = match value {
                    serde_json::Value::String(s) => s,
                    serde_json::Value::Null => String::new(),
                    other => other.to_string(),
                };
                FilterOption::new(label.unwrap_or_else(|| value.clone()), value)
            }
        }
    }
}

/// Parse a filter-options response body
pub fn parse_options(body: &str) -> Result<Vec<FilterOption>, ServiceError> {
    let raw: RawResponse = serde_json::from_str(body)
        .map_err(|e| ServiceError::Decode(format!("filter options: {}", e)))?;
    let options = match raw {
        RawResponse::List(items) | RawResponse::Envelope { options: items } => items,
    };
    Ok(options.into_iter().map(FilterOption::from).collect())
}

/// HTTP client for `GET {base}/filters/{column}`
pub struct HttpFilterOptions {
    base_url: String,
    agent: ureq::Agent,
}

impl HttpFilterOptions {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            base_url: base_url.into(),
            agent: build_agent(timeout),
        }
    }

    pub fn from_config(config: &FiltersConfig) -> Self {
        Self::new(
            config.base_url.clone(),
            Duration::from_secs(config.timeout_secs),
        )
    }
}

impl FilterOptionsSource for HttpFilterOptions {
    fn fetch_options(&self, column: &str) -> Result<Vec<FilterOption>, ServiceError> {
        validate_column(column)?;
        let url = join_url(&self.base_url, &format!("filters/{}", column));
        debug!(%url, "fetching filter options");

        let body = self
            .agent
            .get(&url)
            .call()
            .map_err(|err| {
                let err = map_error(err);
                warn!(%url, error = %err, "filter options request failed");
                err
            })?
            .into_string()
            .map_err(|e| ServiceError::Decode(format!("filter options: {}", e)))?;

        let options = normalize_options(parse_options(&body)?);
        debug!(column, count = options.len(), "filter options loaded");
        Ok(options)
    }
}
