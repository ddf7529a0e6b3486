//! Resolving the outbound HTTP request.
//!
//! The request is planned here and never sent; whatever performs the call
//! consumes the serialized [`RequestPlan`].

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;

use super::payload::RequestBody;
use crate::document::TextElement;

const DEFAULT_HEADERS: &str = r#"{"Content-Type": "application/json"}"#;

/// Errors raised while planning a request.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum OutboundError {
    #[error("no API URL configured")]
    MissingUrl,
    #[error("no applied blocks to send")]
    NothingApplied,
    #[error("unsupported HTTP method: {0}")]
    UnsupportedMethod(String),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    #[default]
    Post,
    Put,
    Patch,
    Delete,
}

impl HttpMethod {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
        }
    }

    /// Whether requests with this method carry the JSON body.
    pub const fn has_body(self) -> bool {
        !matches!(self, Self::Get)
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HttpMethod {
    type Err = OutboundError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "GET" => Ok(Self::Get),
            "POST" => Ok(Self::Post),
            "PUT" => Ok(Self::Put),
            "PATCH" => Ok(Self::Patch),
            "DELETE" => Ok(Self::Delete),
            _ => Err(OutboundError::UnsupportedMethod(s.to_string())),
        }
    }
}

/// Endpoint settings chosen by the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiSettings {
    pub url: String,
    pub api_key: Option<String>,
    /// JSON object of header names to values.
    pub custom_headers: String,
    pub method: String,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            url: String::new(),
            api_key: None,
            custom_headers: DEFAULT_HEADERS.to_string(),
            method: HttpMethod::default().as_str().to_string(),
        }
    }
}

/// A fully resolved request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RequestPlan {
    pub method: HttpMethod,
    pub url: String,
    pub headers: BTreeMap<String, String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<RequestBody>,
    /// Set when the custom headers could not be used.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

impl RequestPlan {
    /// Plan a request for the applied blocks of `elements`.
    pub fn build(
        settings: &ApiSettings,
        elements: &[TextElement],
        now: DateTime<Utc>,
    ) -> Result<Self, OutboundError> {
        let url = settings.url.trim();
        if url.is_empty() {
            return Err(OutboundError::MissingUrl);
        }
        if !elements.iter().any(|el| el.applied) {
            return Err(OutboundError::NothingApplied);
        }
        let method: HttpMethod = settings.method.parse()?;

        let (mut headers, warning) = parse_headers(&settings.custom_headers);
        if let Some(key) = settings.api_key.as_deref().filter(|key| !key.is_empty()) {
            headers.insert("Authorization".to_string(), format!("Bearer {key}"));
        }

        let body = method
            .has_body()
            .then(|| RequestBody::build(elements, now));

        Ok(Self {
            method,
            url: url.to_string(),
            headers,
            body,
            warning,
        })
    }
}

/// Parse a JSON header object, falling back to a JSON content type.
///
/// Non-string values are rendered as their JSON text.
pub fn parse_headers(raw: &str) -> (BTreeMap<String, String>, Option<String>) {
    match serde_json::from_str::<serde_json::Map<String, serde_json::Value>>(raw) {
        Ok(map) => {
            let headers = map
                .into_iter()
                .map(|(name, value)| {
                    let value = match value {
                        serde_json::Value::String(s) => s,
                        other => other.to_string(),
                    };
                    (name, value)
                })
                .collect();
            (headers, None)
        }
        Err(err) => {
            tracing::warn!(%err, "invalid custom headers, using default content type");
            let headers =
                BTreeMap::from([("Content-Type".to_string(), "application/json".to_string())]);
            (
                headers,
                Some(format!("invalid headers ({err}), using Content-Type: application/json")),
            )
        }
    }
}
