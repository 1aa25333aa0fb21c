//! Wire types for forwarded requests and their results.

use std::collections::BTreeMap;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Header name → values, in the order they were given or received.
pub type HeaderValues = BTreeMap<String, Vec<String>>;

/// Method used when the descriptor leaves it out.
pub const DEFAULT_METHOD: &str = "GET";

/// Outbound request description posted to `/proxy`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ForwardRequest {
    pub url: Option<String>,
    pub method: Option<String>,
    pub headers: Option<HeaderValues>,
    pub body: Option<String>,
    /// Seconds; absent or zero means the configured default.
    #[serde(alias = "timeoutSeconds")]
    pub timeout: Option<u64>,
}

impl ForwardRequest {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: Some(url.into()),
            ..Default::default()
        }
    }

    /// Target URL, or `None` when missing or empty.
    pub fn url(&self) -> Option<&str> {
        self.url.as_deref().filter(|u| !u.is_empty())
    }

    pub fn method(&self) -> &str {
        match self.method.as_deref() {
            Some(m) if !m.is_empty() => m,
            _ => DEFAULT_METHOD,
        }
    }

    pub fn timeout_or(&self, default: Duration) -> Duration {
        match self.timeout {
            Some(secs) if secs > 0 => Duration::from_secs(secs),
            _ => default,
        }
    }

    /// Body to send, `None` when empty.
    pub fn body(&self) -> Option<&str> {
        self.body.as_deref().filter(|b| !b.is_empty())
    }
}

/// Upstream result relayed back inside the envelope.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ForwardResponse {
    pub status_code: u16,
    pub headers: HeaderValues,
    pub body: String,
}

/// Render a header name in canonical MIME form (`content-type` → `Content-Type`).
///
/// Names containing bytes outside the token set are returned unchanged.
pub fn canonical_header_name(name: &str) -> String {
    let is_token = |c: char| c.is_ascii_alphanumeric() || "!#$%&'*+-.^_`|~".contains(c);
    if name.is_empty() || !name.chars().all(is_token) {
        return name.to_string();
    }

    let mut upper = true;
    name.chars()
        .map(|c| {
            let out = if upper {
                c.to_ascii_uppercase()
            } else {
                c.to_ascii_lowercase()
            };
            upper = c == '-';
            out
        })
        .collect()
}
