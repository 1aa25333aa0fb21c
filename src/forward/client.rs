//! Forwarding client.

use std::time::Duration;

use reqwest::header::{HeaderName, HeaderValue};
use reqwest::Method;
use url::Url;

use crate::config::ForwardConfig;
use crate::forward::types::{canonical_header_name, ForwardRequest, ForwardResponse, HeaderValues};

/// Failure of a forwarded request, by phase.
#[derive(Debug, thiserror::Error)]
pub enum ForwardError {
    #[error("URL is required")]
    MissingUrl,

    /// URL, method, or a header could not be turned into a request.
    #[error("Failed to create request: {0}")]
    InvalidRequest(String),

    /// Connect, send, or timeout before the response head arrived.
    #[error("Failed to execute request: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("Failed to read response body: {0}")]
    Body(#[source] reqwest::Error),
}

/// Executes [`ForwardRequest`]s with a shared HTTP client.
#[derive(Debug, Clone)]
pub struct Forwarder {
    client: reqwest::Client,
    default_timeout: Duration,
}

impl Forwarder {
    pub fn new(config: &ForwardConfig) -> Result<Self, reqwest::Error> {
        let mut builder = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs));
        if !config.use_system_proxy {
            builder = builder.no_proxy();
        }

        Ok(Self {
            client: builder.build()?,
            default_timeout: Duration::from_secs(config.default_timeout_secs),
        })
    }

    pub fn default_timeout(&self) -> Duration {
        self.default_timeout
    }

    /// Send the request once and buffer the whole response.
    pub async fn execute(
        &self,
        request: &ForwardRequest,
    ) -> Result<ForwardResponse, ForwardError> {
        let url = request.url().ok_or(ForwardError::MissingUrl)?;
        let url =
            Url::parse(url).map_err(|e| ForwardError::InvalidRequest(e.to_string()))?;
        let method = Method::from_bytes(request.method().as_bytes())
            .map_err(|e| ForwardError::InvalidRequest(e.to_string()))?;

        let mut builder = self
            .client
            .request(method, url)
            .timeout(request.timeout_or(self.default_timeout));

        for (name, values) in request.headers.iter().flatten() {
            let invalid = |e: &dyn std::fmt::Display| {
                ForwardError::InvalidRequest(format!("header {name}: {e}"))
            };
            let header_name =
                HeaderName::from_bytes(name.as_bytes()).map_err(|e| invalid(&e))?;
            for value in values {
                let value = HeaderValue::from_str(value).map_err(|e| invalid(&e))?;
                builder = builder.header(header_name.clone(), value);
            }
        }

        if let Some(body) = request.body() {
            builder = builder.body(body.to_owned());
        }

        let response = builder.send().await.map_err(|e| {
            if e.is_builder() {
                ForwardError::InvalidRequest(e.to_string())
            } else {
                ForwardError::Transport(e)
            }
        })?;

        let status_code = response.status().as_u16();
        let headers = collect_headers(response.headers());
        let body = response.bytes().await.map_err(ForwardError::Body)?;

        Ok(ForwardResponse {
            status_code,
            headers,
            body: String::from_utf8_lossy(&body).into_owned(),
        })
    }
}

fn collect_headers(map: &reqwest::header::HeaderMap) -> HeaderValues {
    let mut headers = HeaderValues::new();
    for (name, value) in map {
        headers
            .entry(canonical_header_name(name.as_str()))
            .or_default()
            .push(String::from_utf8_lossy(value.as_bytes()).into_owned());
    }
    headers
}
