//! Per-request identity.
//!
//! # Responsibilities
//! - Mint a fresh request ID for every request (client values are ignored)
//! - Open a span carrying server and request IDs for all request logs
//! - Echo the ID in `x-request-id` and record request metrics

use std::convert::Infallible;
use std::fmt;
use std::sync::Arc;
use std::time::Instant;

use axum::body::Body;
use axum::extract::{FromRequestParts, State};
use axum::http::request::Parts;
use axum::http::{HeaderName, HeaderValue, Request};
use axum::middleware::Next;
use axum::response::Response;
use serde::Serialize;
use tracing::Instrument;

use crate::http::server::{AppState, ROUTES};
use crate::identity::{generate_id, ServerId};
use crate::observability::metrics;

pub const X_REQUEST_ID: HeaderName = HeaderName::from_static("x-request-id");

/// Identifier of one request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct RequestId(Arc<str>);

impl RequestId {
    pub fn generate() -> Self {
        Self(Arc::from(generate_id()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Server and request identity for building envelopes.
#[derive(Debug, Clone)]
pub struct RequestContext {
    pub server_id: ServerId,
    pub request_id: RequestId,
}

impl FromRequestParts<AppState> for RequestContext {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let request_id = parts
            .extensions
            .get::<RequestId>()
            .cloned()
            .unwrap_or_else(RequestId::generate);

        Ok(Self {
            server_id: state.server_id.clone(),
            request_id,
        })
    }
}

/// Middleware assigning the request ID.
pub async fn assign_request_id(
    State(state): State<AppState>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    let start = Instant::now();
    let request_id = RequestId::generate();
    request.extensions_mut().insert(request_id.clone());

    let method = request.method().to_string();
    let path = request.uri().path().to_string();
    let span = tracing::info_span!(
        "request",
        server_id = %state.server_id,
        request_id = %request_id,
        method = %method,
        path = %path,
    );

    let mut response = next.run(request).instrument(span).await;

    if let Ok(value) = HeaderValue::from_str(request_id.as_str()) {
        response.headers_mut().insert(X_REQUEST_ID, value);
    }

    let route = if ROUTES.contains(&path.as_str()) {
        path.as_str()
    } else {
        "unmatched"
    };
    metrics::record_request(&method, route, response.status().as_u16(), start);

    response
}
