//! `/proxy` handler.

use axum::body::Bytes;
use axum::extract::rejection::BytesRejection;
use axum::extract::State;

use crate::forward::{ForwardError, ForwardRequest};
use crate::http::error::ApiError;
use crate::http::request::RequestContext;
use crate::http::response::{Envelope, Payload};
use crate::http::server::AppState;

impl From<ForwardError> for ApiError {
    fn from(err: ForwardError) -> Self {
        match err {
            ForwardError::MissingUrl | ForwardError::InvalidRequest(_) => {
                ApiError::BadRequest(err.to_string())
            }
            ForwardError::Transport(_) => ApiError::BadGateway(err.to_string()),
            ForwardError::Body(_) => ApiError::Internal(err.to_string()),
        }
    }
}

/// `POST /proxy`
///
/// The body is parsed as JSON regardless of its content type.
pub async fn proxy_request(
    State(state): State<AppState>,
    ctx: RequestContext,
    body: Result<Bytes, BytesRejection>,
) -> Result<Envelope, ApiError> {
    let body = body?;
    let request: ForwardRequest = serde_json::from_slice(&body)
        .map_err(|e| ApiError::BadRequest(format!("Invalid request body: {e}")))?;

    tracing::info!(
        url = request.url().unwrap_or_default(),
        method = request.method(),
        timeout_secs = request.timeout_or(state.forwarder.default_timeout()).as_secs(),
        "Proxying HTTP request"
    );

    let response = state.forwarder.execute(&request).await?;
    tracing::debug!(
        status = response.status_code,
        bytes = response.body.len(),
        "Upstream responded"
    );

    Ok(Envelope::new(
        &ctx,
        "Proxy request completed",
        Payload::Forwarded(response),
    ))
}
