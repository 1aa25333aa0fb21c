//! The success envelope.
//!
//! Every successful response is `200 application/json` with the shape
//! `{message, serverId, requestId, data}`. `data` is one of a fixed set of
//! payloads, chosen by the endpoint.

use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::files::FileEntry;
use crate::forward::ForwardResponse;
use crate::http::request::{RequestContext, RequestId};
use crate::identity::ServerId;

/// `data` of the envelope.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum Payload {
    /// Serialized as `null`.
    Empty,
    FileContent(FileContent),
    Files(Vec<FileEntry>),
    Forwarded(ForwardResponse),
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileContent {
    pub file_content: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Envelope {
    pub message: &'static str,
    pub server_id: ServerId,
    pub request_id: RequestId,
    pub data: Payload,
}

impl Envelope {
    pub fn new(ctx: &RequestContext, message: &'static str, data: Payload) -> Self {
        Self {
            message,
            server_id: ctx.server_id.clone(),
            request_id: ctx.request_id.clone(),
            data,
        }
    }

    pub fn empty(ctx: &RequestContext, message: &'static str) -> Self {
        Self::new(ctx, message, Payload::Empty)
    }
}

impl IntoResponse for Envelope {
    fn into_response(self) -> Response {
        Json(self).into_response()
    }
}
