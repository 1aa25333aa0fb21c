//! Form parameter extraction for the POST endpoints.
//!
//! Parameters may arrive in the query string, a urlencoded body or a
//! multipart body. Body values take precedence over query values, and the
//! first occurrence of a name wins within each source. Multipart file parts
//! are skipped.

use std::collections::HashMap;

use axum::extract::rejection::QueryRejection;
use axum::extract::{Form, FromRequest, Multipart, Query, Request};
use axum::http::header::CONTENT_TYPE;
use serde::de::value::{Error as ValueError, MapDeserializer};
use serde::de::DeserializeOwned;

use crate::http::error::ApiError;

const URLENCODED: &str = "application/x-www-form-urlencoded";
const MULTIPART: &str = "multipart/form-data";

/// Parameters merged from the query string and the request body.
#[derive(Debug, Clone, Default)]
pub struct FormParams<T>(pub T);

fn has_media_type(content_type: &str, expected: &str) -> bool {
    content_type
        .split(';')
        .next()
        .map(|media| media.trim().eq_ignore_ascii_case(expected))
        .unwrap_or(false)
}

fn query_pairs(req: &Request) -> Result<Vec<(String, String)>, QueryRejection> {
    if req.uri().query().is_none() {
        return Ok(Vec::new());
    }
    let Query(pairs) = Query::<Vec<(String, String)>>::try_from_uri(req.uri())?;
    Ok(pairs)
}

async fn multipart_pairs(mut multipart: Multipart) -> Result<Vec<(String, String)>, ApiError> {
    let mut pairs = Vec::new();
    while let Some(field) = multipart.next_field().await? {
        if field.file_name().is_some() {
            continue;
        }
        let Some(name) = field.name().map(str::to_owned) else {
            continue;
        };
        pairs.push((name, field.text().await?));
    }
    Ok(pairs)
}

impl<S, T> FromRequest<S> for FormParams<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let query = query_pairs(&req)?;
        let content_type = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default()
            .to_owned();

        let body = if has_media_type(&content_type, URLENCODED) {
            let Form(pairs) = Form::<Vec<(String, String)>>::from_request(req, state).await?;
            pairs
        } else if has_media_type(&content_type, MULTIPART) {
            multipart_pairs(Multipart::from_request(req, state).await?).await?
        } else {
            Vec::new()
        };

        let mut values = HashMap::new();
        for (name, value) in body.into_iter().chain(query) {
            values.entry(name).or_insert(value);
        }

        let deserializer = MapDeserializer::<_, ValueError>::new(values.into_iter());
        T::deserialize(deserializer)
            .map(FormParams)
            .map_err(|e| ApiError::BadRequest(format!("Failed to parse form: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use serde::Deserialize;

    #[derive(Debug, Default, Deserialize)]
    #[serde(default, rename_all = "camelCase")]
    struct Params {
        file_path: String,
        file_content: String,
    }

    async fn extract(req: Request) -> Result<Params, ApiError> {
        FormParams::<Params>::from_request(req, &())
            .await
            .map(|FormParams(params)| params)
    }

    #[tokio::test]
    async fn test_query_only() {
        let req = Request::builder()
            .method("POST")
            .uri("/writeFile?filePath=%2Ftmp%2Fa.txt&fileContent=hi")
            .body(Body::empty())
            .unwrap();
        let params = extract(req).await.unwrap();
        assert_eq!(params.file_path, "/tmp/a.txt");
        assert_eq!(params.file_content, "hi");
    }

    #[tokio::test]
    async fn test_body_overrides_query() {
        let req = Request::builder()
            .method("POST")
            .uri("/writeFile?filePath=query&fileContent=from-query")
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded; charset=utf-8")
            .body(Body::from("filePath=body"))
            .unwrap();
        let params = extract(req).await.unwrap();
        assert_eq!(params.file_path, "body");
        assert_eq!(params.file_content, "from-query");
    }

    #[tokio::test]
    async fn test_first_value_wins() {
        let req = Request::builder()
            .method("POST")
            .uri("/writeFile")
            .header(CONTENT_TYPE, URLENCODED)
            .body(Body::from("filePath=first&filePath=second"))
            .unwrap();
        assert_eq!(extract(req).await.unwrap().file_path, "first");
    }

    #[tokio::test]
    async fn test_multipart_fields() {
        let body = concat!(
            "--XBOUNDARY\r\n",
            "Content-Disposition: form-data; name=\"filePath\"\r\n\r\n",
            "/tmp/m.txt\r\n",
            "--XBOUNDARY\r\n",
            "Content-Disposition: form-data; name=\"fileContent\"\r\n\r\n",
            "multi\r\nline\r\n",
            "--XBOUNDARY\r\n",
            "Content-Disposition: form-data; name=\"filePath\"; filename=\"x.bin\"\r\n",
            "Content-Type: application/octet-stream\r\n\r\n",
            "ignored\r\n",
            "--XBOUNDARY--\r\n",
        );
        let req = Request::builder()
            .method("POST")
            .uri("/writeFile")
            .header(CONTENT_TYPE, "multipart/form-data; boundary=XBOUNDARY")
            .body(Body::from(body))
            .unwrap();
        let params = extract(req).await.unwrap();
        assert_eq!(params.file_path, "/tmp/m.txt");
        assert_eq!(params.file_content, "multi\r\nline");
    }

    #[tokio::test]
    async fn test_unknown_content_type_uses_query() {
        let req = Request::builder()
            .method("POST")
            .uri("/writeFile?filePath=q")
            .header(CONTENT_TYPE, "text/plain")
            .body(Body::from("filePath=ignored"))
            .unwrap();
        assert_eq!(extract(req).await.unwrap().file_path, "q");
    }

    #[tokio::test]
    async fn test_malformed_multipart_is_bad_request() {
        let req = Request::builder()
            .method("POST")
            .uri("/writeFile")
            .header(CONTENT_TYPE, "multipart/form-data")
            .body(Body::from("garbage"))
            .unwrap();
        let err = extract(req).await.unwrap_err();
        assert_eq!(err.status_code(), axum::http::StatusCode::BAD_REQUEST);
    }
}
