//! Filesystem endpoint handlers.

use std::io;
use std::path::Path;

use axum::extract::rejection::QueryRejection;
use axum::extract::Query;
use serde::Deserialize;

use crate::files;
use crate::http::error::ApiError;
use crate::http::params::FormParams;
use crate::http::request::RequestContext;
use crate::http::response::{Envelope, FileContent, Payload};
use crate::observability::metrics;

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct WriteFileParams {
    pub file_path: String,
    pub file_content: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FilePathParams {
    pub file_path: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DirPathParams {
    pub dir_path: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct GenerateParams {
    #[serde(rename = "dirPath")]
    pub dir_path: String,
    /// Kept as text so a non-integer yields our own 400 message.
    #[serde(rename = "sizeInMB")]
    pub size_in_mb: String,
}

fn required<'a>(name: &str, value: &'a str) -> Result<&'a Path, ApiError> {
    if value.is_empty() {
        return Err(ApiError::BadRequest(format!("{name} is required")));
    }
    Ok(Path::new(value))
}

/// `POST /writeFile`
pub async fn write_file(
    ctx: RequestContext,
    FormParams(params): FormParams<WriteFileParams>,
) -> Result<Envelope, ApiError> {

    // NOTE: logs raw file content.
    tracing::info!(
        file_path = %params.file_path,
        file_content = %params.file_content,
        "Writing file"
    );

    let path = required("filePath", &params.file_path)?;
    files::write_file(path, params.file_content.as_bytes())
        .await
        .map_err(|e| ApiError::Internal(format!("Unable to write to file: {e}")))?;

    Ok(Envelope::empty(&ctx, "File written successfully"))
}

/// `GET /readFile`
pub async fn read_file(
    ctx: RequestContext,
    query: Result<Query<FilePathParams>, QueryRejection>,
) -> Result<Envelope, ApiError> {
    let Query(params) = query?;
    tracing::info!(file_path = %params.file_path, "Reading file");

    let path = required("filePath", &params.file_path)?;
    let file_content = files::read_file(path).await.map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => ApiError::NotFound("File not found".to_string()),
        _ => ApiError::Internal(format!("Unable to read file: {e}")),
    })?;

    Ok(Envelope::new(
        &ctx,
        "File read successfully",
        Payload::FileContent(FileContent { file_content }),
    ))
}

/// `GET /listFiles`
pub async fn list_files(
    ctx: RequestContext,
    query: Result<Query<DirPathParams>, QueryRejection>,
) -> Result<Envelope, ApiError> {
    let Query(params) = query?;
    tracing::info!(dir_path = %params.dir_path, "Listing files");

    let dir = required("dirPath", &params.dir_path)?;
    let entries = files::list_files(dir)
        .await
        .map_err(|e| ApiError::Internal(e.to_string()))?;

    Ok(Envelope::new(
        &ctx,
        "Files listed successfully",
        Payload::Files(entries),
    ))
}

/// `DELETE /deleteFile`. The path comes from the query string only.
pub async fn delete_file(
    ctx: RequestContext,
    query: Result<Query<FilePathParams>, QueryRejection>,
) -> Result<Envelope, ApiError> {
    let Query(params) = query?;
    tracing::info!(file_path = %params.file_path, "Deleting file");

    let path = required("filePath", &params.file_path)?;
    files::delete_file(path).await.map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => ApiError::NotFound(format!("File not found: {e}")),
        _ => ApiError::Internal(format!("Unable to delete file: {e}")),
    })?;

    Ok(Envelope::empty(&ctx, "File deleted successfully"))
}

/// `POST /generateFiles`
pub async fn generate_files(
    ctx: RequestContext,
    FormParams(params): FormParams<GenerateParams>,
) -> Result<Envelope, ApiError> {

    let size_in_mb: u64 = params
        .size_in_mb
        .parse()
        .map_err(|_| ApiError::BadRequest("Invalid size value".to_string()))?;
    let dir = required("dirPath", &params.dir_path)?;

    tracing::info!(dir_path = %params.dir_path, size_in_mb, "Generating files");

    let summary = files::generate_files(dir, size_in_mb)
        .await
        .map_err(|e| ApiError::Internal(format!("Unable to write to file: {e}")))?;

    metrics::record_generated_bytes(summary.bytes_written);
    tracing::info!(
        prefix = %summary.prefix,
        files = summary.files.len(),
        bytes = summary.bytes_written,
        "Files generated"
    );

    Ok(Envelope::empty(&ctx, "Files generated successfully"))
}
