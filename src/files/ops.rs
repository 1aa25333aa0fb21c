//! Single-entry file operations.

use std::io;
use std::path::{Path, PathBuf};

use serde::Serialize;

/// Mode for files this service creates (owner rw, group/other r).
pub const FILE_MODE: u32 = 0o644;

/// Mode for parent directories created on write.
pub const DIR_MODE: u32 = 0o755;

/// One directory child as reported by [`list_files`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileEntry {
    pub file_name: String,
    /// Size in bytes, symlinks followed.
    pub size: u64,
}

/// Failure while listing a directory. Either variant aborts the listing.
#[derive(Debug, thiserror::Error)]
pub enum ListError {
    #[error("Unable to read directory: {0}")]
    ReadDir(#[source] io::Error),

    #[error("Unable to get info for file {}: {source}", .path.display())]
    Metadata {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Create or truncate `path` and write `content` as its entire contents.
///
/// Missing parent directories are created first unless the parent is empty
/// or the current-directory marker.
pub async fn write_file(path: &Path, content: &[u8]) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && parent != Path::new(".") {
            create_dirs(parent).await?;
        }
    }
    write_contents(path, content).await
}

/// Write bytes without touching parent directories.
pub(crate) async fn write_contents(path: &Path, content: &[u8]) -> io::Result<()> {
    use tokio::io::AsyncWriteExt;

    let mut options = tokio::fs::OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    options.mode(FILE_MODE);

    let mut file = options.open(path).await?;
    file.write_all(content).await?;
    file.flush().await
}

async fn create_dirs(dir: &Path) -> io::Result<()> {
    let mut builder = tokio::fs::DirBuilder::new();
    builder.recursive(true);
    #[cfg(unix)]
    builder.mode(DIR_MODE);
    builder.create(dir).await
}

/// Read the whole file, decoding it as UTF-8 with invalid sequences replaced.
pub async fn read_file(path: &Path) -> io::Result<String> {
    let bytes = tokio::fs::read(path).await?;
    Ok(match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(e) => String::from_utf8_lossy(e.as_bytes()).into_owned(),
    })
}

/// List the direct children of `dir` with their sizes, sorted by name.
///
/// Any metadata failure discards the partial result.
pub async fn list_files(dir: &Path) -> Result<Vec<FileEntry>, ListError> {
    let mut reader = tokio::fs::read_dir(dir).await.map_err(ListError::ReadDir)?;

    let mut entries = Vec::new();
    while let Some(entry) = reader.next_entry().await.map_err(ListError::ReadDir)? {
        let path = dir.join(entry.file_name());
        let metadata = tokio::fs::metadata(&path)
            .await
            .map_err(|source| ListError::Metadata { path: path.clone(), source })?;

        entries.push(FileEntry {
            file_name: entry.file_name().to_string_lossy().into_owned(),
            size: metadata.len(),
        });
    }

    entries.sort_by(|a, b| a.file_name.cmp(&b.file_name));
    Ok(entries)
}

/// Remove exactly one entry: a file, a symlink, or an empty directory.
pub async fn delete_file(path: &Path) -> io::Result<()> {
    let metadata = tokio::fs::symlink_metadata(path).await?;
    if metadata.is_dir() {
        tokio::fs::remove_dir(path).await
    } else {
        tokio::fs::remove_file(path).await
    }
}
