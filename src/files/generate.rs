//! Bulk filler-file generation.
//!
//! A request for `N` megabytes becomes `N / 10` files of 10 MB plus one
//! `N % 10` MB remainder file. Filler content is a fixed 36-byte pattern
//! repeated a whole number of times, so each file is the requested size
//! rounded down to a multiple of 36 bytes (10 MB → 10 485 756 bytes).

use std::io;
use std::path::{Path, PathBuf};

use crate::files::ops::write_contents;
use crate::identity::compact_id;

/// Repeated to fill generated files.
pub const FILLER_PATTERN: &[u8; 36] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Size of every non-remainder file, in megabytes.
pub const FULL_FILE_MB: u64 = 10;

const BYTES_PER_MB: u64 = 1024 * 1024;

/// Filler for a file of `size_mb` megabytes, truncated to whole patterns.
pub fn filler_content(size_mb: u64) -> Vec<u8> {
    let repetitions = size_mb * BYTES_PER_MB / FILLER_PATTERN.len() as u64;
    FILLER_PATTERN.repeat(repetitions as usize)
}

/// How a total size splits into files.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeneratePlan {
    pub full_files: u64,
    pub remainder_mb: u64,
}

impl GeneratePlan {
    pub fn for_size(size_mb: u64) -> Self {
        Self {
            full_files: size_mb / FULL_FILE_MB,
            remainder_mb: size_mb % FULL_FILE_MB,
        }
    }

    /// Total number of files the plan writes.
    pub fn file_count(&self) -> u64 {
        self.full_files + u64::from(self.remainder_mb > 0)
    }
}

/// What a successful run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateSummary {
    pub prefix: String,
    pub files: Vec<PathBuf>,
    pub bytes_written: u64,
}

fn full_file_name(prefix: &str, sequence: u64) -> String {
    format!("{prefix}_file_{sequence}.txt")
}

fn last_file_name(prefix: &str) -> String {
    format!("{prefix}_file_last.txt")
}

/// Write `size_mb` megabytes of filler under `dir`.
///
/// `dir` must already exist. Files are written one after another and the
/// first failure stops the run; files written before it are left in place.
pub async fn generate_files(
    dir: &Path,
    size_mb: u64,
) -> io::Result<GenerateSummary> {
    let plan = GeneratePlan::for_size(size_mb);
    let prefix = compact_id();

    let mut summary = GenerateSummary {
        prefix: prefix.clone(),
        files: Vec::new(),
        bytes_written: 0,
    };

    if plan.full_files > 0 {
        let content = filler_content(FULL_FILE_MB);
        for sequence in 1..=plan.full_files {
            let path = dir.join(full_file_name(&prefix, sequence));
            write_contents(&path, &content).await?;
            tracing::debug!(
                path = %path.display(),
                bytes = content.len(),
                "Generated file"
            );
            summary.bytes_written += content.len() as u64;
            summary.files.push(path);
        }
    }

    if plan.remainder_mb > 0 {
        let content = filler_content(plan.remainder_mb);
        let path = dir.join(last_file_name(&prefix));
        write_contents(&path, &content).await?;
        tracing::debug!(
            path = %path.display(),
            bytes = content.len(),
            "Generated file"
        );
        summary.bytes_written += content.len() as u64;
        summary.files.push(path);
    }

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plan_arithmetic() {
        let plan = |full_files, remainder_mb| GeneratePlan {
            full_files,
            remainder_mb,
        };
        assert_eq!(GeneratePlan::for_size(25), plan(2, 5));
        assert_eq!(GeneratePlan::for_size(7), plan(0, 7));
        assert_eq!(GeneratePlan::for_size(30), plan(3, 0));
        assert_eq!(GeneratePlan::for_size(0).file_count(), 0);
        assert_eq!(GeneratePlan::for_size(25).file_count(), 3);
        assert_eq!(GeneratePlan::for_size(30).file_count(), 3);
    }

    #[test]
    fn test_filler_truncates_to_whole_patterns() {
        let ten = filler_content(10);
        assert_eq!(ten.len(), 10_485_756);
        assert_eq!(ten.len() % 36, 0);
        assert_eq!(&ten[..36], FILLER_PATTERN);

        assert_eq!(filler_content(1).len(), 1_048_572);
        assert!(filler_content(0).is_empty());
    }

    #[tokio::test]
    async fn test_generate_full_and_remainder() {
        let dir = tempfile::tempdir().unwrap();
        let summary = generate_files(dir.path(), 25).await.unwrap();

        assert_eq!(summary.prefix.len(), 32);
        assert_eq!(summary.files.len(), 3);
        assert_eq!(summary.bytes_written, 2 * 10_485_756 + 5_242_860);

        let first = dir.path().join(format!("{}_file_1.txt", summary.prefix));
        let second = dir.path().join(format!("{}_file_2.txt", summary.prefix));
        let last = dir.path().join(format!("{}_file_last.txt", summary.prefix));
        assert_eq!(std::fs::metadata(first).unwrap().len(), 10_485_756);
        assert_eq!(std::fs::metadata(second).unwrap().len(), 10_485_756);
        assert_eq!(std::fs::metadata(last).unwrap().len(), 5_242_860);
    }

    #[tokio::test]
    async fn test_generate_remainder_only() {
        let dir = tempfile::tempdir().unwrap();
        let summary = generate_files(dir.path(), 7).await.unwrap();

        assert_eq!(summary.files.len(), 1);
        let last = format!("{}_file_last.txt", summary.prefix);
        assert!(summary.files[0].ends_with(last));
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[tokio::test]
    async fn test_generate_zero_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let summary = generate_files(dir.path(), 0).await.unwrap();
        assert!(summary.files.is_empty());
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn test_generate_into_missing_dir_fails() {
        let dir = tempfile::tempdir().unwrap();
        let err = generate_files(&dir.path().join("missing"), 3)
            .await
            .unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_generate_max_size_fails_on_first_write() {
        let dir = tempfile::tempdir().unwrap();
        let err = generate_files(&dir.path().join("missing"), u64::MAX)
            .await
            .unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }
}
