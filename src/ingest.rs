//! Batch ingestion of every supported document below a directory.
//!
//! Files are discovered with `walkdir`, filtered by extension, and extracted concurrently on
//! tokio's blocking pool. Images and unknown extensions are counted as skipped. One bad file
//! never aborts the batch: its error is reported in the entry list instead.

use crate::processing::{DocumentIntelligence, DocumentKind, UserId};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;
use tokio::task::{JoinError, JoinSet};
use walkdir::WalkDir;

/// Errors that abort a batch.
#[derive(Debug, Error)]
pub enum BatchError {
    /// The batch root is missing or not a directory.
    #[error("Not a directory: {0}")]
    NotADirectory(PathBuf),
    /// An extraction task panicked or was cancelled.
    #[error("Extraction task failed: {0}")]
    Task(#[from] JoinError),
}

/// Outcome for one file in a batch.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum EntryOutcome {
    /// Text was extracted.
    Extracted {
        /// Declared kind derived from the extension.
        kind: DocumentKind,
        /// Characters of extracted text.
        characters: usize,
        /// SHA-256 of the extracted text.
        content_hash: String,
    },
    /// The file could not be read or parsed.
    Failed {
        /// Reason for the failure.
        error: String,
    },
}

/// One processed file.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchEntry {
    /// Path of the file as discovered under the root.
    pub path: String,
    /// What happened to it.
    #[serde(flatten)]
    pub outcome: EntryOutcome,
}

/// Summary of a directory ingestion.
#[derive(Debug, Clone, Default, Serialize)]
pub struct BatchReport {
    /// Per-file outcomes, sorted by path.
    pub entries: Vec<BatchEntry>,
    /// Files ignored because their extension has no text extractor.
    pub skipped: usize,
}

impl BatchReport {
    /// Number of files whose text was extracted.
    pub fn extracted(&self) -> usize {
        self.entries
            .iter()
            .filter(|entry| matches!(entry.outcome, EntryOutcome::Extracted { .. }))
            .count()
    }

    /// Number of files that failed.
    pub fn failed(&self) -> usize {
        self.entries.len() - self.extracted()
    }
}

/// Extract every supported document under `root`.
pub async fn ingest_directory<S>(
    service: Arc<S>,
    user: &UserId,
    root: &Path,
) -> Result<BatchReport, BatchError>
where
    S: DocumentIntelligence + 'static,
{
    if !root.is_dir() {
        return Err(BatchError::NotADirectory(root.to_path_buf()));
    }

    let mut report = BatchReport::default();
    let mut tasks = JoinSet::new();
    for entry in WalkDir::new(root) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                tracing::warn!(error = %err, "Skipping unreadable directory entry");
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.into_path();
        let path_label = path.to_string_lossy().into_owned();
        match DocumentKind::from_filename(&path_label) {
            Ok(DocumentKind::Image) | Err(_) => {
                tracing::debug!(path = %path_label, "Skipping file without text extractor");
                report.skipped += 1;
                continue;
            }
            Ok(_) => {}
        }

        let service = Arc::clone(&service);
        let user = user.clone();
        tasks.spawn_blocking(move || {
            let outcome = match std::fs::read(&path) {
                Ok(bytes) => match service.ingest(&user, &path_label, &bytes) {
                    Ok(ingested) => EntryOutcome::Extracted {
                        kind: ingested.document.kind,
                        characters: ingested.document.characters,
                        content_hash: ingested.document.content_hash,
                    },
                    Err(err) => EntryOutcome::Failed {
                        error: err.to_string(),
                    },
                },
                Err(err) => EntryOutcome::Failed {
                    error: format!("failed to read file: {err}"),
                },
            };
            BatchEntry {
                path: path_label,
                outcome,
            }
        });
    }

    while let Some(joined) = tasks.join_next().await {
        report.entries.push(joined?);
    }
    report.entries.sort_by(|left, right| left.path.cmp(&right.path));

    tracing::info!(
        root = %root.display(),
        extracted = report.extracted(),
        failed = report.failed(),
        skipped = report.skipped,
        "Batch ingestion finished"
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::processing::DocumentService;
    use std::fs;

    fn user() -> UserId {
        UserId::new("batch-user").expect("user id")
    }

    #[tokio::test]
    async fn extracts_supported_files_and_skips_the_rest() {
        let dir = tempfile::tempdir().expect("tempdir");
        fs::write(dir.path().join("a.txt"), "Alpha notes").expect("write");
        fs::create_dir(dir.path().join("nested")).expect("mkdir");
        fs::write(dir.path().join("nested/b.md"), "# Beta").expect("write");
        fs::write(dir.path().join("broken.pdf"), "not a pdf").expect("write");
        fs::write(dir.path().join("photo.png"), [0x89, b'P', b'N', b'G']).expect("write");
        fs::write(dir.path().join("data.csv"), "a,b").expect("write");

        let service = Arc::new(DocumentService::with_config(Config::default()));
        let report = ingest_directory(Arc::clone(&service), &user(), dir.path())
            .await
            .expect("report");

        assert_eq!(report.skipped, 2);
        assert_eq!(report.extracted(), 2);
        assert_eq!(report.failed(), 1);
        assert_eq!(service.usage().documents_processed, 2);

        let paths: Vec<&str> = report.entries.iter().map(|e| e.path.as_str()).collect();
        let mut sorted = paths.clone();
        sorted.sort();
        assert_eq!(paths, sorted);

        let broken = report
            .entries
            .iter()
            .find(|entry| entry.path.ends_with("broken.pdf"))
            .expect("broken entry");
        assert!(matches!(broken.outcome, EntryOutcome::Failed { .. }));
    }

    #[tokio::test]
    async fn missing_root_is_an_error() {
        let service = Arc::new(DocumentService::with_config(Config::default()));
        let result = ingest_directory(service, &user(), Path::new("/definitely/not/here")).await;
        assert!(matches!(result, Err(BatchError::NotADirectory(_))));
    }
}
