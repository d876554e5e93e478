// WHY: Batch annotation of card-text files for the CLI and external tooling
// Reads concurrently with bounded fan-out while keeping results in input order

use anyhow::{Context, Result};
use futures::stream::{self, StreamExt, TryStreamExt};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info, warn};

use crate::annotator::{KeywordAnnotator, OwnedSegment};

/// Configuration for batch annotation behavior
#[derive(Debug, Clone)]
pub struct BatchConfig {
    /// Whether to abort on the first unreadable file
    pub fail_fast: bool,
    /// Maximum number of files read at once
    pub concurrency: usize,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            fail_fast: false,
            concurrency: num_cpus::get(),
        }
    }
}

/// Per-file annotation statistics
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct FileStats {
    pub path: String,
    /// Characters in the source text
    pub chars_processed: u64,
    pub segments: u64,
    pub keyword_segments: u64,
    pub processing_time_ms: u64,
    /// Processing status (success, failed)
    pub status: String,
    pub error: Option<String>,
}

/// Annotation result for one file
#[derive(Debug, Clone)]
pub struct FileAnnotation {
    pub path: PathBuf,
    /// Empty when the file could not be read
    pub segments: Vec<OwnedSegment>,
    pub stats: FileStats,
}

impl FileAnnotation {
    pub fn succeeded(&self) -> bool {
        self.stats.error.is_none()
    }
}

/// Aggregate statistics for a batch run
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct RunStats {
    pub files_processed: u64,
    pub files_failed: u64,
    pub total_chars: u64,
    pub total_keyword_segments: u64,
    pub run_time_ms: u64,
    pub files: Vec<FileStats>,
}

impl RunStats {
    pub fn from_annotations(annotations: &[FileAnnotation], run_time_ms: u64) -> Self {
        let mut stats = RunStats {
            run_time_ms,
            ..Default::default()
        };

        for annotation in annotations {
            if annotation.succeeded() {
                stats.files_processed += 1;
            } else {
                stats.files_failed += 1;
            }
            stats.total_chars += annotation.stats.chars_processed;
            stats.total_keyword_segments += annotation.stats.keyword_segments;
            stats.files.push(annotation.stats.clone());
        }

        stats
    }
}

/// Read and annotate one file
///
/// Read errors are returned when `fail_fast` is set, otherwise recorded in
/// the stats of an empty annotation.
pub async fn annotate_file(
    path: &Path,
    annotator: &KeywordAnnotator,
    fail_fast: bool,
) -> Result<FileAnnotation> {
    let start_time = Instant::now();
    debug!("Annotating file: {}", path.display());

    let text = match tokio::fs::read_to_string(path).await {
        Ok(text) => text,
        Err(e) => {
            let error_msg = format!("Failed to read {}: {}", path.display(), e);
            warn!("{}", error_msg);

            if fail_fast {
                return Err(e).with_context(|| format!("Failed to read {}", path.display()));
            }

            return Ok(FileAnnotation {
                path: path.to_path_buf(),
                segments: Vec::new(),
                stats: FileStats {
                    path: path.display().to_string(),
                    chars_processed: 0,
                    segments: 0,
                    keyword_segments: 0,
                    processing_time_ms: start_time.elapsed().as_millis() as u64,
                    status: "failed".to_string(),
                    error: Some(error_msg),
                },
            });
        }
    };

    let segments = annotator.annotate_owned(&text);
    let keyword_segments = segments.iter().filter(|s| s.is_keyword()).count();

    Ok(FileAnnotation {
        path: path.to_path_buf(),
        stats: FileStats {
            path: path.display().to_string(),
            chars_processed: text.chars().count() as u64,
            segments: segments.len() as u64,
            keyword_segments: keyword_segments as u64,
            processing_time_ms: start_time.elapsed().as_millis() as u64,
            status: "success".to_string(),
            error: None,
        },
        segments,
    })
}

/// Annotate many files, at most `config.concurrency` at a time, in input order
pub async fn annotate_files<P: AsRef<Path>>(
    paths: &[P],
    annotator: &KeywordAnnotator,
    config: &BatchConfig,
) -> Result<Vec<FileAnnotation>> {
    info!("Annotating {} files with concurrency {}", paths.len(), config.concurrency);

    let annotations: Vec<FileAnnotation> = stream::iter(paths)
        .map(|path| annotate_file(path.as_ref(), annotator, config.fail_fast))
        .buffered(config.concurrency.max(1))
        .try_collect()
        .await?;

    let failed = annotations.iter().filter(|a| !a.succeeded()).count();
    info!("Batch annotation completed: {} successful, {} failed", annotations.len() - failed, failed);

    Ok(annotations)
}

/// Write run statistics as pretty JSON
pub async fn write_run_stats(path: &Path, stats: &RunStats) -> Result<()> {
    let content = serde_json::to_string_pretty(stats)?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await?;
    }

    tokio::fs::write(path, content)
        .await
        .with_context(|| format!("Failed to write stats to {}", path.display()))
}
