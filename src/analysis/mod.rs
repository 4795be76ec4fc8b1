//! Single-archive size analysis.

pub mod aggregate;
mod entry;
mod result;

pub use aggregate::{Aggregates, NO_EXTENSION, SizeAggregator, aggregate};
pub use entry::EntryRecord;
pub use result::{AnalysisResult, SizeShare};

use std::path::Path;
use std::time::Instant;
use tracing::info;

use crate::error::Result;
use crate::zip::read_entries;

/// Read and aggregate the archive at `path`.
///
/// Either a complete result is returned or nothing at all.
pub fn analyze(path: impl AsRef<Path>) -> Result<AnalysisResult> {
    let path = path.as_ref();
    let started = Instant::now();

    let entries = read_entries(path)?;
    // Keep the absolute path when it can be resolved, as reports show it
    let archive_path = std::fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());
    let result = AnalysisResult::from_entries(archive_path, entries)?;

    info!(
        path = %result.archive_path().display(),
        files = result.file_count(),
        total_size = result.total_size(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "analyzed archive"
    );

    Ok(result)
}
