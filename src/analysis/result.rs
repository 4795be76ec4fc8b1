use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::format::percentage_of;

use super::EntryRecord;
use super::aggregate::aggregate;

/// One row of a folder or file-type breakdown.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SizeShare {
    /// Folder path or extension
    pub key: String,
    pub size: u64,
    /// Share of the archive's total size, in percent
    pub percentage: f64,
}

/// Immutable size breakdown of a single archive.
///
/// Entries are ordered by descending size, ties broken by path.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisResult {
    archive_path: PathBuf,
    total_size: u64,
    total_compressed_size: u64,
    entries: Vec<EntryRecord>,
    folder_sizes: BTreeMap<String, u64>,
    type_sizes: BTreeMap<String, u64>,
    created_at: DateTime<Utc>,
}

impl AnalysisResult {
    /// Aggregate `entries` read from the archive at `archive_path`.
    pub fn from_entries(archive_path: impl Into<PathBuf>, mut entries: Vec<EntryRecord>) -> Result<Self> {
        let archive_path = archive_path.into();
        let totals = aggregate(&entries).map_err(|err| Error::ArchiveFormat {
            path: archive_path.clone(),
            reason: err.to_string(),
        })?;

        sort_entries(&mut entries);

        Ok(Self {
            archive_path,
            total_size: totals.total_size,
            total_compressed_size: totals.total_compressed_size,
            entries,
            folder_sizes: totals.folder_sizes,
            type_sizes: totals.type_sizes,
            created_at: Utc::now(),
        })
    }

    /// Assemble a result from precomputed parts without re-aggregating.
    ///
    /// Nothing is checked here; [`AnalysisResult::validate`] reports
    /// inconsistencies, and comparisons run it on both inputs.
    pub fn from_parts(
        archive_path: impl Into<PathBuf>,
        total_size: u64,
        mut entries: Vec<EntryRecord>,
        folder_sizes: BTreeMap<String, u64>,
        type_sizes: BTreeMap<String, u64>,
    ) -> Self {
        sort_entries(&mut entries);
        let total_compressed_size = entries
            .iter()
            .fold(0u64, |acc, e| acc.saturating_add(e.compressed_size));

        Self {
            archive_path: archive_path.into(),
            total_size,
            total_compressed_size,
            entries,
            folder_sizes,
            type_sizes,
            created_at: Utc::now(),
        }
    }

    pub fn archive_path(&self) -> &Path {
        &self.archive_path
    }

    pub fn total_size(&self) -> u64 {
        self.total_size
    }

    pub fn total_compressed_size(&self) -> u64 {
        self.total_compressed_size
    }

    pub fn entries(&self) -> &[EntryRecord] {
        &self.entries
    }

    pub fn file_count(&self) -> usize {
        self.entries.len()
    }

    pub fn folder_sizes(&self) -> &BTreeMap<String, u64> {
        &self.folder_sizes
    }

    pub fn type_sizes(&self) -> &BTreeMap<String, u64> {
        &self.type_sizes
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Folders by cumulative size, largest first.
    pub fn folder_summary(&self) -> Vec<SizeShare> {
        summarize(&self.folder_sizes, self.total_size)
    }

    /// Extensions by cumulative size, largest first.
    pub fn file_type_summary(&self) -> Vec<SizeShare> {
        summarize(&self.type_sizes, self.total_size)
    }

    /// Check that the total matches the entry sizes.
    pub fn validate(&self) -> Result<()> {
        let sum = self
            .entries
            .iter()
            .try_fold(0u64, |acc, e| acc.checked_add(e.size));

        match sum {
            Some(sum) if sum == self.total_size => Ok(()),
            Some(sum) => Err(Error::Malformed {
                path: self.archive_path.clone(),
                reason: format!(
                    "total size {} does not match entry sum {}",
                    self.total_size, sum
                ),
            }),
            None => Err(Error::Malformed {
                path: self.archive_path.clone(),
                reason: "entry sizes overflow".to_string(),
            }),
        }
    }
}

fn sort_entries(entries: &mut [EntryRecord]) {
    entries.sort_by(|a, b| b.size.cmp(&a.size).then_with(|| a.path.cmp(&b.path)));
}

fn summarize(sizes: &BTreeMap<String, u64>, total: u64) -> Vec<SizeShare> {
    let mut rows: Vec<SizeShare> = sizes
        .iter()
        .map(|(key, &size)| SizeShare {
            key: key.clone(),
            size,
            percentage: percentage_of(size, total),
        })
        .collect();
    // BTreeMap iteration is already key-ordered, so a stable sort keeps ties by key
    rows.sort_by(|a, b| b.size.cmp(&a.size));
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::zip::CompressionMethod;

    fn entry(path: &str, size: u64) -> EntryRecord {
        EntryRecord {
            path: path.to_string(),
            size,
            compressed_size: size,
            compression_method: CompressionMethod::Stored,
            crc: 0,
        }
    }

    fn scenario() -> AnalysisResult {
        AnalysisResult::from_entries(
            "/test/app.apk",
            vec![
                entry("res/layout/main.xml", 200),
                entry("classes.dex", 1000),
                entry("assets/icon.png", 500),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_entries_sorted_by_size() {
        let result = scenario();
        let paths: Vec<_> = result.entries().iter().map(|e| e.path.as_str()).collect();
        assert_eq!(paths, ["classes.dex", "assets/icon.png", "res/layout/main.xml"]);
        assert_eq!(result.total_size(), 1700);
        assert_eq!(result.file_count(), 3);
        assert!(result.validate().is_ok());
    }

    #[test]
    fn test_folder_summary() {
        let summary = scenario().folder_summary();
        assert_eq!(summary.len(), 3);
        assert_eq!(summary[0].key, "assets");
        assert_eq!(summary[0].size, 500);
        assert!((summary[0].percentage - 29.41).abs() < 0.01);
        // "res" and "res/layout" tie at 200 and fall back to key order
        assert_eq!(summary[1].key, "res");
        assert_eq!(summary[2].key, "res/layout");
    }

    #[test]
    fn test_file_type_summary() {
        let summary = scenario().file_type_summary();
        let keys: Vec<_> = summary.iter().map(|s| s.key.as_str()).collect();
        assert_eq!(keys, ["dex", "png", "xml"]);
        let total: f64 = summary.iter().map(|s| s.percentage).sum();
        assert!((total - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_summaries_with_zero_total() {
        let result = AnalysisResult::from_entries(
            "empty.apk",
            vec![entry("assets/empty.txt", 0), entry("blank", 0)],
        )
        .unwrap();

        for row in result.folder_summary().iter().chain(&result.file_type_summary()) {
            assert_eq!(row.percentage, 0.0);
            assert!(!row.percentage.is_nan());
        }
    }

    #[test]
    fn test_validate_detects_total_mismatch() {
        let result = AnalysisResult::from_parts(
            "bad.apk",
            999,
            vec![entry("a.bin", 10)],
            BTreeMap::new(),
            BTreeMap::new(),
        );
        assert!(matches!(result.validate(), Err(Error::Malformed { .. })));
    }
}
