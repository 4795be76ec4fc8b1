use std::collections::{BTreeMap, BTreeSet, btree_map};
use std::path::Path;
use std::sync::Arc;
use tracing::{info, warn};

use crate::analysis::{AnalysisResult, analyze};
use crate::error::{Error, Result, Side};
use crate::format::{percentage_change, size_delta};

use super::changes::{ComparisonResult, FileChange, FileDelta, SizeChange};

/// Diff two analyses.
///
/// Pure apart from logging: no I/O is performed. Fails only when one of the
/// inputs is internally inconsistent.
pub fn compare(
    old_analysis: Arc<AnalysisResult>,
    new_analysis: Arc<AnalysisResult>,
) -> Result<ComparisonResult> {
    old_analysis
        .validate()
        .map_err(|err| Error::comparison_input(Side::Old, err))?;
    new_analysis
        .validate()
        .map_err(|err| Error::comparison_input(Side::New, err))?;

    let old_total = old_analysis.total_size();
    let new_total = new_analysis.total_size();

    let folder_changes = map_changes(old_analysis.folder_sizes(), new_analysis.folder_sizes());
    let type_changes = map_changes(old_analysis.type_sizes(), new_analysis.type_sizes());
    let file_changes = file_changes(&old_analysis, &new_analysis);

    let result = ComparisonResult {
        size_difference: size_delta(old_total, new_total),
        percentage_change: percentage_change(old_total, new_total),
        folder_changes,
        type_changes,
        file_changes,
        old_analysis,
        new_analysis,
    };

    info!(
        old_total,
        new_total,
        size_difference = result.size_difference(),
        changed_files = result.file_changes().len(),
        "compared archives"
    );

    Ok(result)
}

/// Analyze both archives and diff them.
///
/// A failure on either side is reported as
/// [`Error::InvalidComparisonInput`] wrapping the original error.
pub fn compare_archives(old_path: impl AsRef<Path>, new_path: impl AsRef<Path>) -> Result<ComparisonResult> {
    let old = analyze(old_path).map_err(|err| Error::comparison_input(Side::Old, err))?;
    let new = analyze(new_path).map_err(|err| Error::comparison_input(Side::New, err))?;
    compare(Arc::new(old), Arc::new(new))
}

/// Per-key deltas over the union of both maps, zero deltas left out.
fn map_changes(
    old: &BTreeMap<String, u64>,
    new: &BTreeMap<String, u64>,
) -> BTreeMap<String, SizeChange> {
    let keys: BTreeSet<&String> = old.keys().chain(new.keys()).collect();

    keys.into_iter()
        .filter_map(|key| {
            let old_size = old.get(key).copied().unwrap_or(0);
            let new_size = new.get(key).copied().unwrap_or(0);
            let size_difference = size_delta(old_size, new_size);
            (size_difference != 0).then(|| {
                (
                    key.clone(),
                    SizeChange {
                        key: key.clone(),
                        old_size,
                        new_size,
                        size_difference,
                        percentage_change: percentage_change(old_size, new_size),
                    },
                )
            })
        })
        .collect()
}

/// Path-keyed size map; repeated paths inside one archive are summed.
fn sizes_by_path(analysis: &AnalysisResult) -> BTreeMap<&str, u64> {
    let mut sizes: BTreeMap<&str, u64> = BTreeMap::new();
    let mut duplicates = 0usize;
    for entry in analysis.entries() {
        match sizes.entry(entry.path.as_str()) {
            btree_map::Entry::Vacant(slot) => {
                slot.insert(entry.size);
            }
            btree_map::Entry::Occupied(mut slot) => {
                *slot.get_mut() += entry.size;
                duplicates += 1;
            }
        }
    }
    if duplicates > 0 {
        warn!(
            path = %analysis.archive_path().display(),
            duplicates,
            "archive lists some paths more than once; their sizes are summed"
        );
    }
    sizes
}

fn file_changes(old: &AnalysisResult, new: &AnalysisResult) -> Vec<FileChange> {
    let old_sizes = sizes_by_path(old);
    let new_sizes = sizes_by_path(new);
    let paths: BTreeSet<&str> = old_sizes.keys().chain(new_sizes.keys()).copied().collect();

    let mut changes: Vec<FileChange> = paths
        .into_iter()
        .filter_map(|path| {
            let delta = match (old_sizes.get(path), new_sizes.get(path)) {
                (None, Some(&new_size)) => FileDelta::Added { new_size },
                (Some(&old_size), None) => FileDelta::Removed { old_size },
                (Some(&old_size), Some(&new_size)) if old_size != new_size => {
                    FileDelta::Modified { old_size, new_size }
                }
                _ => return None,
            };
            let size_difference = match delta {
                FileDelta::Added { new_size } => size_delta(0, new_size),
                FileDelta::Removed { old_size } => size_delta(old_size, 0),
                FileDelta::Modified { old_size, new_size } => size_delta(old_size, new_size),
            };
            Some(FileChange {
                path: path.to_string(),
                delta,
                size_difference,
            })
        })
        .collect();

    changes.sort_by(|a, b| {
        b.size_difference
            .unsigned_abs()
            .cmp(&a.size_difference.unsigned_abs())
            .then_with(|| a.path.cmp(&b.path))
    });
    changes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::EntryRecord;
    use crate::diff::ChangeKind;
    use crate::zip::CompressionMethod;

    fn analysis(path: &str, files: &[(&str, u64)]) -> Arc<AnalysisResult> {
        let entries = files
            .iter()
            .map(|(name, size)| EntryRecord {
                path: name.to_string(),
                size: *size,
                compressed_size: *size,
                compression_method: CompressionMethod::Deflated,
                crc: 0,
            })
            .collect();
        Arc::new(AnalysisResult::from_entries(path, entries).unwrap())
    }

    #[test]
    fn test_self_diff_is_empty() {
        let a = analysis(
            "a.apk",
            &[("classes.dex", 1000), ("assets/icon.png", 500), ("res/layout/main.xml", 200)],
        );
        let result = compare(a.clone(), a).unwrap();

        assert_eq!(result.size_difference(), 0);
        assert_eq!(result.percentage_change(), 0.0);
        assert!(result.is_unchanged());
        assert!(result.folder_changes().is_empty());
        assert!(result.type_changes().is_empty());
        assert!(result.file_changes().is_empty());
    }

    #[test]
    fn test_total_increase() {
        let old = analysis("old.apk", &[("classes.dex", 1000)]);
        let new = analysis("new.apk", &[("classes.dex", 1200)]);
        let result = compare(old, new).unwrap();

        assert_eq!(result.size_difference(), 200);
        assert_eq!(result.percentage_change(), 20.0);
        assert!(result.is_increased());
        assert!(!result.is_decreased());
        assert_eq!(result.file_changes()[0].kind(), ChangeKind::Modified);
    }

    #[test]
    fn test_added_file() {
        let old = analysis("old.apk", &[("classes.dex", 100)]);
        let new = analysis("new.apk", &[("classes.dex", 100), ("assets/new.bin", 300)]);
        let result = compare(old, new).unwrap();

        let changes = result.file_changes();
        assert_eq!(changes.len(), 1);
        assert_eq!(changes[0].path, "assets/new.bin");
        assert_eq!(changes[0].kind(), ChangeKind::Added);
        assert_eq!(changes[0].old_size(), None);
        assert_eq!(changes[0].new_size(), Some(300));
        assert_eq!(changes[0].size_difference, 300);

        let assets = &result.folder_changes()["assets"];
        assert_eq!(assets.old_size, 0);
        assert_eq!(assets.new_size, 300);
        assert_eq!(assets.percentage_change, 100.0);
    }

    #[test]
    fn test_zero_baseline_percentage() {
        let old = analysis("old.apk", &[]);
        let new = analysis("new.apk", &[("a.bin", 500)]);
        let result = compare(old, new).unwrap();
        assert_eq!(result.percentage_change(), 100.0);
    }

    #[test]
    fn test_removed_and_tie_break_by_path() {
        let old = analysis("old.apk", &[("z/removed.so", 150), ("keep.txt", 10)]);
        let new = analysis("new.apk", &[("a/added.so", 150), ("keep.txt", 10)]);

        for _ in 0..5 {
            let result = compare(old.clone(), new.clone()).unwrap();
            let changes = result.file_changes();
            assert_eq!(changes.len(), 2);
            assert_eq!(changes[0].path, "a/added.so");
            assert_eq!(changes[0].size_difference, 150);
            assert_eq!(changes[1].path, "z/removed.so");
            assert_eq!(changes[1].kind(), ChangeKind::Removed);
            assert_eq!(changes[1].size_difference, -150);
            assert_eq!(result.size_difference(), 0);
        }
    }

    #[test]
    fn test_only_nonzero_folder_and_type_deltas() {
        let old = analysis(
            "old.apk",
            &[("res/a.xml", 10), ("res/b.png", 20), ("lib/x.so", 5)],
        );
        let new = analysis(
            "new.apk",
            &[("res/a.xml", 15), ("res/b.png", 15), ("lib/x.so", 9)],
        );
        let result = compare(old, new).unwrap();

        // res moves 10+20 -> 15+15, so it nets out and is not reported
        assert!(!result.folder_changes().contains_key("res"));
        assert_eq!(result.folder_changes()["lib"].size_difference, 4);
        assert_eq!(result.type_changes()["xml"].size_difference, 5);
        assert_eq!(result.type_changes()["png"].size_difference, -5);
        assert_eq!(result.type_changes()["png"].percentage_change, -25.0);

        let sorted: Vec<_> = result
            .sorted_type_changes()
            .iter()
            .map(|c| c.key.as_str())
            .collect();
        assert_eq!(sorted, ["png", "xml", "so"]);
        assert_eq!(result.change_counts(), (0, 0, 3));
    }

    #[test]
    fn test_duplicate_paths_are_summed() {
        let old = analysis("old.apk", &[("dup.bin", 10), ("dup.bin", 5)]);
        let new = analysis("new.apk", &[("dup.bin", 15)]);
        let result = compare(old, new).unwrap();
        assert!(result.file_changes().is_empty());
    }

    #[test]
    fn test_inconsistent_input_rejected() {
        let good = analysis("good.apk", &[("a.bin", 1)]);
        let bad = Arc::new(AnalysisResult::from_parts(
            "bad.apk",
            42,
            Vec::new(),
            BTreeMap::new(),
            BTreeMap::new(),
        ));

        let err = compare(good, bad).unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidComparisonInput { side: Side::New, .. }
        ));
    }
}
