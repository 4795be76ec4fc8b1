use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use crate::analysis::AnalysisResult;

/// Size movement of one folder or file type between two archives.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SizeChange {
    /// Folder path or extension
    pub key: String,
    pub old_size: u64,
    pub new_size: u64,
    pub size_difference: i64,
    pub percentage_change: f64,
}

pub type FolderChange = SizeChange;
pub type TypeChange = SizeChange;

/// Classification of a path that differs between two archives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ChangeKind {
    Added,
    Removed,
    Modified,
}

impl fmt::Display for ChangeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChangeKind::Added => f.pad("ADDED"),
            ChangeKind::Removed => f.pad("REMOVED"),
            ChangeKind::Modified => f.pad("MODIFIED"),
        }
    }
}

/// Sizes on each side of a file change; only the sides that exist are stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FileDelta {
    Added { new_size: u64 },
    Removed { old_size: u64 },
    Modified { old_size: u64, new_size: u64 },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileChange {
    pub path: String,
    #[serde(flatten)]
    pub delta: FileDelta,
    pub size_difference: i64,
}

impl FileChange {
    pub fn kind(&self) -> ChangeKind {
        match self.delta {
            FileDelta::Added { .. } => ChangeKind::Added,
            FileDelta::Removed { .. } => ChangeKind::Removed,
            FileDelta::Modified { .. } => ChangeKind::Modified,
        }
    }

    pub fn old_size(&self) -> Option<u64> {
        match self.delta {
            FileDelta::Added { .. } => None,
            FileDelta::Removed { old_size } | FileDelta::Modified { old_size, .. } => {
                Some(old_size)
            }
        }
    }

    pub fn new_size(&self) -> Option<u64> {
        match self.delta {
            FileDelta::Removed { .. } => None,
            FileDelta::Added { new_size } | FileDelta::Modified { new_size, .. } => {
                Some(new_size)
            }
        }
    }
}

/// Direction of the overall size movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Increased,
    Decreased,
    Unchanged,
}

impl fmt::Display for Trend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Trend::Increased => f.pad("increased"),
            Trend::Decreased => f.pad("decreased"),
            Trend::Unchanged => f.pad("unchanged"),
        }
    }
}

/// Immutable diff between two analyses.
///
/// Both analyses are shared handles, so one analysis can take part in
/// several comparisons at once.
#[derive(Debug, Clone, Serialize)]
pub struct ComparisonResult {
    pub(crate) old_analysis: Arc<AnalysisResult>,
    pub(crate) new_analysis: Arc<AnalysisResult>,
    pub(crate) size_difference: i64,
    pub(crate) percentage_change: f64,
    pub(crate) folder_changes: BTreeMap<String, FolderChange>,
    pub(crate) type_changes: BTreeMap<String, TypeChange>,
    pub(crate) file_changes: Vec<FileChange>,
}

impl ComparisonResult {
    pub fn old_analysis(&self) -> &Arc<AnalysisResult> {
        &self.old_analysis
    }

    pub fn new_analysis(&self) -> &Arc<AnalysisResult> {
        &self.new_analysis
    }

    pub fn size_difference(&self) -> i64 {
        self.size_difference
    }

    pub fn percentage_change(&self) -> f64 {
        self.percentage_change
    }

    /// Folders whose cumulative size changed, keyed by folder path.
    pub fn folder_changes(&self) -> &BTreeMap<String, FolderChange> {
        &self.folder_changes
    }

    /// Extensions whose cumulative size changed.
    pub fn type_changes(&self) -> &BTreeMap<String, TypeChange> {
        &self.type_changes
    }

    /// Changed files, largest absolute difference first, ties by path.
    pub fn file_changes(&self) -> &[FileChange] {
        &self.file_changes
    }

    pub fn trend(&self) -> Trend {
        match self.size_difference {
            d if d > 0 => Trend::Increased,
            d if d < 0 => Trend::Decreased,
            _ => Trend::Unchanged,
        }
    }

    pub fn is_increased(&self) -> bool {
        self.trend() == Trend::Increased
    }

    pub fn is_decreased(&self) -> bool {
        self.trend() == Trend::Decreased
    }

    pub fn is_unchanged(&self) -> bool {
        self.trend() == Trend::Unchanged
    }

    /// Folder changes ordered like file changes (largest movement first).
    pub fn sorted_folder_changes(&self) -> Vec<&FolderChange> {
        sort_by_magnitude(self.folder_changes.values())
    }

    /// Type changes ordered like file changes (largest movement first).
    pub fn sorted_type_changes(&self) -> Vec<&TypeChange> {
        sort_by_magnitude(self.type_changes.values())
    }

    /// Number of file changes of each kind, as (added, removed, modified).
    pub fn change_counts(&self) -> (usize, usize, usize) {
        self.file_changes
            .iter()
            .fold((0, 0, 0), |(a, r, m), change| match change.kind() {
                ChangeKind::Added => (a + 1, r, m),
                ChangeKind::Removed => (a, r + 1, m),
                ChangeKind::Modified => (a, r, m + 1),
            })
    }
}

fn sort_by_magnitude<'a>(changes: impl Iterator<Item = &'a SizeChange>) -> Vec<&'a SizeChange> {
    let mut sorted: Vec<_> = changes.collect();
    sorted.sort_by(|a, b| {
        b.size_difference
            .unsigned_abs()
            .cmp(&a.size_difference.unsigned_abs())
            .then_with(|| a.key.cmp(&b.key))
    });
    sorted
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_change_accessors() {
        let added = FileChange {
            path: "new_file.txt".to_string(),
            delta: FileDelta::Added { new_size: 100 },
            size_difference: 100,
        };
        let removed = FileChange {
            path: "old_file.txt".to_string(),
            delta: FileDelta::Removed { old_size: 200 },
            size_difference: -200,
        };
        let modified = FileChange {
            path: "modified_file.txt".to_string(),
            delta: FileDelta::Modified {
                old_size: 150,
                new_size: 180,
            },
            size_difference: 30,
        };

        assert_eq!(added.kind(), ChangeKind::Added);
        assert_eq!(added.old_size(), None);
        assert_eq!(added.new_size(), Some(100));

        assert_eq!(removed.kind(), ChangeKind::Removed);
        assert_eq!(removed.old_size(), Some(200));
        assert_eq!(removed.new_size(), None);

        assert_eq!(modified.kind(), ChangeKind::Modified);
        assert_eq!(modified.old_size(), Some(150));
        assert_eq!(modified.new_size(), Some(180));
    }

    #[test]
    fn test_file_change_json_shape() {
        let change = FileChange {
            path: "lib/x86/libnative.so".to_string(),
            delta: FileDelta::Added { new_size: 300 },
            size_difference: 300,
        };
        let json = serde_json::to_value(&change).unwrap();
        assert_eq!(json["kind"], "added");
        assert_eq!(json["new_size"], 300);
        assert!(json.get("old_size").is_none());
    }

    #[test]
    fn test_display_honors_width() {
        assert_eq!(format!("{:<8}|", ChangeKind::Added), "ADDED   |");
        assert_eq!(format!("{:>9}", Trend::Unchanged), "unchanged");
        assert_eq!(format!("{:>10}", Trend::Increased), " increased");
    }
}
