//! Structural size diff between two analyses.
//!
//! Folders and file types are compared by cumulative size over the union
//! of keys of both sides. Files are compared by path and classified as
//! added, removed or modified; unchanged files are not reported.

mod changes;
mod engine;

pub use changes::{
    ChangeKind, ComparisonResult, FileChange, FileDelta, FolderChange, SizeChange, Trend,
    TypeChange,
};
pub use engine::{compare, compare_archives};
