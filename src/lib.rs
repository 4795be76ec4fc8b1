//! # apksize
//!
//! Size breakdown and size-regression diffing for zip-based application
//! packages (APK, AAB, JAR, or any other zip archive).
//!
//! Only the archive's central directory is read; entry payloads are never
//! decompressed. From the directory the crate builds:
//!
//! - a per-archive [`AnalysisResult`] with total size, folder sizes rolled up
//!   through every ancestor folder, and sizes per file extension
//! - a [`ComparisonResult`] between two analyses with per-folder, per-type
//!   and per-file deltas
//!
//! ## Example
//!
//! ```no_run
//! use apksize::{analyze, compare_archives};
//!
//! fn main() -> apksize::Result<()> {
//!     let analysis = analyze("app-release.apk")?;
//!     for folder in analysis.folder_summary().iter().take(5) {
//!         println!("{:>6.1}%  {}", folder.percentage, folder.key);
//!     }
//!
//!     let diff = compare_archives("baseline.apk", "app-release.apk")?;
//!     println!("{} bytes ({:+.2}%)", diff.size_difference(), diff.percentage_change());
//!     for change in diff.file_changes().iter().take(10) {
//!         println!("{:<8} {:>10} {}", change.kind(), change.size_difference, change.path);
//!     }
//!     Ok(())
//! }
//! ```

pub mod analysis;
pub mod budget;
pub mod cli;
pub mod diff;
pub mod error;
pub mod format;
pub mod io;
pub mod logging;
pub mod report;
pub mod session;
pub mod zip;

pub use analysis::{AnalysisResult, EntryRecord, SizeShare, analyze};
pub use diff::{
    ChangeKind, ComparisonResult, FileChange, FileDelta, FolderChange, SizeChange, Trend,
    TypeChange, compare, compare_archives,
};
pub use error::{Error, ErrorKind, Result, Side};
pub use session::Session;
pub use zip::{CompressionMethod, read_entries};
