//! ZIP central directory reading.
//!
//! This module lists the entries of a ZIP archive without touching their
//! payloads, supporting both the standard format and ZIP64 extensions.
//!
//! ## Architecture
//!
//! - [`structures`]: Data structures representing ZIP format elements (EOCD, headers, etc.)
//! - [`parser`]: Low-level parsing of ZIP structures from raw bytes
//! - [`reader`]: Path-level entry listing producing [`EntryRecord`](crate::EntryRecord)s
//!
//! ## ZIP Format Overview
//!
//! A ZIP file consists of:
//! 1. Local file headers and compressed data for each file
//! 2. Central Directory with metadata for all files
//! 3. End of Central Directory (EOCD) record at the end
//!
//! Only the last two are read: the EOCD first (from the end of the file),
//! then the Central Directory in a single read.
//!
//! ## Limitations
//!
//! - Multi-disk archives are rejected as malformed
//! - Local file headers are not cross-checked against the directory

mod parser;
mod reader;
mod structures;

pub use parser::{DirectoryLocation, ZipParser};
pub use reader::{read_entries, read_entries_from};
pub use structures::*;
