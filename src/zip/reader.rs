use std::path::Path;
use tracing::debug;

use crate::analysis::EntryRecord;
use crate::error::{Error, Result};
use crate::io::{LocalFileReader, ReadAt};

use super::parser::ZipParser;
use super::structures::{ZipError, ZipResult};

/// Read the metadata of every file entry in the archive at `path`.
///
/// Directory records are skipped. The archive handle lives only for the
/// duration of this call and is closed on every return path.
pub fn read_entries(path: &Path) -> Result<Vec<EntryRecord>> {
    let reader = LocalFileReader::open(path).map_err(|source| Error::ArchiveIo {
        path: path.to_path_buf(),
        source,
    })?;

    let entries = read_entries_from(&reader).map_err(|err| match err {
        ZipError::Io(source) => Error::ArchiveIo {
            path: path.to_path_buf(),
            source,
        },
        ZipError::Format(reason) => Error::ArchiveFormat {
            path: path.to_path_buf(),
            reason,
        },
    })?;

    debug!(path = %path.display(), files = entries.len(), "read central directory");
    Ok(entries)
}

/// Same as [`read_entries`] for an already opened source.
pub fn read_entries_from<R: ReadAt + ?Sized>(reader: &R) -> ZipResult<Vec<EntryRecord>> {
    let records = ZipParser::new(reader).list_entries()?;

    Ok(records
        .into_iter()
        .filter(|record| !record.is_directory)
        .map(|record| EntryRecord {
            path: record.file_name,
            size: record.uncompressed_size,
            compressed_size: record.compressed_size,
            compression_method: record.compression_method,
            crc: record.crc32,
        })
        .collect())
}
