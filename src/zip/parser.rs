//! Low-level central directory parser.
//!
//! This module handles the binary parsing of ZIP directory structures,
//! reading from any source that implements the [`ReadAt`] trait.
//!
//! ## Parsing Strategy
//!
//! ZIP files are designed to be read from the end:
//! 1. Find the End of Central Directory (EOCD) at the file's end
//! 2. If a ZIP64 locator precedes it, read the ZIP64 EOCD for large file support
//! 3. Read the Central Directory to get metadata for all files
//!
//! Entry payloads and local file headers are never touched.

use byteorder::{LittleEndian, ReadBytesExt};
use std::io::{Cursor, Read};
use tracing::{debug, warn};

use crate::io::ReadAt;

use super::structures::*;

/// Maximum ZIP comment size allowed by the format (65535 bytes).
///
/// This limits the search area when looking for EOCD with a comment.
const MAX_COMMENT_SIZE: u64 = 65535;

/// Location and size of the central directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DirectoryLocation {
    pub offset: u64,
    pub size: u64,
    pub total_entries: u64,
}

/// Low-level ZIP directory parser.
///
/// Borrows the reader for its whole lifetime, so the handle it reads from
/// cannot be released while parsing is in progress.
pub struct ZipParser<'a, R: ReadAt + ?Sized> {
    /// The underlying data source
    reader: &'a R,
    /// Total size of the archive in bytes
    size: u64,
}

impl<'a, R: ReadAt + ?Sized> ZipParser<'a, R> {
    pub fn new(reader: &'a R) -> Self {
        let size = reader.size();
        Self { reader, size }
    }

    /// Find and parse the End of Central Directory record.
    ///
    /// Handles both the simple case (no comment) and archives with
    /// comments by searching backwards for the signature.
    ///
    /// # Returns
    ///
    /// A tuple of (EOCD record, offset of EOCD in file).
    pub fn find_eocd(&self) -> ZipResult<(EndOfCentralDirectory, u64)> {
        let record_size = EndOfCentralDirectory::SIZE as u64;
        if self.size < record_size {
            return Err(ZipError::format(
                "file too small to hold an End of Central Directory record",
            ));
        }

        // Common case: no archive comment, EOCD sits at the very end
        let offset = self.size - record_size;
        let mut buf = vec![0u8; EndOfCentralDirectory::SIZE];
        self.reader.read_exact_at(offset, &mut buf)?;

        if &buf[0..4] == EndOfCentralDirectory::SIGNATURE && &buf[20..22] == b"\x00\x00" {
            let eocd = EndOfCentralDirectory::from_bytes(&buf)?;
            return Ok((eocd, offset));
        }

        let search_size = (MAX_COMMENT_SIZE + record_size).min(self.size);
        let search_start = self.size - search_size;

        let mut buf = vec![0u8; search_size as usize];
        self.reader.read_exact_at(search_start, &mut buf)?;

        // Search backwards for EOCD signature (PK\x05\x06)
        for i in (0..=buf.len() - EndOfCentralDirectory::SIZE).rev() {
            if &buf[i..i + 4] == EndOfCentralDirectory::SIGNATURE {
                // The comment length field must account for every trailing byte
                let comment_len = u16::from_le_bytes([buf[i + 20], buf[i + 21]]) as usize;

                if comment_len == buf.len() - i - EndOfCentralDirectory::SIZE {
                    let eocd = EndOfCentralDirectory::from_bytes(
                        &buf[i..i + EndOfCentralDirectory::SIZE],
                    )?;
                    return Ok((eocd, search_start + i as u64));
                }
            }
        }

        Err(ZipError::format(
            "End of Central Directory signature not found",
        ))
    }

    /// Read the ZIP64 locator that sits immediately before the EOCD.
    ///
    /// Returns `None` when no locator signature is present, in which case
    /// the regular EOCD values are authoritative even if saturated.
    pub fn find_zip64_locator(&self, eocd_offset: u64) -> ZipResult<Option<Zip64EOCDLocator>> {
        let Some(locator_offset) = eocd_offset.checked_sub(Zip64EOCDLocator::SIZE as u64) else {
            return Ok(None);
        };
        let mut locator_buf = vec![0u8; Zip64EOCDLocator::SIZE];
        self.reader.read_exact_at(locator_offset, &mut locator_buf)?;

        if &locator_buf[0..4] != Zip64EOCDLocator::SIGNATURE {
            return Ok(None);
        }
        Zip64EOCDLocator::from_bytes(&locator_buf).map(Some)
    }

    /// Read the ZIP64 End of Central Directory record the locator points at.
    pub fn read_zip64_eocd(&self, locator: &Zip64EOCDLocator) -> ZipResult<Zip64EOCD> {
        let mut eocd64_buf = vec![0u8; Zip64EOCD::MIN_SIZE];
        self.reader
            .read_exact_at(locator.eocd64_offset, &mut eocd64_buf)?;

        Zip64EOCD::from_bytes(&eocd64_buf)
    }

    /// Resolve where the central directory lives, following ZIP64 records when needed.
    pub fn locate_directory(&self) -> ZipResult<DirectoryLocation> {
        let (eocd, eocd_offset) = self.find_eocd()?;

        let locator = if eocd.is_zip64() {
            self.find_zip64_locator(eocd_offset)?
        } else {
            None
        };

        let location = match &locator {
            Some(locator) => {
                let eocd64 = self.read_zip64_eocd(locator)?;
                if locator.is_multi_disk() || eocd64.is_multi_disk() {
                    return Err(ZipError::format("multi-disk archives are not supported"));
                }
                DirectoryLocation {
                    offset: eocd64.cd_offset,
                    size: eocd64.cd_size,
                    total_entries: eocd64.total_entries,
                }
            }
            None => {
                if eocd.is_multi_disk() {
                    return Err(ZipError::format("multi-disk archives are not supported"));
                }
                DirectoryLocation {
                    offset: eocd.cd_offset as u64,
                    size: eocd.cd_size as u64,
                    total_entries: eocd.total_entries as u64,
                }
            }
        };

        let end = location
            .offset
            .checked_add(location.size)
            .ok_or_else(|| ZipError::format("central directory bounds overflow"))?;
        if end > self.size {
            return Err(ZipError::format(format!(
                "central directory ({} bytes at offset {}) extends past end of file ({} bytes)",
                location.size, location.offset, self.size
            )));
        }

        debug!(
            offset = location.offset,
            size = location.size,
            entries = location.total_entries,
            zip64 = locator.is_some(),
            "located central directory"
        );

        Ok(location)
    }

    /// List every record in the central directory, directories included.
    ///
    /// The whole directory is read and parsed before returning; any
    /// structural error aborts the listing.
    pub fn list_entries(&self) -> ZipResult<Vec<CentralDirectoryEntry>> {
        let location = self.locate_directory()?;

        // Read the entire Central Directory in one request
        let mut cd_data = vec![0u8; location.size as usize];
        self.reader.read_exact_at(location.offset, &mut cd_data)?;

        // Every header needs at least CDFH_MIN_SIZE bytes, so cap the
        // preallocation by what the directory can actually hold
        let capacity = location
            .total_entries
            .min(location.size / CDFH_MIN_SIZE as u64);
        let mut entries = Vec::with_capacity(capacity as usize);
        let mut cursor = Cursor::new(cd_data.as_slice());

        for _ in 0..location.total_entries {
            let entry = parse_cdfh(&mut cursor)?;
            entries.push(entry);
        }

        let trailing = location.size.saturating_sub(cursor.position());
        if trailing > 0 {
            warn!(
                trailing_bytes = trailing,
                "central directory holds more data than its declared entry count"
            );
        }

        Ok(entries)
    }
}

/// Parse a Central Directory File Header from a cursor.
fn parse_cdfh(cursor: &mut Cursor<&[u8]>) -> ZipResult<CentralDirectoryEntry> {
    let mut sig = [0u8; 4];
    cursor.read_exact(&mut sig)?;
    if sig != CDFH_SIGNATURE {
        return Err(ZipError::format(format!(
            "invalid Central Directory File Header signature at directory offset {}",
            cursor.position() - 4
        )));
    }

    let _version_made_by = cursor.read_u16::<LittleEndian>()?;
    let _version_needed = cursor.read_u16::<LittleEndian>()?;
    let _flags = cursor.read_u16::<LittleEndian>()?;
    let compression_method = cursor.read_u16::<LittleEndian>()?;
    let _last_mod_time = cursor.read_u16::<LittleEndian>()?;
    let _last_mod_date = cursor.read_u16::<LittleEndian>()?;
    let crc32 = cursor.read_u32::<LittleEndian>()?;
    let mut compressed_size = cursor.read_u32::<LittleEndian>()? as u64;
    let mut uncompressed_size = cursor.read_u32::<LittleEndian>()? as u64;
    let file_name_length = cursor.read_u16::<LittleEndian>()?;
    let extra_field_length = cursor.read_u16::<LittleEndian>()?;
    let file_comment_length = cursor.read_u16::<LittleEndian>()?;
    let _disk_number_start = cursor.read_u16::<LittleEndian>()?;
    let _internal_attrs = cursor.read_u16::<LittleEndian>()?;
    let _external_attrs = cursor.read_u32::<LittleEndian>()?;
    let _lfh_offset = cursor.read_u32::<LittleEndian>()?;

    let mut file_name_bytes = vec![0u8; file_name_length as usize];
    cursor.read_exact(&mut file_name_bytes)?;
    // Non-UTF8 names are kept with replacement characters
    let file_name = String::from_utf8_lossy(&file_name_bytes).into_owned();

    if file_name.is_empty() {
        return Err(ZipError::format("central directory entry with an empty name"));
    }

    let is_directory = file_name.ends_with('/');

    let extra_field_end = cursor.position() + extra_field_length as u64;
    if extra_field_end > cursor.get_ref().len() as u64 {
        return Err(ZipError::format("extra field runs past the central directory"));
    }

    while cursor.position() + 4 <= extra_field_end {
        let header_id = cursor.read_u16::<LittleEndian>()?;
        let field_size = cursor.read_u16::<LittleEndian>()?;
        let field_end = (cursor.position() + field_size as u64).min(extra_field_end);

        if header_id == ZIP64_EXTRA_ID {
            // Fields are present only if the matching header field is saturated
            if uncompressed_size == 0xFFFFFFFF && cursor.position() + 8 <= field_end {
                uncompressed_size = cursor.read_u64::<LittleEndian>()?;
            }
            if compressed_size == 0xFFFFFFFF && cursor.position() + 8 <= field_end {
                compressed_size = cursor.read_u64::<LittleEndian>()?;
            }
        }

        cursor.set_position(field_end);
    }

    cursor.set_position(extra_field_end);

    let comment_end = cursor.position() + file_comment_length as u64;
    if comment_end > cursor.get_ref().len() as u64 {
        return Err(ZipError::format("file comment runs past the central directory"));
    }
    cursor.set_position(comment_end);

    Ok(CentralDirectoryEntry {
        file_name,
        compression_method: CompressionMethod::from_u16(compression_method),
        compressed_size,
        uncompressed_size,
        crc32,
        is_directory,
    })
}
