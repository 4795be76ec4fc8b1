use serde::Serialize;

use crate::zip::CompressionMethod;

/// Metadata of one file entry, as recorded in the central directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntryRecord {
    /// Full '/'-separated path inside the archive
    pub path: String,
    /// Uncompressed size in bytes
    pub size: u64,
    pub compressed_size: u64,
    pub compression_method: CompressionMethod,
    pub crc: u32,
}

impl EntryRecord {
    /// Final path segment.
    pub fn file_name(&self) -> &str {
        match self.path.rfind('/') {
            Some(idx) => &self.path[idx + 1..],
            None => &self.path,
        }
    }

    /// Containing folder, empty for top-level entries.
    pub fn folder(&self) -> &str {
        match self.path.rfind('/') {
            Some(idx) => &self.path[..idx],
            None => "",
        }
    }

    /// Text after the last '.' of the file name, as stored (not lower-cased).
    ///
    /// Returns an empty string when the name has no '.', ends with '.', or
    /// only starts with one (`.gitignore`, `.keep`).
    pub fn extension(&self) -> &str {
        let name = self.file_name();
        match name.rfind('.') {
            None | Some(0) => "",
            Some(idx) => &name[idx + 1..],
        }
    }

    /// Bytes saved by compression, as a percentage of the uncompressed size.
    pub fn compression_savings(&self) -> f64 {
        if self.size == 0 {
            return 0.0;
        }
        (self.size as f64 - self.compressed_size as f64) / self.size as f64 * 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(path: &str) -> EntryRecord {
        EntryRecord {
            path: path.to_string(),
            size: 1024,
            compressed_size: 800,
            compression_method: CompressionMethod::Deflated,
            crc: 12345,
        }
    }

    #[test]
    fn test_folder_and_extension() {
        let e = entry("assets/image.png");
        assert_eq!(e.extension(), "png");
        assert_eq!(e.folder(), "assets");
        assert_eq!(e.file_name(), "image.png");
        assert!((e.compression_savings() - 21.875).abs() < 0.001);
    }

    #[test]
    fn test_top_level_entry_has_root_folder() {
        let e = entry("classes.dex");
        assert_eq!(e.folder(), "");
        assert_eq!(e.extension(), "dex");
    }

    #[test]
    fn test_extension_uses_last_segment_only() {
        assert_eq!(entry("res/drawable.v21/icon").extension(), "");
        assert_eq!(entry("res/drawable/icon.9.png").extension(), "png");
        assert_eq!(entry("META-INF/CERT.RSA").extension(), "RSA");
    }

    #[test]
    fn test_hidden_files_have_no_extension() {
        assert_eq!(entry(".gitignore").extension(), "");
        assert_eq!(entry("assets/.keep").extension(), "");
        assert_eq!(entry("assets/.config.json").extension(), "json");
        assert_eq!(entry("assets/trailing.").extension(), "");
    }

    #[test]
    fn test_savings_for_empty_entry() {
        let mut e = entry("empty.txt");
        e.size = 0;
        e.compressed_size = 0;
        assert_eq!(e.compression_savings(), 0.0);
    }
}
