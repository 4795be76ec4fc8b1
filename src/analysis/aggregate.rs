//! Single-pass size aggregation over an entry list.

use std::collections::BTreeMap;
use thiserror::Error;

use super::EntryRecord;

/// Bucket for entries whose file name carries no extension.
pub const NO_EXTENSION: &str = "(no extension)";

/// The summed sizes do not fit in 64 bits.
#[derive(Debug, Error)]
#[error("total entry size exceeds 64 bits")]
pub struct SizeOverflow;

/// Totals and breakdown maps computed from one entry list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Aggregates {
    pub total_size: u64,
    pub total_compressed_size: u64,
    /// Folder path to the size of everything beneath it
    pub folder_sizes: BTreeMap<String, u64>,
    /// Lower-cased extension to cumulative size
    pub type_sizes: BTreeMap<String, u64>,
}

/// Accumulates folder and file-type sizes one entry at a time.
#[derive(Debug, Default)]
pub struct SizeAggregator {
    totals: Aggregates,
}

impl SizeAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, entry: &EntryRecord) -> Result<(), SizeOverflow> {
        let size = entry.size;
        // Folder and type sums never exceed the total, so only it needs checking
        self.totals.total_size = self
            .totals
            .total_size
            .checked_add(size)
            .ok_or(SizeOverflow)?;
        self.totals.total_compressed_size = self
            .totals
            .total_compressed_size
            .saturating_add(entry.compressed_size);

        // Walk from the immediate folder up to the top-level one
        let mut folder = entry.folder();
        while !folder.is_empty() {
            *self.totals.folder_sizes.entry(folder.to_string()).or_insert(0) += size;
            folder = match folder.rfind('/') {
                Some(idx) => &folder[..idx],
                None => "",
            };
        }

        let extension = entry.extension();
        let key = if extension.is_empty() {
            NO_EXTENSION.to_string()
        } else {
            extension.to_lowercase()
        };
        *self.totals.type_sizes.entry(key).or_insert(0) += size;

        Ok(())
    }

    pub fn finish(self) -> Aggregates {
        self.totals
    }
}

/// Aggregate a complete entry list.
pub fn aggregate(entries: &[EntryRecord]) -> Result<Aggregates, SizeOverflow> {
    let mut aggregator = SizeAggregator::new();
    for entry in entries {
        aggregator.add(entry)?;
    }
    Ok(aggregator.finish())
}
