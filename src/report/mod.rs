//! Rendering of analysis and comparison results.
//!
//! Renderers only read results; they never recompute sizes.

mod csv;
mod html;
mod json;
mod text;

use std::io::Write;
use thiserror::Error;

use crate::analysis::AnalysisResult;
use crate::diff::ComparisonResult;

/// Rows shown in per-file tables unless configured otherwise.
pub const DEFAULT_TOP: usize = 100;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("failed to write report: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to write CSV report: {0}")]
    Csv(#[from] ::csv::Error),

    #[error("failed to serialize JSON report: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum ReportFormat {
    #[default]
    Text,
    Json,
    Csv,
    Html,
}

/// A result to render.
#[derive(Debug, Clone, Copy)]
pub enum Report<'a> {
    Analysis(&'a AnalysisResult),
    Comparison(&'a ComparisonResult),
}

#[derive(Debug, Clone, Copy)]
pub struct ReportOptions {
    pub format: ReportFormat,
    /// Maximum rows in per-file tables (text and HTML formats)
    pub top: usize,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            format: ReportFormat::Text,
            top: DEFAULT_TOP,
        }
    }
}

/// Render `report` to `out` in the configured format.
pub fn write_report<W: Write>(
    out: &mut W,
    report: Report<'_>,
    options: &ReportOptions,
) -> Result<(), ReportError> {
    match (options.format, report) {
        (ReportFormat::Text, Report::Analysis(a)) => text::write_analysis(out, a, options.top)?,
        (ReportFormat::Text, Report::Comparison(c)) => {
            text::write_comparison(out, c, options.top)?
        }
        (ReportFormat::Json, report) => json::write(out, report)?,
        (ReportFormat::Csv, Report::Analysis(a)) => csv::write_analysis(out, a)?,
        (ReportFormat::Csv, Report::Comparison(c)) => csv::write_comparison(out, c)?,
        (ReportFormat::Html, Report::Analysis(a)) => html::write_analysis(out, a, options.top)?,
        (ReportFormat::Html, Report::Comparison(c)) => {
            html::write_comparison(out, c, options.top)?
        }
    }
    Ok(())
}

#[cfg(test)]
pub(crate) mod fixtures {
    use std::sync::Arc;

    use crate::analysis::{AnalysisResult, EntryRecord};
    use crate::diff::{ComparisonResult, compare};
    use crate::zip::CompressionMethod;

    pub fn analysis(path: &str, files: &[(&str, u64)]) -> Arc<AnalysisResult> {
        let entries = files
            .iter()
            .map(|(name, size)| EntryRecord {
                path: name.to_string(),
                size: *size,
                compressed_size: size / 2,
                compression_method: CompressionMethod::Deflated,
                crc: 0xABCD,
            })
            .collect();
        Arc::new(AnalysisResult::from_entries(path, entries).unwrap())
    }

    pub fn small() -> Arc<AnalysisResult> {
        analysis(
            "/builds/old.apk",
            &[
                ("classes.dex", 1000),
                ("assets/icon.png", 500),
                ("res/layout/main.xml", 200),
            ],
        )
    }

    pub fn comparison() -> ComparisonResult {
        let new = analysis(
            "/builds/new.apk",
            &[
                ("classes.dex", 1000),
                ("assets/icon.png", 650),
                ("lib/x86/libnative.so", 300),
            ],
        );
        compare(small(), new).unwrap()
    }
}
