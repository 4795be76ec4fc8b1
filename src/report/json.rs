use chrono::{DateTime, Utc};
use serde::Serialize;
use std::io::Write;

use crate::analysis::{AnalysisResult, SizeShare};
use crate::diff::{ComparisonResult, SizeChange, Trend};

use super::{Report, ReportError};

#[derive(Serialize)]
struct Envelope<'a> {
    generated_at: DateTime<Utc>,
    #[serde(flatten)]
    body: Body<'a>,
}

#[derive(Serialize)]
#[serde(tag = "kind", content = "data", rename_all = "lowercase")]
enum Body<'a> {
    Analysis(AnalysisView<'a>),
    Comparison(ComparisonView<'a>),
}

#[derive(Serialize)]
struct AnalysisView<'a> {
    #[serde(flatten)]
    result: &'a AnalysisResult,
    file_count: usize,
    folder_summary: Vec<SizeShare>,
    file_type_summary: Vec<SizeShare>,
}

#[derive(Serialize)]
struct ComparisonView<'a> {
    #[serde(flatten)]
    result: &'a ComparisonResult,
    trend: Trend,
    sorted_folder_changes: Vec<&'a SizeChange>,
    sorted_type_changes: Vec<&'a SizeChange>,
}

pub fn write<W: Write>(out: &mut W, report: Report<'_>) -> Result<(), ReportError> {
    let body = match report {
        Report::Analysis(result) => Body::Analysis(AnalysisView {
            result,
            file_count: result.file_count(),
            folder_summary: result.folder_summary(),
            file_type_summary: result.file_type_summary(),
        }),
        Report::Comparison(result) => Body::Comparison(ComparisonView {
            result,
            trend: result.trend(),
            sorted_folder_changes: result.sorted_folder_changes(),
            sorted_type_changes: result.sorted_type_changes(),
        }),
    };

    let envelope = Envelope {
        generated_at: Utc::now(),
        body,
    };
    serde_json::to_writer_pretty(&mut *out, &envelope)?;
    writeln!(out)?;
    Ok(())
}
