//! Caller-owned store for the most recent results.
//!
//! Viewers and exporters read the last analysis or comparison from here.
//! A slot is only replaced by a successful operation and only emptied by
//! [`Session::clear`].

use std::path::Path;
use std::sync::Arc;

use crate::analysis::{AnalysisResult, analyze};
use crate::diff::{ComparisonResult, compare_archives};
use crate::error::Result;

#[derive(Debug, Default)]
pub struct Session {
    last_analysis: Option<Arc<AnalysisResult>>,
    last_comparison: Option<Arc<ComparisonResult>>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Analyze `path` and remember the result.
    pub fn analyze(&mut self, path: impl AsRef<Path>) -> Result<Arc<AnalysisResult>> {
        let result = Arc::new(analyze(path)?);
        self.last_analysis = Some(result.clone());
        Ok(result)
    }

    /// Compare two archives and remember the result.
    pub fn compare(
        &mut self,
        old_path: impl AsRef<Path>,
        new_path: impl AsRef<Path>,
    ) -> Result<Arc<ComparisonResult>> {
        let result = Arc::new(compare_archives(old_path, new_path)?);
        self.last_comparison = Some(result.clone());
        Ok(result)
    }

    pub fn record_analysis(&mut self, result: Arc<AnalysisResult>) {
        self.last_analysis = Some(result);
    }

    pub fn record_comparison(&mut self, result: Arc<ComparisonResult>) {
        self.last_comparison = Some(result);
    }

    pub fn last_analysis(&self) -> Option<&Arc<AnalysisResult>> {
        self.last_analysis.as_ref()
    }

    pub fn last_comparison(&self) -> Option<&Arc<ComparisonResult>> {
        self.last_comparison.as_ref()
    }

    pub fn has_results(&self) -> bool {
        self.last_analysis.is_some() || self.last_comparison.is_some()
    }

    pub fn clear(&mut self) {
        self.last_analysis = None;
        self.last_comparison = None;
    }
}
