//! Size thresholds for build checks.

use std::fmt;

use crate::analysis::AnalysisResult;
use crate::diff::ComparisonResult;
use crate::format::{format_size, format_size_change};

/// Upper bounds on archive size and growth, in bytes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SizeBudget {
    pub max_total_size: Option<u64>,
    pub max_increase: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BudgetViolation {
    TotalSize { actual: u64, limit: u64 },
    Increase { actual: i64, limit: u64 },
}

impl fmt::Display for BudgetViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BudgetViolation::TotalSize { actual, limit } => write!(
                f,
                "archive size {} exceeds limit of {}",
                format_size(*actual),
                format_size(*limit)
            ),
            BudgetViolation::Increase { actual, limit } => write!(
                f,
                "size grew by {}, more than the allowed {}",
                format_size_change(*actual),
                format_size(*limit)
            ),
        }
    }
}

impl SizeBudget {
    pub fn is_empty(&self) -> bool {
        self.max_total_size.is_none() && self.max_increase.is_none()
    }

    pub fn check_analysis(&self, analysis: &AnalysisResult) -> Vec<BudgetViolation> {
        self.check_total(analysis.total_size()).into_iter().collect()
    }

    pub fn check_comparison(&self, comparison: &ComparisonResult) -> Vec<BudgetViolation> {
        let mut violations: Vec<_> = self
            .check_total(comparison.new_analysis().total_size())
            .into_iter()
            .collect();

        if let Some(limit) = self.max_increase {
            let actual = comparison.size_difference();
            if actual > 0 && actual.unsigned_abs() > limit {
                violations.push(BudgetViolation::Increase { actual, limit });
            }
        }

        violations
    }

    fn check_total(&self, actual: u64) -> Option<BudgetViolation> {
        let limit = self.max_total_size?;
        (actual > limit).then_some(BudgetViolation::TotalSize { actual, limit })
    }
}
