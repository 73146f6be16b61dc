//! Report model handed to renderers.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::expiry::ExpiryResult;
use crate::metrics::{CompletenessReport, OutlierReport, UniquenessReport, ValidityReport};

/// One titled block of a report.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "section", rename_all = "snake_case")]
pub enum ReportSection {
    Validity(ValidityReport),
    Uniqueness(UniquenessReport),
    Completeness(CompletenessReport),
    Outliers(OutlierReport),
    Expiry(ExpiryResult),
}

impl ReportSection {
    /// Heading for this section.
    pub fn title(&self) -> String {
        match self {
            ReportSection::Validity(_) => "Validity".to_string(),
            ReportSection::Uniqueness(_) => "Uniqueness".to_string(),
            ReportSection::Completeness(_) => "Completeness".to_string(),
            ReportSection::Outliers(_) => "Outliers".to_string(),
            ReportSection::Expiry(result) => format!("Expired {}", result.kind.plural()),
        }
    }
}

/// Headline numbers of a report.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReportSummary {
    pub validity_score: Option<f64>,
    pub uniqueness_score: Option<f64>,
    pub completeness_score: Option<f64>,
    pub invalid_count: usize,
    pub duplicate_count: usize,
    pub outlier_count: usize,
    pub expired_count: usize,
}

/// Data-quality report for one table.
///
/// Sections appear in the order validity, uniqueness, completeness, outliers,
/// then one expiry section per check whose columns exist.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QualityReport {
    pub row_count: usize,
    pub column_count: usize,
    /// Date expiry checks compared against.
    pub reference_date: NaiveDate,
    pub generated_at: DateTime<Utc>,
    pub sections: Vec<ReportSection>,
}

impl QualityReport {
    /// The validity section, if present.
    pub fn validity(&self) -> Option<&ValidityReport> {
        self.sections.iter().find_map(|s| match s {
            ReportSection::Validity(r) => Some(r),
            _ => None,
        })
    }

    /// The uniqueness section, if present.
    pub fn uniqueness(&self) -> Option<&UniquenessReport> {
        self.sections.iter().find_map(|s| match s {
            ReportSection::Uniqueness(r) => Some(r),
            _ => None,
        })
    }

    /// The completeness section, if present.
    pub fn completeness(&self) -> Option<&CompletenessReport> {
        self.sections.iter().find_map(|s| match s {
            ReportSection::Completeness(r) => Some(r),
            _ => None,
        })
    }

    /// The outlier section, if present.
    pub fn outliers(&self) -> Option<&OutlierReport> {
        self.sections.iter().find_map(|s| match s {
            ReportSection::Outliers(r) => Some(r),
            _ => None,
        })
    }

    /// Expiry results in check order.
    pub fn expiry(&self) -> impl Iterator<Item = &ExpiryResult> {
        self.sections.iter().filter_map(|s| match s {
            ReportSection::Expiry(r) => Some(r),
            _ => None,
        })
    }

    /// Collect headline numbers across sections.
    pub fn summary(&self) -> ReportSummary {
        let validity = self.validity();
        let uniqueness = self.uniqueness();

        ReportSummary {
            validity_score: validity.and_then(|v| v.score),
            uniqueness_score: uniqueness.and_then(|u| u.score),
            completeness_score: self.completeness().and_then(|c| c.score),
            invalid_count: validity.map(|v| v.total_invalid).unwrap_or(0),
            duplicate_count: uniqueness.map(|u| u.duplicate_count).unwrap_or(0),
            outlier_count: self
                .outliers()
                .map(|o| o.records.iter().map(|r| r.outlier_count).sum())
                .unwrap_or(0),
            expired_count: self.expiry().map(|e| e.count).sum(),
        }
    }
}
