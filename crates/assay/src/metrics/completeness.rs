//! Completeness: share of non-null values per column.

use serde::{Deserialize, Serialize};

use super::percentage;
use crate::input::DataTable;

/// Band a column's completeness score falls into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompletenessTier {
    /// Every value is missing.
    Critical,
    /// At most half the values are present.
    Poor,
    /// Between 50% and 96%.
    Fair,
    /// At least 96% of values are present.
    Healthy,
}

impl CompletenessTier {
    /// Classify a completeness score. Checked in the order critical, healthy, poor.
    pub fn from_score(score: f64) -> Self {
        if score == 0.0 {
            CompletenessTier::Critical
        } else if score >= 96.0 {
            CompletenessTier::Healthy
        } else if score <= 50.0 {
            CompletenessTier::Poor
        } else {
            CompletenessTier::Fair
        }
    }

    /// Get a human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            CompletenessTier::Critical => "Critical",
            CompletenessTier::Poor => "Poor",
            CompletenessTier::Fair => "Fair",
            CompletenessTier::Healthy => "Healthy",
        }
    }
}

/// Null statistics for one column.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletenessRecord {
    pub column: String,
    pub null_count: usize,
    pub null_percentage: Option<f64>,
    pub completeness_score: Option<f64>,
    /// `None` when the table is empty.
    pub tier: Option<CompletenessTier>,
}

/// Result of the completeness check.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletenessReport {
    /// One record per column, in table order.
    pub records: Vec<CompletenessRecord>,
    /// Unweighted mean of the per-column scores.
    pub score: Option<f64>,
}

/// Compute per-column and aggregate completeness.
pub fn completeness(table: &DataTable) -> CompletenessReport {
    let row_count = table.row_count();

    let records: Vec<CompletenessRecord> = table
        .headers
        .iter()
        .enumerate()
        .map(|(index, column)| {
            let null_count = table.null_count(index);
            let null_percentage = percentage(null_count, row_count);
            let completeness_score = null_percentage.map(|pct| 100.0 - pct);

            CompletenessRecord {
                column: column.clone(),
                null_count,
                null_percentage,
                completeness_score,
                tier: completeness_score.map(CompletenessTier::from_score),
            }
        })
        .collect();

    let scores: Vec<f64> = records.iter().filter_map(|r| r.completeness_score).collect();
    let score = if scores.is_empty() {
        None
    } else {
        Some(scores.iter().sum::<f64>() / scores.len() as f64)
    };

    tracing::debug!(columns = records.len(), "Completeness computed");

    CompletenessReport { records, score }
}
