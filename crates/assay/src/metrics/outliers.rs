//! Outliers: numeric values outside the interquartile fence.

use serde::{Deserialize, Serialize};

use super::percentage;
use super::stats::{quantile, sorted};
use crate::input::DataTable;

/// Default multiplier applied to the IQR.
pub const DEFAULT_IQR_MULTIPLIER: f64 = 1.5;

/// Bounds `[q1 − k·iqr, q3 + k·iqr]` outside which a value is an outlier.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IqrFence {
    pub q1: f64,
    pub q3: f64,
    pub iqr: f64,
    pub lower: f64,
    pub upper: f64,
}

impl IqrFence {
    /// Fence over the finite values of a sample, or `None` when there are none.
    ///
    /// With zero spread (`iqr == 0`) the fence collapses to a point and any
    /// value different from it is outside.
    pub fn from_values(values: &[f64], multiplier: f64) -> Option<Self> {
        let finite: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
        let sorted = sorted(&finite);
        let q1 = quantile(&sorted, 0.25)?;
        let q3 = quantile(&sorted, 0.75)?;
        let iqr = q3 - q1;

        Some(Self {
            q1,
            q3,
            iqr,
            lower: q1 - multiplier * iqr,
            upper: q3 + multiplier * iqr,
        })
    }

    /// Whether `value` lies strictly outside the fence. Infinities always do.
    pub fn is_outlier(&self, value: f64) -> bool {
        !value.is_finite() || value < self.lower || value > self.upper
    }
}

/// Outlier count for one numeric column.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutlierRecord {
    pub column: String,
    pub outlier_count: usize,
    /// Outliers as a share of all rows, nulls included.
    pub outlier_percentage: Option<f64>,
    pub fence: IqrFence,
    /// First few offending row indices.
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub sample_rows: Vec<usize>,
}

/// Result of the outlier check.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutlierReport {
    pub multiplier: f64,
    /// One record per numeric column, in table order.
    pub records: Vec<OutlierRecord>,
}

/// Parsed values of a column, keyed by row, if the column is numeric.
///
/// A column is numeric when it has at least one non-null value and every
/// non-null value parses as a number. NaN spellings do not count as numbers.
pub fn numeric_values(table: &DataTable, index: usize) -> Option<Vec<(usize, f64)>> {
    let mut values = Vec::new();

    for (row_idx, value) in table.column_values(index).enumerate() {
        let Some(value) = value else { continue };
        match value.trim().parse::<f64>() {
            Ok(num) if !num.is_nan() => values.push((row_idx, num)),
            _ => return None,
        }
    }

    if values.is_empty() { None } else { Some(values) }
}

/// Detect IQR outliers in every numeric column.
pub fn outliers(table: &DataTable, multiplier: f64) -> OutlierReport {
    let row_count = table.row_count();
    let mut records = Vec::new();

    for (index, column) in table.headers.iter().enumerate() {
        let Some(values) = numeric_values(table, index) else {
            continue;
        };

        let nums: Vec<f64> = values.iter().map(|(_, v)| *v).collect();
        let Some(fence) = IqrFence::from_values(&nums, multiplier) else {
            continue;
        };

        let outlier_rows: Vec<usize> = values
            .iter()
            .filter(|(_, v)| fence.is_outlier(*v))
            .map(|(row, _)| *row)
            .collect();

        records.push(OutlierRecord {
            column: column.clone(),
            outlier_count: outlier_rows.len(),
            outlier_percentage: percentage(outlier_rows.len(), row_count),
            fence,
            sample_rows: outlier_rows.into_iter().take(5).collect(),
        });
    }

    tracing::debug!(numeric_columns = records.len(), "Outliers computed");

    OutlierReport {
        multiplier,
        records,
    }
}
