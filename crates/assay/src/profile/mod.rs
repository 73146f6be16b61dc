//! Dataset overview: shape, per-column kind and summary statistics.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::input::{Cell, DataTable};
use crate::metrics::{numeric_values, quantile, sorted};

/// Default number of rows shown in a preview.
pub const DEFAULT_PREVIEW_ROWS: usize = 5;

/// Storage kind of a column's values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnKind {
    /// Every non-null value is a number.
    Numeric,
    /// At least one non-null value is not a number.
    Text,
    /// No non-null values.
    Empty,
}

impl ColumnKind {
    /// Get a human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            ColumnKind::Numeric => "numeric",
            ColumnKind::Text => "text",
            ColumnKind::Empty => "empty",
        }
    }
}

/// Descriptive statistics for a numeric column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NumericSummary {
    pub count: usize,
    pub mean: f64,
    /// Sample standard deviation; `None` with fewer than two values.
    pub std: Option<f64>,
    pub min: f64,
    /// First quartile (25th percentile).
    pub q1: f64,
    pub median: f64,
    /// Third quartile (75th percentile).
    pub q3: f64,
    pub max: f64,
}

impl NumericSummary {
    /// Summarise a non-empty sample.
    pub fn from_values(values: &[f64]) -> Option<Self> {
        if values.is_empty() {
            return None;
        }

        let sorted = sorted(values);
        let count = sorted.len();
        let mean = sorted.iter().sum::<f64>() / count as f64;
        let std = (count > 1).then(|| {
            let ss: f64 = sorted.iter().map(|v| (v - mean).powi(2)).sum();
            (ss / (count - 1) as f64).sqrt()
        });

        Some(Self {
            count,
            mean,
            std,
            min: sorted[0],
            q1: quantile(&sorted, 0.25)?,
            median: quantile(&sorted, 0.5)?,
            q3: quantile(&sorted, 0.75)?,
            max: sorted[count - 1],
        })
    }
}

/// Profile of one column.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColumnProfile {
    pub name: String,
    pub kind: ColumnKind,
    pub non_null_count: usize,
    pub null_count: usize,
    /// Distinct non-null values.
    pub unique_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub numeric: Option<NumericSummary>,
}

/// Overview of a whole table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetProfile {
    pub row_count: usize,
    pub column_count: usize,
    pub columns: Vec<ColumnProfile>,
    /// Leading rows of the table.
    pub preview: Vec<Vec<Cell>>,
}

/// Profile every column and keep the first `preview_rows` rows.
pub fn profile(table: &DataTable, preview_rows: usize) -> DatasetProfile {
    let columns = table
        .headers
        .iter()
        .enumerate()
        .map(|(index, name)| profile_column(table, index, name))
        .collect();

    DatasetProfile {
        row_count: table.row_count(),
        column_count: table.column_count(),
        columns,
        preview: table.rows.iter().take(preview_rows).cloned().collect(),
    }
}

fn profile_column(table: &DataTable, index: usize, name: &str) -> ColumnProfile {
    let null_count = table.null_count(index);
    let non_null_count = table.row_count() - null_count;
    let unique_count = table
        .column_values(index)
        .flatten()
        .collect::<HashSet<_>>()
        .len();

    let numeric = numeric_values(table, index).and_then(|values| {
        let nums: Vec<f64> = values.into_iter().map(|(_, v)| v).collect();
        NumericSummary::from_values(&nums)
    });

    let kind = if non_null_count == 0 {
        ColumnKind::Empty
    } else if numeric.is_some() {
        ColumnKind::Numeric
    } else {
        ColumnKind::Text
    };

    ColumnProfile {
        name: name.to_string(),
        kind,
        non_null_count,
        null_count,
        unique_count,
        numeric,
    }
}
