//! Uniqueness: share of rows that do not repeat an earlier row.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::score;
use crate::input::{Cell, DataTable};

/// A row equal in every cell to an earlier row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DuplicateRecord {
    /// Index of the repeated row.
    pub row: usize,
    /// Index of the first row with the same contents.
    pub first_seen: usize,
}

/// Result of the uniqueness check.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UniquenessReport {
    pub duplicate_count: usize,
    pub score: Option<f64>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub duplicates: Vec<DuplicateRecord>,
}

/// Find exact duplicate rows. Missing cells compare equal to each other.
pub fn uniqueness(table: &DataTable) -> UniquenessReport {
    let mut first_rows: IndexMap<&[Cell], usize> = IndexMap::new();
    let mut duplicates = Vec::new();

    for (row_idx, row) in table.rows.iter().enumerate() {
        match first_rows.get(row.as_slice()) {
            Some(&first_seen) => duplicates.push(DuplicateRecord {
                row: row_idx,
                first_seen,
            }),
            None => {
                first_rows.insert(row.as_slice(), row_idx);
            }
        }
    }

    tracing::debug!(duplicates = duplicates.len(), "Uniqueness computed");

    UniquenessReport {
        duplicate_count: duplicates.len(),
        score: score(duplicates.len(), table.row_count()),
        duplicates,
    }
}
