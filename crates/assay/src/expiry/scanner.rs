//! Expiry checks: rows whose date column has passed a reference date.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use super::dates::{DateParseMode, parse_timestamp};
use crate::input::DataTable;
use crate::metrics::percentage;

/// Document or agreement an expiry check covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExpiryKind {
    /// Tenancy contract (Ejari) registration.
    Contract,
    Passport,
    /// National (Emirates) ID card.
    NationalId,
    TradeLicense,
}

impl ExpiryKind {
    /// Get a human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            ExpiryKind::Contract => "Contract",
            ExpiryKind::Passport => "Passport",
            ExpiryKind::NationalId => "National ID",
            ExpiryKind::TradeLicense => "Trade License",
        }
    }

    /// Plural label, e.g. "Passports".
    pub fn plural(&self) -> &'static str {
        match self {
            ExpiryKind::Contract => "Contracts",
            ExpiryKind::Passport => "Passports",
            ExpiryKind::NationalId => "National IDs",
            ExpiryKind::TradeLicense => "Trade Licenses",
        }
    }
}

/// Which columns an expiry check reads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpiryCheck {
    pub kind: ExpiryKind,
    /// Column holding the expiry date.
    pub date_column: String,
    /// Column identifying the entity (account, customer) each row belongs to.
    pub id_column: String,
}

impl ExpiryCheck {
    /// Create a check.
    pub fn new(
        kind: ExpiryKind,
        date_column: impl Into<String>,
        id_column: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            date_column: date_column.into(),
            id_column: id_column.into(),
        }
    }

    /// Contract, passport, national ID and trade license checks under their usual column names.
    pub fn defaults() -> Vec<ExpiryCheck> {
        vec![
            ExpiryCheck::new(ExpiryKind::Contract, "Ejari Expiry Date", "EC Code"),
            ExpiryCheck::new(ExpiryKind::Passport, "Passport Expiry", "C Code"),
            ExpiryCheck::new(ExpiryKind::NationalId, "EID Expiry", "C Code"),
            ExpiryCheck::new(ExpiryKind::TradeLicense, "Trade License Expiry Date", "Accountnum"),
        ]
    }
}

/// One row found expired.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpiredEntry {
    pub row: usize,
    /// Value of the identifier column, if present.
    pub identifier: Option<String>,
    /// The date cell as written.
    pub expiry: String,
}

/// Result of one expiry check.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExpiryResult {
    pub kind: ExpiryKind,
    pub date_column: String,
    pub id_column: String,
    pub reference_date: NaiveDate,
    /// Expired rows in table order.
    pub expired: Vec<ExpiredEntry>,
    pub count: usize,
    /// Expired rows as a share of all rows in the table.
    pub percentage: Option<f64>,
    /// Non-null date cells that could not be read.
    pub unparsable_count: usize,
}

impl ExpiryResult {
    /// Row indices of the expired rows.
    pub fn rows(&self) -> Vec<usize> {
        self.expired.iter().map(|e| e.row).collect()
    }

    /// The expired rows of `table` as a table of their own.
    pub fn expired_table(&self, table: &DataTable) -> DataTable {
        DataTable::new(
            table.headers.clone(),
            self.expired
                .iter()
                .filter_map(|e| table.rows.get(e.row).cloned())
                .collect(),
        )
    }
}

/// Compares expiry columns against a reference date.
#[derive(Debug, Clone)]
pub struct ExpiryScanner {
    reference_date: NaiveDate,
    mode: DateParseMode,
}

impl ExpiryScanner {
    /// Scanner comparing against `reference_date` at midnight.
    pub fn new(reference_date: NaiveDate, mode: DateParseMode) -> Self {
        Self {
            reference_date,
            mode,
        }
    }

    /// Scanner comparing against the local calendar date.
    pub fn today(mode: DateParseMode) -> Self {
        Self::new(chrono::Local::now().date_naive(), mode)
    }

    /// The date rows are compared against.
    pub fn reference_date(&self) -> NaiveDate {
        self.reference_date
    }

    /// Run one check. Returns `None` when either of its columns is absent.
    pub fn scan(&self, table: &DataTable, check: &ExpiryCheck) -> Option<ExpiryResult> {
        let (Some(date_idx), Some(id_idx)) = (
            table.column_index(&check.date_column),
            table.column_index(&check.id_column),
        ) else {
            tracing::debug!(
                kind = check.kind.label(),
                date_column = %check.date_column,
                id_column = %check.id_column,
                "Expiry columns absent, skipping"
            );
            return None;
        };

        let cutoff = self.reference_date.and_time(NaiveTime::MIN);
        let mut expired = Vec::new();
        let mut unparsable_count = 0;

        for (row_idx, row) in table.rows.iter().enumerate() {
            let Some(raw) = row[date_idx].as_deref() else {
                continue;
            };

            match parse_timestamp(raw, self.mode) {
                Some(ts) if ts < cutoff => expired.push(ExpiredEntry {
                    row: row_idx,
                    identifier: row[id_idx].clone(),
                    expiry: raw.to_string(),
                }),
                Some(_) => {}
                None => unparsable_count += 1,
            }
        }

        if unparsable_count > 0 {
            tracing::warn!(
                column = %check.date_column,
                unparsable = unparsable_count,
                mode = ?self.mode,
                "Date values could not be parsed and were excluded from the expiry check"
            );
        }

        let count = expired.len();
        Some(ExpiryResult {
            kind: check.kind,
            date_column: check.date_column.clone(),
            id_column: check.id_column.clone(),
            reference_date: self.reference_date,
            expired,
            count,
            percentage: percentage(count, table.row_count()),
            unparsable_count,
        })
    }

    /// Run each check whose columns exist, in the given order.
    pub fn scan_all(&self, table: &DataTable, checks: &[ExpiryCheck]) -> Vec<ExpiryResult> {
        checks
            .iter()
            .filter_map(|check| self.scan(table, check))
            .collect()
    }
}
