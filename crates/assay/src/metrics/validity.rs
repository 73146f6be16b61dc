//! Validity: share of recognised fields that match their expected format.

use serde::{Deserialize, Serialize};

use super::{percentage, score};
use crate::input::DataTable;
use crate::validation::{EmailMatch, FieldKind, FieldValidator, PatternValidator};

/// Binds a column name to the field kind its values are checked against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationRule {
    /// Column to read.
    pub column: String,
    /// Expected format of its values.
    pub kind: FieldKind,
}

impl ValidationRule {
    /// Create a rule.
    pub fn new(column: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            column: column.into(),
            kind,
        }
    }

    /// The four recognised columns under their default names.
    pub fn defaults() -> Vec<ValidationRule> {
        FieldKind::ALL
            .iter()
            .map(|kind| ValidationRule::new(kind.default_column(), *kind))
            .collect()
    }
}

/// Invalid-value count for one checked column.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvalidRecord {
    pub column: String,
    pub kind: FieldKind,
    /// Non-null values that were checked.
    pub checked_count: usize,
    pub invalid_count: usize,
    /// Invalid values as a share of all rows.
    pub percentage: Option<f64>,
    /// First few offending row indices.
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub sample_rows: Vec<usize>,
}

/// Result of the validity check.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidityReport {
    /// One record per rule whose column is present, in rule order.
    pub records: Vec<InvalidRecord>,
    pub total_invalid: usize,
    /// `None` when no recognised column is present or the table is empty.
    pub score: Option<f64>,
}

/// Applies field validators to their columns.
pub struct ValidityChecker {
    rules: Vec<(String, Box<dyn FieldValidator>)>,
}

impl ValidityChecker {
    /// Checker with no rules.
    pub fn empty() -> Self {
        Self { rules: Vec::new() }
    }

    /// Build pattern validators for each rule.
    pub fn from_rules(rules: &[ValidationRule], email_match: EmailMatch) -> Self {
        let mut checker = Self::empty();
        for rule in rules {
            checker = checker.with_validator(
                rule.column.clone(),
                PatternValidator::with_email_match(rule.kind, email_match),
            );
        }
        checker
    }

    /// Add a validator for a column.
    pub fn with_validator(
        mut self,
        column: impl Into<String>,
        validator: impl FieldValidator + 'static,
    ) -> Self {
        self.rules.push((column.into(), Box::new(validator)));
        self
    }

    /// Count invalid non-null values per present column and score the table.
    pub fn check(&self, table: &DataTable) -> ValidityReport {
        let row_count = table.row_count();
        let mut records = Vec::new();

        for (column, validator) in &self.rules {
            let Some(index) = table.column_index(column) else {
                tracing::debug!(column = %column, "Validity column absent, skipping");
                continue;
            };

            let mut checked_count = 0;
            let mut invalid_rows = Vec::new();
            for (row_idx, value) in table.column_values(index).enumerate() {
                let Some(value) = value else { continue };
                checked_count += 1;
                if !validator.validate(value) {
                    invalid_rows.push(row_idx);
                }
            }

            records.push(InvalidRecord {
                column: column.clone(),
                kind: validator.kind(),
                checked_count,
                invalid_count: invalid_rows.len(),
                percentage: percentage(invalid_rows.len(), row_count),
                sample_rows: invalid_rows.into_iter().take(5).collect(),
            });
        }

        let total_invalid: usize = records.iter().map(|r| r.invalid_count).sum();
        let validity_score = if records.is_empty() {
            None
        } else {
            score(total_invalid, row_count)
        };

        tracing::debug!(
            columns = records.len(),
            total_invalid,
            "Validity computed"
        );

        ValidityReport {
            records,
            total_invalid,
            score: validity_score,
        }
    }
}

impl Default for ValidityChecker {
    fn default() -> Self {
        Self::from_rules(&ValidationRule::defaults(), EmailMatch::default())
    }
}
