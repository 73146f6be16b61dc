//! Metric calculators.
//!
//! Each calculator is a pure function of a [`DataTable`](crate::input::DataTable)
//! returning serializable records. Percentages are in `[0, 100]`; a percentage
//! over an empty table is `None` and renders as "no data".

mod completeness;
mod outliers;
mod stats;
mod uniqueness;
mod validity;

pub use completeness::{CompletenessRecord, CompletenessReport, CompletenessTier, completeness};
pub use outliers::{
    DEFAULT_IQR_MULTIPLIER, IqrFence, OutlierRecord, OutlierReport, numeric_values, outliers,
};
pub use stats::quantile;
pub(crate) use stats::sorted;
pub use uniqueness::{DuplicateRecord, UniquenessReport, uniqueness};
pub use validity::{InvalidRecord, ValidationRule, ValidityChecker, ValidityReport};

/// Text shown in place of a percentage that has no rows to be computed over.
pub const NO_DATA: &str = "no data";

/// `100 × count / total`, or `None` when `total` is zero.
pub fn percentage(count: usize, total: usize) -> Option<f64> {
    if total == 0 {
        None
    } else {
        Some((count as f64 / total as f64) * 100.0)
    }
}

/// `100 × (1 − failing / total)` clamped to `[0, 100]`, or `None` when `total` is zero.
pub fn score(failing: usize, total: usize) -> Option<f64> {
    percentage(failing, total).map(|pct| (100.0 - pct).clamp(0.0, 100.0))
}

/// Render a percentage with two decimals, or [`NO_DATA`].
pub fn format_percentage(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{:.2}%", v),
        None => NO_DATA.to_string(),
    }
}
