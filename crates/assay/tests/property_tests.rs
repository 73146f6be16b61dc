//! Property-based tests for Assay metrics and validators.
//!
//! Property-based tests verify:
//! 1. **No panics**: Validators and date parsing never crash on any input
//! 2. **Bounds**: Scores and percentages stay within `[0, 100]`
//! 3. **Consistency**: Related metrics agree with each other
//!
//! # Running Property Tests
//!
//! ```bash
//! PROPTEST_CASES=10000 cargo test -p assay --test property_tests
//! ```

use proptest::prelude::*;

use assay::expiry::parse_timestamp;
use assay::metrics::{IqrFence, completeness, outliers, quantile, uniqueness};
use assay::{
    DataTable, DateParseMode, EmailMatch, FieldKind, FieldValidator, PatternValidator,
    ValidationRule, ValidityChecker,
};

// =============================================================================
// Test Strategies
// =============================================================================

/// Cells drawn from a small alphabet so duplicates and nulls are common.
fn cell() -> impl Strategy<Value = Option<String>> {
    prop_oneof![
        1 => Just(None::<String>),
        4 => "[ab]{1,2}".prop_map(Some),
    ]
}

/// A table with 1..4 columns and 0..30 rows.
fn table() -> impl Strategy<Value = DataTable> {
    (1usize..4).prop_flat_map(|cols| {
        prop::collection::vec(prop::collection::vec(cell(), cols), 0..30).prop_map(move |rows| {
            let headers = (0..cols).map(|i| format!("c{}", i)).collect();
            DataTable::new(headers, rows)
        })
    })
}

/// A single numeric column, possibly with gaps.
fn numeric_table() -> impl Strategy<Value = DataTable> {
    prop::collection::vec(prop::option::weighted(0.9, -1000.0f64..1000.0), 1..40).prop_map(
        |values| {
            let rows = values
                .into_iter()
                .map(|v| vec![v.map(|n| n.to_string())])
                .collect();
            DataTable::new(vec!["amount".to_string()], rows)
        },
    )
}

/// Strings that look like mobile numbers, some malformed.
fn mobile_like() -> impl Strategy<Value = String> {
    prop_oneof![
        "05[0-9]-[0-9]{7}",
        "0[0-9]{2}-[0-9]{6,8}",
        "05[0-9][0-9]{7}",
        "[a-z0-9\\- ]{0,15}",
    ]
}

fn in_bounds(value: Option<f64>) -> bool {
    value.is_none_or(|v| (0.0..=100.0).contains(&v))
}

// =============================================================================
// Metric Properties
// =============================================================================

proptest! {
    /// Completeness scores and tiers stay in range.
    #[test]
    fn completeness_is_bounded(table in table()) {
        let report = completeness(&table);

        prop_assert_eq!(report.records.len(), table.column_count());
        prop_assert!(in_bounds(report.score));
        for record in &report.records {
            prop_assert!(in_bounds(record.completeness_score));
            prop_assert_eq!(record.tier.is_some(), !table.is_empty());
        }
    }

    /// Uniqueness is 100 exactly when no row repeats an earlier one.
    #[test]
    fn uniqueness_matches_duplicate_count(table in table()) {
        let report = uniqueness(&table);

        prop_assert!(in_bounds(report.score));
        prop_assert!(report.duplicate_count < table.row_count().max(1));
        if !table.is_empty() {
            prop_assert_eq!(report.score == Some(100.0), report.duplicate_count == 0);
        }
        for dup in &report.duplicates {
            prop_assert!(dup.first_seen < dup.row);
            prop_assert_eq!(&table.rows[dup.first_seen], &table.rows[dup.row]);
        }
    }

    /// Appending a copy of an existing row never raises uniqueness.
    #[test]
    fn duplicating_a_row_never_raises_uniqueness(table in table(), pick in any::<prop::sample::Index>()) {
        prop_assume!(!table.is_empty());
        let before = uniqueness(&table).score.unwrap();

        let mut rows = table.rows.clone();
        rows.push(rows[pick.index(rows.len())].clone());
        let after = uniqueness(&DataTable::new(table.headers.clone(), rows)).score.unwrap();

        prop_assert!(after <= before);
    }

    /// Every outlier lies outside the fence and the fence brackets the quartiles.
    #[test]
    fn outliers_lie_outside_fence(table in numeric_table(), k in 0.0f64..3.0) {
        let report = outliers(&table, k);

        for record in &report.records {
            prop_assert!(record.fence.lower <= record.fence.q1);
            prop_assert!(record.fence.q3 <= record.fence.upper);
            prop_assert!(in_bounds(record.outlier_percentage));
            for &row in &record.sample_rows {
                let value: f64 = table.get(row, 0).unwrap().parse().unwrap();
                prop_assert!(record.fence.is_outlier(value));
            }
        }
    }

    /// Quantiles are monotonic in q and stay within the sample range.
    #[test]
    fn quantile_is_monotonic(mut values in prop::collection::vec(-1e6f64..1e6, 1..50)) {
        values.sort_by(f64::total_cmp);
        let q1 = quantile(&values, 0.25).unwrap();
        let q2 = quantile(&values, 0.5).unwrap();
        let q3 = quantile(&values, 0.75).unwrap();

        prop_assert!(values[0] <= q1 && q1 <= q2 && q2 <= q3 && q3 <= values[values.len() - 1]);
        let fence = IqrFence::from_values(&values, 1.5).unwrap();
        prop_assert!(fence.iqr >= 0.0);
    }

    /// N invalid values in the mobile column are reported as N.
    #[test]
    fn validity_counts_invalid_mobiles(values in prop::collection::vec(mobile_like(), 1..20)) {
        let validator = PatternValidator::new(FieldKind::Mobile);
        let expected = values.iter().filter(|v| !v.is_empty() && !validator.validate(v)).count();

        let rows = values.iter().map(|v| vec![v.as_str()]).collect::<Vec<_>>();
        let table = DataTable::from_strings(&["Mobile No."], &rows);
        let checker = ValidityChecker::from_rules(
            &[ValidationRule::new("Mobile No.", FieldKind::Mobile)],
            EmailMatch::Prefix,
        );
        let report = checker.check(&table);

        prop_assert_eq!(report.total_invalid, expected);
        prop_assert!(in_bounds(report.score));
    }
}

// =============================================================================
// Robustness
// =============================================================================

proptest! {
    /// Validators never panic on arbitrary UTF-8.
    #[test]
    fn validators_never_panic(input in "\\PC{0,60}") {
        for kind in FieldKind::ALL {
            for email_match in [EmailMatch::Prefix, EmailMatch::Full] {
                let _ = PatternValidator::with_email_match(kind, email_match).validate(&input);
            }
        }
    }

    /// A full email match implies a prefix match.
    #[test]
    fn full_email_match_implies_prefix(input in "[a-z0-9._@\\- ]{0,30}") {
        let full = PatternValidator::with_email_match(FieldKind::Email, EmailMatch::Full);
        let prefix = PatternValidator::with_email_match(FieldKind::Email, EmailMatch::Prefix);
        if full.validate(&input) {
            prop_assert!(prefix.validate(&input));
        }
    }

    /// Date parsing never panics, and strict success implies permissive success.
    #[test]
    fn date_parsing_is_consistent(input in prop_oneof![
        "[12][0-9]{3}-[01][0-9]-[0-3][0-9]",
        "[01][0-9]/[0-3][0-9]/[12][0-9]{3}",
        "[0-3]?[0-9] (Jan|Feb|Mar|Apr|May|Jun) [12][0-9]{3}",
        "\\PC{0,20}",
    ]) {
        let strict = parse_timestamp(&input, DateParseMode::Strict);
        let permissive = parse_timestamp(&input, DateParseMode::Permissive);
        if strict.is_some() {
            prop_assert_eq!(strict, permissive);
        }
    }
}
