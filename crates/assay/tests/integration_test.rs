//! Integration tests for Assay.

use std::io::Write;

use chrono::NaiveDate;
use tempfile::{Builder, NamedTempFile};

use assay::{
    Assay, AssayConfig, AssayError, CompletenessTier, DateParseMode, EmailMatch, ExpiryKind,
    ReportSection,
};

/// Helper to create a temporary file with given content.
fn create_test_file(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("Failed to create temp file");
    file.write_all(content.as_bytes())
        .expect("Failed to write to temp file");
    file
}

fn reference_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
}

fn assay_at_reference() -> Assay {
    Assay::with_config(AssayConfig::new().with_reference_date(reference_date())).unwrap()
}

// =============================================================================
// Loading
// =============================================================================

#[test]
fn test_load_csv_and_tsv() {
    let csv = create_test_file("a,b\n1,2\n3,4\n");
    let tsv = create_test_file("a\tb\n1\t2\n");
    let assay = Assay::new();

    let (table, source) = assay.load(csv.path()).expect("Load failed");
    assert_eq!(table.row_count(), 2);
    assert_eq!(source.format, "csv");

    let (table, source) = assay.load(tsv.path()).expect("Load failed");
    assert_eq!(table.headers, vec!["a", "b"]);
    assert_eq!(source.format, "tsv");
}

#[test]
fn test_missing_file_is_load_error() {
    let err = Assay::new()
        .analyze("/nonexistent/customers.csv")
        .unwrap_err();

    assert!(matches!(err, AssayError::Io { .. }));
    assert!(err.is_load_error());
}

#[test]
fn test_spreadsheet_is_rejected() {
    let file = Builder::new()
        .suffix(".xlsx")
        .tempfile()
        .expect("Failed to create temp file");

    let err = Assay::new().analyze(file.path()).unwrap_err();
    assert!(matches!(err, AssayError::UnsupportedFormat(_)));
}

#[test]
fn test_empty_file_is_load_error() {
    let file = create_test_file("");
    let err = Assay::new().analyze(file.path()).unwrap_err();
    assert!(matches!(err, AssayError::EmptyData(_)));
}

#[test]
fn test_header_only_file_reports_no_data() {
    let file = create_test_file("Mobile No.,Email ID,amount\n");
    let report = Assay::new().analyze(file.path()).unwrap().report;

    assert_eq!(report.row_count, 0);
    let summary = report.summary();
    assert_eq!(summary.validity_score, None);
    assert_eq!(summary.uniqueness_score, None);
    assert_eq!(summary.completeness_score, None);
    assert!(report.outliers().unwrap().records.is_empty());
}

#[test]
fn test_na_tokens_count_as_missing() {
    let file = create_test_file("name,city\nAlice,NA\nBob,\nCarol,n/a\nDan,Dubai\n");
    let report = Assay::new().analyze(file.path()).unwrap().report;

    let city = &report.completeness().unwrap().records[1];
    assert_eq!(city.null_count, 3);
    assert_eq!(city.completeness_score, Some(25.0));
}

// =============================================================================
// Report scenarios
// =============================================================================

#[test]
fn test_validity_over_contact_columns() {
    let content = "Mobile No.,Telephone,Email ID,EID\n\
                   050-1234567,4-1234567,a@b.com,784-1990-1234567-1\n\
                   0501234567,04-1234567,user.example.com,784-1990-1234567\n\
                   055-7654321,,x@y.ae,\n\
                   ,1234567,bob@mail.org,784-2001-7654321-9\n";
    let file = create_test_file(content);
    let report = Assay::new().analyze(file.path()).unwrap().report;

    let validity = report.validity().unwrap();
    let invalid: Vec<_> = validity
        .records
        .iter()
        .map(|r| (r.column.as_str(), r.invalid_count))
        .collect();
    assert_eq!(
        invalid,
        vec![("Mobile No.", 1), ("Telephone", 1), ("Email ID", 1), ("EID", 1)]
    );
    assert_eq!(validity.total_invalid, 4);
    // Four invalid values over four rows floors the score
    assert_eq!(validity.score, Some(0.0));
}

#[test]
fn test_duplicates_and_completeness() {
    let content = "id,name,notes\n\
                   1,Alice,\n\
                   1,Alice,\n\
                   2,Bob,\n\
                   1,Alice,\n";
    let file = create_test_file(content);
    let report = Assay::new().analyze(file.path()).unwrap().report;

    let uniqueness = report.uniqueness().unwrap();
    assert_eq!(uniqueness.duplicate_count, 2);
    assert_eq!(uniqueness.score, Some(50.0));

    let completeness = report.completeness().unwrap();
    let tiers: Vec<_> = completeness.records.iter().map(|r| r.tier).collect();
    assert_eq!(
        tiers,
        vec![
            Some(CompletenessTier::Healthy),
            Some(CompletenessTier::Healthy),
            Some(CompletenessTier::Critical),
        ]
    );
    let mean = completeness.score.unwrap();
    assert!((mean - 200.0 / 3.0).abs() < 1e-9);
}

#[test]
fn test_outliers_in_numeric_columns_only() {
    let content = "name,amount\n\
                   a,10\n\
                   b,12\n\
                   c,11\n\
                   d,13\n\
                   e,500\n";
    let file = create_test_file(content);
    let report = Assay::new().analyze(file.path()).unwrap().report;

    let outliers = report.outliers().unwrap();
    assert_eq!(outliers.records.len(), 1);
    let amount = &outliers.records[0];
    assert_eq!(amount.column, "amount");
    assert_eq!(amount.outlier_count, 1);
    assert_eq!(amount.sample_rows, vec![4]);
    assert_eq!(amount.outlier_percentage, Some(20.0));
}

#[test]
fn test_expiry_sections_in_check_order() {
    let content = "Accountnum,Trade License Expiry Date,C Code,Passport Expiry,EID Expiry\n\
                   A1,2020-05-05,C1,2030-01-01,2023-12-31\n\
                   A2,2099-01-01,C2,2010-01-01,2025-01-01\n";
    let file = create_test_file(content);
    let report = assay_at_reference().analyze(file.path()).unwrap().report;

    let kinds: Vec<_> = report.expiry().map(|e| e.kind).collect();
    assert_eq!(
        kinds,
        vec![ExpiryKind::Passport, ExpiryKind::NationalId, ExpiryKind::TradeLicense]
    );

    let passport = report.expiry().next().unwrap();
    assert_eq!(passport.count, 1);
    assert_eq!(passport.expired[0].identifier.as_deref(), Some("C2"));
    assert_eq!(passport.percentage, Some(50.0));

    assert_eq!(report.summary().expired_count, 3);
}

#[test]
fn test_section_order_is_fixed() {
    let content = "EC Code,Ejari Expiry Date,Mobile No.\nE1,2001-01-01,050-1234567\n";
    let file = create_test_file(content);
    let report = assay_at_reference().analyze(file.path()).unwrap().report;

    let titles: Vec<_> = report.sections.iter().map(ReportSection::title).collect();
    assert_eq!(
        titles,
        vec!["Validity", "Uniqueness", "Completeness", "Outliers", "Expired Contracts"]
    );
}

#[test]
fn test_absent_columns_are_skipped() {
    let file = create_test_file("foo,bar\nx,y\n");
    let report = assay_at_reference().analyze(file.path()).unwrap().report;

    let validity = report.validity().unwrap();
    assert!(validity.records.is_empty());
    assert_eq!(validity.score, None);
    assert_eq!(report.expiry().count(), 0);
}

// =============================================================================
// Configuration
// =============================================================================

#[test]
fn test_full_email_match_is_stricter() {
    let file = create_test_file("Email ID\nuser@example.com trailing\nok@mail.com\n");

    let loose = Assay::new().analyze(file.path()).unwrap().report;
    assert_eq!(loose.validity().unwrap().total_invalid, 0);

    let strict = Assay::with_config(AssayConfig::new().with_email_match(EmailMatch::Full))
        .unwrap()
        .analyze(file.path())
        .unwrap()
        .report;
    assert_eq!(strict.validity().unwrap().total_invalid, 1);
}

#[test]
fn test_strict_date_mode_counts_unparsable() {
    let file = create_test_file("C Code,EID Expiry\nC1,01/02/2000\nC2,2000-01-02\n");
    let config = AssayConfig::new()
        .with_reference_date(reference_date())
        .with_date_parse_mode(DateParseMode::Strict);
    let report = Assay::with_config(config)
        .unwrap()
        .analyze(file.path())
        .unwrap()
        .report;

    let eid = report.expiry().next().unwrap();
    assert_eq!(eid.count, 1);
    assert_eq!(eid.unparsable_count, 1);
}

#[test]
fn test_config_file_drives_the_report() {
    let config = create_test_file(
        r#"{
            "reference_date": "2024-06-01",
            "detect_outliers": false,
            "validation_rules": [{"column": "phone", "kind": "mobile"}],
            "expiry_checks": [{"kind": "contract", "date_column": "ends", "id_column": "ref"}]
        }"#,
    );
    let data = create_test_file("ref,phone,ends,amount\nR1,050-1234567,2020-01-01,1\nR2,bad,2030-01-01,900\n");

    let config = AssayConfig::from_json_file(config.path()).unwrap();
    let report = Assay::with_config(config)
        .unwrap()
        .analyze(data.path())
        .unwrap()
        .report;

    assert!(report.outliers().is_none());
    assert_eq!(report.validity().unwrap().records[0].column, "phone");
    assert_eq!(report.validity().unwrap().total_invalid, 1);

    let contract = report.expiry().next().unwrap();
    assert_eq!(contract.kind, ExpiryKind::Contract);
    assert_eq!(contract.rows(), vec![0]);
}

#[test]
fn test_report_serializes_to_json() {
    let file = create_test_file("C Code,Passport Expiry\nC1,2000-01-01\n");
    let result = assay_at_reference().analyze(file.path()).unwrap();

    let json = serde_json::to_value(&result).unwrap();
    let sections = json["report"]["sections"].as_array().unwrap();
    assert_eq!(sections[0]["section"], "validity");
    assert_eq!(sections.last().unwrap()["section"], "expiry");
    assert_eq!(sections.last().unwrap()["kind"], "passport");
    assert_eq!(json["report"]["reference_date"], "2024-06-01");
}

#[test]
fn test_profile() {
    let file = create_test_file("id,name,score\n1,Alice,3.5\n2,Bob,\n3,,4.5\n");
    let assay = Assay::new();
    let (table, _) = assay.load(file.path()).unwrap();
    let profile = assay.profile(&table);

    assert_eq!(profile.row_count, 3);
    assert_eq!(profile.columns[2].null_count, 1);
    let stats = profile.columns[2].numeric.as_ref().unwrap();
    assert_eq!(stats.mean, 4.0);
}
