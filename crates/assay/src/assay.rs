//! Main Assay struct and public API.

use std::fs;
use std::path::Path;

use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{AssayError, Result};
use crate::expiry::{DateParseMode, ExpiryCheck, ExpiryScanner};
use crate::input::{DataTable, Parser, ParserConfig, SourceMetadata};
use crate::metrics::{self, DEFAULT_IQR_MULTIPLIER, ValidationRule, ValidityChecker};
use crate::profile::{self, DEFAULT_PREVIEW_ROWS, DatasetProfile};
use crate::report::{QualityReport, ReportSection};
use crate::validation::EmailMatch;

/// Configuration for Assay runs.
///
/// Every field has a default, so a JSON config file only needs the keys it
/// changes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AssayConfig {
    /// Parser configuration.
    pub parser: ParserConfig,
    /// Columns checked for format validity.
    pub validation_rules: Vec<ValidationRule>,
    /// Whether email values must be addresses in full.
    pub email_match: EmailMatch,
    /// Expiry checks, run in this order.
    pub expiry_checks: Vec<ExpiryCheck>,
    /// Date expiry checks compare against (None = today).
    pub reference_date: Option<NaiveDate>,
    /// How leniently date cells are read.
    pub date_parse_mode: DateParseMode,
    /// Whether to include the outlier section.
    pub detect_outliers: bool,
    /// IQR multiplier for the outlier fence.
    pub iqr_multiplier: f64,
    /// Rows kept in a dataset profile preview.
    pub preview_rows: usize,
}

impl Default for AssayConfig {
    fn default() -> Self {
        Self {
            parser: ParserConfig::default(),
            validation_rules: ValidationRule::defaults(),
            email_match: EmailMatch::default(),
            expiry_checks: ExpiryCheck::defaults(),
            reference_date: None,
            date_parse_mode: DateParseMode::default(),
            detect_outliers: true,
            iqr_multiplier: DEFAULT_IQR_MULTIPLIER,
            preview_rows: DEFAULT_PREVIEW_ROWS,
        }
    }
}

impl AssayConfig {
    /// Creates a new config with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a config from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|e| AssayError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config: AssayConfig = serde_json::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Builder method to set the reference date.
    pub fn with_reference_date(mut self, date: NaiveDate) -> Self {
        self.reference_date = Some(date);
        self
    }

    /// Builder method to set the date parse mode.
    pub fn with_date_parse_mode(mut self, mode: DateParseMode) -> Self {
        self.date_parse_mode = mode;
        self
    }

    /// Builder method to set email strictness.
    pub fn with_email_match(mut self, email_match: EmailMatch) -> Self {
        self.email_match = email_match;
        self
    }

    /// Builder method to enable/disable outlier detection.
    pub fn with_outliers(mut self, enabled: bool) -> Self {
        self.detect_outliers = enabled;
        self
    }

    /// Builder method to set the IQR multiplier.
    pub fn with_iqr_multiplier(mut self, multiplier: f64) -> Self {
        self.iqr_multiplier = multiplier;
        self
    }

    /// Builder method to replace the validation rules.
    pub fn with_validation_rules(mut self, rules: Vec<ValidationRule>) -> Self {
        self.validation_rules = rules;
        self
    }

    /// Builder method to replace the expiry checks.
    pub fn with_expiry_checks(mut self, checks: Vec<ExpiryCheck>) -> Self {
        self.expiry_checks = checks;
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        if !self.iqr_multiplier.is_finite() || self.iqr_multiplier < 0.0 {
            return Err(AssayError::Config(format!(
                "iqr_multiplier must be a non-negative number, got {}",
                self.iqr_multiplier
            )));
        }
        Ok(())
    }
}

/// Result of analyzing a data file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// Metadata about the source file.
    pub source: SourceMetadata,
    /// Quality report for the loaded table.
    pub report: QualityReport,
}

/// The data-quality engine.
pub struct Assay {
    config: AssayConfig,
    parser: Parser,
    validity: ValidityChecker,
    scanner: ExpiryScanner,
}

impl Assay {
    /// Create an Assay instance with default configuration.
    pub fn new() -> Self {
        Self::build(AssayConfig::default())
    }

    /// Create an Assay instance with custom configuration.
    pub fn with_config(config: AssayConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::build(config))
    }

    fn build(config: AssayConfig) -> Self {
        let parser = Parser::with_config(config.parser.clone());
        let validity = ValidityChecker::from_rules(&config.validation_rules, config.email_match);
        let scanner = match config.reference_date {
            Some(date) => ExpiryScanner::new(date, config.date_parse_mode),
            None => ExpiryScanner::today(config.date_parse_mode),
        };

        Self {
            config,
            parser,
            validity,
            scanner,
        }
    }

    /// The active configuration.
    pub fn config(&self) -> &AssayConfig {
        &self.config
    }

    /// Load a data file.
    pub fn load(&self, path: impl AsRef<Path>) -> Result<(DataTable, SourceMetadata)> {
        self.parser.parse_file(path)
    }

    /// Load a data file and produce its quality report.
    pub fn analyze(&self, path: impl AsRef<Path>) -> Result<AnalysisResult> {
        let (table, source) = self.load(path)?;
        let report = self.report(&table);
        Ok(AnalysisResult { source, report })
    }

    /// Compute every metric over a loaded table.
    pub fn report(&self, table: &DataTable) -> QualityReport {
        if table.is_empty() {
            tracing::warn!("Table has no rows; percentage metrics will report no data");
        }

        let mut sections = vec![
            ReportSection::Validity(self.validity.check(table)),
            ReportSection::Uniqueness(metrics::uniqueness(table)),
            ReportSection::Completeness(metrics::completeness(table)),
        ];

        if self.config.detect_outliers {
            sections.push(ReportSection::Outliers(metrics::outliers(
                table,
                self.config.iqr_multiplier,
            )));
        }

        sections.extend(
            self.scanner
                .scan_all(table, &self.config.expiry_checks)
                .into_iter()
                .map(ReportSection::Expiry),
        );

        tracing::info!(
            rows = table.row_count(),
            columns = table.column_count(),
            sections = sections.len(),
            "Quality report assembled"
        );

        QualityReport {
            row_count: table.row_count(),
            column_count: table.column_count(),
            reference_date: self.scanner.reference_date(),
            generated_at: Utc::now(),
            sections,
        }
    }

    /// Overview of a loaded table.
    pub fn profile(&self, table: &DataTable) -> DatasetProfile {
        profile::profile(table, self.config.preview_rows)
    }
}

impl Default for Assay {
    fn default() -> Self {
        Self::new()
    }
}
