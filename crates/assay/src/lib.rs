//! Assay: data-quality reports for tabular customer and account records.
//!
//! Assay loads a delimited file and measures how trustworthy it is: whether
//! contact and identity fields have the expected format, how many rows are
//! duplicated, how complete each column is, which numeric values fall outside
//! an IQR fence, and which documents have already expired.
//!
//! # Core Principles
//!
//! - **Read-only**: The loaded table is never modified
//! - **Order-stable**: Report sections and rows keep table order
//! - **Honest about gaps**: Metrics over no rows report "no data" instead of a number
//!
//! # Example
//!
//! ```no_run
//! use assay::Assay;
//!
//! let assay = Assay::new();
//! let result = assay.analyze("customers.csv").unwrap();
//!
//! let summary = result.report.summary();
//! println!("Duplicates: {}", summary.duplicate_count);
//! println!("Expired: {}", summary.expired_count);
//! ```

pub mod error;
pub mod expiry;
pub mod input;
pub mod logging;
pub mod metrics;
pub mod profile;
pub mod report;
pub mod validation;

mod assay;

pub use crate::assay::{AnalysisResult, Assay, AssayConfig};
pub use error::{AssayError, Result};
pub use expiry::{DateParseMode, ExpiryCheck, ExpiryKind, ExpiryResult, ExpiryScanner};
pub use input::{DataTable, Parser, ParserConfig, SourceMetadata};
pub use metrics::{CompletenessTier, ValidationRule, ValidityChecker};
pub use profile::DatasetProfile;
pub use report::{QualityReport, ReportSection, ReportSummary};
pub use validation::{EmailMatch, FieldKind, FieldValidator, PatternValidator};
