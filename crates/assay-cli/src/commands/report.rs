//! Report command - compute and print the data-quality report.

use std::path::PathBuf;

use assay::metrics::{
    CompletenessReport, OutlierReport, UniquenessReport, ValidityReport, format_percentage,
};
use assay::{
    AnalysisResult, Assay, AssayConfig, CompletenessTier, DataTable, DateParseMode, EmailMatch,
    ExpiryResult, ReportSection,
};
use chrono::NaiveDate;
use colored::{ColoredString, Colorize};

use crate::cli::DateModeChoice;

/// Options collected from the command line.
pub struct ReportArgs {
    pub file: PathBuf,
    pub json: bool,
    pub config: Option<PathBuf>,
    pub reference_date: Option<NaiveDate>,
    pub date_mode: Option<DateModeChoice>,
    pub strict_email: bool,
    pub no_outliers: bool,
    pub iqr_multiplier: Option<f64>,
    pub max_listed: usize,
}

pub fn run(args: ReportArgs) -> Result<(), Box<dyn std::error::Error>> {
    if !args.file.exists() {
        return Err(format!("File not found: {}", args.file.display()).into());
    }

    let mut config = match &args.config {
        Some(path) => {
            tracing::debug!(config = %path.display(), "Loading configuration file");
            AssayConfig::from_json_file(path)?
        }
        None => AssayConfig::new(),
    };
    if let Some(date) = args.reference_date {
        config = config.with_reference_date(date);
    }
    if let Some(mode) = args.date_mode {
        config = config.with_date_parse_mode(DateParseMode::from(mode));
    }
    if args.strict_email {
        config = config.with_email_match(EmailMatch::Full);
    }
    if args.no_outliers {
        config = config.with_outliers(false);
    }
    if let Some(k) = args.iqr_multiplier {
        config = config.with_iqr_multiplier(k);
    }

    let assay = Assay::with_config(config)?;
    let (table, source) = assay.load(&args.file)?;
    let result = AnalysisResult {
        source,
        report: assay.report(&table),
    };

    if args.json {
        let mut output = serde_json::to_value(&result)?;
        output["expired_rows"] = expired_rows_json(&result, &table);
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    let report = &result.report;
    println!(
        "{} {}",
        "Quality report for".cyan().bold(),
        args.file.display().to_string().white()
    );
    println!(
        "{} rows, {} columns, expiry compared against {}",
        report.row_count.to_string().white().bold(),
        report.column_count.to_string().white().bold(),
        report.reference_date
    );

    for section in &report.sections {
        println!();
        println!("{}", format!("{}:", section.title()).yellow().bold());
        match section {
            ReportSection::Validity(v) => print_validity(v),
            ReportSection::Uniqueness(u) => print_uniqueness(u),
            ReportSection::Completeness(c) => print_completeness(c),
            ReportSection::Outliers(o) => print_outliers(o),
            ReportSection::Expiry(e) => print_expiry(e, &table, args.max_listed),
        }
    }

    Ok(())
}

fn print_validity(report: &ValidityReport) {
    if report.records.is_empty() {
        println!("  No recognised contact or ID columns.");
    }
    for record in &report.records {
        let count = if record.invalid_count == 0 {
            record.invalid_count.to_string().green()
        } else {
            record.invalid_count.to_string().red()
        };
        println!(
            "  {:20} {} invalid ({}) of {} checked",
            record.column,
            count,
            format_percentage(record.percentage),
            record.checked_count
        );
    }
    println!("  Validity score: {}", score_colored(report.score));
}

fn print_uniqueness(report: &UniquenessReport) {
    println!(
        "  Duplicate rows: {}",
        report.duplicate_count.to_string().white().bold()
    );
    println!("  Uniqueness score: {}", score_colored(report.score));
}

fn print_completeness(report: &CompletenessReport) {
    for record in &report.records {
        let tier = match record.tier {
            Some(tier) => tier_colored(tier),
            None => "-".normal(),
        };
        println!(
            "  {:20} {:>6} null ({:>8})  completeness {:>8}  {}",
            record.column,
            record.null_count,
            format_percentage(record.null_percentage),
            format_percentage(record.completeness_score),
            tier
        );
    }
    println!("  Completeness score: {}", score_colored(report.score));
}

fn print_outliers(report: &OutlierReport) {
    if report.records.is_empty() {
        println!("  No numeric columns.");
        return;
    }
    for record in &report.records {
        println!(
            "  {:20} {} outliers ({}) outside [{:.2}, {:.2}]",
            record.column,
            record.outlier_count.to_string().white().bold(),
            format_percentage(record.outlier_percentage),
            record.fence.lower,
            record.fence.upper
        );
    }
}

fn print_expiry(result: &ExpiryResult, table: &DataTable, max_listed: usize) {
    if result.count == 0 {
        println!(
            "  {}",
            format!("No Expired {} Found.", result.kind.plural()).green()
        );
    } else {
        println!(
            "  {} expired ({} of rows)",
            result.count.to_string().red().bold(),
            format_percentage(result.percentage)
        );

        let limit = if max_listed == 0 { result.count } else { max_listed };
        let mut lines = expired_lines(result, table, limit).into_iter();
        if let Some(header) = lines.next() {
            println!("  {}", header.bold());
        }
        for line in lines {
            println!("  {}", line);
        }
        if result.count > limit {
            println!("  ... {} more", result.count - limit);
        }
    }

    if result.unparsable_count > 0 {
        println!(
            "  {} {} values could not be read as dates",
            "Note:".yellow(),
            result.unparsable_count
        );
    }
}

/// Header line followed by up to `limit` full expired rows, cells joined by `" | "`.
fn expired_lines(result: &ExpiryResult, table: &DataTable, limit: usize) -> Vec<String> {
    let expired = result.expired_table(table);
    let mut lines = Vec::with_capacity(limit.min(expired.row_count()) + 1);
    lines.push(expired.headers.join(" | "));
    for row in expired.rows.iter().take(limit) {
        let cells: Vec<&str> = row.iter().map(|c| c.as_deref().unwrap_or("")).collect();
        lines.push(cells.join(" | "));
    }
    lines
}

/// Full expired rows per check, as header-keyed objects.
fn expired_rows_json(result: &AnalysisResult, table: &DataTable) -> serde_json::Value {
    let checks: Vec<serde_json::Value> = result
        .report
        .expiry()
        .map(|e| {
            let expired = e.expired_table(table);
            let rows: Vec<serde_json::Map<String, serde_json::Value>> = expired
                .rows
                .iter()
                .map(|row| {
                    expired
                        .headers
                        .iter()
                        .cloned()
                        .zip(row.iter().map(|c| serde_json::json!(c)))
                        .collect()
                })
                .collect();
            serde_json::json!({ "kind": e.kind, "rows": rows })
        })
        .collect();
    serde_json::Value::Array(checks)
}

fn tier_colored(tier: CompletenessTier) -> ColoredString {
    match tier {
        CompletenessTier::Critical => tier.label().red().bold(),
        CompletenessTier::Poor => tier.label().yellow(),
        CompletenessTier::Fair => tier.label().normal(),
        CompletenessTier::Healthy => tier.label().green(),
    }
}

fn score_colored(score: Option<f64>) -> ColoredString {
    let text = format_percentage(score);
    match score {
        Some(s) if s >= 80.0 => text.green(),
        Some(s) if s >= 50.0 => text.yellow(),
        Some(_) => text.red(),
        None => text.dimmed(),
    }
}
