//! CLI argument definitions using clap.

use std::path::PathBuf;

use assay::DateParseMode;
use chrono::NaiveDate;
use clap::{ArgAction, Parser, Subcommand};

/// Assay: data-quality reports for tabular records
#[derive(Parser)]
#[command(name = "assay")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Compute the full data-quality report for a file
    Report {
        /// Path to the data file (CSV/TSV)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Output as JSON
        #[arg(long)]
        json: bool,

        /// JSON configuration file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Date expiry checks compare against (YYYY-MM-DD, default: today)
        #[arg(long, value_name = "DATE")]
        reference_date: Option<NaiveDate>,

        /// How leniently date cells are read
        #[arg(long)]
        date_mode: Option<DateModeChoice>,

        /// Require email values to be complete addresses
        #[arg(long)]
        strict_email: bool,

        /// Skip outlier detection
        #[arg(long)]
        no_outliers: bool,

        /// IQR multiplier for the outlier fence
        #[arg(long, value_name = "K")]
        iqr_multiplier: Option<f64>,

        /// Maximum expired rows listed per check (0 lists all)
        #[arg(long, default_value = "20")]
        max_listed: usize,
    },

    /// Show the shape, column kinds and leading rows of a file
    Profile {
        /// Path to the data file (CSV/TSV)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Output as JSON
        #[arg(long)]
        json: bool,

        /// Number of leading rows to show
        #[arg(short, long)]
        preview: Option<usize>,
    },
}

/// Date parsing leniency
#[derive(Clone, Copy, Debug)]
pub enum DateModeChoice {
    /// ISO dates and timestamps only
    Strict,
    /// ISO plus common slashed, named-month and compact forms
    Permissive,
}

impl std::str::FromStr for DateModeChoice {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "strict" | "iso" => Ok(DateModeChoice::Strict),
            "permissive" | "lenient" => Ok(DateModeChoice::Permissive),
            _ => Err(format!("Unknown date mode: {}. Use strict or permissive.", s)),
        }
    }
}

impl From<DateModeChoice> for DateParseMode {
    fn from(choice: DateModeChoice) -> Self {
        match choice {
            DateModeChoice::Strict => DateParseMode::Strict,
            DateModeChoice::Permissive => DateParseMode::Permissive,
        }
    }
}
