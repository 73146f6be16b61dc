//! Assay CLI - data-quality reports for tabular records.

mod cli;
mod commands;

use clap::Parser;
use cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();

    if let Err(e) = assay::logging::init_logging(cli.verbose, cli.quiet) {
        eprintln!("Warning: {}", e);
    }

    let result = match cli.command {
        Commands::Report {
            file,
            json,
            config,
            reference_date,
            date_mode,
            strict_email,
            no_outliers,
            iqr_multiplier,
            max_listed,
        } => commands::report::run(commands::report::ReportArgs {
            file,
            json,
            config,
            reference_date,
            date_mode,
            strict_email,
            no_outliers,
            iqr_multiplier,
            max_listed,
        }),

        Commands::Profile {
            file,
            json,
            preview,
        } => commands::profile::run(file, json, preview),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
