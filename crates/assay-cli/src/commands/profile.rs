//! Profile command - show an overview of a data file.

use std::path::PathBuf;

use assay::profile::ColumnKind;
use assay::{Assay, AssayConfig};
use colored::Colorize;

pub fn run(
    file: PathBuf,
    json_output: bool,
    preview: Option<usize>,
) -> Result<(), Box<dyn std::error::Error>> {
    if !file.exists() {
        return Err(format!("File not found: {}", file.display()).into());
    }

    let mut config = AssayConfig::new();
    if let Some(rows) = preview {
        config.preview_rows = rows;
    }
    let assay = Assay::with_config(config)?;

    let (table, source) = assay.load(&file)?;
    let profile = assay.profile(&table);

    if json_output {
        let output = serde_json::json!({
            "source": source,
            "profile": profile,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!(
        "{} {} ({})",
        "Profile of".cyan().bold(),
        source.file.white(),
        source.format
    );
    println!(
        "{} rows, {} columns",
        profile.row_count.to_string().white().bold(),
        profile.column_count.to_string().white().bold()
    );
    println!();

    println!("{}", "Columns:".yellow().bold());
    for col in &profile.columns {
        let kind = match col.kind {
            ColumnKind::Numeric => col.kind.label().blue(),
            ColumnKind::Text => col.kind.label().normal(),
            ColumnKind::Empty => col.kind.label().red(),
        };
        println!(
            "  {:20} {:8} {:>6} non-null {:>6} null {:>6} unique",
            col.name, kind, col.non_null_count, col.null_count, col.unique_count
        );
        if let Some(stats) = &col.numeric {
            println!(
                "  {:20} mean {:.2}  min {}  median {}  max {}",
                "", stats.mean, stats.min, stats.median, stats.max
            );
        }
    }

    if !profile.preview.is_empty() {
        println!();
        println!("{}", "Preview:".yellow().bold());
        println!("  {}", table.headers.join(" | "));
        for row in &profile.preview {
            let cells: Vec<&str> = row.iter().map(|c| c.as_deref().unwrap_or("")).collect();
            println!("  {}", cells.join(" | "));
        }
    }

    Ok(())
}
