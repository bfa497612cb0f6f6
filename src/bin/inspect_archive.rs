use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use gazeparquet::inspect::{inspect_archive, ArchiveReport};

/// Print the schema, row groups and recording coverage of a converted archive.
#[derive(Debug, Parser)]
#[command(name = "inspect_archive", version, about)]
struct Args {
    /// Parquet archive produced by `gazeparquet`.
    path: PathBuf,

    /// Emit the report as JSON instead of text.
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let report = inspect_archive(&args.path)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&args.path, &report);
    }
    Ok(())
}

fn print_report(path: &std::path::Path, report: &ArchiveReport) {
    println!("=== Archive: {} ===", path.display());
    println!(
        "Created by:           {}",
        report.created_by.as_deref().unwrap_or("<unknown>")
    );
    println!("Total rows:           {}", report.rows);
    println!("Number of row groups: {}", report.row_groups.len());
    println!("File-size on disk:    {} bytes", report.file_bytes);
    println!();

    println!("=== Columns ===");
    for col in &report.columns {
        let null = if col.nullable { "nullable" } else { "required" };
        println!("- {:<20} | {:<10} | {}", col.name, col.data_type, null);
    }
    println!();

    for (idx, rg) in report.row_groups.iter().enumerate() {
        println!("--- Row Group {} ---", idx);
        println!("  Rows:               {}", rg.rows);
        println!("  Compressed size:    {} bytes", rg.compressed_bytes);
        println!("  Uncompressed size:  {} bytes", rg.uncompressed_bytes);
    }
    println!();

    println!("=== Recordings ===");
    for (name, values) in &report.metadata_values {
        let (min, max) = match (values.first(), values.last()) {
            (Some(min), Some(max)) => (min.to_string(), max.to_string()),
            _ => ("-".to_string(), "-".to_string()),
        };
        println!(
            "- {:<12} distinct: {:<5} min: {:<5} max: {}",
            name,
            values.len(),
            min,
            max
        );
    }
}
