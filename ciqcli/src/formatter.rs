//! Console output for parsed site datamodels

use anyhow::Result;
use ciqcraft_core::{REQUIRED_COLUMNS, SiteModels};
use colored::*;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use std::path::Path;
use std::time::Duration;

const BANNER_WIDTH: usize = 20;

/// Print both site collections as banner-separated pretty JSON, followed by
/// any schema errors and the elapsed wall-clock time.
pub fn print_human(models: &SiteModels, elapsed: Duration) -> Result<()> {
    print_banner("lit sites");
    println!("{}", to_pretty_json(&models.lit)?);

    print_banner("dark sites");
    println!("{}", to_pretty_json(&models.dark)?);

    if !models.schema_errors.is_empty() {
        print_banner("schema errors");
        for error in &models.schema_errors {
            println!("{} {}", "ERROR".red().bold(), error);
        }
        println!("{}", "Tool requires the following columns in the CIQ:".bold());
        println!("  {}", REQUIRED_COLUMNS.join(", "));
    }

    print_banner("time");
    println!("{}", elapsed.as_secs_f64());
    Ok(())
}

/// Print a single machine-readable JSON document
pub fn print_json(file_path: &Path, models: &SiteModels) -> Result<()> {
    let schema_errors: Vec<_> = models
        .schema_errors
        .iter()
        .map(|e| {
            serde_json::json!({
                "site_id": e.site_id,
                "row": e.row,
                "column": e.column,
                "message": e.to_string(),
            })
        })
        .collect();

    let output = serde_json::json!({
        "file": file_path.display().to_string(),
        "lit": models.lit,
        "dark": models.dark,
        "schema_errors": schema_errors,
        "summary": {
            "lit_sites": models.lit.len(),
            "dark_sites": models.dark.len(),
            "schema_errors": models.schema_errors.len(),
        }
    });

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn print_banner(title: &str) {
    let rule = "-".repeat(BANNER_WIDTH);
    println!(
        "\n{}",
        format!("{}|{}|{}", rule, title.to_uppercase(), rule).bold()
    );
}

/// Pretty JSON with the 4-space indentation the downstream workflow expects
fn to_pretty_json<T: Serialize>(value: &T) -> Result<String> {
    let mut buf = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value.serialize(&mut ser)?;
    Ok(String::from_utf8(buf)?)
}
