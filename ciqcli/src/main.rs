use anyhow::{Context, Result};
use ciqcraft_core::{CiqConfig, CiqParser};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use std::time::Instant;

mod formatter;

#[derive(Parser)]
#[command(name = "ciqcli")]
#[command(about = "Convert CIQ site-addressing workbooks into provisioning JSON datamodels", long_about = None)]
#[command(version)]
struct Cli {
    /// Path to the CIQ workbook (defaults to the configured path)
    #[arg(value_name = "FILE")]
    file: Option<PathBuf>,

    /// Path to configuration file (TOML)
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "human")]
    format: OutputFormat,
}

#[derive(Clone, ValueEnum)]
enum OutputFormat {
    /// Banner-separated pretty JSON, matching the interactive console flow
    Human,
    /// Single JSON document for machine consumption
    Json,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = if let Some(config_path) = &cli.config {
        CiqConfig::from_file(config_path)
            .with_context(|| format!("Failed to load config from {}", config_path.display()))?
    } else {
        // Try to load default config from current directory if it exists
        let default_config_path = PathBuf::from("ciqcraft.toml");
        if default_config_path.exists() {
            CiqConfig::from_file(&default_config_path).with_context(|| {
                format!(
                    "Failed to load config from {}",
                    default_config_path.display()
                )
            })?
        } else {
            CiqConfig::default()
        }
    };

    let workbook = cli.file.clone().unwrap_or_else(|| config.workbook.clone());
    let parser = CiqParser::with_config(config);

    let start = Instant::now();
    let models = parser
        .parse_file(&workbook)
        .with_context(|| format!("Failed to parse CIQ workbook: {}", workbook.display()))?;
    let elapsed = start.elapsed();

    match cli.format {
        OutputFormat::Human => formatter::print_human(&models, elapsed)?,
        OutputFormat::Json => formatter::print_json(&workbook, &models)?,
    }

    // Schema errors are reported inline but do not change the exit code;
    // only a FileFormatError terminates the run with a failure status.
    Ok(())
}
