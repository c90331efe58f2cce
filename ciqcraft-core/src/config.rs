//! Configuration for workbook location, sheet names and datamodel constants

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Parser configuration.
///
/// Every field has a default matching the production CIQ intake document, so
/// a config file only needs to name the values it overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CiqConfig {
    /// Path to the CIQ workbook, relative to the working directory.
    pub workbook: PathBuf,
    /// Sheet holding lit-site addressing rows.
    pub lit_sheet: String,
    /// Sheet holding dark-site addressing rows.
    pub dark_sheet: String,
    /// Zone tag stamped on every network entry.
    pub ipam_zone: String,
    /// Environment tag stamped on every site record.
    pub ipam_environment: String,
    /// Sentinel written into cells that are empty after cleanup.
    pub missing_value: String,
}

impl Default for CiqConfig {
    fn default() -> Self {
        Self {
            workbook: PathBuf::from("ciq_network_engineering.xlsx"),
            lit_sheet: "LIT SITE IP ADDRESSING".to_string(),
            dark_sheet: "DARK SITE IP ADDRESSING".to_string(),
            ipam_zone: "INTERNAL".to_string(),
            ipam_environment: "INTEROP".to_string(),
            missing_value: "na".to_string(),
        }
    }
}

impl CiqConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: CiqConfig = toml::from_str(&content)?;
        Ok(config)
    }
}
