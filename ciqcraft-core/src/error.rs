//! Error taxonomy for CIQ parsing

use std::path::PathBuf;
use thiserror::Error;

/// Source columns every network row must carry for the datamodel mapping.
pub const REQUIRED_COLUMNS: [&str; 8] = [
    "site_id", "vlan_id", "vlan_name", "IPv4", "IPv6", "vrf", "dhcp", "ipam_use",
];

/// Fatal workbook-level failure: the file cannot be opened or a required
/// sheet is absent. No partial output is produced.
#[derive(Debug, Error)]
pub enum FileFormatError {
    #[error("cannot open CIQ workbook '{}': {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: calamine::Error,
    },

    #[error("CIQ workbook '{}' has no sheet named '{sheet}'", path.display())]
    MissingSheet { path: PathBuf, sheet: String },
}

/// A row lacked one of the source columns the datamodel mapping renames.
///
/// `row` is the 1-based position of the row within its sheet's cleaned data
/// (header excluded).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("site '{site_id}' row {row}: CIQ is missing required column '{column}'")]
pub struct SchemaError {
    pub site_id: String,
    pub row: usize,
    pub column: &'static str,
}

impl SchemaError {
    pub fn new(site_id: impl Into<String>, row: usize, column: &'static str) -> Self {
        Self {
            site_id: site_id.into(),
            row,
            column,
        }
    }
}
