//! ciqcraft-core: CIQ site-addressing workbooks to provisioning datamodels
//!
//! Parses the lit-site and dark-site IP addressing sheets of a CIQ intake
//! workbook and produces the per-site network records a downstream
//! provisioning playbook consumes.

pub mod builder;
pub mod config;
pub mod error;
pub mod model;
pub mod reader;

use std::path::Path;

pub use builder::build_site_records;
pub use config::CiqConfig;
pub use error::{FileFormatError, REQUIRED_COLUMNS, SchemaError};
pub use model::{NetworkEntry, SiteRecord};
pub use reader::{RawRow, SiteTable, read_site_tables};

/// Main parser interface
pub struct CiqParser {
    config: CiqConfig,
}

/// Parsed datamodels for both site categories, plus any schema errors
/// collected while mapping rows. Lit and dark are kept separate all the
/// way to the output.
#[derive(Debug, Clone, PartialEq)]
pub struct SiteModels {
    pub lit: Vec<SiteRecord>,
    pub dark: Vec<SiteRecord>,
    pub schema_errors: Vec<SchemaError>,
}

impl CiqParser {
    /// Create a parser with default configuration
    pub fn new() -> Self {
        Self::with_config(CiqConfig::default())
    }

    /// Create a parser with custom configuration
    pub fn with_config(config: CiqConfig) -> Self {
        Self { config }
    }

    /// Read, clean and build both addressing sheets of a CIQ workbook.
    ///
    /// Fails with [`FileFormatError`] when the workbook cannot be opened or
    /// a required sheet is absent; schema problems in individual rows are
    /// collected in the returned [`SiteModels`] instead of aborting the run.
    pub fn parse_file<P: AsRef<Path>>(&self, path: P) -> Result<SiteModels, FileFormatError> {
        let (lit_table, dark_table) = reader::read_site_tables(path, &self.config)?;

        let (lit, mut schema_errors) = builder::build_site_records(&lit_table, &self.config);
        let (dark, dark_errors) = builder::build_site_records(&dark_table, &self.config);
        schema_errors.extend(dark_errors);

        Ok(SiteModels {
            lit,
            dark,
            schema_errors,
        })
    }
}

impl Default for CiqParser {
    fn default() -> Self {
        Self::new()
    }
}
