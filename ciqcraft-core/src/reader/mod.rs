//! CIQ workbook reader using calamine
//!
//! Reads the lit-site and dark-site addressing sheets and normalizes each
//! into a [`SiteTable`]: the site-identifier column is forward-filled across
//! merged cells, export-artifact columns and fully empty rows are dropped,
//! and remaining empty cells receive the configured sentinel.

use calamine::{Data, Range, Reader, open_workbook_auto};
use std::path::Path;

pub mod table;

pub use table::{RawRow, SiteTable};

use crate::config::CiqConfig;
use crate::error::FileFormatError;

/// Read and clean both addressing sheets from the CIQ workbook.
///
/// The workbook handle lives only for the duration of this call; it is
/// released on every exit path, including a missing second sheet. Output
/// order is always `(lit, dark)`.
pub fn read_site_tables<P: AsRef<Path>>(
    path: P,
    config: &CiqConfig,
) -> Result<(SiteTable, SiteTable), FileFormatError> {
    let path = path.as_ref();
    let mut workbook = open_workbook_auto(path).map_err(|source| FileFormatError::Open {
        path: path.to_path_buf(),
        source,
    })?;

    let mut read_sheet = |sheet: &str| -> Result<SiteTable, FileFormatError> {
        if !workbook.sheet_names().iter().any(|name| name == sheet) {
            return Err(FileFormatError::MissingSheet {
                path: path.to_path_buf(),
                sheet: sheet.to_string(),
            });
        }
        let range = workbook
            .worksheet_range(sheet)
            .map_err(|source| FileFormatError::Open {
                path: path.to_path_buf(),
                source,
            })?;
        Ok(clean_sheet(sheet, &range, config))
    };

    let lit = read_sheet(&config.lit_sheet)?;
    let dark = read_sheet(&config.dark_sheet)?;
    Ok((lit, dark))
}

/// Normalize one raw sheet range into a [`SiteTable`].
///
/// Row 0 is the header row and column 0 of the used range is the site
/// identifier. Exposed so callers and tests can feed in-memory ranges
/// without a workbook file.
pub fn clean_sheet(name: &str, range: &Range<Data>, config: &CiqConfig) -> SiteTable {
    let mut source_rows = range.rows();

    let Some(header) = source_rows.next() else {
        return SiteTable {
            name: name.to_string(),
            ..SiteTable::default()
        };
    };

    // Keep data columns with a usable header; unlabeled columns and
    // "unnamed" export artifacts are dropped.
    let mut columns = Vec::new();
    let mut kept = Vec::new();
    for (idx, cell) in header.iter().enumerate().skip(1) {
        if let Some(label) = cell_to_string(cell) {
            if label.to_lowercase().contains("unnamed") {
                continue;
            }
            columns.push(label);
            kept.push(idx);
        }
    }

    let dhcp_column = columns.iter().position(|c| c == "dhcp");

    let mut rows = Vec::new();
    let mut last_site: Option<String> = None;

    for source_row in source_rows {
        // The fill scan must observe the identifier cell even when the row
        // itself turns out to be empty and gets dropped.
        if let Some(id) = source_row.first().and_then(cell_to_string) {
            last_site = Some(id);
        }

        let raw: Vec<Option<String>> = kept
            .iter()
            .map(|&idx| source_row.get(idx).and_then(cell_to_string))
            .collect();
        if raw.iter().all(|value| value.is_none()) {
            continue;
        }

        let mut values: Vec<String> = raw
            .into_iter()
            .map(|value| value.unwrap_or_else(|| config.missing_value.clone()))
            .collect();
        if let Some(idx) = dhcp_column {
            values[idx] = normalize_dhcp(&values[idx]);
        }

        let site_id = last_site
            .clone()
            .unwrap_or_else(|| config.missing_value.clone());
        rows.push(RawRow { site_id, values });
    }

    SiteTable {
        name: name.to_string(),
        columns,
        rows,
    }
}

/// Text-coerce a cell, `None` for empty/whitespace cells. Integral floats
/// render without a fractional part so `vlan_id` 100.0 becomes `"100"`.
fn cell_to_string(data: &Data) -> Option<String> {
    match data {
        Data::Empty => None,
        Data::String(s) | Data::DateTimeIso(s) | Data::DurationIso(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            }
        }
        Data::Int(i) => Some(i.to_string()),
        Data::Float(f) => Some(format_number(*f)),
        Data::Bool(b) => Some(b.to_string()),
        Data::Error(e) => Some(format!("{:?}", e)),
        Data::DateTime(dt) => Some(format_number(dt.as_f64())),
    }
}

fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        value.to_string()
    }
}

/// Map the boolean-like dhcp flag to textual true/false; anything that is
/// not a plain 0/1 passes through unchanged.
fn normalize_dhcp(value: &str) -> String {
    match value {
        "1" | "1.0" => "true".to_string(),
        "0" | "0.0" => "false".to_string(),
        other => other.to_string(),
    }
}
