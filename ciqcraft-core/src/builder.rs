//! Datamodel builder: cleaned site tables to per-site provisioning records
//!
//! Rows are grouped by site identifier and mapped into the target schema:
//! `vlan_name` becomes `name`, `IPv4`/`IPv6` become `ipv4_cidr`/`ipv6_cidr`
//! reduced to the prefix length after the last `/`, every entry is stamped
//! with the configured zone tag and a 1-based `id`, and all other columns
//! pass through unchanged.

use std::collections::BTreeMap;

use crate::config::CiqConfig;
use crate::error::SchemaError;
use crate::model::{NetworkEntry, SiteRecord};
use crate::reader::{RawRow, SiteTable};

const RENAMED_COLUMNS: [&str; 3] = ["vlan_name", "IPv4", "IPv6"];

/// Build one [`SiteRecord`] per distinct site identifier in the table.
///
/// Site identifiers are visited in first-seen row order, so output is
/// deterministic for a given input sheet. A row missing one of the renamed
/// source columns yields a [`SchemaError`]; the offending site is excluded
/// from the records and its errors are returned for reporting, while the
/// remaining sites are unaffected.
pub fn build_site_records(
    table: &SiteTable,
    config: &CiqConfig,
) -> (Vec<SiteRecord>, Vec<SchemaError>) {
    let mut records = Vec::new();
    let mut errors = Vec::new();

    for site_id in table.site_ids() {
        let rows: Vec<(usize, &RawRow)> = table
            .rows
            .iter()
            .enumerate()
            .filter(|(_, row)| row.site_id == site_id)
            .collect();

        let mut entries = Vec::with_capacity(rows.len());
        let mut site_errors = Vec::new();
        for (position, &(row_number, row)) in rows.iter().enumerate() {
            match build_network_entry(table, row, row_number + 1, position as u32 + 1, config) {
                Ok(entry) => entries.push(entry),
                Err(err) => site_errors.push(err),
            }
        }

        if site_errors.is_empty() {
            records.push(SiteRecord {
                adhoc_ipam: entries,
                ipam_environment: config.ipam_environment.clone(),
                site_id: site_id.to_string(),
            });
        } else {
            errors.extend(site_errors);
        }
    }

    (records, errors)
}

fn build_network_entry(
    table: &SiteTable,
    row: &RawRow,
    row_number: usize,
    id: u32,
    config: &CiqConfig,
) -> Result<NetworkEntry, SchemaError> {
    let name = required(table, row, "vlan_name", row_number)?;
    let ipv4 = required(table, row, "IPv4", row_number)?;
    let ipv6 = required(table, row, "IPv6", row_number)?;

    let mut fields = BTreeMap::new();
    for (column, value) in table.columns.iter().zip(&row.values) {
        if RENAMED_COLUMNS.contains(&column.as_str()) {
            continue;
        }
        fields.insert(column.clone(), value.clone());
    }

    Ok(NetworkEntry {
        fields,
        name: name.to_string(),
        ipv4_cidr: cidr_suffix(ipv4).to_string(),
        ipv6_cidr: cidr_suffix(ipv6).to_string(),
        ipam_zone: config.ipam_zone.clone(),
        id,
    })
}

fn required<'a>(
    table: &SiteTable,
    row: &'a RawRow,
    column: &'static str,
    row_number: usize,
) -> Result<&'a str, SchemaError> {
    table
        .column_index(column)
        .and_then(|idx| row.values.get(idx))
        .map(String::as_str)
        .ok_or_else(|| SchemaError::new(&row.site_id, row_number, column))
}

/// Substring after the last `/`; the value unchanged when it has none.
pub fn cidr_suffix(value: &str) -> &str {
    value.rsplit('/').next().unwrap_or(value)
}
