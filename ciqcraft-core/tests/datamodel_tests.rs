//! End-to-end tests driving sheet cleanup and datamodel building on
//! in-memory ranges, the same shape calamine hands back from a workbook.

use calamine::{Data, Range};
use ciqcraft_core::reader::clean_sheet;
use ciqcraft_core::{CiqConfig, CiqParser, FileFormatError, build_site_records};
use std::fs::File;
use std::io::Write;
use std::path::Path;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

fn range_from(rows: &[&[&str]]) -> Range<Data> {
    let max_cols = rows.iter().map(|r| r.len()).max().unwrap_or(1);
    let mut range = Range::new((0, 0), (rows.len() as u32 - 1, max_cols as u32 - 1));
    for (r, row) in rows.iter().enumerate() {
        for (c, cell) in row.iter().enumerate() {
            if !cell.is_empty() {
                range.set_value((r as u32, c as u32), Data::String(cell.to_string()));
            }
        }
    }
    range
}

/// A sheet resembling a real addressing tab: a merged identifier cell
/// (blank in row 3), an unnamed export column, and an all-empty row.
fn addressing_sheet() -> Range<Data> {
    let mut range = range_from(&[
        &[
            "site_id", "vlan_id", "vlan_name", "IPv4", "IPv6", "vrf", "dhcp", "ipam_use",
            "Unnamed: 8",
        ],
        &[
            "SITE-A",
            "100",
            "mgmt",
            "10.0.0.0/24",
            "2001:db8::/64",
            "CORE",
            "",
            "oam",
            "x",
        ],
        &[
            "",
            "101",
            "sync",
            "10.0.1.0/25",
            "2001:db8:1::/64",
            "CORE",
            "",
            "",
            "",
        ],
        &["", "", "", "", "", "", "", "", ""],
        &[
            "SITE-B",
            "200",
            "ran",
            "172.16.0.0/26",
            "2001:db8:2::/64",
            "RAN",
            "",
            "na",
            "",
        ],
    ]);
    range.set_value((1, 6), Data::Float(1.0));
    range.set_value((2, 6), Data::Float(0.0));
    range.set_value((4, 6), Data::Float(1.0));
    range
}

#[test]
fn test_merged_cell_round_trip() {
    let config = CiqConfig::default();
    let table = clean_sheet("LIT SITE IP ADDRESSING", &addressing_sheet(), &config);

    // The all-empty row never reaches the builder
    assert_eq!(table.rows.len(), 3);
    // The unnamed export column is gone
    assert!(!table.columns.iter().any(|c| c.contains("Unnamed")));

    let (records, errors) = build_site_records(&table, &config);
    assert!(errors.is_empty());
    assert_eq!(records.len(), 2);

    let site_a = &records[0];
    assert_eq!(site_a.site_id, "SITE-A");
    assert_eq!(site_a.ipam_environment, "INTEROP");
    assert_eq!(site_a.adhoc_ipam.len(), 2);

    // Row order and 1-based ids survive the grouping
    let first = &site_a.adhoc_ipam[0];
    let second = &site_a.adhoc_ipam[1];
    assert_eq!((first.id, first.name.as_str()), (1, "mgmt"));
    assert_eq!((second.id, second.name.as_str()), (2, "sync"));

    assert_eq!(first.ipv4_cidr, "24");
    assert_eq!(first.ipv6_cidr, "64");
    assert_eq!(first.ipam_zone, "INTERNAL");
    assert_eq!(first.fields.get("dhcp").map(String::as_str), Some("true"));
    assert_eq!(second.fields.get("dhcp").map(String::as_str), Some("false"));
    // The merged row inherited its identifier and its empty ipam_use cell
    // got the sentinel
    assert_eq!(second.fields.get("ipam_use").map(String::as_str), Some("na"));
}

#[test]
fn test_missing_required_column_is_reported() {
    let config = CiqConfig::default();
    let range = range_from(&[
        &["site_id", "vlan_id", "vlan_name", "IPv4"],
        &["SITE-A", "100", "mgmt", "10.0.0.0/24"],
    ]);
    let table = clean_sheet("DARK SITE IP ADDRESSING", &range, &config);

    let (records, errors) = build_site_records(&table, &config);
    assert!(records.is_empty());
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].column, "IPv6");
    assert!(errors[0].to_string().contains("IPv6"));
}

#[test]
fn test_cleanup_then_build_is_idempotent() {
    let config = CiqConfig::default();
    let table = clean_sheet("LIT SITE IP ADDRESSING", &addressing_sheet(), &config);
    assert_eq!(
        build_site_records(&table, &config),
        build_site_records(&table, &config)
    );
}

#[test]
fn test_record_json_shape() {
    let config = CiqConfig::default();
    let table = clean_sheet("LIT SITE IP ADDRESSING", &addressing_sheet(), &config);
    let (records, _) = build_site_records(&table, &config);

    let json = serde_json::to_value(&records).unwrap();
    let site_a = &json[0];
    assert_eq!(site_a["site_id"], "SITE-A");
    assert_eq!(site_a["ipam_environment"], "INTEROP");
    let entry = &site_a["adhoc_ipam"][0];
    assert_eq!(entry["name"], "mgmt");
    assert_eq!(entry["ipv4_cidr"], "24");
    assert_eq!(entry["vlan_id"], "100");
    assert!(entry.get("vlan_name").is_none());
    assert!(entry.get("IPv4").is_none());
}

// Helper to create a minimal valid XLSX file with empty sheets
fn write_mock_workbook(path: &Path, sheets: &[&str]) -> anyhow::Result<()> {
    let file = File::create(path)?;
    let mut zip = ZipWriter::new(file);
    let options = SimpleFileOptions::default().compression_method(zip::CompressionMethod::Stored);

    zip.start_file("[Content_Types].xml", options)?;
    let mut content_types = String::from(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
<Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>
<Default Extension="xml" ContentType="application/xml"/>
<Override PartName="/xl/workbook.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml"/>
"#,
    );
    for i in 0..sheets.len() {
        content_types.push_str(&format!(
            r#"<Override PartName="/xl/worksheets/sheet{}.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml"/>"#,
            i + 1
        ));
    }
    content_types.push_str("</Types>");
    zip.write_all(content_types.as_bytes())?;

    zip.start_file("_rels/.rels", options)?;
    zip.write_all(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
<Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="xl/workbook.xml"/>
</Relationships>"#.as_bytes())?;

    zip.start_file("xl/workbook.xml", options)?;
    let mut workbook_xml = String::from(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<workbook xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships">
<sheets>
"#,
    );
    for (i, name) in sheets.iter().enumerate() {
        workbook_xml.push_str(&format!(
            r#"<sheet name="{}" sheetId="{}" r:id="rId{}"/>"#,
            name,
            i + 1,
            i + 1
        ));
    }
    workbook_xml.push_str("</sheets></workbook>");
    zip.write_all(workbook_xml.as_bytes())?;

    zip.start_file("xl/_rels/workbook.xml.rels", options)?;
    let mut rels_xml = String::from(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
"#,
    );
    for i in 0..sheets.len() {
        rels_xml.push_str(&format!(
            r#"<Relationship Id="rId{}" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet{}.xml"/>"#,
            i + 1,
            i + 1
        ));
    }
    rels_xml.push_str("</Relationships>");
    zip.write_all(rels_xml.as_bytes())?;

    for i in 0..sheets.len() {
        zip.start_file(format!("xl/worksheets/sheet{}.xml", i + 1), options)?;
        zip.write_all(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main"><sheetData/></worksheet>"#
                .as_bytes(),
        )?;
    }

    zip.finish()?;
    Ok(())
}

#[test]
fn test_workbook_without_dark_sheet_is_missing_sheet_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("ciq.xlsx");
    write_mock_workbook(&path, &["LIT SITE IP ADDRESSING"]).unwrap();

    let err = CiqParser::new().parse_file(&path).unwrap_err();
    match err {
        FileFormatError::MissingSheet { sheet, .. } => {
            assert_eq!(sheet, "DARK SITE IP ADDRESSING");
        }
        other => panic!("expected MissingSheet, got {other}"),
    }
}

#[test]
fn test_workbook_with_both_sheets_parses() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("ciq.xlsx");
    write_mock_workbook(
        &path,
        &["LIT SITE IP ADDRESSING", "DARK SITE IP ADDRESSING"],
    )
    .unwrap();

    // Empty sheets clean to empty tables and build to empty record lists
    let models = CiqParser::new().parse_file(&path).unwrap();
    assert!(models.lit.is_empty());
    assert!(models.dark.is_empty());
    assert!(models.schema_errors.is_empty());
}

#[test]
fn test_garbage_workbook_fails_without_output() {
    let mut file = tempfile::Builder::new()
        .suffix(".xlsx")
        .tempfile()
        .unwrap();
    file.write_all(b"this is not a spreadsheet").unwrap();

    let parser = CiqParser::new();
    let err = parser.parse_file(file.path()).unwrap_err();
    assert!(matches!(err, FileFormatError::Open { .. }));
}
