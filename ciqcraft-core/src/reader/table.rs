//! Cleaned tabular structures produced by the sheet loader

/// One addressing sheet after cleanup, ready for the datamodel builder.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SiteTable {
    /// Sheet name the table was read from
    pub name: String,
    /// Headers of the kept data columns, in sheet order
    pub columns: Vec<String>,
    /// Cleaned rows, in sheet order
    pub rows: Vec<RawRow>,
}

/// One cleaned spreadsheet row. `values` is parallel to the owning table's
/// `columns`; empty cells already carry the configured sentinel.
#[derive(Debug, Clone, PartialEq)]
pub struct RawRow {
    /// Owning site identifier, forward-filled across merged cells
    pub site_id: String,
    pub values: Vec<String>,
}

impl SiteTable {
    /// Position of a data column by header name
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Distinct site identifiers in first-seen row order
    pub fn site_ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = Vec::new();
        for row in &self.rows {
            if !ids.contains(&row.site_id.as_str()) {
                ids.push(row.site_id.as_str());
            }
        }
        ids
    }
}
