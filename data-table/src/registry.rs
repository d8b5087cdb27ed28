//! Lookup from column property to the rendered cells of that column.

use indexmap::IndexMap;

use crate::render::RenderedTable;

/// Column ID used when a column has no header cell.
pub const COLUMN_ID_UNAVAILABLE: &str = "notAvailable";

/// The rendered cells of one column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnEntry {
    /// ID of the column's header cell, or [`COLUMN_ID_UNAVAILABLE`].
    pub column_id: String,
    /// Every rendered cell ID of the column, in document order.
    pub cell_ids: Vec<String>,
}

/// Column property → rendered cells, captured from one render pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnRegistry {
    /// Keyed by property, in order of first appearance.
    columns: IndexMap<String, ColumnEntry>,
}

impl ColumnRegistry {
    /// Scan every cell of a rendered table: header, body rows with their
    /// sub-rows, footer; visible and hidden columns alike.
    pub fn build(table: &RenderedTable) -> Self {
        let mut registry = Self::default();
        for cell in table.cells() {
            let entry = registry
                .columns
                .entry(cell.property.clone())
                .or_insert_with(|| ColumnEntry {
                    column_id: COLUMN_ID_UNAVAILABLE.to_string(),
                    cell_ids: Vec::new(),
                });
            entry.cell_ids.push(cell.id.clone());
            if cell.in_header_row {
                entry.column_id = cell.id.clone();
            }
        }
        log::debug!("Column registry built with {} columns", registry.len());
        registry
    }

    pub fn get(&self, property: &str) -> Option<&ColumnEntry> {
        self.columns.get(property)
    }

    /// Column ID of a property.
    pub fn column_id(&self, property: &str) -> Option<&str> {
        self.get(property).map(|e| e.column_id.as_str())
    }

    /// Properties in order of first appearance.
    pub fn properties(&self) -> Vec<&str> {
        self.columns.keys().map(String::as_str).collect()
    }

    /// Iterate entries in order of first appearance.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ColumnEntry)> {
        self.columns.iter().map(|(p, e)| (p.as_str(), e))
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}
