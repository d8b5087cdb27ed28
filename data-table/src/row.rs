//! Row data supplied by the host.

use serde::{Deserialize, Serialize};

use crate::cell::{CellEntry, Cells};
use crate::handler::Handler;

/// A preview slot attached below a row.
///
/// The preview content itself belongs to the host; the table only tracks
/// where it goes and whether it is shown.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PreviewRow {
    /// Slot identifier.
    pub id: String,
    /// ID of the owning row (inferred when empty).
    #[serde(rename = "parentID")]
    pub parent_id: String,
    /// Unset means hidden.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_hidden: Option<bool>,
}

impl PreviewRow {
    /// Create a hidden preview slot.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }

    /// Create a preview slot that starts visible.
    pub fn visible(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            is_hidden: Some(false),
            ..Default::default()
        }
    }

    /// Whether the preview is currently hidden.
    pub fn is_hidden(&self) -> bool {
        self.is_hidden.unwrap_or(true)
    }
}

/// A row of the table.
///
/// Rows nest: `sub_rows` holds rows of the same shape, shown below their
/// parent while `are_sub_rows_open` is set. The header and footer rows use
/// this type as well; their sub-rows and preview are ignored.
///
/// # Example
///
/// ```
/// use data_table::{CellEntry, Row};
///
/// let row = Row::new("r1")
///     .cell(CellEntry::new("name", "Bob"))
///     .cell(CellEntry::new("age", 30))
///     .sub_row(Row::new("r1-detail").cell(CellEntry::new("name", "Bob's detail")));
///
/// assert_eq!(row.cells.len(), 2);
/// assert_eq!(row.sub_rows.len(), 1);
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Row {
    /// Unique row identifier. Generated when empty.
    pub id: String,
    /// Cells keyed by column, in insertion order.
    pub cells: Cells,
    /// Excludes the row from rendering.
    pub is_hidden: bool,
    /// Nested rows.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub sub_rows: Vec<Row>,
    /// Whether sub-rows are expanded.
    pub are_sub_rows_open: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preview_row: Option<PreviewRow>,
    /// Shows the standard alert button when declared, whatever its value.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub has_alerts_to_show: Option<bool>,
    /// Overrides the derived chevron visibility.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_chevron_hidden: Option<bool>,
    /// Render as a single host slot instead of cells (sub-rows only).
    pub has_custom_subrow_content: bool,

    #[serde(skip)]
    pub on_alert_click: Option<Handler>,
    #[serde(skip)]
    pub on_three_dots_click: Option<Handler>,
    #[serde(skip)]
    pub pre_chevron_click: Option<Handler>,
    #[serde(skip)]
    pub on_chevron_click: Option<Handler>,
}

impl Row {
    /// Create an empty row with an ID.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }

    /// Append a cell keyed by its property.
    pub fn cell(mut self, cell: CellEntry) -> Self {
        self.cells.push(cell);
        self
    }

    /// Append a sub-row.
    pub fn sub_row(mut self, row: Row) -> Self {
        self.sub_rows.push(row);
        self
    }

    /// Start with sub-rows expanded.
    pub fn open(mut self) -> Self {
        self.are_sub_rows_open = true;
        self
    }

    /// Exclude the row from rendering.
    pub fn hidden(mut self) -> Self {
        self.is_hidden = true;
        self
    }

    /// Attach a preview slot.
    pub fn preview(mut self, preview: PreviewRow) -> Self {
        self.preview_row = Some(preview);
        self
    }

    /// Declare the alert button. Any declared value shows it.
    pub fn alerts_to_show(mut self, show: bool) -> Self {
        self.has_alerts_to_show = Some(show);
        self
    }

    /// Render the row as a host slot (sub-rows only).
    pub fn custom_content(mut self) -> Self {
        self.has_custom_subrow_content = true;
        self
    }

    pub fn on_alert(mut self, handler: Handler) -> Self {
        self.on_alert_click = Some(handler);
        self
    }

    pub fn on_three_dots(mut self, handler: Handler) -> Self {
        self.on_three_dots_click = Some(handler);
        self
    }

    pub fn pre_chevron(mut self, handler: Handler) -> Self {
        self.pre_chevron_click = Some(handler);
        self
    }

    pub fn on_chevron(mut self, handler: Handler) -> Self {
        self.on_chevron_click = Some(handler);
        self
    }

    /// Whether the row has at least one sub-row.
    pub fn has_sub_rows(&self) -> bool {
        !self.sub_rows.is_empty()
    }

    /// Value of the cell with the given property, if any.
    pub fn value_of(&self, property: &str) -> Option<&crate::CellValue> {
        self.cells.by_property(property).map(|c| &c.value)
    }
}
