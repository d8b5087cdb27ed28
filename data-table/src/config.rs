//! Table configuration and input loading.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::cell::{AlignItems, JustifyContent};
use crate::error::LoadError;
use crate::handler::{Handler, TableHandlers};
use crate::row::Row;

/// Ordering arrays for one axis (rows or columns).
///
/// An empty `default_order` means "derive it from the data"; see
/// [`RenderOrder`](crate::RenderOrder).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OrderConf {
    pub default_order: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_order: Option<Vec<String>>,
    #[serde(rename = "hiddenIDs")]
    pub hidden_ids: Vec<String>,
}

/// Ordering arrays for both axes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderOrderConf {
    pub columns: OrderConf,
    pub rows: OrderConf,
}

// -----------------------------------------------------------------------------
// Styling
// -----------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TableStyle {
    /// Wide variant with padding rows between body rows.
    pub are_rows_separated: bool,
}

/// Horizontal text alignment of rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlignText {
    Center,
    End,
    Left,
    Right,
    Start,
}

impl AlignText {
    pub fn as_css(&self) -> &'static str {
        match self {
            AlignText::Center => "center",
            AlignText::End => "end",
            AlignText::Left => "left",
            AlignText::Right => "right",
            AlignText::Start => "start",
        }
    }
}

/// Vertical alignment of rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerticalAlign {
    Top,
    Middle,
    Bottom,
}

impl VerticalAlign {
    pub fn as_css(&self) -> &'static str {
        match self {
            VerticalAlign::Top => "top",
            VerticalAlign::Middle => "middle",
            VerticalAlign::Bottom => "bottom",
        }
    }
}

/// Style applied to every row.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RowStyle {
    /// CSS length, including its unit.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_height: Option<String>,
    /// CSS length, including its unit.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_height: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub align_text: Option<AlignText>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vertical_align: Option<VerticalAlign>,
}

impl RowStyle {
    /// Inline CSS for a row. Empty when nothing is set.
    pub fn to_css(&self) -> String {
        let mut rules = Vec::new();
        if let Some(min) = &self.min_height {
            rules.push(format!("min-height: {min}; height: {min};"));
        }
        if let Some(max) = &self.max_height {
            rules.push(format!("max-height: {max};"));
        }
        if let Some(align) = self.align_text {
            rules.push(format!("align-text: {};", align.as_css()));
        }
        if let Some(align) = self.vertical_align {
            rules.push(format!("vertical-align: {};", align.as_css()));
        }
        rules.join(" ")
    }
}

/// Style applied to every column.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ColumnStyle {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_width: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_width: Option<String>,
}

impl ColumnStyle {
    /// Inline CSS for a column. Empty when nothing is set.
    pub fn to_css(&self) -> String {
        let mut rules = Vec::new();
        if let Some(min) = &self.min_width {
            rules.push(format!("min-width: {min}; width: {min};"));
        }
        if let Some(max) = &self.max_width {
            rules.push(format!("max-width: {max};"));
        }
        rules.join(" ")
    }
}

/// Defaults for cells that do not set their own layout.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CellStyle {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub align_items: Option<AlignItems>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub justify_content: Option<JustifyContent>,
    pub wrap_content: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableStyling {
    pub table: TableStyle,
    pub rows: RowStyle,
    pub columns: ColumnStyle,
    pub cells: CellStyle,
}

// -----------------------------------------------------------------------------
// TableConf
// -----------------------------------------------------------------------------

/// Configuration of a table.
///
/// Build one in code with the builder methods, or load it from JSON with
/// [`TableConf::from_json`]. Handlers are never part of the JSON form.
///
/// # Example
///
/// ```
/// use data_table::{CellEntry, Row, TableConf};
///
/// let conf = TableConf::new()
///     .with_header(Row::new("header").cell(CellEntry::new("name", "Name").sortable()))
///     .has_settings(true)
///     .has_subrows(true);
///
/// assert!(conf.has_settings);
/// assert_eq!(conf.header_row.unwrap().id, "header");
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TableConf {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub header_row: Option<Row>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub footer_row: Option<Row>,

    /// Enables the settings / three-dots column.
    pub has_settings: bool,
    /// Enables the chevron column.
    pub has_subrows: bool,
    /// Enables the alert column.
    pub has_alerts: bool,
    /// Enables preview rows.
    pub has_preview: bool,

    /// The header row supplies its own settings cell.
    pub has_custom_settings_cell: bool,
    /// Body rows supply their own three-dots cell.
    pub has_custom_three_dots_cell: bool,
    /// Rows supply their own alert cell.
    pub has_custom_alert_cell: bool,

    pub render_order: RenderOrderConf,
    pub styling: TableStyling,

    #[serde(skip)]
    pub handlers: TableHandlers,
}

impl TableConf {
    /// Create an empty configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a configuration from JSON.
    pub fn from_json(json: &str) -> Result<Self, LoadError> {
        serde_json::from_str(json).map_err(LoadError::Conf)
    }

    /// Read and parse a configuration file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        Self::from_json(&read(path.as_ref())?)
    }

    pub fn with_header(mut self, row: Row) -> Self {
        self.header_row = Some(row);
        self
    }

    pub fn with_footer(mut self, row: Row) -> Self {
        self.footer_row = Some(row);
        self
    }

    pub fn has_settings(mut self, enabled: bool) -> Self {
        self.has_settings = enabled;
        self
    }

    pub fn has_subrows(mut self, enabled: bool) -> Self {
        self.has_subrows = enabled;
        self
    }

    pub fn has_alerts(mut self, enabled: bool) -> Self {
        self.has_alerts = enabled;
        self
    }

    pub fn has_preview(mut self, enabled: bool) -> Self {
        self.has_preview = enabled;
        self
    }

    pub fn custom_settings_cell(mut self) -> Self {
        self.has_custom_settings_cell = true;
        self
    }

    pub fn custom_three_dots_cell(mut self) -> Self {
        self.has_custom_three_dots_cell = true;
        self
    }

    pub fn custom_alert_cell(mut self) -> Self {
        self.has_custom_alert_cell = true;
        self
    }

    /// Caller-supplied default column order.
    pub fn column_order(mut self, ids: Vec<String>) -> Self {
        self.render_order.columns.default_order = ids;
        self
    }

    /// Caller-supplied default row order.
    pub fn row_order(mut self, ids: Vec<String>) -> Self {
        self.render_order.rows.default_order = ids;
        self
    }

    /// Columns hidden from the start.
    pub fn hidden_columns(mut self, ids: Vec<String>) -> Self {
        self.render_order.columns.hidden_ids = ids;
        self
    }

    /// Use the wide variant with separated rows.
    pub fn separated_rows(mut self) -> Self {
        self.styling.table.are_rows_separated = true;
        self
    }

    pub fn styling(mut self, styling: TableStyling) -> Self {
        self.styling = styling;
        self
    }

    pub fn on_settings(mut self, handler: Handler) -> Self {
        self.handlers.on_settings_click = Some(handler);
        self
    }

    pub fn on_alert(mut self, handler: Handler) -> Self {
        self.handlers.on_alert_click = Some(handler);
        self
    }

    pub fn on_three_dots(mut self, handler: Handler) -> Self {
        self.handlers.on_three_dots_click = Some(handler);
        self
    }

    pub fn on_chevron(mut self, handler: Handler) -> Self {
        self.handlers.on_chevron_click = Some(handler);
        self
    }

    pub fn pre_chevron(mut self, handler: Handler) -> Self {
        self.handlers.pre_chevron_click = Some(handler);
        self
    }
}

// -----------------------------------------------------------------------------
// Data loading
// -----------------------------------------------------------------------------

/// Parse a dataset (a JSON array of rows).
pub fn data_from_json(json: &str) -> Result<Vec<Row>, LoadError> {
    serde_json::from_str(json).map_err(LoadError::Data)
}

/// Read and parse a dataset file.
pub fn data_from_path(path: impl AsRef<Path>) -> Result<Vec<Row>, LoadError> {
    data_from_json(&read(path.as_ref())?)
}

fn read(path: &Path) -> Result<String, LoadError> {
    std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })
}
