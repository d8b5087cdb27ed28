//! Cell entries and the insertion-ordered cell map of a row.

use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};

use crate::handler::Handler;

/// The value held by a cell.
///
/// Values are deserialized untagged, so plain JSON scalars map directly:
/// `null`, `true`, `42`, `"text"`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    /// No value.
    #[default]
    Null,
    /// Boolean value.
    Bool(bool),
    /// Numeric value.
    Number(f64),
    /// Text value.
    Text(String),
}

impl CellValue {
    /// Returns `true` if this is a null value.
    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }

    /// Returns the type name of this value.
    pub fn type_name(&self) -> &'static str {
        match self {
            CellValue::Null => "null",
            CellValue::Bool(_) => "bool",
            CellValue::Number(_) => "number",
            CellValue::Text(_) => "text",
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Null => Ok(()),
            CellValue::Bool(v) => write!(f, "{}", v),
            // Integral numbers print without a trailing ".0"
            CellValue::Number(v) if v.is_finite() && v.fract() == 0.0 && v.abs() < 1e15 => {
                write!(f, "{}", *v as i64)
            }
            CellValue::Number(v) => write!(f, "{}", v),
            CellValue::Text(v) => f.write_str(v),
        }
    }
}

impl From<bool> for CellValue {
    fn from(v: bool) -> Self {
        CellValue::Bool(v)
    }
}

impl From<i32> for CellValue {
    fn from(v: i32) -> Self {
        CellValue::Number(v.into())
    }
}

impl From<i64> for CellValue {
    fn from(v: i64) -> Self {
        CellValue::Number(v as f64)
    }
}

impl From<f64> for CellValue {
    fn from(v: f64) -> Self {
        CellValue::Number(v)
    }
}

impl From<String> for CellValue {
    fn from(v: String) -> Self {
        CellValue::Text(v)
    }
}

impl From<&str> for CellValue {
    fn from(v: &str) -> Self {
        CellValue::Text(v.to_string())
    }
}

impl<T: Into<CellValue>> From<Option<T>> for CellValue {
    fn from(v: Option<T>) -> Self {
        match v {
            Some(inner) => inner.into(),
            None => CellValue::Null,
        }
    }
}

/// Horizontal placement of cell content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum JustifyContent {
    Center,
    #[default]
    FlexStart,
    FlexEnd,
    SpaceBetween,
    SpaceAround,
    SpaceEvenly,
}

impl JustifyContent {
    /// CSS keyword for this value.
    pub fn as_css(&self) -> &'static str {
        match self {
            JustifyContent::Center => "center",
            JustifyContent::FlexStart => "flex-start",
            JustifyContent::FlexEnd => "flex-end",
            JustifyContent::SpaceBetween => "space-between",
            JustifyContent::SpaceAround => "space-around",
            JustifyContent::SpaceEvenly => "space-evenly",
        }
    }
}

/// Vertical placement of cell content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AlignItems {
    Auto,
    FlexStart,
    FlexEnd,
    #[default]
    Center,
    Stretch,
    Baseline,
}

impl AlignItems {
    /// CSS keyword for this value.
    pub fn as_css(&self) -> &'static str {
        match self {
            AlignItems::Auto => "auto",
            AlignItems::FlexStart => "flex-start",
            AlignItems::FlexEnd => "flex-end",
            AlignItems::Center => "center",
            AlignItems::Stretch => "stretch",
            AlignItems::Baseline => "baseline",
        }
    }
}

/// A single cell as supplied by the host.
///
/// `property` names the column the cell belongs to and must be unique within
/// its row. `id` must be unique within the table; an empty `id` is replaced
/// by a generated one when the cell enters a table.
///
/// Flags documented as "inferred" are set by the table while rendering and
/// normally left at their defaults by callers.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CellEntry {
    /// Column key.
    pub property: String,
    /// Value used for display, sorting and copying.
    pub value: CellValue,
    /// Unique cell identifier.
    pub id: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub justify_content: Option<JustifyContent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub align_items: Option<AlignItems>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub does_wrap: Option<bool>,

    /// Shows a copy icon.
    pub is_copiable: bool,
    /// Copy output is `property - value` instead of `value`.
    pub is_property_in_copy_output: bool,
    /// Hides the cell content. Unset means the table decides.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_hidden: Option<bool>,
    /// Shows a drag handle.
    pub is_draggable: bool,
    /// Shows a sort icon (header cells only).
    #[serde(alias = "isSortable")]
    pub has_sort_icon: bool,

    /// Inferred: the cell is rendered in the header row.
    pub is_in_header_row: bool,
    /// Inferred: the cell is rendered in a sub-row.
    pub is_in_subrow: bool,
    /// Inferred: the cell is rendered in the footer row.
    pub is_in_footer_row: bool,
    /// Settings cog (header) or three-dots button (body).
    pub is_settings_cell: bool,
    /// Alert button.
    pub is_alert_cell: bool,
    /// Sub-row chevron.
    pub is_chevron_cell: bool,
    /// Inferred: ID of the owning row.
    #[serde(rename = "parentID", skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,

    #[serde(skip)]
    pub has_custom_settings_cell_content: bool,
    #[serde(skip)]
    pub has_custom_three_dots_cell_content: bool,
    #[serde(skip)]
    pub has_custom_alert_cell_content: bool,

    /// Replaces the built-in clipboard copy.
    #[serde(skip)]
    pub on_copy_click: Option<Handler>,
    #[serde(skip)]
    pub on_alert_click: Option<Handler>,
    #[serde(skip)]
    pub on_three_dots_click: Option<Handler>,
    #[serde(skip)]
    pub on_chevron_click: Option<Handler>,
    /// Replaces the built-in row sort (header cells only).
    #[serde(skip)]
    pub on_sort_click: Option<Handler>,
    /// Drag handle interaction (header cells only).
    #[serde(skip)]
    pub on_rearrange_click: Option<Handler>,
}

impl CellEntry {
    /// Create a cell for a column with a value.
    pub fn new(property: impl Into<String>, value: impl Into<CellValue>) -> Self {
        Self {
            property: property.into(),
            value: value.into(),
            ..Default::default()
        }
    }

    /// Set the cell ID.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    /// Show a copy icon.
    pub fn copiable(mut self) -> Self {
        self.is_copiable = true;
        self
    }

    /// Include the property in copy output.
    pub fn copy_with_property(mut self) -> Self {
        self.is_copiable = true;
        self.is_property_in_copy_output = true;
        self
    }

    /// Show a sort icon.
    pub fn sortable(mut self) -> Self {
        self.has_sort_icon = true;
        self
    }

    /// Show a drag handle.
    pub fn draggable(mut self) -> Self {
        self.is_draggable = true;
        self
    }

    /// Force the cell hidden or visible.
    pub fn hidden(mut self, hidden: bool) -> Self {
        self.is_hidden = Some(hidden);
        self
    }

    /// Mark as a caller-supplied alert cell.
    pub fn alert_cell(mut self) -> Self {
        self.is_alert_cell = true;
        self
    }

    /// Mark as a caller-supplied settings / three-dots cell.
    pub fn settings_cell(mut self) -> Self {
        self.is_settings_cell = true;
        self
    }

    pub fn justify(mut self, justify: JustifyContent) -> Self {
        self.justify_content = Some(justify);
        self
    }

    pub fn align(mut self, align: AlignItems) -> Self {
        self.align_items = Some(align);
        self
    }

    pub fn on_copy(mut self, handler: Handler) -> Self {
        self.on_copy_click = Some(handler);
        self
    }

    pub fn on_sort(mut self, handler: Handler) -> Self {
        self.on_sort_click = Some(handler);
        self
    }

    pub fn on_rearrange(mut self, handler: Handler) -> Self {
        self.on_rearrange_click = Some(handler);
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
}

/// Insertion-ordered mapping from key to [`CellEntry`].
///
/// Iteration follows insertion order, which is also the order cells appear
/// in when no column order is known. Deserializing from a JSON object keeps
/// the document order of its keys. A cell with an empty `property` takes its
/// key as property.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct Cells {
    entries: IndexMap<String, CellEntry>,
}

impl Cells {
    /// Create an empty cell map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of cells.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if there are no cells.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Get a cell by key.
    pub fn get(&self, key: &str) -> Option<&CellEntry> {
        self.entries.get(key)
    }

    /// Get a mutable cell by key.
    pub fn get_mut(&mut self, key: &str) -> Option<&mut CellEntry> {
        self.entries.get_mut(key)
    }

    /// Check if a key is present.
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Find the cell whose `property` matches, regardless of its key.
    pub fn by_property(&self, property: &str) -> Option<&CellEntry> {
        self.entries.values().find(|c| c.property == property)
    }

    /// Insert a cell under `key`.
    ///
    /// An existing cell under the same key is replaced in place (its position
    /// is kept) and returned.
    pub fn insert(&mut self, key: impl Into<String>, cell: CellEntry) -> Option<CellEntry> {
        self.entries.insert(key.into(), cell)
    }

    /// Insert a cell keyed by its own property.
    pub fn push(&mut self, cell: CellEntry) -> Option<CellEntry> {
        let key = cell.property.clone();
        self.insert(key, cell)
    }

    /// Remove a cell by key, keeping the order of the others.
    pub fn remove(&mut self, key: &str) -> Option<CellEntry> {
        self.entries.shift_remove(key)
    }

    /// Iterate `(key, cell)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &CellEntry)> {
        self.entries.iter().map(|(k, c)| (k.as_str(), c))
    }

    /// Iterate cells mutably in insertion order.
    pub fn values_mut(&mut self) -> impl Iterator<Item = &mut CellEntry> {
        self.entries.values_mut()
    }

    /// Iterate cells in insertion order.
    pub fn values(&self) -> impl Iterator<Item = &CellEntry> {
        self.entries.values()
    }
}

impl FromIterator<CellEntry> for Cells {
    fn from_iter<I: IntoIterator<Item = CellEntry>>(iter: I) -> Self {
        let mut cells = Cells::new();
        for cell in iter {
            cells.push(cell);
        }
        cells
    }
}

impl<'de> Deserialize<'de> for Cells {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let mut entries = IndexMap::<String, CellEntry>::deserialize(deserializer)?;
        for (key, cell) in entries.iter_mut() {
            if cell.property.is_empty() {
                cell.property = key.clone();
            }
        }
        Ok(Self { entries })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cells_keep_document_order() {
        let json = r#"{
            "zeta": {"property": "zeta", "value": 1, "id": "c1"},
            "alpha": {"property": "alpha", "value": "a", "id": "c2"},
            "mid": {"value": true, "id": "c3"}
        }"#;
        let cells: Cells = serde_json::from_str(json).unwrap();

        let keys: Vec<_> = cells.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["zeta", "alpha", "mid"]);
        // Missing property falls back to the key
        assert_eq!(cells.get("mid").unwrap().property, "mid");
        assert_eq!(cells.get("zeta").unwrap().value, CellValue::Number(1.0));
    }

    #[test]
    fn test_insert_replaces_in_place() {
        let mut cells: Cells = vec![CellEntry::new("a", 1), CellEntry::new("b", 2)]
            .into_iter()
            .collect();

        let previous = cells.insert("a", CellEntry::new("a", 10));
        assert_eq!(previous.unwrap().value, CellValue::from(1));

        let values: Vec<_> = cells.values().map(|c| c.value.to_string()).collect();
        assert_eq!(values, vec!["10", "2"]);
    }

    #[test]
    fn test_remove_keeps_order_of_the_rest() {
        let mut cells: Cells = vec![
            CellEntry::new("a", 1),
            CellEntry::new("b", 2),
            CellEntry::new("c", 3),
        ]
        .into_iter()
        .collect();

        assert!(cells.remove("a").is_some());
        assert!(cells.remove("a").is_none());
        let keys: Vec<_> = cells.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["b", "c"]);

        let json = serde_json::to_string(&cells).unwrap();
        assert!(json.find("\"b\"").unwrap() < json.find("\"c\"").unwrap());
    }

    #[test]
    fn test_value_display() {
        assert_eq!(CellValue::from(30).to_string(), "30");
        assert_eq!(CellValue::from(2.5).to_string(), "2.5");
        assert_eq!(CellValue::from("Ann").to_string(), "Ann");
        assert_eq!(CellValue::Null.to_string(), "");
        assert_eq!(CellValue::from(None::<i32>), CellValue::Null);
    }

    #[test]
    fn test_sortable_alias() {
        let cell: CellEntry =
            serde_json::from_str(r#"{"property": "age", "value": "Age", "isSortable": true}"#)
                .unwrap();
        assert!(cell.has_sort_icon);
    }
}
