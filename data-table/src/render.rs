//! The rendered layout handed to the Renderer.
//!
//! A [`RenderedTable`] is rebuilt from scratch on every pass. It carries
//! everything needed to paint the table in order: which rows and cells to
//! show, where sub-rows and previews go, and which icons each cell exposes
//! together with the handler each icon runs.

use crate::augment::ChevronAction;
use crate::cell::{AlignItems, CellValue, JustifyContent};
use crate::error::Diagnostic;
use crate::handler::Handler;
use crate::tree::{NodeId, SubRowPosition};

/// Which part of the table a row belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowKind {
    Header,
    Body,
    SubRow,
    Footer,
}

/// Table layout variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TableVariant {
    /// Rows packed together.
    #[default]
    Tight,
    /// Rows separated by padding rows.
    Wide,
}

impl TableVariant {
    pub fn class(&self) -> &'static str {
        match self {
            TableVariant::Tight => "tight",
            TableVariant::Wide => "wide",
        }
    }
}

/// CSS-state flags of a body row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RowState {
    pub variant: TableVariant,
    pub with_preview: bool,
    pub preview_open: bool,
    pub with_sub_rows: bool,
    pub sub_rows_open: bool,
}

impl RowState {
    /// CSS classes for the row element.
    pub fn classes(&self) -> Vec<&'static str> {
        let mut classes = vec!["row", self.variant.class()];
        if self.with_preview {
            classes.push("with-preview");
        }
        classes.push(if self.preview_open {
            "preview-open"
        } else {
            "preview-hidden"
        });
        if self.with_sub_rows {
            classes.push("with-subrows");
        }
        classes.push(if self.with_sub_rows && self.sub_rows_open {
            "subrows-open"
        } else {
            "subrows-hidden"
        });
        classes
    }
}

/// A cell as found in the row data, before column ordering.
#[derive(Debug, Clone, PartialEq)]
pub struct CellObject {
    pub id: String,
    pub property: String,
    pub value: CellValue,
}

/// Built-in icon shown as a cell's content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IconKind {
    Alert,
    Chevron,
    /// Header cog.
    Settings,
    /// Body three-dots button.
    ThreeDots,
}

/// What a cell displays.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellContent {
    /// The cell value.
    Value,
    /// A built-in icon.
    Icon(IconKind),
    /// Host-provided content, in a slot named by the cell ID.
    CustomSlot,
}

/// An interaction a rendered cell offers.
///
/// Each variant carries the handler it runs. `None` handlers mean the
/// built-in behavior (copy to clipboard, local sort) or nothing at all.
#[derive(Debug, Clone)]
pub enum Affordance {
    /// Copy icon. Without a handler, the value goes to the clipboard.
    Copy {
        with_property: bool,
        handler: Option<Handler>,
    },
    /// Sort icon. Without a handler, rows are sorted locally.
    Sort { handler: Option<Handler> },
    /// Drag handle.
    Drag { handler: Option<Handler> },
    Alert { handler: Option<Handler> },
    Chevron { open: bool, action: ChevronAction },
    Settings { handler: Option<Handler> },
    ThreeDots { handler: Option<Handler> },
}

impl Affordance {
    pub fn name(&self) -> &'static str {
        match self {
            Affordance::Copy { .. } => "copy",
            Affordance::Sort { .. } => "sort",
            Affordance::Drag { .. } => "drag",
            Affordance::Alert { .. } => "alert",
            Affordance::Chevron { .. } => "chevron",
            Affordance::Settings { .. } => "settings",
            Affordance::ThreeDots { .. } => "three-dots",
        }
    }
}

/// A cell ready to paint.
#[derive(Debug, Clone)]
pub struct RenderedCell {
    pub id: String,
    pub property: String,
    pub value: CellValue,
    pub content: CellContent,
    /// The cell occupies its column slot but shows nothing.
    pub hidden: bool,
    pub justify_content: JustifyContent,
    pub align_items: AlignItems,
    pub wraps: bool,
    pub in_header_row: bool,
    pub in_sub_row: bool,
    pub in_footer_row: bool,
    pub affordances: Vec<Affordance>,
    /// ID of the owning row.
    pub parent_id: String,
}

impl RenderedCell {
    /// Find an affordance by predicate.
    pub fn affordance(&self, pred: impl Fn(&Affordance) -> bool) -> Option<&Affordance> {
        self.affordances.iter().find(|a| pred(a))
    }

    pub fn is_copiable(&self) -> bool {
        self.affordance(|a| matches!(a, Affordance::Copy { .. })).is_some()
    }

    pub fn is_sortable(&self) -> bool {
        self.affordance(|a| matches!(a, Affordance::Sort { .. })).is_some()
    }
}

/// A sub-row below its parent.
#[derive(Debug, Clone)]
pub struct RenderedSubRow {
    pub parent_id: String,
    pub position: SubRowPosition,
    pub visible: bool,
    pub row: RenderedRow,
}

/// A preview slot below its parent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedPreview {
    /// Slot name.
    pub id: String,
    pub parent_id: String,
    pub visible: bool,
    pub position: SubRowPosition,
}

impl RenderedPreview {
    /// Element ID of the preview row.
    pub fn element_id(&self) -> String {
        format!("{}-row", self.id)
    }
}

/// A row ready to paint.
#[derive(Debug, Clone)]
pub struct RenderedRow {
    pub id: String,
    pub kind: RowKind,
    /// Source row in the table's tree (`None` for header and footer).
    pub node: Option<NodeId>,
    /// Visible-column cells in display order.
    pub cells: Vec<RenderedCell>,
    /// Cells of hidden columns, kept for lookup.
    pub hidden_cells: Vec<RenderedCell>,
    /// Data cells in the row's own insertion order.
    pub cell_objects: Vec<CellObject>,
    pub has_sub_rows: bool,
    pub has_preview: bool,
    pub sub_rows: Vec<RenderedSubRow>,
    pub preview: Option<RenderedPreview>,
    pub state: RowState,
    /// The row renders as a single host slot named by its ID.
    pub custom_content: bool,
}

impl RenderedRow {
    pub(crate) fn new(id: impl Into<String>, kind: RowKind, node: Option<NodeId>) -> Self {
        Self {
            id: id.into(),
            kind,
            node,
            cells: Vec::new(),
            hidden_cells: Vec::new(),
            cell_objects: Vec::new(),
            has_sub_rows: false,
            has_preview: false,
            sub_rows: Vec::new(),
            preview: None,
            state: RowState::default(),
            custom_content: false,
        }
    }

    /// Find a cell of this row (visible or in a hidden column).
    pub fn cell(&self, cell_id: &str) -> Option<&RenderedCell> {
        self.cells
            .iter()
            .chain(self.hidden_cells.iter())
            .find(|c| c.id == cell_id)
    }

    /// Find a cell of this row by column property.
    pub fn cell_by_property(&self, property: &str) -> Option<&RenderedCell> {
        self.cells
            .iter()
            .chain(self.hidden_cells.iter())
            .find(|c| c.property == property)
    }

    /// Properties of the visible cells, in display order.
    pub fn properties(&self) -> Vec<&str> {
        self.cells.iter().map(|c| c.property.as_str()).collect()
    }

    fn collect<'a>(&'a self, out: &mut Vec<&'a RenderedRow>) {
        out.push(self);
        for sub in &self.sub_rows {
            sub.row.collect(out);
        }
    }
}

/// The complete layout of a table.
#[derive(Debug, Clone)]
pub struct RenderedTable {
    pub table_id: String,
    pub header: Option<RenderedRow>,
    /// Body rows in render order.
    pub rows: Vec<RenderedRow>,
    pub footer: Option<RenderedRow>,
    /// Visible columns in display order.
    pub columns: Vec<String>,
    pub variant: TableVariant,
    /// Inline CSS for every row.
    pub row_style: String,
    /// Inline CSS for every cell container.
    pub column_style: String,
    pub diagnostic: Option<Diagnostic>,
}

impl RenderedTable {
    /// Whether there are no body rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// IDs of the body rows in render order.
    pub fn row_ids(&self) -> Vec<&str> {
        self.rows.iter().map(|r| r.id.as_str()).collect()
    }

    /// Every row in document order: header, body rows each followed by
    /// their sub-rows, footer.
    pub fn all_rows(&self) -> Vec<&RenderedRow> {
        let mut out = Vec::new();
        if let Some(header) = &self.header {
            out.push(header);
        }
        for row in &self.rows {
            row.collect(&mut out);
        }
        if let Some(footer) = &self.footer {
            out.push(footer);
        }
        out
    }

    /// Every cell in document order, hidden columns included.
    pub fn cells(&self) -> Vec<&RenderedCell> {
        self.all_rows()
            .into_iter()
            .flat_map(|r| r.cells.iter().chain(r.hidden_cells.iter()))
            .collect()
    }

    /// Find a cell and its row by cell ID.
    pub fn find_cell(&self, cell_id: &str) -> Option<(&RenderedRow, &RenderedCell)> {
        self.all_rows()
            .into_iter()
            .find_map(|r| r.cell(cell_id).map(|c| (r, c)))
    }

    /// Find a body or sub-row by ID.
    pub fn find_row(&self, row_id: &str) -> Option<&RenderedRow> {
        self.all_rows().into_iter().find(|r| r.id == row_id)
    }
}
