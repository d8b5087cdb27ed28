//! The table handle and its host operations.

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, RwLock};

use crate::cell::{CellEntry, CellValue};
use crate::clipboard::Clipboard;
use crate::config::TableConf;
use crate::error::Diagnostic;
use crate::id::generate_id;
use crate::materialize::{self, materialize};
use crate::order::OrderTracker;
use crate::registry::ColumnRegistry;
use crate::render::RenderedTable;
use crate::row::Row;
use crate::sort::{self, SortMemory};
use crate::tree::{self, NodeId, RowTree};

/// What a host operation changed.
#[derive(Debug, Clone, PartialEq)]
pub enum TableChange {
    /// Nothing changed (unknown target).
    None,
    /// The dataset was replaced.
    DataReplaced,
    /// The configuration was replaced.
    ConfReplaced,
    /// The row order changed; `order` is the new base order.
    RowOrder { order: Vec<String> },
    /// The column order changed; `order` is the new visible order.
    ColumnOrder { order: Vec<String> },
    /// A column was hidden or shown.
    ColumnVisibility { column_id: String, hidden: bool },
    /// A row's sub-rows were opened or closed.
    SubRows { row_id: String, open: bool },
    /// A row's preview was opened or closed.
    Preview { row_id: String, open: bool },
    /// A cell received a new value.
    CellValue { cell_id: String, value: CellValue },
}

impl TableChange {
    /// Whether the operation changed anything.
    pub fn is_change(&self) -> bool {
        !matches!(self, TableChange::None)
    }
}

/// A host clipboard shared with the table.
#[derive(Clone)]
pub(crate) struct SharedClipboard(pub(crate) Arc<Mutex<dyn Clipboard>>);

impl fmt::Debug for SharedClipboard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SharedClipboard(..)")
    }
}

/// Internal state of a table.
#[derive(Debug)]
pub(crate) struct TableInner {
    pub tree: RowTree,
    pub conf: TableConf,
    pub orders: OrderTracker,
    pub sort_memory: SortMemory,
    /// Result of the last render pass.
    pub rendered: Option<RenderedTable>,
    pub registry: ColumnRegistry,
    /// Rebuild the registry on the next non-empty pass.
    pub registry_pending: bool,
    pub diagnostics: Vec<Diagnostic>,
    pub clipboard: Option<SharedClipboard>,
}

impl TableInner {
    fn new(data: Vec<Row>, conf: TableConf) -> Self {
        let mut inner = Self {
            tree: RowTree::from_rows(data),
            conf: TableConf::default(),
            orders: OrderTracker::default(),
            sort_memory: SortMemory::new(),
            rendered: None,
            registry: ColumnRegistry::default(),
            registry_pending: true,
            diagnostics: Vec::new(),
            clipboard: None,
        };
        inner.install_conf(conf);
        inner
    }

    fn install_conf(&mut self, mut conf: TableConf) {
        for row in [conf.header_row.as_mut(), conf.footer_row.as_mut()]
            .into_iter()
            .flatten()
        {
            tree::assign_ids(row);
        }
        self.orders = OrderTracker::from_conf(&conf.render_order);
        self.conf = conf;
    }

    pub(crate) fn diagnose(&mut self, diagnostic: Diagnostic) {
        log::warn!("{}", diagnostic);
        self.diagnostics.push(diagnostic);
    }

    fn root(&mut self, index: usize) -> Option<NodeId> {
        let root = self.tree.root(index);
        if root.is_none() {
            self.diagnose(Diagnostic::RowIndexOutOfRange { index });
        }
        root
    }

    /// Open or close a row's sub-rows. `None` flips the current state.
    pub(crate) fn set_sub_rows_open(&mut self, node: NodeId, forced: Option<bool>) -> TableChange {
        match self.tree.get_mut(node) {
            Some(row) => {
                row.are_sub_rows_open = forced.unwrap_or(!row.are_sub_rows_open);
                TableChange::SubRows {
                    row_id: row.id.clone(),
                    open: row.are_sub_rows_open,
                }
            }
            None => TableChange::None,
        }
    }

    fn find_cell_mut(&mut self, cell_id: &str) -> Option<&mut CellEntry> {
        if self.tree.find_cell(cell_id).is_some() {
            return self.tree.find_cell_mut(cell_id);
        }
        [self.conf.header_row.as_mut(), self.conf.footer_row.as_mut()]
            .into_iter()
            .flatten()
            .flat_map(|row| row.cells.values_mut())
            .find(|c| c.id == cell_id)
    }

    pub(crate) fn reorder_rows(&mut self, by_property: &str, inverted: bool) -> TableChange {
        let order = sort::sort_rows(&self.tree, &self.orders.rows, by_property, inverted);
        log::debug!("Sorted rows by '{}' (inverted: {})", by_property, inverted);
        self.orders.rows.set_custom_order(Some(order.clone()));
        TableChange::RowOrder { order }
    }

    /// Learn row IDs and column keys without a full pass, so order
    /// operations work before the first render.
    fn observe_orders(&mut self) {
        materialize::observe(&self.tree, &self.conf, &mut self.orders);
    }

    pub(crate) fn render(&mut self, table_id: &str) -> RenderedTable {
        let rendered = materialize(table_id, &self.tree, &self.conf, &mut self.orders);
        if self.registry_pending && !rendered.is_empty() {
            self.registry = ColumnRegistry::build(&rendered);
            self.registry_pending = false;
        }
        self.rendered = Some(rendered.clone());
        rendered
    }
}

/// A data table.
///
/// `Table` owns the rows, the configuration and the ordering state, and
/// produces a [`RenderedTable`] on demand. It is a cheap handle: clones share
/// the same state, which lets handlers capture the table they belong to.
///
/// # Example
///
/// ```
/// use data_table::{CellEntry, Row, Table, TableConf};
///
/// let table = Table::new(
///     vec![
///         Row::new("r1").cell(CellEntry::new("name", "Bob")),
///         Row::new("r2").cell(CellEntry::new("name", "Ann")),
///     ],
///     TableConf::new(),
/// );
///
/// table.reorder_rows("name", false);
/// assert_eq!(table.render().row_ids(), vec!["r2", "r1"]);
/// ```
#[derive(Debug)]
pub struct Table {
    /// Unique identifier.
    id: String,
    /// Internal state.
    pub(crate) inner: Arc<RwLock<TableInner>>,
    /// Dirty flag for re-render.
    pub(crate) dirty: Arc<AtomicBool>,
}

impl Table {
    /// Create a table with a generated ID.
    pub fn new(data: Vec<Row>, conf: TableConf) -> Self {
        Self::with_id(generate_id(), data, conf)
    }

    /// Create a table with a caller-supplied ID.
    pub fn with_id(id: impl Into<String>, data: Vec<Row>, conf: TableConf) -> Self {
        Self {
            id: id.into(),
            inner: Arc::new(RwLock::new(TableInner::new(data, conf))),
            dirty: Arc::new(AtomicBool::new(true)),
        }
    }

    /// Get the unique ID.
    pub fn id(&self) -> &str {
        &self.id
    }

    fn mutate(&self, f: impl FnOnce(&mut TableInner) -> TableChange) -> TableChange {
        match self.inner.write() {
            Ok(mut guard) => {
                let change = f(&mut guard);
                if change.is_change() {
                    self.dirty.store(true, Ordering::SeqCst);
                }
                change
            }
            Err(_) => {
                log::error!("Table {} state is poisoned", self.id);
                TableChange::None
            }
        }
    }

    // -------------------------------------------------------------------------
    // Inputs
    // -------------------------------------------------------------------------

    /// Replace the dataset.
    ///
    /// A derived row order is re-derived from the new rows and any custom
    /// row order is dropped. The column registry is rebuilt on the next pass.
    pub fn set_data(&self, data: Vec<Row>) -> TableChange {
        self.mutate(|inner| {
            inner.tree = RowTree::from_rows(data);
            inner.orders.rows.reset_derived();
            inner.rendered = None;
            inner.registry_pending = true;
            TableChange::DataReplaced
        })
    }

    /// Snapshot of the current rows, including state changed through the
    /// table (open sub-rows, previews, cell values, generated IDs).
    pub fn data(&self) -> Vec<Row> {
        self.inner
            .read()
            .map(|g| g.tree.to_rows())
            .unwrap_or_default()
    }

    /// Replace the configuration, including its render order.
    pub fn set_conf(&self, conf: TableConf) -> TableChange {
        self.mutate(|inner| {
            inner.install_conf(conf);
            TableChange::ConfReplaced
        })
    }

    /// The configuration, with the current render order written back.
    pub fn conf(&self) -> TableConf {
        self.inner
            .read()
            .map(|g| {
                let mut conf = g.conf.clone();
                conf.render_order = g.orders.to_conf();
                conf
            })
            .unwrap_or_default()
    }

    /// Install the clipboard used by copy icons without a handler.
    pub fn set_clipboard(&self, clipboard: impl Clipboard + 'static) {
        if let Ok(mut guard) = self.inner.write() {
            guard.clipboard = Some(SharedClipboard(Arc::new(Mutex::new(clipboard))));
        }
    }

    // -------------------------------------------------------------------------
    // Rendering
    // -------------------------------------------------------------------------

    /// Run a full render pass.
    pub fn render(&self) -> RenderedTable {
        match self.inner.write() {
            Ok(mut guard) => guard.render(&self.id),
            Err(_) => {
                log::error!("Table {} state is poisoned", self.id);
                RenderedTable {
                    table_id: self.id.clone(),
                    header: None,
                    rows: Vec::new(),
                    footer: None,
                    columns: Vec::new(),
                    variant: Default::default(),
                    row_style: String::new(),
                    column_style: String::new(),
                    diagnostic: None,
                }
            }
        }
    }

    /// Result of the last render pass (cleared when the dataset is replaced).
    pub fn rendered(&self) -> Option<RenderedTable> {
        self.inner.read().ok().and_then(|g| g.rendered.clone())
    }

    /// Cells per column, captured from the first render after construction
    /// or the last [`set_data`](Self::set_data).
    pub fn column_registry(&self) -> ColumnRegistry {
        self.inner
            .read()
            .map(|g| g.registry.clone())
            .unwrap_or_default()
    }

    // -------------------------------------------------------------------------
    // Ordering
    // -------------------------------------------------------------------------

    /// Sort top-level rows by a column's value.
    ///
    /// The result replaces the custom row order. Nulls come first; with
    /// `inverted` the whole result is reversed.
    pub fn reorder_rows(&self, by_property: &str, inverted: bool) -> TableChange {
        self.mutate(|inner| inner.reorder_rows(by_property, inverted))
    }

    /// Drop the custom row order, restoring the default order.
    pub fn reset_row_order(&self) -> TableChange {
        self.mutate(|inner| {
            inner.observe_orders();
            inner.orders.rows.set_custom_order(None);
            TableChange::RowOrder {
                order: inner.orders.rows.default_order().to_vec(),
            }
        })
    }

    /// Set a custom column order, or clear it with `None`.
    pub fn reorder_columns(&self, new_order: Option<Vec<String>>) -> TableChange {
        self.mutate(|inner| {
            inner.observe_orders();
            inner.orders.columns.set_custom_order(new_order);
            TableChange::ColumnOrder {
                order: materialize::visible_columns(&inner.conf, &inner.orders),
            }
        })
    }

    /// Hide or show a column, by property or header cell ID.
    pub fn toggle_column(&self, column_id: &str) -> TableChange {
        self.mutate(|inner| {
            let hidden = inner.orders.columns.toggle_hidden(column_id);
            log::debug!("Column '{}' hidden: {}", column_id, hidden);
            TableChange::ColumnVisibility {
                column_id: column_id.to_string(),
                hidden,
            }
        })
    }

    /// Current base row order (custom if set, else default).
    pub fn row_order(&self) -> Vec<String> {
        self.inner
            .read()
            .map(|g| g.orders.rows.base_order().to_vec())
            .unwrap_or_default()
    }

    /// Current visible column order.
    pub fn column_order(&self) -> Vec<String> {
        self.inner
            .read()
            .map(|g| materialize::visible_columns(&g.conf, &g.orders))
            .unwrap_or_default()
    }

    // -------------------------------------------------------------------------
    // Row state
    // -------------------------------------------------------------------------

    /// Open or close the sub-rows of the top-level row at `row_index`.
    ///
    /// `forced` sets the open state; `None` flips it.
    pub fn toggle_sub_rows(&self, row_index: usize, forced: Option<bool>) -> TableChange {
        self.mutate(|inner| match inner.root(row_index) {
            Some(node) => inner.set_sub_rows_open(node, forced),
            None => TableChange::None,
        })
    }

    /// Hide or show the preview of the top-level row at `row_index`.
    ///
    /// `forced` sets the hidden state; `None` flips it.
    pub fn toggle_preview(&self, row_index: usize, forced: Option<bool>) -> TableChange {
        self.mutate(|inner| {
            let Some(node) = inner.root(row_index) else {
                return TableChange::None;
            };
            let change = inner.tree.get_mut(node).and_then(|row| {
                let row_id = row.id.clone();
                row.preview_row.as_mut().map(|preview| {
                    let hidden = forced.unwrap_or(!preview.is_hidden());
                    preview.is_hidden = Some(hidden);
                    TableChange::Preview {
                        row_id,
                        open: !hidden,
                    }
                })
            });
            change.unwrap_or_else(|| {
                inner.diagnose(Diagnostic::NoPreview { index: row_index });
                TableChange::None
            })
        })
    }

    /// Set the value of a cell anywhere in the table.
    pub fn update_cell_value(&self, cell_id: &str, value: impl Into<CellValue>) -> TableChange {
        let value = value.into();
        self.mutate(|inner| match inner.find_cell_mut(cell_id) {
            Some(cell) => {
                cell.value = value.clone();
                TableChange::CellValue {
                    cell_id: cell_id.to_string(),
                    value,
                }
            }
            None => {
                inner.diagnose(Diagnostic::UnknownCell {
                    cell_id: cell_id.to_string(),
                });
                TableChange::None
            }
        })
    }

    // -------------------------------------------------------------------------
    // Diagnostics & dirty tracking
    // -------------------------------------------------------------------------

    /// Drain the diagnostics recorded since the last call.
    pub fn take_diagnostics(&self) -> Vec<Diagnostic> {
        self.inner
            .write()
            .map(|mut g| std::mem::take(&mut g.diagnostics))
            .unwrap_or_default()
    }

    /// Check if the table has changed since the flag was last cleared.
    pub fn is_dirty(&self) -> bool {
        self.dirty.load(Ordering::SeqCst)
    }

    /// Clear the dirty flag.
    pub fn clear_dirty(&self) {
        self.dirty.store(false, Ordering::SeqCst);
    }
}

impl Clone for Table {
    fn clone(&self) -> Self {
        Self {
            id: self.id.clone(),
            inner: Arc::clone(&self.inner),
            dirty: Arc::clone(&self.dirty),
        }
    }
}
