//! Host callbacks attached to cells, rows and the table.

use std::fmt;
use std::sync::Arc;

use crate::table::Table;

/// Context handed to a [`Handler`] when the Renderer activates an icon.
///
/// The `table` handle shares state with the table that dispatched the
/// interaction, so a handler can drive it (e.g. toggle sub-rows itself when
/// the default chevron behavior is suppressed).
#[derive(Debug, Clone)]
pub struct HandlerContext {
    /// The table that dispatched the interaction.
    pub table: Table,
    /// ID of the activated cell.
    pub cell_id: String,
    /// Column property of the activated cell.
    pub property: String,
    /// ID of the row owning the cell.
    pub row_id: String,
}

/// A host callback.
///
/// Handlers are reference counted, so cloning a row or a configuration
/// shares the callback rather than duplicating it.
#[derive(Clone)]
pub struct Handler(Arc<dyn Fn(&HandlerContext) + Send + Sync>);

impl Handler {
    /// Wrap a closure as a handler.
    pub fn new(f: impl Fn(&HandlerContext) + Send + Sync + 'static) -> Self {
        Self(Arc::new(f))
    }

    /// Invoke the handler.
    pub fn call(&self, cx: &HandlerContext) {
        (self.0)(cx)
    }
}

impl fmt::Debug for Handler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Handler(..)")
    }
}

/// Table-wide default handlers.
///
/// Row-level handlers (see [`Row`](crate::Row)) take precedence over these
/// defaults, except for the chevron hooks: when either table-level chevron
/// hook is present it runs instead of the row hook and the built-in
/// sub-row toggle is suppressed.
#[derive(Debug, Clone, Default)]
pub struct TableHandlers {
    /// Header cog click.
    pub on_settings_click: Option<Handler>,
    /// Default alert click for body rows.
    pub on_alert_click: Option<Handler>,
    /// Default three-dots click for body rows.
    pub on_three_dots_click: Option<Handler>,
    /// Replaces the built-in chevron toggle.
    pub on_chevron_click: Option<Handler>,
    /// Runs before every chevron click.
    pub pre_chevron_click: Option<Handler>,
}

impl TableHandlers {
    /// Whether any table-level chevron hook is installed.
    pub fn has_chevron_hook(&self) -> bool {
        self.on_chevron_click.is_some() || self.pre_chevron_click.is_some()
    }
}
