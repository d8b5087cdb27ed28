//! Data table reconciliation engine
//!
//! Keeps a table's rows, configuration and ordering state consistent and
//! turns them into an ordered layout of rows and cells for a renderer to
//! paint. Rows can be sorted, reordered, hidden and nested; columns can be
//! reordered and hidden; reserved alert, chevron and settings columns are
//! added on every pass.

pub mod augment;
pub mod cell;
pub mod clipboard;
pub mod config;
pub mod error;
pub mod handler;
pub mod materialize;
pub mod order;
pub mod registry;
pub mod render;
pub mod row;
pub mod sort;
pub mod tree;

mod id;
mod interact;
mod table;

pub use augment::{ALERT_COLUMN, CHEVRON_COLUMN, ChevronAction, RESERVED_COLUMNS, SETTINGS_COLUMN};
pub use cell::{AlignItems, CellEntry, CellValue, Cells, JustifyContent};
pub use clipboard::{Clipboard, ClipboardError, MemoryClipboard};
pub use config::{TableConf, data_from_json, data_from_path};
pub use error::{Diagnostic, LoadError};
pub use handler::{Handler, HandlerContext, TableHandlers};
pub use id::generate_id;
pub use interact::{EventResult, Icon};
pub use order::{OrderTracker, RenderOrder};
pub use registry::{COLUMN_ID_UNAVAILABLE, ColumnEntry, ColumnRegistry};
pub use render::{Affordance, RenderedCell, RenderedRow, RenderedTable, RowKind};
pub use row::{PreviewRow, Row};
pub use sort::Direction;
pub use table::{Table, TableChange};
pub use tree::{NodeId, RowTree, SubRowPosition};
