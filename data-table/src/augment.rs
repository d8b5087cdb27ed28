//! Reserved trailing columns: alert, chevron and settings.
//!
//! Every row gets up to three extra cells, each gated by a table-level
//! toggle. They are rebuilt on every pass and always replace whatever was
//! injected before. Rows may supply their own alert or settings cell when the
//! table declares custom cells; such cells are pulled out of the row's data
//! columns and re-keyed to the reserved property.

use crate::cell::{AlignItems, CellEntry, CellValue, JustifyContent};
use crate::config::TableConf;
use crate::handler::{Handler, TableHandlers};
use crate::render::{Affordance, CellContent, IconKind, RowKind};
use crate::row::Row;
use crate::tree::NodeId;

pub const ALERT_COLUMN: &str = "data-table-alerts";
pub const CHEVRON_COLUMN: &str = "data-table-chevron";
pub const SETTINGS_COLUMN: &str = "data-table-settings";

/// Reserved column keys, in display order.
pub const RESERVED_COLUMNS: [&str; 3] = [ALERT_COLUMN, CHEVRON_COLUMN, SETTINGS_COLUMN];

/// Check if a column key is reserved for injected cells.
pub fn is_reserved(property: &str) -> bool {
    RESERVED_COLUMNS.contains(&property)
}

/// Reserved columns enabled by a configuration, in display order.
pub fn enabled_columns(conf: &TableConf) -> Vec<&'static str> {
    let mut columns = Vec::with_capacity(3);
    if conf.has_alerts {
        columns.push(ALERT_COLUMN);
    }
    if conf.has_subrows {
        columns.push(CHEVRON_COLUMN);
    }
    if conf.has_settings {
        columns.push(SETTINGS_COLUMN);
    }
    columns
}

/// What a chevron click does.
///
/// Runs `pre`, then the built-in toggle (if `default_toggle`), then `on`.
#[derive(Debug, Clone)]
pub struct ChevronAction {
    /// Row whose sub-rows the toggle opens or closes.
    pub target: NodeId,
    pub pre: Option<Handler>,
    pub on: Option<Handler>,
    /// Flip `are_sub_rows_open` on the target and re-render.
    pub default_toggle: bool,
}

impl ChevronAction {
    /// Resolve the hooks of a row's chevron.
    ///
    /// Table-level hooks win over row-level ones. The built-in toggle only
    /// runs when the table has no chevron hook of its own.
    pub fn resolve(handlers: &TableHandlers, row: &Row, target: NodeId) -> Self {
        Self {
            target,
            pre: handlers
                .pre_chevron_click
                .clone()
                .or_else(|| row.pre_chevron_click.clone()),
            on: handlers
                .on_chevron_click
                .clone()
                .or_else(|| row.on_chevron_click.clone()),
            default_toggle: !handlers.has_chevron_hook(),
        }
    }
}

/// Caller-supplied reserved cells found in a row.
#[derive(Debug, Clone, Default)]
pub struct CustomCells {
    pub alert: Option<CellEntry>,
    pub settings: Option<CellEntry>,
    /// Keys the cells had in the row; they are not data columns.
    keys: Vec<String>,
}

impl CustomCells {
    /// Whether a row cell was taken as a custom reserved cell.
    pub fn is_extracted(&self, key: &str) -> bool {
        self.keys.iter().any(|k| k == key)
    }
}

/// Pull custom alert and settings cells out of a row.
///
/// Alert cells are taken when the table declares custom alert cells.
/// Settings cells are taken from the header when it declares a custom
/// settings cell, and from body rows when it declares custom three-dots
/// cells.
pub fn extract_custom_cells(row: &Row, kind: RowKind, conf: &TableConf) -> CustomCells {
    let mut custom = CustomCells::default();
    if kind == RowKind::Footer {
        return custom;
    }
    let take_settings = match kind {
        RowKind::Header => conf.has_custom_settings_cell,
        _ => conf.has_custom_three_dots_cell,
    };

    for (key, cell) in row.cells.iter() {
        if conf.has_custom_alert_cell && cell.is_alert_cell && custom.alert.is_none() {
            custom.alert = Some(cell.clone());
            custom.keys.push(key.to_string());
        } else if take_settings && cell.is_settings_cell && custom.settings.is_none() {
            custom.settings = Some(cell.clone());
            custom.keys.push(key.to_string());
        }
    }
    custom
}

/// A reserved cell to append to a row.
#[derive(Debug, Clone)]
pub struct InjectedCell {
    pub entry: CellEntry,
    pub content: CellContent,
    pub affordance: Option<Affordance>,
}

/// The row receiving injected cells.
#[derive(Debug, Clone, Copy)]
pub struct InjectTarget<'a> {
    pub row: &'a Row,
    pub kind: RowKind,
    /// Tree node of body and sub-rows.
    pub node: Option<NodeId>,
    pub has_sub_rows: bool,
}

/// Build the reserved cells of a row, in display order.
pub fn inject(target: InjectTarget<'_>, custom: CustomCells, conf: &TableConf) -> Vec<InjectedCell> {
    let mut cells = Vec::with_capacity(3);
    if target.kind == RowKind::Footer {
        for column in enabled_columns(conf) {
            cells.push(placeholder(target.row, column));
        }
        return cells;
    }

    if conf.has_alerts {
        cells.push(alert_cell(target, custom.alert, conf));
    }
    if conf.has_subrows {
        cells.push(chevron_cell(target, conf));
    }
    if conf.has_settings {
        cells.push(settings_cell(target, custom.settings, conf));
    }
    cells
}

fn reserved_entry(id: String, property: &str) -> CellEntry {
    CellEntry {
        id,
        property: property.to_string(),
        value: CellValue::Null,
        ..Default::default()
    }
}

fn injected_id(row: &Row, column: &str) -> String {
    let suffix = match column {
        ALERT_COLUMN => "alert",
        CHEVRON_COLUMN => "chevron",
        _ => "settings",
    };
    format!("{}-{}", row.id, suffix)
}

/// Hidden, inert cell keeping a reserved column aligned.
fn placeholder(row: &Row, column: &str) -> InjectedCell {
    let mut entry = reserved_entry(injected_id(row, column), column);
    entry.is_hidden = Some(true);
    InjectedCell {
        entry,
        content: CellContent::Value,
        affordance: None,
    }
}

/// Merge a caller-supplied cell over the reserved defaults.
fn merge_custom(custom: Option<CellEntry>, fallback_id: String, property: &str) -> CellEntry {
    let mut entry = custom.unwrap_or_else(|| reserved_entry(fallback_id, property));
    entry.property = property.to_string();
    entry.has_custom_alert_cell_content = false;
    entry.has_custom_settings_cell_content = false;
    entry.has_custom_three_dots_cell_content = false;
    entry
}

fn alert_cell(target: InjectTarget<'_>, custom: Option<CellEntry>, conf: &TableConf) -> InjectedCell {
    let row = target.row;
    if conf.has_custom_alert_cell {
        let mut entry = merge_custom(custom, injected_id(row, ALERT_COLUMN), ALERT_COLUMN);
        entry.has_custom_alert_cell_content = true;
        let affordance = entry
            .on_alert_click
            .clone()
            .map(|h| Affordance::Alert { handler: Some(h) });
        return InjectedCell {
            entry,
            content: CellContent::CustomSlot,
            affordance,
        };
    }

    let mut entry = reserved_entry(injected_id(row, ALERT_COLUMN), ALERT_COLUMN);
    entry.is_alert_cell = true;
    if target.kind == RowKind::Header {
        entry.is_hidden = Some(true);
        return InjectedCell {
            entry,
            content: CellContent::Icon(IconKind::Alert),
            affordance: None,
        };
    }

    entry.is_hidden = Some(row.has_alerts_to_show.is_none());
    let handler = row
        .on_alert_click
        .clone()
        .or_else(|| conf.handlers.on_alert_click.clone());
    InjectedCell {
        entry,
        content: CellContent::Icon(IconKind::Alert),
        affordance: Some(Affordance::Alert { handler }),
    }
}

fn chevron_cell(target: InjectTarget<'_>, conf: &TableConf) -> InjectedCell {
    let row = target.row;
    let mut entry = reserved_entry(injected_id(row, CHEVRON_COLUMN), CHEVRON_COLUMN);
    entry.is_chevron_cell = true;

    let node = match (target.kind, target.node) {
        (RowKind::Body | RowKind::SubRow, Some(node)) => node,
        _ => {
            entry.is_hidden = Some(true);
            return InjectedCell {
                entry,
                content: CellContent::Icon(IconKind::Chevron),
                affordance: None,
            };
        }
    };

    entry.is_hidden = Some(row.is_chevron_hidden.unwrap_or(!target.has_sub_rows));
    let action = ChevronAction::resolve(&conf.handlers, row, node);
    InjectedCell {
        entry,
        content: CellContent::Icon(IconKind::Chevron),
        affordance: Some(Affordance::Chevron {
            open: row.are_sub_rows_open,
            action,
        }),
    }
}

fn settings_cell(target: InjectTarget<'_>, custom: Option<CellEntry>, conf: &TableConf) -> InjectedCell {
    let row = target.row;
    let is_header = target.kind == RowKind::Header;

    if is_header && conf.has_custom_settings_cell {
        let mut entry = merge_custom(
            custom,
            format!("{}-table-settings", row.id),
            SETTINGS_COLUMN,
        );
        entry.has_custom_settings_cell_content = true;
        entry.is_in_header_row = true;
        let affordance = entry
            .on_three_dots_click
            .clone()
            .map(|h| Affordance::Settings { handler: Some(h) });
        return InjectedCell {
            entry,
            content: CellContent::CustomSlot,
            affordance,
        };
    }
    if !is_header && conf.has_custom_three_dots_cell {
        let mut entry = merge_custom(custom, injected_id(row, SETTINGS_COLUMN), SETTINGS_COLUMN);
        entry.has_custom_three_dots_cell_content = true;
        let affordance = entry
            .on_three_dots_click
            .clone()
            .map(|h| Affordance::ThreeDots { handler: Some(h) });
        return InjectedCell {
            entry,
            content: CellContent::CustomSlot,
            affordance,
        };
    }

    let mut entry = if is_header {
        let mut entry = reserved_entry(format!("{}-table-settings", row.id), SETTINGS_COLUMN);
        entry.is_in_header_row = true;
        entry
    } else {
        reserved_entry(injected_id(row, SETTINGS_COLUMN), SETTINGS_COLUMN)
    };
    entry.is_settings_cell = true;
    entry.justify_content = Some(JustifyContent::Center);
    entry.align_items = Some(AlignItems::Center);

    if is_header {
        InjectedCell {
            entry,
            content: CellContent::Icon(IconKind::Settings),
            affordance: Some(Affordance::Settings {
                handler: conf.handlers.on_settings_click.clone(),
            }),
        }
    } else {
        let handler = row
            .on_three_dots_click
            .clone()
            .or_else(|| conf.handlers.on_three_dots_click.clone());
        InjectedCell {
            entry,
            content: CellContent::Icon(IconKind::ThreeDots),
            affordance: Some(Affordance::ThreeDots { handler }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::RowTree;

    fn body(row: &Row, node: NodeId, has_sub_rows: bool) -> InjectTarget<'_> {
        InjectTarget {
            row,
            kind: RowKind::Body,
            node: Some(node),
            has_sub_rows,
        }
    }

    fn node_of(row: &Row) -> (RowTree, NodeId) {
        let tree = RowTree::from_rows(vec![row.clone()]);
        let node = tree.root(0).unwrap();
        (tree, node)
    }

    #[test]
    fn test_only_enabled_columns_are_injected() {
        let row = Row::new("r1");
        let (_tree, node) = node_of(&row);

        let conf = TableConf::new().has_settings(true);
        let cells = inject(body(&row, node, false), CustomCells::default(), &conf);
        assert_eq!(cells.len(), 1);
        assert_eq!(cells[0].entry.property, SETTINGS_COLUMN);
        assert_eq!(cells[0].entry.id, "r1-settings");

        let conf = TableConf::new().has_alerts(true).has_subrows(true).has_settings(true);
        let cells = inject(body(&row, node, false), CustomCells::default(), &conf);
        let properties: Vec<_> = cells.iter().map(|c| c.entry.property.as_str()).collect();
        assert_eq!(properties, RESERVED_COLUMNS.to_vec());
    }

    #[test]
    fn test_alert_visibility() {
        let conf = TableConf::new().has_alerts(true);

        let quiet = Row::new("r1");
        let (_tree, node) = node_of(&quiet);
        let cells = inject(body(&quiet, node, false), CustomCells::default(), &conf);
        assert_eq!(cells[0].entry.is_hidden, Some(true));

        let loud = Row::new("r2").alerts_to_show(true);
        let cells = inject(body(&loud, node, false), CustomCells::default(), &conf);
        assert_eq!(cells[0].entry.is_hidden, Some(false));

        // Any declared value shows the button, `false` included
        let declared = Row::new("r3").alerts_to_show(false);
        let cells = inject(body(&declared, node, false), CustomCells::default(), &conf);
        assert_eq!(cells[0].entry.is_hidden, Some(false));

        let header = InjectTarget {
            row: &loud,
            kind: RowKind::Header,
            node: None,
            has_sub_rows: false,
        };
        let cells = inject(header, CustomCells::default(), &conf);
        assert_eq!(cells[0].entry.is_hidden, Some(true));
    }

    #[test]
    fn test_chevron_hidden_without_sub_rows() {
        let conf = TableConf::new().has_subrows(true);
        let row = Row::new("r1");
        let (_tree, node) = node_of(&row);

        let cells = inject(body(&row, node, false), CustomCells::default(), &conf);
        assert_eq!(cells[0].entry.is_hidden, Some(true));

        let cells = inject(body(&row, node, true), CustomCells::default(), &conf);
        assert_eq!(cells[0].entry.is_hidden, Some(false));

        let mut forced = row.clone();
        forced.is_chevron_hidden = Some(true);
        let cells = inject(body(&forced, node, true), CustomCells::default(), &conf);
        assert_eq!(cells[0].entry.is_hidden, Some(true));
    }

    #[test]
    fn test_table_chevron_hook_disables_default_toggle() {
        let row = Row::new("r1").on_chevron(Handler::new(|_| {}));
        let (_tree, node) = node_of(&row);

        let action = ChevronAction::resolve(&TableHandlers::default(), &row, node);
        assert!(action.default_toggle);
        assert!(action.on.is_some());

        let handlers = TableHandlers {
            pre_chevron_click: Some(Handler::new(|_| {})),
            ..Default::default()
        };
        let action = ChevronAction::resolve(&handlers, &row, node);
        assert!(!action.default_toggle);
        assert!(action.pre.is_some());
    }

    #[test]
    fn test_custom_settings_cell_is_extracted() {
        let conf = TableConf::new().has_settings(true).custom_three_dots_cell();
        let row = Row::new("r1")
            .cell(CellEntry::new("name", "Bob"))
            .cell(CellEntry::new("menu", "...").with_id("menu-1").settings_cell());

        let custom = extract_custom_cells(&row, RowKind::Body, &conf);
        assert!(custom.is_extracted("menu"));
        assert!(!custom.is_extracted("name"));

        let (_tree, node) = node_of(&row);
        let cells = inject(body(&row, node, false), custom, &conf);
        let cell = &cells[0];
        assert_eq!(cell.entry.id, "menu-1");
        assert_eq!(cell.entry.property, SETTINGS_COLUMN);
        assert!(cell.entry.has_custom_three_dots_cell_content);
        assert_eq!(cell.content, CellContent::CustomSlot);
        assert!(cell.affordance.is_none());
    }

    #[test]
    fn test_header_cog() {
        let conf = TableConf::new().has_settings(true);
        let header = Row::new("head");
        let target = InjectTarget {
            row: &header,
            kind: RowKind::Header,
            node: None,
            has_sub_rows: false,
        };
        let cells = inject(target, CustomCells::default(), &conf);
        assert_eq!(cells[0].entry.id, "head-table-settings");
        assert_eq!(cells[0].entry.justify_content, Some(JustifyContent::Center));
        assert_eq!(cells[0].content, CellContent::Icon(IconKind::Settings));
    }

    #[test]
    fn test_footer_placeholders() {
        let conf = TableConf::new().has_alerts(true).has_settings(true);
        let footer = Row::new("foot");
        let target = InjectTarget {
            row: &footer,
            kind: RowKind::Footer,
            node: None,
            has_sub_rows: false,
        };
        let cells = inject(target, CustomCells::default(), &conf);
        assert_eq!(cells.len(), 2);
        assert!(cells.iter().all(|c| c.entry.is_hidden == Some(true)));
        assert!(cells.iter().all(|c| c.affordance.is_none()));
    }
}
