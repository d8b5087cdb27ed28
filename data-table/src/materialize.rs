//! Turns the row tree and configuration into a [`RenderedTable`].
//!
//! A pass runs in two steps. First the order tracker learns every row ID
//! and column key it has not seen, and the reserved columns are appended
//! behind the data columns. Then each row is built: its cells are rendered
//! in the row's own insertion order, the reserved cells are injected, and the
//! result is arranged by the column order. Sub-rows and previews are
//! attached below their parent, and body rows are finally arranged by the
//! row order.

use crate::augment::{self, CustomCells, InjectTarget, InjectedCell, RESERVED_COLUMNS};
use crate::cell::CellEntry;
use crate::config::TableConf;
use crate::error::Diagnostic;
use crate::order::OrderTracker;
use crate::render::{
    Affordance, CellContent, CellObject, RenderedCell, RenderedPreview, RenderedRow,
    RenderedSubRow, RenderedTable, RowKind, RowState, TableVariant,
};
use crate::row::Row;
use crate::tree::{NodeId, RowTree, SubRowPosition};

/// Run a full pass.
///
/// Header and footer rows are expected to carry IDs already (the table
/// assigns them when the configuration is installed).
pub fn materialize(
    table_id: &str,
    tree: &RowTree,
    conf: &TableConf,
    orders: &mut OrderTracker,
) -> RenderedTable {
    observe(tree, conf, orders);

    let variant = if conf.styling.table.are_rows_separated {
        TableVariant::Wide
    } else {
        TableVariant::Tight
    };
    let pass = Pass {
        tree,
        conf,
        orders,
        variant,
    };

    let header = conf
        .header_row
        .as_ref()
        .map(|row| pass.build_row(row, RowKind::Header, None, true));
    let footer = conf
        .footer_row
        .as_ref()
        .map(|row| pass.build_row(row, RowKind::Footer, None, true));

    let diagnostic = if tree.is_empty() {
        log::error!("Data-Table: Data Object empty in table: {}", table_id);
        Some(Diagnostic::EmptyDataset {
            table_id: table_id.to_string(),
        })
    } else {
        None
    };

    let rows = pass.body_rows();
    let columns = pass.visible_columns();
    log::debug!(
        "Rendered table {}: {} rows, {} columns",
        table_id,
        rows.len(),
        columns.len()
    );

    RenderedTable {
        table_id: table_id.to_string(),
        header,
        rows,
        footer,
        columns,
        variant,
        row_style: conf.styling.rows.to_css(),
        column_style: conf.styling.columns.to_css(),
        diagnostic,
    }
}

/// Teach the order tracker the IDs and keys present in this pass.
pub(crate) fn observe(tree: &RowTree, conf: &TableConf, orders: &mut OrderTracker) {
    let mut observe_cells = |row: &Row, kind: RowKind| {
        let custom = augment::extract_custom_cells(row, kind, conf);
        for (key, cell) in row.cells.iter() {
            if custom.is_extracted(key) || augment::is_reserved(key) {
                continue;
            }
            orders
                .columns
                .observe_before(&cell.property, &RESERVED_COLUMNS);
        }
    };

    if let Some(header) = &conf.header_row {
        observe_cells(header, RowKind::Header);
    }
    for &root in tree.roots() {
        if let Some(row) = tree.get(root) {
            observe_cells(row, RowKind::Body);
        }
    }

    for column in augment::enabled_columns(conf) {
        orders.columns.append_trailing(column);
    }
    for &root in tree.roots() {
        if let Some(row) = tree.get(root) {
            orders.rows.observe(&row.id);
        }
    }
}

struct Pass<'a> {
    tree: &'a RowTree,
    conf: &'a TableConf,
    orders: &'a OrderTracker,
    variant: TableVariant,
}

impl Pass<'_> {
    fn body_rows(&self) -> Vec<RenderedRow> {
        let mut rows: Vec<(usize, RenderedRow)> = Vec::with_capacity(self.tree.len());
        for &root in self.tree.roots() {
            let Some(row) = self.tree.get(root) else {
                continue;
            };
            if row.is_hidden || self.orders.rows.is_hidden(&row.id) {
                continue;
            }
            let rank = self.orders.rows.position(&row.id).unwrap_or(usize::MAX);
            rows.push((rank, self.build_row(row, RowKind::Body, Some(root), true)));
        }
        // Stable, so untracked rows keep data order at the end
        rows.sort_by_key(|(rank, _)| *rank);
        rows.into_iter().map(|(_, row)| row).collect()
    }

    fn build_row(&self, row: &Row, kind: RowKind, node: Option<NodeId>, visible: bool) -> RenderedRow {
        let mut rendered = RenderedRow::new(row.id.clone(), kind, node);
        let children = node.map(|n| self.tree.children(n)).unwrap_or(&[]);
        rendered.has_sub_rows = !children.is_empty();

        if kind == RowKind::SubRow && row.has_custom_subrow_content {
            rendered.custom_content = true;
            return rendered;
        }

        let custom = augment::extract_custom_cells(row, kind, self.conf);
        let mut cells = Vec::with_capacity(row.cells.len() + 3);
        for (key, entry) in row.cells.iter() {
            if custom.is_extracted(key) || augment::is_reserved(key) {
                continue;
            }
            rendered.cell_objects.push(CellObject {
                id: entry.id.clone(),
                property: entry.property.clone(),
                value: entry.value.clone(),
            });
            cells.push(self.render_cell(entry, kind, &row.id, CellContent::Value));
        }
        cells.extend(self.injected(row, kind, node, rendered.has_sub_rows, custom));
        self.arrange(&mut rendered, cells);

        if kind == RowKind::Body && self.conf.has_preview {
            rendered.preview = row.preview_row.as_ref().map(|preview| RenderedPreview {
                id: preview.id.clone(),
                parent_id: row.id.clone(),
                visible: visible && !preview.is_hidden(),
                position: if rendered.has_sub_rows && row.are_sub_rows_open {
                    SubRowPosition::Intermediate
                } else {
                    SubRowPosition::Last
                },
            });
            rendered.has_preview = rendered.preview.is_some();
        }

        for &child in children {
            let Some(sub_row) = self.tree.get(child) else {
                continue;
            };
            let sub_visible = visible && row.are_sub_rows_open && !sub_row.is_hidden;
            rendered.sub_rows.push(RenderedSubRow {
                parent_id: row.id.clone(),
                position: self.tree.position(child).unwrap_or(SubRowPosition::Last),
                visible: sub_visible,
                row: self.build_row(sub_row, RowKind::SubRow, Some(child), sub_visible),
            });
        }

        rendered.state = RowState {
            variant: self.variant,
            with_preview: rendered.has_preview,
            preview_open: rendered.preview.as_ref().is_some_and(|p| p.visible),
            with_sub_rows: rendered.has_sub_rows,
            sub_rows_open: row.are_sub_rows_open,
        };
        rendered
    }

    fn injected(
        &self,
        row: &Row,
        kind: RowKind,
        node: Option<NodeId>,
        has_sub_rows: bool,
        custom: CustomCells,
    ) -> Vec<RenderedCell> {
        let target = InjectTarget {
            row,
            kind,
            node,
            has_sub_rows,
        };
        augment::inject(target, custom, self.conf)
            .into_iter()
            .map(|InjectedCell { entry, content, affordance }| {
                let mut cell = self.render_cell(&entry, kind, &row.id, content);
                cell.affordances.extend(affordance);
                cell
            })
            .collect()
    }

    fn render_cell(&self, entry: &CellEntry, kind: RowKind, row_id: &str, content: CellContent) -> RenderedCell {
        let styling = &self.conf.styling.cells;
        let header_cell = self.header_cell(&entry.property);

        let mut affordances = Vec::new();
        if entry.is_copiable {
            affordances.push(Affordance::Copy {
                with_property: entry.is_property_in_copy_output,
                handler: entry.on_copy_click.clone(),
            });
        }
        if entry.has_sort_icon {
            affordances.push(Affordance::Sort {
                handler: entry
                    .on_sort_click
                    .clone()
                    .or_else(|| header_cell.and_then(|h| h.on_sort_click.clone())),
            });
        }
        if entry.is_draggable {
            affordances.push(Affordance::Drag {
                handler: entry
                    .on_rearrange_click
                    .clone()
                    .or_else(|| header_cell.and_then(|h| h.on_rearrange_click.clone())),
            });
        }

        RenderedCell {
            id: entry.id.clone(),
            property: entry.property.clone(),
            value: entry.value.clone(),
            content,
            hidden: entry.is_hidden.unwrap_or(false),
            justify_content: entry
                .justify_content
                .or(styling.justify_content)
                .unwrap_or_default(),
            align_items: entry.align_items.or(styling.align_items).unwrap_or_default(),
            wraps: entry.does_wrap.unwrap_or(styling.wrap_content),
            in_header_row: kind == RowKind::Header || entry.is_in_header_row,
            in_sub_row: kind == RowKind::SubRow,
            in_footer_row: kind == RowKind::Footer,
            affordances,
            parent_id: row_id.to_string(),
        }
    }

    /// Split cells into visible and hidden columns and sort the visible ones
    /// by the column order. Unknown properties go last, in insertion order.
    fn arrange(&self, rendered: &mut RenderedRow, cells: Vec<RenderedCell>) {
        let mut visible: Vec<(usize, RenderedCell)> = Vec::with_capacity(cells.len());
        for cell in cells {
            if self.is_column_hidden(&cell.property) {
                rendered.hidden_cells.push(cell);
            } else {
                let rank = self.orders.columns.position(&cell.property).unwrap_or(usize::MAX);
                visible.push((rank, cell));
            }
        }
        visible.sort_by_key(|(rank, _)| *rank);
        rendered.cells = visible.into_iter().map(|(_, cell)| cell).collect();
    }

    fn header_cell(&self, property: &str) -> Option<&CellEntry> {
        header_cell(self.conf, property)
    }

    fn is_column_hidden(&self, property: &str) -> bool {
        is_column_hidden(self.conf, self.orders, property)
    }

    fn visible_columns(&self) -> Vec<String> {
        visible_columns(self.conf, self.orders)
    }
}

fn header_cell<'a>(conf: &'a TableConf, property: &str) -> Option<&'a CellEntry> {
    conf.header_row
        .as_ref()
        .and_then(|h| h.cells.by_property(property))
}

/// A column is hidden by its property or by its header cell's ID.
fn is_column_hidden(conf: &TableConf, orders: &OrderTracker, property: &str) -> bool {
    let columns = &orders.columns;
    columns.is_hidden(property)
        || header_cell(conf, property).is_some_and(|h| columns.is_hidden(&h.id))
}

/// Column properties in render order: hidden columns and disabled reserved
/// columns left out.
pub(crate) fn visible_columns(conf: &TableConf, orders: &OrderTracker) -> Vec<String> {
    let enabled = augment::enabled_columns(conf);
    orders
        .columns
        .base_order()
        .iter()
        .filter(|c| !is_column_hidden(conf, orders, c))
        .filter(|c| !augment::is_reserved(c) || enabled.contains(&c.as_str()))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::CellEntry;

    fn people() -> RowTree {
        RowTree::from_rows(vec![
            Row::new("r1")
                .cell(CellEntry::new("name", "Bob").with_id("r1-name"))
                .cell(CellEntry::new("age", 30).with_id("r1-age")),
            Row::new("r2")
                .cell(CellEntry::new("age", 25).with_id("r2-age"))
                .cell(CellEntry::new("name", "Ann").with_id("r2-name")),
        ])
    }

    #[test]
    fn test_first_pass_derives_orders() {
        let tree = people();
        let mut orders = OrderTracker::default();
        let table = materialize("t", &tree, &TableConf::new(), &mut orders);

        assert_eq!(orders.rows.default_order(), ["r1", "r2"]);
        assert_eq!(orders.columns.default_order(), ["name", "age"]);
        assert_eq!(table.row_ids(), vec!["r1", "r2"]);
        // r2 lists age first, but display follows the column order
        assert_eq!(table.rows[1].properties(), vec!["name", "age"]);
        assert_eq!(table.rows[1].cell_objects[0].property, "age");
    }

    #[test]
    fn test_unknown_property_goes_last() {
        let tree = RowTree::from_rows(vec![Row::new("r1")
            .cell(CellEntry::new("extra", 1))
            .cell(CellEntry::new("name", "Bob"))]);
        // Build without the observation step, so "extra" stays untracked
        let orders = OrderTracker::from_conf(&crate::config::RenderOrderConf {
            columns: crate::config::OrderConf {
                default_order: vec!["name".into()],
                ..Default::default()
            },
            ..Default::default()
        });
        let conf = TableConf::new();
        let pass = Pass {
            tree: &tree,
            conf: &conf,
            orders: &orders,
            variant: TableVariant::Tight,
        };
        let root = tree.root(0).unwrap();
        let row = pass.build_row(tree.get(root).unwrap(), RowKind::Body, Some(root), true);
        assert_eq!(row.properties(), vec!["name", "extra"]);
    }

    #[test]
    fn test_empty_dataset() {
        let mut orders = OrderTracker::default();
        let conf = TableConf::new().with_header(Row::new("h").cell(CellEntry::new("name", "Name")));
        let table = materialize("t1", &RowTree::new(), &conf, &mut orders);

        assert!(table.is_empty());
        assert!(table.header.is_some());
        assert_eq!(
            table.diagnostic,
            Some(Diagnostic::EmptyDataset {
                table_id: "t1".into()
            })
        );
    }

    #[test]
    fn test_styling_defaults_apply() {
        let mut conf = TableConf::new();
        conf.styling.cells.wrap_content = true;
        conf.styling.cells.justify_content = Some(crate::cell::JustifyContent::FlexEnd);
        let mut orders = OrderTracker::default();
        let table = materialize("t", &people(), &conf, &mut orders);

        let cell = &table.rows[0].cells[0];
        assert!(cell.wraps);
        assert_eq!(cell.justify_content, crate::cell::JustifyContent::FlexEnd);
        assert_eq!(cell.parent_id, "r1");
    }
}
