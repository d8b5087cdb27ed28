//! Tests for icon activations.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use data_table::{
    CellEntry, Clipboard, ClipboardError, Diagnostic, EventResult, Handler, Icon, MemoryClipboard,
    Row, SETTINGS_COLUMN, Table, TableConf,
};

/// Clipboard whose contents stay readable after the table takes it.
#[derive(Clone, Default)]
struct SharedClipboard(Arc<Mutex<Vec<String>>>);

impl SharedClipboard {
    fn contents(&self) -> Vec<String> {
        self.0.lock().unwrap().clone()
    }
}

impl Clipboard for SharedClipboard {
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        self.0.lock().unwrap().push(text.to_string());
        Ok(())
    }
}

fn counter() -> (Arc<AtomicUsize>, Handler) {
    let calls = Arc::new(AtomicUsize::new(0));
    let count = Arc::clone(&calls);
    let handler = Handler::new(move |_| {
        count.fetch_add(1, Ordering::SeqCst);
    });
    (calls, handler)
}

fn nested() -> Vec<Row> {
    vec![
        Row::new("r1")
            .cell(CellEntry::new("name", "Parent"))
            .sub_row(Row::new("r1a").sub_row(Row::new("r1ax"))),
        Row::new("r2").cell(CellEntry::new("name", "Single")),
    ]
}

// =============================================================================
// Chevron
// =============================================================================

#[test]
fn test_chevron_toggles_sub_rows() {
    let table = Table::new(nested(), TableConf::new().has_subrows(true));
    table.render();
    table.clear_dirty();

    assert_eq!(table.activate("r1-chevron", Icon::Content), EventResult::Consumed);
    assert!(table.is_dirty());
    let rendered = table.render();
    assert!(rendered.rows[0].sub_rows[0].visible);

    table.activate("r1-chevron", Icon::Content);
    assert!(!table.render().rows[0].sub_rows[0].visible);
}

#[test]
fn test_nested_chevron_toggles_its_own_row() {
    let table = Table::new(nested(), TableConf::new().has_subrows(true));
    table.toggle_sub_rows(0, Some(true));
    table.render();

    table.activate("r1a-chevron", Icon::Content);
    let data = table.data();
    assert!(data[0].are_sub_rows_open);
    assert!(data[0].sub_rows[0].are_sub_rows_open);

    let rendered = table.render();
    assert!(rendered.rows[0].sub_rows[0].row.sub_rows[0].visible);
}

#[test]
fn test_table_chevron_hook_suppresses_toggle() {
    let conf = TableConf::new()
        .has_subrows(true)
        .has_preview(true)
        .on_chevron(Handler::new(|cx| {
            assert_eq!(cx.row_id, "r1");
            // The hook drives the table itself
            cx.table.toggle_preview(0, Some(false));
        }));
    let rows = vec![
        Row::new("r1")
            .sub_row(Row::new("r1a"))
            .preview(data_table::PreviewRow::new("p1")),
    ];
    let table = Table::new(rows, conf);
    table.render();

    assert_eq!(table.activate("r1-chevron", Icon::Content), EventResult::Consumed);
    let rendered = table.render();
    assert!(!rendered.rows[0].sub_rows[0].visible);
    assert!(rendered.rows[0].preview.as_ref().unwrap().visible);
}

#[test]
fn test_row_chevron_hooks_wrap_default_toggle() {
    let log = Arc::new(Mutex::new(Vec::new()));
    let pre_log = Arc::clone(&log);
    let on_log = Arc::clone(&log);
    let rows = vec![
        Row::new("r1")
            .sub_row(Row::new("r1a"))
            .pre_chevron(Handler::new(move |cx| {
                let open = cx.table.data()[0].are_sub_rows_open;
                pre_log.lock().unwrap().push(format!("pre:{open}"));
            }))
            .on_chevron(Handler::new(move |cx| {
                let open = cx.table.data()[0].are_sub_rows_open;
                on_log.lock().unwrap().push(format!("on:{open}"));
            })),
    ];
    let table = Table::new(rows, TableConf::new().has_subrows(true));
    table.render();

    table.activate("r1-chevron", Icon::Content);
    assert_eq!(*log.lock().unwrap(), vec!["pre:false", "on:true"]);
}

// =============================================================================
// Copy
// =============================================================================

fn copy_table() -> Table {
    Table::new(
        vec![
            Row::new("r1")
                .cell(CellEntry::new("name", "Bob").with_id("r1-name").copiable())
                .cell(
                    CellEntry::new("age", 30)
                        .with_id("r1-age")
                        .copy_with_property(),
                ),
        ],
        TableConf::new(),
    )
}

#[test]
fn test_copy_writes_to_installed_clipboard() {
    let table = copy_table();
    let clipboard = SharedClipboard::default();
    table.set_clipboard(clipboard.clone());

    assert_eq!(table.activate("r1-name", Icon::Copy), EventResult::Consumed);
    assert_eq!(table.activate("r1-age", Icon::Copy), EventResult::Consumed);
    assert_eq!(clipboard.contents(), vec!["Bob", "age - 30"]);
    assert!(table.take_diagnostics().is_empty());
}

#[test]
fn test_copy_cell_with_explicit_clipboard() {
    let table = copy_table();
    let mut clipboard = MemoryClipboard::new();

    assert_eq!(table.copy_cell("r1-age", &mut clipboard), EventResult::Consumed);
    assert_eq!(clipboard.contents(), Some("age - 30"));
}

#[test]
fn test_denied_clipboard_is_diagnosed() {
    let table = copy_table();
    table.set_clipboard(MemoryClipboard::denied());

    assert_eq!(table.activate("r1-name", Icon::Copy), EventResult::Consumed);
    assert_eq!(
        table.take_diagnostics(),
        vec![Diagnostic::CopyFailed {
            cell_id: "r1-name".into(),
            reason: "Clipboard access denied".into(),
        }]
    );
}

#[test]
fn test_copy_without_clipboard_is_diagnosed() {
    let table = copy_table();
    table.activate("r1-name", Icon::Copy);

    let diagnostics = table.take_diagnostics();
    assert!(matches!(
        diagnostics.as_slice(),
        [Diagnostic::CopyFailed { cell_id, .. }] if cell_id == "r1-name"
    ));
}

#[test]
fn test_copy_handler_replaces_clipboard() {
    let (calls, handler) = counter();
    let table = Table::new(
        vec![Row::new("r1").cell(
            CellEntry::new("name", "Bob")
                .with_id("r1-name")
                .copiable()
                .on_copy(handler),
        )],
        TableConf::new(),
    );
    let clipboard = SharedClipboard::default();
    table.set_clipboard(clipboard.clone());

    table.activate("r1-name", Icon::Copy);
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert!(clipboard.contents().is_empty());
}

// =============================================================================
// Unknown targets
// =============================================================================

#[test]
fn test_unknown_cell_is_ignored() {
    let table = copy_table();
    assert_eq!(table.activate("nope", Icon::Copy), EventResult::Ignored);
    assert_eq!(
        table.take_diagnostics(),
        vec![Diagnostic::UnknownCell {
            cell_id: "nope".into()
        }]
    );
}

#[test]
fn test_unsupported_icon_is_ignored() {
    let table = copy_table();
    assert_eq!(table.activate("r1-name", Icon::Sort), EventResult::Ignored);
    assert_eq!(
        table.take_diagnostics(),
        vec![Diagnostic::UnsupportedIcon {
            cell_id: "r1-name".into(),
            icon: "sort".into()
        }]
    );
}

#[test]
fn test_unknown_row_index_is_diagnosed() {
    let table = copy_table();
    assert!(!table.toggle_sub_rows(5, None).is_change());
    assert_eq!(
        table.take_diagnostics(),
        vec![Diagnostic::RowIndexOutOfRange { index: 5 }]
    );
}

// =============================================================================
// Alert, settings and three-dots
// =============================================================================

#[test]
fn test_row_alert_handler_wins() {
    let (row_calls, row_handler) = counter();
    let (table_calls, table_handler) = counter();
    let rows = vec![
        Row::new("r1").alerts_to_show(true).on_alert(row_handler),
        Row::new("r2").alerts_to_show(true),
    ];
    let table = Table::new(rows, TableConf::new().has_alerts(true).on_alert(table_handler));
    table.render();

    table.activate("r1-alert", Icon::Content);
    assert_eq!(row_calls.load(Ordering::SeqCst), 1);
    assert_eq!(table_calls.load(Ordering::SeqCst), 0);

    table.activate("r2-alert", Icon::Content);
    assert_eq!(table_calls.load(Ordering::SeqCst), 1);
}

#[test]
fn test_three_dots_context() {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    let conf = TableConf::new()
        .has_settings(true)
        .on_three_dots(Handler::new(move |cx| {
            sink.lock().unwrap().push((
                cx.row_id.clone(),
                cx.property.clone(),
                cx.cell_id.clone(),
            ));
        }));
    let table = Table::new(vec![Row::new("r1").cell(CellEntry::new("name", "Bob"))], conf);
    table.render();

    assert_eq!(table.activate("r1-settings", Icon::Content), EventResult::Consumed);
    assert_eq!(
        *seen.lock().unwrap(),
        vec![(
            "r1".to_string(),
            SETTINGS_COLUMN.to_string(),
            "r1-settings".to_string()
        )]
    );
}

#[test]
fn test_header_cog_runs_settings_handler() {
    let (calls, handler) = counter();
    let conf = TableConf::new()
        .with_header(Row::new("head").cell(CellEntry::new("name", "Name")))
        .has_settings(true)
        .on_settings(handler);
    let table = Table::new(vec![Row::new("r1").cell(CellEntry::new("name", "Bob"))], conf);
    table.render();

    assert_eq!(
        table.activate("head-table-settings", Icon::Content),
        EventResult::Consumed
    );
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[test]
fn test_three_dots_without_handler_is_ignored() {
    let table = Table::new(vec![Row::new("r1")], TableConf::new().has_settings(true));
    table.render();
    assert_eq!(table.activate("r1-settings", Icon::Content), EventResult::Ignored);
}

// =============================================================================
// Drag
// =============================================================================

#[test]
fn test_drag_without_handler_starts_drag() {
    let header = Row::new("head").cell(CellEntry::new("name", "Name").with_id("h-name").draggable());
    let table = Table::new(
        vec![Row::new("r1").cell(CellEntry::new("name", "Bob"))],
        TableConf::new().with_header(header),
    );
    table.render();

    let result = table.activate("h-name", Icon::Drag);
    assert_eq!(result, EventResult::StartDrag);
    assert!(result.is_handled());
}

#[test]
fn test_body_drag_uses_header_handler() {
    let (calls, handler) = counter();
    let header = Row::new("head").cell(
        CellEntry::new("name", "Name")
            .with_id("h-name")
            .draggable()
            .on_rearrange(handler),
    );
    let table = Table::new(
        vec![Row::new("r1").cell(CellEntry::new("name", "Bob").with_id("r1-name").draggable())],
        TableConf::new().with_header(header),
    );
    table.render();

    assert_eq!(table.activate("r1-name", Icon::Drag), EventResult::Consumed);
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}
