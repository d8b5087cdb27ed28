use std::fmt::Write;

use data_table::config::RenderOrderConf;
use data_table::render::{CellContent, IconKind};
use data_table::{CellValue, Diagnostic, RenderedCell, RenderedRow, RenderedTable};
use serde::Serialize;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::error::Result;

// ============================================================================
// Plain
// ============================================================================

/// Text layout, one line per visible row. Cells wider than `max_width`
/// columns are cut with an ellipsis.
pub fn format_plain(table: &RenderedTable, diagnostics: &[Diagnostic], max_width: usize) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "TABLE {}", table.table_id);
    let _ = writeln!(out, "columns: {}", table.columns.join(" | "));
    let _ = writeln!(out, "{}", "=".repeat(60));

    if let Some(header) = &table.header {
        write_row(&mut out, header, 0, "header", max_width);
    }
    for row in &table.rows {
        write_row(&mut out, row, 0, "", max_width);
    }
    if let Some(footer) = &table.footer {
        write_row(&mut out, footer, 0, "footer", max_width);
    }

    if let Some(diagnostic) = &table.diagnostic {
        let _ = writeln!(out, "! {}", diagnostic);
    }
    for diagnostic in diagnostics {
        let _ = writeln!(out, "! {}", diagnostic);
    }
    out
}

fn write_row(out: &mut String, row: &RenderedRow, depth: usize, label: &str, max_width: usize) {
    let indent = "  ".repeat(depth);
    let marker = if depth > 0 { "└ " } else { "" };
    let label = if label.is_empty() {
        String::new()
    } else {
        format!("[{}] ", label)
    };

    if row.custom_content {
        let _ = writeln!(out, "{}{}{}<{}>", indent, marker, label, row.id);
    } else {
        let cells: Vec<String> = row
            .cells
            .iter()
            .map(|c| truncate(&cell_text(c), max_width))
            .collect();
        let _ = writeln!(out, "{}{}{}{}: {}", indent, marker, label, row.id, cells.join(" | "));
    }

    if let Some(preview) = row.preview.as_ref().filter(|p| p.visible) {
        let _ = writeln!(out, "{}  └ [preview] <{}>", indent, preview.id);
    }
    for sub in &row.sub_rows {
        if sub.visible {
            write_row(out, &sub.row, depth + 1, "", max_width);
        }
    }
}

fn cell_text(cell: &RenderedCell) -> String {
    if cell.hidden {
        return String::new();
    }
    match cell.content {
        CellContent::Value => cell.value.to_string(),
        CellContent::Icon(IconKind::Alert) => "(!)".to_string(),
        CellContent::Icon(IconKind::Chevron) => "(v)".to_string(),
        CellContent::Icon(IconKind::Settings) => "(*)".to_string(),
        CellContent::Icon(IconKind::ThreeDots) => "(...)".to_string(),
        CellContent::CustomSlot => format!("<{}>", cell.id),
    }
}

fn truncate(text: &str, max_width: usize) -> String {
    if text.width() <= max_width {
        return text.to_string();
    }
    let room = max_width.saturating_sub(1);
    let mut width = 0;
    let mut out = String::new();
    for ch in text.chars() {
        let w = ch.width().unwrap_or(0);
        if width + w > room {
            break;
        }
        width += w;
        out.push(ch);
    }
    if max_width > 0 {
        out.push('…');
    }
    out
}

// ============================================================================
// JSON
// ============================================================================

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct LayoutJson<'a> {
    table_id: &'a str,
    columns: &'a [String],
    #[serde(skip_serializing_if = "Option::is_none")]
    header: Option<RowJson<'a>>,
    rows: Vec<RowJson<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    footer: Option<RowJson<'a>>,
    render_order: &'a RenderOrderConf,
    diagnostics: Vec<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RowJson<'a> {
    id: &'a str,
    cells: Vec<CellJson<'a>>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    sub_rows: Vec<RowJson<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    preview: Option<&'a str>,
    custom_content: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CellJson<'a> {
    id: &'a str,
    property: &'a str,
    value: &'a CellValue,
    hidden: bool,
}

impl<'a> RowJson<'a> {
    fn new(row: &'a RenderedRow) -> Self {
        Self {
            id: &row.id,
            cells: row
                .cells
                .iter()
                .map(|c| CellJson {
                    id: &c.id,
                    property: &c.property,
                    value: &c.value,
                    hidden: c.hidden,
                })
                .collect(),
            sub_rows: row
                .sub_rows
                .iter()
                .filter(|s| s.visible)
                .map(|s| RowJson::new(&s.row))
                .collect(),
            preview: row
                .preview
                .as_ref()
                .filter(|p| p.visible)
                .map(|p| p.id.as_str()),
            custom_content: row.custom_content,
        }
    }
}

pub fn format_json(
    table: &RenderedTable,
    render_order: &RenderOrderConf,
    diagnostics: &[Diagnostic],
) -> Result<String> {
    let layout = LayoutJson {
        table_id: &table.table_id,
        columns: &table.columns,
        header: table.header.as_ref().map(RowJson::new),
        rows: table.rows.iter().map(RowJson::new).collect(),
        footer: table.footer.as_ref().map(RowJson::new),
        render_order,
        diagnostics: table
            .diagnostic
            .iter()
            .chain(diagnostics)
            .map(|d| d.to_string())
            .collect(),
    };
    Ok(serde_json::to_string_pretty(&layout)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use data_table::{CellEntry, Row, Table, TableConf};

    fn table() -> Table {
        Table::with_id(
            "people",
            vec![
                Row::new("r1")
                    .cell(CellEntry::new("name", "Bob").with_id("r1-name"))
                    .sub_row(Row::new("r1a").cell(CellEntry::new("name", "Junior")))
                    .open(),
                Row::new("r2").cell(CellEntry::new("name", "Ann").with_id("r2-name")),
            ],
            TableConf::new()
                .with_header(Row::new("head").cell(CellEntry::new("name", "Name")))
                .has_settings(true),
        )
    }

    #[test]
    fn test_plain_layout() {
        let rendered = table().render();
        let text = format_plain(&rendered, &[], 32);

        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "TABLE people");
        assert_eq!(lines[1], "columns: name | data-table-settings");
        assert_eq!(lines[3], "[header] head: Name | (*)");
        assert_eq!(lines[4], "r1: Bob | (...)");
        assert_eq!(lines[5], "  └ r1a: Junior | (...)");
        assert_eq!(lines[6], "r2: Ann | (...)");
    }

    #[test]
    fn test_plain_lists_diagnostics() {
        let rendered = Table::with_id("empty", Vec::new(), TableConf::new()).render();
        let text = format_plain(&rendered, &[Diagnostic::RowIndexOutOfRange { index: 3 }], 32);
        assert!(text.contains("! Data Object Empty (table empty)"));
        assert!(text.lines().count() >= 5);
    }

    #[test]
    fn test_json_layout() {
        let table = table();
        let rendered = table.render();
        let json = format_json(&rendered, &table.conf().render_order, &[]).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["tableId"], "people");
        assert_eq!(value["rows"][0]["id"], "r1");
        assert_eq!(value["rows"][0]["cells"][0]["value"], "Bob");
        assert_eq!(value["rows"][0]["subRows"][0]["id"], "r1a");
        assert_eq!(value["renderOrder"]["rows"]["defaultOrder"][1], "r2");
        assert!(value["diagnostics"].as_array().unwrap().is_empty());
    }

    #[test]
    fn test_truncate_by_display_width() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("abcdefgh", 5), "abcd…");
        // Wide characters take two columns
        assert_eq!(truncate("日本語テキスト", 6), "日本…");
        assert_eq!(truncate("abc", 0), "");
    }
}
