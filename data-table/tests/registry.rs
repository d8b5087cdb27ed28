//! Tests for the column registry.

use data_table::{
    COLUMN_ID_UNAVAILABLE, CellEntry, Row, SETTINGS_COLUMN, Table, TableConf,
};

fn header() -> Row {
    Row::new("header")
        .cell(CellEntry::new("name", "Name").with_id("h-name"))
        .cell(CellEntry::new("age", "Age").with_id("h-age"))
}

fn person(id: &str, name: &str, age: i32) -> Row {
    Row::new(id)
        .cell(CellEntry::new("name", name).with_id(format!("{id}-name")))
        .cell(CellEntry::new("age", age).with_id(format!("{id}-age")))
}

// =============================================================================
// Building
// =============================================================================

#[test]
fn test_column_id_comes_from_header() {
    let table = Table::new(
        vec![person("r1", "Bob", 30), person("r2", "Ann", 25)],
        TableConf::new().with_header(header()),
    );
    table.render();
    let registry = table.column_registry();

    assert_eq!(registry.properties(), vec!["name", "age"]);
    assert_eq!(registry.column_id("name"), Some("h-name"));
    assert_eq!(
        registry.get("age").unwrap().cell_ids,
        vec!["h-age", "r1-age", "r2-age"]
    );
}

#[test]
fn test_column_without_header_cell() {
    let table = Table::new(
        vec![person("r1", "Bob", 30).cell(CellEntry::new("email", "bob@example.com"))],
        TableConf::new().with_header(header()),
    );
    table.render();

    assert_eq!(
        table.column_registry().column_id("email"),
        Some(COLUMN_ID_UNAVAILABLE)
    );
    assert_eq!(COLUMN_ID_UNAVAILABLE, "notAvailable");
}

#[test]
fn test_settings_column_uses_header_cog() {
    let conf = TableConf::new()
        .with_header(Row::new("head").cell(CellEntry::new("name", "Name")))
        .has_settings(true);
    let table = Table::new(vec![Row::new("r1").cell(CellEntry::new("name", "Bob"))], conf);
    table.render();

    let registry = table.column_registry();
    let entry = registry.get(SETTINGS_COLUMN).unwrap();
    assert_eq!(entry.column_id, "head-table-settings");
    assert_eq!(entry.cell_ids, vec!["head-table-settings", "r1-settings"]);
}

#[test]
fn test_hidden_columns_and_sub_rows_are_included() {
    let rows = vec![
        person("r1", "Bob", 30).sub_row(person("r1a", "Bob Jr", 3)),
        person("r2", "Ann", 25),
    ];
    let table = Table::new(rows, TableConf::new().with_header(header()));
    table.toggle_column("age");
    table.render();

    assert_eq!(
        table.column_registry().get("age").unwrap().cell_ids,
        vec!["h-age", "r1-age", "r1a-age", "r2-age"]
    );
}

#[test]
fn test_follows_render_order() {
    let conf = TableConf::new()
        .with_header(header())
        .row_order(vec!["r2".into(), "r1".into()]);
    let table = Table::new(vec![person("r1", "Bob", 30), person("r2", "Ann", 25)], conf);
    table.render();

    assert_eq!(
        table.column_registry().get("name").unwrap().cell_ids,
        vec!["h-name", "r2-name", "r1-name"]
    );
}

// =============================================================================
// Lifetime
// =============================================================================

#[test]
fn test_not_rebuilt_on_updates() {
    let table = Table::new(
        vec![person("r1", "Bob", 30)],
        TableConf::new().with_header(header()),
    );
    table.render();
    let before = table.column_registry();

    table.set_conf(TableConf::new().with_header(header()).has_settings(true));
    table.reorder_rows("age", true);
    table.update_cell_value("r1-age", 31);
    table.render();

    let after = table.column_registry();
    assert_eq!(before, after);
    assert!(after.get(SETTINGS_COLUMN).is_none());
}

#[test]
fn test_rebuilt_after_set_data() {
    let table = Table::new(
        vec![person("r1", "Bob", 30)],
        TableConf::new().with_header(header()),
    );
    table.render();

    table.set_data(vec![person("r9", "Zed", 40)]);
    // Not until the next pass
    assert_eq!(
        table.column_registry().get("name").unwrap().cell_ids,
        vec!["h-name", "r1-name"]
    );

    table.render();
    assert_eq!(
        table.column_registry().get("name").unwrap().cell_ids,
        vec!["h-name", "r9-name"]
    );
}

#[test]
fn test_empty_dataset_defers_registry() {
    let table = Table::new(Vec::new(), TableConf::new().with_header(header()));
    table.render();
    assert!(table.column_registry().is_empty());

    table.set_data(vec![person("r1", "Bob", 30)]);
    table.render();
    let registry = table.column_registry();
    assert_eq!(registry.len(), 2);
    assert_eq!(registry.column_id("age"), Some("h-age"));
}
