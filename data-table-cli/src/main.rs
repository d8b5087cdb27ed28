use std::fs::File;
use std::str::FromStr;

use clap::Parser;
use data_table::{Table, TableChange, TableConf, data_from_path};
use simplelog::{ColorChoice, Config, LevelFilter, TermLogger, TerminalMode, WriteLogger};

mod args;
mod error;
mod output;

use args::Cli;
use error::{CliError, Result};

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    init_logging(&cli)?;

    let data = data_from_path(&cli.data)?;
    let conf = match &cli.conf {
        Some(path) => TableConf::from_path(path)?,
        None => TableConf::default(),
    };
    log::info!("Loaded {} rows from {}", data.len(), cli.data.display());

    let table = Table::new(data, conf);
    // Derive the default orders before anything reorders them
    table.render();
    apply(&table, &cli);

    let rendered = table.render();
    let diagnostics = table.take_diagnostics();
    let text = match cli.format.as_str() {
        "json" => output::format_json(&rendered, &table.conf().render_order, &diagnostics)?,
        _ => output::format_plain(&rendered, &diagnostics, cli.max_width),
    };
    print!("{}", text);
    Ok(())
}

/// Apply the operations requested on the command line, in a fixed order.
fn apply(table: &Table, cli: &Cli) {
    let mut changes = Vec::new();

    for column in &cli.hide {
        changes.push(table.toggle_column(column));
    }
    if let Some(columns) = &cli.columns {
        changes.push(table.reorder_columns(Some(columns.clone())));
    }
    if cli.reset_rows {
        changes.push(table.reset_row_order());
    }
    if let Some(property) = &cli.sort {
        changes.push(table.reorder_rows(property, cli.desc));
    }
    for &index in &cli.open {
        changes.push(table.toggle_sub_rows(index, Some(true)));
    }
    for &index in &cli.preview {
        changes.push(table.toggle_preview(index, Some(false)));
    }
    for (cell_id, value) in &cli.set {
        changes.push(table.update_cell_value(cell_id, value.clone()));
    }

    for change in changes.iter().filter(|c| c.is_change()) {
        log::debug!("Applied {:?}", change);
    }
    let skipped = changes.iter().filter(|c| **c == TableChange::None).count();
    if skipped > 0 {
        log::warn!("{} operation(s) had no effect", skipped);
    }
}

fn init_logging(cli: &Cli) -> Result<()> {
    let level = LevelFilter::from_str(&cli.log_level).unwrap_or(LevelFilter::Warn);
    match &cli.log_file {
        Some(path) => {
            let file = File::create(path).map_err(|source| CliError::LogFile {
                path: path.clone(),
                source,
            })?;
            WriteLogger::init(level, Config::default(), file)?;
        }
        None => TermLogger::init(level, Config::default(), TerminalMode::Stderr, ColorChoice::Auto)?,
    }
    Ok(())
}
