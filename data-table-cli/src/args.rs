use std::path::PathBuf;

use clap::Parser;
use data_table::CellValue;

#[derive(Parser)]
#[command(name = "data-table")]
#[command(about = "Render a data table from JSON rows and configuration", long_about = None)]
#[command(version)]
pub struct Cli {
    /// JSON file holding the rows
    #[arg(long)]
    pub data: PathBuf,

    /// JSON file holding the table configuration
    #[arg(long)]
    pub conf: Option<PathBuf>,

    /// Sort rows by a column property
    #[arg(long)]
    pub sort: Option<String>,

    /// Sort descending
    #[arg(long, requires = "sort")]
    pub desc: bool,

    /// Drop the custom row order from the configuration
    #[arg(long)]
    pub reset_rows: bool,

    /// Custom column order
    #[arg(long, value_delimiter = ',')]
    pub columns: Option<Vec<String>>,

    /// Columns to hide or show, by property or header cell ID
    #[arg(long, value_delimiter = ',')]
    pub hide: Vec<String>,

    /// Open the sub-rows of these top-level rows
    #[arg(long, value_delimiter = ',')]
    pub open: Vec<usize>,

    /// Show the preview of these top-level rows (needs hasPreview in the configuration)
    #[arg(long, value_delimiter = ',')]
    pub preview: Vec<usize>,

    /// Set a cell value (CELL_ID=VALUE, VALUE read as JSON when it parses)
    #[arg(long = "set", value_name = "CELL_ID=VALUE", value_parser = parse_assignment)]
    pub set: Vec<(String, CellValue)>,

    /// Widest cell, in terminal columns, in plain output
    #[arg(long, default_value = "32")]
    pub max_width: usize,

    #[arg(long, value_parser = ["plain", "json"], default_value = "plain")]
    pub format: String,

    #[arg(long, value_parser = ["error", "warn", "info", "debug", "trace"], default_value = "warn")]
    pub log_level: String,

    /// Write logs to a file instead of stderr
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

fn parse_assignment(raw: &str) -> Result<(String, CellValue), String> {
    let (id, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected CELL_ID=VALUE, got '{}'", raw))?;
    if id.is_empty() {
        return Err(format!("missing cell ID in '{}'", raw));
    }
    let value = serde_json::from_str::<CellValue>(value)
        .unwrap_or_else(|_| CellValue::Text(value.to_string()));
    Ok((id.to_string(), value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_assignment() {
        assert_eq!(
            parse_assignment("r1-age=31").unwrap(),
            ("r1-age".to_string(), CellValue::Number(31.0))
        );
        assert_eq!(
            parse_assignment("r1-name=Bob Jr").unwrap(),
            ("r1-name".to_string(), CellValue::Text("Bob Jr".into()))
        );
        assert_eq!(
            parse_assignment("r1-flag=true").unwrap().1,
            CellValue::Bool(true)
        );
        assert!(parse_assignment("no-value").is_err());
        assert!(parse_assignment("=3").is_err());
    }

    #[test]
    fn test_cli_parses_lists() {
        let cli = Cli::try_parse_from([
            "data-table",
            "--data",
            "rows.json",
            "--sort",
            "age",
            "--desc",
            "--columns",
            "age,name",
            "--open",
            "0,2",
            "--set",
            "r1-age=40",
        ])
        .unwrap();

        assert_eq!(cli.sort.as_deref(), Some("age"));
        assert!(cli.desc);
        assert_eq!(cli.columns, Some(vec!["age".to_string(), "name".to_string()]));
        assert_eq!(cli.open, vec![0, 2]);
        assert_eq!(cli.set.len(), 1);
        assert_eq!(cli.format, "plain");
    }

    #[test]
    fn test_desc_requires_sort() {
        assert!(Cli::try_parse_from(["data-table", "--data", "rows.json", "--desc"]).is_err());
    }
}
