//! Error and diagnostic types.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while loading table inputs.
#[derive(Debug, Error)]
pub enum LoadError {
    /// Reading an input file failed.
    #[error("Failed to read {path}: {source}")]
    Io {
        /// The file that could not be read.
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The dataset is not valid JSON for a list of rows.
    #[error("Invalid table data: {0}")]
    Data(#[source] serde_json::Error),

    /// The configuration is not valid JSON for a table configuration.
    #[error("Invalid table configuration: {0}")]
    Conf(#[source] serde_json::Error),
}

/// A non-fatal condition observed by the table.
///
/// Table operations never fail. Degraded paths are logged and recorded as
/// diagnostics, which the host drains with
/// [`Table::take_diagnostics`](crate::Table::take_diagnostics).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Diagnostic {
    /// The table was rendered without any body rows.
    #[error("Data Object Empty (table {table_id})")]
    EmptyDataset {
        /// The table that was rendered.
        table_id: String,
    },

    /// Writing to the clipboard failed.
    #[error("Copy of cell '{cell_id}' failed: {reason}")]
    CopyFailed {
        /// The copied cell.
        cell_id: String,
        /// Why the clipboard refused the write.
        reason: String,
    },

    /// A row index did not match a top-level row.
    #[error("Row index {index} is out of range")]
    RowIndexOutOfRange {
        /// The requested index.
        index: usize,
    },

    /// A cell ID did not match any cell.
    #[error("Unknown cell '{cell_id}'")]
    UnknownCell {
        /// The requested cell ID.
        cell_id: String,
    },

    /// A preview toggle targeted a row without a preview slot.
    #[error("Row {index} has no preview")]
    NoPreview {
        /// The requested index.
        index: usize,
    },

    /// A cell was activated through an icon it does not carry.
    #[error("Cell '{cell_id}' has no {icon} icon")]
    UnsupportedIcon {
        /// The activated cell.
        cell_id: String,
        /// The icon that was activated.
        icon: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diagnostic_messages() {
        let diag = Diagnostic::EmptyDataset {
            table_id: "t1".into(),
        };
        assert_eq!(diag.to_string(), "Data Object Empty (table t1)");

        let diag = Diagnostic::UnsupportedIcon {
            cell_id: "c1".into(),
            icon: "sort".into(),
        };
        assert_eq!(diag.to_string(), "Cell 'c1' has no sort icon");
    }

    #[test]
    fn test_load_error_wraps_serde() {
        let err = serde_json::from_str::<Vec<u8>>("{").unwrap_err();
        let load = LoadError::Data(err);
        assert!(load.to_string().starts_with("Invalid table data:"));
    }
}
