//! Clipboard access for copy icons.

use thiserror::Error;

use crate::cell::CellValue;

/// Errors a clipboard can report.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClipboardError {
    /// The host refused access.
    #[error("Clipboard access denied")]
    Denied,

    /// No clipboard is available.
    #[error("Clipboard unavailable: {0}")]
    Unavailable(String),
}

/// A sink for copied text, implemented by the host.
pub trait Clipboard: Send {
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError>;
}

/// Text written by a copy action: `property - value`, or the value alone.
pub fn copy_output(property: &str, value: &CellValue, with_property: bool) -> String {
    if with_property {
        format!("{} - {}", property, value)
    } else {
        value.to_string()
    }
}

/// In-memory clipboard, keeping everything written to it.
#[derive(Debug, Clone, Default)]
pub struct MemoryClipboard {
    history: Vec<String>,
    denied: bool,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// A clipboard that refuses every write.
    pub fn denied() -> Self {
        Self {
            denied: true,
            ..Default::default()
        }
    }

    /// The last text written.
    pub fn contents(&self) -> Option<&str> {
        self.history.last().map(String::as_str)
    }

    /// Every text written, oldest first.
    pub fn history(&self) -> &[String] {
        &self.history
    }
}

impl Clipboard for MemoryClipboard {
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        if self.denied {
            return Err(ClipboardError::Denied);
        }
        self.history.push(text.to_string());
        Ok(())
    }
}
