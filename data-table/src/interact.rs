//! Icon activations reported by the Renderer.
//!
//! The Renderer reports which icon of which cell the user activated. The
//! table resolves the cell in its last rendered layout, picks the matching
//! [`Affordance`] and runs its handler, or the built-in behavior when the
//! host supplied none. Handlers always run with the table unlocked, so they
//! are free to call back into the table.

use std::fmt;
use std::sync::atomic::Ordering;

use crate::clipboard::{Clipboard, copy_output};
use crate::error::Diagnostic;
use crate::handler::{Handler, HandlerContext};
use crate::render::{Affordance, RenderedCell};
use crate::table::Table;

/// Icon the user activated on a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Icon {
    Copy,
    Sort,
    Drag,
    /// The cell's main content: alert, chevron, cog or three-dots button.
    Content,
}

impl Icon {
    fn accepts(&self, affordance: &Affordance) -> bool {
        match self {
            Icon::Copy => matches!(affordance, Affordance::Copy { .. }),
            Icon::Sort => matches!(affordance, Affordance::Sort { .. }),
            Icon::Drag => matches!(affordance, Affordance::Drag { .. }),
            Icon::Content => matches!(
                affordance,
                Affordance::Alert { .. }
                    | Affordance::Chevron { .. }
                    | Affordance::Settings { .. }
                    | Affordance::ThreeDots { .. }
            ),
        }
    }
}

impl fmt::Display for Icon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Icon::Copy => "copy",
            Icon::Sort => "sort",
            Icon::Drag => "drag",
            Icon::Content => "content",
        };
        f.write_str(name)
    }
}

/// Result of an icon activation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventResult {
    /// Nothing happened.
    Ignored,
    /// The activation was handled.
    Consumed,
    /// A drag handle without a handler was activated; the host drives the
    /// drag and finishes it with [`Table::reorder_columns`].
    StartDrag,
}

impl EventResult {
    /// Check if the activation was handled (consumed or started a drag).
    pub fn is_handled(&self) -> bool {
        !matches!(self, EventResult::Ignored)
    }
}

/// The parts of a rendered cell an activation needs, copied out of the lock.
struct Target {
    cx: HandlerContext,
    cell: RenderedCell,
}

impl Table {
    /// Handle an icon activation on a cell.
    ///
    /// Unknown cells and icons the cell does not carry are recorded as
    /// diagnostics and ignored.
    pub fn activate(&self, cell_id: &str, icon: Icon) -> EventResult {
        let Some(target) = self.target(cell_id) else {
            return EventResult::Ignored;
        };
        let Some(affordance) = target.cell.affordance(|a| icon.accepts(a)).cloned() else {
            self.diagnose(Diagnostic::UnsupportedIcon {
                cell_id: cell_id.to_string(),
                icon: icon.to_string(),
            });
            return EventResult::Ignored;
        };
        log::debug!("Activating {} on cell '{}'", affordance.name(), cell_id);

        match affordance {
            Affordance::Copy {
                handler: Some(handler),
                ..
            } => call(&handler, &target.cx),
            Affordance::Copy {
                handler: None,
                with_property,
            } => self.copy_to_installed(&target.cell, with_property),
            Affordance::Sort {
                handler: Some(handler),
            } => call(&handler, &target.cx),
            Affordance::Sort { handler: None } => self.sort_from_icon(&target.cell.property),
            Affordance::Drag {
                handler: Some(handler),
            } => call(&handler, &target.cx),
            Affordance::Drag { handler: None } => EventResult::StartDrag,
            Affordance::Chevron { action, .. } => {
                if let Some(pre) = &action.pre {
                    pre.call(&target.cx);
                }
                if action.default_toggle {
                    if let Ok(mut guard) = self.inner.write() {
                        guard.set_sub_rows_open(action.target, None);
                        self.dirty.store(true, Ordering::SeqCst);
                    }
                }
                if let Some(on) = &action.on {
                    on.call(&target.cx);
                }
                EventResult::Consumed
            }
            Affordance::Alert { handler }
            | Affordance::Settings { handler }
            | Affordance::ThreeDots { handler } => match handler {
                Some(handler) => call(&handler, &target.cx),
                None => EventResult::Ignored,
            },
        }
    }

    /// Copy a cell's value to a clipboard.
    ///
    /// Writes `property - value` when the cell asks for its property in copy
    /// output, else the value alone. A failing clipboard is recorded as a
    /// diagnostic.
    pub fn copy_cell(&self, cell_id: &str, clipboard: &mut dyn Clipboard) -> EventResult {
        let Some(target) = self.target(cell_id) else {
            return EventResult::Ignored;
        };
        let with_property = matches!(
            target.cell.affordance(|a| matches!(a, Affordance::Copy { .. })),
            Some(Affordance::Copy {
                with_property: true,
                ..
            })
        );
        self.write_copy(&target.cell, with_property, clipboard);
        EventResult::Consumed
    }

    /// Resolve a cell in the last rendered layout, rendering first if needed.
    fn target(&self, cell_id: &str) -> Option<Target> {
        let needs_render = self
            .inner
            .read()
            .map(|g| g.rendered.is_none())
            .unwrap_or(false);
        if needs_render {
            self.render();
        }

        let found = self.inner.read().ok().and_then(|guard| {
            let rendered = guard.rendered.as_ref()?;
            let (row, cell) = rendered.find_cell(cell_id)?;
            Some((row.id.clone(), cell.clone()))
        });
        match found {
            Some((row_id, cell)) => Some(Target {
                cx: HandlerContext {
                    table: self.clone(),
                    cell_id: cell.id.clone(),
                    property: cell.property.clone(),
                    row_id,
                },
                cell,
            }),
            None => {
                self.diagnose(Diagnostic::UnknownCell {
                    cell_id: cell_id.to_string(),
                });
                None
            }
        }
    }

    fn diagnose(&self, diagnostic: Diagnostic) {
        if let Ok(mut guard) = self.inner.write() {
            guard.diagnose(diagnostic);
        }
    }

    fn sort_from_icon(&self, property: &str) -> EventResult {
        if let Ok(mut guard) = self.inner.write() {
            let direction = guard.sort_memory.advance(property);
            guard.reorder_rows(property, direction.is_inverted());
            self.dirty.store(true, Ordering::SeqCst);
            return EventResult::Consumed;
        }
        EventResult::Ignored
    }

    fn copy_to_installed(&self, cell: &RenderedCell, with_property: bool) -> EventResult {
        let clipboard = self.inner.read().ok().and_then(|g| g.clipboard.clone());
        match clipboard {
            Some(shared) => match shared.0.lock() {
                Ok(mut clipboard) => self.write_copy(cell, with_property, &mut *clipboard),
                Err(_) => self.diagnose(Diagnostic::CopyFailed {
                    cell_id: cell.id.clone(),
                    reason: "clipboard lock poisoned".to_string(),
                }),
            },
            None => self.diagnose(Diagnostic::CopyFailed {
                cell_id: cell.id.clone(),
                reason: "no clipboard installed".to_string(),
            }),
        }
        EventResult::Consumed
    }

    fn write_copy(&self, cell: &RenderedCell, with_property: bool, clipboard: &mut dyn Clipboard) {
        let text = copy_output(&cell.property, &cell.value, with_property);
        match clipboard.write_text(&text) {
            Ok(()) => log::debug!("Copied cell '{}'", cell.id),
            Err(err) => self.diagnose(Diagnostic::CopyFailed {
                cell_id: cell.id.clone(),
                reason: err.to_string(),
            }),
        }
    }
}

fn call(handler: &Handler, cx: &HandlerContext) -> EventResult {
    handler.call(cx);
    EventResult::Consumed
}
