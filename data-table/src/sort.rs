//! Row sorting by column value.

use std::cmp::Ordering;
use std::collections::HashMap;

use crate::cell::CellValue;
use crate::order::RenderOrder;
use crate::tree::RowTree;

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Ascending order (nulls first, then A-Z, 0-9).
    Asc,
    /// Descending order (the ascending result, reversed).
    Desc,
}

impl Direction {
    /// The other direction.
    pub fn flip(self) -> Self {
        match self {
            Direction::Asc => Direction::Desc,
            Direction::Desc => Direction::Asc,
        }
    }

    /// Whether the ascending result has to be reversed.
    pub fn is_inverted(self) -> bool {
        self == Direction::Desc
    }
}

/// Compare two cell values in ascending order.
///
/// Null sorts before any defined value. Values of the same kind compare
/// natively; values of different kinds compare by their display text.
pub fn compare_values(a: &CellValue, b: &CellValue) -> Ordering {
    match (a, b) {
        (CellValue::Null, CellValue::Null) => Ordering::Equal,
        (CellValue::Null, _) => Ordering::Less,
        (_, CellValue::Null) => Ordering::Greater,
        (CellValue::Number(x), CellValue::Number(y)) => x.total_cmp(y),
        (CellValue::Bool(x), CellValue::Bool(y)) => x.cmp(y),
        (CellValue::Text(x), CellValue::Text(y)) => x.cmp(y),
        _ => a.to_string().cmp(&b.to_string()),
    }
}

/// Stable sort of `(id, value)` pairs, returning the IDs.
///
/// When `inverted`, the sorted sequence is reversed as a whole, so ties
/// appear in mirrored input order.
pub fn sort_by_value(mut entries: Vec<(String, CellValue)>, inverted: bool) -> Vec<String> {
    entries.sort_by(|(_, a), (_, b)| compare_values(a, b));
    if inverted {
        entries.reverse();
    }
    entries.into_iter().map(|(id, _)| id).collect()
}

/// Order top-level rows by the value of `property`.
///
/// Rows are taken in their current order (the base row order, then any
/// rows not tracked yet). A row without the property sorts as null.
pub fn sort_rows(tree: &RowTree, rows: &RenderOrder, property: &str, inverted: bool) -> Vec<String> {
    let mut ids: Vec<&str> = rows
        .base_order()
        .iter()
        .map(String::as_str)
        .filter(|id| tree.find(id).is_some_and(|n| tree.parent(n).is_none()))
        .collect();
    for &root in tree.roots() {
        if let Some(row) = tree.get(root) {
            if !ids.contains(&row.id.as_str()) {
                ids.push(&row.id);
            }
        }
    }

    let entries = ids
        .into_iter()
        .map(|id| {
            let value = tree
                .find(id)
                .and_then(|n| tree.get(n))
                .and_then(|row| row.value_of(property))
                .cloned()
                .unwrap_or_default();
            (id.to_string(), value)
        })
        .collect();

    sort_by_value(entries, inverted)
}

/// Last sort direction used from each column's sort icon.
#[derive(Debug, Clone, Default)]
pub struct SortMemory {
    last: HashMap<String, Direction>,
}

impl SortMemory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Direction last used for a column.
    pub fn get(&self, property: &str) -> Option<Direction> {
        self.last.get(property).copied()
    }

    /// Record an icon activation and return the direction to sort in.
    ///
    /// The first activation sorts ascending; each further one flips.
    pub fn advance(&mut self, property: &str) -> Direction {
        let next = match self.get(property) {
            Some(last) => last.flip(),
            None => Direction::Asc,
        };
        self.last.insert(property.to_string(), next);
        next
    }

    pub fn clear(&mut self) {
        self.last.clear();
    }
}
