//! Arena holding the table's rows and their nesting.
//!
//! Rows handed to a table are flattened into a [`RowTree`]: every row,
//! top-level or nested, becomes a node addressed by a [`NodeId`]. Nodes keep
//! a parent link and their position among their siblings, so classifying a
//! sub-row as intermediate or last and updating a nested row are both O(1).

use std::collections::HashMap;

use crate::cell::CellEntry;
use crate::id::ensure_id;
use crate::row::Row;

/// Index of a row inside a [`RowTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    /// Raw arena index.
    pub fn index(&self) -> usize {
        self.0
    }
}

/// Position of a sub-row among its siblings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubRowPosition {
    /// Followed by another sibling.
    Intermediate,
    /// Final sibling.
    Last,
}

impl SubRowPosition {
    /// CSS class for this position.
    pub fn class(&self) -> &'static str {
        match self {
            SubRowPosition::Intermediate => "intermediate-subrow",
            SubRowPosition::Last => "last-subrow",
        }
    }
}

#[derive(Debug, Clone)]
struct RowNode {
    /// The row, with `sub_rows` moved into the arena.
    row: Row,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    position: Option<SubRowPosition>,
    depth: usize,
}

/// Flattened, ID-indexed storage for nested rows.
#[derive(Debug, Clone, Default)]
pub struct RowTree {
    nodes: Vec<RowNode>,
    roots: Vec<NodeId>,
    by_id: HashMap<String, NodeId>,
}

impl RowTree {
    /// Create an empty tree.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a tree from nested rows.
    ///
    /// Rows and cells without an ID receive a generated one. Preview slots
    /// get their parent ID filled in.
    pub fn from_rows(rows: Vec<Row>) -> Self {
        let mut tree = Self::new();
        for row in rows {
            let id = tree.insert(row, None, 0);
            tree.roots.push(id);
        }
        tree
    }

    fn insert(&mut self, mut row: Row, parent: Option<NodeId>, depth: usize) -> NodeId {
        assign_ids(&mut row);

        let sub_rows = std::mem::take(&mut row.sub_rows);
        let node_id = NodeId(self.nodes.len());
        if self.by_id.insert(row.id.clone(), node_id).is_some() {
            log::warn!("Duplicate row id '{}', lookups resolve to the latest row", row.id);
        }
        self.nodes.push(RowNode {
            row,
            parent,
            children: Vec::new(),
            position: None,
            depth,
        });

        let count = sub_rows.len();
        let mut children = Vec::with_capacity(count);
        for (index, sub_row) in sub_rows.into_iter().enumerate() {
            let child = self.insert(sub_row, Some(node_id), depth + 1);
            self.nodes[child.0].position = Some(if index + 1 == count {
                SubRowPosition::Last
            } else {
                SubRowPosition::Intermediate
            });
            children.push(child);
        }
        self.nodes[node_id.0].children = children;
        node_id
    }

    // -------------------------------------------------------------------------
    // Access
    // -------------------------------------------------------------------------

    /// Number of top-level rows.
    pub fn len(&self) -> usize {
        self.roots.len()
    }

    /// Check if there are no top-level rows.
    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    /// Top-level rows in data order.
    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    /// Top-level row at a data index.
    pub fn root(&self, index: usize) -> Option<NodeId> {
        self.roots.get(index).copied()
    }

    /// Look a row up by ID.
    pub fn find(&self, row_id: &str) -> Option<NodeId> {
        self.by_id.get(row_id).copied()
    }

    /// Get a row. Its `sub_rows` are empty; use [`children`](Self::children).
    pub fn get(&self, id: NodeId) -> Option<&Row> {
        self.nodes.get(id.0).map(|n| &n.row)
    }

    /// Get a mutable row.
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Row> {
        self.nodes.get_mut(id.0).map(|n| &mut n.row)
    }

    /// Sub-rows of a row, in order.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.nodes
            .get(id.0)
            .map(|n| n.children.as_slice())
            .unwrap_or(&[])
    }

    /// Whether a row has sub-rows.
    pub fn has_children(&self, id: NodeId) -> bool {
        !self.children(id).is_empty()
    }

    /// Parent of a sub-row.
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes.get(id.0).and_then(|n| n.parent)
    }

    /// Position of a sub-row among its siblings (`None` for top-level rows).
    pub fn position(&self, id: NodeId) -> Option<SubRowPosition> {
        self.nodes.get(id.0).and_then(|n| n.position)
    }

    /// Nesting depth (0 for top-level rows).
    pub fn depth(&self, id: NodeId) -> usize {
        self.nodes.get(id.0).map(|n| n.depth).unwrap_or(0)
    }

    /// Find a cell anywhere in the tree by its ID.
    pub fn find_cell_mut(&mut self, cell_id: &str) -> Option<&mut CellEntry> {
        self.nodes
            .iter_mut()
            .flat_map(|n| n.row.cells.values_mut())
            .find(|c| c.id == cell_id)
    }

    /// Find a cell anywhere in the tree by its ID.
    pub fn find_cell(&self, cell_id: &str) -> Option<&CellEntry> {
        self.nodes
            .iter()
            .flat_map(|n| n.row.cells.values())
            .find(|c| c.id == cell_id)
    }

    // -------------------------------------------------------------------------
    // Snapshot
    // -------------------------------------------------------------------------

    /// Rebuild the nested rows, including every change made through the tree.
    pub fn to_rows(&self) -> Vec<Row> {
        self.roots.iter().map(|&id| self.build_row(id)).collect()
    }

    fn build_row(&self, id: NodeId) -> Row {
        let node = &self.nodes[id.0];
        let mut row = node.row.clone();
        row.sub_rows = node.children.iter().map(|&c| self.build_row(c)).collect();
        row
    }
}

/// Give a row, its cells and its preview slot an ID where they lack one.
///
/// Sub-rows are not visited.
pub(crate) fn assign_ids(row: &mut Row) {
    ensure_id(&mut row.id);
    for cell in row.cells.values_mut() {
        ensure_id(&mut cell.id);
    }
    if let Some(preview) = row.preview_row.as_mut() {
        ensure_id(&mut preview.id);
        if preview.parent_id.is_empty() {
            preview.parent_id = row.id.clone();
        }
    }
}
