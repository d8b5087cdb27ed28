//! Row and column ordering state.
//!
//! Each axis keeps a default order, an optional custom order and a list of
//! hidden IDs. The custom order wins when present; hidden IDs are filtered
//! out of the rendered sequence but stay in both order arrays.

use indexmap::IndexSet;

use crate::config::{OrderConf, RenderOrderConf};

/// Ordering state of one axis.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderOrder {
    default_order: Vec<String>,
    custom_order: Option<Vec<String>>,
    hidden_ids: IndexSet<String>,
    /// The default order was supplied by the caller rather than derived.
    default_is_external: bool,
}

impl RenderOrder {
    /// Create an empty order. The default order will be derived from data.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create from configuration.
    ///
    /// A non-empty `default_order` is treated as caller-supplied. An empty
    /// custom order is the same as none.
    pub fn from_conf(conf: &OrderConf) -> Self {
        let mut order = Self {
            default_order: dedup(conf.default_order.clone()),
            custom_order: None,
            hidden_ids: conf.hidden_ids.iter().cloned().collect(),
            default_is_external: !conf.default_order.is_empty(),
        };
        order.set_custom_order(conf.custom_order.clone());
        order
    }

    /// Configuration form of the current state.
    pub fn to_conf(&self) -> OrderConf {
        OrderConf {
            default_order: self.default_order.clone(),
            custom_order: self.custom_order.clone(),
            hidden_ids: self.hidden_ids.iter().cloned().collect(),
        }
    }

    // -------------------------------------------------------------------------
    // Queries
    // -------------------------------------------------------------------------

    pub fn default_order(&self) -> &[String] {
        &self.default_order
    }

    pub fn custom_order(&self) -> Option<&[String]> {
        self.custom_order.as_deref()
    }

    /// Hidden IDs in the order they were hidden.
    pub fn hidden_ids(&self) -> &IndexSet<String> {
        &self.hidden_ids
    }

    /// Whether the default order came from the caller.
    pub fn is_default_external(&self) -> bool {
        self.default_is_external
    }

    /// The custom order if set, else the default order. Includes hidden IDs.
    pub fn base_order(&self) -> &[String] {
        match &self.custom_order {
            Some(custom) if !custom.is_empty() => custom,
            _ => &self.default_order,
        }
    }

    /// The order to render in: [`base_order`](Self::base_order) minus hidden IDs.
    pub fn effective(&self) -> Vec<String> {
        self.base_order()
            .iter()
            .filter(|id| !self.is_hidden(id))
            .cloned()
            .collect()
    }

    /// Check if an ID is hidden.
    pub fn is_hidden(&self, id: &str) -> bool {
        self.hidden_ids.contains(id)
    }

    /// Position of an ID in the base order.
    pub fn position(&self, id: &str) -> Option<usize> {
        self.base_order().iter().position(|o| o == id)
    }

    /// Check if an ID is tracked by the default order.
    pub fn contains(&self, id: &str) -> bool {
        self.default_order.iter().any(|o| o == id)
    }

    // -------------------------------------------------------------------------
    // Mutations
    // -------------------------------------------------------------------------

    /// Replace the custom order wholesale.
    ///
    /// `None` (or an empty order) clears it, so the default order applies
    /// again. Duplicate IDs keep their first position.
    pub fn set_custom_order(&mut self, ids: Option<Vec<String>>) {
        self.custom_order = ids.map(dedup).filter(|ids| !ids.is_empty());
    }

    /// Hide a visible ID or show a hidden one.
    ///
    /// Returns `true` if the ID is hidden afterwards.
    pub fn toggle_hidden(&mut self, id: &str) -> bool {
        if self.hidden_ids.shift_remove(id) {
            false
        } else {
            self.hidden_ids.insert(id.to_string())
        }
    }

    /// Track an ID seen while walking the data.
    ///
    /// Unseen IDs are appended to the default order, and to the custom order
    /// when one is set. Returns `true` if the ID was new.
    pub fn observe(&mut self, id: &str) -> bool {
        self.observe_before(id, &[])
    }

    /// Like [`observe`](Self::observe), but new IDs are inserted in front of
    /// the first `fence` ID already present.
    pub fn observe_before(&mut self, id: &str, fence: &[&str]) -> bool {
        let added = insert_before(&mut self.default_order, id, fence);
        if let Some(custom) = self.custom_order.as_mut() {
            insert_before(custom, id, fence);
        }
        added
    }

    /// Append an ID at the end of both orders, once.
    pub fn append_trailing(&mut self, id: &str) {
        if !self.default_order.iter().any(|o| o == id) {
            self.default_order.push(id.to_string());
        }
        if let Some(custom) = self.custom_order.as_mut() {
            if !custom.iter().any(|o| o == id) {
                custom.push(id.to_string());
            }
        }
    }

    /// Forget data-derived state before a dataset replacement.
    ///
    /// Drops the custom order; clears the default order unless the caller
    /// supplied it.
    pub fn reset_derived(&mut self) {
        self.custom_order = None;
        if !self.default_is_external {
            self.default_order.clear();
        }
    }
}

fn insert_before(order: &mut Vec<String>, id: &str, fence: &[&str]) -> bool {
    if order.iter().any(|o| o == id) {
        return false;
    }
    match order.iter().position(|o| fence.contains(&o.as_str())) {
        Some(index) => order.insert(index, id.to_string()),
        None => order.push(id.to_string()),
    }
    true
}

fn dedup(ids: Vec<String>) -> Vec<String> {
    ids.into_iter().collect::<IndexSet<_>>().into_iter().collect()
}

/// Ordering state of a table: rows and columns, tracked independently.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderTracker {
    pub rows: RenderOrder,
    pub columns: RenderOrder,
}

impl OrderTracker {
    pub fn from_conf(conf: &RenderOrderConf) -> Self {
        Self {
            rows: RenderOrder::from_conf(&conf.rows),
            columns: RenderOrder::from_conf(&conf.columns),
        }
    }

    pub fn to_conf(&self) -> RenderOrderConf {
        RenderOrderConf {
            rows: self.rows.to_conf(),
            columns: self.columns.to_conf(),
        }
    }
}
