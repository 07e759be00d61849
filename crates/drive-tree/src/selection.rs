//! Selected items and the multi-select mode flag

use indexmap::IndexSet;
use log::debug;

use crate::tree::ItemId;

/// Which items are currently selected
///
/// Outside multi-select mode at most one item can be selected. Ids iterate in
/// the order they were selected.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    ids: IndexSet<ItemId>,
    multi_select: bool,
}

impl Selection {
    /// Create an empty selection with multi-select mode off
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether multi-select mode is on
    pub fn is_multi_select(&self) -> bool {
        self.multi_select
    }

    /// Switch multi-select mode
    ///
    /// Always clears the selection, even when the mode does not change.
    pub fn toggle_multi_select_mode(&mut self, on: bool) {
        debug!("Multi-select mode {}", if on { "on" } else { "off" });
        self.ids.clear();
        self.multi_select = on;
    }

    /// Select or deselect a single item
    ///
    /// Returns whether the selection changed. Outside multi-select mode,
    /// selecting an item while another one is selected is refused.
    pub fn set_selected(&mut self, id: impl Into<ItemId>, selected: bool) -> bool {
        let id = id.into();
        if !selected {
            return self.ids.shift_remove(&id);
        }
        if !self.multi_select && self.ids.iter().any(|current| *current != id) {
            debug!("Refusing to select {}: multi-select mode is off", id);
            return false;
        }
        self.ids.insert(id)
    }

    /// Deselect everything
    pub fn clear(&mut self) {
        self.ids.clear();
    }

    /// Whether an item is selected
    pub fn is_selected(&self, id: &ItemId) -> bool {
        self.ids.contains(id)
    }

    /// Number of selected items
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Returns true if nothing is selected
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Iterate over the selected ids in selection order
    pub fn iter(&self) -> impl Iterator<Item = &ItemId> {
        self.ids.iter()
    }
}
