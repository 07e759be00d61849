//! Arena backed item store
//!
//! The store is the single owner of [`Item`] records. Items live in a `Vec` in
//! insertion order, which is also the sibling order of the derived tree, and an
//! id index gives constant time lookups. Nested views are re-derived with
//! [`build`](crate::tree::build) and never stored.

use derive_more::Display;
use log::trace;
use std::collections::HashMap;

use crate::tree::{build, flatten, FlatEntry, Hierarchy, Item, ItemId, TreeNode};

/// Reasons a record can not enter the store
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum StoreError {
    /// Another item already uses this id
    #[display(fmt = "duplicate item id {}", id)]
    DuplicateId { id: ItemId },
    /// The item points at a parent that does not exist
    #[display(fmt = "item {} references missing parent {}", id, parent_id)]
    DanglingParent { id: ItemId, parent_id: ItemId },
    /// The item is its own ancestor
    #[display(fmt = "item {} is part of a parent cycle", id)]
    Cycle { id: ItemId },
}

impl std::error::Error for StoreError {}

/// The set of items making up a drive
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemStore {
    /// Arena storage, insertion order
    items: Vec<Item>,
    /// id -> slot in `items`
    index: HashMap<ItemId, usize>,
}

impl ItemStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store from a batch of items
    ///
    /// Parents may appear after their children in the batch; the batch is
    /// checked as a whole.
    ///
    /// # Errors
    ///
    /// Returns an error if ids collide, a parent is missing, or the parent
    /// links form a cycle.
    pub fn from_items(items: impl IntoIterator<Item = Item>) -> Result<Self, StoreError> {
        let mut store = Self::new();
        for item in items {
            if store.index.contains_key(&item.id) {
                return Err(StoreError::DuplicateId { id: item.id });
            }
            store.index.insert(item.id.clone(), store.items.len());
            store.items.push(item);
        }

        for item in &store.items {
            if let Some(parent_id) = &item.parent_id {
                if !store.index.contains_key(parent_id) {
                    return Err(StoreError::DanglingParent {
                        id: item.id.clone(),
                        parent_id: parent_id.clone(),
                    });
                }
            }
        }

        if let Some(slot) = store.find_cycle() {
            return Err(StoreError::Cycle {
                id: store.items[slot].id.clone(),
            });
        }

        trace!("Created item store with {} items", store.items.len());
        Ok(store)
    }

    /// Append a single item
    ///
    /// The parent, if any, must already be in the store.
    pub fn insert(&mut self, item: Item) -> Result<(), StoreError> {
        if self.index.contains_key(&item.id) {
            return Err(StoreError::DuplicateId { id: item.id });
        }
        if let Some(parent_id) = &item.parent_id {
            if !self.index.contains_key(parent_id) {
                return Err(StoreError::DanglingParent {
                    id: item.id.clone(),
                    parent_id: parent_id.clone(),
                });
            }
        }

        self.index.insert(item.id.clone(), self.items.len());
        self.items.push(item);
        Ok(())
    }

    /// All items in insertion order
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// Iterate over items in insertion order
    pub fn iter(&self) -> std::slice::Iter<'_, Item> {
        self.items.iter()
    }

    /// Build the nested view of the store
    pub fn build(&self) -> Vec<TreeNode<'_>> {
        build(&self.items)
    }

    /// Build and flatten the store into display order
    pub fn flatten(&self) -> Vec<FlatEntry<'_>> {
        flatten(&self.build())
    }

    /// Find a slot whose parent chain loops back on itself
    ///
    /// Every slot is walked at most once; a walk stops at the first slot that
    /// is already known to reach a root. Parents must all be present.
    fn find_cycle(&self) -> Option<usize> {
        const UNSEEN: u8 = 0;
        const ON_PATH: u8 = 1;
        const DONE: u8 = 2;

        let mut state = vec![UNSEEN; self.items.len()];
        let mut path = Vec::new();
        for start in 0..self.items.len() {
            let mut slot = Some(start);
            while let Some(current) = slot {
                match state[current] {
                    DONE => break,
                    ON_PATH => return Some(current),
                    _ => {}
                }
                state[current] = ON_PATH;
                path.push(current);
                slot = self.items[current]
                    .parent_id
                    .as_ref()
                    .and_then(|parent_id| self.slot(parent_id));
            }
            for visited in path.drain(..) {
                state[visited] = DONE;
            }
        }
        None
    }

    pub(crate) fn slot(&self, id: &ItemId) -> Option<usize> {
        self.index.get(id).copied()
    }

    /// Rewrite the parent of the item in `slot`
    ///
    /// Only the move engine calls this, after validating the whole move.
    pub(crate) fn set_parent(&mut self, slot: usize, parent_id: Option<ItemId>) {
        self.items[slot].parent_id = parent_id;
    }
}

impl Hierarchy for ItemStore {
    fn get(&self, id: &ItemId) -> Option<&Item> {
        self.slot(id).map(|slot| &self.items[slot])
    }

    fn len(&self) -> usize {
        self.items.len()
    }
}

impl<'a> IntoIterator for &'a ItemStore {
    type Item = &'a Item;
    type IntoIter = std::slice::Iter<'a, Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
