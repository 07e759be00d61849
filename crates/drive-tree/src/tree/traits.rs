//! Parent-link queries shared by anything that stores items by id

use crate::tree::{Item, ItemId};

/// A forest of items linked by parent ids
///
/// Implementations only provide lookups; ancestry queries are derived by
/// following `parent_id` links. Every walk is bounded by [`Hierarchy::len`]
/// so a corrupted parent chain terminates instead of looping.
///
/// # Example
///
/// ```
/// use drive_tree::prelude::*;
///
/// let store = ItemStore::from_items(vec![
///     Item::folder(1, "Photos"),
///     Item::folder(2, "2024").with_parent(1),
///     Item::file(3, "beach.jpg").with_parent(2),
/// ])
/// .unwrap();
///
/// assert_eq!(store.depth(&ItemId::from(3)), 2);
/// assert!(store.is_ancestor_of(&ItemId::from(1), &ItemId::from(3)));
/// ```
pub trait Hierarchy {
    /// Get an item by its id
    ///
    /// Returns `None` if the id is unknown.
    fn get(&self, id: &ItemId) -> Option<&Item>;

    /// Count items
    fn len(&self) -> usize;

    /// Returns true if there are no items
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Check whether an item exists
    fn contains(&self, id: &ItemId) -> bool {
        self.get(id).is_some()
    }

    /// Get the parent of an item
    ///
    /// Returns `None` for top level items, unknown ids and dangling parents.
    fn parent(&self, id: &ItemId) -> Option<&ItemId> {
        let parent = self.get(id)?.parent_id.as_ref()?;
        self.get(parent).map(|p| &p.id)
    }

    /// Get the name of an item
    fn name(&self, id: &ItemId) -> Option<&str> {
        self.get(id).map(|item| item.name.as_str())
    }

    /// Get all ancestors of an item, from parent to top level
    ///
    /// Returns an empty vector for top level items or unknown ids.
    fn ancestors(&self, id: &ItemId) -> Vec<ItemId> {
        let mut ancestors = Vec::new();
        let mut current = self.parent(id);
        while let Some(parent_id) = current {
            if ancestors.len() >= self.len() {
                break;
            }
            ancestors.push(parent_id.clone());
            current = self.parent(parent_id);
        }
        ancestors
    }

    /// Get the depth of an item (top level = 0)
    ///
    /// Returns 0 for unknown ids.
    fn depth(&self, id: &ItemId) -> usize {
        self.ancestors(id).len()
    }

    /// Check if `ancestor` is a strict ancestor of `descendant`
    fn is_ancestor_of(&self, ancestor: &ItemId, descendant: &ItemId) -> bool {
        let mut steps = 0;
        let mut current = self.parent(descendant);
        while let Some(parent_id) = current {
            if parent_id == ancestor {
                return true;
            }
            steps += 1;
            if steps > self.len() {
                break;
            }
            current = self.parent(parent_id);
        }
        false
    }

    /// Get the display path of an item, names joined by `/`
    ///
    /// Returns an empty string for unknown ids.
    fn path(&self, id: &ItemId) -> String {
        let Some(item) = self.get(id) else {
            return String::new();
        };
        let mut components: Vec<&str> = self
            .ancestors(id)
            .iter()
            .filter_map(|ancestor| self.name(ancestor))
            .collect();
        components.reverse();
        components.push(item.name.as_str());
        components.join("/")
    }
}
