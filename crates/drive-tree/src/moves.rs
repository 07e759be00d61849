//! Validating and applying reparent requests
//!
//! A move takes a primary source, the current selection and a target parent.
//! The moving set is the selection plus the source. Every guard runs before
//! the first parent link is rewritten, so a rejected move leaves the store and
//! the selection exactly as they were.

use derive_more::Display;
use indexmap::IndexSet;
use log::debug;

use crate::selection::Selection;
use crate::tree::{Hierarchy, ItemId, ItemStore};

/// Broad class of a move failure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum ErrorKind {
    /// The source, a selected item or the target does not exist
    #[display(fmt = "not found")]
    NotFound,
    /// The move would drop items onto themselves or under their own subtree
    #[display(fmt = "invalid move")]
    InvalidMove,
}

/// Why a move was rejected
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum MoveError {
    /// A member of the moving set does not exist
    #[display(fmt = "source item {} not found", id)]
    SourceNotFound { id: ItemId },
    /// The target parent does not exist
    #[display(fmt = "target item {} not found", id)]
    TargetNotFound { id: ItemId },
    /// The target is itself part of the moving set
    #[display(fmt = "cannot move item {} into itself", id)]
    NoOpSelf { id: ItemId },
    /// The target lies inside the subtree of a moving item
    #[display(fmt = "cannot move item {} into its own descendant {}", id, target)]
    CycleRejected { id: ItemId, target: ItemId },
}

impl MoveError {
    /// Classify the failure
    pub fn kind(&self) -> ErrorKind {
        match self {
            MoveError::SourceNotFound { .. } | MoveError::TargetNotFound { .. } => {
                ErrorKind::NotFound
            }
            MoveError::NoOpSelf { .. } | MoveError::CycleRejected { .. } => ErrorKind::InvalidMove,
        }
    }
}

impl std::error::Error for MoveError {}

/// A request to reparent the source and the selected items
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveRequest {
    /// New parent, `None` for the top level
    pub target: Option<ItemId>,
    /// The item being dragged
    pub source: ItemId,
    /// Additional selected items moving along with the source
    pub selected: Vec<ItemId>,
}

impl MoveRequest {
    /// Move a single item
    pub fn new(target: Option<ItemId>, source: impl Into<ItemId>) -> Self {
        Self {
            target,
            source: source.into(),
            selected: Vec::new(),
        }
    }

    /// Move the source together with everything currently selected
    pub fn from_selection(
        target: Option<ItemId>,
        source: impl Into<ItemId>,
        selection: &Selection,
    ) -> Self {
        Self {
            target,
            source: source.into(),
            selected: selection.iter().cloned().collect(),
        }
    }

    /// Add selected items to the request
    pub fn with_selected<I, T>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<ItemId>,
    {
        self.selected.extend(ids.into_iter().map(Into::into));
        self
    }

    /// The selection plus the source, without duplicates
    pub fn moving_set(&self) -> IndexSet<&ItemId> {
        self.selected
            .iter()
            .chain(std::iter::once(&self.source))
            .collect()
    }
}

/// Result of a successful move
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveOutcome {
    /// Items whose parent was rewritten, in store order
    pub moved: Vec<ItemId>,
    /// Their new parent, `None` for the top level
    pub target: Option<ItemId>,
}

impl ItemStore {
    /// Check a move against the current tree without applying it
    pub fn validate_move(&self, request: &MoveRequest) -> Result<(), MoveError> {
        let moving = request.moving_set();

        if let Some(target) = &request.target {
            if moving.contains(target) {
                return Err(MoveError::NoOpSelf { id: target.clone() });
            }

            // The target's ancestor chain must not pass through a moving item
            if let Some(ancestor) = self
                .ancestors(target)
                .into_iter()
                .find(|ancestor| moving.contains(ancestor))
            {
                return Err(MoveError::CycleRejected {
                    id: ancestor,
                    target: target.clone(),
                });
            }
        }

        if !self.contains(&request.source) {
            return Err(MoveError::SourceNotFound {
                id: request.source.clone(),
            });
        }
        if let Some(missing) = request.selected.iter().find(|id| !self.contains(id)) {
            return Err(MoveError::SourceNotFound {
                id: missing.clone(),
            });
        }
        if let Some(target) = &request.target {
            if !self.contains(target) {
                return Err(MoveError::TargetNotFound { id: target.clone() });
            }
        }

        Ok(())
    }

    /// Validate and apply a move
    ///
    /// On success every member of the moving set points at the target and the
    /// selection is cleared. On failure nothing changes.
    ///
    /// # Example
    ///
    /// ```
    /// use drive_tree::prelude::*;
    ///
    /// let mut store = ItemStore::from_items(vec![
    ///     Item::folder(1, "a"),
    ///     Item::file(2, "b").with_parent(1),
    /// ])
    /// .unwrap();
    /// let mut selection = Selection::new();
    ///
    /// let outcome = store
    ///     .apply_move(&MoveRequest::new(None, 2), &mut selection)
    ///     .unwrap();
    /// assert_eq!(outcome.moved, vec![ItemId::from(2)]);
    /// assert!(store.get(&ItemId::from(2)).unwrap().is_root());
    /// ```
    pub fn apply_move(
        &mut self,
        request: &MoveRequest,
        selection: &mut Selection,
    ) -> Result<MoveOutcome, MoveError> {
        self.validate_move(request)?;

        let mut slots: Vec<usize> = request
            .moving_set()
            .into_iter()
            .filter_map(|id| self.slot(id))
            .collect();
        slots.sort_unstable();

        for &slot in &slots {
            self.set_parent(slot, request.target.clone());
        }
        selection.clear();

        let moved: Vec<ItemId> = slots
            .into_iter()
            .map(|slot| self.items()[slot].id.clone())
            .collect();
        debug!(
            "Moved {} items to {}",
            moved.len(),
            request
                .target
                .as_ref()
                .map_or_else(|| "the top level".to_string(), |id| format!("item {}", id))
        );

        Ok(MoveOutcome {
            moved,
            target: request.target.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::Item;
    use pretty_assertions::assert_eq;

    fn id(n: u32) -> ItemId {
        ItemId::from(n)
    }

    fn sample() -> ItemStore {
        ItemStore::from_items(vec![
            Item::folder(1, "a"),
            Item::folder(2, "b").with_parent(1),
            Item::file(3, "c").with_parent(2),
            Item::folder(4, "d"),
        ])
        .unwrap()
    }

    #[test]
    fn test_moving_set_dedups_source() {
        let request = MoveRequest::new(None, 1).with_selected([2, 1]);
        let set: Vec<_> = request.moving_set().into_iter().cloned().collect();
        assert_eq!(set, vec![id(2), id(1)]);
    }

    #[test]
    fn test_guard_order() {
        let store = sample();

        // Self drop wins over existence
        let err = store
            .validate_move(&MoveRequest::new(Some(id(9)), 9))
            .unwrap_err();
        assert_eq!(err, MoveError::NoOpSelf { id: id(9) });

        // Cycle wins over a missing selected item
        let err = store
            .validate_move(&MoveRequest::new(Some(id(3)), 1).with_selected([77]))
            .unwrap_err();
        assert_eq!(
            err,
            MoveError::CycleRejected {
                id: id(1),
                target: id(3)
            }
        );
    }

    #[test]
    fn test_not_found() {
        let store = sample();

        assert_eq!(
            store.validate_move(&MoveRequest::new(Some(id(4)), 99)),
            Err(MoveError::SourceNotFound { id: id(99) })
        );
        assert_eq!(
            store.validate_move(&MoveRequest::new(Some(id(4)), 3).with_selected([98])),
            Err(MoveError::SourceNotFound { id: id(98) })
        );
        assert_eq!(
            store.validate_move(&MoveRequest::new(Some(id(42)), 3)),
            Err(MoveError::TargetNotFound { id: id(42) })
        );
        assert_eq!(
            MoveError::TargetNotFound { id: id(42) }.kind(),
            ErrorKind::NotFound
        );
    }

    #[test]
    fn test_cycle_through_selected_item() {
        let mut store = sample();
        let before = store.clone();
        let mut selection = Selection::new();
        selection.toggle_multi_select_mode(true);
        selection.set_selected(2, true);

        let request = MoveRequest::from_selection(Some(id(3)), 4, &selection);
        let err = store.apply_move(&request, &mut selection).unwrap_err();

        assert_eq!(err.kind(), ErrorKind::InvalidMove);
        assert_eq!(store, before);
        assert!(selection.is_selected(&id(2)));
    }

    #[test]
    fn test_apply_clears_selection() {
        let mut store = sample();
        let mut selection = Selection::new();
        selection.set_selected(3, true);

        let request = MoveRequest::from_selection(Some(id(4)), 2, &selection);
        let outcome = store.apply_move(&request, &mut selection).unwrap();

        assert_eq!(outcome.moved, vec![id(2), id(3)]);
        assert_eq!(outcome.target, Some(id(4)));
        assert!(selection.is_empty());
        assert_eq!(store.parent(&id(2)), Some(&id(4)));
        assert_eq!(store.parent(&id(3)), Some(&id(4)));
    }

    #[test]
    fn test_move_in_place_succeeds() {
        let mut store = sample();
        let before = store.clone();
        let mut selection = Selection::new();

        let outcome = store
            .apply_move(&MoveRequest::new(Some(id(1)), 2), &mut selection)
            .unwrap();
        assert_eq!(outcome.moved, vec![id(2)]);
        assert_eq!(store, before);
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            MoveError::CycleRejected {
                id: id(1),
                target: id(3)
            }
            .to_string(),
            "cannot move item 1 into its own descendant 3"
        );
        assert_eq!(
            MoveError::NoOpSelf { id: id(5) }.to_string(),
            "cannot move item 5 into itself"
        );
    }
}
