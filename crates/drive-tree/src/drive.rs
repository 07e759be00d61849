//! The drive: items, selection and the cached display layout in one place
//!
//! Every mutating call finishes rebuilding the layout before it returns, so
//! code that runs right after a move (for example, to highlight the moved
//! item) always sees the new positions.

use log::{debug, info};

use crate::generator::generate_items_seeded;
use crate::moves::{MoveError, MoveOutcome, MoveRequest};
use crate::selection::Selection;
use crate::tree::{ItemId, ItemStore};

/// An owned row of the cached layout
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlatRow {
    /// Item shown on this row
    pub id: ItemId,
    /// Nesting level, top level items are 0
    pub depth: usize,
    /// Whether the item currently has children
    pub has_children: bool,
}

/// Items, selection and layout kept consistent with each other
///
/// The type holds no interior mutability. Callers sharing it between threads
/// should put it behind a `Mutex`, which then covers the store update and the
/// layout rebuild together.
#[derive(Debug, Clone, Default)]
pub struct Drive {
    store: ItemStore,
    selection: Selection,
    rows: Vec<FlatRow>,
}

impl Drive {
    /// Create a drive over an existing store
    pub fn new(store: ItemStore) -> Self {
        let mut drive = Self {
            store,
            selection: Selection::new(),
            rows: Vec::new(),
        };
        drive.relayout();
        drive
    }

    /// Create a drive filled with `count` generated items
    pub fn generate(count: usize, seed: u64) -> Self {
        info!("Seeding drive with {} items (seed {})", count, seed);
        Self::new(generate_items_seeded(count, seed))
    }

    /// Read access to the items
    pub fn store(&self) -> &ItemStore {
        &self.store
    }

    /// The current selection
    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// The layout in display order
    pub fn rows(&self) -> &[FlatRow] {
        &self.rows
    }

    /// Row index of an item in the current layout
    pub fn position_of(&self, id: &ItemId) -> Option<usize> {
        self.rows.iter().position(|row| &row.id == id)
    }

    /// Nesting level of an item in the current layout
    pub fn depth_of(&self, id: &ItemId) -> Option<usize> {
        self.position_of(id).map(|pos| self.rows[pos].depth)
    }

    /// Select or deselect an item, see [`Selection::set_selected`]
    pub fn set_selected(&mut self, id: impl Into<ItemId>, selected: bool) -> bool {
        self.selection.set_selected(id, selected)
    }

    /// Switch multi-select mode, clearing the selection
    pub fn toggle_multi_select_mode(&mut self, on: bool) {
        self.selection.toggle_multi_select_mode(on);
    }

    /// Deselect everything
    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    /// Move `source` and the current selection under `target`
    ///
    /// When this returns `Ok`, the store, the cleared selection and the
    /// layout all reflect the move.
    pub fn apply_move(
        &mut self,
        target: Option<ItemId>,
        source: impl Into<ItemId>,
    ) -> Result<MoveOutcome, MoveError> {
        let request = MoveRequest::from_selection(target, source, &self.selection);
        self.apply(&request)
    }

    /// Apply an explicit request, ignoring the tracked selection's contents
    ///
    /// The tracked selection is still cleared on success.
    pub fn apply(&mut self, request: &MoveRequest) -> Result<MoveOutcome, MoveError> {
        let outcome = self.store.apply_move(request, &mut self.selection)?;
        self.relayout();
        Ok(outcome)
    }

    fn relayout(&mut self) {
        self.rows = self
            .store
            .flatten()
            .into_iter()
            .map(|entry| FlatRow {
                id: entry.id().clone(),
                depth: entry.depth,
                has_children: entry.has_children,
            })
            .collect();
        debug!("Layout rebuilt with {} rows", self.rows.len());
    }
}
