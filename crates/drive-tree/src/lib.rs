//! Drive Tree Library
//!
//! A library for keeping a virtual drive of folders and files as flat
//! parent-linked records, deriving the nested and flattened views used for
//! display, and moving one or many items to a new parent in a single step.
//!
//! # Core Concepts
//!
//! - **ItemStore**: the flat records, the single source of truth
//! - **build / flatten**: derived nested forest and display order
//! - **Selection**: selected items and the multi-select mode flag
//! - **Move engine**: validated, all-or-nothing reparenting
//! - **Drive**: store, selection and layout kept consistent together
//!
//! # Example
//!
//! ```
//! use drive_tree::prelude::*;
//!
//! let store = ItemStore::from_items(vec![
//!     Item::folder(1, "Documents"),
//!     Item::file(2, "cv.pdf").with_parent(1),
//!     Item::file(3, "notes.txt").with_parent(1),
//!     Item::folder(4, "Archive"),
//! ])
//! .unwrap();
//! let mut drive = Drive::new(store);
//!
//! // Move both files into the archive
//! drive.set_selected(3, true);
//! drive.apply_move(Some(ItemId::from(4)), 2).unwrap();
//!
//! let order: Vec<_> = drive.rows().iter().map(|row| row.id.as_str()).collect();
//! assert_eq!(order, vec!["1", "4", "2", "3"]);
//! ```

pub mod drive;
pub mod generator;
pub mod moves;
pub mod selection;
pub mod tree;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::drive::{Drive, FlatRow};
    pub use crate::generator::{generate_items, generate_items_seeded};
    pub use crate::moves::{ErrorKind, MoveError, MoveOutcome, MoveRequest};
    pub use crate::selection::Selection;
    pub use crate::tree::prelude::*;
}
