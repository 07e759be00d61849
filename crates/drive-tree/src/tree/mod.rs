//! Item model and the derived tree views
//!
//! Items are stored flat, each pointing at its parent by id. The nested
//! forest and the flattened display order are derived from the flat records
//! on demand and are never edited directly.

mod builder;
mod flatten;
mod item;
mod store;
mod traits;

pub use builder::{build, TreeNode};
pub use flatten::{flatten, iter_flat, FlatEntry, FlattenIter};
pub use item::{Item, ItemId, ItemKind};
pub use store::{ItemStore, StoreError};
pub use traits::Hierarchy;

/// Re-export common types for convenience
pub mod prelude {
    pub use super::{
        build, flatten, iter_flat, FlatEntry, Hierarchy, Item, ItemId, ItemKind, ItemStore,
        StoreError, TreeNode,
    };
}
