//! Core item types for the drive tree

use derive_more::Display;
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Unique identifier for an item in the drive
///
/// Identifiers are opaque strings and never change for the lifetime of an item.
/// Parent links are stored as identifiers, never as references.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(transparent))]
pub struct ItemId(String);

impl ItemId {
    /// Create a new ItemId
    pub fn new(id: impl Into<String>) -> Self {
        ItemId(id.into())
    }

    /// Borrow the identifier as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ItemId {
    fn from(id: &str) -> Self {
        ItemId(id.to_string())
    }
}

impl From<String> for ItemId {
    fn from(id: String) -> Self {
        ItemId(id)
    }
}

impl From<&ItemId> for ItemId {
    fn from(id: &ItemId) -> Self {
        id.clone()
    }
}

macro_rules! item_id_from_int {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for ItemId {
                fn from(id: $ty) -> Self {
                    ItemId(id.to_string())
                }
            }
        )*
    };
}

item_id_from_int!(u32, u64, usize, i32, i64);

/// The kind of an item in the drive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ItemKind {
    /// A folder - usually holds other items
    #[display(fmt = "Folder")]
    Folder,
    /// A file
    #[display(fmt = "File")]
    #[default]
    File,
}

impl ItemKind {
    /// Returns true if this is a folder
    pub const fn is_folder(self) -> bool {
        matches!(self, ItemKind::Folder)
    }
}

/// A single record in the item store
///
/// `kind` and `size` are payload: the tree operations never look at them, they
/// only travel along with the item.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Item {
    /// Identity of the item
    pub id: ItemId,
    /// Display label
    pub name: String,
    /// Containing item, `None` for top level items
    pub parent_id: Option<ItemId>,
    /// Folder or file
    pub kind: ItemKind,
    /// Size in bytes (0 for folders)
    pub size: u64,
}

impl Item {
    /// Create a new item
    pub fn new(
        id: impl Into<ItemId>,
        name: impl Into<String>,
        parent_id: Option<ItemId>,
        kind: ItemKind,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            parent_id,
            kind,
            size: 0,
        }
    }

    /// Create a folder
    pub fn folder(id: impl Into<ItemId>, name: impl Into<String>) -> Self {
        Self::new(id, name, None, ItemKind::Folder)
    }

    /// Create a file
    pub fn file(id: impl Into<ItemId>, name: impl Into<String>) -> Self {
        Self::new(id, name, None, ItemKind::File)
    }

    /// Set the parent of this item
    pub fn with_parent(mut self, parent_id: impl Into<ItemId>) -> Self {
        self.parent_id = Some(parent_id.into());
        self
    }

    /// Set the size of this item
    pub fn with_size(mut self, size: u64) -> Self {
        self.size = size;
        self
    }

    /// Returns true if this item sits at the top level
    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }

    /// Returns true if this is a folder
    pub fn is_folder(&self) -> bool {
        self.kind.is_folder()
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}) - {}", self.name, self.kind, self.id)
    }
}
