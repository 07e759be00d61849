//! Nested forest -> ordered display rows

use log::trace;

use crate::tree::{Item, ItemId, TreeNode};

/// One row of the flattened drive
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlatEntry<'a> {
    /// The item shown on this row
    pub item: &'a Item,
    /// Nesting level, roots are 0
    pub depth: usize,
    /// Whether the item has children in the current tree
    pub has_children: bool,
}

impl<'a> FlatEntry<'a> {
    /// Identity of the row's item
    pub fn id(&self) -> &'a ItemId {
        &self.item.id
    }
}

/// Pre-order iterator over a forest
///
/// Children are visited in their stored order before the next sibling, roots
/// in forest order. The walk only borrows the forest, so it can be restarted
/// any number of times with the same result.
pub struct FlattenIter<'f, 'a> {
    stack: Vec<(&'f TreeNode<'a>, usize)>,
}

impl<'f, 'a> FlattenIter<'f, 'a> {
    /// Create an iterator over the given forest
    pub fn new(forest: &'f [TreeNode<'a>]) -> Self {
        // Push in reverse so the first root is popped first
        let stack = forest.iter().rev().map(|node| (node, 0)).collect();
        Self { stack }
    }
}

impl<'f, 'a> Iterator for FlattenIter<'f, 'a> {
    type Item = FlatEntry<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let (node, depth) = self.stack.pop()?;

        for child in node.children.iter().rev() {
            self.stack.push((child, depth + 1));
        }

        Some(FlatEntry {
            item: node.item,
            depth,
            has_children: !node.children.is_empty(),
        })
    }
}

/// Walk a forest lazily in display order
pub fn iter_flat<'f, 'a>(forest: &'f [TreeNode<'a>]) -> FlattenIter<'f, 'a> {
    FlattenIter::new(forest)
}

/// Flatten a forest into display order
///
/// # Example
///
/// ```
/// use drive_tree::prelude::*;
///
/// let items = vec![
///     Item::folder(1, "a"),
///     Item::file(2, "b").with_parent(1),
///     Item::folder(3, "c"),
/// ];
///
/// let rows = flatten(&build(&items));
/// let order: Vec<_> = rows.iter().map(|row| (row.id().as_str(), row.depth)).collect();
/// assert_eq!(order, vec![("1", 0), ("2", 1), ("3", 0)]);
/// ```
pub fn flatten<'a>(forest: &[TreeNode<'a>]) -> Vec<FlatEntry<'a>> {
    let rows: Vec<_> = iter_flat(forest).collect();
    trace!("Flattened forest into {} rows", rows.len());
    rows
}
