//! Flat parent-pointer records -> nested forest

use log::{trace, warn};
use std::collections::HashMap;

use crate::tree::{Item, ItemId};

/// A node of the derived forest
///
/// Borrowed from the items it was built from and rebuilt after every change,
/// never edited in place.
#[derive(Debug, PartialEq, Eq)]
pub struct TreeNode<'a> {
    /// Identity of the item
    pub id: &'a ItemId,
    /// The item itself
    pub item: &'a Item,
    /// Children in sibling order
    pub children: Vec<TreeNode<'a>>,
}

impl<'a> TreeNode<'a> {
    /// Returns true if the node has no children
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Count the nodes in this subtree, including this one
    pub fn size(&self) -> usize {
        let mut count = 0;
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            count += 1;
            stack.extend(node.children.iter());
        }
        count
    }
}

// Unlinks descendants one level at a time so deep chains don't recurse on drop.
impl Drop for TreeNode<'_> {
    fn drop(&mut self) {
        let mut stack = std::mem::take(&mut self.children);
        while let Some(mut node) = stack.pop() {
            stack.append(&mut node.children);
        }
    }
}

/// Build a forest from a flat list of items
///
/// Siblings keep the relative order they have in `items`. Items whose parent
/// can not be found are treated as roots. Items that are only reachable
/// through a parent cycle are promoted to roots in input order, so every input
/// record shows up exactly once in the result.
///
/// Works with explicit stacks, so the depth of the hierarchy is not limited by
/// the call stack.
///
/// # Example
///
/// ```
/// use drive_tree::prelude::*;
///
/// let items = vec![
///     Item::folder(1, "Music"),
///     Item::file(2, "song.mp3").with_parent(1),
///     Item::folder(3, "Videos"),
/// ];
///
/// let forest = build(&items);
/// assert_eq!(forest.len(), 2);
/// assert_eq!(forest[0].children[0].item.name, "song.mp3");
/// ```
pub fn build(items: &[Item]) -> Vec<TreeNode<'_>> {
    // First pass: id -> slot, first occurrence wins
    let mut index: HashMap<&ItemId, usize> = HashMap::with_capacity(items.len());
    for (slot, item) in items.iter().enumerate() {
        index.entry(&item.id).or_insert(slot);
    }

    // Second pass: attach every slot to its parent slot
    let mut children: Vec<Vec<usize>> = vec![Vec::new(); items.len()];
    let mut roots = Vec::new();
    for (slot, item) in items.iter().enumerate() {
        match item.parent_id.as_ref() {
            None => roots.push(slot),
            Some(parent_id) => match index.get(parent_id) {
                Some(&parent_slot) => children[parent_slot].push(slot),
                None => {
                    warn!(
                        "Item {} references missing parent {}, treating it as a root",
                        item.id, parent_id
                    );
                    roots.push(slot);
                }
            },
        }
    }

    // Third pass: pre-order walk deciding which edges the forest keeps
    let mut walk = Walk::new(items.len());
    for &slot in &roots {
        walk.visit_from(slot, &children);
    }

    // Anything left over hangs off a parent cycle
    for slot in 0..items.len() {
        if !walk.visited[slot] {
            warn!(
                "Item {} is only reachable through a parent cycle, treating it as a root",
                items[slot].id
            );
            roots.push(slot);
            walk.visit_from(slot, &children);
        }
    }

    // Last pass: assemble bottom-up, every child is finished before its parent
    let mut built: Vec<Option<TreeNode<'_>>> = Vec::with_capacity(items.len());
    built.resize_with(items.len(), || None);
    for &slot in walk.order.iter().rev() {
        let node = TreeNode {
            id: &items[slot].id,
            item: &items[slot],
            children: walk.kept[slot]
                .iter()
                .filter_map(|&child| built[child].take())
                .collect(),
        };
        built[slot] = Some(node);
    }

    let forest: Vec<TreeNode<'_>> = roots
        .into_iter()
        .filter_map(|slot| built[slot].take())
        .collect();

    trace!("Built forest of {} roots from {} items", forest.len(), items.len());
    forest
}

/// Visit order and kept child edges of the forest being built
struct Walk {
    visited: Vec<bool>,
    order: Vec<usize>,
    kept: Vec<Vec<usize>>,
}

impl Walk {
    fn new(len: usize) -> Self {
        Self {
            visited: vec![false; len],
            order: Vec::with_capacity(len),
            kept: vec![Vec::new(); len],
        }
    }

    fn visit_from(&mut self, root: usize, children: &[Vec<usize>]) {
        let mut stack = vec![root];
        while let Some(slot) = stack.pop() {
            if self.visited[slot] {
                continue;
            }
            self.visited[slot] = true;
            self.order.push(slot);

            let kept: Vec<usize> = children[slot]
                .iter()
                .copied()
                .filter(|&child| !self.visited[child])
                .collect();
            stack.extend(kept.iter().rev());
            self.kept[slot] = kept;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn ids(nodes: &[TreeNode<'_>]) -> Vec<String> {
        nodes.iter().map(|n| n.id.to_string()).collect()
    }

    #[test]
    fn test_empty() {
        assert!(build(&[]).is_empty());
    }

    #[test]
    fn test_nesting() {
        let items = vec![
            Item::folder(1, "a"),
            Item::file(2, "b").with_parent(1),
            Item::file(3, "c").with_parent(1),
            Item::folder(4, "d"),
        ];

        let forest = build(&items);
        assert_eq!(ids(&forest), vec!["1", "4"]);
        assert_eq!(ids(&forest[0].children), vec!["2", "3"]);
        assert!(forest[1].is_leaf());
        assert_eq!(forest[0].size(), 3);
    }

    #[test]
    fn test_sibling_order_follows_input() {
        let items = vec![
            Item::file(9, "z").with_parent(1),
            Item::folder(1, "a"),
            Item::file(5, "m").with_parent(1),
            Item::file(7, "b").with_parent(1),
        ];

        let forest = build(&items);
        assert_eq!(ids(&forest), vec!["1"]);
        assert_eq!(ids(&forest[0].children), vec!["9", "5", "7"]);
    }

    #[test]
    fn test_dangling_parent_becomes_root() {
        let items = vec![Item::folder(1, "a"), Item::file(2, "b").with_parent(42)];

        let forest = build(&items);
        assert_eq!(ids(&forest), vec!["1", "2"]);
    }

    #[test]
    fn test_cycle_members_are_kept() {
        let items = vec![
            Item::folder(1, "top"),
            Item::folder(2, "a").with_parent(3),
            Item::folder(3, "b").with_parent(2),
            Item::file(4, "c").with_parent(3),
        ];

        let forest = build(&items);
        assert_eq!(ids(&forest), vec!["1", "2"]);
        assert_eq!(ids(&forest[1].children), vec!["3"]);
        assert_eq!(ids(&forest[1].children[0].children), vec!["4"]);
        assert_eq!(forest.iter().map(TreeNode::size).sum::<usize>(), items.len());
    }

    #[test]
    fn test_duplicate_ids_keep_every_record() {
        let items = vec![
            Item::folder(1, "first"),
            Item::folder(1, "second"),
            Item::file(2, "child").with_parent(1),
        ];

        let forest = build(&items);
        assert_eq!(forest.len(), 2);
        assert_eq!(forest[0].item.name, "first");
        assert_eq!(ids(&forest[0].children), vec!["2"]);
        assert!(forest[1].is_leaf());
    }

    #[test]
    fn test_deep_chain() {
        let depth = 100_000;
        let items: Vec<Item> = (0..depth)
            .map(|n| {
                let item = Item::folder(n, format!("level {}", n));
                if n == 0 {
                    item
                } else {
                    item.with_parent(n - 1)
                }
            })
            .collect();

        let forest = build(&items);
        assert_eq!(forest.len(), 1);
        assert_eq!(forest[0].size(), depth);

        let mut node = &forest[0];
        while let Some(child) = node.children.first() {
            node = child;
        }
        assert_eq!(node.id, &ItemId::from(depth - 1));
    }
}
