//! Depth-first lookup by id.
//!
//! Traversal is pre-order, left-to-right, and the first matching node wins.
//! All state lives in the call frame (or in the iterator's work-list), so
//! lookups against one shared `&Forest` are independent of each other.

use crate::domain::node::{Forest, Node, NodeId};

/// Pre-order iterator over a forest using an explicit stack.
///
/// Yields `(depth, node)`; roots are at depth 0.
pub struct PreOrder<'a> {
    stack: Vec<(usize, &'a Node)>,
}

impl<'a> PreOrder<'a> {
    pub(crate) fn new(forest: &'a Forest) -> Self {
        // Push in reverse so the leftmost root pops first
        let stack = forest.roots().iter().rev().map(|node| (0, node)).collect();
        Self { stack }
    }
}

impl<'a> Iterator for PreOrder<'a> {
    type Item = (usize, &'a Node);

    fn next(&mut self) -> Option<Self::Item> {
        let (depth, node) = self.stack.pop()?;
        for child in node.children.iter().rev() {
            self.stack.push((depth + 1, child));
        }
        Some((depth, node))
    }
}

/// Label of the first node in pre-order whose id equals `target`.
///
/// Iterative; input depth does not grow the call stack.
pub fn find<'a>(forest: &'a Forest, target: &NodeId) -> Option<&'a str> {
    find_node(forest, target).map(|node| node.name.as_str())
}

/// First node in pre-order whose id equals `target`.
pub fn find_node<'a>(forest: &'a Forest, target: &NodeId) -> Option<&'a Node> {
    forest
        .iter()
        .map(|(_, node)| node)
        .find(|node| &node.id == target)
}

/// Recursive rendition of [`find`], same contract.
pub fn find_recursive<'a>(forest: &'a Forest, target: &NodeId) -> Option<&'a str> {
    search(forest.roots(), target)
}

fn search<'a>(nodes: &'a [Node], target: &NodeId) -> Option<&'a str> {
    for node in nodes {
        if &node.id == target {
            return Some(&node.name);
        }
        if let Some(name) = search(&node.children, target) {
            return Some(name);
        }
    }
    None
}

/// Labels from the root down to the first match, inclusive.
pub fn find_path<'a>(forest: &'a Forest, target: &NodeId) -> Option<Vec<&'a str>> {
    let mut path: Vec<&str> = Vec::new();
    for (depth, node) in forest.iter() {
        // pre-order: everything deeper than `depth` belongs to a finished subtree
        path.truncate(depth);
        path.push(&node.name);
        if &node.id == target {
            return Some(path);
        }
    }
    None
}

impl Forest {
    pub fn find(&self, target: &NodeId) -> Option<&str> {
        find(self, target)
    }

    pub fn find_node(&self, target: &NodeId) -> Option<&Node> {
        find_node(self, target)
    }

    pub fn find_path(&self, target: &NodeId) -> Option<Vec<&str>> {
        find_path(self, target)
    }
}
