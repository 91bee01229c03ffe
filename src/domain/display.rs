/*
Conversion of the forest model into a printable `termtree::Tree`.
A synthetic root labeled "forest" holds one leaf per root node.
 */
use termtree::Tree;
use tracing::instrument;

use crate::domain::node::{Forest, Node};

pub trait TreeDisplay {
    fn to_tree_string(&self) -> Tree<String>;
}

impl TreeDisplay for Node {
    fn to_tree_string(&self) -> Tree<String> {
        let leaves: Vec<_> = self.children.iter().map(|c| c.to_tree_string()).collect();
        Tree::new(format!("{} ({})", self.name, self.id)).with_leaves(leaves)
    }
}

impl TreeDisplay for Forest {
    #[instrument(level = "debug", skip(self))]
    fn to_tree_string(&self) -> Tree<String> {
        if self.is_empty() {
            return Tree::new("Empty forest".to_string());
        }
        let leaves: Vec<_> = self.roots().iter().map(|r| r.to_tree_string()).collect();
        Tree::new("forest".to_string()).with_leaves(leaves)
    }
}
