//! Forest data model: identifiers, labeled nodes and ordered root sequences.

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use itertools::Itertools;
use serde::{Deserialize, Deserializer};

use crate::domain::lookup::PreOrder;

/// Node identifier, either numeric or textual.
///
/// `Int(12)` and `Str("12")` are distinct ids, though both display as `12`.
/// Use `Debug` when the variant matters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
#[serde(untagged)]
pub enum NodeId {
    Int(i64),
    Str(String),
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeId::Int(n) => write!(f, "{}", n),
            NodeId::Str(s) => f.write_str(s),
        }
    }
}

impl From<i64> for NodeId {
    fn from(n: i64) -> Self {
        NodeId::Int(n)
    }
}

impl From<i32> for NodeId {
    fn from(n: i32) -> Self {
        NodeId::Int(i64::from(n))
    }
}

impl From<&str> for NodeId {
    fn from(s: &str) -> Self {
        NodeId::Str(s.to_string())
    }
}

impl From<String> for NodeId {
    fn from(s: String) -> Self {
        NodeId::Str(s)
    }
}

impl NodeId {
    /// Integer if the input parses as `i64`, string otherwise.
    pub fn parse_lenient(s: &str) -> Self {
        s.trim()
            .parse::<i64>()
            .map(NodeId::Int)
            .unwrap_or_else(|_| NodeId::Str(s.to_string()))
    }
}

impl FromStr for NodeId {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(NodeId::parse_lenient(s))
    }
}

/// A labeled node owning its children subtree.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Node {
    pub id: NodeId,
    pub name: String,
    /// Absent and `null` both mean no children.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub children: Vec<Node>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<Node>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<Node>>::deserialize(deserializer)?.unwrap_or_default())
}

impl Node {
    pub fn new(id: impl Into<NodeId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            children: Vec::new(),
        }
    }

    pub fn with_children(mut self, children: Vec<Node>) -> Self {
        self.children = children;
        self
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

// Drops subtrees through a work-list; the derived drop recurses once per level.
impl Drop for Node {
    fn drop(&mut self) {
        let mut pending = std::mem::take(&mut self.children);
        while let Some(mut node) = pending.pop() {
            pending.append(&mut node.children);
        }
    }
}

/// Accepted on-disk shapes: a bare array of roots, or a table with `nodes`.
#[derive(Deserialize)]
#[serde(untagged)]
enum ForestRepr {
    Bare(Vec<Node>),
    Table { nodes: Vec<Node> },
}

impl From<ForestRepr> for Forest {
    fn from(repr: ForestRepr) -> Self {
        match repr {
            ForestRepr::Bare(nodes) | ForestRepr::Table { nodes } => Forest(nodes),
        }
    }
}

/// Ordered sequence of root nodes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "ForestRepr")]
pub struct Forest(Vec<Node>);

impl From<Vec<Node>> for Forest {
    fn from(roots: Vec<Node>) -> Self {
        Forest(roots)
    }
}

impl Forest {
    pub fn new(roots: Vec<Node>) -> Self {
        Forest(roots)
    }

    pub fn roots(&self) -> &[Node] {
        &self.0
    }

    /// Number of root nodes.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Pre-order traversal yielding `(depth, node)`, roots at depth 0.
    pub fn iter(&self) -> PreOrder<'_> {
        PreOrder::new(self)
    }

    pub fn node_count(&self) -> usize {
        self.iter().count()
    }

    /// Number of levels; 0 for an empty forest.
    pub fn depth(&self) -> usize {
        self.iter().map(|(depth, _)| depth + 1).max().unwrap_or(0)
    }

    /// Labels of childless nodes in pre-order.
    pub fn leaf_names(&self) -> Vec<&str> {
        self.iter()
            .filter(|(_, node)| node.is_leaf())
            .map(|(_, node)| node.name.as_str())
            .collect()
    }

    /// Ids carried by more than one node, each reported once, in the order
    /// the repetition is first encountered.
    pub fn duplicate_ids(&self) -> Vec<&NodeId> {
        self.iter().map(|(_, node)| &node.id).duplicates().collect()
    }
}

impl<'a> IntoIterator for &'a Forest {
    type Item = (usize, &'a Node);
    type IntoIter = PreOrder<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
