//! Lookup service
//!
//! Owns a loaded forest and answers id queries against it. Queries only read
//! the forest, so batches are resolved in parallel.

use rayon::prelude::*;
use tracing::{debug, instrument};

use crate::domain::{find, find_path, Forest, NodeId};

/// Shape summary of a forest.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ForestStats {
    /// Number of root nodes
    pub roots: usize,
    /// Total number of nodes
    pub nodes: usize,
    /// Number of levels
    pub depth: usize,
    /// Number of childless nodes
    pub leaves: usize,
}

/// Service answering id lookups against one immutable forest.
#[derive(Debug, Clone)]
pub struct LookupService {
    forest: Forest,
}

impl LookupService {
    pub fn new(forest: Forest) -> Self {
        Self { forest }
    }

    pub fn forest(&self) -> &Forest {
        &self.forest
    }

    /// Label of the first pre-order match, `None` if absent.
    #[instrument(level = "debug", skip(self, target), fields(id = %target))]
    pub fn find(&self, target: &NodeId) -> Option<&str> {
        let found = find(&self.forest, target);
        debug!("find: found={:?}", found);
        found
    }

    /// Root-to-node labels of the first pre-order match.
    pub fn find_path(&self, target: &NodeId) -> Option<Vec<&str>> {
        find_path(&self.forest, target)
    }

    /// Resolve many targets in parallel; results keep the input order.
    #[instrument(level = "debug", skip(self, targets), fields(count = targets.len()))]
    pub fn find_many(&self, targets: &[NodeId]) -> Vec<Option<&str>> {
        targets
            .par_iter()
            .map(|target| find(&self.forest, target))
            .collect()
    }

    pub fn stats(&self) -> ForestStats {
        ForestStats {
            roots: self.forest.len(),
            nodes: self.forest.node_count(),
            depth: self.forest.depth(),
            leaves: self.forest.leaf_names().len(),
        }
    }

    /// Ids that occur on more than one node.
    pub fn duplicate_ids(&self) -> Vec<&NodeId> {
        self.forest.duplicate_ids()
    }
}
