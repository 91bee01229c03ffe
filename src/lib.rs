//! citytree: depth-first id lookup over labeled forests
//!
//! Layers, innermost first:
//! - [`domain`]: forest model, lookup, bit/Fibonacci/formatting helpers (pure)
//! - [`application`]: forest loading and the lookup service
//! - [`infrastructure`]: filesystem boundary and service wiring
//! - [`cli`]: argument parsing, dispatch, colored output
//!
//! ```
//! use citytree::domain::{Forest, Node, NodeId};
//!
//! let forest = Forest::new(vec![Node::new(1, "A").with_children(vec![
//!     Node::new(2, "B"),
//!     Node::new(3, "C").with_children(vec![Node::new(4, "D")]),
//! ])]);
//! assert_eq!(forest.find(&NodeId::from(4)), Some("D"));
//! assert_eq!(forest.find(&NodeId::from(5)), None);
//! ```

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;
