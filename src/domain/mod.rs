//! Domain layer: forest model, lookup and pure helpers
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod arithmetic;
pub mod display;
pub mod error;
pub mod formatting;
pub mod lookup;
pub mod node;

pub use arithmetic::{count_set_bits, fibonacci_nth, get_bit, multiply, set_bit};
pub use display::TreeDisplay;
pub use error::{DomainError, DomainResult};
pub use formatting::{
    month_range, to_money, to_percent, MonthRange, MAX_MONEY_DECIMALS, MAX_PERCENT_ACCURACY,
};
pub use lookup::{find, find_node, find_path, find_recursive, PreOrder};
pub use node::{Forest, Node, NodeId};

/// Expand `~`, `$VAR` and `${VAR}` in a path-like string.
///
/// Unresolvable input is returned unchanged.
pub fn expand_env_vars(path: &str) -> String {
    shellexpand::full(path)
        .map(|s| s.into_owned())
        .unwrap_or_else(|_| path.to_string())
}
