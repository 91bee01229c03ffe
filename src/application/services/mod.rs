//! Application services
//!
//! Concrete service implementations that orchestrate domain logic.

mod lookup;

pub use lookup::{ForestStats, LookupService};
