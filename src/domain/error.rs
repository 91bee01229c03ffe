//! Domain-level errors (no external dependencies)

use thiserror::Error;

/// Domain errors represent invalid inputs to pure computations.
///
/// A lookup miss is not an error; it is `None`.
#[derive(Error, Debug, PartialEq)]
pub enum DomainError {
    #[error("value is not finite: {value}")]
    NonFinite { value: f64 },

    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
