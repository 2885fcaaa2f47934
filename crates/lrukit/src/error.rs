//! Error types for lrukit

use std::fmt;

/// Result type alias for lrukit operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for cache operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// Capacity must be at least 2
    InvalidCapacity(usize),

    /// Key not found
    KeyNotFound,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidCapacity(capacity) => {
                write!(f, "Invalid capacity: {} (must be greater than 1)", capacity)
            }
            Error::KeyNotFound => write!(f, "Key not found"),
        }
    }
}

impl std::error::Error for Error {}
