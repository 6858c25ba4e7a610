//! Errors reported by the containers.

/// Error type of fallible container lookups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// Indexed access to a key that is not stored.
    #[error("key not found")]
    KeyNotFound,
}

/// Result alias for fallible container lookups.
pub type Result<T> = std::result::Result<T, Error>;
