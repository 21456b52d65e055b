//! Unified error handling for cart operations.
//!
//! Every public operation of the cart returns `Result<T, CartError>`. A
//! failed write does not roll back the in-memory cart; the error only tells
//! the caller that storage is behind.

use thiserror::Error;

use crate::storage::StorageError;

/// Error type for the cart store and its provider scope.
#[derive(Debug, Error)]
pub enum CartError {
    /// The key-value store rejected a read or write.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// The cart could not be encoded for storage.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// `use_cart` was called outside of a provider scope.
    ///
    /// This is a wiring mistake in the calling code, not a runtime failure.
    #[error("use_cart must be used within a CartProvider")]
    MissingProvider,
}

/// Result type alias for `CartError`.
pub type Result<T> = std::result::Result<T, CartError>;
