//! Error types for the cart store.

use cart_store_core::InvalidItem;
use thiserror::Error;

/// Errors a cart operation hands back to its caller.
///
/// Only adding an item can fail. Storage trouble and unknown ids are
/// absorbed and logged instead.
#[derive(Debug, Error)]
pub enum CartError {
    /// The raw record could not become a line item.
    #[error("invalid item: {0}")]
    InvalidItem(#[from] InvalidItem),
}

/// Result type for cart operations.
pub type Result<T> = std::result::Result<T, CartError>;
