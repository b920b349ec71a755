//! Error types for the Cart Store Core.

use thiserror::Error;

/// Reasons a raw record cannot become a line item.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InvalidItem {
    #[error("item must be an object")]
    NotAnObject,

    #[error("item must have a valid id in field \"{field}\"")]
    MissingId { field: String },

    #[error("price cannot be negative for item with id \"{id}\": {price}")]
    NegativePrice { id: String, price: f64 },

    #[error("price must be a finite number for item with id \"{id}\": {price}")]
    NonFinitePrice { id: String, price: f64 },
}
