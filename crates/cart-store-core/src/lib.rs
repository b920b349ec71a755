//! # Cart Store Core
//!
//! Pure primitives for the cart store: line items, field maps, and the
//! normalization step that turns an untyped raw record into a canonical
//! [`LineItem`].
//!
//! This crate contains no I/O and no storage. It is pure computation over
//! JSON values.
//!
//! ## Key Types
//!
//! - [`LineItem`] - One cart entry with its derived total
//! - [`Items`] - The id-keyed mapping a cart is made of
//! - [`FieldMap`] - Which raw-record keys carry id, price and quantity
//! - [`Quantity`] - A coerced, not yet clamped quantity request
//!
//! ## Normalization
//!
//! Raw records are normalized with [`normalize`] and checked with
//! [`validate_item`]; [`parse_item`] runs both. See the [`validation`] module.

pub mod coerce;
pub mod error;
pub mod item;
pub mod types;
pub mod validation;

pub use coerce::{coerce_id, coerce_number, Quantity};
pub use error::InvalidItem;
pub use item::{Items, LineItem, CANONICAL_KEYS};
pub use types::FieldMap;
pub use validation::{normalize, parse_item, validate_item};
