//! # Cart Store
//!
//! An in-memory shopping-cart state container backed by a synchronous
//! key-value store.
//!
//! ## Overview
//!
//! The [`CartStore`] owns the authoritative mapping from item id to
//! [`LineItem`]. Every mutation:
//!
//! 1. normalizes and validates its input,
//! 2. updates the mapping, keeping `total == price * quantity`,
//! 3. persists the full mapping to the [`Backend`] (best effort),
//! 4. notifies every registered listener with the new mapping.
//!
//! ## Key Concepts
//!
//! - **Line item**: id, unit price, quantity (at least 1), derived total and
//!   any passthrough fields from the raw record.
//! - **Backend**: the injected `get`/`set`/`remove` capability. It is probed
//!   once; if unusable the cart runs in memory only.
//! - **Listener**: a callback registered with [`CartStore::on_change`].
//!
//! ## Usage
//!
//! ```rust
//! use cart_store::{CartStore, MemoryBackend};
//! use serde_json::json;
//!
//! let mut cart = CartStore::new(MemoryBackend::new());
//!
//! cart.add_item(&json!({"id": "mug", "price": 12.5, "quantity": 2, "color": "blue"}))
//!     .unwrap()
//!     .increment("mug");
//!
//! let summary = cart.get_summary();
//! assert_eq!(summary.total_quantity, 3);
//! assert_eq!(summary.total_price, 37.5);
//! ```
//!
//! ## Re-exports
//!
//! - `cart_store::core` - Line items, field maps, normalization
//! - `cart_store::backend` - Backend trait and implementations

pub mod config;
pub mod error;
pub mod observer;
pub mod persist;
pub mod store;

// Re-export component crates
pub use cart_store_backend as backend;
pub use cart_store_core as core;

// Re-export main types for convenience
pub use config::{CartConfig, DEFAULT_STORAGE_KEY};
pub use error::{CartError, Result};
pub use observer::ListenerId;
pub use persist::SaveOutcome;
pub use store::{CartStore, CartSummary};

pub use cart_store_backend::{Backend, BackendError, MemoryBackend, SqliteBackend};
pub use cart_store_core::{FieldMap, InvalidItem, Items, LineItem, Quantity};
