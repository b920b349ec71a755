//! # Cart Store Backend
//!
//! Backing key-value stores for the cart store. Provides a trait-based
//! interface for string persistence with SQLite and in-memory
//! implementations.
//!
//! ## Overview
//!
//! The cart store never reaches for an ambient global; it is handed a
//! [`Backend`] at construction. The persistent implementation is
//! [`SqliteBackend`], with [`MemoryBackend`] for tests and for hosts that
//! only need process-lifetime state.
//!
//! ## Key Types
//!
//! - [`Backend`] - The synchronous `get`/`set`/`remove` capability
//! - [`SqliteBackend`] - SQLite-based persistent storage
//! - [`MemoryBackend`] - In-memory storage, optionally quota-limited or disabled
//! - [`BackendError`] - Why a backend call failed
//!
//! ## Usage
//!
//! ```rust,no_run
//! use cart_store_backend::{Backend, SqliteBackend};
//!
//! let backend = SqliteBackend::open("cart.db").unwrap();
//! backend.set("cart", "{}").unwrap();
//! assert_eq!(backend.get("cart").unwrap().as_deref(), Some("{}"));
//! ```
//!
//! ## Design Notes
//!
//! - **Fallible everywhere**: every call may fail (quota, disabled storage,
//!   locked database). Callers decide how to degrade.
//! - **Shared handles**: backends use interior locking, so one instance can
//!   sit behind an `Arc` and serve several carts.

pub mod error;
pub mod memory;
pub mod migration;
pub mod sqlite;
pub mod traits;

pub use error::{BackendError, Result};
pub use memory::MemoryBackend;
pub use sqlite::SqliteBackend;
pub use traits::Backend;
