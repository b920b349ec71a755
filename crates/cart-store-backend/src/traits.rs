//! Backend trait: the abstract interface for string persistence.
//!
//! This trait allows the cart to be storage-agnostic. Implementations
//! include SQLite (persistent) and in-memory (tests, ephemeral hosts).

use std::sync::Arc;

use crate::error::Result;

/// A synchronous, string-keyed key-value store.
///
/// # Design Notes
///
/// - **No ambient state**: the store is handed to its consumer explicitly.
/// - **Every call may fail**: quota limits, disabled storage or a locked
///   database all surface as errors; none are retried here.
/// - **Interior mutability**: methods take `&self` so a single backend can
///   be shared. Concurrent writers to the same key get last-write-wins.
pub trait Backend: Send + Sync {
    /// Read the value stored under `key`, or `None` when absent.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Store `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Delete `key`. Removing an absent key is not an error.
    fn remove(&self, key: &str) -> Result<()>;
}

impl<B: Backend + ?Sized> Backend for Arc<B> {
    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<()> {
        (**self).remove(key)
    }
}

impl<B: Backend + ?Sized> Backend for &B {
    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<()> {
        (**self).remove(key)
    }
}

impl<B: Backend + ?Sized> Backend for Box<B> {
    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<()> {
        (**self).remove(key)
    }
}
