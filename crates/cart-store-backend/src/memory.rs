//! In-memory implementation of the Backend trait.
//!
//! This is primarily for testing. It has the same semantics as SQLite
//! but keeps everything in memory with no persistence. It can also mimic
//! the two failure modes browser-style storage is known for: a byte quota
//! and storage that is disabled outright.

use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::error::{BackendError, Result};
use crate::traits::Backend;

/// In-memory backend implementation.
///
/// All data is lost when the backend is dropped. Thread-safe via RwLock.
#[derive(Debug)]
pub struct MemoryBackend {
    inner: RwLock<HashMap<String, String>>,
    /// Maximum total bytes of keys plus values, if limited.
    quota: Option<usize>,
    disabled: bool,
}

impl MemoryBackend {
    /// Create a new empty in-memory backend.
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(HashMap::new()),
            quota: None,
            disabled: false,
        }
    }

    /// Create a backend that rejects writes once keys plus values would
    /// exceed `quota` bytes.
    pub fn with_quota(quota: usize) -> Self {
        Self {
            quota: Some(quota),
            ..Self::new()
        }
    }

    /// Create a backend on which every call fails with
    /// [`BackendError::Unavailable`].
    pub fn disabled() -> Self {
        Self {
            disabled: true,
            ..Self::new()
        }
    }

    /// Number of stored keys.
    pub fn len(&self) -> usize {
        self.read().map(|m| m.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Bytes currently used by keys plus values.
    pub fn used_bytes(&self) -> usize {
        self.read()
            .map(|m| m.iter().map(|(k, v)| k.len() + v.len()).sum())
            .unwrap_or(0)
    }

    fn check_enabled(&self) -> Result<()> {
        if self.disabled {
            Err(BackendError::Unavailable("memory backend is disabled".into()))
        } else {
            Ok(())
        }
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, HashMap<String, String>>> {
        self.inner
            .read()
            .map_err(|e| BackendError::Poisoned(e.to_string()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, HashMap<String, String>>> {
        self.inner
            .write()
            .map_err(|e| BackendError::Poisoned(e.to_string()))
    }
}

impl Default for MemoryBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl Backend for MemoryBackend {
    fn get(&self, key: &str) -> Result<Option<String>> {
        self.check_enabled()?;
        Ok(self.read()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.check_enabled()?;
        let mut inner = self.write()?;

        if let Some(quota) = self.quota {
            let others: usize = inner
                .iter()
                .filter(|(k, _)| k.as_str() != key)
                .map(|(k, v)| k.len() + v.len())
                .sum();
            let needed = others + key.len() + value.len();
            if needed > quota {
                return Err(BackendError::QuotaExceeded { needed, quota });
            }
        }

        inner.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.check_enabled()?;
        self.write()?.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_backend_basic() {
        let backend = MemoryBackend::new();
        assert_eq!(backend.get("cart").unwrap(), None);

        backend.set("cart", "{}").unwrap();
        assert_eq!(backend.get("cart").unwrap().as_deref(), Some("{}"));

        backend.set("cart", "{\"a\":1}").unwrap();
        assert_eq!(backend.len(), 1);

        backend.remove("cart").unwrap();
        assert!(backend.is_empty());

        // Removing twice is fine
        backend.remove("cart").unwrap();
    }

    #[test]
    fn test_memory_backend_quota() {
        let backend = MemoryBackend::with_quota(10);
        backend.set("k", "12345").unwrap();
        // Replacing the same key only counts the new value
        backend.set("k", "123456789").unwrap();

        let err = backend.set("other", "x").unwrap_err();
        assert!(matches!(err, BackendError::QuotaExceeded { quota: 10, .. }));
        assert_eq!(backend.get("k").unwrap().as_deref(), Some("123456789"));
        assert_eq!(backend.used_bytes(), 10);
    }

    #[test]
    fn test_memory_backend_disabled() {
        let backend = MemoryBackend::disabled();
        assert!(matches!(
            backend.get("cart"),
            Err(BackendError::Unavailable(_))
        ));
        assert!(backend.set("cart", "{}").is_err());
        assert!(backend.remove("cart").is_err());
    }
}
