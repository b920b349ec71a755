//! Fault-injecting backend.
//!
//! Wraps a [`MemoryBackend`] and lets a test switch individual operations
//! into failure mode at any point, mimicking storage that fills up or gets
//! disabled mid-session.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use cart_store_backend::{Backend, BackendError, MemoryBackend, Result};

/// How many times each backend operation was called.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CallCounts {
    pub get: usize,
    pub set: usize,
    pub remove: usize,
}

/// A memory backend with switchable failures and call counting.
#[derive(Debug, Default)]
pub struct FlakyBackend {
    inner: MemoryBackend,
    fail_get: AtomicBool,
    fail_set: AtomicBool,
    fail_remove: AtomicBool,
    gets: AtomicUsize,
    sets: AtomicUsize,
    removes: AtomicUsize,
}

impl FlakyBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `get` fail (or succeed again).
    pub fn fail_get(&self, fail: bool) {
        self.fail_get.store(fail, Ordering::SeqCst);
    }

    /// Make `set` fail (or succeed again).
    pub fn fail_set(&self, fail: bool) {
        self.fail_set.store(fail, Ordering::SeqCst);
    }

    /// Make `remove` fail (or succeed again).
    pub fn fail_remove(&self, fail: bool) {
        self.fail_remove.store(fail, Ordering::SeqCst);
    }

    /// Call counts so far, failed calls included.
    pub fn calls(&self) -> CallCounts {
        CallCounts {
            get: self.gets.load(Ordering::SeqCst),
            set: self.sets.load(Ordering::SeqCst),
            remove: self.removes.load(Ordering::SeqCst),
        }
    }

    /// The wrapped memory backend, bypassing failure injection.
    pub fn inner(&self) -> &MemoryBackend {
        &self.inner
    }
}

fn injected(op: &str) -> BackendError {
    BackendError::Unavailable(format!("injected {op} failure"))
}

impl Backend for FlakyBackend {
    fn get(&self, key: &str) -> Result<Option<String>> {
        self.gets.fetch_add(1, Ordering::SeqCst);
        if self.fail_get.load(Ordering::SeqCst) {
            return Err(injected("get"));
        }
        self.inner.get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.sets.fetch_add(1, Ordering::SeqCst);
        if self.fail_set.load(Ordering::SeqCst) {
            return Err(injected("set"));
        }
        self.inner.set(key, value)
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.removes.fetch_add(1, Ordering::SeqCst);
        if self.fail_remove.load(Ordering::SeqCst) {
            return Err(injected("remove"));
        }
        self.inner.remove(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_switchable_failures() {
        let backend = FlakyBackend::new();
        backend.set("k", "v").unwrap();

        backend.fail_get(true);
        assert!(backend.get("k").is_err());
        backend.fail_get(false);
        assert_eq!(backend.get("k").unwrap().as_deref(), Some("v"));

        backend.fail_remove(true);
        assert!(backend.remove("k").is_err());
        assert_eq!(backend.inner().len(), 1);

        assert_eq!(
            backend.calls(),
            CallCounts {
                get: 2,
                set: 1,
                remove: 1
            }
        );
    }
}
