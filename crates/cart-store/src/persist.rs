//! Persistence adapter: best-effort load and save of the item mapping.
//!
//! Nothing in here returns an error. Storage that cannot be reached is
//! probed once and then skipped; corrupt records load as an empty cart;
//! failed writes are logged and dropped.

use serde_json::{Map, Value};

use cart_store_backend::Backend;
use cart_store_core::{Items, LineItem};

/// Key written and removed by the availability probe.
pub const PROBE_KEY: &str = "__test__";

/// What happened to a save request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    /// The snapshot reached the backend.
    Saved,
    /// Storage was unavailable at construction, nothing was attempted.
    Skipped,
    /// The write was attempted and failed.
    Failed,
}

/// A backend bound to one storage key.
#[derive(Debug)]
pub struct Persistence<B> {
    backend: B,
    key: String,
    available: bool,
}

impl<B: Backend> Persistence<B> {
    /// Wrap a backend, probing it once.
    pub fn new(backend: B, key: impl Into<String>) -> Self {
        let available = probe(&backend);
        Self {
            backend,
            key: key.into(),
            available,
        }
    }

    pub fn is_available(&self) -> bool {
        self.available
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Read the stored mapping.
    ///
    /// Absent keys, read failures, unparseable text and JSON `null` all give
    /// an empty mapping. Stored quantities are coerced and totals recomputed.
    /// Entries that cannot be read as line items, or whose price is invalid,
    /// are dropped.
    pub fn load(&self) -> Items {
        if !self.available {
            return Items::new();
        }

        let text = match self.backend.get(&self.key) {
            Ok(Some(text)) => text,
            Ok(None) => return Items::new(),
            Err(e) => {
                tracing::warn!(key = %self.key, "failed to read cart: {}", e);
                return Items::new();
            }
        };

        let record: Option<Map<String, Value>> = match serde_json::from_str(&text) {
            Ok(record) => record,
            Err(e) => {
                tracing::warn!(key = %self.key, "stored cart is corrupt, starting empty: {}", e);
                return Items::new();
            }
        };

        let mut items = Items::new();
        for (id, value) in record.unwrap_or_default() {
            let reconciled = serde_json::from_value::<LineItem>(value)
                .ok()
                .and_then(|item| item.reconciled(&id));
            match reconciled {
                Some(item) => {
                    items.insert(id, item);
                }
                None => tracing::warn!(key = %self.key, id = %id, "dropping invalid stored item"),
            }
        }

        tracing::debug!(key = %self.key, count = items.len(), "loaded cart");
        items
    }

    /// Write the full mapping under the configured key.
    pub fn save(&self, items: &Items) -> SaveOutcome {
        if !self.available {
            return SaveOutcome::Skipped;
        }

        let text = match serde_json::to_string(items) {
            Ok(text) => text,
            Err(e) => {
                tracing::error!(key = %self.key, "failed to serialize cart: {}", e);
                return SaveOutcome::Failed;
            }
        };

        match self.backend.set(&self.key, &text) {
            Ok(()) => {
                tracing::debug!(key = %self.key, bytes = text.len(), "saved cart");
                SaveOutcome::Saved
            }
            Err(e) => {
                tracing::error!(key = %self.key, "failed to save cart: {}", e);
                SaveOutcome::Failed
            }
        }
    }
}

/// Check that the backend accepts a write and a remove.
fn probe<B: Backend>(backend: &B) -> bool {
    let result = backend
        .set(PROBE_KEY, PROBE_KEY)
        .and_then(|()| backend.remove(PROBE_KEY));
    match result {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!("backing store is not available: {}", e);
            false
        }
    }
}
