//! Test fixtures and helpers.
//!
//! Common setup code for integration tests.

use std::sync::{Arc, Mutex, MutexGuard};

use serde_json::{json, Value};

use cart_store::{Backend, CartConfig, CartStore, ListenerId};
use cart_store_core::Items;

use crate::backends::FlakyBackend;

/// A shared fault-injecting backend carts can be opened over.
///
/// Every cart opened from the same fixture sees the same stored state,
/// like several tabs over one browser profile.
pub struct TestFixture {
    pub backend: Arc<FlakyBackend>,
    pub config: CartConfig,
}

impl TestFixture {
    /// Create a fixture with the default cart configuration.
    pub fn new() -> Self {
        Self::with_config(CartConfig::default())
    }

    pub fn with_config(config: CartConfig) -> Self {
        Self {
            backend: Arc::new(FlakyBackend::new()),
            config,
        }
    }

    /// Open a cart over the shared backend.
    pub fn cart(&self) -> CartStore<Arc<FlakyBackend>> {
        CartStore::with_config(self.backend.clone(), self.config.clone())
    }

    /// The raw text currently stored for the cart, if any.
    pub fn stored(&self) -> Option<String> {
        self.backend
            .inner()
            .get(&self.config.clone().resolved().storage_key)
            .ok()
            .flatten()
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}

/// Build a raw item record with the default field names.
pub fn raw_item(id: &str, price: f64, quantity: i64) -> Value {
    json!({"id": id, "price": price, "quantity": quantity})
}

/// Collects every change payload emitted by the carts it is attached to.
#[derive(Clone, Default)]
pub struct ChangeRecorder {
    payloads: Arc<Mutex<Vec<Items>>>,
}

impl ChangeRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register with a cart and return the listener handle.
    pub fn attach<B: Backend>(&self, cart: &mut CartStore<B>) -> ListenerId {
        let payloads = self.payloads.clone();
        cart.on_change(move |items| {
            if let Ok(mut payloads) = payloads.lock() {
                payloads.push(items.clone());
            }
        })
    }

    /// Number of notifications received.
    pub fn count(&self) -> usize {
        self.lock().len()
    }

    /// The most recent payload.
    pub fn last(&self) -> Option<Items> {
        self.lock().last().cloned()
    }

    pub fn payloads(&self) -> Vec<Items> {
        self.lock().clone()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<Items>> {
        // A poisoned recorder only means a test already failed
        self.payloads
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixture_shares_state() {
        let fixture = TestFixture::new();
        let mut cart = fixture.cart();
        cart.add_item(&raw_item("a", 2.0, 3)).unwrap();

        let other = fixture.cart();
        assert_eq!(other.get_total_price(), 6.0);
        assert!(fixture.stored().is_some());
    }

    #[test]
    fn test_recorder_counts() {
        let fixture = TestFixture::new();
        let mut cart = fixture.cart();
        let recorder = ChangeRecorder::new();
        recorder.attach(&mut cart);

        cart.add_item(&raw_item("a", 1.0, 1)).unwrap();
        cart.increment("a");

        assert_eq!(recorder.count(), 2);
        assert_eq!(recorder.last().unwrap()["a"].quantity(), 2);
    }
}
