//! The cart store: authoritative item mapping plus its mutation and query
//! operations.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use cart_store_backend::Backend;
use cart_store_core::{parse_item, validate_item, FieldMap, Items, LineItem, Quantity};

use crate::config::CartConfig;
use crate::error::Result;
use crate::observer::{ListenerId, Listeners};
use crate::persist::{Persistence, SaveOutcome};

/// Items and totals taken from one state of the cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartSummary {
    pub items: Vec<LineItem>,
    pub total_quantity: u64,
    pub total_price: f64,
}

/// A shopping cart backed by a key-value [`Backend`].
///
/// Every mutation persists the full mapping and then notifies listeners.
/// In-memory state is authoritative: storage failures are logged and never
/// undo or block a change.
///
/// Mutating methods return `&mut Self` so calls can be chained.
pub struct CartStore<B: Backend> {
    items: Items,
    field_map: FieldMap,
    persistence: Persistence<B>,
    listeners: Listeners,
}

impl<B: Backend> CartStore<B> {
    /// Create a cart with the default configuration, loading any saved state.
    pub fn new(backend: B) -> Self {
        Self::with_config(backend, CartConfig::default())
    }

    /// Create a cart, loading any state saved under `config.storage_key`.
    ///
    /// The backend is probed first. If it is unusable the cart starts empty
    /// and lives in memory only.
    pub fn with_config(backend: B, config: CartConfig) -> Self {
        let config = config.resolved();
        let persistence = Persistence::new(backend, config.storage_key);
        let items = persistence.load();
        Self {
            items,
            field_map: config.field_map,
            persistence,
            listeners: Listeners::new(),
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Mutations
    // ─────────────────────────────────────────────────────────────────────────

    /// Add a raw record to the cart.
    ///
    /// The record is normalized through the configured field map. If its id
    /// is already in the cart the quantities are summed instead.
    ///
    /// # Errors
    /// `InvalidItem` when the id is missing or empty, or the price is negative
    /// or not finite.
    /// The cart is untouched in that case.
    pub fn add_item(&mut self, raw: &Value) -> Result<&mut Self> {
        let item = parse_item(raw, &self.field_map)?;
        Ok(self.insert_or_merge(item))
    }

    /// Add an already typed line item.
    ///
    /// Same merge rule and validation as [`CartStore::add_item`].
    pub fn add_line_item(&mut self, item: LineItem) -> Result<&mut Self> {
        validate_item(&item, &self.field_map)?;
        Ok(self.insert_or_merge(item))
    }

    fn insert_or_merge(&mut self, item: LineItem) -> &mut Self {
        if let Some(existing) = self.items.get(item.id()) {
            tracing::warn!(
                id = %item.id(),
                "item already exists, updating quantity instead"
            );
            let merged = existing.quantity().saturating_add(item.quantity());
            let id = item.id().to_string();
            return self.update_quantity(&id, merged);
        }

        self.items.insert(item.id().to_string(), item);
        self.save();
        self
    }

    /// Set the quantity of an item.
    ///
    /// The value is coerced (1 when not a finite number) and clamped to at
    /// least 1. Unknown ids are ignored.
    pub fn update_quantity(&mut self, id: &str, quantity: impl Into<Quantity>) -> &mut Self {
        let Some(item) = self.items.get_mut(id) else {
            return self;
        };
        item.set_quantity(quantity);
        self.save();
        self
    }

    /// Raise an item's quantity by one.
    pub fn increment(&mut self, id: &str) -> &mut Self {
        match self.items.get(id).map(LineItem::quantity) {
            Some(current) => self.update_quantity(id, current.saturating_add(1)),
            None => {
                tracing::warn!(id = %id, "item not found in cart");
                self
            }
        }
    }

    /// Lower an item's quantity by one, stopping at 1.
    ///
    /// The item is never removed this way; use [`CartStore::remove_item`].
    pub fn decrement(&mut self, id: &str) -> &mut Self {
        match self.items.get(id).map(LineItem::quantity) {
            Some(current) => self.update_quantity(id, current.saturating_sub(1)),
            None => {
                tracing::warn!(id = %id, "item not found in cart");
                self
            }
        }
    }

    /// Remove an item.
    pub fn remove_item(&mut self, id: &str) -> &mut Self {
        if self.items.remove(id).is_some() {
            self.save();
        } else {
            tracing::warn!(id = %id, "item not found in cart");
        }
        self
    }

    /// Remove every item.
    pub fn clear(&mut self) -> &mut Self {
        self.items = Items::new();
        self.save();
        self
    }

    /// Re-read the saved mapping, replacing in-memory state.
    ///
    /// For hosts that know another writer touched the same key. Listeners
    /// are not notified.
    pub fn reload(&mut self) -> &mut Self {
        self.items = self.persistence.load();
        self
    }

    /// Persist, then notify. Listeners run whatever the save outcome.
    fn save(&mut self) {
        if self.persistence.save(&self.items) == SaveOutcome::Failed {
            tracing::debug!("change kept in memory only");
        }
        self.listeners.notify(&self.items);
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Queries
    // ─────────────────────────────────────────────────────────────────────────

    /// A copy of one item.
    pub fn get_item(&self, id: &str) -> Option<LineItem> {
        self.items.get(id).cloned()
    }

    /// Copies of all items, ordered by id.
    pub fn get_items(&self) -> Vec<LineItem> {
        self.items.values().cloned().collect()
    }

    /// Sum of all quantities.
    pub fn get_total_quantity(&self) -> u64 {
        self.items
            .values()
            .fold(0u64, |acc, item| acc.saturating_add(item.quantity()))
    }

    /// Sum of all item totals.
    pub fn get_total_price(&self) -> f64 {
        self.items.values().map(LineItem::total).sum()
    }

    pub fn get_summary(&self) -> CartSummary {
        CartSummary {
            items: self.get_items(),
            total_quantity: self.get_total_quantity(),
            total_price: self.get_total_price(),
        }
    }

    pub fn contains(&self, id: &str) -> bool {
        self.items.contains_key(id)
    }

    /// Number of distinct items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Whether the backend passed its availability probe.
    pub fn is_storage_available(&self) -> bool {
        self.persistence.is_available()
    }

    pub fn storage_key(&self) -> &str {
        self.persistence.key()
    }

    pub fn field_map(&self) -> &FieldMap {
        &self.field_map
    }

    pub fn backend(&self) -> &B {
        self.persistence.backend()
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Change notification
    // ─────────────────────────────────────────────────────────────────────────

    /// Register a listener called with the full mapping after every mutation.
    ///
    /// Listeners run synchronously in registration order. One that panics is
    /// logged and does not stop the others.
    pub fn on_change<F>(&mut self, callback: F) -> ListenerId
    where
        F: FnMut(&Items) + Send + 'static,
    {
        self.listeners.register(callback)
    }

    /// Unregister a listener. Returns `false` if it was not registered.
    pub fn off_change(&mut self, id: ListenerId) -> bool {
        self.listeners.unregister(id)
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }
}

impl<B: Backend> fmt::Debug for CartStore<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CartStore")
            .field("storage_key", &self.persistence.key())
            .field("storage_available", &self.persistence.is_available())
            .field("items", &self.items)
            .field("listeners", &self.listeners)
            .finish()
    }
}
