//! Line item: the single entity a cart holds.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::coerce::{coerce_number, Quantity};

/// Keys owned by the canonical line-item schema.
///
/// These never appear among passthrough fields.
pub const CANONICAL_KEYS: [&str; 4] = ["id", "price", "quantity", "total"];

/// The id-keyed mapping a cart is made of.
///
/// Ordered by id so enumeration is stable for a given state.
pub type Items = BTreeMap<String, LineItem>;

/// One cart entry.
///
/// `total` is derived: it is recomputed whenever the quantity changes and has
/// no setter, so `total == price * quantity` holds for every value built
/// through this type. The quantity is capped where the product would
/// overflow, so a finite price always gives a finite total.
///
/// Deserialization is lenient about the derived and coerced fields: a stored
/// `quantity` goes through [`Quantity`] coercion and a missing or unreadable
/// `total` reads as 0 until [`LineItem::reconciled`] recomputes it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    id: String,
    price: f64,
    #[serde(deserialize_with = "lenient_quantity")]
    quantity: u64,
    #[serde(default, deserialize_with = "lenient_total")]
    total: f64,
    /// Attributes carried through verbatim from the raw record.
    #[serde(flatten)]
    extra: Map<String, Value>,
}

impl LineItem {
    /// Create a line item with no passthrough fields.
    ///
    /// The quantity is clamped to at least 1.
    pub fn new(id: impl Into<String>, price: f64, quantity: u64) -> Self {
        let quantity = capped_quantity(price, quantity.max(Quantity::MIN));
        Self {
            id: id.into(),
            price,
            quantity,
            total: price * quantity as f64,
            extra: Map::new(),
        }
    }

    /// Attach passthrough fields, skipping any that collide with canonical keys.
    pub fn with_extra(mut self, extra: Map<String, Value>) -> Self {
        self.extra = extra
            .into_iter()
            .filter(|(k, _)| !CANONICAL_KEYS.contains(&k.as_str()))
            .collect();
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn price(&self) -> f64 {
        self.price
    }

    pub fn quantity(&self) -> u64 {
        self.quantity
    }

    pub fn total(&self) -> f64 {
        self.total
    }

    /// All passthrough fields.
    pub fn extra(&self) -> &Map<String, Value> {
        &self.extra
    }

    /// A single passthrough field.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.extra.get(key)
    }

    /// Set the quantity (clamped to at least 1, capped so the total stays
    /// finite) and recompute the total.
    ///
    /// Price and passthrough fields are untouched.
    pub fn set_quantity(&mut self, quantity: impl Into<Quantity>) {
        self.quantity = capped_quantity(self.price, quantity.into().resolve());
        self.total = self.price * self.quantity as f64;
    }

    /// Bring an item read back from storage in line with the invariants.
    ///
    /// The mapping key wins over the stored id, the quantity is clamped and
    /// the total recomputed. Returns `None` when the stored price is negative
    /// or not finite, since that cannot be repaired.
    pub fn reconciled(mut self, key: &str) -> Option<Self> {
        if !self.price.is_finite() || self.price < 0.0 {
            return None;
        }
        if self.id != key {
            self.id = key.to_string();
        }
        self.set_quantity(self.quantity);
        Some(self)
    }
}

/// Largest quantity up to `quantity` for which `price * quantity` is finite.
///
/// Never goes below [`Quantity::MIN`]; a finite price times 1 cannot overflow.
fn capped_quantity(price: f64, quantity: u64) -> u64 {
    if !price.is_finite() || (price * quantity as f64).is_finite() {
        return quantity;
    }
    let mut cap = (f64::MAX / price).floor();
    if !(price * cap).is_finite() {
        cap = (cap - cap * f64::EPSILON).floor();
    }
    (cap as u64).clamp(Quantity::MIN, quantity)
}

fn lenient_quantity<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(Quantity::from(&value).resolve())
}

fn lenient_total<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(coerce_number(&value).unwrap_or(0.0))
}
