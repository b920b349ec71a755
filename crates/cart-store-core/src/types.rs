//! Field-name mapping for externally sourced records.

use serde::{Deserialize, Serialize};

/// Default raw-record key for the item id.
pub const DEFAULT_ID_FIELD: &str = "id";
/// Default raw-record key for the unit price.
pub const DEFAULT_PRICE_FIELD: &str = "price";
/// Default raw-record key for the quantity.
pub const DEFAULT_QUANTITY_FIELD: &str = "quantity";

/// Names of the raw-record keys that carry id, price and quantity.
///
/// Each name is independently overridable. An empty name falls back to its
/// default, so a partially filled map is always usable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldMap {
    pub id: String,
    pub price: String,
    pub quantity: String,
}

impl FieldMap {
    /// Create a field map, substituting defaults for empty names.
    pub fn new(
        id: impl Into<String>,
        price: impl Into<String>,
        quantity: impl Into<String>,
    ) -> Self {
        Self {
            id: or_default(id.into(), DEFAULT_ID_FIELD),
            price: or_default(price.into(), DEFAULT_PRICE_FIELD),
            quantity: or_default(quantity.into(), DEFAULT_QUANTITY_FIELD),
        }
    }

    /// Override the id field name.
    pub fn id_field(mut self, name: impl Into<String>) -> Self {
        self.id = or_default(name.into(), DEFAULT_ID_FIELD);
        self
    }

    /// Override the price field name.
    pub fn price_field(mut self, name: impl Into<String>) -> Self {
        self.price = or_default(name.into(), DEFAULT_PRICE_FIELD);
        self
    }

    /// Override the quantity field name.
    pub fn quantity_field(mut self, name: impl Into<String>) -> Self {
        self.quantity = or_default(name.into(), DEFAULT_QUANTITY_FIELD);
        self
    }

    /// Whether `key` is one of the mapped source names.
    pub fn is_mapped(&self, key: &str) -> bool {
        self.id == key || self.price == key || self.quantity == key
    }

    /// Replace any empty names with their defaults.
    ///
    /// Deserialized maps may carry explicit empty strings.
    pub fn resolved(self) -> Self {
        Self::new(self.id, self.price, self.quantity)
    }
}

impl Default for FieldMap {
    fn default() -> Self {
        Self {
            id: DEFAULT_ID_FIELD.to_string(),
            price: DEFAULT_PRICE_FIELD.to_string(),
            quantity: DEFAULT_QUANTITY_FIELD.to_string(),
        }
    }
}

fn or_default(name: String, default: &str) -> String {
    if name.is_empty() {
        default.to_string()
    } else {
        name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_names_fall_back() {
        let map = FieldMap::new("sku", "", "qty");
        assert_eq!(map.id, "sku");
        assert_eq!(map.price, "price");
        assert_eq!(map.quantity, "qty");
    }

    #[test]
    fn test_partial_deserialize() {
        let map: FieldMap = serde_json::from_str(r#"{"id":"sku","price":""}"#).unwrap();
        let map = map.resolved();
        assert_eq!(map, FieldMap::default().id_field("sku"));
        assert!(map.is_mapped("sku"));
        assert!(!map.is_mapped("id"));
    }
}
