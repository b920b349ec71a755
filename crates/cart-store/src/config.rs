//! Construction-time configuration.

use serde::{Deserialize, Serialize};

use cart_store_core::FieldMap;

/// Default backing-store key for the serialized cart.
pub const DEFAULT_STORAGE_KEY: &str = "cart";

/// Configuration for a [`CartStore`](crate::CartStore).
///
/// Deserializes with every field optional, so it can be embedded in a
/// host application's own config file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CartConfig {
    /// Key the cart is stored under in the backend.
    pub storage_key: String,
    /// Raw-record field names used by `add_item`.
    pub field_map: FieldMap,
}

impl CartConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a different backing-store key.
    pub fn storage_key(mut self, key: impl Into<String>) -> Self {
        self.storage_key = key.into();
        self
    }

    /// Use a different field-name mapping.
    pub fn field_map(mut self, field_map: FieldMap) -> Self {
        self.field_map = field_map;
        self
    }

    /// Replace empty names with their defaults.
    pub fn resolved(mut self) -> Self {
        if self.storage_key.is_empty() {
            self.storage_key = DEFAULT_STORAGE_KEY.to_string();
        }
        self.field_map = self.field_map.resolved();
        self
    }
}

impl Default for CartConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            field_map: FieldMap::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_from_partial_json() {
        let config: CartConfig =
            serde_json::from_str(r#"{"field_map":{"id":"sku"}}"#).unwrap();
        let config = config.resolved();
        assert_eq!(config.storage_key, "cart");
        assert_eq!(config.field_map.id, "sku");
        assert_eq!(config.field_map.price, "price");
    }

    #[test]
    fn test_empty_key_resolves_to_default() {
        let config = CartConfig::new().storage_key("").resolved();
        assert_eq!(config.storage_key, DEFAULT_STORAGE_KEY);
    }
}
