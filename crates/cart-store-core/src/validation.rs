//! Normalization and validation of raw item records.
//!
//! A raw record is any JSON object. [`normalize`] reads id, price and
//! quantity through a [`FieldMap`], copies every other attribute through,
//! and derives the total. [`validate_item`] then rejects items that may not
//! enter a cart.

use serde_json::{Map, Value};

use crate::coerce::{coerce_id, coerce_number, Quantity};
use crate::error::InvalidItem;
use crate::item::{LineItem, CANONICAL_KEYS};
use crate::types::FieldMap;

/// Normalize a raw record into a canonical line item.
///
/// - id: read from `fields.id`; absent ids become the empty string
/// - price: coerced, 0 when not a finite number
/// - quantity: coerced, 1 when not a finite number, clamped to at least 1
/// - passthrough: every key that is neither canonical nor mapped
///
/// Only fails when `raw` is not an object. Call [`validate_item`] before
/// letting the result into a cart.
pub fn normalize(raw: &Value, fields: &FieldMap) -> Result<LineItem, InvalidItem> {
    let obj = raw.as_object().ok_or(InvalidItem::NotAnObject)?;

    let id = obj.get(&fields.id).and_then(coerce_id).unwrap_or_default();
    let price = obj
        .get(&fields.price)
        .and_then(coerce_number)
        .unwrap_or(0.0);
    let quantity = obj
        .get(&fields.quantity)
        .map(Quantity::from)
        .unwrap_or(Quantity::from(None::<f64>))
        .resolve();

    let extra: Map<String, Value> = obj
        .iter()
        .filter(|(k, _)| !CANONICAL_KEYS.contains(&k.as_str()) && !fields.is_mapped(k))
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect();

    Ok(LineItem::new(id, price, quantity).with_extra(extra))
}

/// Check a normalized item.
///
/// Fails when the id is empty or the price is negative or not finite.
pub fn validate_item(item: &LineItem, fields: &FieldMap) -> Result<(), InvalidItem> {
    if item.id().is_empty() {
        return Err(InvalidItem::MissingId {
            field: fields.id.clone(),
        });
    }
    if !item.price().is_finite() {
        return Err(InvalidItem::NonFinitePrice {
            id: item.id().to_string(),
            price: item.price(),
        });
    }
    if item.price() < 0.0 {
        return Err(InvalidItem::NegativePrice {
            id: item.id().to_string(),
            price: item.price(),
        });
    }
    Ok(())
}

/// Normalize and validate in one step.
pub fn parse_item(raw: &Value, fields: &FieldMap) -> Result<LineItem, InvalidItem> {
    let item = normalize(raw, fields)?;
    validate_item(&item, fields)?;
    Ok(item)
}
