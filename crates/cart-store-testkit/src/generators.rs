//! Proptest generators for property-based testing.

use proptest::prelude::*;
use serde_json::{json, Value};

use cart_store::{Backend, CartStore};

/// Generate an item id from a small pool so operations collide.
pub fn item_id() -> impl Strategy<Value = String> {
    "[a-e]".prop_map(String::from)
}

/// Generate a price value: mostly valid numbers, sometimes strings,
/// garbage, negatives or prices large enough to overflow a total.
pub fn price_value() -> impl Strategy<Value = Value> {
    prop_oneof![
        6 => (0u32..100_000).prop_map(|cents| json!(f64::from(cents) / 100.0)),
        1 => (0u32..1000).prop_map(|n| json!(n.to_string())),
        1 => Just(json!("free")),
        1 => Just(Value::Null),
        1 => (1u32..1000).prop_map(|n| json!(-f64::from(n))),
        1 => Just(json!("1e308")),
    ]
}

/// Generate a quantity value, including out-of-range and non-numeric ones.
pub fn quantity_value() -> impl Strategy<Value = Value> {
    prop_oneof![
        6 => (-5i64..50).prop_map(|n| json!(n)),
        1 => (0u32..20).prop_map(|n| json!(format!("{n}"))),
        1 => (0.0f64..10.0).prop_map(|n| json!(n)),
        1 => Just(json!("lots")),
        1 => Just(json!([])),
    ]
}

/// Generate a raw item record, occasionally with an empty id or extras.
pub fn raw_item_value() -> impl Strategy<Value = Value> {
    (
        prop_oneof![9 => item_id(), 1 => Just(String::new())],
        price_value(),
        quantity_value(),
        proptest::option::of("[a-z]{1,8}"),
    )
        .prop_map(|(id, price, quantity, note)| {
            let mut raw = json!({"id": id, "price": price, "quantity": quantity});
            if let (Some(note), Some(obj)) = (note, raw.as_object_mut()) {
                obj.insert("note".into(), json!(note));
            }
            raw
        })
}

/// One cart operation.
#[derive(Debug, Clone)]
pub enum CartOp {
    Add(Value),
    Update(String, i64),
    Increment(String),
    Decrement(String),
    Remove(String),
    Clear,
}

/// Generate a single operation.
pub fn cart_op() -> impl Strategy<Value = CartOp> {
    prop_oneof![
        4 => raw_item_value().prop_map(CartOp::Add),
        2 => (item_id(), -10i64..100).prop_map(|(id, q)| CartOp::Update(id, q)),
        2 => item_id().prop_map(CartOp::Increment),
        2 => item_id().prop_map(CartOp::Decrement),
        1 => item_id().prop_map(CartOp::Remove),
        1 => Just(CartOp::Clear),
    ]
}

/// Generate up to `max_len` operations.
pub fn op_sequence(max_len: usize) -> impl Strategy<Value = Vec<CartOp>> {
    prop::collection::vec(cart_op(), 0..=max_len)
}

/// Apply an operation to a cart.
///
/// Returns whether the operation changed state and reached the save step.
pub fn apply<B: Backend>(cart: &mut CartStore<B>, op: &CartOp) -> bool {
    match op {
        CartOp::Add(raw) => cart.add_item(raw).is_ok(),
        CartOp::Update(id, q) => {
            let known = cart.contains(id);
            cart.update_quantity(id, *q);
            known
        }
        CartOp::Increment(id) => {
            let known = cart.contains(id);
            cart.increment(id);
            known
        }
        CartOp::Decrement(id) => {
            let known = cart.contains(id);
            cart.decrement(id);
            known
        }
        CartOp::Remove(id) => {
            let known = cart.contains(id);
            cart.remove_item(id);
            known
        }
        CartOp::Clear => {
            cart.clear();
            true
        }
    }
}
