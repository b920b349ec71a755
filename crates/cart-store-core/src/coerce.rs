//! Explicit coercion of untyped JSON values into ids and numbers.
//!
//! Coercion never fails loudly: a value that cannot be read as a number
//! yields `None`, and the caller decides the default.

use serde_json::Value;

/// Read a JSON value as a finite number.
///
/// - `null` is 0, booleans are 1 or 0
/// - numbers are taken as-is
/// - strings are trimmed; empty is 0, otherwise parsed as a decimal float
/// - arrays and objects are not numbers
///
/// Non-finite results (`NaN`, infinities) are treated as "not a number".
pub fn coerce_number(value: &Value) -> Option<f64> {
    let n = match value {
        Value::Null => 0.0,
        Value::Bool(b) => f64::from(u8::from(*b)),
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => {
            let s = s.trim();
            if s.is_empty() {
                0.0
            } else {
                s.parse::<f64>().ok()?
            }
        }
        Value::Array(_) | Value::Object(_) => return None,
    };
    n.is_finite().then_some(n)
}

/// Read a JSON value as an item id.
///
/// Strings are used verbatim and numbers in their decimal form, with no
/// fraction when the value is integral (`1e2` is `"100"`). Anything else is
/// absent.
pub fn coerce_id(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) if n.is_f64() => n.as_f64().map(|f| {
            if f.fract() == 0.0 && f.abs() < 1e21 {
                format!("{:.0}", f + 0.0)
            } else {
                f.to_string()
            }
        }),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// A requested quantity, coerced but not yet clamped.
///
/// Built from integers, floats, strings or raw JSON values; [`Quantity::resolve`]
/// applies the defaulting and clamping rules.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quantity(Option<f64>);

impl Quantity {
    /// The smallest quantity a line item may hold.
    pub const MIN: u64 = 1;

    /// Resolve to a stored quantity: default 1 when not a finite number,
    /// clamp to at least 1, drop any fractional part.
    pub fn resolve(self) -> u64 {
        match self.0 {
            Some(n) if n.is_finite() => n.max(Self::MIN as f64).trunc() as u64,
            _ => Self::MIN,
        }
    }
}

impl From<&Value> for Quantity {
    fn from(value: &Value) -> Self {
        Self(coerce_number(value))
    }
}

impl From<Value> for Quantity {
    fn from(value: Value) -> Self {
        Self::from(&value)
    }
}

impl From<&str> for Quantity {
    fn from(value: &str) -> Self {
        Self(coerce_number(&Value::String(value.to_string())))
    }
}

impl From<f64> for Quantity {
    fn from(value: f64) -> Self {
        Self(value.is_finite().then_some(value))
    }
}

impl From<Option<f64>> for Quantity {
    fn from(value: Option<f64>) -> Self {
        Self(value.filter(|n| n.is_finite()))
    }
}

macro_rules! quantity_from_int {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Quantity {
                fn from(value: $t) -> Self {
                    Self(Some(value as f64))
                }
            }
        )*
    };
}

quantity_from_int!(i32, i64, u32, u64, usize);

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_coerce_number() {
        assert_eq!(coerce_number(&json!(null)), Some(0.0));
        assert_eq!(coerce_number(&json!(true)), Some(1.0));
        assert_eq!(coerce_number(&json!(12.5)), Some(12.5));
        assert_eq!(coerce_number(&json!(" 7 ")), Some(7.0));
        assert_eq!(coerce_number(&json!("")), Some(0.0));
        assert_eq!(coerce_number(&json!("abc")), None);
        assert_eq!(coerce_number(&json!("inf")), None);
        assert_eq!(coerce_number(&json!([1])), None);
        assert_eq!(coerce_number(&json!({})), None);
    }

    #[test]
    fn test_coerce_id() {
        assert_eq!(coerce_id(&json!("a")), Some("a".to_string()));
        assert_eq!(coerce_id(&json!(42)), Some("42".to_string()));
        assert_eq!(coerce_id(&json!(1e2)), Some("100".to_string()));
        assert_eq!(coerce_id(&json!(-3.0)), Some("-3".to_string()));
        assert_eq!(coerce_id(&json!(-0.0)), Some("0".to_string()));
        assert_eq!(coerce_id(&json!(2.5)), Some("2.5".to_string()));
        assert_eq!(coerce_id(&json!(null)), None);
        assert_eq!(coerce_id(&json!(false)), None);
    }

    #[test]
    fn test_quantity_resolve() {
        assert_eq!(Quantity::from(-5).resolve(), 1);
        assert_eq!(Quantity::from(0).resolve(), 1);
        assert_eq!(Quantity::from(3).resolve(), 3);
        assert_eq!(Quantity::from(2.9).resolve(), 2);
        assert_eq!(Quantity::from(f64::NAN).resolve(), 1);
        assert_eq!(Quantity::from("nope").resolve(), 1);
        assert_eq!(Quantity::from(&json!("4")).resolve(), 4);
    }
}
