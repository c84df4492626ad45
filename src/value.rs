use std::collections::hash_map::DefaultHasher;
use std::collections::BTreeMap;
use std::hash::{Hash, Hasher};
use std::rc::Rc;

use serde::ser::{Error as SerError, SerializeSeq};
use serde::{Serialize, Serializer};

use crate::error::OpathError;
use crate::reflect::Reflect;

/// The runtime graph an expression is evaluated against.
///
/// `Array` covers native arrays and ordered lists alike; `Set` carries
/// unordered semantics and is only given a concrete order when indexed
/// (see [`order_set`]). `Object` holds a reflected native value whose
/// members are resolved through its [`TypeInfo`](crate::reflect::TypeInfo)
/// registry.
#[derive(Debug, Clone)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    Array(Vec<Value>),
    Set(Vec<Value>),
    Map(BTreeMap<String, Value>),
    Object(Rc<dyn Reflect>),
}

impl Value {
    /// Wrap a reflected native value.
    pub fn object<T: Reflect + 'static>(value: T) -> Value {
        Value::Object(Rc::new(value))
    }

    /// Build an unordered set from any sequence of values.
    pub fn set<I: IntoIterator<Item = Value>>(items: I) -> Value {
        Value::Set(items.into_iter().collect())
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int(i) => Some(*i as f64),
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&BTreeMap<String, Value>> {
        match self {
            Value::Map(map) => Some(map),
            _ => None,
        }
    }

    /// Human-readable type name for diagnostics.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "boolean",
            Value::Int(_) | Value::Float(_) => "number",
            Value::String(_) => "string",
            Value::Array(_) => "array",
            Value::Set(_) => "set",
            Value::Map(_) => "map",
            Value::Object(obj) => obj.type_info().name,
        }
    }

    /// Ordering key used to materialize sets for indexed access.
    ///
    /// Structural for plain data, reference identity for reflected
    /// objects. Deterministic within one process run only: the hash of
    /// an object changes between runs, so set order must not be relied
    /// on across restarts.
    pub fn order_key(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        self.feed(&mut hasher);
        hasher.finish()
    }

    fn feed(&self, hasher: &mut DefaultHasher) {
        match self {
            Value::Null => 0u8.hash(hasher),
            Value::Bool(b) => {
                1u8.hash(hasher);
                b.hash(hasher);
            }
            Value::Int(i) => {
                2u8.hash(hasher);
                i.hash(hasher);
            }
            Value::Float(f) => {
                3u8.hash(hasher);
                f.to_bits().hash(hasher);
            }
            Value::String(s) => {
                4u8.hash(hasher);
                s.hash(hasher);
            }
            Value::Array(items) => {
                5u8.hash(hasher);
                for item in items {
                    item.feed(hasher);
                }
            }
            Value::Set(items) => {
                // Order-independent: equal sets in different insertion
                // order must hash alike.
                6u8.hash(hasher);
                let mut acc = 0u64;
                for item in items {
                    acc ^= item.order_key();
                }
                acc.hash(hasher);
            }
            Value::Map(map) => {
                7u8.hash(hasher);
                for (key, val) in map {
                    key.hash(hasher);
                    val.feed(hasher);
                }
            }
            Value::Object(obj) => {
                8u8.hash(hasher);
                (Rc::as_ptr(obj).cast::<u8>() as usize).hash(hasher);
            }
        }
    }
}

/// Materialize a set's elements in ascending [`Value::order_key`] order.
///
/// The result is deterministic for the lifetime of the process but not
/// portable across runs.
pub fn order_set(items: &[Value]) -> Vec<&Value> {
    let mut ordered: Vec<&Value> = items.iter().collect();
    ordered.sort_by_key(|item| item.order_key());
    ordered
}

impl PartialEq for Value {
    fn eq(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Array(a), Value::Array(b)) => a == b,
            (Value::Set(a), Value::Set(b)) => a == b,
            (Value::Map(a), Value::Map(b)) => a == b,
            (Value::Object(a), Value::Object(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Value {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Value {
        Value::Int(i)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Value {
        Value::Int(i64::from(i))
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Value {
        Value::Float(f)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Value {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Value {
        Value::String(s)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Value {
        Value::Array(items)
    }
}

impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Value {
        match json {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Value::Int(i)
                } else {
                    n.as_f64().map(Value::Float).unwrap_or(Value::Null)
                }
            }
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(items) => {
                Value::Array(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(map) => Value::Map(
                map.into_iter()
                    .map(|(key, val)| (key, Value::from(val)))
                    .collect(),
            ),
        }
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Null => serializer.serialize_unit(),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Int(i) => serializer.serialize_i64(*i),
            Value::Float(f) => serializer.serialize_f64(*f),
            Value::String(s) => serializer.serialize_str(s),
            Value::Array(items) => items.serialize(serializer),
            Value::Set(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in order_set(items) {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Value::Map(map) => map.serialize(serializer),
            Value::Object(obj) => Err(SerError::custom(format!(
                "reflected type {} is not serializable",
                obj.type_info().name
            ))),
        }
    }
}

/// Conversion out of a resolved [`Value`], backing typed resolution.
///
/// Failures surface as [`OpathError::TypeMismatch`] at the call site,
/// never inside the evaluator.
pub trait FromValue: Sized {
    fn from_value(value: Value) -> Result<Self, OpathError>;
}

impl FromValue for Value {
    fn from_value(value: Value) -> Result<Self, OpathError> {
        Ok(value)
    }
}

impl FromValue for String {
    fn from_value(value: Value) -> Result<Self, OpathError> {
        match value {
            Value::String(s) => Ok(s),
            other => Err(OpathError::TypeMismatch(format!(
                "expected string, found {}",
                other.type_name()
            ))),
        }
    }
}

impl FromValue for i64 {
    fn from_value(value: Value) -> Result<Self, OpathError> {
        match value {
            Value::Int(i) => Ok(i),
            other => Err(OpathError::TypeMismatch(format!(
                "expected integer, found {}",
                other.type_name()
            ))),
        }
    }
}

impl FromValue for f64 {
    fn from_value(value: Value) -> Result<Self, OpathError> {
        value.as_f64().ok_or_else(|| {
            OpathError::TypeMismatch(format!("expected number, found {}", value.type_name()))
        })
    }
}

impl FromValue for bool {
    fn from_value(value: Value) -> Result<Self, OpathError> {
        match value {
            Value::Bool(b) => Ok(b),
            other => Err(OpathError::TypeMismatch(format!(
                "expected boolean, found {}",
                other.type_name()
            ))),
        }
    }
}

impl FromValue for Vec<Value> {
    fn from_value(value: Value) -> Result<Self, OpathError> {
        match value {
            Value::Array(items) => Ok(items),
            other => Err(OpathError::TypeMismatch(format!(
                "expected array, found {}",
                other.type_name()
            ))),
        }
    }
}

impl<T: FromValue> FromValue for Option<T> {
    fn from_value(value: Value) -> Result<Self, OpathError> {
        match value {
            Value::Null => Ok(None),
            other => T::from_value(other).map(Some),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn structural_equality() {
        let a = Value::Array(vec![Value::from(1), Value::from("x")]);
        let b = Value::Array(vec![Value::from(1), Value::from("x")]);
        assert_eq!(a, b);
        assert_ne!(a, Value::Array(vec![Value::from(1)]));
    }

    #[test]
    fn set_equality_is_positional_but_hash_is_not() {
        let a = Value::set(vec![Value::from(1), Value::from(2)]);
        let b = Value::set(vec![Value::from(2), Value::from(1)]);
        assert_ne!(a, b);
        assert_eq!(a.order_key(), b.order_key());
    }

    #[test]
    fn order_set_is_stable_within_run() {
        let items = vec![Value::from("c"), Value::from("a"), Value::from("b")];
        let first: Vec<u64> = order_set(&items).iter().map(|v| v.order_key()).collect();
        let second: Vec<u64> = order_set(&items).iter().map(|v| v.order_key()).collect();
        assert_eq!(first, second);
        assert!(first.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn from_json_document() {
        let json: serde_json::Value =
            serde_json::from_str(r#"{"name": "a", "tags": [1, 2.5, null]}"#).unwrap();
        let val = Value::from(json);
        let map = val.as_map().unwrap();
        assert_eq!(map["name"], Value::from("a"));
        assert_eq!(
            map["tags"],
            Value::Array(vec![Value::from(1), Value::from(2.5), Value::Null])
        );
    }

    #[test]
    fn serialize_orders_sets() {
        let set = Value::set(vec![Value::from("x"), Value::from("y")]);
        let once = serde_json::to_string(&set).unwrap();
        let twice = serde_json::to_string(&set).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn typed_conversions() {
        assert_eq!(String::from_value(Value::from("hi")).unwrap(), "hi");
        assert_eq!(i64::from_value(Value::from(7)).unwrap(), 7);
        assert_eq!(f64::from_value(Value::from(7)).unwrap(), 7.0);
        assert_eq!(Option::<String>::from_value(Value::Null).unwrap(), None);
        assert!(String::from_value(Value::from(1)).is_err());
    }
}
