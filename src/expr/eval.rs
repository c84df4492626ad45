use crate::error::OpathError;
use crate::reflect;
use crate::value::{order_set, FromValue, Value};

use super::tree::{ArrayExpression, Expression, MethodExpression};

/// Walk `expression` from its root segment to its leaf against `root`.
///
/// An absent intermediate value is not an error: the walk stops and the
/// result is `Null`. Everything else that goes wrong surfaces as a
/// typed [`OpathError`].
pub fn resolve(root: &Value, expression: &Expression) -> Result<Value, OpathError> {
    let mut current = root.clone();
    for node in expression.chain() {
        if current.is_null() {
            return Ok(Value::Null);
        }
        current = match node {
            Expression::Empty => continue,
            Expression::Object(o) => member(&current, &o.name)?,
            Expression::Array(a) => index_access(&current, a)?,
            Expression::Method(m) => invoke(root, &current, m)?,
        };
    }
    Ok(current)
}

/// Parse `path` and resolve it in one call.
pub fn resolve_path(root: &Value, path: &str) -> Result<Value, OpathError> {
    resolve(root, &super::parse(path)?)
}

/// [`resolve_path`] plus a typed conversion of the result. Conversion
/// failure is reported here, never inside the walk.
pub fn resolve_as<T: FromValue>(root: &Value, path: &str) -> Result<T, OpathError> {
    T::from_value(resolve_path(root, path)?)
}

/// Member lookup on the current value. Maps are tolerant: a missing key
/// yields `Null`. Reflected objects go through the accessor/field
/// resolver; anything else cannot carry members.
fn member(current: &Value, name: &str) -> Result<Value, OpathError> {
    match current {
        Value::Map(map) => Ok(map.get(name).cloned().unwrap_or(Value::Null)),
        Value::Object(obj) => reflect::resolve_member(obj.as_ref(), name),
        other => Err(OpathError::FieldLookup {
            field: name.to_string(),
            type_name: other.type_name().to_string(),
        }),
    }
}

fn index_access(current: &Value, expr: &ArrayExpression) -> Result<Value, OpathError> {
    let mut value = if expr.name.is_empty() {
        current.clone()
    } else {
        member(current, &expr.name)?
    };
    for &index in &expr.indices {
        if value.is_null() {
            return Ok(Value::Null);
        }
        value = index_value(&value, index)?;
    }
    Ok(value)
}

fn index_value(value: &Value, index: usize) -> Result<Value, OpathError> {
    match value {
        Value::Array(items) => items.get(index).cloned().ok_or(OpathError::IndexOutOfRange {
            index,
            length: items.len(),
        }),
        Value::Set(items) => order_set(items)
            .get(index)
            .map(|item| (*item).clone())
            .ok_or(OpathError::IndexOutOfRange {
                index,
                length: items.len(),
            }),
        other => Err(OpathError::TypeMismatch(format!(
            "cannot index into {}: not an array, list or set",
            other.type_name()
        ))),
    }
}

/// Invoke `expr` on the current value. Arguments are sub-expressions
/// resolved against the original root, not against `current`.
fn invoke(root: &Value, current: &Value, expr: &MethodExpression) -> Result<Value, OpathError> {
    let mut arguments = Vec::with_capacity(expr.arguments.len());
    for argument in &expr.arguments {
        arguments.push(resolve(root, argument)?);
    }
    match current {
        Value::Object(obj) => {
            let info = obj.type_info();
            let method = info.find_method(&expr.name, arguments.len()).ok_or_else(|| {
                OpathError::NoSuchMethod {
                    method: expr.name.clone(),
                    arity: arguments.len(),
                    type_name: info.name.to_string(),
                }
            })?;
            (method.invoke)(obj.as_any(), &arguments).map_err(|cause| OpathError::Invocation {
                method: expr.name.clone(),
                cause,
            })
        }
        other => Err(OpathError::NoSuchMethod {
            method: expr.name.clone(),
            arity: arguments.len(),
            type_name: other.type_name().to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use std::any::Any;
    use std::collections::BTreeMap;

    use super::*;
    use crate::reflect::{Accessor, Field, Method, Reflect, TypeInfo};

    #[derive(Debug)]
    struct User {
        name: String,
        age: i64,
    }

    static USER_TYPE: TypeInfo = TypeInfo {
        name: "User",
        parent: None,
        accessors: &[Accessor {
            name: "getName",
            read: |this| {
                this.downcast_ref::<User>()
                    .map(|u| Value::from(u.name.as_str()))
            },
        }],
        fields: &[
            Field {
                name: "name",
                boolean: false,
                read: |this| {
                    this.downcast_ref::<User>()
                        .map(|u| Value::from(u.name.as_str()))
                },
            },
            Field {
                name: "age",
                boolean: false,
                read: |this| this.downcast_ref::<User>().map(|u| Value::from(u.age)),
            },
        ],
        methods: &[
            Method {
                name: "say",
                arity: 0,
                invoke: |_, _| Ok(Value::from("Hi")),
            },
            Method {
                name: "say",
                arity: 2,
                invoke: |this, args| {
                    let user = this
                        .downcast_ref::<User>()
                        .ok_or("receiver is not a User")?;
                    let mut parts = vec![user.name.clone()];
                    for arg in args {
                        parts.push(arg.as_str().unwrap_or("?").to_string());
                    }
                    Ok(Value::from(parts.join("-")))
                },
            },
            Method {
                name: "explode",
                arity: 0,
                invoke: |_, _| Err("boom".into()),
            },
        ],
    };

    impl Reflect for User {
        fn type_info(&self) -> &'static TypeInfo {
            &USER_TYPE
        }
        fn as_any(&self) -> &dyn Any {
            self
        }
    }

    fn user(name: &str, age: i64) -> Value {
        Value::object(User {
            name: name.to_string(),
            age,
        })
    }

    fn map(entries: Vec<(&str, Value)>) -> Value {
        let map: BTreeMap<String, Value> = entries
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect();
        Value::Map(map)
    }

    #[test]
    fn empty_expression_returns_root() {
        let root = map(vec![("a", Value::from(1))]);
        assert_eq!(resolve_path(&root, "").unwrap(), root);
    }

    #[test]
    fn map_then_object_member() {
        let root = map(vec![("user", user("a", 20))]);
        assert_eq!(resolve_path(&root, "user.name").unwrap(), Value::from("a"));
        assert_eq!(resolve_path(&root, "user.age").unwrap(), Value::from(20));
    }

    #[test]
    fn missing_map_key_is_null_not_error() {
        let root = map(vec![("a", Value::from(1))]);
        assert_eq!(resolve_path(&root, "missing").unwrap(), Value::Null);
        // and the rest of the chain short-circuits through it
        assert_eq!(resolve_path(&root, "missing.x[0].y").unwrap(), Value::Null);
    }

    #[test]
    fn multi_index_and_null_short_circuit() {
        let list = Value::Array(vec![Value::Array(vec![
            Value::Array(vec![Value::from("b")]),
            Value::Null,
        ])]);
        let root = map(vec![("list", list)]);
        assert_eq!(
            resolve_path(&root, "list[0][0][0]").unwrap(),
            Value::from("b")
        );
        assert_eq!(resolve_path(&root, "list[0][1][0]").unwrap(), Value::Null);
    }

    #[test]
    fn nameless_index_applies_to_current_value() {
        let root = Value::Array(vec![Value::from("x"), Value::from("y")]);
        assert_eq!(resolve_path(&root, "[1]").unwrap(), Value::from("y"));
    }

    #[test]
    fn index_out_of_range() {
        let root = map(vec![("items", Value::Array(vec![Value::from(1)]))]);
        let err = resolve_path(&root, "items[5]").unwrap_err();
        assert!(matches!(
            err,
            OpathError::IndexOutOfRange { index: 5, length: 1 }
        ));
    }

    #[test]
    fn indexing_a_scalar_is_a_type_mismatch() {
        let root = map(vec![("n", Value::from(3))]);
        assert!(matches!(
            resolve_path(&root, "n[0]").unwrap_err(),
            OpathError::TypeMismatch(_)
        ));
    }

    #[test]
    fn set_indexing_is_deterministic_within_run() {
        let root = map(vec![(
            "set",
            Value::set(vec![Value::from("p"), Value::from("q"), Value::from("r")]),
        )]);
        let first = resolve_path(&root, "set[1]").unwrap();
        let second = resolve_path(&root, "set[1]").unwrap();
        assert_eq!(first, second);
        assert!(resolve_path(&root, "set[3]").is_err());
    }

    #[test]
    fn zero_argument_method_call() {
        let users = Value::Array(vec![user("a", 20)]);
        let root = map(vec![("data", map(vec![("users", users)]))]);
        assert_eq!(
            resolve_path(&root, "data.users[0].say()").unwrap(),
            Value::from("Hi")
        );
    }

    #[test]
    fn method_arguments_resolve_against_root() {
        let root = map(vec![
            ("user", user("a", 20)),
            ("x", Value::from("one")),
            ("ys", Value::Array(vec![Value::from("two")])),
        ]);
        assert_eq!(
            resolve_path(&root, "user.say(x,ys[0])").unwrap(),
            Value::from("a-one-two")
        );
    }

    #[test]
    fn missing_method_errors() {
        let root = map(vec![("user", user("a", 20))]);
        assert!(matches!(
            resolve_path(&root, "user.fly()").unwrap_err(),
            OpathError::NoSuchMethod { .. }
        ));
        // wrong arity is also a miss
        assert!(matches!(
            resolve_path(&root, "user.say(x)").unwrap_err(),
            OpathError::NoSuchMethod { .. }
        ));
    }

    #[test]
    fn method_failure_preserves_cause() {
        let root = map(vec![("user", user("a", 20))]);
        match resolve_path(&root, "user.explode()").unwrap_err() {
            OpathError::Invocation { method, cause } => {
                assert_eq!(method, "explode");
                assert_eq!(cause.to_string(), "boom");
            }
            other => panic!("expected invocation error, got {other:?}"),
        }
    }

    #[test]
    fn member_on_scalar_errors() {
        let root = map(vec![("s", Value::from("text"))]);
        assert!(matches!(
            resolve_path(&root, "s.len").unwrap_err(),
            OpathError::FieldLookup { .. }
        ));
    }

    #[test]
    fn typed_resolution() {
        let root = map(vec![("user", user("a", 20))]);
        let name: String = resolve_as(&root, "user.name").unwrap();
        assert_eq!(name, "a");
        let missing: Option<String> = resolve_as(&root, "nobody").unwrap();
        assert_eq!(missing, None);
        assert!(resolve_as::<i64>(&root, "user.name").is_err());
    }
}
