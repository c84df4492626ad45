use std::any::Any;
use std::fmt::Debug;

use crate::error::OpathError;
use crate::value::Value;

/// Outcome of a reflected method invocation; failures are boxed so the
/// original cause survives into [`OpathError::Invocation`].
pub type MethodResult = Result<Value, Box<dyn std::error::Error + Send + Sync>>;

/// A native value whose members the evaluator can resolve dynamically.
///
/// Implementors describe themselves through a static [`TypeInfo`]
/// registry; the evaluator never sees the concrete type, only the
/// tables and an [`Any`] handle for the readers to downcast.
pub trait Reflect: Debug {
    fn type_info(&self) -> &'static TypeInfo;
    fn as_any(&self) -> &dyn Any;
}

/// Static member tables for one reflected type.
pub struct TypeInfo {
    pub name: &'static str,
    /// Ancestor type searched when a member is not found here. Readers
    /// registered on an ancestor table must accept the concrete
    /// descendant value handed to them.
    pub parent: Option<&'static TypeInfo>,
    pub accessors: &'static [Accessor],
    pub fields: &'static [Field],
    pub methods: &'static [Method],
}

/// Zero-argument accessor registered under its conventional name
/// (`getFoo`, `isFoo`). `read` returns `None` when the receiver is not
/// of the expected concrete type.
pub struct Accessor {
    pub name: &'static str,
    pub read: fn(&dyn Any) -> Option<Value>,
}

/// Raw field reader, the non-encapsulated fallback.
pub struct Field {
    pub name: &'static str,
    /// Selects `is`-prefixed accessor synthesis over `get`.
    pub boolean: bool,
    pub read: fn(&dyn Any) -> Option<Value>,
}

/// Instance method, looked up by name and argument count.
pub struct Method {
    pub name: &'static str,
    pub arity: usize,
    pub invoke: fn(&dyn Any, &[Value]) -> MethodResult,
}

impl TypeInfo {
    pub fn find_accessor(&'static self, name: &str) -> Option<&'static Accessor> {
        let mut info = Some(self);
        while let Some(current) = info {
            if let Some(accessor) = current.accessors.iter().find(|a| a.name == name) {
                return Some(accessor);
            }
            info = current.parent;
        }
        None
    }

    pub fn find_field(&'static self, name: &str) -> Option<&'static Field> {
        let mut info = Some(self);
        while let Some(current) = info {
            if let Some(field) = current.fields.iter().find(|f| f.name == name) {
                return Some(field);
            }
            info = current.parent;
        }
        None
    }

    pub fn find_method(&'static self, name: &str, arity: usize) -> Option<&'static Method> {
        let mut info = Some(self);
        while let Some(current) = info {
            if let Some(method) = current
                .methods
                .iter()
                .find(|m| m.name == name && m.arity == arity)
            {
                return Some(method);
            }
            info = current.parent;
        }
        None
    }
}

/// Resolve a named member on a reflected object.
///
/// Tries the conventional zero-argument accessor first (`is` + Name for
/// members registered as boolean, `get` + Name otherwise, both when the
/// member has no field entry), then falls back to the raw field reader.
/// Both lookups walk the ancestor-type chain; exhausting it yields
/// [`OpathError::FieldLookup`].
pub fn resolve_member(obj: &dyn Reflect, name: &str) -> Result<Value, OpathError> {
    let info = obj.type_info();
    let capitalized = capitalize(name);
    let field = info.find_field(name);
    let candidates = match field {
        Some(f) if f.boolean => vec![format!("is{capitalized}")],
        Some(_) => vec![format!("get{capitalized}")],
        None => vec![format!("get{capitalized}"), format!("is{capitalized}")],
    };
    for candidate in &candidates {
        if let Some(accessor) = info.find_accessor(candidate) {
            if let Some(value) = (accessor.read)(obj.as_any()) {
                return Ok(value);
            }
        }
    }
    if let Some(field) = field {
        if let Some(value) = (field.read)(obj.as_any()) {
            return Ok(value);
        }
    }
    Err(OpathError::FieldLookup {
        field: name.to_string(),
        type_name: info.name.to_string(),
    })
}

/// Uppercase the first character, except for names that already start
/// with two uppercase characters (`URLValue` keeps its casing).
fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return String::new();
    };
    let rest = chars.as_str();
    let second_upper = rest.chars().next().is_some_and(char::is_uppercase);
    if first.is_uppercase() && second_upper {
        name.to_string()
    } else {
        first.to_uppercase().chain(rest.chars()).collect()
    }
}
