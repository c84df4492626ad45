//! Dot-path expressions for digging a single value out of a
//! heterogeneous object graph: maps, arrays, sets and reflected native
//! types, addressed with compact paths like `user.addresses[0].city` or
//! `data.users[0].say(a,b[0])`.
//!
//! [`parse`] turns a path into an immutable [`Expression`] chain;
//! [`resolve`] walks a chain against a caller-supplied root [`Value`].
//! Both are pure and synchronous, and parsed expressions are safe to
//! share and re-evaluate.

pub mod error;
pub mod expr;
pub mod format;
pub mod output;
pub mod reflect;
pub mod source;
pub mod value;

pub use error::OpathError;
pub use expr::{
    concat, concat_path, is_array_expression, is_method_expression, is_object_expression, parse,
    resolve, resolve_as, resolve_path, Expression,
};
pub use reflect::{Accessor, Field, Method, MethodResult, Reflect, TypeInfo};
pub use value::{order_set, FromValue, Value};
