use thiserror::Error;

#[derive(Error, Debug)]
pub enum OpathError {
    #[error("unsupported format: {0}")]
    UnsupportedFormat(String),

    #[error("cannot detect format: no file extension")]
    NoExtension,

    #[error("unknown file extension: .{0}")]
    UnknownExtension(String),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("invalid path expression: {0}")]
    InvalidExpression(String),

    #[error("no field \"{field}\" on type {type_name} or its ancestors")]
    FieldLookup { field: String, type_name: String },

    #[error("type mismatch: {0}")]
    TypeMismatch(String),

    #[error("index out of bounds: {index} (length {length})")]
    IndexOutOfRange { index: usize, length: usize },

    #[error("no method \"{method}\" with {arity} argument(s) on type {type_name}")]
    NoSuchMethod {
        method: String,
        arity: usize,
        type_name: String,
    },

    #[error("invocation of method \"{method}\" failed")]
    Invocation {
        method: String,
        #[source]
        cause: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("cannot attach a parent to the empty expression")]
    NullParent,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
