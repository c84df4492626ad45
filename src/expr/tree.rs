use std::fmt;

use crate::error::OpathError;

/// One parsed path, represented as a parent-linked chain whose leaf is
/// the final segment. `Empty` is the root terminator and also the
/// result of parsing a blank path.
///
/// Equality, hashing and [`Display`](fmt::Display) are structural;
/// rendering a non-empty expression produces text that re-parses to an
/// equal expression.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Expression {
    Empty,
    Object(ObjectExpression),
    Array(ArrayExpression),
    Method(MethodExpression),
}

/// Bare property/key lookup: `name`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ObjectExpression {
    pub name: String,
    pub parent: Box<Expression>,
}

/// Indexed access: `name[0][1]`. `name` may be empty when the indices
/// apply directly to the current value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ArrayExpression {
    pub name: String,
    pub indices: Vec<usize>,
    pub parent: Box<Expression>,
}

/// Method invocation: `name(arg,...)`. Each argument is a full
/// sub-expression, resolved against the original root at evaluation
/// time.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MethodExpression {
    pub name: String,
    pub arguments: Vec<Expression>,
    pub parent: Box<Expression>,
}

impl ObjectExpression {
    pub fn new(name: impl Into<String>) -> Self {
        ObjectExpression {
            name: name.into(),
            parent: Box::new(Expression::Empty),
        }
    }
}

impl ArrayExpression {
    pub fn new(name: impl Into<String>, indices: Vec<usize>) -> Self {
        ArrayExpression {
            name: name.into(),
            indices,
            parent: Box::new(Expression::Empty),
        }
    }
}

impl MethodExpression {
    pub fn new(name: impl Into<String>, arguments: Vec<Expression>) -> Self {
        MethodExpression {
            name: name.into(),
            arguments,
            parent: Box::new(Expression::Empty),
        }
    }
}

impl Expression {
    pub fn is_empty(&self) -> bool {
        matches!(self, Expression::Empty)
    }

    /// The node's parent; `Empty` both for the sentinel itself and for
    /// a chain's root-most node.
    pub fn parent(&self) -> &Expression {
        match self {
            Expression::Empty => &Expression::Empty,
            Expression::Object(o) => &o.parent,
            Expression::Array(a) => &a.parent,
            Expression::Method(m) => &m.parent,
        }
    }

    pub fn has_parent(&self) -> bool {
        !self.parent().is_empty()
    }

    /// Replace this node's parent. The sentinel cannot carry a parent;
    /// attaching one is an [`OpathError::NullParent`] failure.
    pub fn set_parent(&mut self, parent: Expression) -> Result<(), OpathError> {
        match self {
            Expression::Empty => Err(OpathError::NullParent),
            Expression::Object(o) => {
                o.parent = Box::new(parent);
                Ok(())
            }
            Expression::Array(a) => {
                a.parent = Box::new(parent);
                Ok(())
            }
            Expression::Method(m) => {
                m.parent = Box::new(parent);
                Ok(())
            }
        }
    }

    /// The chain's nodes from root segment to leaf segment, excluding
    /// the `Empty` terminator.
    pub fn chain(&self) -> Vec<&Expression> {
        let mut nodes = Vec::new();
        let mut current = self;
        while !current.is_empty() {
            nodes.push(current);
            current = current.parent();
        }
        nodes.reverse();
        nodes
    }
}

/// Graft a clone of `child` beneath `parent`, leaving both inputs
/// untouched. Either side being `Empty` returns the other unchanged.
pub fn concat(parent: &Expression, child: &Expression) -> Expression {
    if child.is_empty() {
        return parent.clone();
    }
    if parent.is_empty() {
        return child.clone();
    }
    graft(child.clone(), parent.clone())
}

/// [`concat`] with the child given as path text.
pub fn concat_path(parent: &Expression, child: &str) -> Result<Expression, OpathError> {
    Ok(concat(parent, &super::parse(child)?))
}

/// Rebuild `expr` with `parent` attached beneath its root-most node.
fn graft(expr: Expression, parent: Expression) -> Expression {
    match expr {
        Expression::Empty => parent,
        Expression::Object(o) => Expression::Object(ObjectExpression {
            name: o.name,
            parent: Box::new(graft(*o.parent, parent)),
        }),
        Expression::Array(a) => Expression::Array(ArrayExpression {
            name: a.name,
            indices: a.indices,
            parent: Box::new(graft(*a.parent, parent)),
        }),
        Expression::Method(m) => Expression::Method(MethodExpression {
            name: m.name,
            arguments: m.arguments,
            parent: Box::new(graft(*m.parent, parent)),
        }),
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn prefix(f: &mut fmt::Formatter<'_>, parent: &Expression) -> fmt::Result {
            if parent.is_empty() {
                Ok(())
            } else {
                write!(f, "{parent}.")
            }
        }

        match self {
            Expression::Empty => Ok(()),
            Expression::Object(o) => {
                prefix(f, &o.parent)?;
                write!(f, "{}", o.name)
            }
            Expression::Array(a) => {
                prefix(f, &a.parent)?;
                write!(f, "{}", a.name)?;
                for index in &a.indices {
                    write!(f, "[{index}]")?;
                }
                Ok(())
            }
            Expression::Method(m) => {
                prefix(f, &m.parent)?;
                write!(f, "{}(", m.name)?;
                for (i, argument) in m.arguments.iter().enumerate() {
                    if i > 0 {
                        write!(f, ",")?;
                    }
                    write!(f, "{argument}")?;
                }
                write!(f, ")")
            }
        }
    }
}
