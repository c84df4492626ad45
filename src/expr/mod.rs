pub mod eval;
pub mod single;
pub mod split;
pub mod tree;

pub use eval::{resolve, resolve_as, resolve_path};
pub use single::{is_array_expression, is_method_expression, is_object_expression};
pub use tree::{concat, concat_path, Expression};

use crate::error::OpathError;

/// Parse a path like `user.addresses[0].city` into an [`Expression`]
/// chain. A blank path parses to the empty expression.
pub fn parse(path: &str) -> Result<Expression, OpathError> {
    let mut expression = Expression::Empty;
    for segment in split::split(path) {
        let mut child = single::parse_single(&segment)?;
        if child.is_empty() {
            // leading/trailing/doubled dots contribute nothing
            continue;
        }
        child.set_parent(expression)?;
        expression = child;
    }
    Ok(expression)
}
