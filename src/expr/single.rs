use std::sync::LazyLock;

use regex::Regex;

use crate::error::OpathError;

use super::tree::{ArrayExpression, Expression, MethodExpression, ObjectExpression};

static ARRAY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\w*(\[\w+\])+$").expect("array grammar pattern"));
static METHOD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\w+\((.+(\s*,\s*.+)*)?\)$").expect("method grammar pattern"));
static OBJECT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\w+$").expect("object grammar pattern"));
static INDEX_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[(\w+)\]").expect("index capture pattern"));

/// `identifier? ([int])+`, e.g. `abc[0][1]` or bare `[2]`.
pub fn is_array_expression(segment: &str) -> bool {
    ARRAY_RE.is_match(segment)
}

/// `identifier ( args? )`, e.g. `say()` or `say(a,b[0])`.
pub fn is_method_expression(segment: &str) -> bool {
    METHOD_RE.is_match(segment)
}

/// A bare identifier.
pub fn is_object_expression(segment: &str) -> bool {
    OBJECT_RE.is_match(segment)
}

/// Classify one segment and build its node, parent left at `Empty`.
///
/// Grammars are tried in fixed priority order: array, method, object.
/// A segment that matches the array shape but carries a non-integer
/// index is a hard parse failure, as is any other segment containing
/// parentheses. Everything else is accepted as an object segment; a
/// blank segment yields `Empty`.
pub fn parse_single(segment: &str) -> Result<Expression, OpathError> {
    if segment.is_empty() {
        return Ok(Expression::Empty);
    }
    if is_array_expression(segment) {
        return parse_array(segment);
    }
    if is_method_expression(segment) {
        return parse_method(segment);
    }
    if segment.contains('(') || segment.contains(')') {
        return Err(OpathError::InvalidExpression(format!(
            "\"{segment}\" is not a method expression"
        )));
    }
    Ok(Expression::Object(ObjectExpression::new(segment)))
}

fn parse_array(segment: &str) -> Result<Expression, OpathError> {
    let name = &segment[..segment.find('[').unwrap_or(segment.len())];
    let mut indices = Vec::new();
    for capture in INDEX_RE.captures_iter(segment) {
        let text = &capture[1];
        let index: usize = text.parse().map_err(|_| {
            OpathError::InvalidExpression(format!("\"{segment}\": index is not a number"))
        })?;
        indices.push(index);
    }
    Ok(Expression::Array(ArrayExpression::new(name, indices)))
}

fn parse_method(segment: &str) -> Result<Expression, OpathError> {
    let open = segment.find('(').unwrap_or(segment.len());
    let close = segment.rfind(')').unwrap_or(segment.len());
    let name = &segment[..open];
    let mut arguments = Vec::new();
    for argument in segment[open + 1..close].split(',') {
        let parsed = super::parse(argument.trim())?;
        if !parsed.is_empty() {
            arguments.push(parsed);
        }
    }
    Ok(Expression::Method(MethodExpression::new(name, arguments)))
}
