use crate::error::OpathError;
use crate::value::Value;

/// Parse a JSON string into a [`Value`] graph.
pub fn load(input: &str) -> Result<Value, OpathError> {
    let json: serde_json::Value =
        serde_json::from_str(input).map_err(|e| OpathError::Parse(e.to_string()))?;
    Ok(Value::from(json))
}
