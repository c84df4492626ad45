use crate::error::OpathError;
use crate::format::Format;
use crate::value::Value;

/// Format a resolved [`Value`] as a string in the given format.
///
/// TOML has no top-level scalar form, so TOML output falls back to JSON
/// unless the value is a map.
pub fn format_value(
    value: &Value,
    format: Format,
    compact: bool,
    raw: bool,
) -> Result<String, OpathError> {
    // Raw mode: if the value is a string, output it without quotes
    if raw {
        if let Value::String(s) = value {
            return Ok(s.clone());
        }
    }

    match format {
        Format::Json => format_json(value, compact),
        Format::Yaml => format_yaml(value),
        Format::Toml => {
            if value.as_map().is_some() {
                toml::to_string(value).map_err(|e| OpathError::Parse(e.to_string()))
            } else {
                format_json(value, compact)
            }
        }
    }
}

fn format_json(value: &Value, compact: bool) -> Result<String, OpathError> {
    let result = if compact {
        serde_json::to_string(value)
    } else {
        serde_json::to_string_pretty(value)
    };
    result.map_err(|e| OpathError::Parse(e.to_string()))
}

fn format_yaml(value: &Value) -> Result<String, OpathError> {
    serde_yaml::to_string(value).map_err(|e| OpathError::Parse(e.to_string()))
}
