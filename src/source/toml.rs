use crate::error::OpathError;
use crate::value::Value;

/// Parse a TOML string into a [`Value`] graph.
pub fn load(input: &str) -> Result<Value, OpathError> {
    let toml_val: toml::Value =
        toml::from_str(input).map_err(|e| OpathError::Parse(e.to_string()))?;
    Ok(toml_to_value(toml_val))
}

fn toml_to_value(val: toml::Value) -> Value {
    match val {
        toml::Value::String(s) => Value::String(s),
        toml::Value::Integer(i) => Value::Int(i),
        toml::Value::Float(f) => Value::Float(f),
        toml::Value::Boolean(b) => Value::Bool(b),
        toml::Value::Datetime(dt) => Value::String(dt.to_string()),
        toml::Value::Array(arr) => Value::Array(arr.into_iter().map(toml_to_value).collect()),
        toml::Value::Table(table) => Value::Map(
            table
                .into_iter()
                .map(|(k, v)| (k, toml_to_value(v)))
                .collect(),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn simple_values() {
        let input = r#"
name = "test"
version = 42
enabled = true
"#;
        let val = load(input).unwrap();
        let map = val.as_map().unwrap();
        assert_eq!(map["name"], Value::from("test"));
        assert_eq!(map["version"], Value::from(42));
        assert_eq!(map["enabled"], Value::from(true));
    }

    #[test]
    fn nested_tables() {
        let input = r#"
[package]
name = "opath"

[package.metadata]
category = "tools"
"#;
        let val = load(input).unwrap();
        assert_eq!(
            crate::expr::resolve_path(&val, "package.metadata.category").unwrap(),
            Value::from("tools")
        );
    }

    #[test]
    fn arrays() {
        let val = load("tags = [\"cli\", \"rust\"]").unwrap();
        assert_eq!(
            crate::expr::resolve_path(&val, "tags[1]").unwrap(),
            Value::from("rust")
        );
    }

    #[test]
    fn datetimes_become_strings() {
        let val = load("created = 2024-01-15T10:30:00Z").unwrap();
        let map = val.as_map().unwrap();
        assert!(map["created"].as_str().unwrap().contains("2024-01-15"));
    }

    #[test]
    fn invalid_toml_errors() {
        assert!(load("= invalid").is_err());
    }
}
