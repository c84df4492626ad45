use crate::error::OpathError;
use crate::value::Value;

/// Parse a YAML string into a [`Value`] graph.
///
/// Mappings tagged `!!set` load as [`Value::Set`]; every other tag is
/// unwrapped and its payload converted as usual.
pub fn load(input: &str) -> Result<Value, OpathError> {
    let yaml: serde_yaml::Value =
        serde_yaml::from_str(input).map_err(|e| OpathError::Parse(e.to_string()))?;
    yaml_to_value(yaml)
}

fn yaml_to_value(yaml: serde_yaml::Value) -> Result<Value, OpathError> {
    match yaml {
        serde_yaml::Value::Null => Ok(Value::Null),
        serde_yaml::Value::Bool(b) => Ok(Value::Bool(b)),
        serde_yaml::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Ok(Value::Int(i))
            } else if let Some(f) = n.as_f64() {
                Ok(Value::Float(f))
            } else {
                Ok(Value::Null)
            }
        }
        serde_yaml::Value::String(s) => Ok(Value::String(s)),
        serde_yaml::Value::Sequence(seq) => {
            let items: Result<Vec<Value>, _> = seq.into_iter().map(yaml_to_value).collect();
            Ok(Value::Array(items?))
        }
        serde_yaml::Value::Mapping(map) => {
            let mut entries = std::collections::BTreeMap::new();
            for (k, v) in map {
                let key = match k {
                    serde_yaml::Value::String(s) => s,
                    serde_yaml::Value::Number(n) => n.to_string(),
                    serde_yaml::Value::Bool(b) => b.to_string(),
                    serde_yaml::Value::Null => "null".to_string(),
                    _ => return Err(OpathError::Parse("unsupported YAML map key type".into())),
                };
                entries.insert(key, yaml_to_value(v)?);
            }
            Ok(Value::Map(entries))
        }
        serde_yaml::Value::Tagged(tagged) => {
            if tagged.tag == "!!set" || tagged.tag == "tag:yaml.org,2002:set" {
                if let serde_yaml::Value::Mapping(map) = tagged.value {
                    let items: Result<Vec<Value>, _> =
                        map.into_iter().map(|(k, _)| yaml_to_value(k)).collect();
                    return Ok(Value::Set(items?));
                }
                return Err(OpathError::Parse("!!set tag on a non-mapping node".into()));
            }
            yaml_to_value(tagged.value)
        }
    }
}
