pub mod json;
pub mod toml;
pub mod yaml;

use crate::error::OpathError;
use crate::format::Format;
use crate::value::Value;

/// Parse input text into a [`Value`] graph based on format.
pub fn load(input: &str, format: Format) -> Result<Value, OpathError> {
    match format {
        Format::Json => json::load(input),
        Format::Yaml => yaml::load(input),
        Format::Toml => toml::load(input),
    }
}
