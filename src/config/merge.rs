//! Shallow merge of site configuration into the page record `config` object.
//!
//! The record carries a flat JSON object: a base map holding `root`, overlaid
//! with the `[site]` section, overlaid with `[extra]`. Later keys override
//! earlier ones; an override whose value type differs from the existing value
//! type is an unresolvable conflict.

use super::{ConfigError, SiteConfig};
use serde_json::{Map, Value};

/// Produce the merged `config` object attached to every page record.
pub fn merged(config: &SiteConfig) -> Result<Map<String, Value>, ConfigError> {
    let mut result = Map::new();
    result.insert("root".into(), Value::String(config.site.root.clone()));

    let site = to_object(serde_json::to_value(&config.site))?;
    overlay(&mut result, site)?;

    let extra = to_object(serde_json::to_value(&config.extra))?;
    overlay(&mut result, extra)?;

    Ok(result)
}

/// Overlay `layer` onto `base`, checking value-type compatibility per key.
fn overlay(base: &mut Map<String, Value>, layer: Map<String, Value>) -> Result<(), ConfigError> {
    for (key, value) in layer {
        if let Some(existing) = base.get(&key)
            && !existing.is_null()
            && !value.is_null()
            && kind(existing) != kind(&value)
        {
            return Err(ConfigError::Merge {
                key,
                expected: kind(existing),
                found: kind(&value),
            });
        }
        base.insert(key, value);
    }
    Ok(())
}

fn to_object(value: serde_json::Result<Value>) -> Result<Map<String, Value>, ConfigError> {
    match value {
        Ok(Value::Object(map)) => Ok(map),
        Ok(other) => Err(ConfigError::Validation(format!(
            "expected a config table, found {}",
            kind(&other)
        ))),
        Err(err) => Err(ConfigError::Validation(err.to_string())),
    }
}

/// JSON value kind name for merge diagnostics.
const fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "table",
    }
}
