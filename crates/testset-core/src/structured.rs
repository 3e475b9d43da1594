//! YAML metadata file reading and writing.
//!
//! Every metadata file is a mapping of string keys to scalars, mappings or
//! sequences. Typed access goes through serde structs, so a missing key or a
//! value of the wrong type is reported as malformed metadata.

use std::fs;
use std::path::Path;

use indexmap::IndexMap;
use serde::de::{self, DeserializeOwned, Deserializer};
use serde::{Deserialize, Serialize};
use serde_yaml::Value;

use crate::errors::TestSetError;

/// Read and deserialize the YAML file at `path`.
pub fn read<T: DeserializeOwned>(path: &Path) -> Result<T, TestSetError> {
    let text = fs::read_to_string(path).map_err(|error| TestSetError::from_read(path, error))?;
    serde_yaml::from_str(&text).map_err(|error| TestSetError::MalformedMetadata {
        path: path.to_path_buf(),
        reason: error.to_string(),
    })
}

/// Serialize `value` as YAML into `path`, replacing any existing content.
pub fn write<T: Serialize>(path: &Path, value: &T) -> Result<(), TestSetError> {
    let text = serde_yaml::to_string(value).map_err(|error| TestSetError::MalformedMetadata {
        path: path.to_path_buf(),
        reason: error.to_string(),
    })?;
    fs::write(path, text).map_err(|source| TestSetError::Write {
        path: path.to_path_buf(),
        source,
    })
}

/// Render a YAML scalar as text; `None` for mappings, sequences and null.
fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        Value::Tagged(tagged) => scalar_text(&tagged.value),
        Value::Null | Value::Sequence(_) | Value::Mapping(_) => None,
    }
}

/// Deserialize any YAML scalar as a string, so `correct: 1` reads as `"1"`.
pub(crate) fn scalar_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    let value = Value::deserialize(deserializer)?;
    scalar_text(&value).ok_or_else(|| de::Error::custom("expected a scalar value"))
}

/// Deserialize a mapping of scalars to scalars, keeping document order.
pub(crate) fn scalar_map<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<IndexMap<String, String>, D::Error> {
    let value = Value::deserialize(deserializer)?;
    let Value::Mapping(mapping) = value else {
        return Err(de::Error::custom("expected a mapping"));
    };

    let mut entries = IndexMap::with_capacity(mapping.len());
    for (key, text) in &mapping {
        let key = scalar_text(key).ok_or_else(|| de::Error::custom("mapping keys must be scalars"))?;
        let text = scalar_text(text)
            .ok_or_else(|| de::Error::custom(format!("value of '{key}' must be a scalar")))?;
        entries.insert(key, text);
    }
    Ok(entries)
}
