//! Construction inputs for schema objects
//!
//! A schema can be built from a plain JSON mapping, from anything that can
//! hand out one (see [`ToPlainData`]), or from JSON / YAML text.
//!
//! Copyright (c) 2025 Specado Team
//! Licensed under the Apache-2.0 license

use crate::validation::error::{Error, Result};
use serde_json::{Map, Value};

/// Capability of converting into a plain schema mapping
///
/// Schema objects implement this, so one schema can be constructed from
/// another. Implementors must only return JSON-compatible data.
pub trait ToPlainData {
    /// Return the plain mapping suitable for JSON encoding
    fn to_plain_data(&self) -> Map<String, Value>;
}

impl ToPlainData for Map<String, Value> {
    fn to_plain_data(&self) -> Map<String, Value> {
        self.clone()
    }
}

/// Supported text formats for schema documents
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// YAML text
    Yaml,
    /// JSON text
    Json,
}

impl Format {
    /// Parse a schema document and require an object at the root
    pub fn parse(self, content: &str) -> Result<Map<String, Value>> {
        let value = match self {
            Format::Json => parse_json(content)?,
            Format::Yaml => parse_yaml(content)?,
        };
        into_mapping(value)
    }
}

/// Parse JSON content
fn parse_json(content: &str) -> Result<Value> {
    serde_json::from_str(content).map_err(|source| Error::Json { source })
}

/// Parse YAML content
fn parse_yaml(content: &str) -> Result<Value> {
    // Parse as YAML first to surface YAML-specific errors
    let yaml_value: serde_yaml::Value =
        serde_yaml::from_str(content).map_err(|source| Error::Yaml { source })?;

    serde_json::to_value(yaml_value).map_err(|source| Error::Json { source })
}

/// Accept an object as schema data; `null` means an empty schema
pub(crate) fn into_mapping(value: Value) -> Result<Map<String, Value>> {
    match value {
        Value::Object(map) => Ok(map),
        Value::Null => Ok(Map::new()),
        other => Err(Error::not_an_object(&other)),
    }
}
