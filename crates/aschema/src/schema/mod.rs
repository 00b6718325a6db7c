//! Schema objects
//!
//! A [`Schema`] owns the plain mapping of a JSON Schema document together
//! with any extension rules. Fields of the document are readable directly
//! (`title()`, `properties()`, `get("type")`); the mapping itself is the
//! canonical copy used for serialization, cloning and validation.
//!
//! Copyright (c) 2025 Specado Team
//! Licensed under the Apache-2.0 license

pub mod source;

pub use source::{Format, ToPlainData};

use crate::validation::error::{Diagnostic, Error, Result};
use crate::validation::rules::{Rule, RuleSet};
use jsonschema::Validator;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};
use std::fmt;
use std::sync::OnceLock;
use tracing::{debug, trace};

/// A JSON Schema document with validation attached
#[derive(Default)]
pub struct Schema {
    raw: Map<String, Value>,
    rules: RuleSet,
    compiled: OnceLock<Validator>,
}

impl Schema {
    /// Create a schema from a plain mapping
    ///
    /// The document is not checked here; a malformed document surfaces on
    /// the first validation.
    pub fn new(raw: Map<String, Value>) -> Self {
        Self {
            raw,
            rules: RuleSet::default(),
            compiled: OnceLock::new(),
        }
    }

    /// Create a schema from anything that converts into plain data
    pub fn from_source<S: ToPlainData + ?Sized>(source: &S) -> Self {
        Self::new(source.to_plain_data())
    }

    /// Parse a schema document from JSON text
    pub fn from_json_str(content: &str) -> Result<Self> {
        Format::Json.parse(content).map(Self::new)
    }

    /// Parse a schema document from YAML text
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        Format::Yaml.parse(content).map(Self::new)
    }

    /// Read a field of the document
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.raw.get(key)
    }

    /// Check if the document has a field
    pub fn contains_key(&self, key: &str) -> bool {
        self.raw.contains_key(key)
    }

    /// The `title` of the document
    pub fn title(&self) -> Option<&str> {
        self.get_str("title")
    }

    /// The `description` of the document
    pub fn description(&self) -> Option<&str> {
        self.get_str("description")
    }

    /// The identifier of the document, `$id` or the draft-4 `id`
    pub fn id(&self) -> Option<&str> {
        self.get_str("$id").or_else(|| self.get_str("id"))
    }

    /// The `type` of the document, a string or a list of strings
    pub fn schema_type(&self) -> Option<&Value> {
        self.raw.get("type")
    }

    /// The `properties` mapping of the document
    pub fn properties(&self) -> Option<&Map<String, Value>> {
        self.raw.get("properties").and_then(Value::as_object)
    }

    /// Names listed in `required`
    pub fn required(&self) -> Vec<&str> {
        self.raw
            .get("required")
            .and_then(Value::as_array)
            .map(|names| names.iter().filter_map(Value::as_str).collect())
            .unwrap_or_default()
    }

    /// Borrow the whole document
    pub fn as_map(&self) -> &Map<String, Value> {
        &self.raw
    }

    fn get_str(&self, key: &str) -> Option<&str> {
        self.raw.get(key).and_then(Value::as_str)
    }

    /// Merge `values` into the document, returning `self` for chaining
    pub fn set_all(&mut self, values: Map<String, Value>) -> &mut Self {
        trace!(keys = values.len(), "merging schema fields");
        self.raw.extend(values);
        self.compiled = OnceLock::new();
        self
    }

    /// Set one field of the document, returning `self` for chaining
    pub fn set_one<K: Into<String>>(&mut self, key: K, value: Value) -> &mut Self {
        let mut values = Map::new();
        values.insert(key.into(), value);
        self.set_all(values)
    }

    /// Attach an extension rule, consuming and returning the schema
    pub fn with_rule<N, F>(mut self, name: N, rule: F) -> Self
    where
        N: Into<String>,
        F: Fn(&Value) -> Vec<Diagnostic> + Send + Sync + 'static,
    {
        self.rules.insert(name, rule);
        self
    }

    /// Attach an extension rule, returning `self` for chaining
    pub fn set_rule<N, F>(&mut self, name: N, rule: F) -> &mut Self
    where
        N: Into<String>,
        F: Fn(&Value) -> Vec<Diagnostic> + Send + Sync + 'static,
    {
        self.rules.insert(name, rule);
        self
    }

    /// Detach an extension rule
    pub fn remove_rule(&mut self, name: &str) -> Option<Rule> {
        self.rules.remove(name)
    }

    /// The extension rules of this schema
    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    /// Plain data of the document, without extension rules
    pub fn to_plain_data(&self) -> Map<String, Value> {
        self.raw.clone()
    }

    /// Plain data of the document as a JSON value
    pub fn to_value(&self) -> Value {
        Value::Object(self.to_plain_data())
    }

    /// The engine validator for the current document, compiled on first use
    pub(crate) fn compiled(&self) -> Result<&Validator> {
        if let Some(validator) = self.compiled.get() {
            return Ok(validator);
        }

        let document = self.to_value();
        let validator =
            jsonschema::validator_for(&document).map_err(|e| Error::invalid_schema(e.to_string()))?;
        debug!(
            schema = crate::validation::normalize::schema_label(&self.raw),
            "compiled schema"
        );
        Ok(self.compiled.get_or_init(|| validator))
    }
}

impl ToPlainData for Schema {
    fn to_plain_data(&self) -> Map<String, Value> {
        Schema::to_plain_data(self)
    }
}

/// An independent copy built from plain data, sharing the extension rules
impl Clone for Schema {
    fn clone(&self) -> Self {
        Self {
            rules: self.rules.clone(),
            ..Self::from_source(self)
        }
    }
}

impl PartialEq for Schema {
    fn eq(&self, other: &Self) -> bool {
        self.raw == other.raw
    }
}

impl fmt::Debug for Schema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Schema")
            .field("raw", &self.raw)
            .field("rules", &self.rules)
            .finish()
    }
}

impl fmt::Display for Schema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_value())
    }
}

impl From<Map<String, Value>> for Schema {
    fn from(raw: Map<String, Value>) -> Self {
        Self::new(raw)
    }
}

impl<S: ToPlainData + ?Sized> From<&S> for Schema {
    fn from(source: &S) -> Self {
        Self::from_source(source)
    }
}

impl TryFrom<Value> for Schema {
    type Error = Error;

    fn try_from(value: Value) -> Result<Self> {
        source::into_mapping(value).map(Self::new)
    }
}

impl std::str::FromStr for Schema {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_json_str(s)
    }
}

impl Serialize for Schema {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.raw.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Schema {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        Map::<String, Value>::deserialize(deserializer).map(Self::new)
    }
}
