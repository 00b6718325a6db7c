//! Error types for schema construction and validation
//!
//! Copyright (c) 2025 Specado Team
//! Licensed under the Apache-2.0 license

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use thiserror::Error;

/// Error code used when the caller does not supply one
pub const DEFAULT_ERROR_NAME: &str = "SchemaError";

/// A single non-conformance reported by the engine or by an extension rule
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Keyword that rejected the value (`type`, `required`, or a rule name)
    pub keyword: String,
    /// Human-readable description
    pub message: String,
    /// JSON pointer into the validated value
    #[serde(default)]
    pub instance_path: String,
    /// JSON pointer into the schema document
    #[serde(default)]
    pub schema_path: String,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.instance_path.is_empty() {
            write!(f, "(root): {}", self.message)
        } else {
            write!(f, "{}: {}", self.instance_path, self.message)
        }
    }
}

impl Diagnostic {
    /// Create a diagnostic rooted at the top of the validated value
    pub fn new<K, M>(keyword: K, message: M) -> Self
    where
        K: Into<String>,
        M: Into<String>,
    {
        Self {
            keyword: keyword.into(),
            message: message.into(),
            instance_path: String::new(),
            schema_path: String::new(),
        }
    }

    /// Point the diagnostic at a location in the validated value
    pub fn at<P: Into<String>>(mut self, instance_path: P) -> Self {
        self.instance_path = instance_path.into();
        self
    }

    /// Point the diagnostic at a location in the schema document
    pub fn with_schema_path<P: Into<String>>(mut self, schema_path: P) -> Self {
        self.schema_path = schema_path.into();
        self
    }
}

/// Locates the offending part of the validated value
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorSource {
    /// JSON pointer, empty for the root
    #[serde(default)]
    pub pointer: String,
}

/// Diagnostic payload attached to every failure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FailureMeta {
    /// Name of the engine that produced the diagnostics
    pub engine: String,
    /// Every diagnostic from the validation pass
    pub errors: Vec<Diagnostic>,
    /// Plain data of the schema that rejected the values
    pub schema: Map<String, Value>,
    /// The values that were validated
    pub values: Value,
    /// Caller-supplied metadata
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A normalized validation failure
///
/// Either a `ValidationFailure` exists with every field populated, or
/// validation succeeded and there is none.
#[derive(Debug, Clone, PartialEq, Error, Serialize, Deserialize)]
#[error("{title}: {detail}")]
pub struct ValidationFailure {
    /// Unique identifier of this failure
    pub id: String,
    /// Error category, `SchemaError` unless overridden
    #[serde(alias = "name")]
    pub code: String,
    /// Summary naming the schema
    pub title: String,
    /// Occurrence-specific explanation
    pub detail: String,
    /// Where in the validated value the first problem was found
    #[serde(rename = "source")]
    pub locator: ErrorSource,
    /// Diagnostics, schema and values
    pub meta: FailureMeta,
    /// Additional caller-supplied members
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ValidationFailure {
    /// The error category (the `name` of the failure)
    pub fn name(&self) -> &str {
        &self.code
    }

    /// All diagnostics collected in the validation pass
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.meta.errors
    }

    /// Number of diagnostics
    pub fn len(&self) -> usize {
        self.meta.errors.len()
    }

    /// Always false for failures produced by validation
    pub fn is_empty(&self) -> bool {
        self.meta.errors.is_empty()
    }

    /// Serialize into a JSON object
    pub fn to_value(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}

/// Result type for schema operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by schema construction and validation
#[derive(Error, Debug)]
pub enum Error {
    /// The values did not conform to the schema
    #[error(transparent)]
    Validation(Box<ValidationFailure>),

    /// The engine could not compile the schema document itself
    #[error("Invalid schema document: {reason}")]
    InvalidSchema { reason: String },

    /// Schema data was not a mapping
    #[error("Schema data must be a JSON object, found {found}")]
    NotAnObject { found: &'static str },

    /// JSON parsing errors
    #[error("Failed to parse JSON schema document: {source}")]
    Json { source: serde_json::Error },

    /// YAML parsing errors
    #[error("Failed to parse YAML schema document: {source}")]
    Yaml { source: serde_yaml::Error },
}

impl From<ValidationFailure> for Error {
    fn from(failure: ValidationFailure) -> Self {
        Self::Validation(Box::new(failure))
    }
}

impl Error {
    /// Create an invalid-schema error from the engine's message
    pub fn invalid_schema<R: Into<String>>(reason: R) -> Self {
        Self::InvalidSchema {
            reason: reason.into(),
        }
    }

    /// Create an error for non-object schema data
    pub fn not_an_object(value: &Value) -> Self {
        let found = match value {
            Value::Null => "null",
            Value::Bool(_) => "boolean",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Array(_) => "array",
            Value::Object(_) => "object",
        };
        Self::NotAnObject { found }
    }

    /// Check if this error carries a validation failure
    pub fn is_validation_failure(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Borrow the validation failure, if any
    pub fn failure(&self) -> Option<&ValidationFailure> {
        match self {
            Self::Validation(failure) => Some(failure),
            _ => None,
        }
    }

    /// Take the validation failure out of the error, if any
    pub fn into_failure(self) -> Option<ValidationFailure> {
        match self {
            Self::Validation(failure) => Some(*failure),
            _ => None,
        }
    }
}
