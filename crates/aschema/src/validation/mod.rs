//! Validation of values against schema objects
//!
//! The engine performs every conformance check. This module collects its
//! diagnostics together with those of the schema's extension rules and
//! normalizes them into a single [`ValidationFailure`]:
//!
//! - [`Schema::validate`] returns the failure as data
//! - [`Schema::validate_or_fail`] returns it as [`Error::Validation`]
//!
//! Copyright (c) 2025 Specado Team
//! Licensed under the Apache-2.0 license

pub mod error;
pub(crate) mod normalize;
pub mod rules;

pub use error::{
    Diagnostic, Error, ErrorSource, FailureMeta, Result, ValidationFailure, DEFAULT_ERROR_NAME,
};
pub use rules::{Rule, RuleSet};

use crate::schema::Schema;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::debug;

/// Options for a single validation call
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidateOptions {
    /// Error code for the failure, `SchemaError` when unset
    pub name: Option<String>,
    /// Fields merged over the computed failure, last
    pub assign: Map<String, Value>,
    /// Maximum number of diagnostics to collect (0 = unlimited); rules are
    /// skipped once the engine alone reaches it
    pub max_errors: usize,
}

impl ValidateOptions {
    /// Create options that collect every diagnostic
    pub fn new() -> Self {
        Self::default()
    }

    /// Create options that stop at the first diagnostic
    ///
    /// The engine stops after its first error; extension rules run only when
    /// the engine reported nothing.
    pub fn first_error_only() -> Self {
        Self::default().with_max_errors(1)
    }

    /// Set the error code of the failure
    pub fn with_name<N: Into<String>>(mut self, name: N) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Merge a mapping of override fields
    pub fn with_assign(mut self, fields: Map<String, Value>) -> Self {
        self.assign.extend(fields);
        self
    }

    /// Add a single override field
    pub fn assign_field<K: Into<String>>(mut self, key: K, value: Value) -> Self {
        self.assign.insert(key.into(), value);
        self
    }

    /// Set maximum number of diagnostics to collect
    pub fn with_max_errors(mut self, max_errors: usize) -> Self {
        self.max_errors = max_errors;
        self
    }
}

impl Schema {
    /// Validate `values`, returning `Ok(None)` when they conform
    ///
    /// # Errors
    ///
    /// Only [`Error::InvalidSchema`], when the engine cannot compile the
    /// schema document. Non-conforming values are reported as
    /// `Ok(Some(failure))`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use aschema::Schema;
    /// use serde_json::json;
    ///
    /// let schema = Schema::try_from(json!({
    ///     "title": "Product",
    ///     "type": "object",
    ///     "properties": {"id": {"type": "integer"}},
    ///     "required": ["id"]
    /// })).unwrap();
    ///
    /// assert!(schema.validate(&json!({"id": 1234})).unwrap().is_none());
    /// assert!(schema.validate(&json!({"id": "1234"})).unwrap().is_some());
    /// ```
    pub fn validate(&self, values: &Value) -> Result<Option<ValidationFailure>> {
        self.validate_with(values, &ValidateOptions::default())
    }

    /// Validate `values` with explicit options
    pub fn validate_with(
        &self,
        values: &Value,
        options: &ValidateOptions,
    ) -> Result<Option<ValidationFailure>> {
        let validator = self.compiled()?;

        let limit = match options.max_errors {
            0 => usize::MAX,
            n => n,
        };
        let mut diagnostics: Vec<Diagnostic> = validator
            .iter_errors(values)
            .take(limit)
            .map(|e| normalize::diagnostic_from_engine(&e))
            .collect();
        if diagnostics.len() < limit {
            diagnostics.extend(self.rules().evaluate(values));
            diagnostics.truncate(limit);
        }

        let label = normalize::schema_label(self.as_map());
        if diagnostics.is_empty() {
            debug!(schema = label, "validation passed");
            return Ok(None);
        }

        debug!(
            schema = label,
            diagnostics = diagnostics.len(),
            "validation failed"
        );
        Ok(Some(normalize::build_failure(
            diagnostics,
            self.to_plain_data(),
            values,
            options,
        )))
    }

    /// Validate `values`, turning a failure into an error
    ///
    /// Returns `Err(Error::Validation(_))` exactly when [`Schema::validate`]
    /// would return a failure.
    pub fn validate_or_fail(&self, values: &Value) -> Result<()> {
        self.validate_or_fail_with(values, &ValidateOptions::default())
    }

    /// Validate `values` with explicit options, turning a failure into an error
    pub fn validate_or_fail_with(&self, values: &Value, options: &ValidateOptions) -> Result<()> {
        match self.validate_with(values, options)? {
            Some(failure) => Err(failure.into()),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn product_schema() -> Schema {
        Schema::try_from(json!({
            "title": "Product",
            "type": "object",
            "properties": {
                "id": {"type": "integer"},
                "name": {"type": "string"}
            },
            "required": ["id", "name"]
        }))
        .unwrap()
    }

    #[test]
    fn test_validate_options_defaults() {
        let options = ValidateOptions::default();
        assert_eq!(options.name, None);
        assert!(options.assign.is_empty());
        assert_eq!(options.max_errors, 0);
    }

    #[test]
    fn test_validate_options_builders() {
        let options = ValidateOptions::new()
            .with_name("ProductError")
            .with_assign(json!({"status": 422}).as_object().cloned().unwrap())
            .assign_field("detail", json!("custom"))
            .with_max_errors(3);
        assert_eq!(options.name.as_deref(), Some("ProductError"));
        assert_eq!(options.assign.len(), 2);
        assert_eq!(options.max_errors, 3);

        assert_eq!(ValidateOptions::first_error_only().max_errors, 1);
    }

    #[test]
    fn test_validate_options_deserialize_with_defaults() {
        let options: ValidateOptions = serde_json::from_value(json!({"name": "E"})).unwrap();
        assert_eq!(options.name.as_deref(), Some("E"));
        assert_eq!(options.max_errors, 0);
    }

    #[test]
    fn test_valid_values_pass() {
        let schema = product_schema();
        let result = schema.validate(&json!({"id": 1234, "name": "hoge"})).unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn test_invalid_values_collect_all_diagnostics() {
        let schema = product_schema();
        let failure = schema
            .validate(&json!({"id": "1234", "name": {"foo": "bar"}}))
            .unwrap()
            .expect("values should be rejected");

        assert_eq!(failure.len(), 2);
        let paths: Vec<&str> = failure
            .diagnostics()
            .iter()
            .map(|d| d.instance_path.as_str())
            .collect();
        assert!(paths.contains(&"/id"));
        assert!(paths.contains(&"/name"));
        assert!(failure.diagnostics().iter().all(|d| d.keyword == "type"));
    }

    #[test]
    fn test_first_error_only() {
        let schema = product_schema();
        let failure = schema
            .validate_with(
                &json!({"id": "1234", "name": {"foo": "bar"}}),
                &ValidateOptions::first_error_only(),
            )
            .unwrap()
            .unwrap();
        assert_eq!(failure.len(), 1);
    }

    #[test]
    fn test_first_error_only_skips_rules_after_engine_error() {
        use std::sync::atomic::{AtomicUsize, Ordering};
        use std::sync::Arc;

        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let schema = product_schema().with_rule("counted", move |_: &Value| {
            counter.fetch_add(1, Ordering::SeqCst);
            vec![Diagnostic::new("", "counted")]
        });

        let failure = schema
            .validate_with(&json!({"id": "x"}), &ValidateOptions::first_error_only())
            .unwrap()
            .unwrap();
        assert_eq!(failure.len(), 1);
        assert_ne!(failure.diagnostics()[0].keyword, "counted");
        assert_eq!(calls.load(Ordering::SeqCst), 0);

        // No engine error leaves room for the rule
        let failure = schema
            .validate_with(&json!({"id": 1, "name": "a"}), &ValidateOptions::first_error_only())
            .unwrap()
            .unwrap();
        assert_eq!(failure.diagnostics()[0].keyword, "counted");
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_validate_or_fail() {
        let schema = product_schema();
        assert!(schema.validate_or_fail(&json!({"id": 1, "name": "a"})).is_ok());

        let err = schema.validate_or_fail(&json!({"id": 1})).unwrap_err();
        assert!(err.is_validation_failure());
        assert_eq!(err.failure().unwrap().diagnostics()[0].keyword, "required");
    }

    #[test]
    fn test_rules_contribute_diagnostics() {
        let schema = product_schema().with_rule("positive_id", |values: &Value| {
            match values.get("id").and_then(Value::as_i64) {
                Some(id) if id <= 0 => vec![Diagnostic::new("", "id must be positive").at("/id")],
                _ => Vec::new(),
            }
        });

        assert!(schema.validate(&json!({"id": 5, "name": "a"})).unwrap().is_none());
        let failure = schema
            .validate(&json!({"id": 0, "name": "a"}))
            .unwrap()
            .unwrap();
        assert_eq!(failure.len(), 1);
        assert_eq!(failure.diagnostics()[0].keyword, "positive_id");
    }

    #[test]
    fn test_invalid_schema_propagates() {
        let schema = Schema::try_from(json!({"type": 12})).unwrap();
        let err = schema.validate(&json!({})).unwrap_err();
        assert!(matches!(err, Error::InvalidSchema { .. }));

        let err = schema.validate_or_fail(&json!({})).unwrap_err();
        assert!(!err.is_validation_failure());
    }
}
