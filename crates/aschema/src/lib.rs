//! aschema - JSON Schema objects
//!
//! This crate wraps a JSON Schema engine in a small object model:
//! - **Construct** a [`Schema`] from a plain mapping, from another schema,
//!   or from JSON / YAML text
//! - **Validate** values and receive either nothing or one normalized
//!   [`ValidationFailure`] carrying every diagnostic of the pass
//! - **Clone**, **set** and **serialize** the schema as plain data
//!
//! Conformance checking itself is delegated to the [`engine`], which is
//! re-exported for callers that need it directly.
//!
//! ## Quick Start
//!
//! ```rust
//! use serde_json::json;
//!
//! let product = aschema::create(json!({
//!     "title": "Product",
//!     "type": "object",
//!     "properties": {
//!         "id": {"type": "integer"},
//!         "name": {"type": "string"}
//!     },
//!     "required": ["id", "name"]
//! }).as_object().unwrap());
//!
//! // Conforming values produce no failure
//! assert!(product.validate(&json!({"id": 1234, "name": "hoge"})).unwrap().is_none());
//!
//! // Every violation is collected into a single failure
//! let failure = product
//!     .validate(&json!({"id": "1234", "name": {"foo": "bar"}}))
//!     .unwrap()
//!     .unwrap();
//! assert_eq!(failure.name(), "SchemaError");
//! assert_eq!(failure.diagnostics().len(), 2);
//!
//! // Or fail fast
//! assert!(product.validate_or_fail(&json!({"id": "1234"})).is_err());
//! ```
//!
//! ## Failure Shape
//!
//! A [`ValidationFailure`] has a unique `id`, a `code` (`SchemaError` unless
//! [`ValidateOptions::with_name`] says otherwise), a `title` naming the
//! schema, a `detail` string, a `source.pointer` into the validated value,
//! and `meta` with the engine name, every [`Diagnostic`], the schema and
//! the values. Fields from [`ValidateOptions::assign_field`] are merged last.
//!
//! Copyright (c) 2025 Specado Team
//! Licensed under the Apache-2.0 license

pub mod schema;
pub mod validation;

/// The validation engine every schema delegates to
pub use jsonschema as engine;

// Re-export commonly used types for convenience
pub use schema::{Format, Schema, ToPlainData};
pub use validation::{
    Diagnostic, Error, ErrorSource, FailureMeta, Result, Rule, RuleSet, ValidateOptions,
    ValidationFailure, DEFAULT_ERROR_NAME,
};

/// Name of the engine recorded in every failure
pub const ENGINE_NAME: &str = "jsonschema";

/// Create a schema object
///
/// Accepts anything a [`Schema`] converts from: a plain mapping, a borrowed
/// mapping, or another schema.
///
/// # Examples
///
/// ```rust
/// use serde_json::json;
///
/// let user = aschema::create(json!({"title": "User", "type": "object"}).as_object().unwrap());
/// let copy = aschema::create(&user);
/// assert_eq!(copy.title(), Some("User"));
/// ```
pub fn create<S: Into<Schema>>(data: S) -> Schema {
    data.into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Map, Value};

    #[test]
    fn test_create_from_owned_mapping() {
        let mut data = Map::new();
        data.insert("title".to_string(), json!("Owned"));
        let schema = create(data);
        assert_eq!(schema.title(), Some("Owned"));
    }

    #[test]
    fn test_create_empty() {
        let schema = create(Schema::default());
        assert!(schema.as_map().is_empty());
        assert!(schema.validate(&json!({"anything": true})).unwrap().is_none());
    }

    #[test]
    fn test_engine_is_reachable() {
        let schema: Value = json!({"type": "integer"});
        assert!(engine::is_valid(&schema, &json!(1)));
        assert_eq!(ENGINE_NAME, "jsonschema");
    }
}
