//! Translation of engine output into [`ValidationFailure`] records
//!
//! Copyright (c) 2025 Specado Team
//! Licensed under the Apache-2.0 license

use crate::validation::error::{
    Diagnostic, ErrorSource, FailureMeta, ValidationFailure, DEFAULT_ERROR_NAME,
};
use crate::validation::ValidateOptions;
use crate::ENGINE_NAME;
use jsonschema::error::ValidationErrorKind;
use serde_json::{Map, Value};
use tracing::warn;
use uuid::Uuid;

/// Keyword reported for values rejected by a `false` schema
const FALSE_SCHEMA_KEYWORD: &str = "false";

/// Convert one engine error into a pass-through diagnostic
pub(crate) fn diagnostic_from_engine(error: &jsonschema::ValidationError<'_>) -> Diagnostic {
    let schema_path = error.schema_path.to_string();
    let keyword = match error.kind {
        // The path of a `false` subschema ends at its location, not a keyword
        ValidationErrorKind::FalseSchema => FALSE_SCHEMA_KEYWORD.to_string(),
        _ => schema_path
            .rsplit('/')
            .next()
            .unwrap_or_default()
            .to_string(),
    };

    Diagnostic {
        keyword,
        message: error.to_string(),
        instance_path: error.instance_path.to_string(),
        schema_path,
    }
}

/// The label used in failure titles: `title`, then `id`, then `description`
pub(crate) fn schema_label(schema: &Map<String, Value>) -> &str {
    ["title", "$id", "id", "description"]
        .iter()
        .filter_map(|key| schema.get(*key).and_then(Value::as_str))
        .find(|label| !label.is_empty())
        .unwrap_or_default()
}

/// Build a fully-populated failure record
///
/// `diagnostics` must be non-empty; an empty list means validation passed
/// and no record exists.
pub(crate) fn build_failure(
    diagnostics: Vec<Diagnostic>,
    schema: Map<String, Value>,
    values: &Value,
    options: &ValidateOptions,
) -> ValidationFailure {
    let title = format!("Validation failed with schema: {}", schema_label(&schema));
    let detail = describe(&diagnostics);
    let pointer = diagnostics
        .first()
        .map(|d| d.instance_path.clone())
        .unwrap_or_default();

    let mut failure = ValidationFailure {
        id: Uuid::new_v4().to_string(),
        code: options
            .name
            .clone()
            .unwrap_or_else(|| DEFAULT_ERROR_NAME.to_string()),
        title,
        detail,
        locator: ErrorSource { pointer },
        meta: FailureMeta {
            engine: ENGINE_NAME.to_string(),
            errors: diagnostics,
            schema,
            values: values.clone(),
            extra: Map::new(),
        },
        extra: Map::new(),
    };
    apply_assign(&mut failure, &options.assign);
    failure
}

fn describe(diagnostics: &[Diagnostic]) -> String {
    let noun = if diagnostics.len() == 1 {
        "violation"
    } else {
        "violations"
    };
    let messages = diagnostics
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ");
    format!("{} {}: {}", diagnostics.len(), noun, messages)
}

/// Merge caller-supplied fields over the computed ones
///
/// `engine`, `errors`, `schema` and `values` address the members of `meta`.
/// Typed members only accept values of their own type; a mismatched
/// override is skipped so the record stays well-formed.
fn apply_assign(failure: &mut ValidationFailure, fields: &Map<String, Value>) {
    for (key, value) in fields {
        match (key.as_str(), value) {
            ("id", Value::String(s)) => failure.id = s.clone(),
            ("code" | "name", Value::String(s)) => failure.code = s.clone(),
            ("title", Value::String(s)) => failure.title = s.clone(),
            ("detail", Value::String(s)) => failure.detail = s.clone(),
            ("source", Value::String(s)) => failure.locator.pointer = s.clone(),
            ("source", Value::Object(source)) => {
                match source.get("pointer").and_then(Value::as_str) {
                    Some(pointer) => failure.locator.pointer = pointer.to_string(),
                    None => skip(key, value),
                }
            }
            ("meta", Value::Object(meta)) => apply_meta(&mut failure.meta, meta),
            ("engine" | "errors" | "schema" | "values", _) => {
                let mut meta = Map::new();
                meta.insert(key.clone(), value.clone());
                apply_meta(&mut failure.meta, &meta);
            }
            ("id" | "code" | "name" | "title" | "detail" | "source" | "meta", _) => {
                skip(key, value)
            }
            _ => {
                failure.extra.insert(key.clone(), value.clone());
            }
        }
    }
}

fn apply_meta(meta: &mut FailureMeta, fields: &Map<String, Value>) {
    for (key, value) in fields {
        match (key.as_str(), value) {
            ("engine", Value::String(s)) => meta.engine = s.clone(),
            ("schema", Value::Object(schema)) => meta.schema = schema.clone(),
            ("values", _) => meta.values = value.clone(),
            ("errors", Value::Array(_)) => {
                match serde_json::from_value::<Vec<Diagnostic>>(value.clone()) {
                    Ok(errors) => meta.errors = errors,
                    Err(_) => skip(key, value),
                }
            }
            ("engine" | "schema" | "errors", _) => skip(key, value),
            _ => {
                meta.extra.insert(key.clone(), value.clone());
            }
        }
    }
}

fn skip(key: &str, value: &Value) {
    warn!(key, %value, "ignoring failure override with mismatched type");
}
