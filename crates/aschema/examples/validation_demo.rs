//! Validation demonstration example
//!
//! Run with `RUST_LOG=aschema=debug` to see the library's trace events.
//!
//! Copyright (c) 2025 Specado Team
//! Licensed under the Apache-2.0 license

use aschema::{Diagnostic, ValidateOptions};
use serde_json::{json, Value};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== aschema Validation Demo ===\n");

    // Define a schema object
    let user_schema = aschema::create(
        json!({
            "title": "User",
            "description": "A user",
            "type": "object",
            "properties": {
                "id": {
                    "description": "The unique identifier for a account",
                    "type": "integer"
                },
                "accountName": {
                    "description": "Name of the account",
                    "type": "string"
                }
            },
            "required": ["id", "name"]
        })
        .as_object()
        .ok_or("schema literal is not an object")?,
    );

    println!("--- Execute validation ---");
    match user_schema.validate(&json!({"name": "foo"}))? {
        Some(failure) => println!("{}", serde_json::to_string_pretty(&failure)?),
        None => println!("no error!"),
    }

    println!("\n--- Custom error name and extra fields ---");
    let options = ValidateOptions::new()
        .with_name("UserError")
        .assign_field("status", json!(422));
    if let Some(failure) = user_schema.validate_with(&json!({"id": "7"}), &options)? {
        println!("{} [{}]: {}", failure.code, failure.extra["status"], failure.detail);
    }

    println!("\n--- Extension rules ---");
    let strict = user_schema.clone().with_rule("reserved_names", |values: &Value| {
        match values.get("name").and_then(Value::as_str) {
            Some("root") => vec![Diagnostic::new("", "\"root\" is reserved").at("/name")],
            _ => Vec::new(),
        }
    });
    if let Err(e) = strict.validate_or_fail(&json!({"id": 1, "name": "root"})) {
        println!("Error: {}", e);
    }

    println!("\n--- Serialize back to plain data ---");
    println!("{}", serde_json::to_string_pretty(&strict)?);

    Ok(())
}
