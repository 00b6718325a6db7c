//! Extension rules attached to a schema object
//!
//! Rules are callables that run after the engine on every validation pass.
//! They are behavior, not data: they never appear in the plain mapping of a
//! schema and are not carried over by serialization. Clones share them.
//!
//! Copyright (c) 2025 Specado Team
//! Licensed under the Apache-2.0 license

use crate::validation::error::Diagnostic;
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// A custom check over the validated values
pub type Rule = Arc<dyn Fn(&Value) -> Vec<Diagnostic> + Send + Sync>;

/// Named rules, evaluated in name order
#[derive(Clone, Default)]
pub struct RuleSet {
    rules: BTreeMap<String, Rule>,
}

impl fmt::Debug for RuleSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.rules.keys()).finish()
    }
}

impl RuleSet {
    /// Register a rule, replacing any rule with the same name
    pub fn insert<N, F>(&mut self, name: N, rule: F)
    where
        N: Into<String>,
        F: Fn(&Value) -> Vec<Diagnostic> + Send + Sync + 'static,
    {
        self.rules.insert(name.into(), Arc::new(rule));
    }

    /// Remove a rule by name
    pub fn remove(&mut self, name: &str) -> Option<Rule> {
        self.rules.remove(name)
    }

    /// Check if a rule is registered
    pub fn contains(&self, name: &str) -> bool {
        self.rules.contains_key(name)
    }

    /// Names of all registered rules
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.rules.keys().map(String::as_str)
    }

    /// Number of registered rules
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Check if no rules are registered
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Run every rule against `values`
    ///
    /// Diagnostics without a keyword are attributed to the rule's name.
    pub fn evaluate(&self, values: &Value) -> Vec<Diagnostic> {
        let mut diagnostics = Vec::new();
        for (name, rule) in &self.rules {
            for mut diagnostic in rule(values) {
                if diagnostic.keyword.is_empty() {
                    diagnostic.keyword = name.clone();
                }
                diagnostics.push(diagnostic);
            }
        }
        diagnostics
    }
}
