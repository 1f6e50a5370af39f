//! Registry of named custom rules
//!
//! Schemas store only a rule name; the executable predicate lives here,
//! registered by the host application. The contract is fixed: a predicate
//! inspects one value and either passes or returns the reason it failed.
//! A handful of builtins cover the checks entity managers ask for over and
//! over.
//!
//! Copyright (c) 2026 Validra Team
//! Licensed under the Apache-2.0 license

use std::collections::HashMap;
use std::sync::Arc;

use regex::Regex;
use validra_core::Value;

/// Predicate contract for custom rules
pub type RulePredicate = dyn Fn(&Value) -> Result<(), String> + Send + Sync;

/// Keyed store of custom rule predicates
#[derive(Clone, Default)]
pub struct RuleRegistry {
    rules: HashMap<String, Arc<RulePredicate>>,
}

impl RuleRegistry {
    /// Empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry pre-populated with the builtin rules: `non_empty`,
    /// `email`, `phone`, `positive`
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();

        registry.register("non_empty", |value: &Value| match value {
            Value::String(s) if s.trim().is_empty() => Err("must not be empty".to_string()),
            Value::Array(items) if items.is_empty() => Err("must not be empty".to_string()),
            Value::Object(fields) if fields.is_empty() => Err("must not be empty".to_string()),
            _ => Ok(()),
        });

        let email = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("builtin email pattern");
        registry.register("email", move |value: &Value| match value.as_str() {
            Some(text) if email.is_match(text) => Ok(()),
            Some(_) => Err("must be a valid email address".to_string()),
            None => Err(format!("must be a string, found {}", value.kind())),
        });

        let phone = Regex::new(r"^\+?[0-9][0-9 .()/-]{5,19}$").expect("builtin phone pattern");
        registry.register("phone", move |value: &Value| match value.as_str() {
            Some(text) if phone.is_match(text) => Ok(()),
            Some(_) => Err("must be a valid phone number".to_string()),
            None => Err(format!("must be a string, found {}", value.kind())),
        });

        registry.register("positive", |value: &Value| match value {
            Value::Integer(i) if *i > 0 => Ok(()),
            Value::Number(f) if *f > 0.0 => Ok(()),
            Value::Integer(_) | Value::Number(_) => Err("must be positive".to_string()),
            other => Err(format!("must be a number, found {}", other.kind())),
        });

        registry
    }

    /// Register a predicate under a name, replacing any previous one
    pub fn register<N, F>(&mut self, name: N, rule: F)
    where
        N: Into<String>,
        F: Fn(&Value) -> Result<(), String> + Send + Sync + 'static,
    {
        self.rules.insert(name.into(), Arc::new(rule));
    }

    pub fn contains(&self, name: &str) -> bool {
        self.rules.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<Arc<RulePredicate>> {
        self.rules.get(name).cloned()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl std::fmt::Debug for RuleRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut names: Vec<&str> = self.rules.keys().map(String::as_str).collect();
        names.sort_unstable();
        f.debug_struct("RuleRegistry").field("rules", &names).finish()
    }
}
