//! Entity-manager-facing facade over registry, rules, and validator
//!
//! Copyright (c) 2026 Validra Team
//! Licensed under the Apache-2.0 license

use std::collections::BTreeMap;
use std::sync::Arc;

use validra_core::Value;

use crate::error::{Error, Result};
use crate::registry::SchemaRegistry;
use crate::rules::RuleRegistry;
use crate::schema::{Schema, SchemaConfig, SchemaId, SchemaPatch, SchemaStatus, SchemaType};
use crate::validation::{ValidationConfig, Validator, Violation, Violations};

/// One-stop surface for entity managers: schema lifecycle plus record
/// validation.
///
/// The manager additionally checks that every custom rule a config names
/// is actually registered, so a dangling rule name is a configuration
/// error at create/update time instead of a per-record failure later.
pub struct ValidationManager {
    registry: SchemaRegistry,
    rules: RuleRegistry,
    validator: Validator,
}

impl ValidationManager {
    /// Manager with the builtin rules and default validation config
    pub fn new() -> Self {
        Self {
            registry: SchemaRegistry::new(),
            rules: RuleRegistry::with_builtins(),
            validator: Validator::new(),
        }
    }

    pub fn with_config(config: ValidationConfig) -> Self {
        Self {
            validator: Validator::with_config(config),
            ..Self::new()
        }
    }

    /// Register a custom rule predicate for schemas to reference by name
    pub fn register_rule<N, F>(&mut self, name: N, rule: F)
    where
        N: Into<String>,
        F: Fn(&Value) -> std::result::Result<(), String> + Send + Sync + 'static,
    {
        self.rules.register(name, rule);
    }

    pub fn rules(&self) -> &RuleRegistry {
        &self.rules
    }

    pub fn registry(&self) -> &SchemaRegistry {
        &self.registry
    }

    fn check_rule_names(&self, custom: &BTreeMap<String, String>) -> Result<()> {
        for (path, name) in custom {
            if !self.rules.contains(name) {
                return Err(Error::configuration(format!(
                    "custom rule '{}' for '{}' is not registered",
                    name, path
                )));
            }
        }
        Ok(())
    }

    /// Validate the config's shape and store a new schema
    pub fn create_validation(&self, config: &SchemaConfig) -> Result<SchemaId> {
        self.check_rule_names(&config.custom)?;
        self.registry.create(config)
    }

    /// Fetch a schema snapshot
    pub fn get_validation(&self, id: &SchemaId) -> Result<Arc<Schema>> {
        self.registry.get(id)
    }

    /// Merge a partial config into a stored schema, returning the new
    /// version
    pub fn update_validation(&self, id: &SchemaId, patch: &SchemaPatch) -> Result<Arc<Schema>> {
        if let Some(custom) = &patch.custom {
            self.check_rule_names(custom)?;
        }
        self.registry.update(id, patch)
    }

    /// Remove a schema; subsequent gets fail
    pub fn delete_validation(&self, id: &SchemaId) -> Result<()> {
        self.registry.delete(id)
    }

    pub fn validations_by_type(&self, schema_type: SchemaType) -> Vec<Arc<Schema>> {
        self.registry.list_by_type(schema_type)
    }

    pub fn validations_by_status(&self, status: SchemaStatus) -> Vec<Arc<Schema>> {
        self.registry.list_by_status(status)
    }

    /// Normalize a JSON record and validate it fail-fast.
    ///
    /// A normalization failure (unrepresentable number) is reported as a
    /// violation, the same as any other malformed value.
    pub fn validate_data(&self, id: &SchemaId, data: &serde_json::Value) -> Result<()> {
        let schema = self.registry.get(id)?;
        let value = Value::from_json(data).map_err(Violation::from)?;
        self.validator
            .validate(&schema, &value, &self.rules)
            .map_err(Error::from)
    }

    /// Normalize a JSON record and collect every violation, for form
    /// feedback
    pub fn validate_data_all(&self, id: &SchemaId, data: &serde_json::Value) -> Result<Violations> {
        let schema = self.registry.get(id)?;
        match Value::from_json(data) {
            Ok(value) => Ok(self.validator.validate_all(&schema, &value, &self.rules)),
            Err(err) => Ok(Violations::from(Violation::from(err))),
        }
    }

    /// Fail-fast validation for callers already holding a normalized value
    pub fn validate_value(&self, id: &SchemaId, value: &Value) -> Result<()> {
        let schema = self.registry.get(id)?;
        self.validator
            .validate(&schema, value, &self.rules)
            .map_err(Error::from)
    }
}

impl Default for ValidationManager {
    fn default() -> Self {
        Self::new()
    }
}
