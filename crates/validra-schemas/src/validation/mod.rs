//! Validator orchestration over the rule evaluators
//!
//! Evaluation order is fixed: required fields, field types, constraints,
//! custom rules, conditional rules, dependency rules. Reporting a missing
//! field before a type error keeps callers from chasing a type complaint
//! on a field they never supplied, and the conditional/dependency stages
//! only run against a tree whose unconditional shape already checked out.
//!
//! Copyright (c) 2026 Validra Team
//! Licensed under the Apache-2.0 license

pub mod error;
pub mod evaluators;

pub use error::{Violation, ViolationKind, Violations};
pub use evaluators::{
    validate_array_constraints, validate_conditional_rules, validate_constraint,
    validate_constraints, validate_custom_rules, validate_dependencies, validate_field_types,
    validate_number_constraints, validate_object_constraints, validate_required_fields,
    validate_string_constraints,
};

use validra_core::Value;

use crate::rules::RuleRegistry;
use crate::schema::Schema;

/// Configuration for aggregating validation runs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidationConfig {
    /// Stop after the first failing stage instead of running all six
    pub fail_fast: bool,
    /// Maximum number of violations to collect (0 = unlimited)
    pub max_errors: usize,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            fail_fast: false,
            max_errors: 0,
        }
    }
}

impl ValidationConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable fail-fast mode
    pub fn with_fail_fast(mut self) -> Self {
        self.fail_fast = true;
        self
    }

    /// Set maximum number of violations to collect
    pub fn with_max_errors(mut self, max_errors: usize) -> Self {
        self.max_errors = max_errors;
        self
    }
}

/// Runs a schema's rule groups against a normalized record.
///
/// Validation is pure: the record is never mutated, no I/O happens, and
/// identical inputs always produce identical verdicts. Any number of
/// threads may validate against the same schema snapshot concurrently.
#[derive(Debug, Clone, Default)]
pub struct Validator {
    config: ValidationConfig,
}

impl Validator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: ValidationConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ValidationConfig {
        &self.config
    }

    /// Fail-fast validation: the first violation of the first failing
    /// stage, or acceptance
    pub fn validate(
        &self,
        schema: &Schema,
        data: &Value,
        rules: &RuleRegistry,
    ) -> Result<(), Violation> {
        match self.run(schema, data, rules, true).into_iter().next() {
            Some(violation) => Err(violation),
            None => Ok(()),
        }
    }

    /// Aggregating validation for bulk diagnostics, e.g. UI form feedback.
    ///
    /// Runs every stage by default; honors the configured `fail_fast`
    /// (stop after the first failing stage, keeping that stage's full
    /// output) and `max_errors` cap.
    pub fn validate_all(&self, schema: &Schema, data: &Value, rules: &RuleRegistry) -> Violations {
        let mut violations = self.run(schema, data, rules, self.config.fail_fast);
        violations.truncate(self.config.max_errors);
        violations
    }

    fn run(
        &self,
        schema: &Schema,
        data: &Value,
        rules: &RuleRegistry,
        stop_after_failing_stage: bool,
    ) -> Violations {
        let stages: Vec<Box<dyn Fn() -> Vec<Violation> + '_>> = vec![
            Box::new(|| evaluators::validate_required_fields(data, &schema.required_fields)),
            Box::new(|| evaluators::validate_field_types(data, &schema.field_types)),
            Box::new(|| evaluators::validate_constraints(data, &schema.constraints)),
            Box::new(|| evaluators::validate_custom_rules(data, &schema.custom_rules, rules)),
            Box::new(|| evaluators::validate_conditional_rules(data, &schema.conditional_rules)),
            Box::new(|| evaluators::validate_dependencies(data, &schema.dependency_rules)),
        ];

        let mut collected = Violations::new();
        for stage in stages {
            let found = stage();
            let failed = !found.is_empty();
            collected.extend(found);
            if failed && stop_after_failing_stage {
                break;
            }
        }
        collected
    }
}
