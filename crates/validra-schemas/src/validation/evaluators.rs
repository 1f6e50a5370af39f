//! Rule evaluators, one pure function per rule category
//!
//! Each evaluator consumes a value (or the whole record) plus one schema
//! fragment and returns the violations it found, in deterministic order.
//! They are independently callable for callers that only need one
//! category; the [`Validator`](crate::validation::Validator) sequences
//! them.
//!
//! Presence policy: absent optional fields never trigger type or
//! constraint checks. An explicit null is "present but empty": it fails a
//! type check unless the field is marked nullable, and constraint and
//! custom checks skip it.
//!
//! Copyright (c) 2026 Validra Team
//! Licensed under the Apache-2.0 license

use std::collections::BTreeMap;

use chrono::DateTime;
use validra_core::{FieldPath, Value, ValueKind};

use crate::rules::RuleRegistry;
use crate::schema::constraints::{
    ArrayConstraint, Constraint, ItemSchema, NumberConstraint, ObjectConstraint, StringConstraint,
};
use crate::schema::{ConditionalRule, DependencyRule, FieldTypeSpec};
use crate::validation::error::{Violation, ViolationKind};

/// Tolerance for `multiple_of` on floating values, scaled to the ratio
const MULTIPLE_OF_EPSILON: f64 = 1e-9;

fn type_violation(value: &Value, spec: &FieldTypeSpec, path: &FieldPath) -> Option<Violation> {
    if value.is_null() {
        if spec.nullable {
            return None;
        }
        return Some(Violation::new(
            ViolationKind::TypeMismatch,
            path.clone(),
            format!("expected {}, found null (field is not nullable)", spec.kind),
        ));
    }

    if spec.kind == ValueKind::DateTime {
        return match value {
            Value::DateTime(_) => None,
            Value::String(text) => match DateTime::parse_from_rfc3339(text) {
                Ok(_) => None,
                Err(e) => Some(Violation::new(
                    ViolationKind::TypeMismatch,
                    path.clone(),
                    format!("expected datetime, found malformed datetime string: {}", e),
                )),
            },
            other => Some(Violation::new(
                ViolationKind::TypeMismatch,
                path.clone(),
                format!("expected datetime, found {}", other.kind()),
            )),
        };
    }

    if value.kind() == spec.kind {
        None
    } else {
        Some(Violation::new(
            ViolationKind::TypeMismatch,
            path.clone(),
            format!("expected {}, found {}", spec.kind, value.kind()),
        ))
    }
}

/// Check that every required path resolves to a present, non-null value
pub fn validate_required_fields(data: &Value, required: &[FieldPath]) -> Vec<Violation> {
    let mut violations = Vec::new();
    for path in required {
        match path.resolve(data) {
            None => violations.push(Violation::new(
                ViolationKind::MissingRequiredField,
                path.clone(),
                "required field is missing",
            )),
            Some(value) if value.is_null() => violations.push(Violation::new(
                ViolationKind::MissingRequiredField,
                path.clone(),
                "required field is null",
            )),
            Some(_) => {}
        }
    }
    violations
}

/// Check every declared field type against the value found at its path.
///
/// Type identity is exact: an integer does not satisfy a `number`
/// declaration. The one latitude is `datetime`, which also accepts a
/// string parsing as RFC 3339.
pub fn validate_field_types(
    data: &Value,
    field_types: &BTreeMap<FieldPath, FieldTypeSpec>,
) -> Vec<Violation> {
    let mut violations = Vec::new();
    for (path, spec) in field_types {
        if let Some(value) = path.resolve(data) {
            violations.extend(type_violation(value, spec, path));
        }
    }
    violations
}

/// Check string length bounds and the full-match pattern
pub fn validate_string_constraints(
    value: &Value,
    constraint: &StringConstraint,
    path: &FieldPath,
) -> Vec<Violation> {
    let kind = ViolationKind::StringConstraintViolation;
    let Some(text) = value.as_str() else {
        return vec![Violation::new(
            kind,
            path.clone(),
            format!("string constraint applied to {} value", value.kind()),
        )];
    };

    let mut violations = Vec::new();
    let length = text.chars().count();
    if let Some(min) = constraint.min_length {
        if length < min {
            violations.push(Violation::new(
                kind,
                path.clone(),
                format!("length {} is below minimum length {}", length, min),
            ));
        }
    }
    if let Some(max) = constraint.max_length {
        if length > max {
            violations.push(Violation::new(
                kind,
                path.clone(),
                format!("length {} exceeds maximum length {}", length, max),
            ));
        }
    }
    if let Some(pattern) = &constraint.pattern {
        if !pattern.is_full_match(text) {
            violations.push(Violation::new(
                kind,
                path.clone(),
                format!("value does not match pattern '{}'", pattern),
            ));
        }
    }
    violations
}

fn is_multiple_of(value: f64, base: f64) -> bool {
    let ratio = value / base;
    (ratio - ratio.round()).abs() <= MULTIPLE_OF_EPSILON * ratio.abs().max(1.0)
}

/// Check numeric range and multiple-of; accepts integer and number values,
/// bounds inclusive
pub fn validate_number_constraints(
    value: &Value,
    constraint: &NumberConstraint,
    path: &FieldPath,
) -> Vec<Violation> {
    let kind = ViolationKind::NumberConstraintViolation;
    let numeric = match value {
        Value::Integer(i) => *i as f64,
        Value::Number(f) => *f,
        other => {
            return vec![Violation::new(
                kind,
                path.clone(),
                format!("number constraint applied to {} value", other.kind()),
            )]
        }
    };

    let mut violations = Vec::new();
    if let Some(minimum) = constraint.minimum {
        if numeric < minimum {
            violations.push(Violation::new(
                kind,
                path.clone(),
                format!("value {} is below minimum {}", numeric, minimum),
            ));
        }
    }
    if let Some(maximum) = constraint.maximum {
        if numeric > maximum {
            violations.push(Violation::new(
                kind,
                path.clone(),
                format!("value {} exceeds maximum {}", numeric, maximum),
            ));
        }
    }
    if let Some(base) = constraint.multiple_of {
        if !is_multiple_of(numeric, base) {
            violations.push(Violation::new(
                kind,
                path.clone(),
                format!("value {} is not a multiple of {}", numeric, base),
            ));
        }
    }
    violations
}

/// Check an array element or object property against its sub-schema
fn check_item(value: &Value, item: &ItemSchema, path: &FieldPath) -> Vec<Violation> {
    if let Some(spec) = &item.value_type {
        if let Some(violation) = type_violation(value, spec, path) {
            return vec![violation];
        }
    }
    if value.is_null() {
        return Vec::new();
    }
    match &item.constraint {
        Some(constraint) => validate_constraint(value, constraint, path),
        None => Vec::new(),
    }
}

/// Check item count bounds and the per-element sub-schema.
///
/// Element checks stop at the first offending index.
pub fn validate_array_constraints(
    value: &Value,
    constraint: &ArrayConstraint,
    path: &FieldPath,
) -> Vec<Violation> {
    let kind = ViolationKind::ArrayConstraintViolation;
    let Some(items) = value.as_array() else {
        return vec![Violation::new(
            kind,
            path.clone(),
            format!("array constraint applied to {} value", value.kind()),
        )];
    };

    let mut violations = Vec::new();
    if let Some(min) = constraint.min_items {
        if items.len() < min {
            violations.push(Violation::new(
                kind,
                path.clone(),
                format!("item count {} is below minimum {}", items.len(), min),
            ));
        }
    }
    if let Some(max) = constraint.max_items {
        if items.len() > max {
            violations.push(Violation::new(
                kind,
                path.clone(),
                format!("item count {} exceeds maximum {}", items.len(), max),
            ));
        }
    }
    if let Some(item_schema) = &constraint.items {
        for (index, item) in items.iter().enumerate() {
            let item_violations = check_item(item, item_schema, &path.index(index));
            if !item_violations.is_empty() {
                violations.extend(item_violations.into_iter().map(|v| v.retag(kind)));
                break;
            }
        }
    }
    violations
}

/// Check required nested fields and per-property sub-schemas, recursively
pub fn validate_object_constraints(
    value: &Value,
    constraint: &ObjectConstraint,
    path: &FieldPath,
) -> Vec<Violation> {
    let kind = ViolationKind::ObjectConstraintViolation;
    let Some(fields) = value.as_object() else {
        return vec![Violation::new(
            kind,
            path.clone(),
            format!("object constraint applied to {} value", value.kind()),
        )];
    };

    let mut violations = Vec::new();
    for name in &constraint.required {
        match fields.get(name) {
            None => violations.push(Violation::new(
                kind,
                path.join(name),
                "required nested field is missing",
            )),
            Some(child) if child.is_null() => violations.push(Violation::new(
                kind,
                path.join(name),
                "required nested field is null",
            )),
            Some(_) => {}
        }
    }
    for (name, item) in &constraint.properties {
        if let Some(child) = fields.get(name) {
            let child_violations = check_item(child, item, &path.join(name));
            violations.extend(child_violations.into_iter().map(|v| v.retag(kind)));
        }
    }
    violations
}

/// Dispatch a constraint to its family evaluator
pub fn validate_constraint(
    value: &Value,
    constraint: &Constraint,
    path: &FieldPath,
) -> Vec<Violation> {
    match constraint {
        Constraint::String(c) => validate_string_constraints(value, c, path),
        Constraint::Number(c) => validate_number_constraints(value, c, path),
        Constraint::Array(c) => validate_array_constraints(value, c, path),
        Constraint::Object(c) => validate_object_constraints(value, c, path),
    }
}

/// Run every constraint in a schema's constraint group against the record
pub fn validate_constraints(
    data: &Value,
    constraints: &BTreeMap<FieldPath, Constraint>,
) -> Vec<Violation> {
    let mut violations = Vec::new();
    for (path, constraint) in constraints {
        match path.resolve(data) {
            Some(value) if !value.is_null() => {
                violations.extend(validate_constraint(value, constraint, path));
            }
            _ => {}
        }
    }
    violations
}

/// Invoke the registered predicate for each custom-rule path.
///
/// A predicate signals failure by returning a reason; a rule name with no
/// registration is itself reported as a failure rather than panicking.
pub fn validate_custom_rules(
    data: &Value,
    custom_rules: &BTreeMap<FieldPath, String>,
    registry: &RuleRegistry,
) -> Vec<Violation> {
    let mut violations = Vec::new();
    for (path, name) in custom_rules {
        let value = match path.resolve(data) {
            Some(value) if !value.is_null() => value,
            _ => continue,
        };
        match registry.get(name) {
            Some(rule) => {
                if let Err(reason) = rule(value) {
                    violations.push(Violation::new(
                        ViolationKind::CustomRuleFailure,
                        path.clone(),
                        reason,
                    ));
                }
            }
            None => violations.push(Violation::new(
                ViolationKind::CustomRuleFailure,
                path.clone(),
                format!("custom rule '{}' is not registered", name),
            )),
        }
    }
    violations
}

fn trigger_matches(data: &Value, discriminant: &FieldPath, equals: &Value) -> bool {
    discriminant.resolve(data) == Some(equals)
}

/// Re-run the required-field check for each dependent field whose
/// discriminant currently holds the trigger value
pub fn validate_conditional_rules(
    data: &Value,
    conditional_rules: &BTreeMap<FieldPath, ConditionalRule>,
) -> Vec<Violation> {
    let mut violations = Vec::new();
    for (dependent, rule) in conditional_rules {
        if !trigger_matches(data, &rule.discriminant, &rule.equals) {
            continue;
        }
        let present = matches!(dependent.resolve(data), Some(value) if !value.is_null());
        if !present {
            violations.push(Violation::new(
                ViolationKind::ConditionalRequirementUnmet,
                dependent.clone(),
                format!(
                    "field is required when '{}' equals {}",
                    rule.discriminant,
                    serde_json::Value::from(&rule.equals)
                ),
            ));
        }
    }
    violations
}

/// Check that each triggered dependency resolves to an object satisfying
/// its declared required/typed shape
pub fn validate_dependencies(
    data: &Value,
    dependency_rules: &BTreeMap<FieldPath, DependencyRule>,
) -> Vec<Violation> {
    let kind = ViolationKind::DependencyUnmet;
    let mut violations = Vec::new();
    for (dependent, rule) in dependency_rules {
        if !trigger_matches(data, &rule.discriminant, &rule.equals) {
            continue;
        }
        let trigger = format!(
            "'{}' equals {}",
            rule.discriminant,
            serde_json::Value::from(&rule.equals)
        );

        let dependent_value = match dependent.resolve(data) {
            None | Some(Value::Null) => {
                violations.push(Violation::new(
                    kind,
                    dependent.clone(),
                    format!("object is required when {}", trigger),
                ));
                continue;
            }
            Some(value) => value,
        };
        let Some(fields) = dependent_value.as_object() else {
            violations.push(Violation::new(
                kind,
                dependent.clone(),
                format!("expected object, found {}", dependent_value.kind()),
            ));
            continue;
        };

        for name in &rule.required {
            let present = matches!(fields.get(name), Some(child) if !child.is_null());
            if !present {
                violations.push(Violation::new(
                    kind,
                    dependent.join(name),
                    format!("field is required when {}", trigger),
                ));
            }
        }
        for (name, spec) in &rule.field_types {
            if let Some(child) = fields.get(name) {
                let child_path = dependent.join(name);
                violations.extend(
                    type_violation(child, spec, &child_path)
                        .into_iter()
                        .map(|v| v.retag(kind)),
                );
            }
        }
    }
    violations
}
