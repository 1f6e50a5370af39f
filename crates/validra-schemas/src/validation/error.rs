//! Violation types reported by the rule evaluators
//!
//! Copyright (c) 2026 Validra Team
//! Licensed under the Apache-2.0 license

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use validra_core::FieldPath;

/// The nine validation-time violation categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViolationKind {
    MissingRequiredField,
    TypeMismatch,
    StringConstraintViolation,
    NumberConstraintViolation,
    ArrayConstraintViolation,
    ObjectConstraintViolation,
    CustomRuleFailure,
    ConditionalRequirementUnmet,
    DependencyUnmet,
}

impl ViolationKind {
    /// Returns the kind name used in serialized reports
    pub fn name(&self) -> &'static str {
        match self {
            ViolationKind::MissingRequiredField => "missing_required_field",
            ViolationKind::TypeMismatch => "type_mismatch",
            ViolationKind::StringConstraintViolation => "string_constraint_violation",
            ViolationKind::NumberConstraintViolation => "number_constraint_violation",
            ViolationKind::ArrayConstraintViolation => "array_constraint_violation",
            ViolationKind::ObjectConstraintViolation => "object_constraint_violation",
            ViolationKind::CustomRuleFailure => "custom_rule_failure",
            ViolationKind::ConditionalRequirementUnmet => "conditional_requirement_unmet",
            ViolationKind::DependencyUnmet => "dependency_unmet",
        }
    }
}

impl fmt::Display for ViolationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A single rule failure with the offending field path and reason
#[derive(Debug, Clone, PartialEq, Error, Serialize, Deserialize)]
pub struct Violation {
    pub kind: ViolationKind,
    pub path: FieldPath,
    pub reason: String,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at '{}': {}", self.kind, self.path, self.reason)
    }
}

impl Violation {
    /// Create a new violation
    pub fn new<R: Into<String>>(kind: ViolationKind, path: FieldPath, reason: R) -> Self {
        Self {
            kind,
            path,
            reason: reason.into(),
        }
    }

    /// Re-tag a violation produced inside a container constraint, keeping
    /// its path and reason
    pub(crate) fn retag(mut self, kind: ViolationKind) -> Self {
        self.kind = kind;
        self
    }
}

/// Aggregated violations from a full validation pass
#[derive(Debug, Clone, Default, PartialEq, Error, Serialize, Deserialize)]
pub struct Violations {
    violations: Vec<Violation>,
}

impl fmt::Display for Violations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "record failed validation with {} violation(s):", self.len())?;
        for (i, violation) in self.violations.iter().enumerate() {
            write!(f, "\n{}. {}", i + 1, violation)?;
        }
        Ok(())
    }
}

impl Violations {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, violation: Violation) {
        self.violations.push(violation);
    }

    pub fn extend<I: IntoIterator<Item = Violation>>(&mut self, violations: I) {
        self.violations.extend(violations);
    }

    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    pub fn len(&self) -> usize {
        self.violations.len()
    }

    pub fn first(&self) -> Option<&Violation> {
        self.violations.first()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Violation> {
        self.violations.iter()
    }

    /// Drop everything past `max` entries; `max == 0` keeps all
    pub(crate) fn truncate(&mut self, max: usize) {
        if max > 0 && self.violations.len() > max {
            self.violations.truncate(max);
        }
    }

    /// Convert to result - Ok if no violations were collected
    pub fn into_result(self) -> Result<(), Self> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl From<Violation> for Violations {
    fn from(violation: Violation) -> Self {
        Self {
            violations: vec![violation],
        }
    }
}

impl From<Vec<Violation>> for Violations {
    fn from(violations: Vec<Violation>) -> Self {
        Self { violations }
    }
}

impl IntoIterator for Violations {
    type Item = Violation;
    type IntoIter = std::vec::IntoIter<Violation>;

    fn into_iter(self) -> Self::IntoIter {
        self.violations.into_iter()
    }
}
