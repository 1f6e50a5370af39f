//! Validra Schemas - schema-driven validation for business records
//!
//! This crate provides a declarative rule system for checking nested
//! record data (repairs, clients, devices, invoices, ...) against named,
//! versioned schemas:
//!
//! - **Required fields**: top-level presence checks by field path
//! - **Field types**: exact tag identity against the closed value model
//! - **Constraints**: string length/pattern, numeric range/multiple-of,
//!   array count/item sub-schema, nested object shape
//! - **Custom rules**: named predicates resolved against a rule registry
//! - **Conditional rules**: a field required only when another field holds
//!   a specific value
//! - **Dependency rules**: an entire sub-object required and shape-checked
//!   when a discriminant matches
//!
//! ## Quick Start
//!
//! ```rust
//! use serde_json::json;
//! use validra_schemas::{SchemaConfig, ValidationManager};
//!
//! let manager = ValidationManager::new();
//! let config: SchemaConfig = serde_json::from_value(json!({
//!     "type": "entity",
//!     "required_fields": ["client_name"],
//!     "field_types": {"client_name": "string", "repair_cost": "number"},
//!     "constraints": {"repair_cost": {"minimum": 0.0, "maximum": 10000.0}}
//! }))
//! .unwrap();
//!
//! let id = manager.create_validation(&config).unwrap();
//!
//! assert!(manager
//!     .validate_data(&id, &json!({"client_name": "Dupont", "repair_cost": 129.9}))
//!     .is_ok());
//! assert!(manager
//!     .validate_data(&id, &json!({"repair_cost": -10.0}))
//!     .is_err());
//! ```
//!
//! ## Validation modes
//!
//! - [`ValidationManager::validate_data`] is fail-fast: the first
//!   violation aborts the write the caller was guarding.
//! - [`ValidationManager::validate_data_all`] aggregates every violation
//!   for UI form feedback.
//!
//! The engine performs no I/O and never logs a violation; persistence and
//! retry policy belong to the caller.
//!
//! Copyright (c) 2026 Validra Team
//! Licensed under the Apache-2.0 license

pub mod error;
pub mod manager;
pub mod registry;
pub mod rules;
pub mod schema;
pub mod validation;

// Re-export commonly used types for convenience
pub use error::{Error, Result};
pub use manager::ValidationManager;
pub use registry::{RegistryStats, SchemaRegistry};
pub use rules::{RulePredicate, RuleRegistry};
pub use schema::{
    ArrayConstraint, ConditionalRule, Constraint, DependencyRule, FieldTypeSpec, ItemSchema,
    NumberConstraint, ObjectConstraint, Pattern, Schema, SchemaConfig, SchemaId, SchemaPatch,
    SchemaStatus, SchemaType, StringConstraint,
};
pub use validation::{
    validate_array_constraints, validate_conditional_rules, validate_constraint,
    validate_constraints, validate_custom_rules, validate_dependencies, validate_field_types,
    validate_number_constraints, validate_object_constraints, validate_required_fields,
    validate_string_constraints, ValidationConfig, Validator, Violation, ViolationKind,
    Violations,
};

// The value model is part of the public contract
pub use validra_core::{FieldPath, NormalizeError, PathError, Value, ValueKind};
