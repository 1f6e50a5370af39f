//! Schema model: named, versioned bundles of validation rule groups
//!
//! A [`Schema`] is immutable once handed out by the registry; updates build
//! a replacement value under the same id with a bumped version. The rule
//! groups mirror the configuration surface one to one, so a missing or
//! misspelled group is a construction-time error rather than a silently
//! ignored key.
//!
//! Copyright (c) 2026 Validra Team
//! Licensed under the Apache-2.0 license

pub mod config;
pub mod constraints;

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validra_core::{FieldPath, Value, ValueKind};

pub use config::{
    ConditionalConfig, ConstraintConfig, DependencyConfig, FieldTypeConfig, ItemConfig,
    SchemaConfig, SchemaPatch,
};
pub use constraints::{
    ArrayConstraint, Constraint, ItemSchema, NumberConstraint, ObjectConstraint, Pattern,
    StringConstraint,
};

/// Unique identifier of a stored schema
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SchemaId(Uuid);

impl SchemaId {
    pub(crate) fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for SchemaId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for SchemaId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// Classification of the schema itself: which surface consumes it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SchemaType {
    /// Guards entity-manager writes
    Entity,
    /// Backs UI form feedback
    Form,
    /// Checks API payloads
    Api,
}

impl SchemaType {
    pub fn name(&self) -> &'static str {
        match self {
            SchemaType::Entity => "entity",
            SchemaType::Form => "form",
            SchemaType::Api => "api",
        }
    }
}

impl fmt::Display for SchemaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Lifecycle status of a stored schema
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SchemaStatus {
    Active,
    Draft,
    Deprecated,
}

impl SchemaStatus {
    pub fn name(&self) -> &'static str {
        match self {
            SchemaStatus::Active => "active",
            SchemaStatus::Draft => "draft",
            SchemaStatus::Deprecated => "deprecated",
        }
    }
}

impl fmt::Display for SchemaStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Default for SchemaStatus {
    fn default() -> Self {
        SchemaStatus::Active
    }
}

/// Declared type of a field: the expected tag, and whether an explicit
/// null is acceptable in its place
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldTypeSpec {
    pub kind: ValueKind,
    #[serde(default)]
    pub nullable: bool,
}

impl FieldTypeSpec {
    /// Non-nullable spec for a kind
    pub fn of(kind: ValueKind) -> Self {
        Self {
            kind,
            nullable: false,
        }
    }

    pub fn nullable(kind: ValueKind) -> Self {
        Self {
            kind,
            nullable: true,
        }
    }
}

/// A requirement on one field that activates when another field holds a
/// specific value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConditionalRule {
    /// Field whose value decides whether the requirement applies
    pub discriminant: FieldPath,
    /// Literal trigger value, compared with no coercion
    pub equals: Value,
}

/// A requirement that an entire sub-object exists and is well-formed,
/// activated by a discriminant field's value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DependencyRule {
    pub discriminant: FieldPath,
    pub equals: Value,
    /// Fields that must be present inside the dependent object
    pub required: Vec<String>,
    /// Declared types for fields inside the dependent object
    pub field_types: BTreeMap<String, FieldTypeSpec>,
}

/// A named, versioned bundle of validation rule groups
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Schema {
    pub id: SchemaId,
    #[serde(rename = "type")]
    pub schema_type: SchemaType,
    pub status: SchemaStatus,
    pub version: u32,
    pub required_fields: Vec<FieldPath>,
    pub field_types: BTreeMap<FieldPath, FieldTypeSpec>,
    pub constraints: BTreeMap<FieldPath, Constraint>,
    pub custom_rules: BTreeMap<FieldPath, String>,
    pub conditional_rules: BTreeMap<FieldPath, ConditionalRule>,
    pub dependency_rules: BTreeMap<FieldPath, DependencyRule>,
}

impl Schema {
    /// Names of every custom rule this schema references
    pub fn referenced_rules(&self) -> impl Iterator<Item = &str> {
        self.custom_rules.values().map(String::as_str)
    }
}
