//! Schema configuration wire format
//!
//! The only external shape the engine understands: a nested mapping with
//! one key per rule group (`required_fields`, `field_types`, `constraints`,
//! `custom`, `required_if`, `dependencies`). Unknown keys are rejected at
//! deserialization, and [`Schema::from_config`] turns the untyped mapping
//! into the typed model, failing with a configuration error on anything
//! ill-formed. Nothing here touches the filesystem; callers hand in
//! documents they already parsed.
//!
//! Copyright (c) 2026 Validra Team
//! Licensed under the Apache-2.0 license

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use validra_core::{FieldPath, Value, ValueKind};

use crate::error::{Error, Result};
use crate::schema::constraints::{
    ArrayConstraint, Constraint, ItemSchema, NumberConstraint, ObjectConstraint, Pattern,
    StringConstraint,
};
use crate::schema::{
    ConditionalRule, DependencyRule, FieldTypeSpec, Schema, SchemaId, SchemaStatus, SchemaType,
};

/// Full schema configuration, as supplied to `create`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SchemaConfig {
    #[serde(rename = "type")]
    pub schema_type: SchemaType,
    #[serde(default)]
    pub status: Option<SchemaStatus>,
    #[serde(default)]
    pub required_fields: Vec<String>,
    #[serde(default)]
    pub field_types: BTreeMap<String, FieldTypeConfig>,
    #[serde(default)]
    pub constraints: BTreeMap<String, ConstraintConfig>,
    #[serde(default)]
    pub custom: BTreeMap<String, String>,
    #[serde(default)]
    pub required_if: BTreeMap<String, ConditionalConfig>,
    #[serde(default)]
    pub dependencies: BTreeMap<String, DependencyConfig>,
}

impl SchemaConfig {
    /// Empty configuration of the given type
    pub fn new(schema_type: SchemaType) -> Self {
        Self {
            schema_type,
            status: None,
            required_fields: Vec::new(),
            field_types: BTreeMap::new(),
            constraints: BTreeMap::new(),
            custom: BTreeMap::new(),
            required_if: BTreeMap::new(),
            dependencies: BTreeMap::new(),
        }
    }
}

/// Partial configuration for `update`: every rule group is optional, and a
/// supplied group replaces the stored one wholesale
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SchemaPatch {
    #[serde(rename = "type")]
    pub schema_type: Option<SchemaType>,
    pub status: Option<SchemaStatus>,
    pub required_fields: Option<Vec<String>>,
    pub field_types: Option<BTreeMap<String, FieldTypeConfig>>,
    pub constraints: Option<BTreeMap<String, ConstraintConfig>>,
    pub custom: Option<BTreeMap<String, String>>,
    pub required_if: Option<BTreeMap<String, ConditionalConfig>>,
    pub dependencies: Option<BTreeMap<String, DependencyConfig>>,
}

/// Declared field type: either a bare kind name or `{type, nullable}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldTypeConfig {
    Kind(ValueKind),
    Spec {
        #[serde(rename = "type")]
        kind: ValueKind,
        #[serde(default)]
        nullable: bool,
    },
}

impl FieldTypeConfig {
    fn to_spec(&self) -> FieldTypeSpec {
        match *self {
            FieldTypeConfig::Kind(kind) => FieldTypeSpec::of(kind),
            FieldTypeConfig::Spec { kind, nullable } => FieldTypeSpec { kind, nullable },
        }
    }
}

/// Flat constraint entry; exactly one family's keys must be present
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConstraintConfig {
    // string family
    pub min_length: Option<usize>,
    pub max_length: Option<usize>,
    pub pattern: Option<String>,
    // number family
    pub minimum: Option<f64>,
    pub maximum: Option<f64>,
    pub multiple_of: Option<f64>,
    // array family
    pub min_items: Option<usize>,
    pub max_items: Option<usize>,
    pub items: Option<Box<ItemConfig>>,
    // object family
    pub required: Option<Vec<String>>,
    pub properties: Option<BTreeMap<String, ItemConfig>>,
}

impl ConstraintConfig {
    fn has_string_keys(&self) -> bool {
        self.min_length.is_some() || self.max_length.is_some() || self.pattern.is_some()
    }

    fn has_number_keys(&self) -> bool {
        self.minimum.is_some() || self.maximum.is_some() || self.multiple_of.is_some()
    }

    fn has_array_keys(&self) -> bool {
        self.min_items.is_some() || self.max_items.is_some() || self.items.is_some()
    }

    fn has_object_keys(&self) -> bool {
        self.required.is_some() || self.properties.is_some()
    }

    /// Classify into exactly one constraint family
    pub(crate) fn classify(&self, at: &str) -> Result<Constraint> {
        self.classify_optional(at)?.ok_or_else(|| {
            Error::configuration(format!("constraint for '{}' declares no checks", at))
        })
    }

    /// Classify, treating a fully empty entry as "no constraint"
    pub(crate) fn classify_optional(&self, at: &str) -> Result<Option<Constraint>> {
        let families = [
            self.has_string_keys(),
            self.has_number_keys(),
            self.has_array_keys(),
            self.has_object_keys(),
        ];
        match families.iter().filter(|present| **present).count() {
            0 => return Ok(None),
            1 => {}
            _ => {
                return Err(Error::configuration(format!(
                    "constraint for '{}' mixes keys from more than one family",
                    at
                )))
            }
        }

        let constraint = if self.has_string_keys() {
            if let (Some(min), Some(max)) = (self.min_length, self.max_length) {
                if min > max {
                    return Err(Error::configuration(format!(
                        "constraint for '{}' has min_length {} above max_length {}",
                        at, min, max
                    )));
                }
            }
            let pattern = match &self.pattern {
                Some(source) => Some(Pattern::new(source.clone()).map_err(|e| {
                    Error::configuration_with(
                        format!("constraint for '{}' has an invalid pattern", at),
                        e,
                    )
                })?),
                None => None,
            };
            Constraint::String(StringConstraint {
                min_length: self.min_length,
                max_length: self.max_length,
                pattern,
            })
        } else if self.has_number_keys() {
            if let (Some(min), Some(max)) = (self.minimum, self.maximum) {
                if min > max {
                    return Err(Error::configuration(format!(
                        "constraint for '{}' has minimum {} above maximum {}",
                        at, min, max
                    )));
                }
            }
            if let Some(base) = self.multiple_of {
                if base <= 0.0 {
                    return Err(Error::configuration(format!(
                        "constraint for '{}' has a non-positive multiple_of",
                        at
                    )));
                }
            }
            Constraint::Number(NumberConstraint {
                minimum: self.minimum,
                maximum: self.maximum,
                multiple_of: self.multiple_of,
            })
        } else if self.has_array_keys() {
            if let (Some(min), Some(max)) = (self.min_items, self.max_items) {
                if min > max {
                    return Err(Error::configuration(format!(
                        "constraint for '{}' has min_items {} above max_items {}",
                        at, min, max
                    )));
                }
            }
            let items = match &self.items {
                Some(item) => Some(item.build(&format!("{}[]", at))?),
                None => None,
            };
            Constraint::Array(ArrayConstraint {
                min_items: self.min_items,
                max_items: self.max_items,
                items,
            })
        } else {
            let required = self.required.clone().unwrap_or_default();
            for name in &required {
                if name.is_empty() {
                    return Err(Error::configuration(format!(
                        "constraint for '{}' lists an empty required field name",
                        at
                    )));
                }
            }
            let mut properties = BTreeMap::new();
            if let Some(raw) = &self.properties {
                for (name, item) in raw {
                    properties.insert(name.clone(), item.build(&format!("{}.{}", at, name))?);
                }
            }
            Constraint::Object(ObjectConstraint {
                required,
                properties,
            })
        };

        Ok(Some(constraint))
    }
}

/// Array element / object property sub-schema: a declared type plus inline
/// constraint keys
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ItemConfig {
    #[serde(rename = "type", default)]
    pub value_type: Option<FieldTypeConfig>,
    #[serde(flatten)]
    pub constraint: ConstraintConfig,
}

impl ItemConfig {
    fn build(&self, at: &str) -> Result<ItemSchema> {
        let constraint = self.constraint.classify_optional(at)?.map(Box::new);
        let value_type = self.value_type.as_ref().map(FieldTypeConfig::to_spec);
        if value_type.is_none() && constraint.is_none() {
            return Err(Error::configuration(format!(
                "sub-schema for '{}' declares neither a type nor a constraint",
                at
            )));
        }
        Ok(ItemSchema {
            value_type,
            constraint,
        })
    }
}

/// `required_if` entry: the mapped field becomes required when `field`
/// holds `equals`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConditionalConfig {
    pub field: String,
    pub equals: Value,
}

/// Dependency entry: the mapped field must be a well-formed object when
/// `field` holds `equals`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DependencyConfig {
    pub field: String,
    pub equals: Value,
    #[serde(default)]
    pub required: Vec<String>,
    #[serde(default)]
    pub field_types: BTreeMap<String, FieldTypeConfig>,
}

fn build_required(raw: &[String]) -> Result<Vec<FieldPath>> {
    let mut out = Vec::with_capacity(raw.len());
    for text in raw {
        let path = FieldPath::parse(text)?;
        if path.is_root() {
            return Err(Error::configuration(
                "required_fields cannot list the record root",
            ));
        }
        if !out.contains(&path) {
            out.push(path);
        }
    }
    Ok(out)
}

fn build_field_types(
    raw: &BTreeMap<String, FieldTypeConfig>,
) -> Result<BTreeMap<FieldPath, FieldTypeSpec>> {
    let mut out = BTreeMap::new();
    for (text, config) in raw {
        out.insert(FieldPath::parse(text)?, config.to_spec());
    }
    Ok(out)
}

fn build_constraints(
    raw: &BTreeMap<String, ConstraintConfig>,
) -> Result<BTreeMap<FieldPath, Constraint>> {
    let mut out = BTreeMap::new();
    for (text, config) in raw {
        out.insert(FieldPath::parse(text)?, config.classify(text)?);
    }
    Ok(out)
}

fn build_custom(raw: &BTreeMap<String, String>) -> Result<BTreeMap<FieldPath, String>> {
    let mut out = BTreeMap::new();
    for (text, rule) in raw {
        if rule.is_empty() {
            return Err(Error::configuration(format!(
                "custom rule for '{}' has an empty name",
                text
            )));
        }
        out.insert(FieldPath::parse(text)?, rule.clone());
    }
    Ok(out)
}

fn build_conditionals(
    raw: &BTreeMap<String, ConditionalConfig>,
) -> Result<BTreeMap<FieldPath, ConditionalRule>> {
    let mut out = BTreeMap::new();
    for (text, config) in raw {
        out.insert(
            FieldPath::parse(text)?,
            ConditionalRule {
                discriminant: FieldPath::parse(&config.field)?,
                equals: config.equals.clone(),
            },
        );
    }
    Ok(out)
}

fn build_dependencies(
    raw: &BTreeMap<String, DependencyConfig>,
) -> Result<BTreeMap<FieldPath, DependencyRule>> {
    let mut out = BTreeMap::new();
    for (text, config) in raw {
        for name in &config.required {
            if name.is_empty() {
                return Err(Error::configuration(format!(
                    "dependency for '{}' lists an empty required field name",
                    text
                )));
            }
        }
        let mut field_types = BTreeMap::new();
        for (name, spec) in &config.field_types {
            field_types.insert(name.clone(), spec.to_spec());
        }
        out.insert(
            FieldPath::parse(text)?,
            DependencyRule {
                discriminant: FieldPath::parse(&config.field)?,
                equals: config.equals.clone(),
                required: config.required.clone(),
                field_types,
            },
        );
    }
    Ok(out)
}

impl Schema {
    /// Build a typed schema from a configuration document.
    ///
    /// Fails with a configuration error on unknown type/status tags,
    /// unparseable field paths, mixed or empty constraint entries, and
    /// invalid patterns; validation time never sees a malformed schema.
    pub(crate) fn from_config(id: SchemaId, config: &SchemaConfig) -> Result<Self> {
        Ok(Self {
            id,
            schema_type: config.schema_type,
            status: config.status.unwrap_or_default(),
            version: 1,
            required_fields: build_required(&config.required_fields)?,
            field_types: build_field_types(&config.field_types)?,
            constraints: build_constraints(&config.constraints)?,
            custom_rules: build_custom(&config.custom)?,
            conditional_rules: build_conditionals(&config.required_if)?,
            dependency_rules: build_dependencies(&config.dependencies)?,
        })
    }

    /// Produce the next version of this schema with the patched rule
    /// groups replaced and everything else carried over unchanged
    pub(crate) fn apply_patch(&self, patch: &SchemaPatch) -> Result<Self> {
        let mut next = self.clone();
        next.version = self.version + 1;

        if let Some(schema_type) = patch.schema_type {
            next.schema_type = schema_type;
        }
        if let Some(status) = patch.status {
            next.status = status;
        }
        if let Some(raw) = &patch.required_fields {
            next.required_fields = build_required(raw)?;
        }
        if let Some(raw) = &patch.field_types {
            next.field_types = build_field_types(raw)?;
        }
        if let Some(raw) = &patch.constraints {
            next.constraints = build_constraints(raw)?;
        }
        if let Some(raw) = &patch.custom {
            next.custom_rules = build_custom(raw)?;
        }
        if let Some(raw) = &patch.required_if {
            next.conditional_rules = build_conditionals(raw)?;
        }
        if let Some(raw) = &patch.dependencies {
            next.dependency_rules = build_dependencies(raw)?;
        }

        Ok(next)
    }
}
