//! Per-field constraint families
//!
//! One constraint is attached to a field path and checks the value found
//! there. The four families mirror the value shapes they apply to; array
//! and object constraints recurse through [`ItemSchema`] sub-schemas.
//!
//! Copyright (c) 2026 Validra Team
//! Licensed under the Apache-2.0 license

use std::collections::BTreeMap;
use std::fmt;

use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use validra_core::ValueKind;

use crate::schema::FieldTypeSpec;

/// A regex compiled once at schema build time.
///
/// Matching is anchored: the whole string must match, partial hits do not
/// count.
#[derive(Debug, Clone)]
pub struct Pattern {
    source: String,
    regex: Regex,
}

impl Pattern {
    /// Compile a pattern from its source text
    pub fn new(source: impl Into<String>) -> Result<Self, regex::Error> {
        let source = source.into();
        let regex = Regex::new(&format!("^(?:{})$", source))?;
        Ok(Self { source, regex })
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn is_full_match(&self, text: &str) -> bool {
        self.regex.is_match(text)
    }
}

impl PartialEq for Pattern {
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

impl Serialize for Pattern {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.source)
    }
}

impl<'de> Deserialize<'de> for Pattern {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let source = String::deserialize(deserializer)?;
        Pattern::new(source).map_err(serde::de::Error::custom)
    }
}

/// Length and pattern checks for string values
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StringConstraint {
    pub min_length: Option<usize>,
    pub max_length: Option<usize>,
    pub pattern: Option<Pattern>,
}

/// Range and multiple-of checks for integer and number values.
///
/// Bounds are inclusive; `multiple_of` tolerates floating rounding.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NumberConstraint {
    pub minimum: Option<f64>,
    pub maximum: Option<f64>,
    pub multiple_of: Option<f64>,
}

/// Item count bounds plus an optional per-element sub-schema
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ArrayConstraint {
    pub min_items: Option<usize>,
    pub max_items: Option<usize>,
    pub items: Option<ItemSchema>,
}

/// Required nested fields plus per-property sub-schemas
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ObjectConstraint {
    pub required: Vec<String>,
    pub properties: BTreeMap<String, ItemSchema>,
}

/// Expected shape of an array element or object property
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ItemSchema {
    pub value_type: Option<FieldTypeSpec>,
    pub constraint: Option<Box<Constraint>>,
}

impl ItemSchema {
    /// Sub-schema that only pins the value tag
    pub fn of_kind(kind: ValueKind) -> Self {
        Self {
            value_type: Some(FieldTypeSpec::of(kind)),
            constraint: None,
        }
    }
}

/// One constraint attached to a field path
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Constraint {
    String(StringConstraint),
    Number(NumberConstraint),
    Array(ArrayConstraint),
    Object(ObjectConstraint),
}

impl Constraint {
    /// Returns the family name used in error messages
    pub fn family(&self) -> &'static str {
        match self {
            Constraint::String(_) => "string",
            Constraint::Number(_) => "number",
            Constraint::Array(_) => "array",
            Constraint::Object(_) => "object",
        }
    }
}
