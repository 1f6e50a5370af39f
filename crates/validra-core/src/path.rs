//! Field paths addressing values inside a nested record
//!
//! A path is written the way callers spell it in schema configs:
//! dot-separated field names with optional bracketed indexes, e.g.
//! `address.city` or `parts[0].quantity`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::PathError;
use crate::value::Value;

/// One step of a [`FieldPath`]
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PathSegment {
    /// Object field lookup
    Key(String),
    /// Array element lookup
    Index(usize),
}

/// Parsed address of a value inside a nested object/array tree
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FieldPath {
    segments: Vec<PathSegment>,
}

impl FieldPath {
    /// The whole record, rendered as `$`
    pub fn root() -> Self {
        Self { segments: Vec::new() }
    }

    /// Parse a textual path such as `parts[0].quantity`
    pub fn parse(path: &str) -> Result<Self, PathError> {
        if path == "$" {
            return Ok(Self::root());
        }
        if path.is_empty() {
            return Err(PathError::EmptySegment {
                path: path.to_string(),
            });
        }

        let mut segments = Vec::new();
        for piece in path.split('.') {
            let (name, rest) = match piece.find('[') {
                Some(bracket) => piece.split_at(bracket),
                None => (piece, ""),
            };

            if name.is_empty() {
                return Err(PathError::EmptySegment {
                    path: path.to_string(),
                });
            }
            segments.push(PathSegment::Key(name.to_string()));

            let mut rest = rest;
            while !rest.is_empty() {
                let close = rest.find(']').ok_or_else(|| PathError::BadIndex {
                    path: path.to_string(),
                    segment: piece.to_string(),
                })?;
                let index: usize =
                    rest[1..close].parse().map_err(|_| PathError::BadIndex {
                        path: path.to_string(),
                        segment: piece.to_string(),
                    })?;
                segments.push(PathSegment::Index(index));
                rest = &rest[close + 1..];
                if !rest.is_empty() && !rest.starts_with('[') {
                    return Err(PathError::BadIndex {
                        path: path.to_string(),
                        segment: piece.to_string(),
                    });
                }
            }
        }

        Ok(Self { segments })
    }

    /// Single-field path at the top level of a record
    pub fn key(name: impl Into<String>) -> Self {
        Self {
            segments: vec![PathSegment::Key(name.into())],
        }
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// Child path for a nested field, the counterpart of a `.name` step
    pub fn join(&self, name: impl Into<String>) -> Self {
        let mut segments = self.segments.clone();
        segments.push(PathSegment::Key(name.into()));
        Self { segments }
    }

    /// Child path for an array element, the counterpart of an `[i]` step
    pub fn index(&self, index: usize) -> Self {
        let mut segments = self.segments.clone();
        segments.push(PathSegment::Index(index));
        Self { segments }
    }

    /// Walk the path through a value tree.
    ///
    /// Returns `None` when any step is absent or addresses the wrong shape
    /// (a key into a non-object, an index into a non-array).
    pub fn resolve<'a>(&self, root: &'a Value) -> Option<&'a Value> {
        let mut current = root;
        for segment in &self.segments {
            current = match segment {
                PathSegment::Key(name) => current.get(name)?,
                PathSegment::Index(i) => current.as_array()?.get(*i)?,
            };
        }
        Some(current)
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.segments.is_empty() {
            return f.write_str("$");
        }
        for (i, segment) in self.segments.iter().enumerate() {
            match segment {
                PathSegment::Key(name) => {
                    if i > 0 {
                        f.write_str(".")?;
                    }
                    f.write_str(name)?;
                }
                PathSegment::Index(index) => write!(f, "[{}]", index)?,
            }
        }
        Ok(())
    }
}

impl FromStr for FieldPath {
    type Err = PathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for FieldPath {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for FieldPath {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        FieldPath::parse(&text).map_err(serde::de::Error::custom)
    }
}
