//! Error types for value normalization and field path parsing

use thiserror::Error;

/// Errors raised while normalizing external data into the [`Value`] model.
///
/// Normalization failures are reported, never panicked on: malformed input
/// is a property of the record being validated, not of the engine.
///
/// [`Value`]: crate::Value
#[derive(Error, Debug, Clone, PartialEq)]
pub enum NormalizeError {
    /// A JSON number that cannot be represented as `i64` or a finite `f64`
    #[error("number {literal} is not representable")]
    UnrepresentableNumber { literal: String },
}

/// Errors raised while parsing a textual field path
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PathError {
    /// Empty path or empty segment (`"a..b"`, trailing dot)
    #[error("field path {path:?} has an empty segment")]
    EmptySegment { path: String },

    /// Malformed bracket index (`"parts[x]"`, unclosed bracket)
    #[error("field path {path:?} has a malformed index segment {segment:?}")]
    BadIndex { path: String, segment: String },
}
