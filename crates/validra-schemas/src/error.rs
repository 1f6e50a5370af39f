//! Error types for the Validra schema engine
//!
//! Copyright (c) 2026 Validra Team
//! Licensed under the Apache-2.0 license

use thiserror::Error;
use validra_core::{NormalizeError, PathError};

use crate::schema::SchemaId;
use crate::validation::error::Violation;

/// Main error type for schema engine operations
#[derive(Error, Debug)]
pub enum Error {
    /// The schema configuration itself is malformed.
    ///
    /// Raised at create/update time, never while validating a record.
    #[error("Configuration error: {message}")]
    Configuration {
        message: String,
        #[source]
        source: Option<anyhow::Error>,
    },

    /// The referenced schema id is not stored in the registry
    #[error("Schema not found: {id}")]
    NotFound { id: SchemaId },

    /// A record failed validation; carries the first violation in
    /// fail-fast mode
    #[error(transparent)]
    Validation(#[from] Violation),
}

impl Error {
    /// Create a configuration error from a message alone
    pub fn configuration<M: Into<String>>(message: M) -> Self {
        Error::Configuration {
            message: message.into(),
            source: None,
        }
    }

    /// Create a configuration error wrapping an underlying cause
    pub fn configuration_with<M, E>(message: M, source: E) -> Self
    where
        M: Into<String>,
        E: Into<anyhow::Error>,
    {
        Error::Configuration {
            message: message.into(),
            source: Some(source.into()),
        }
    }
}

/// Convenience type alias for Results using our Error type
pub type Result<T> = std::result::Result<T, Error>;

impl From<PathError> for Error {
    fn from(err: PathError) -> Self {
        Error::configuration_with(format!("invalid field path: {}", err), err)
    }
}

impl From<regex::Error> for Error {
    fn from(err: regex::Error) -> Self {
        Error::configuration_with(format!("invalid constraint pattern: {}", err), err)
    }
}

impl From<NormalizeError> for Violation {
    fn from(err: NormalizeError) -> Self {
        Violation::new(
            crate::validation::error::ViolationKind::TypeMismatch,
            validra_core::FieldPath::root(),
            err.to_string(),
        )
    }
}
