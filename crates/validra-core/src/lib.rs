//! Validra Core - value model and field paths
//!
//! The leaves of the Validra validation engine: a closed tagged
//! representation of dynamic record data ([`Value`]), the addresses used to
//! reach into it ([`FieldPath`]), and the errors normalization and path
//! parsing can produce. Everything here is pure data with no I/O and no
//! shared state; the rule system itself lives in `validra-schemas`.

pub mod error;
pub mod path;
pub mod value;

pub use error::{NormalizeError, PathError};
pub use path::{FieldPath, PathSegment};
pub use value::{Value, ValueKind};
