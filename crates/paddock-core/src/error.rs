//! # Validation Errors
//!
//! Construction-time errors for the provisioning identifier newtypes,
//! built with `thiserror`. No `Box<dyn Error>`, no `.unwrap()` outside
//! tests.
//!
//! Each variant carries the rejected input and the expected format so
//! that misconfiguration can be diagnosed without guesswork.

use thiserror::Error;

/// Validation errors for the provisioning identifier newtypes.
///
/// Identifiers enforce their format at construction time; a value of one
/// of these types is always well-formed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// An application id part (tenant, application, or instance) is empty
    /// or contains a character outside the identifier alphabet.
    #[error("invalid application id part: \"{0}\" (expected non-empty [A-Za-z0-9_-])")]
    InvalidApplicationId(String),

    /// A zone id part (environment or region) is empty or contains a
    /// character outside the identifier alphabet.
    #[error("invalid zone id part: \"{0}\" (expected non-empty [A-Za-z0-9_-])")]
    InvalidZoneId(String),

    /// A cluster id is empty or whitespace-only.
    #[error("invalid cluster id: must be non-empty")]
    InvalidClusterId,

    /// A node type name does not match a known variant.
    #[error("unknown node type: {0:?}")]
    UnknownNodeType(String),

    /// A serialized identifier does not match its documented form.
    #[error("cannot parse \"{input}\" as {expected}")]
    InvalidSerializedForm {
        /// The string that failed to parse.
        input: String,
        /// The form that was expected.
        expected: &'static str,
    },
}
