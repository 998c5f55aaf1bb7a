//! Failure modes of fields and field tuples.

use flux_any::{AnyError, TypeTag};
use thiserror::Error;

/// Errors raised while declaring fields, binding values, or looking fields
/// up by name.
#[derive(Debug, Error)]
pub enum FieldError {
    /// A field with this name already exists in the tuple or map.
    #[error("a field named {name:?} already exists")]
    DuplicateField { name: String },

    /// No field with this name exists.
    #[error("no field named {name:?}")]
    MissingField { name: String },

    /// The field was used before `set_type` declared its type.
    #[error("the field's type has not been set")]
    TypeNotSet,

    /// A value (or retype) is incompatible with the declared type.
    #[error("field declared as {expected} cannot hold a value of type {found}")]
    TypeMismatch { expected: TypeTag, found: TypeTag },

    /// A value was rejected by one or more validity checks; every failing
    /// check's description is listed.
    #[error("value rejected by bounds check(s): {}", failures.join("; "))]
    BoundsCheckFailure { failures: Vec<String> },

    /// `set_default` or `describe` was applied to a tuple with no fields.
    #[error("the field tuple has no fields to modify")]
    EmptyTuple,

    /// A cast or fingerprint failure from the erased container.
    #[error(transparent)]
    Any(#[from] AnyError),
}

impl FieldError {
    #[cold]
    pub(crate) fn duplicate(name: impl Into<String>) -> Self {
        FieldError::DuplicateField { name: name.into() }
    }

    #[cold]
    pub(crate) fn missing(name: impl Into<String>) -> Self {
        FieldError::MissingField { name: name.into() }
    }

    #[cold]
    pub(crate) fn bounds(failures: Vec<String>) -> Self {
        FieldError::BoundsCheckFailure { failures }
    }
}
