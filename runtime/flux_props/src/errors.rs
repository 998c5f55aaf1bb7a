//! Failure modes of wrapping and unwrapping.

use flux_fields::FieldError;
use thiserror::Error;

/// Errors raised while translating between positional arguments and
/// name-indexed field maps.
#[derive(Debug, Error)]
pub enum PropertyError {
    /// The positional tuple's arity disagrees with the declared API.
    #[error("expected {expected} positional argument(s), the declared API has {found} field(s)")]
    ArityMismatch { expected: usize, found: usize },

    /// The map lacks an entry for a declared field.
    #[error("the map has no entry for declared field {name:?}")]
    MissingField { name: String },

    /// A field-level failure (type mismatch, bounds check, ...).
    #[error(transparent)]
    Field(#[from] FieldError),
}

impl PropertyError {
    #[cold]
    pub(crate) fn missing(name: impl Into<String>) -> Self {
        PropertyError::MissingField { name: name.into() }
    }
}
