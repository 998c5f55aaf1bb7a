//! Failure modes of the erased containers.

use thiserror::Error;

use crate::input::StorageMode;
use crate::type_tag::TypeTag;

/// Errors raised when constructing, casting, or fingerprinting an erased
/// field value.
///
/// The three cast failures are deliberately distinct: a caller that asked
/// for the wrong type, a caller that asked for more access than the storage
/// mode permits, and a caller that asked an empty field for anything.
#[derive(Debug, Error)]
pub enum AnyError {
    /// The requested type does not match the wrapped value's type.
    #[error("cannot cast a field holding {found} to {expected}")]
    TypeMismatch { expected: TypeTag, found: TypeTag },

    /// The requested access is forbidden by the field's storage mode, e.g.
    /// a mutable reference out of const-value or const-reference storage.
    #[error("cannot take a mutable {requested} out of a field with {mode} storage")]
    ReferenceEscape {
        requested: TypeTag,
        mode: StorageMode,
    },

    /// The field holds no value.
    #[error("the field does not hold a value")]
    EmptyField,

    /// The value could not be encoded for fingerprinting.
    #[error("value of type {type_name} cannot be fingerprinted")]
    Fingerprint {
        type_name: &'static str,
        #[source]
        source: bincode::Error,
    },
}

impl AnyError {
    #[cold]
    pub(crate) fn type_mismatch<T: 'static>(found: TypeTag) -> Self {
        AnyError::TypeMismatch {
            expected: TypeTag::of::<T>(),
            found,
        }
    }

    #[cold]
    pub(crate) fn reference_escape<T: 'static>(mode: StorageMode) -> Self {
        AnyError::ReferenceEscape {
            requested: TypeTag::of::<T>(),
            mode,
        }
    }
}
