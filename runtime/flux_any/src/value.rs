//! Erased value contracts and their blanket implementations.
//!
//! Any concrete type meeting the bounds participates automatically; there is
//! nothing to implement by hand. `FieldValue` is the contract every field
//! value satisfies; `InputValue` adds the hashability required of module
//! inputs (inputs are folded into memoization fingerprints, results are
//! not).

use std::any::{type_name, Any};
use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

use serde::Serialize;

use crate::errors::AnyError;
use crate::fingerprint::Fingerprinter;
use crate::type_tag::TypeTag;

/// The contract satisfied by every value a field can hold.
///
/// Blanket-implemented for all `Clone + Debug + PartialEq + PartialOrd +
/// Send + Sync + 'static` types.
pub trait FieldValue: Any + Send + Sync {
    /// Upcast for downcasting by reference.
    fn as_any(&self) -> &dyn Any;

    /// Upcast for downcasting by mutable reference.
    fn as_any_mut(&mut self) -> &mut dyn Any;

    /// Upcast a shared handle for downcasting by `Arc`.
    fn into_any_arc(self: Arc<Self>) -> Arc<dyn Any + Send + Sync>;

    /// A fresh boxed copy of the value.
    fn clone_boxed(&self) -> Box<dyn FieldValue>;

    /// Equality against another erased value. Values of different concrete
    /// types are never equal.
    fn eq_value(&self, other: &dyn FieldValue) -> bool;

    /// Ordering against another erased value of the same concrete type.
    fn partial_cmp_value(&self, other: &dyn FieldValue) -> Option<Ordering>;

    /// The runtime tag of the concrete type.
    fn type_tag(&self) -> TypeTag;

    /// Writes the wrapped value's debug representation.
    fn debug_value(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result;
}

impl<T> FieldValue for T
where
    T: Clone + fmt::Debug + PartialEq + PartialOrd + Send + Sync + 'static,
{
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn into_any_arc(self: Arc<Self>) -> Arc<dyn Any + Send + Sync> {
        self
    }

    fn clone_boxed(&self) -> Box<dyn FieldValue> {
        Box::new(self.clone())
    }

    fn eq_value(&self, other: &dyn FieldValue) -> bool {
        other
            .as_any()
            .downcast_ref::<T>()
            .is_some_and(|rhs| self == rhs)
    }

    fn partial_cmp_value(&self, other: &dyn FieldValue) -> Option<Ordering> {
        other
            .as_any()
            .downcast_ref::<T>()
            .and_then(|rhs| self.partial_cmp(rhs))
    }

    fn type_tag(&self) -> TypeTag {
        TypeTag::of::<T>()
    }

    fn debug_value(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// The contract satisfied by every value an *input* field can hold.
///
/// Inputs participate in memoization, so on top of `FieldValue` they must be
/// `Serialize`; the encoded bytes are what gets fingerprinted. Blanket
/// implemented like `FieldValue`.
pub trait InputValue: FieldValue {
    /// A fresh boxed copy behind the input contract.
    fn clone_boxed_input(&self) -> Box<dyn InputValue>;

    /// Folds the value (type name plus encoded bytes) into a fingerprint.
    fn fingerprint(&self, fp: &mut Fingerprinter) -> Result<(), AnyError>;

    /// Upcast to the base contract.
    fn as_field_value(&self) -> &dyn FieldValue;
}

impl<T> InputValue for T
where
    T: Clone + fmt::Debug + PartialEq + PartialOrd + Serialize + Send + Sync + 'static,
{
    fn clone_boxed_input(&self) -> Box<dyn InputValue> {
        Box::new(self.clone())
    }

    fn fingerprint(&self, fp: &mut Fingerprinter) -> Result<(), AnyError> {
        fp.write_str(type_name::<T>());
        let bytes = bincode::serialize(self).map_err(|source| AnyError::Fingerprint {
            type_name: type_name::<T>(),
            source,
        })?;
        fp.write_bytes(&bytes);
        Ok(())
    }

    fn as_field_value(&self) -> &dyn FieldValue {
        self
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    reason = "tests use unwrap to panic on unexpected state"
)]
mod tests;
