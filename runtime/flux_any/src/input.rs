//! The type-erased input container.

use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

use crate::errors::AnyError;
use crate::fingerprint::Fingerprinter;
use crate::type_tag::TypeTag;
use crate::value::InputValue;

/// How an `AnyInput` holds its value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StorageMode {
    /// No value.
    Empty,
    /// Owned, mutable access permitted.
    Owned,
    /// Owned, read-only.
    ConstValue,
    /// Shared with other holders, read-only.
    ConstRef,
}

impl fmt::Display for StorageMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            StorageMode::Empty => "empty",
            StorageMode::Owned => "owned",
            StorageMode::ConstValue => "const-value",
            StorageMode::ConstRef => "const-reference",
        })
    }
}

enum Storage {
    Empty,
    Owned(Box<dyn InputValue>),
    ConstOwned(Box<dyn InputValue>),
    Shared(Arc<dyn InputValue>),
}

/// A type-erased input value.
///
/// Carries a value in one of three storage modes (owned, const-value,
/// const-reference) together with its runtime type tag. Which casts succeed
/// depends on the mode; see the crate docs. The tag of a non-empty field
/// never changes; assignment replaces the whole field.
pub struct AnyInput {
    storage: Storage,
}

/// Wraps `value` into an owned `AnyInput`.
pub fn make_any_input<T: InputValue>(value: T) -> AnyInput {
    AnyInput::owned(value)
}

impl AnyInput {
    /// A field holding no value.
    pub fn empty() -> Self {
        AnyInput {
            storage: Storage::Empty,
        }
    }

    /// Wraps `value` with owned storage; mutable access is permitted.
    pub fn owned<T: InputValue>(value: T) -> Self {
        AnyInput {
            storage: Storage::Owned(Box::new(value)),
        }
    }

    /// Wraps `value` with const-value storage; the field owns the value but
    /// only read access is permitted.
    pub fn const_owned<T: InputValue>(value: T) -> Self {
        AnyInput {
            storage: Storage::ConstOwned(Box::new(value)),
        }
    }

    /// Wraps a shared handle with const-reference storage. The field aliases
    /// the referent; the handle keeps it alive.
    pub fn shared<T: InputValue>(value: Arc<T>) -> Self {
        AnyInput {
            storage: Storage::Shared(value),
        }
    }

    pub fn has_value(&self) -> bool {
        !matches!(self.storage, Storage::Empty)
    }

    /// `true` when the field owns its value (owned or const-value storage).
    pub fn owns_value(&self) -> bool {
        matches!(self.storage, Storage::Owned(_) | Storage::ConstOwned(_))
    }

    pub fn storage_mode(&self) -> StorageMode {
        match self.storage {
            Storage::Empty => StorageMode::Empty,
            Storage::Owned(_) => StorageMode::Owned,
            Storage::ConstOwned(_) => StorageMode::ConstValue,
            Storage::Shared(_) => StorageMode::ConstRef,
        }
    }

    /// The wrapped value's type tag, or `None` for an empty field.
    pub fn type_tag(&self) -> Option<TypeTag> {
        self.value_ref().map(|v| v.type_tag())
    }

    /// `true` if a read-only cast to `T` would succeed.
    pub fn can_cast_ref<T: 'static>(&self) -> bool {
        self.type_tag().is_some_and(|tag| tag.is::<T>())
    }

    /// `true` if a mutable cast to `T` would succeed; requires owned storage.
    pub fn can_cast_mut<T: 'static>(&self) -> bool {
        matches!(self.storage, Storage::Owned(_)) && self.can_cast_ref::<T>()
    }

    /// Read-only access to the wrapped value. Permitted in every non-empty
    /// storage mode.
    pub fn cast_ref<T: 'static>(&self) -> Result<&T, AnyError> {
        let value = self.value_ref().ok_or(AnyError::EmptyField)?;
        value
            .as_any()
            .downcast_ref::<T>()
            .ok_or_else(|| AnyError::type_mismatch::<T>(value.type_tag()))
    }

    /// Mutable access to the wrapped value. Permitted only for owned
    /// storage; const-value and const-reference fields refuse with
    /// `ReferenceEscape`.
    pub fn cast_mut<T: 'static>(&mut self) -> Result<&mut T, AnyError> {
        let mode = self.storage_mode();
        match &mut self.storage {
            Storage::Empty => Err(AnyError::EmptyField),
            Storage::Owned(value) => {
                let tag = value.type_tag();
                value
                    .as_any_mut()
                    .downcast_mut::<T>()
                    .ok_or_else(|| AnyError::type_mismatch::<T>(tag))
            }
            Storage::ConstOwned(_) | Storage::Shared(_) => {
                Err(AnyError::reference_escape::<T>(mode))
            }
        }
    }

    /// A copy of the wrapped value. Permitted in every non-empty mode.
    pub fn cast<T: Clone + 'static>(&self) -> Result<T, AnyError> {
        self.cast_ref::<T>().map(Clone::clone)
    }

    /// Folds the wrapped value into a fingerprint. The storage mode does not
    /// participate: the same value hashes identically however it is held.
    pub fn fingerprint(&self, fp: &mut Fingerprinter) -> Result<(), AnyError> {
        self.value_ref()
            .ok_or(AnyError::EmptyField)?
            .fingerprint(fp)
    }

    fn value_ref(&self) -> Option<&dyn InputValue> {
        match &self.storage {
            Storage::Empty => None,
            Storage::Owned(value) | Storage::ConstOwned(value) => Some(value.as_ref()),
            Storage::Shared(value) => Some(value.as_ref()),
        }
    }
}

impl Default for AnyInput {
    fn default() -> Self {
        AnyInput::empty()
    }
}

impl Clone for AnyInput {
    /// Copies the field. A const-reference field deep-copies its referent
    /// into const-value storage so the copy is self-contained.
    fn clone(&self) -> Self {
        let storage = match &self.storage {
            Storage::Empty => Storage::Empty,
            Storage::Owned(value) => Storage::Owned(value.clone_boxed_input()),
            Storage::ConstOwned(value) => Storage::ConstOwned(value.clone_boxed_input()),
            Storage::Shared(value) => Storage::ConstOwned(value.clone_boxed_input()),
        };
        AnyInput { storage }
    }
}

impl PartialEq for AnyInput {
    /// Two fields are equal iff both are empty, or both hold equal values of
    /// the same type. The storage mode is not part of the comparison.
    fn eq(&self, other: &Self) -> bool {
        match (self.value_ref(), other.value_ref()) {
            (None, None) => true,
            (Some(lhs), Some(rhs)) => lhs.eq_value(rhs.as_field_value()),
            _ => false,
        }
    }
}

impl PartialOrd for AnyInput {
    /// Values of the same type order by their own ordering; an empty field
    /// orders before any non-empty field; differing types do not order.
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match (self.value_ref(), other.value_ref()) {
            (None, None) => Some(Ordering::Equal),
            (None, Some(_)) => Some(Ordering::Less),
            (Some(_), None) => Some(Ordering::Greater),
            (Some(lhs), Some(rhs)) => lhs.partial_cmp_value(rhs.as_field_value()),
        }
    }
}

impl fmt::Debug for AnyInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.value_ref() {
            None => f.write_str("AnyInput(<empty>)"),
            Some(value) => {
                write!(f, "AnyInput[{}](", self.storage_mode())?;
                value.debug_value(f)?;
                f.write_str(")")
            }
        }
    }
}

impl fmt::Display for AnyInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.value_ref() {
            None => f.write_str("<empty>"),
            Some(value) => value.debug_value(f),
        }
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    reason = "tests use unwrap to panic on unexpected state"
)]
