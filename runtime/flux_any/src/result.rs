//! The type-erased result container.

use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

use crate::errors::AnyError;
use crate::type_tag::TypeTag;
use crate::value::FieldValue;

/// A type-erased result value.
///
/// Results are always owned: reference storage modes are forbidden, and no
/// reference ever escapes the container. Values leave by copy (`cast`) or
/// behind a fresh shared handle (`cast_shared`). Internally the value sits
/// behind an `Arc` so result maps clone cheaply on cache hits; that sharing
/// is unobservable because access is read-only.
#[derive(Clone, Default)]
pub struct AnyResult {
    value: Option<Arc<dyn FieldValue>>,
}

/// Wraps `value` into an `AnyResult`.
pub fn make_any_result<T: FieldValue>(value: T) -> AnyResult {
    AnyResult {
        value: Some(Arc::new(value)),
    }
}

impl AnyResult {
    /// A result holding no value.
    pub fn empty() -> Self {
        AnyResult::default()
    }

    pub fn has_value(&self) -> bool {
        self.value.is_some()
    }

    /// The wrapped value's type tag, or `None` for an empty result.
    pub fn type_tag(&self) -> Option<TypeTag> {
        self.value.as_ref().map(|v| v.type_tag())
    }

    /// `true` if a cast to `T` would succeed.
    pub fn can_cast<T: 'static>(&self) -> bool {
        self.type_tag().is_some_and(|tag| tag.is::<T>())
    }

    /// A copy of the wrapped value.
    pub fn cast<T: Clone + 'static>(&self) -> Result<T, AnyError> {
        let value = self.value.as_ref().ok_or(AnyError::EmptyField)?;
        value
            .as_any()
            .downcast_ref::<T>()
            .cloned()
            .ok_or_else(|| AnyError::type_mismatch::<T>(value.type_tag()))
    }

    /// A shared handle to the wrapped value; avoids copying large results.
    pub fn cast_shared<T: Send + Sync + 'static>(&self) -> Result<Arc<T>, AnyError> {
        let value = self.value.as_ref().ok_or(AnyError::EmptyField)?;
        let tag = value.type_tag();
        Arc::clone(value)
            .into_any_arc()
            .downcast::<T>()
            .map_err(|_| AnyError::type_mismatch::<T>(tag))
    }
}

impl PartialEq for AnyResult {
    /// Two results are equal iff both are empty, or both hold equal values
    /// of the same type.
    fn eq(&self, other: &Self) -> bool {
        match (&self.value, &other.value) {
            (None, None) => true,
            (Some(lhs), Some(rhs)) => lhs.eq_value(rhs.as_ref()),
            _ => false,
        }
    }
}

impl PartialOrd for AnyResult {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match (&self.value, &other.value) {
            (None, None) => Some(Ordering::Equal),
            (None, Some(_)) => Some(Ordering::Less),
            (Some(_), None) => Some(Ordering::Greater),
            (Some(lhs), Some(rhs)) => lhs.partial_cmp_value(rhs.as_ref()),
        }
    }
}

impl fmt::Debug for AnyResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.value {
            None => f.write_str("AnyResult(<empty>)"),
            Some(value) => {
                f.write_str("AnyResult(")?;
                value.debug_value(f)?;
                f.write_str(")")
            }
        }
    }
}

impl fmt::Display for AnyResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.value {
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
mod tests;
