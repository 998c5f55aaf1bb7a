//! The typed result slot.

use flux_any::{AnyError, AnyResult, FieldValue, TypeTag};
use std::sync::Arc;

use crate::errors::FieldError;

/// A single named output of a module.
///
/// Carries the declared type, the produced value once the module has run,
/// and an optional description. Compared to `ModuleInput` there are no
/// defaults, bounds checks, optionality, or reference storage modes:
/// results are always owned and leave the slot by value or behind a shared
/// handle.
#[derive(Clone, Default, PartialEq)]
pub struct ModuleResult {
    tag: Option<TypeTag>,
    value: Option<AnyResult>,
    description: Option<String>,
}

impl ModuleResult {
    pub fn new() -> Self {
        ModuleResult::default()
    }

    pub fn has_type(&self) -> bool {
        self.tag.is_some()
    }

    pub fn has_value(&self) -> bool {
        self.value.is_some()
    }

    pub fn has_description(&self) -> bool {
        self.description.is_some()
    }

    /// The declared type, or `None` before `set_type`.
    pub fn type_tag(&self) -> Option<TypeTag> {
        self.tag
    }

    /// Declares the produced type. May not change once a value is produced
    /// with a different type.
    pub fn set_type<T: FieldValue>(&mut self) -> Result<&mut Self, FieldError> {
        let tag = TypeTag::of::<T>();
        if let Some(value) = &self.value {
            match value.type_tag() {
                Some(found) if found != tag => {
                    return Err(FieldError::TypeMismatch {
                        expected: tag,
                        found,
                    })
                }
                _ => {}
            }
        }
        self.tag = Some(tag);
        Ok(self)
    }

    /// Stores a produced value. Fails with `TypeNotSet` before `set_type`
    /// and `TypeMismatch` when the value's type differs from the declared
    /// one.
    pub fn change<T: FieldValue>(&mut self, value: T) -> Result<&mut Self, FieldError> {
        self.change_any(flux_any::make_any_result(value))
    }

    /// `change` for an already-erased value.
    pub fn change_any(&mut self, value: AnyResult) -> Result<&mut Self, FieldError> {
        let tag = self.tag.ok_or(FieldError::TypeNotSet)?;
        match value.type_tag() {
            Some(found) if found == tag => {}
            Some(found) => {
                return Err(FieldError::TypeMismatch {
                    expected: tag,
                    found,
                })
            }
            None => return Err(FieldError::Any(AnyError::EmptyField)),
        }
        self.value = Some(value);
        Ok(self)
    }

    pub fn set_description(&mut self, description: impl Into<String>) -> &mut Self {
        self.description = Some(description.into());
        self
    }

    /// The produced value as a copy.
    pub fn value<T: Clone + 'static>(&self) -> Result<T, FieldError> {
        Ok(self.any_value()?.cast::<T>()?)
    }

    /// The produced value behind a shared handle.
    pub fn value_shared<T: Send + Sync + 'static>(&self) -> Result<Arc<T>, FieldError> {
        Ok(self.any_value()?.cast_shared::<T>()?)
    }

    /// The erased produced value.
    pub fn any_value(&self) -> Result<&AnyResult, FieldError> {
        Ok(self.value.as_ref().ok_or(AnyError::EmptyField)?)
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }
}

impl std::fmt::Debug for ModuleResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModuleResult")
            .field("type", &self.tag)
            .field("value", &self.value)
            .finish()
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    reason = "tests use unwrap to panic on unexpected state"
)]
mod tests;
