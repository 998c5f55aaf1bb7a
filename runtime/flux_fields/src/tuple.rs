//! Ordered, name-indexed field sequences.
//!
//! A `FieldTuple` is the declaration-side view of a property type's API:
//! the order of the fields defines the positional argument order, and the
//! names are the keys under which values travel in field maps. Builder
//! methods consume and return the tuple, so a chained declaration cannot
//! accidentally discard an intermediate.

use std::collections::BTreeMap;

use smallvec::SmallVec;

use flux_any::{FieldValue, InputValue};

use crate::errors::FieldError;
use crate::input::ModuleInput;
use crate::result::ModuleResult;

/// An order-preserving, name-indexed sequence of fields.
///
/// Names are unique within one tuple; lookups are linear (tuples are
/// small).
#[derive(Clone, Debug, PartialEq)]
pub struct FieldTuple<F> {
    fields: SmallVec<[(String, F); 4]>,
}

/// The input half of a property-type API.
pub type InputFields = FieldTuple<ModuleInput>;

/// The result half of a property-type API.
pub type ResultFields = FieldTuple<ModuleResult>;

impl<F> FieldTuple<F> {
    pub fn new() -> Self {
        FieldTuple {
            fields: SmallVec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.fields.iter().any(|(n, _)| n == name)
    }

    /// The field registered under `name`.
    pub fn at(&self, name: &str) -> Result<&F, FieldError> {
        self.fields
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, field)| field)
            .ok_or_else(|| FieldError::missing(name))
    }

    /// The field registered under `name`, mutably.
    pub fn at_mut(&mut self, name: &str) -> Result<&mut F, FieldError> {
        self.fields
            .iter_mut()
            .find(|(n, _)| n == name)
            .map(|(_, field)| field)
            .ok_or_else(|| FieldError::missing(name))
    }

    /// Fields in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &F)> {
        self.fields.iter().map(|(name, field)| (name.as_str(), field))
    }

    /// Field names in declaration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(name, _)| name.as_str())
    }

    /// Appends `self`'s fields with `other`'s, left-to-right. Used to layer
    /// base-property-type fields onto derived ones. Duplicate names across
    /// the operands are rejected.
    pub fn concat(mut self, other: Self) -> Result<Self, FieldError> {
        for (name, field) in other.fields {
            self = self.push(name, field)?;
        }
        Ok(self)
    }

    /// Converts to a name-indexed map; declaration order is recoverable
    /// only from the tuple itself.
    pub fn into_map(self) -> BTreeMap<String, F> {
        self.fields.into_iter().collect()
    }

    fn push(mut self, name: String, field: F) -> Result<Self, FieldError> {
        if self.contains(&name) {
            return Err(FieldError::duplicate(name));
        }
        self.fields.push((name, field));
        Ok(self)
    }

    fn last_mut(&mut self) -> Result<&mut F, FieldError> {
        self.fields
            .last_mut()
            .map(|(_, field)| field)
            .ok_or(FieldError::EmptyTuple)
    }
}

impl<F> Default for FieldTuple<F> {
    fn default() -> Self {
        FieldTuple::new()
    }
}

impl<F> IntoIterator for FieldTuple<F> {
    type Item = (String, F);
    type IntoIter = smallvec::IntoIter<[(String, F); 4]>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.into_iter()
    }
}

impl FieldTuple<ModuleInput> {
    /// Appends an input field accepting values of type `T`. Fails with
    /// `DuplicateField` when `name` is already present.
    pub fn add_field<T: InputValue>(self, name: impl Into<String>) -> Result<Self, FieldError> {
        let mut field = ModuleInput::new();
        field.set_type::<T>()?;
        self.push(name.into(), field)
    }

    /// Sets the description of the most recently added field. A no-op on an
    /// empty tuple so declaration chains stay infallible after `add_field`.
    pub fn describe(mut self, description: impl Into<String>) -> Self {
        if let Ok(field) = self.last_mut() {
            field.set_description(description);
        }
        self
    }

    /// Sets the developer default of the most recently added field.
    pub fn set_default<T: InputValue>(mut self, value: T) -> Result<Self, FieldError> {
        self.last_mut()?.set_default(value)?;
        Ok(self)
    }

    /// Flags the most recently added field as optional.
    pub fn make_optional(mut self) -> Result<Self, FieldError> {
        self.last_mut()?.make_optional();
        Ok(self)
    }

    /// Flags the most recently added field as transparent.
    pub fn make_transparent(mut self) -> Result<Self, FieldError> {
        self.last_mut()?.make_transparent();
        Ok(self)
    }
}

impl FieldTuple<ModuleResult> {
    /// Appends a result field producing values of type `T`. Fails with
    /// `DuplicateField` when `name` is already present.
    pub fn add_field<T: FieldValue>(self, name: impl Into<String>) -> Result<Self, FieldError> {
        let mut field = ModuleResult::new();
        field.set_type::<T>()?;
        self.push(name.into(), field)
    }

    /// Sets the description of the most recently added field. A no-op on an
    /// empty tuple so declaration chains stay infallible after `add_field`.
    pub fn describe(mut self, description: impl Into<String>) -> Self {
        if let Ok(field) = self.last_mut() {
            field.set_description(description);
        }
        self
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    reason = "tests use unwrap to panic on unexpected state"
)]
mod tests;
