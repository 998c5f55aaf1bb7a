//! The typed input slot.

use smallvec::SmallVec;

use flux_any::{AnyError, AnyInput, Fingerprinter, InputValue, TypeTag};

use crate::checks::InputCheck;
use crate::errors::FieldError;

/// A single named input parameter of a module.
///
/// Holds the declared type, an optionally bound value, a human-readable
/// description, the optional/transparent flags, and an ordered list of
/// validity checks. Every value bound through `change` has already passed
/// the declared-type check and every bounds check, so a module never needs
/// to re-validate its inputs.
///
/// An input is *ready* iff it is optional or has a value. A *transparent*
/// input does not participate in memoization fingerprints (a printing
/// threshold is the prototypical example); inputs default to opaque.
#[derive(Clone, Default)]
pub struct ModuleInput {
    tag: Option<TypeTag>,
    value: Option<AnyInput>,
    description: Option<String>,
    optional: bool,
    transparent: bool,
    checks: SmallVec<[InputCheck; 2]>,
}

impl ModuleInput {
    /// A slot with no type, value, or metadata.
    pub fn new() -> Self {
        ModuleInput::default()
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

    pub fn is_optional(&self) -> bool {
        self.optional
    }

    pub fn is_transparent(&self) -> bool {
        self.transparent
    }

    /// An input is ready iff it is optional or has a value.
    pub fn ready(&self) -> bool {
        self.optional || self.has_value()
    }

    /// The declared type, or `None` before `set_type`.
    pub fn type_tag(&self) -> Option<TypeTag> {
        self.tag
    }

    /// Declares the accepted type.
    ///
    /// Fails with `TypeMismatch` when a value is already bound and `T` is
    /// not its type; the declared type may not change out from under a
    /// bound value.
    pub fn set_type<T: InputValue>(&mut self) -> Result<&mut Self, FieldError> {
        let tag = TypeTag::of::<T>();
        if let Some(value) = &self.value {
            match value.type_tag() {
                Some(found) if found == tag => {}
                Some(found) => {
                    return Err(FieldError::TypeMismatch {
                        expected: tag,
                        found,
                    })
                }
                None => {}
            }
        }
        self.tag = Some(tag);
        Ok(self)
    }

    /// Binds a new value to the slot.
    ///
    /// Fails with `TypeNotSet` before `set_type`, `TypeMismatch` for a
    /// value of the wrong type, and `BoundsCheckFailure` (listing every
    /// failing check) when any validity check rejects the value.
    pub fn change<T: InputValue>(&mut self, value: T) -> Result<&mut Self, FieldError> {
        self.change_any(AnyInput::owned(value))
    }

    /// `change` for an already-erased value.
    pub fn change_any(&mut self, value: AnyInput) -> Result<&mut Self, FieldError> {
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
        let failures = self.failing_checks(&value);
        if !failures.is_empty() {
            return Err(FieldError::bounds(failures));
        }
        self.value = Some(value);
        Ok(self)
    }

    /// Establishes the developer default. A thin, more descriptive wrapper
    /// around `change`: defaults come from module developers, `change` calls
    /// come from users tweaking options.
    pub fn set_default<T: InputValue>(&mut self, value: T) -> Result<&mut Self, FieldError> {
        self.change(value)
    }

    /// Sets the human-readable description. Repeated calls overwrite.
    pub fn set_description(&mut self, description: impl Into<String>) -> &mut Self {
        self.description = Some(description.into());
        self
    }

    /// Appends a validity check.
    ///
    /// Fails with `BoundsCheckFailure` if a bound value would fail the new
    /// check; the slot's value stays valid at all times.
    pub fn add_check(&mut self, check: InputCheck) -> Result<&mut Self, FieldError> {
        if let Some(value) = &self.value {
            if !check.accepts(value) {
                return Err(FieldError::bounds(vec![check.description().to_string()]));
            }
        }
        self.checks.push(check);
        Ok(self)
    }

    pub fn make_optional(&mut self) -> &mut Self {
        self.optional = true;
        self
    }

    pub fn make_required(&mut self) -> &mut Self {
        self.optional = false;
        self
    }

    pub fn make_opaque(&mut self) -> &mut Self {
        self.transparent = false;
        self
    }

    pub fn make_transparent(&mut self) -> &mut Self {
        self.transparent = true;
        self
    }

    /// Would `value` be accepted by `change`?
    ///
    /// Runs the implicit type check and every bounds check without binding.
    /// Fails with `TypeNotSet` before `set_type`.
    pub fn is_valid(&self, value: &AnyInput) -> Result<bool, FieldError> {
        let tag = self.tag.ok_or(FieldError::TypeNotSet)?;
        if value.type_tag() != Some(tag) {
            return Ok(false);
        }
        Ok(self.failing_checks(value).is_empty())
    }

    /// The bound value as a copy.
    pub fn value<T: Clone + 'static>(&self) -> Result<T, FieldError> {
        Ok(self.any_value()?.cast::<T>()?)
    }

    /// The bound value by reference.
    pub fn value_ref<T: 'static>(&self) -> Result<&T, FieldError> {
        Ok(self.any_value()?.cast_ref::<T>()?)
    }

    /// The bound value by mutable reference; respects the storage mode
    /// (const-value and const-reference bindings refuse).
    pub fn value_mut<T: 'static>(&mut self) -> Result<&mut T, FieldError> {
        let value = self.value.as_mut().ok_or(AnyError::EmptyField)?;
        Ok(value.cast_mut::<T>()?)
    }

    /// The erased bound value.
    pub fn any_value(&self) -> Result<&AnyInput, FieldError> {
        Ok(self.value.as_ref().ok_or(AnyError::EmptyField)?)
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Descriptions of every check, sorted; the implicit type check is
    /// included once a type is declared.
    pub fn check_descriptions(&self) -> Vec<String> {
        let mut descriptions: Vec<String> = self
            .checks
            .iter()
            .map(|check| check.description().to_string())
            .collect();
        if let Some(tag) = self.tag {
            descriptions.push(format!("type == {tag}"));
        }
        descriptions.sort();
        descriptions
    }

    /// Folds the bound value into a fingerprint.
    pub fn fingerprint(&self, fp: &mut Fingerprinter) -> Result<(), FieldError> {
        Ok(self.any_value()?.fingerprint(fp)?)
    }

    fn failing_checks(&self, value: &AnyInput) -> Vec<String> {
        self.checks
            .iter()
            .filter(|check| !check.accepts(value))
            .map(|check| check.description().to_string())
            .collect()
    }
}

impl PartialEq for ModuleInput {
    /// Compares declared type, bound value, description, and flags. The
    /// checks are not structurally comparable and are excluded.
    fn eq(&self, other: &Self) -> bool {
        self.tag == other.tag
            && self.value == other.value
            && self.description == other.description
            && self.optional == other.optional
            && self.transparent == other.transparent
    }
}

impl std::fmt::Debug for ModuleInput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModuleInput")
            .field("type", &self.tag)
            .field("value", &self.value)
            .field("optional", &self.optional)
            .field("transparent", &self.transparent)
            .field("checks", &self.checks.len())
            .finish()
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    reason = "tests use unwrap to panic on unexpected state"
)]
