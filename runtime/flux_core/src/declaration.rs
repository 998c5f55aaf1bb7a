//! The declaration surface a kernel fills in.

use rustc_hash::FxHashSet;

use flux_any::{FieldValue, InputValue, TypeTag};
use flux_fields::{FieldError, InputMap, ModuleInput, ModuleResult, ResultMap};
use flux_props::PropertyType;

use crate::errors::ModuleError;
use crate::submodule::{SubmodMap, SubmoduleRequest};

/// The field surface of a module, built inside `ModuleKernel::declare`.
///
/// Most modules start from `satisfies::<P>()`, which merges a property
/// type's input and result fields and records its tag, then tweak the
/// merged fields (`change_input`) and add anything the contract does not
/// cover (`add_input`, `add_result`, `add_submodule`).
#[derive(Default)]
pub struct ModuleDeclaration {
    pub(crate) inputs: InputMap,
    pub(crate) results: ResultMap,
    pub(crate) submods: SubmodMap,
    pub(crate) property_types: FxHashSet<TypeTag>,
    pub(crate) description: Option<String>,
    pub(crate) citations: Vec<String>,
}

impl ModuleDeclaration {
    /// Declares that the module can be run as `P`, merging `P`'s fields
    /// into the module's surface. A field that is already present (e.g.
    /// shared through a common base property type) is overwritten with the
    /// contract's declaration.
    pub fn satisfies<P: PropertyType>(&mut self) -> Result<&mut Self, ModuleError> {
        for (name, field) in P::inputs()? {
            self.inputs.insert(name, field);
        }
        for (name, field) in P::results()? {
            self.results.insert(name, field);
        }
        self.property_types.insert(P::tag());
        Ok(self)
    }

    /// Adds an input field not covered by any property type. End users must
    /// bind these before the module runs (or the field carries a default),
    /// so additional inputs work best as algorithmic parameters.
    pub fn add_input<T: InputValue>(
        &mut self,
        name: impl Into<String>,
    ) -> Result<&mut ModuleInput, ModuleError> {
        let name = name.into();
        if self.inputs.contains_key(&name) {
            return Err(FieldError::DuplicateField { name }.into());
        }
        let mut field = ModuleInput::new();
        field.set_type::<T>()?;
        Ok(self.inputs.entry(name).or_insert(field))
    }

    /// Adds a result field not covered by any property type.
    pub fn add_result<T: FieldValue>(
        &mut self,
        name: impl Into<String>,
    ) -> Result<&mut ModuleResult, ModuleError> {
        let name = name.into();
        if self.results.contains_key(&name) {
            return Err(FieldError::DuplicateField { name }.into());
        }
        let mut field = ModuleResult::new();
        field.set_type::<T>()?;
        Ok(self.results.entry(name).or_insert(field))
    }

    /// Declares a dependency slot that must be filled by a module
    /// satisfying `P` before this module can run.
    pub fn add_submodule<P: PropertyType>(
        &mut self,
        name: impl Into<String>,
    ) -> Result<&mut SubmoduleRequest, ModuleError> {
        let name = name.into();
        if self.submods.contains_key(&name) {
            return Err(FieldError::DuplicateField { name }.into());
        }
        let mut request = SubmoduleRequest::new();
        request.set_type::<P>()?;
        Ok(self.submods.entry(name).or_insert(request))
    }

    /// An already-declared input, for tightening property-type metadata
    /// (descriptions, defaults, checks).
    pub fn change_input(&mut self, name: &str) -> Result<&mut ModuleInput, ModuleError> {
        self.inputs
            .get_mut(name)
            .ok_or_else(|| FieldError::MissingField { name: name.into() }.into())
    }

    /// An already-declared result.
    pub fn change_result(&mut self, name: &str) -> Result<&mut ModuleResult, ModuleError> {
        self.results
            .get_mut(name)
            .ok_or_else(|| FieldError::MissingField { name: name.into() }.into())
    }

    /// An already-declared submodule request.
    pub fn change_submod(&mut self, name: &str) -> Result<&mut SubmoduleRequest, ModuleError> {
        self.submods
            .get_mut(name)
            .ok_or_else(|| FieldError::MissingField { name: name.into() }.into())
    }

    /// Sets the module's human-readable description.
    pub fn set_description(&mut self, description: impl Into<String>) -> &mut Self {
        self.description = Some(description.into());
        self
    }

    /// Adds a literature reference users of the module should cite.
    pub fn add_citation(&mut self, citation: impl Into<String>) -> &mut Self {
        self.citations.push(citation.into());
        self
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    reason = "tests use unwrap to panic on unexpected state"
)]
mod tests;
