//! Property-typed dependency slots.

use std::collections::BTreeMap;

use uuid::Uuid;

use flux_any::TypeTag;
use flux_fields::InputMap;
use flux_props::{IntoArgs, PropertyType};

use crate::errors::ModuleError;
use crate::module::Module;

/// Name-indexed submodule requests, as declared on a module.
pub type SubmodMap = BTreeMap<String, SubmoduleRequest>;

/// A typed hole on a module: the property type a dependency must satisfy,
/// and optionally the module bound to fill it.
///
/// The declared property type's input map is stored alongside the tag; it
/// is what the readiness check supplies, since those inputs arrive through
/// the contract at call time rather than from configuration.
#[derive(Clone, Default)]
pub struct SubmoduleRequest {
    property_type: Option<TypeTag>,
    pt_inputs: InputMap,
    description: Option<String>,
    module: Option<Module>,
}

impl SubmoduleRequest {
    /// An empty request; `set_type` fixes what it requires.
    pub fn new() -> Self {
        SubmoduleRequest::default()
    }

    /// Fixes the property type a bound module must satisfy.
    pub fn set_type<P: PropertyType>(&mut self) -> Result<&mut Self, ModuleError> {
        self.property_type = Some(P::tag());
        self.pt_inputs = P::inputs()?.into_map();
        Ok(self)
    }

    pub fn set_description(&mut self, description: impl Into<String>) -> &mut Self {
        self.description = Some(description.into());
        self
    }

    /// Binds `module` into the hole. Fails when no property type has been
    /// declared yet or when `module` does not satisfy it.
    pub fn change(&mut self, module: Module) -> Result<(), ModuleError> {
        let tag = self.property_type.ok_or(ModuleError::SubmoduleTypeNotSet)?;
        if !module.satisfies_tag(tag) {
            return Err(ModuleError::unsatisfied(tag));
        }
        self.module = Some(module);
        Ok(())
    }

    pub fn has_type(&self) -> bool {
        self.property_type.is_some()
    }

    pub fn has_module(&self) -> bool {
        self.module.is_some()
    }

    pub fn has_description(&self) -> bool {
        self.description.is_some()
    }

    /// The required property type, once declared.
    pub fn property_type(&self) -> Option<TypeTag> {
        self.property_type
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// The bound module, if any.
    pub fn module(&self) -> Option<&Module> {
        self.module.as_ref()
    }

    /// A request is ready iff a module is bound, its property-type set
    /// covers the declared tag, and it is itself ready given the declared
    /// contract's inputs.
    pub fn ready(&self) -> bool {
        let Some(tag) = self.property_type else {
            return false;
        };
        self.module
            .as_ref()
            .is_some_and(|module| module.satisfies_tag(tag) && module.ready_with(&self.pt_inputs))
    }

    /// Invokes the bound module as `P`. How a kernel calls its
    /// dependencies.
    pub fn run_as<P: PropertyType>(
        &self,
        args: impl IntoArgs<P::Inputs>,
    ) -> Result<P::Results, ModuleError> {
        let module = self.module.as_ref().ok_or_else(|| {
            ModuleError::UnboundSubmodule {
                slot: self
                    .description
                    .clone()
                    .unwrap_or_else(|| "<unnamed>".to_string()),
            }
        })?;
        module.run_as::<P>(args)
    }

    /// The bound module's UUID, if bound.
    pub fn uuid(&self) -> Option<Uuid> {
        self.module.as_ref().map(Module::uuid)
    }

    /// The path-qualified UUIDs this request contributes to a fingerprint:
    /// the bound module under `name`, plus its own submodules under
    /// `name.<subpath>`.
    pub(crate) fn submod_uuids(&self, name: &str) -> BTreeMap<String, Uuid> {
        let mut out = BTreeMap::new();
        if let Some(module) = &self.module {
            out.insert(name.to_string(), module.uuid());
            for (path, uuid) in module.submod_uuids() {
                out.insert(format!("{name}.{path}"), uuid);
            }
        }
        out
    }
}

impl PartialEq for SubmoduleRequest {
    /// Compares the declared contract, description, and bound module; the
    /// stored contract inputs are implied by the tag.
    fn eq(&self, other: &Self) -> bool {
        self.property_type == other.property_type
            && self.description == other.description
            && self.module == other.module
    }
}

impl std::fmt::Debug for SubmoduleRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SubmoduleRequest")
            .field("property_type", &self.property_type)
            .field("bound", &self.module.is_some())
            .finish()
    }
}
