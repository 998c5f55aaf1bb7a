//! The module registry.

use std::collections::BTreeMap;
use std::sync::Arc;

use rustc_hash::FxHashMap;
use tracing::debug;
use uuid::Uuid;

use flux_any::{InputValue, TypeTag};
use flux_cache::ModuleManagerCache;
use flux_fields::InputMap;
use flux_props::{IntoArgs, PropertyType};

use crate::errors::ModuleError;
use crate::module::Module;
use crate::module_base::{ModuleBase, ModuleKernel};
use crate::runtime::RuntimeView;

/// The registry of modules, keyed by string.
///
/// The manager owns the cache subsystem and the parallel-runtime handle,
/// both injected into every module it registers. It also records a default
/// module per property type; `at` uses those defaults to auto-wire any
/// submodule slot the user left unbound, recursively, so a freshly
/// requested module comes back runnable whenever ready defaults exist.
///
/// There is no process-wide instance: create as many managers as needed.
#[derive(Default)]
pub struct ModuleManager {
    modules: BTreeMap<String, Module>,
    defaults: FxHashMap<TypeTag, String>,
    default_inputs: FxHashMap<TypeTag, InputMap>,
    caches: ModuleManagerCache,
    runtime: RuntimeView,
}

impl ModuleManager {
    /// A manager running on the global parallel runtime.
    pub fn new() -> Self {
        ModuleManager::default()
    }

    /// A manager whose modules see `runtime`.
    pub fn with_runtime(runtime: RuntimeView) -> Self {
        ModuleManager {
            runtime,
            ..ModuleManager::default()
        }
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.modules.contains_key(key)
    }

    /// Registered module keys, in sorted order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.modules.keys().map(String::as_str)
    }

    /// Registers `kernel` under `key`: snapshots its declaration, assigns a
    /// fresh UUID, and attaches the per-key caches and the runtime handle.
    #[tracing::instrument(level = "debug", skip_all)]
    pub fn add_module<K: ModuleKernel>(
        &mut self,
        key: impl Into<String>,
        kernel: K,
    ) -> Result<(), ModuleError> {
        let key = key.into();
        if self.contains(&key) {
            return Err(ModuleError::duplicate_key(key));
        }
        let mut base = ModuleBase::new(kernel)?;
        base.set_uuid(Uuid::new_v4());
        base.set_user_cache(self.caches.user_cache(&key));
        base.set_runtime(self.runtime.clone());
        let module = Module::new(Arc::new(base), Some(self.caches.module_cache(&key)));
        debug!(key = %key, uuid = %module.uuid(), "registered module");
        self.modules.insert(key, module);
        Ok(())
    }

    /// Unloads the module under `key`; the key is free again. Cache
    /// contents are retained (results may still be referenced elsewhere,
    /// and a re-registration picks them back up). A no-op when absent.
    pub fn erase(&mut self, key: &str) {
        self.modules.remove(key);
    }

    /// Registers an unlocked copy of `src` under `dst`. The copy shares
    /// `src`'s base (and therefore its UUID and caches) but carries its own
    /// overlay.
    pub fn copy_module(&mut self, src: &str, dst: impl Into<String>) -> Result<(), ModuleError> {
        let dst = dst.into();
        if self.contains(&dst) {
            return Err(ModuleError::duplicate_key(dst));
        }
        let module = self
            .modules
            .get(src)
            .ok_or_else(|| ModuleError::missing_key(src))?
            .unlocked_copy();
        self.modules.insert(dst, module);
        Ok(())
    }

    /// Moves the module under `old` to `new`.
    pub fn rename_module(&mut self, old: &str, new: impl Into<String>) -> Result<(), ModuleError> {
        let new = new.into();
        if self.contains(&new) {
            return Err(ModuleError::duplicate_key(new));
        }
        let module = self
            .modules
            .remove(old)
            .ok_or_else(|| ModuleError::missing_key(old))?;
        self.modules.insert(new, module);
        Ok(())
    }

    /// Binds a value to the named input of the module under `key`.
    pub fn change_input<T: InputValue>(
        &self,
        key: &str,
        name: &str,
        value: T,
    ) -> Result<(), ModuleError> {
        self.get(key)?.change_input(name, value)
    }

    /// Binds the module under `submod_key` into the named submodule slot of
    /// the module under `module_key`. The submodule is resolved through
    /// `at`, so its own slots get default-wired first.
    pub fn change_submod(
        &self,
        module_key: &str,
        slot: &str,
        submod_key: &str,
    ) -> Result<(), ModuleError> {
        let submod = self.at(submod_key)?;
        self.get(module_key)?.change_submod(slot, submod)
    }

    /// Records the module under `key` as the default for any unbound
    /// submodule request of property type `P`. The contract's input map is
    /// stored with the default; auto-wiring only binds the candidate when
    /// it is ready under those inputs.
    pub fn set_default<P: PropertyType>(&mut self, key: &str) -> Result<(), ModuleError> {
        if !self.contains(key) {
            return Err(ModuleError::missing_key(key));
        }
        self.defaults.insert(P::tag(), key.to_string());
        self.default_inputs.insert(P::tag(), P::inputs()?.into_map());
        Ok(())
    }

    /// The module under `key`, with every unbound submodule slot that has a
    /// ready default auto-wired, recursively. Wiring cycles are detected
    /// rather than looped.
    pub fn at(&self, key: &str) -> Result<Module, ModuleError> {
        let mut visiting = Vec::new();
        self.at_(key, &mut visiting)
    }

    /// The module under `key` with no default wiring.
    pub fn get(&self, key: &str) -> Result<&Module, ModuleError> {
        self.modules
            .get(key)
            .ok_or_else(|| ModuleError::missing_key(key))
    }

    /// Runs the module under `key` through the contract `P`.
    pub fn run_as<P: PropertyType>(
        &self,
        key: &str,
        args: impl IntoArgs<P::Inputs>,
    ) -> Result<P::Results, ModuleError> {
        self.at(key)?.run_as::<P>(args)
    }

    /// Replaces the runtime handed to modules registered from now on;
    /// already-registered modules keep the handle they were built with.
    pub fn set_runtime(&mut self, runtime: RuntimeView) {
        self.runtime = runtime;
    }

    pub fn runtime(&self) -> &RuntimeView {
        &self.runtime
    }

    fn at_(&self, key: &str, visiting: &mut Vec<String>) -> Result<Module, ModuleError> {
        if visiting.iter().any(|seen| seen == key) {
            let mut path = visiting.clone();
            path.push(key.to_string());
            return Err(ModuleError::CycleDetected { path });
        }
        let module = self.get(key)?.clone();
        visiting.push(key.to_string());
        for (slot, request) in module.submods() {
            if request.ready() {
                continue;
            }
            let Some(tag) = request.property_type() else {
                continue;
            };
            let Some(default_key) = self.defaults.get(&tag) else {
                continue;
            };
            let candidate = self.at_(default_key, visiting)?;
            let ready = match self.default_inputs.get(&tag) {
                Some(inputs) => candidate.ready_with(inputs),
                None => candidate.ready(),
            };
            if ready {
                debug!(module = %key, slot = %slot, default = %default_key, "auto-wired default submodule");
                module.change_submod(&slot, candidate)?;
            }
        }
        visiting.pop();
        Ok(module)
    }
}

impl std::fmt::Debug for ModuleManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModuleManager")
            .field("modules", &self.modules.len())
            .field("defaults", &self.defaults.len())
            .finish()
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    reason = "tests use unwrap to panic on unexpected state"
)]
mod tests;
