//! Runtime module instances.

use std::collections::BTreeMap;
use std::fmt::{self, Write as _};
use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::RwLock;
use rustc_hash::FxHashSet;
use tracing::debug;
use uuid::Uuid;

use flux_any::{Fingerprint, Fingerprinter, InputValue, TypeTag};
use flux_cache::ModuleCache;
use flux_fields::{FieldError, InputMap, ResultMap};
use flux_props::{unwrap_results, InputArgs, IntoArgs, PropertyType};

use crate::errors::ModuleError;
use crate::module_base::ModuleBase;
use crate::submodule::SubmodMap;

/// What is keeping a module from running.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NotReadyReport {
    /// Non-optional inputs with no value.
    pub inputs: Vec<String>,
    /// Submodule slots that are unbound or bound to an unready module.
    pub submods: Vec<String>,
}

impl NotReadyReport {
    pub fn is_empty(&self) -> bool {
        self.inputs.is_empty() && self.submods.is_empty()
    }
}

impl fmt::Display for NotReadyReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("ready");
        }
        if !self.inputs.is_empty() {
            write!(f, "unset inputs: {}", self.inputs.join(", "))?;
            if !self.submods.is_empty() {
                f.write_str("; ")?;
            }
        }
        if !self.submods.is_empty() {
            write!(f, "unset submodules: {}", self.submods.join(", "))?;
        }
        Ok(())
    }
}

struct ModuleState {
    base: Arc<ModuleBase>,
    inputs: InputMap,
    submods: SubmodMap,
    property_types: FxHashSet<TypeTag>,
    locked: bool,
    memoization: bool,
    name: Option<String>,
    cache: Option<Arc<ModuleCache>>,
    profile: ProfileData,
}

#[derive(Clone, Debug, Default)]
struct ProfileData {
    calls: u32,
    total: Duration,
    last: Option<Duration>,
}

impl ProfileData {
    fn record(&mut self, elapsed: Duration) {
        self.calls += 1;
        self.total += elapsed;
        self.last = Some(elapsed);
    }
}

/// A runtime-configured, invocable unit: one [`ModuleBase`] plus the
/// per-instance overlay (bound inputs, submodule bindings, lock state,
/// memoization control, timing).
///
/// `Module` is a cheap-clone handle; clones refer to the same instance.
/// An instance is mutable while unlocked and freezes on its first `run`;
/// `unlocked_copy` is the only way back to a configurable state.
///
/// Concurrent top-level `run` calls on one instance are the caller's
/// responsibility to serialize: the lock flag, input overlay, and scratch
/// cache are shared state.
#[derive(Clone)]
pub struct Module {
    inner: Arc<RwLock<ModuleState>>,
}

impl Module {
    /// Wraps a base, copying its declared state as the initial overlay.
    /// `cache` is where results are memoized; without one the module never
    /// memoizes.
    pub fn new(base: Arc<ModuleBase>, cache: Option<Arc<ModuleCache>>) -> Self {
        let state = ModuleState {
            inputs: base.inputs().clone(),
            submods: base.submods().clone(),
            property_types: base.property_types().clone(),
            locked: false,
            memoization: true,
            name: None,
            cache,
            profile: ProfileData::default(),
            base,
        };
        Module {
            inner: Arc::new(RwLock::new(state)),
        }
    }

    /// A fresh, unlocked instance carrying the same effective state (same
    /// base, same bound inputs and submodules, same caches).
    pub fn unlocked_copy(&self) -> Module {
        let st = self.inner.read();
        let copy = ModuleState {
            base: Arc::clone(&st.base),
            inputs: st.inputs.clone(),
            submods: st.submods.clone(),
            property_types: st.property_types.clone(),
            locked: false,
            memoization: st.memoization,
            name: st.name.clone(),
            cache: st.cache.clone(),
            profile: ProfileData::default(),
        };
        Module {
            inner: Arc::new(RwLock::new(copy)),
        }
    }

    pub fn has_description(&self) -> bool {
        self.inner.read().base.description().is_some()
    }

    pub fn has_name(&self) -> bool {
        self.inner.read().name.is_some()
    }

    /// Assigns a human-readable instance name (used in profiling output).
    pub fn set_name(&self, name: impl Into<String>) {
        self.inner.write().name = Some(name.into());
    }

    pub fn name(&self) -> Option<String> {
        self.inner.read().name.clone()
    }

    pub fn description(&self) -> Option<String> {
        self.inner.read().base.description().map(str::to_string)
    }

    pub fn citations(&self) -> Vec<String> {
        self.inner.read().base.citations().to_vec()
    }

    /// The identity of the registered algorithm; folded into memoization
    /// fingerprints. Copies made from this instance share it.
    pub fn uuid(&self) -> Uuid {
        self.inner.read().base.uuid()
    }

    pub fn locked(&self) -> bool {
        self.inner.read().locked
    }

    /// Freezes this instance and, transitively, every bound submodule.
    /// Idempotent.
    pub fn lock(&self) {
        let submods: Vec<Module> = {
            let mut st = self.inner.write();
            if st.locked {
                return;
            }
            st.locked = true;
            st.submods
                .values()
                .filter_map(|request| request.module().cloned())
                .collect()
        };
        for module in submods {
            module.lock();
        }
    }

    /// The currently bound inputs.
    pub fn inputs(&self) -> InputMap {
        self.inner.read().inputs.clone()
    }

    /// The declared result fields; a list of what will be computed.
    pub fn results(&self) -> ResultMap {
        self.inner.read().base.results().clone()
    }

    /// The current submodule bindings.
    pub fn submods(&self) -> SubmodMap {
        self.inner.read().submods.clone()
    }

    /// The property types this module may be run as.
    pub fn property_types(&self) -> FxHashSet<TypeTag> {
        self.inner.read().property_types.clone()
    }

    pub fn satisfies<P: PropertyType>(&self) -> bool {
        self.satisfies_tag(P::tag())
    }

    pub fn satisfies_tag(&self, tag: TypeTag) -> bool {
        self.inner.read().property_types.contains(&tag)
    }

    /// Binds a value to the named input. Fails with `Locked` once the
    /// module has run.
    pub fn change_input<T: InputValue>(&self, name: &str, value: T) -> Result<(), ModuleError> {
        let mut st = self.inner.write();
        if st.locked {
            return Err(ModuleError::Locked);
        }
        let field = st
            .inputs
            .get_mut(name)
            .ok_or_else(|| FieldError::MissingField { name: name.into() })?;
        field.change(value)?;
        Ok(())
    }

    /// Binds a module into the named submodule slot. Fails with `Locked`
    /// once the module has run.
    pub fn change_submod(&self, name: &str, module: Module) -> Result<(), ModuleError> {
        let mut st = self.inner.write();
        if st.locked {
            return Err(ModuleError::Locked);
        }
        let request = st
            .submods
            .get_mut(name)
            .ok_or_else(|| FieldError::MissingField { name: name.into() })?;
        request.change(module)
    }

    /// Drops this module's memoized results.
    pub fn reset_cache(&self) {
        if let Some(cache) = &self.inner.read().cache {
            cache.reset();
        }
    }

    /// Drops whatever the kernel has stashed in its scratch cache.
    pub fn reset_internal_cache(&self) {
        self.inner.read().base.reset_internal_cache();
    }

    /// A module memoizes iff its flag is on and every bound submodule is
    /// itself memoizable.
    pub fn is_memoizable(&self) -> bool {
        let submods: Vec<Module> = {
            let st = self.inner.read();
            if !st.memoization {
                return false;
            }
            st.submods
                .values()
                .filter_map(|request| request.module().cloned())
                .collect()
        };
        submods.iter().all(Module::is_memoizable)
    }

    pub fn turn_off_memoization(&self) {
        self.inner.write().memoization = false;
    }

    pub fn turn_on_memoization(&self) {
        self.inner.write().memoization = true;
    }

    /// What is keeping this module from running, given that the fields in
    /// `provided` will be supplied by the caller (they are not checked).
    pub fn list_not_ready(&self, provided: &InputMap) -> NotReadyReport {
        let st = self.inner.read();
        let inputs = st
            .inputs
            .iter()
            .filter(|(name, field)| !provided.contains_key(*name) && !field.ready())
            .map(|(name, _)| name.clone())
            .collect();
        let submods = st.submods.clone();
        drop(st);
        let submods = submods
            .iter()
            .filter(|(_, request)| !request.ready())
            .map(|(name, _)| name.clone())
            .collect();
        NotReadyReport { inputs, submods }
    }

    /// Ready with no caller-supplied inputs.
    pub fn ready(&self) -> bool {
        self.ready_with(&InputMap::new())
    }

    /// Ready given that `provided` arrives from the caller.
    pub fn ready_with(&self, provided: &InputMap) -> bool {
        self.list_not_ready(provided).is_empty()
    }

    /// Ready when invoked through the contract `P`.
    pub fn ready_as<P: PropertyType>(&self) -> Result<bool, ModuleError> {
        Ok(self.ready_with(&P::inputs()?.into_map()))
    }

    /// Path-qualified UUIDs of every transitively bound submodule.
    pub fn submod_uuids(&self) -> BTreeMap<String, Uuid> {
        let submods = self.inner.read().submods.clone();
        let mut out = BTreeMap::new();
        for (name, request) in &submods {
            out.extend(request.submod_uuids(name));
        }
        out
    }

    /// Invokes the module through the contract `P`: positional arguments
    /// are wrapped into `P`'s declared fields (checks enforced), the module
    /// runs, and `P`'s declared results are unwrapped positionally.
    pub fn run_as<P: PropertyType>(
        &self,
        args: impl IntoArgs<P::Inputs>,
    ) -> Result<P::Results, ModuleError> {
        if !self.satisfies_tag(P::tag()) {
            return Err(ModuleError::unsatisfied(P::tag()));
        }
        let fields = P::inputs()?;
        let mut map = fields.clone().into_map();
        args.into_args().wrap(&fields, &mut map)?;
        let results = self.run(map)?;
        Ok(unwrap_results::<P>(&results)?)
    }

    /// Runs the module with an explicit input map.
    ///
    /// The algorithm: validate the caller's inputs, merge them over the
    /// bound inputs (caller wins), check readiness, lock this module and
    /// its submodules, fingerprint the call, probe the result cache, and
    /// only on a miss dispatch to the kernel and memoize what it returns.
    #[tracing::instrument(level = "debug", skip_all)]
    pub fn run(&self, inputs: InputMap) -> Result<ResultMap, ModuleError> {
        let started = Instant::now();

        let unready: Vec<String> = inputs
            .iter()
            .filter(|(_, field)| !field.ready())
            .map(|(name, _)| name.clone())
            .collect();
        if !unready.is_empty() {
            return Err(ModuleError::NotReady {
                inputs: unready,
                submods: Vec::new(),
            });
        }

        let (base, effective, submods, cache, memoization) = {
            let mut st = self.inner.write();
            let mut effective = st.inputs.clone();
            for (name, field) in inputs {
                effective.insert(name, field);
            }

            let report = not_ready(&effective, &st.submods);
            if !report.is_empty() {
                return Err(ModuleError::NotReady {
                    inputs: report.inputs,
                    submods: report.submods,
                });
            }

            st.locked = true;
            (
                Arc::clone(&st.base),
                effective,
                st.submods.clone(),
                st.cache.clone(),
                st.memoization,
            )
        };

        for request in submods.values() {
            if let Some(module) = request.module() {
                module.lock();
            }
        }

        let memoizable = memoization
            && submods
                .values()
                .filter_map(|request| request.module())
                .all(Module::is_memoizable);

        let fingerprint = if memoizable && cache.is_some() {
            Some(call_fingerprint(base.uuid(), &effective, &submods)?)
        } else {
            None
        };

        if let (Some(cache), Some(fp)) = (&cache, &fingerprint) {
            if let Some(hit) = cache.fetch(fp) {
                debug!(module = %base.uuid(), "memoization hit");
                self.inner.write().profile.record(started.elapsed());
                return Ok(hit);
            }
        }

        debug!(module = %base.uuid(), "dispatching to kernel");
        let results = base.run(&effective, &submods)?;

        if let (Some(cache), Some(fp)) = (&cache, fingerprint) {
            cache.store(fp, results.clone());
        }
        self.inner.write().profile.record(started.elapsed());
        Ok(results)
    }

    /// Formatted timing data for this module and, indented beneath it,
    /// every bound submodule.
    pub fn profile_info(&self) -> String {
        let mut out = String::new();
        self.write_profile(&mut out, 0);
        out
    }

    fn write_profile(&self, out: &mut String, depth: usize) {
        let st = self.inner.read();
        let label = st
            .name
            .clone()
            .or_else(|| st.base.description().map(str::to_string))
            .unwrap_or_else(|| st.base.uuid().to_string());
        let indent = "  ".repeat(depth);
        let last = st.profile.last.unwrap_or_default();
        let _ = writeln!(
            out,
            "{indent}{label}: {} call(s), total {:?}, last {:?}",
            st.profile.calls, st.profile.total, last
        );
        let submods = st.submods.clone();
        drop(st);
        for (slot, request) in &submods {
            if let Some(module) = request.module() {
                let _ = writeln!(out, "{indent}  {slot}:");
                module.write_profile(out, depth + 2);
            }
        }
    }
}

impl PartialEq for Module {
    /// Two modules are equal when they wrap the same base and agree on
    /// bound inputs, submodule bindings, satisfied property types, and
    /// lock state.
    fn eq(&self, other: &Self) -> bool {
        if Arc::ptr_eq(&self.inner, &other.inner) {
            return true;
        }
        let lhs = self.inner.read();
        let rhs = other.inner.read();
        Arc::ptr_eq(&lhs.base, &rhs.base)
            && lhs.inputs == rhs.inputs
            && lhs.submods == rhs.submods
            && lhs.property_types == rhs.property_types
            && lhs.locked == rhs.locked
    }
}

impl std::fmt::Debug for Module {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let st = self.inner.read();
        f.debug_struct("Module")
            .field("uuid", &st.base.uuid())
            .field("name", &st.name)
            .field("locked", &st.locked)
            .field("memoization", &st.memoization)
            .finish()
    }
}

fn not_ready(effective: &InputMap, submods: &SubmodMap) -> NotReadyReport {
    NotReadyReport {
        inputs: effective
            .iter()
            .filter(|(_, field)| !field.ready())
            .map(|(name, _)| name.clone())
            .collect(),
        submods: submods
            .iter()
            .filter(|(_, request)| !request.ready())
            .map(|(name, _)| name.clone())
            .collect(),
    }
}

/// Builds the call fingerprint: the module's UUID, the opaque effective
/// inputs, and the path-qualified UUIDs of every transitively bound
/// submodule. Transparent inputs are excluded by definition.
fn call_fingerprint(
    uuid: Uuid,
    effective: &InputMap,
    submods: &SubmodMap,
) -> Result<Fingerprint, ModuleError> {
    let mut fp = Fingerprinter::new();
    fp.write_bytes(uuid.as_bytes());
    for (name, field) in effective {
        if field.is_transparent() || !field.has_value() {
            continue;
        }
        fp.write_str(name);
        field.fingerprint(&mut fp)?;
    }
    for (name, request) in submods {
        for (path, sub_uuid) in request.submod_uuids(name) {
            fp.write_str(&path);
            fp.write_bytes(sub_uuid.as_bytes());
        }
    }
    Ok(fp.finish())
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    reason = "tests use unwrap to panic on unexpected state"
)]
