//! Developer-authored kernels and their declared surface.

use std::sync::Arc;

use rustc_hash::FxHashSet;
use uuid::Uuid;

use flux_any::TypeTag;
use flux_cache::UserCache;
use flux_fields::{InputMap, ResultMap};

use crate::declaration::ModuleDeclaration;
use crate::errors::ModuleError;
use crate::runtime::RuntimeView;
use crate::submodule::SubmodMap;

/// A computational kernel, as written by a module developer.
///
/// `declare` runs once, when the kernel is wrapped into a [`ModuleBase`];
/// it fixes the module's API (inputs, results, submodule slots, satisfied
/// property types, metadata). `run` is the algorithm. The runtime
/// guarantees that by the time `run` is called every non-optional input
/// has a validated value and every submodule slot is bound and ready.
pub trait ModuleKernel: Send + Sync + 'static {
    /// Declares the kernel's field surface.
    fn declare(&self, decl: &mut ModuleDeclaration) -> Result<(), ModuleError>;

    /// The algorithm. Unwrap the inputs, compute, wrap the results.
    fn run(&self, ctx: RunContext<'_>) -> Result<ResultMap, ModuleError>;
}

/// Everything a kernel sees while running.
pub struct RunContext<'a> {
    inputs: &'a InputMap,
    submods: &'a SubmodMap,
    results: ResultMap,
    runtime: &'a RuntimeView,
    cache: Option<&'a UserCache>,
}

impl RunContext<'_> {
    /// The effective inputs of this call, already validated.
    pub fn inputs(&self) -> &InputMap {
        self.inputs
    }

    /// The bound submodules, all ready under their declared contracts.
    pub fn submods(&self) -> &SubmodMap {
        self.submods
    }

    /// A fresh copy of the declared result fields, ready for
    /// `wrap_results`.
    pub fn results(&self) -> ResultMap {
        self.results.clone()
    }

    /// The process's parallel runtime.
    pub fn runtime(&self) -> &RuntimeView {
        self.runtime
    }

    /// The module's scratch cache, when the module was registered through a
    /// manager.
    pub fn cache(&self) -> Option<&UserCache> {
        self.cache
    }
}

/// One kernel plus the snapshot of its declaration.
///
/// A `ModuleBase` is immutable once built and shared by every module
/// instance that wraps it (copies made with `copy_module` included). Its
/// UUID identifies the registered algorithm inside memoization
/// fingerprints.
pub struct ModuleBase {
    kernel: Box<dyn ModuleKernel>,
    kernel_type: TypeTag,
    uuid: Uuid,
    inputs: InputMap,
    results: ResultMap,
    submods: SubmodMap,
    property_types: FxHashSet<TypeTag>,
    description: Option<String>,
    citations: Vec<String>,
    user_cache: Option<Arc<UserCache>>,
    runtime: RuntimeView,
}

impl ModuleBase {
    /// Wraps `kernel`, running its declaration.
    pub fn new<K: ModuleKernel>(kernel: K) -> Result<Self, ModuleError> {
        let mut decl = ModuleDeclaration::default();
        kernel.declare(&mut decl)?;
        Ok(ModuleBase {
            kernel: Box::new(kernel),
            kernel_type: TypeTag::of::<K>(),
            uuid: Uuid::new_v4(),
            inputs: decl.inputs,
            results: decl.results,
            submods: decl.submods,
            property_types: decl.property_types,
            description: decl.description,
            citations: decl.citations,
            user_cache: None,
            runtime: RuntimeView::new(),
        })
    }

    /// The runtime identity of the kernel's concrete type.
    pub fn kernel_type(&self) -> TypeTag {
        self.kernel_type
    }

    pub fn uuid(&self) -> Uuid {
        self.uuid
    }

    /// The developer-declared inputs (defaults included).
    pub fn inputs(&self) -> &InputMap {
        &self.inputs
    }

    /// The developer-declared results; a list of what will be computed.
    pub fn results(&self) -> &ResultMap {
        &self.results
    }

    /// The developer-declared submodule slots.
    pub fn submods(&self) -> &SubmodMap {
        &self.submods
    }

    pub fn property_types(&self) -> &FxHashSet<TypeTag> {
        &self.property_types
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn citations(&self) -> &[String] {
        &self.citations
    }

    /// Drops everything the kernel has stashed in its scratch cache.
    pub fn reset_internal_cache(&self) {
        if let Some(cache) = &self.user_cache {
            cache.reset();
        }
    }

    /// Dispatches to the kernel. The runtime calls this on the memoization
    /// miss path; `inputs` and `submods` are the effective, validated call
    /// state.
    pub fn run(&self, inputs: &InputMap, submods: &SubmodMap) -> Result<ResultMap, ModuleError> {
        let ctx = RunContext {
            inputs,
            submods,
            results: self.results.clone(),
            runtime: &self.runtime,
            cache: self.user_cache.as_deref(),
        };
        self.kernel.run(ctx)
    }

    pub(crate) fn set_uuid(&mut self, uuid: Uuid) {
        self.uuid = uuid;
    }

    pub(crate) fn set_user_cache(&mut self, cache: Arc<UserCache>) {
        self.user_cache = Some(cache);
    }

    pub(crate) fn set_runtime(&mut self, runtime: RuntimeView) {
        self.runtime = runtime;
    }
}

impl std::fmt::Debug for ModuleBase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModuleBase")
            .field("kernel_type", &self.kernel_type)
            .field("uuid", &self.uuid)
            .field("inputs", &self.inputs.len())
            .field("results", &self.results.len())
            .field("submods", &self.submods.len())
            .finish()
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    reason = "tests use unwrap to panic on unexpected state"
)]
