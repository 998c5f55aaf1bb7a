//! Failure modes of modules and the module manager.

use flux_any::{AnyError, TypeTag};
use flux_cache::CacheError;
use flux_fields::FieldError;
use flux_props::PropertyError;
use thiserror::Error;

/// Errors raised while configuring or running modules.
///
/// Errors raised inside a submodule propagate out of the calling module
/// unchanged; the runtime never swallows or retries.
#[derive(Debug, Error)]
pub enum ModuleError {
    /// A module is already registered under this key.
    #[error("a module is already registered under key {key:?}")]
    DuplicateKey { key: String },

    /// No module is registered under this key.
    #[error("no module is registered under key {key:?}")]
    MissingKey { key: String },

    /// `run` was called on a module whose effective inputs or submodules
    /// are not ready; the payload lists the offending keys.
    #[error("module is not ready: unset inputs {inputs:?}, unset submodules {submods:?}")]
    NotReady {
        inputs: Vec<String>,
        submods: Vec<String>,
    },

    /// A mutation was attempted on a locked module. `unlocked_copy` is the
    /// escape hatch.
    #[error("the module is locked; reconfigure an unlocked copy instead")]
    Locked,

    /// The module's property-type set does not contain the requested
    /// contract.
    #[error("the module does not satisfy property type {property_type}")]
    UnsatisfiedPropertyType { property_type: TypeTag },

    /// A submodule request was used before `set_type` declared what it
    /// requires.
    #[error("the submodule request has no declared property type")]
    SubmoduleTypeNotSet,

    /// A submodule slot was invoked with no module bound to it.
    #[error("submodule slot {slot:?} has no module bound to it")]
    UnboundSubmodule { slot: String },

    /// Default-module wiring would recurse forever.
    #[error("default-module wiring cycle: {}", path.join(" -> "))]
    CycleDetected { path: Vec<String> },

    /// The parallel runtime could not be constructed.
    #[error("failed to build the parallel runtime: {reason}")]
    Runtime { reason: String },

    /// A field-level failure.
    #[error(transparent)]
    Field(#[from] FieldError),

    /// A wrap/unwrap failure.
    #[error(transparent)]
    Property(#[from] PropertyError),

    /// A cache failure.
    #[error(transparent)]
    Cache(#[from] CacheError),

    /// An erased-value failure.
    #[error(transparent)]
    Any(#[from] AnyError),
}

impl ModuleError {
    #[cold]
    pub(crate) fn duplicate_key(key: impl Into<String>) -> Self {
        ModuleError::DuplicateKey { key: key.into() }
    }

    #[cold]
    pub(crate) fn missing_key(key: impl Into<String>) -> Self {
        ModuleError::MissingKey { key: key.into() }
    }

    #[cold]
    pub(crate) fn unsatisfied(property_type: TypeTag) -> Self {
        ModuleError::UnsatisfiedPropertyType { property_type }
    }
}
