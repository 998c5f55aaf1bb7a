//! Flux - a scientific-computing module runtime.
//!
//! Flux turns individually written computational kernels ("modules") into
//! composable, memoized, dependency-resolved units invokable through
//! strongly-typed contracts ("property types"). Configure modules, wire
//! their submodule dependencies, and ask a manager to produce a property;
//! the runtime enforces type contracts, validates inputs, fingerprints
//! calls for caching, and dispatches only on cache misses.
//!
//! This crate re-exports the whole public surface; the implementation
//! lives in the leaf crates (`flux_any`, `flux_fields`, `flux_props`,
//! `flux_cache`, `flux_core`).
//!
//! ```
//! use flux::prelude::*;
//! use flux::ResultMap;
//!
//! property_type! {
//!     /// API for modules that compute the area of a shape.
//!     pub Area {
//!         inputs {
//!             "Dimension 1" => f64,
//!             "Dimension 2" => f64,
//!         }
//!         results { "Area" => f64 }
//!     }
//! }
//!
//! struct Rectangle;
//!
//! impl ModuleKernel for Rectangle {
//!     fn declare(&self, decl: &mut ModuleDeclaration) -> Result<(), ModuleError> {
//!         decl.satisfies::<Area>()?;
//!         decl.set_description("Computes the area of a rectangle");
//!         Ok(())
//!     }
//!
//!     fn run(&self, ctx: RunContext<'_>) -> Result<ResultMap, ModuleError> {
//!         let (d1, d2) = unwrap_inputs::<Area>(ctx.inputs())?;
//!         Ok(wrap_results::<Area>(ctx.results(), (d1 * d2,))?)
//!     }
//! }
//!
//! fn main() -> Result<(), ModuleError> {
//!     let mut mm = ModuleManager::new();
//!     mm.add_module("Rectangle", Rectangle)?;
//!     let (area,) = mm.run_as::<Area>("Rectangle", (1.23, 4.56))?;
//!     assert!((area - 5.6088).abs() < 1e-10);
//!     Ok(())
//! }
//! ```

pub use flux_any::{
    make_any_input, make_any_result, AnyError, AnyInput, AnyResult, FieldValue, Fingerprint,
    Fingerprinter, InputValue, StorageMode, TypeTag,
};
pub use flux_cache::{CacheError, CacheTag, ModuleCache, ModuleManagerCache, UserCache};
pub use flux_core::{
    make_facade, make_lambda, Module, ModuleBase, ModuleDeclaration, ModuleError, ModuleKernel,
    ModuleManager, NotReadyReport, RunContext, RuntimeView, SubmodMap, SubmoduleRequest,
};
pub use flux_fields::{
    greater_than, in_range, less_than, not_equal, FieldError, FieldTuple, InputCheck, InputFields,
    InputMap, ModuleInput, ModuleResult, ResultFields, ResultMap,
};
pub use flux_props::{
    property_type, unwrap_inputs, unwrap_results, wrap_inputs, wrap_results, InputArgs, IntoArgs,
    PropertyError, PropertyType, ResultArgs,
};

/// Everything needed to declare property types and write or drive modules.
pub mod prelude {
    pub use flux_core::{
        make_facade, make_lambda, Module, ModuleDeclaration, ModuleError, ModuleKernel,
        ModuleManager, RunContext, RuntimeView,
    };
    pub use flux_fields::{greater_than, in_range, less_than, not_equal, InputCheck};
    pub use flux_props::{
        property_type, unwrap_inputs, unwrap_results, wrap_inputs, wrap_results, PropertyType,
    };
}
