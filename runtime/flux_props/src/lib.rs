//! Flux Props - property-type contracts for the Flux module runtime.
//!
//! A property type is a static contract describing the inputs and results
//! of computing a named property. Modules interact through these contracts,
//! which couples them to the properties they need rather than to how those
//! properties are obtained.
//!
//! This crate provides:
//! - The `PropertyType` trait: the declared field tuples plus the positional
//!   argument tuples that give wrap/unwrap their compile-time knowledge
//! - The wrap/unwrap machinery (`InputArgs`, `ResultArgs`, `IntoArgs`)
//!   translating between positional arguments and name-indexed field maps
//! - The `property_type!` declaration macro for the common, base-less case
//!
//! # Inheritance
//!
//! A property type may layer its fields on top of one or more bases. The
//! effective API is own-fields-first, then base fields, realized by
//! `concat`ing the base tuples inside `inputs()`/`results()` and spelling
//! the full positional tuple in `Inputs`/`Results`:
//!
//! ```
//! use flux_props::{property_type, PropertyType};
//! use flux_fields::{FieldError, InputFields, ResultFields};
//!
//! property_type! {
//!     /// Base contract: one i32 input named "C".
//!     pub BaseProp {
//!         inputs { "C" => i32 }
//!         results { "Out" => i32 }
//!     }
//! }
//!
//! /// Derived contract: own inputs "A", "B", then the base's "C".
//! #[derive(Clone, Copy, Debug, Default)]
//! pub struct DerivedProp;
//!
//! impl PropertyType for DerivedProp {
//!     type Inputs = (String, f64, i32);
//!     type Results = (i32,);
//!
//!     fn inputs() -> Result<InputFields, FieldError> {
//!         InputFields::new()
//!             .add_field::<String>("A")?
//!             .add_field::<f64>("B")?
//!             .concat(BaseProp::inputs()?)
//!     }
//!
//!     fn results() -> Result<ResultFields, FieldError> {
//!         BaseProp::results()
//!     }
//! }
//! ```

mod args;
mod errors;
mod macros;
mod property_type;

pub use args::{InputArgs, IntoArgs, ResultArgs};
pub use errors::PropertyError;
pub use property_type::{
    unwrap_inputs, unwrap_results, wrap_inputs, wrap_results, PropertyType,
};

// Re-exported so `property_type!` expansions resolve through `$crate`.
pub use flux_fields::{FieldError, InputFields, ResultFields};
