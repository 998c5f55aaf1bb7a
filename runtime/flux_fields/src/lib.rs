//! Flux Fields - typed slots and field tuples for the Flux module runtime.
//!
//! This crate provides:
//! - `ModuleInput`: a named input parameter with a declared type, an
//!   optional bound value, metadata (description, optional, transparent),
//!   and an ordered list of validity checks
//! - `ModuleResult`: a named output with a declared type and an optional
//!   produced value
//! - `InputCheck` plus comparison-style check constructors
//! - `FieldTuple`: an order-preserving, name-indexed sequence of fields,
//!   the building block of property-type contracts
//! - The field map aliases used throughout the runtime
//!
//! Field maps are `BTreeMap`s: fingerprinting and readiness listings depend
//! on deterministic iteration order.

use std::collections::BTreeMap;

mod checks;
mod errors;
mod input;
mod result;
mod tuple;

pub use checks::{greater_than, in_range, less_than, not_equal, InputCheck};
pub use errors::FieldError;
pub use input::ModuleInput;
pub use result::ModuleResult;
pub use tuple::{FieldTuple, InputFields, ResultFields};

/// Name-indexed input fields, as handed to a module.
pub type InputMap = BTreeMap<String, ModuleInput>;

/// Name-indexed result fields, as returned from a module.
pub type ResultMap = BTreeMap<String, ModuleResult>;
