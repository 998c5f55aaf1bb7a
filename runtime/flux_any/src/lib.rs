//! Flux Any - type-erased field values for the Flux module runtime.
//!
//! This crate provides:
//! - Runtime type identity (`TypeTag`)
//! - The erased value contracts (`FieldValue`, `InputValue`) and their
//!   blanket implementations
//! - The type-erased containers carried between loosely-coupled components:
//!   `AnyInput` (owned, const-value, and const-reference storage modes) and
//!   `AnyResult` (owned storage only)
//! - Call fingerprinting (`Fingerprinter`, `Fingerprint`)
//!
//! # Storage modes
//!
//! An `AnyInput` holds its value in one of three modes: owned (mutable),
//! const-value (owned but immutable), or const-reference (shared, backed by
//! an `Arc` so the referent cannot dangle). The mode decides which casts are
//! permitted: a mutable reference can only be taken out of an owned field,
//! and copying a const-reference field deep-copies the referent so the copy
//! is self-contained. `AnyResult` forbids reference modes entirely; results
//! leave the container by value or behind a fresh shared handle.

mod errors;
mod fingerprint;
mod input;
mod result;
mod type_tag;
mod value;

pub use errors::AnyError;
pub use fingerprint::{Fingerprint, Fingerprinter};
pub use input::{make_any_input, AnyInput, StorageMode};
pub use result::{make_any_result, AnyResult};
pub use type_tag::TypeTag;
pub use value::{FieldValue, InputValue};
