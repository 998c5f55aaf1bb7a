//! The property-type contract.

use flux_any::TypeTag;
use flux_fields::{FieldError, InputFields, InputMap, ResultFields, ResultMap};

use crate::args::{InputArgs, ResultArgs};
use crate::errors::PropertyError;

/// A static contract describing how to compute a named property.
///
/// Implementors declare the full effective API: `inputs()`/`results()`
/// return the ordered field tuples (own fields first, then any base
/// property type's, layered with `concat`), and `Inputs`/`Results` spell
/// the matching positional tuples. The `property_type!` macro generates
/// both for the common base-less case.
///
/// The contract is identified at runtime by `TypeTag::of::<Self>()`; a
/// module records the tags of the property types it satisfies.
pub trait PropertyType: 'static {
    /// The positional input tuple, in declared-then-base order.
    type Inputs: InputArgs;

    /// The positional result tuple, in declared-then-base order.
    type Results: ResultArgs;

    /// The effective input fields, in positional order.
    fn inputs() -> Result<InputFields, FieldError>;

    /// The effective result fields, in positional order.
    fn results() -> Result<ResultFields, FieldError>;

    /// The runtime identity of this contract.
    fn tag() -> TypeTag
    where
        Self: Sized,
    {
        TypeTag::of::<Self>()
    }
}

/// Binds positional arguments into `map`, one per declared input field, in
/// declaration order. Argument `i` must already have the `i`-th declared
/// type; `run_as`-style callers convert via [`IntoArgs`](crate::IntoArgs)
/// first.
pub fn wrap_inputs<P: PropertyType>(
    map: &mut InputMap,
    args: P::Inputs,
) -> Result<(), PropertyError> {
    args.wrap(&P::inputs()?, map)
}

/// Extracts the declared input values from `map` as a positional tuple.
/// The usual first line of a module kernel.
pub fn unwrap_inputs<P: PropertyType>(map: &InputMap) -> Result<P::Inputs, PropertyError> {
    P::Inputs::unwrap(&P::inputs()?, map)
}

/// Stores positional result values into `map`, one per declared result
/// field, in declaration order.
pub fn wrap_results<P: PropertyType>(
    map: ResultMap,
    values: P::Results,
) -> Result<ResultMap, PropertyError> {
    values.wrap(&P::results()?, map)
}

/// Extracts the declared result values from `map` as a positional tuple.
/// A single-result contract still unwraps to a 1-tuple; the caller
/// unpacks.
pub fn unwrap_results<P: PropertyType>(map: &ResultMap) -> Result<P::Results, PropertyError> {
    P::Results::unwrap(&P::results()?, map)
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    reason = "tests use unwrap to panic on unexpected state"
)]
