//! Positional argument tuples and their map translations.
//!
//! Implemented for tuples of arity 0 through 8. Positions map onto fields
//! in declaration order, so argument `i` lands in the `i`-th declared
//! field. `IntoArgs` additionally lets each caller-side argument be
//! anything `Into` the declared type; the conversion happens at wrap time.

use flux_any::{FieldValue, InputValue};
use flux_fields::{FieldTuple, InputFields, InputMap, ResultFields, ResultMap};

use crate::errors::PropertyError;

/// A positional tuple of input values matching a declared input API.
pub trait InputArgs: Sized {
    const LEN: usize;

    /// Binds each element to its declared field, in declaration order.
    fn wrap(self, fields: &InputFields, map: &mut InputMap) -> Result<(), PropertyError>;

    /// Extracts each declared field's value, in declaration order. An empty
    /// tuple extracts nothing and never consults the map.
    fn unwrap(fields: &InputFields, map: &InputMap) -> Result<Self, PropertyError>;
}

/// A positional tuple of result values matching a declared result API.
pub trait ResultArgs: Sized {
    const LEN: usize;

    /// Stores each element into its declared field, in declaration order.
    fn wrap(self, fields: &ResultFields, map: ResultMap) -> Result<ResultMap, PropertyError>;

    /// Extracts each declared field's value, in declaration order.
    fn unwrap(fields: &ResultFields, map: &ResultMap) -> Result<Self, PropertyError>;
}

/// Element-wise conversion into a positional tuple: each argument may be
/// any type `Into` the declared one.
pub trait IntoArgs<T> {
    fn into_args(self) -> T;
}

fn declared_names<F>(tuple: &FieldTuple<F>, expected: usize) -> Result<Vec<&str>, PropertyError> {
    if tuple.len() != expected {
        return Err(PropertyError::ArityMismatch {
            expected,
            found: tuple.len(),
        });
    }
    Ok(tuple.names().collect())
}

fn wrap_input<T: InputValue>(
    map: &mut InputMap,
    name: &str,
    value: T,
) -> Result<(), PropertyError> {
    let field = map.get_mut(name).ok_or_else(|| PropertyError::missing(name))?;
    field.change(value)?;
    Ok(())
}

fn unwrap_input<T: Clone + 'static>(map: &InputMap, name: &str) -> Result<T, PropertyError> {
    let field = map.get(name).ok_or_else(|| PropertyError::missing(name))?;
    Ok(field.value::<T>()?)
}

fn wrap_result<T: FieldValue>(
    map: &mut ResultMap,
    name: &str,
    value: T,
) -> Result<(), PropertyError> {
    let field = map.get_mut(name).ok_or_else(|| PropertyError::missing(name))?;
    field.change(value)?;
    Ok(())
}

fn unwrap_result<T: Clone + 'static>(map: &ResultMap, name: &str) -> Result<T, PropertyError> {
    let field = map.get(name).ok_or_else(|| PropertyError::missing(name))?;
    Ok(field.value::<T>()?)
}

macro_rules! impl_args {
    ($len:literal; $( $T:ident => $idx:tt ),*) => {
        impl<$($T: InputValue + Clone,)*> InputArgs for ($($T,)*) {
            const LEN: usize = $len;

            fn wrap(
                self,
                fields: &InputFields,
                map: &mut InputMap,
            ) -> Result<(), PropertyError> {
                let names = declared_names(fields, $len)?;
                $( wrap_input(map, names[$idx], self.$idx)?; )*
                let _ = (names, map);
                Ok(())
            }

            fn unwrap(fields: &InputFields, map: &InputMap) -> Result<Self, PropertyError> {
                let names = declared_names(fields, $len)?;
                let out = ( $( unwrap_input::<$T>(map, names[$idx])?, )* );
                let _ = (names, map);
                Ok(out)
            }
        }

        impl<$($T: FieldValue + Clone,)*> ResultArgs for ($($T,)*) {
            const LEN: usize = $len;

            fn wrap(
                self,
                fields: &ResultFields,
                mut map: ResultMap,
            ) -> Result<ResultMap, PropertyError> {
                let names = declared_names(fields, $len)?;
                $( wrap_result(&mut map, names[$idx], self.$idx)?; )*
                let _ = (&mut map, names);
                Ok(map)
            }

            fn unwrap(fields: &ResultFields, map: &ResultMap) -> Result<Self, PropertyError> {
                let names = declared_names(fields, $len)?;
                let out = ( $( unwrap_result::<$T>(map, names[$idx])?, )* );
                let _ = (names, map);
                Ok(out)
            }
        }
    };
}

impl_args!(0;);
impl_args!(1; T0 => 0);
impl_args!(2; T0 => 0, T1 => 1);
impl_args!(3; T0 => 0, T1 => 1, T2 => 2);
impl_args!(4; T0 => 0, T1 => 1, T2 => 2, T3 => 3);
impl_args!(5; T0 => 0, T1 => 1, T2 => 2, T3 => 3, T4 => 4);
impl_args!(6; T0 => 0, T1 => 1, T2 => 2, T3 => 3, T4 => 4, T5 => 5);
impl_args!(7; T0 => 0, T1 => 1, T2 => 2, T3 => 3, T4 => 4, T5 => 5, T6 => 6);
impl_args!(8; T0 => 0, T1 => 1, T2 => 2, T3 => 3, T4 => 4, T5 => 5, T6 => 6, T7 => 7);

macro_rules! impl_into_args {
    ($( $A:ident : $T:ident => $idx:tt ),*) => {
        impl<$($A: Into<$T>, $T,)*> IntoArgs<($($T,)*)> for ($($A,)*) {
            fn into_args(self) -> ($($T,)*) {
                ( $( self.$idx.into(), )* )
            }
        }
    };
}

impl_into_args!();
impl_into_args!(A0: T0 => 0);
impl_into_args!(A0: T0 => 0, A1: T1 => 1);
impl_into_args!(A0: T0 => 0, A1: T1 => 1, A2: T2 => 2);
impl_into_args!(A0: T0 => 0, A1: T1 => 1, A2: T2 => 2, A3: T3 => 3);
impl_into_args!(A0: T0 => 0, A1: T1 => 1, A2: T2 => 2, A3: T3 => 3, A4: T4 => 4);
impl_into_args!(A0: T0 => 0, A1: T1 => 1, A2: T2 => 2, A3: T3 => 3, A4: T4 => 4, A5: T5 => 5);
impl_into_args!(
    A0: T0 => 0, A1: T1 => 1, A2: T2 => 2, A3: T3 => 3, A4: T4 => 4, A5: T5 => 5, A6: T6 => 6
);
impl_into_args!(
    A0: T0 => 0, A1: T1 => 1, A2: T2 => 2, A3: T3 => 3, A4: T4 => 4, A5: T5 => 5, A6: T6 => 6,
    A7: T7 => 7
);
