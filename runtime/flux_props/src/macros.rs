//! The `property_type!` declaration macro.

/// Declares a base-less property type: the marker struct, its
/// `PropertyType` impl, and per-field descriptions.
///
/// ```
/// use flux_props::property_type;
///
/// property_type! {
///     /// API for modules that compute the area of a shape.
///     pub Area {
///         inputs {
///             "Dimension 1" => f64: "The length of the 1st dimension",
///             "Dimension 2" => f64: "The length of the 2nd dimension",
///         }
///         results {
///             "Area" => f64: "The area of the shape",
///         }
///     }
/// }
/// ```
///
/// Field descriptions are optional. Property types that inherit from a base
/// implement [`PropertyType`](crate::PropertyType) by hand, concatenating
/// the base tuples (see the crate docs).
#[macro_export]
macro_rules! property_type {
    (
        $(#[$meta:meta])*
        $vis:vis $name:ident {
            inputs {
                $( $iname:literal => $ity:ty $(: $idesc:literal)? ),* $(,)?
            }
            results {
                $( $rname:literal => $rty:ty $(: $rdesc:literal)? ),* $(,)?
            }
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
        $vis struct $name;

        impl $crate::PropertyType for $name {
            type Inputs = ( $($ity,)* );
            type Results = ( $($rty,)* );

            fn inputs() -> ::std::result::Result<$crate::InputFields, $crate::FieldError> {
                let fields = $crate::InputFields::new();
                $(
                    let fields = fields.add_field::<$ity>($iname)?;
                    $( let fields = fields.describe($idesc); )?
                )*
                Ok(fields)
            }

            fn results() -> ::std::result::Result<$crate::ResultFields, $crate::FieldError> {
                let fields = $crate::ResultFields::new();
                $(
                    let fields = fields.add_field::<$rty>($rname)?;
                    $( let fields = fields.describe($rdesc); )?
                )*
                Ok(fields)
            }
        }
    };
}
