//! Validity checks for input fields.
//!
//! A check is a predicate over the type-erased value plus a human-readable
//! description. The description does double duty: it documents the field
//! and it is what gets listed when a binding is rejected.

use std::fmt;
use std::sync::Arc;

use flux_any::AnyInput;

/// A named validity check applied to every value bound to an input field.
#[derive(Clone)]
pub struct InputCheck {
    description: String,
    predicate: Arc<dyn Fn(&AnyInput) -> bool + Send + Sync>,
}

impl InputCheck {
    /// Wraps a typed predicate. A value of the wrong type fails the check.
    pub fn new<T: 'static>(
        description: impl Into<String>,
        predicate: impl Fn(&T) -> bool + Send + Sync + 'static,
    ) -> Self {
        InputCheck {
            description: description.into(),
            predicate: Arc::new(move |value: &AnyInput| {
                value.cast_ref::<T>().map(&predicate).unwrap_or(false)
            }),
        }
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Runs the check against a bound value.
    pub fn accepts(&self, value: &AnyInput) -> bool {
        (self.predicate)(value)
    }
}

impl fmt::Debug for InputCheck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InputCheck")
            .field("description", &self.description)
            .finish_non_exhaustive()
    }
}

/// The value must compare strictly greater than `bound`.
pub fn greater_than<T>(bound: T) -> InputCheck
where
    T: PartialOrd + fmt::Debug + Send + Sync + 'static,
{
    let description = format!("> {bound:?}");
    InputCheck::new(description, move |value: &T| *value > bound)
}

/// The value must compare strictly less than `bound`.
pub fn less_than<T>(bound: T) -> InputCheck
where
    T: PartialOrd + fmt::Debug + Send + Sync + 'static,
{
    let description = format!("< {bound:?}");
    InputCheck::new(description, move |value: &T| *value < bound)
}

/// The value must differ from `bound`.
pub fn not_equal<T>(bound: T) -> InputCheck
where
    T: PartialEq + fmt::Debug + Send + Sync + 'static,
{
    let description = format!("!= {bound:?}");
    InputCheck::new(description, move |value: &T| *value != bound)
}

/// The value must fall in the closed interval `[lo, hi]`.
pub fn in_range<T>(lo: T, hi: T) -> InputCheck
where
    T: PartialOrd + fmt::Debug + Send + Sync + 'static,
{
    let description = format!("in [{lo:?}, {hi:?}]");
    InputCheck::new(description, move |value: &T| *value >= lo && *value <= hi)
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    reason = "tests use unwrap to panic on unexpected state"
)]
mod tests;
