//! Lambda and facade modules: contracts satisfied by plain closures.

use std::marker::PhantomData;
use std::sync::Arc;

use flux_fields::ResultMap;
use flux_props::{unwrap_inputs, wrap_results, PropertyType};

use crate::declaration::ModuleDeclaration;
use crate::errors::ModuleError;
use crate::module::Module;
use crate::module_base::{ModuleBase, ModuleKernel, RunContext};

struct LambdaKernel<P, F> {
    function: F,
    marker: PhantomData<fn() -> P>,
}

impl<P, F> ModuleKernel for LambdaKernel<P, F>
where
    P: PropertyType,
    F: Fn(P::Inputs) -> Result<P::Results, ModuleError> + Send + Sync + 'static,
{
    fn declare(&self, decl: &mut ModuleDeclaration) -> Result<(), ModuleError> {
        decl.satisfies::<P>()?;
        Ok(())
    }

    fn run(&self, ctx: RunContext<'_>) -> Result<ResultMap, ModuleError> {
        let args = unwrap_inputs::<P>(ctx.inputs())?;
        let values = (self.function)(args)?;
        Ok(wrap_results::<P>(ctx.results(), values)?)
    }
}

/// Wraps a plain closure into a module satisfying `P`.
///
/// Useful for testing a module in isolation (bind a lambda over the
/// submodule slots it depends on) and for one-off computations that do not
/// warrant a kernel type. The closure cannot be fingerprinted, so the
/// returned module has memoization off; `turn_on_memoization` re-enables
/// it at the caller's own risk.
pub fn make_lambda<P, F>(function: F) -> Result<Module, ModuleError>
where
    P: PropertyType,
    F: Fn(P::Inputs) -> Result<P::Results, ModuleError> + Send + Sync + 'static,
{
    let base = ModuleBase::new(LambdaKernel::<P, F> {
        function,
        marker: PhantomData,
    })?;
    let module = Module::new(Arc::new(base), None);
    module.turn_off_memoization();
    Ok(module)
}

/// Wraps fixed result values into a module satisfying `P`: every call
/// returns `values` regardless of its inputs. Memoization is off, exactly
/// as for `make_lambda`.
pub fn make_facade<P>(values: P::Results) -> Result<Module, ModuleError>
where
    P: PropertyType,
    P::Results: Clone + Send + Sync + 'static,
{
    make_lambda::<P, _>(move |_args| Ok(values.clone()))
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    reason = "tests use unwrap to panic on unexpected state"
)]
mod tests;
