//! Shared kernels and property types for this crate's unit tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use flux_fields::ResultMap;
use flux_props::{property_type, unwrap_inputs, wrap_results};

use crate::declaration::ModuleDeclaration;
use crate::errors::ModuleError;
use crate::module_base::{ModuleKernel, RunContext};

property_type! {
    /// API for modules that compute the area of a shape.
    pub Area {
        inputs {
            "Dimension 1" => f64: "The length of the 1st dimension",
            "Dimension 2" => f64: "The length of the 2nd dimension",
        }
        results {
            "Area" => f64: "The area of the shape",
        }
    }
}

property_type! {
    /// API for modules that compute the volume of a prism.
    pub PrismVolume {
        inputs {
            "Dimensions" => Vec<f64>: "The length of each dimension",
        }
        results {
            "Base area" => f64: "The area of the base",
            "Volume" => f64: "The volume of the prism",
        }
    }
}

property_type! {
    /// No inputs, one int out.
    pub OneOut {
        inputs {}
        results { "Value" => i32 }
    }
}

/// Computes the area of a rectangle; counts kernel dispatches so tests can
/// observe memoization.
pub struct Rectangle {
    calls: Arc<AtomicUsize>,
}

impl Rectangle {
    pub fn new() -> (Self, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        (
            Rectangle {
                calls: Arc::clone(&calls),
            },
            calls,
        )
    }
}

impl ModuleKernel for Rectangle {
    fn declare(&self, decl: &mut ModuleDeclaration) -> Result<(), ModuleError> {
        decl.satisfies::<Area>()?;
        decl.set_description("Computes the area of a rectangle")
            .add_citation("Euclid. The Elements. 300 BCE");
        decl.change_input("Dimension 1")?
            .set_description("The height of the rectangle");
        decl.change_input("Dimension 2")?
            .set_description("The width of the rectangle");
        decl.add_input::<i32>("Verbosity")?
            .set_description("Print level; does not affect the result")
            .make_transparent()
            .set_default(0_i32)?;
        Ok(())
    }

    fn run(&self, ctx: RunContext<'_>) -> Result<ResultMap, ModuleError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let (dim1, dim2) = unwrap_inputs::<Area>(ctx.inputs())?;
        Ok(wrap_results::<Area>(ctx.results(), (dim1 * dim2,))?)
    }
}

/// Computes a prism's volume through an `Area` submodule.
pub struct Prism;

impl ModuleKernel for Prism {
    fn declare(&self, decl: &mut ModuleDeclaration) -> Result<(), ModuleError> {
        decl.satisfies::<PrismVolume>()?;
        decl.set_description("Computes the volume of a prism");
        decl.add_submodule::<Area>("area")?
            .set_description("Submodule used to compute the base's area");
        Ok(())
    }

    fn run(&self, ctx: RunContext<'_>) -> Result<ResultMap, ModuleError> {
        let (dims,) = unwrap_inputs::<PrismVolume>(ctx.inputs())?;
        let (area,) = ctx.submods()["area"].run_as::<Area>((dims[0], dims[1]))?;
        let volume = area * dims[2];
        Ok(wrap_results::<PrismVolume>(ctx.results(), (area, volume))?)
    }
}

/// Always returns 4.
pub struct ReturnsFour {
    calls: Arc<AtomicUsize>,
}

impl ReturnsFour {
    pub fn new() -> (Self, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        (
            ReturnsFour {
                calls: Arc::clone(&calls),
            },
            calls,
        )
    }
}

impl ModuleKernel for ReturnsFour {
    fn declare(&self, decl: &mut ModuleDeclaration) -> Result<(), ModuleError> {
        decl.satisfies::<OneOut>()?;
        Ok(())
    }

    fn run(&self, ctx: RunContext<'_>) -> Result<ResultMap, ModuleError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(wrap_results::<OneOut>(ctx.results(), (4,))?)
    }
}
