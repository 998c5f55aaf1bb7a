//! A small end-to-end workflow: declare two property types, register a
//! module for each, let the manager wire the dependency, and compute.
//!
//! Run with `cargo run --example prism_workflow`.

use flux::prelude::*;
use flux::ResultMap;

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

struct Rectangle;

impl ModuleKernel for Rectangle {
    fn declare(&self, decl: &mut ModuleDeclaration) -> Result<(), ModuleError> {
        decl.satisfies::<Area>()?;
        decl.set_description("Computes the area of a rectangle")
            .add_citation("Euclid. The Elements. 300 BCE");
        decl.change_input("Dimension 1")?
            .set_description("The height of the rectangle");
        decl.change_input("Dimension 2")?
            .set_description("The width of the rectangle");
        Ok(())
    }

    fn run(&self, ctx: RunContext<'_>) -> Result<ResultMap, ModuleError> {
        let (height, width) = unwrap_inputs::<Area>(ctx.inputs())?;
        Ok(wrap_results::<Area>(ctx.results(), (height * width,))?)
    }
}

struct Prism;

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

fn main() -> Result<(), ModuleError> {
    let mut mm = ModuleManager::new();
    mm.add_module("Rectangle", Rectangle)?;
    mm.add_module("Prism", Prism)?;
    mm.set_default::<Area>("Rectangle")?;

    let (area,) = mm.run_as::<Area>("Rectangle", (1.23, 4.56))?;
    println!("rectangle area = {area}");

    let (base, volume) = mm.run_as::<PrismVolume>("Prism", (vec![1.23, 4.56, 7.89],))?;
    println!("prism base area = {base}, volume = {volume}");

    // The second identical call is served from the cache.
    mm.run_as::<PrismVolume>("Prism", (vec![1.23, 4.56, 7.89],))?;
    let prism = mm.at("Prism")?;
    prism.set_name("prism");
    print!("{}", prism.profile_info());
    Ok(())
}
