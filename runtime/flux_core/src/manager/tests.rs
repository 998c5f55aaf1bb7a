use super::*;
use crate::declaration::ModuleDeclaration;
use crate::module_base::RunContext;
use crate::test_fixtures::{Area, OneOut, Prism, PrismVolume, Rectangle, ReturnsFour};
use flux_fields::ResultMap;
use flux_props::{unwrap_inputs, wrap_results};
use pretty_assertions::assert_eq;

fn manager_with_shapes() -> ModuleManager {
    let mut mm = ModuleManager::new();
    mm.add_module("Rectangle", Rectangle::new().0).unwrap();
    mm.add_module("Prism", Prism).unwrap();
    mm
}

#[test]
fn registration_and_lookup() {
    let mm = manager_with_shapes();
    assert_eq!(mm.len(), 2);
    assert!(mm.contains("Rectangle"));
    let keys: Vec<&str> = mm.keys().collect();
    assert_eq!(keys, vec!["Prism", "Rectangle"]);
    assert!(matches!(
        mm.at("Cube"),
        Err(ModuleError::MissingKey { .. })
    ));
}

#[test]
fn duplicate_keys_are_rejected() {
    let mut mm = manager_with_shapes();
    assert!(matches!(
        mm.add_module("Rectangle", Rectangle::new().0),
        Err(ModuleError::DuplicateKey { .. })
    ));
}

#[test]
fn erase_frees_the_key() {
    let mut mm = manager_with_shapes();
    mm.erase("Rectangle");
    assert!(!mm.contains("Rectangle"));
    mm.add_module("Rectangle", Rectangle::new().0).unwrap();
}

#[test]
fn copy_module_shares_the_base_but_not_the_overlay() {
    let mut mm = manager_with_shapes();
    mm.change_input("Rectangle", "Verbosity", 3_i32).unwrap();
    mm.copy_module("Rectangle", "Rectangle2").unwrap();

    let original = mm.at("Rectangle").unwrap();
    let copy = mm.at("Rectangle2").unwrap();
    assert_eq!(original.uuid(), copy.uuid());
    assert_eq!(copy.inputs()["Verbosity"].value::<i32>().unwrap(), 3);

    copy.change_input("Verbosity", 7_i32).unwrap();
    assert_eq!(original.inputs()["Verbosity"].value::<i32>().unwrap(), 3);
}

#[test]
fn copied_modules_are_unlocked() {
    let mut mm = manager_with_shapes();
    mm.run_as::<Area>("Rectangle", (1.0, 2.0)).unwrap();
    assert!(mm.at("Rectangle").unwrap().locked());
    mm.copy_module("Rectangle", "Rectangle2").unwrap();
    assert!(!mm.at("Rectangle2").unwrap().locked());
}

#[test]
fn rename_moves_the_module() {
    let mut mm = manager_with_shapes();
    mm.rename_module("Rectangle", "Box").unwrap();
    assert!(!mm.contains("Rectangle"));
    assert!(mm.contains("Box"));
    assert!(matches!(
        mm.rename_module("Box", "Prism"),
        Err(ModuleError::DuplicateKey { .. })
    ));
}

#[test]
fn change_submod_wires_by_key() {
    let mm = manager_with_shapes();
    mm.change_submod("Prism", "area", "Rectangle").unwrap();
    let (_, volume) = mm
        .run_as::<PrismVolume>("Prism", (vec![1.0, 2.0, 3.0],))
        .unwrap();
    assert_eq!(volume, 6.0);
}

#[test]
fn set_default_requires_a_registered_key() {
    let mut mm = ModuleManager::new();
    assert!(matches!(
        mm.set_default::<Area>("Rectangle"),
        Err(ModuleError::MissingKey { .. })
    ));
}

#[test]
fn at_auto_wires_ready_defaults() {
    let mut mm = manager_with_shapes();
    mm.set_default::<Area>("Rectangle").unwrap();

    let prism = mm.at("Prism").unwrap();
    let submods = prism.submods();
    assert!(submods["area"].ready());
    assert_eq!(
        submods["area"].module().map(Module::uuid),
        Some(mm.at("Rectangle").unwrap().uuid())
    );
}

#[test]
fn an_unready_default_is_not_wired() {
    let mut mm = ModuleManager::new();
    mm.add_module("Prism", Prism).unwrap();
    // An Area default that itself needs an unbound submodule is not ready.
    mm.add_module("NeedsSub", NeedsSubmodule).unwrap();
    mm.set_default::<Area>("NeedsSub").unwrap();

    let prism = mm.at("Prism").unwrap();
    assert!(!prism.submods()["area"].ready());
}

/// Satisfies `Area` but depends on an `OneOut` submodule nobody binds.
struct NeedsSubmodule;

impl ModuleKernel for NeedsSubmodule {
    fn declare(&self, decl: &mut ModuleDeclaration) -> Result<(), ModuleError> {
        decl.satisfies::<Area>()?;
        decl.add_submodule::<OneOut>("seed")?;
        Ok(())
    }

    fn run(&self, ctx: RunContext<'_>) -> Result<ResultMap, ModuleError> {
        let (dim1, dim2) = unwrap_inputs::<Area>(ctx.inputs())?;
        Ok(wrap_results::<Area>(ctx.results(), (dim1 * dim2,))?)
    }
}

#[test]
fn auto_wiring_recurses_into_the_default_itself() {
    let mut mm = ModuleManager::new();
    mm.add_module("Prism", Prism).unwrap();
    mm.add_module("NeedsSub", NeedsSubmodule).unwrap();
    mm.add_module("Four", ReturnsFour::new().0).unwrap();
    mm.set_default::<Area>("NeedsSub").unwrap();
    mm.set_default::<OneOut>("Four").unwrap();

    // Resolving Prism wires NeedsSub into "area", and Four into
    // NeedsSub's "seed" along the way.
    let prism = mm.at("Prism").unwrap();
    assert!(prism.submods()["area"].ready());
}

/// Satisfies `Area` while requesting an `Area` submodule; the natural prey
/// of default-wiring cycles.
struct SelfSimilar;

impl ModuleKernel for SelfSimilar {
    fn declare(&self, decl: &mut ModuleDeclaration) -> Result<(), ModuleError> {
        decl.satisfies::<Area>()?;
        decl.add_submodule::<Area>("inner")?;
        Ok(())
    }

    fn run(&self, ctx: RunContext<'_>) -> Result<ResultMap, ModuleError> {
        let (inner,) = ctx.submods()["inner"].run_as::<Area>((1.0, 1.0))?;
        Ok(wrap_results::<Area>(ctx.results(), (inner,))?)
    }
}

#[test]
fn default_wiring_cycles_are_detected() {
    let mut mm = ModuleManager::new();
    mm.add_module("SelfSimilar", SelfSimilar).unwrap();
    mm.set_default::<Area>("SelfSimilar").unwrap();
    assert!(matches!(
        mm.at("SelfSimilar"),
        Err(ModuleError::CycleDetected { .. })
    ));
}

#[test]
fn run_as_resolves_and_runs() {
    let mut mm = manager_with_shapes();
    mm.set_default::<Area>("Rectangle").unwrap();
    let (area, volume) = mm
        .run_as::<PrismVolume>("Prism", (vec![1.23, 4.56, 7.89],))
        .unwrap();
    assert!((area - 5.6088).abs() < 1e-10);
    assert!((volume - 44.253432).abs() < 1e-10);
}
