use super::*;
use flux_props::property_type;
use pretty_assertions::assert_eq;

property_type! {
    Area {
        inputs {
            "Dimension 1" => f64: "The length of the 1st dimension",
            "Dimension 2" => f64: "The length of the 2nd dimension",
        }
        results { "Area" => f64 }
    }
}

#[test]
fn satisfies_merges_the_contract_fields() {
    let mut decl = ModuleDeclaration::default();
    decl.satisfies::<Area>().unwrap();
    assert!(decl.inputs.contains_key("Dimension 1"));
    assert!(decl.inputs.contains_key("Dimension 2"));
    assert!(decl.results.contains_key("Area"));
    assert!(decl.property_types.contains(&Area::tag()));
}

#[test]
fn add_input_rejects_names_already_declared() {
    let mut decl = ModuleDeclaration::default();
    decl.satisfies::<Area>().unwrap();
    assert!(matches!(
        decl.add_input::<String>("Dimension 1"),
        Err(ModuleError::Field(FieldError::DuplicateField { .. }))
    ));
}

#[test]
fn additional_fields_extend_the_contract() {
    let mut decl = ModuleDeclaration::default();
    decl.satisfies::<Area>().unwrap();
    decl.add_input::<String>("Name")
        .unwrap()
        .set_description("The name of the rectangle")
        .set_default(String::new())
        .unwrap();
    decl.add_result::<String>("Picture").unwrap();
    assert!(decl.inputs["Name"].has_value());
    assert!(decl.results.contains_key("Picture"));
}

#[test]
fn change_input_tightens_merged_metadata() {
    let mut decl = ModuleDeclaration::default();
    decl.satisfies::<Area>().unwrap();
    decl.change_input("Dimension 1")
        .unwrap()
        .set_description("The height of the rectangle");
    assert_eq!(
        decl.inputs["Dimension 1"].description(),
        Some("The height of the rectangle")
    );
}

#[test]
fn change_input_on_an_unknown_field_fails() {
    let mut decl = ModuleDeclaration::default();
    assert!(matches!(
        decl.change_input("nope"),
        Err(ModuleError::Field(FieldError::MissingField { .. }))
    ));
}

#[test]
fn submodule_slots_record_the_required_contract() {
    let mut decl = ModuleDeclaration::default();
    decl.add_submodule::<Area>("area")
        .unwrap()
        .set_description("Computes the base's area");
    let request = &decl.submods["area"];
    assert_eq!(request.property_type(), Some(Area::tag()));
    assert!(!request.ready());
}

#[test]
fn description_and_citations_accumulate() {
    let mut decl = ModuleDeclaration::default();
    decl.set_description("Computes the area of a rectangle")
        .add_citation("Euclid. The Elements. 300 BCE");
    assert_eq!(
        decl.description.as_deref(),
        Some("Computes the area of a rectangle")
    );
    assert_eq!(decl.citations.len(), 1);
}
