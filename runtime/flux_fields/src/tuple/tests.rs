use super::*;
use pretty_assertions::assert_eq;

fn area_inputs() -> InputFields {
    InputFields::new()
        .add_field::<f64>("Dimension 1")
        .and_then(|t| t.add_field::<f64>("Dimension 2"))
        .map(|t| t.describe("The length of the 2nd dimension"))
        .unwrap()
}

#[test]
fn fields_keep_declaration_order() {
    let tuple = area_inputs();
    let names: Vec<&str> = tuple.names().collect();
    assert_eq!(names, vec!["Dimension 1", "Dimension 2"]);
    assert_eq!(tuple.len(), 2);
}

#[test]
fn duplicate_names_are_rejected() {
    let err = InputFields::new()
        .add_field::<f64>("x")
        .unwrap()
        .add_field::<i32>("x")
        .unwrap_err();
    assert!(matches!(err, FieldError::DuplicateField { .. }));
}

#[test]
fn lookup_by_name() {
    let tuple = area_inputs();
    assert!(tuple.at("Dimension 1").is_ok());
    assert!(tuple.contains("Dimension 2"));
    assert!(matches!(
        tuple.at("Dimension 3"),
        Err(FieldError::MissingField { .. })
    ));
}

#[test]
fn describe_targets_the_most_recent_field() {
    let tuple = area_inputs();
    assert!(!tuple.at("Dimension 1").unwrap().has_description());
    assert_eq!(
        tuple.at("Dimension 2").unwrap().description(),
        Some("The length of the 2nd dimension")
    );
}

#[test]
fn set_default_targets_the_most_recent_field() {
    let tuple = InputFields::new()
        .add_field::<String>("Name")
        .unwrap()
        .set_default(String::new())
        .unwrap();
    assert!(tuple.at("Name").unwrap().has_value());
}

#[test]
fn set_default_on_an_empty_tuple_fails() {
    assert!(matches!(
        InputFields::new().set_default(1_i32),
        Err(FieldError::EmptyTuple)
    ));
}

#[test]
fn concat_preserves_left_to_right_order() {
    let own = InputFields::new()
        .add_field::<String>("A")
        .unwrap()
        .add_field::<f64>("B")
        .unwrap();
    let base = InputFields::new().add_field::<i32>("C").unwrap();
    let all = own.concat(base).unwrap();
    let names: Vec<&str> = all.names().collect();
    assert_eq!(names, vec!["A", "B", "C"]);
}

#[test]
fn concat_rejects_duplicates_across_operands() {
    let lhs = InputFields::new().add_field::<i32>("x").unwrap();
    let rhs = InputFields::new().add_field::<i32>("x").unwrap();
    assert!(matches!(
        lhs.concat(rhs),
        Err(FieldError::DuplicateField { .. })
    ));
}

#[test]
fn result_tuples_share_the_same_behavior() {
    let tuple = ResultFields::new()
        .add_field::<f64>("Base area")
        .unwrap()
        .add_field::<f64>("Volume")
        .unwrap()
        .describe("The volume of the prism");
    let names: Vec<&str> = tuple.names().collect();
    assert_eq!(names, vec!["Base area", "Volume"]);
    assert_eq!(
        tuple.at("Volume").unwrap().description(),
        Some("The volume of the prism")
    );
}

#[test]
fn into_map_keys_every_field() {
    let map = area_inputs().into_map();
    assert_eq!(map.len(), 2);
    assert!(map.contains_key("Dimension 1"));
    assert!(map.contains_key("Dimension 2"));
}
