use super::*;
use pretty_assertions::assert_eq;

#[test]
fn change_before_set_type_fails() {
    let mut result = ModuleResult::new();
    assert!(matches!(result.change(1_i32), Err(FieldError::TypeNotSet)));
}

#[test]
fn produced_value_round_trips() {
    let mut result = ModuleResult::new();
    result.set_type::<f64>().unwrap();
    result.change(5.6088_f64).unwrap();
    assert_eq!(result.value::<f64>().unwrap(), 5.6088);
}

#[test]
fn produced_value_must_match_the_declared_type() {
    let mut result = ModuleResult::new();
    result.set_type::<f64>().unwrap();
    assert!(matches!(
        result.change(1_i32),
        Err(FieldError::TypeMismatch { .. })
    ));
}

#[test]
fn retype_fails_after_a_value_is_produced() {
    let mut result = ModuleResult::new();
    result.set_type::<f64>().unwrap();
    result.change(1.0_f64).unwrap();
    assert!(matches!(
        result.set_type::<i32>(),
        Err(FieldError::TypeMismatch { .. })
    ));
}

#[test]
fn shared_retrieval_avoids_copying() {
    let mut result = ModuleResult::new();
    result.set_type::<Vec<i32>>().unwrap();
    result.change(vec![1, 2, 3]).unwrap();
    let a = result.value_shared::<Vec<i32>>().unwrap();
    let b = result.value_shared::<Vec<i32>>().unwrap();
    assert_eq!(Arc::as_ptr(&a), Arc::as_ptr(&b));
}

#[test]
fn equality_compares_type_value_and_description() {
    let mut a = ModuleResult::new();
    a.set_type::<i32>().unwrap();
    let mut b = ModuleResult::new();
    b.set_type::<i32>().unwrap();
    assert_eq!(a, b);

    a.change(1_i32).unwrap();
    assert_ne!(a, b);
    b.change(1_i32).unwrap();
    assert_eq!(a, b);

    b.set_description("the answer");
    assert_ne!(a, b);
}
