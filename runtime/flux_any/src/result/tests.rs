use super::*;
use pretty_assertions::assert_eq;

#[test]
fn round_trip_by_value() {
    let result = make_any_result(4.5_f64);
    assert_eq!(result.cast::<f64>().unwrap(), 4.5);
}

#[test]
fn round_trip_by_shared_handle() {
    let result = make_any_result(vec![1, 2, 3]);
    let shared = result.cast_shared::<Vec<i32>>().unwrap();
    assert_eq!(*shared, vec![1, 2, 3]);
}

#[test]
fn wrong_type_is_a_type_mismatch() {
    let result = make_any_result(4.5_f64);
    assert!(matches!(
        result.cast::<i32>(),
        Err(AnyError::TypeMismatch { .. })
    ));
    assert!(matches!(
        result.cast_shared::<i32>(),
        Err(AnyError::TypeMismatch { .. })
    ));
}

#[test]
fn empty_result_refuses_casts() {
    let result = AnyResult::empty();
    assert!(!result.has_value());
    assert!(matches!(result.cast::<i32>(), Err(AnyError::EmptyField)));
    assert!(result.type_tag().is_none());
}

#[test]
fn equality_compares_value_and_type() {
    assert_eq!(make_any_result(1_i32), make_any_result(1_i32));
    assert_ne!(make_any_result(1_i32), make_any_result(2_i32));
    assert_ne!(make_any_result(1_i32), make_any_result(1_i64));
    assert_eq!(AnyResult::empty(), AnyResult::empty());
    assert_ne!(AnyResult::empty(), make_any_result(1_i32));
}

#[test]
fn clones_share_the_wrapped_value() {
    let result = make_any_result(String::from("big"));
    let copy = result.clone();
    let a = result.cast_shared::<String>().unwrap();
    let b = copy.cast_shared::<String>().unwrap();
    assert_eq!(Arc::as_ptr(&a), Arc::as_ptr(&b));
}

#[test]
fn can_cast_checks_the_type() {
    let result = make_any_result(1_u8);
    assert!(result.can_cast::<u8>());
    assert!(!result.can_cast::<u16>());
}

#[test]
fn display_shows_the_value() {
    assert_eq!(make_any_result("txt").to_string(), "\"txt\"");
}
